pub mod target;

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::ManifestsConfig;
use crate::error::{BuildError, Result};
use crate::paths::{build_glob_set, normalized_name, relative_to};

pub use target::{BuildTarget, Platform, ReleaseStatus, SubtemplateDict, NAV_NEW};

/// The parsed contents of one application's manifest file.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub path: PathBuf,
    pub targets: Vec<BuildTarget>,
}

/// Every manifest found under the project root, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct ManifestPool {
    pub manifests: Vec<Manifest>,
}

impl ManifestPool {
    pub fn targets(&self) -> impl Iterator<Item = &BuildTarget> {
        self.manifests.iter().flat_map(|m| m.targets.iter())
    }

    pub fn target_count(&self) -> usize {
        self.manifests.iter().map(|m| m.targets.len()).sum()
    }
}

impl FromIterator<Manifest> for ManifestPool {
    fn from_iter<I: IntoIterator<Item = Manifest>>(iter: I) -> Self {
        Self {
            manifests: iter.into_iter().collect(),
        }
    }
}

pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path).map_err(|e| BuildError::Io {
        context: format!("reading manifest {}", path.display()),
        source: e,
    })?;

    let targets: Vec<BuildTarget> =
        serde_json::from_str(&content).map_err(|e| BuildError::ManifestParse {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(Manifest {
        path: path.to_path_buf(),
        targets,
    })
}

/// Paths of every manifest file under `root`, sorted by file name at each
/// level so discovery order does not depend on the filesystem.
pub fn find_manifest_paths(root: &Path, config: &ManifestsConfig) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(BuildError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    let exclude_set = build_glob_set(&config.exclude)?;

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !exclude_set.is_match(normalized_name(&relative_to(entry.path(), root)))
        });

    Ok(walker
        .filter_map(|e| e.ok())
        .filter(|entry| {
            entry.file_type().is_file() && entry.file_name() == config.file_name.as_str()
        })
        .map(|entry| entry.into_path())
        .collect())
}

/// Walk the project tree and parse every manifest file. The first malformed
/// manifest aborts discovery.
pub fn discover_manifests(root: &Path, config: &ManifestsConfig) -> Result<ManifestPool> {
    find_manifest_paths(root, config)?
        .iter()
        .map(|path| load_manifest(path))
        .collect::<Result<ManifestPool>>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn manifest_json(name: &str, release: &str) -> String {
        format!(
            r#"[{{
                "release_status": "{release}",
                "subtemplate_path": "{name}/new.html.subtemplate",
                "outfile_path": "{name}/new.html",
                "subtemplate_dict": {{"name": "{name}", "action": "new"}}
            }}]"#
        )
    }

    fn write_manifest(root: &Path, dir: &str, content: &str) {
        let app_dir = root.join(dir);
        fs::create_dir_all(&app_dir).unwrap();
        fs::write(app_dir.join("manifest.json"), content).unwrap();
    }

    #[test]
    fn discovers_manifests_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), "ZeroBin", &manifest_json("ZeroBin", "beta"));
        write_manifest(dir.path(), "PlainPost", &manifest_json("PlainPost", "release"));
        write_manifest(dir.path(), "nested/Deep", &manifest_json("Deep", "alpha"));

        let pool = discover_manifests(dir.path(), &ManifestsConfig::default()).unwrap();
        let names: Vec<&str> = pool.targets().map(|t| t.app_name()).collect();
        assert_eq!(names, vec!["PlainPost", "ZeroBin", "Deep"]);
        assert_eq!(pool.target_count(), 3);
    }

    #[test]
    fn skips_excluded_directories() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), "App", &manifest_json("App", "beta"));
        write_manifest(
            dir.path(),
            "node_modules/pkg",
            &manifest_json("Vendored", "beta"),
        );

        let pool = discover_manifests(dir.path(), &ManifestsConfig::default()).unwrap();
        let names: Vec<&str> = pool.targets().map(|t| t.app_name()).collect();
        assert_eq!(names, vec!["App"]);
    }

    #[test]
    fn honors_custom_manifest_file_name() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), "App", &manifest_json("App", "beta"));
        fs::write(
            dir.path().join("App/apps.json"),
            manifest_json("Other", "beta"),
        )
        .unwrap();

        let config = ManifestsConfig {
            file_name: "apps.json".into(),
            ..ManifestsConfig::default()
        };
        let pool = discover_manifests(dir.path(), &config).unwrap();
        let names: Vec<&str> = pool.targets().map(|t| t.app_name()).collect();
        assert_eq!(names, vec!["Other"]);
    }

    #[test]
    fn malformed_manifest_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), "App", &manifest_json("App", "beta"));
        write_manifest(dir.path(), "Broken", "[{\"release_status\": ");

        let result = discover_manifests(dir.path(), &ManifestsConfig::default());
        match result {
            Err(BuildError::ManifestParse { path, .. }) => {
                assert!(path.ends_with("Broken/manifest.json"));
            }
            other => panic!("expected ManifestParse, got {other:?}"),
        }
    }

    #[test]
    fn missing_root_errors() {
        let result = discover_manifests(
            Path::new("/nonexistent/appbuild/root"),
            &ManifestsConfig::default(),
        );
        assert!(matches!(result, Err(BuildError::RootNotFound { .. })));
    }

    #[test]
    fn empty_manifest_contributes_no_targets() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), "Empty", "[]");
        let pool = discover_manifests(dir.path(), &ManifestsConfig::default()).unwrap();
        assert_eq!(pool.manifests.len(), 1);
        assert_eq!(pool.target_count(), 0);
    }
}
