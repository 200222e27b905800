use std::path::{Component, Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{BuildError, Result};

pub fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| BuildError::GlobPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| BuildError::GlobPattern {
        pattern: "<combined>".into(),
        source: e,
    })
}

/// Root-relative path with `/` separators and no `.` components, used both
/// for glob matching and as the template name.
pub fn normalized_name(rel_path: &Path) -> String {
    rel_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Path of `path` relative to `root`, falling back to `path` itself.
pub fn relative_to(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("App/new.html.subtemplate", "App/new.html.subtemplate")]
    #[case("./App/new.html.subtemplate", "App/new.html.subtemplate")]
    #[case("templates/./base.html.template", "templates/base.html.template")]
    fn test_normalized_name(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalized_name(Path::new(input)), expected);
    }

    #[test]
    fn test_glob_set_matches_nested_dirs() {
        let set = build_glob_set(&["**/node_modules".to_string()]).unwrap();
        assert!(set.is_match("node_modules"));
        assert!(set.is_match("App/node_modules"));
        assert!(!set.is_match("App/new.html"));
    }

    #[test]
    fn test_invalid_glob_errors() {
        let result = build_glob_set(&["[".to_string()]);
        assert!(matches!(result, Err(BuildError::GlobPattern { .. })));
    }
}
