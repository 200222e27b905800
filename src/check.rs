use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::load_config;
use crate::error::Result;
use crate::manifest::{find_manifest_paths, load_manifest, BuildTarget, Platform, NAV_NEW};
use crate::paths::normalized_name;
use crate::render::TemplateSet;

/// Result of validating a project.
pub struct CheckResult {
    pub manifest_count: usize,
    pub target_count: usize,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

/// Validate every manifest and subtemplate under `root`.
///
/// Problems with individual manifests or templates are collected rather than
/// returned, so one run reports all of them. Only an unreadable config or a
/// missing root is an `Err`.
pub fn check_project(root: &Path) -> Result<CheckResult> {
    let config = load_config(root)?;
    let manifest_paths = find_manifest_paths(root, &config.manifests)?;

    let mut warnings = Vec::new();
    let mut errors = Vec::new();
    let mut targets: Vec<(PathBuf, BuildTarget)> = Vec::new();

    for path in &manifest_paths {
        match load_manifest(path) {
            Ok(manifest) => {
                targets.extend(manifest.targets.into_iter().map(|t| (path.clone(), t)));
            }
            Err(e) => errors.push(format!("{e}: {}", source_message(&e))),
        }
    }

    let mut templates = TemplateSet::new(root);

    for (manifest, target) in &targets {
        let label = format!(
            "{} ({} {})",
            manifest.display(),
            target.app_name(),
            target.action()
        );

        if let Some(nav) = &target.subtemplate_dict.nav {
            if nav != NAV_NEW {
                warnings.push(format!(
                    "{label}: nav = \"{nav}\" has no effect, only \"{NAV_NEW}\" adds an app to navigation"
                ));
            }
        }

        if target.platforms.as_ref().is_some_and(|p| p.is_empty()) {
            warnings.push(format!(
                "{label}: empty platforms list, this target is never built"
            ));
        }

        if !root.join(&target.subtemplate_path).is_file() {
            errors.push(format!(
                "{label}: subtemplate not found: {}",
                target.subtemplate_path.display()
            ));
            continue;
        }

        if let Err(e) = templates.ensure_loaded(&target.subtemplate_path) {
            errors.push(format!("{label}: {e}: {}", source_message(&e)));
        }
    }

    errors.extend(output_conflicts(&targets));

    Ok(CheckResult {
        manifest_count: manifest_paths.len(),
        target_count: targets.len(),
        warnings,
        errors,
    })
}

/// Targets sharing an output file conflict when some platform builds both.
fn output_conflicts(targets: &[(PathBuf, BuildTarget)]) -> Vec<String> {
    let mut by_outfile: BTreeMap<String, Vec<&BuildTarget>> = BTreeMap::new();
    for (_, target) in targets {
        by_outfile
            .entry(normalized_name(&target.outfile_path))
            .or_default()
            .push(target);
    }

    let mut conflicts = Vec::new();
    for (outfile, group) in by_outfile {
        for platform in Platform::ALL {
            let writers: Vec<&str> = group
                .iter()
                .filter(|t| t.builds_for(platform))
                .map(|t| t.app_name())
                .collect();
            if writers.len() > 1 {
                conflicts.push(format!(
                    "{outfile} is written by {} targets on {platform}: {}",
                    writers.len(),
                    writers.join(", ")
                ));
            }
        }
    }
    conflicts
}

fn source_message(e: &dyn std::error::Error) -> String {
    e.source()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "no further detail".to_string())
}
