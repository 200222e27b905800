use std::path::PathBuf;

use crate::manifest::{Platform, ReleaseStatus};
use crate::nav::get_link_creation_apps;
use crate::select::{is_build_target, BuildContext};
use crate::Project;

/// One discovered target and whether the active context builds it.
pub struct ListedTarget {
    pub manifest: PathBuf,
    pub app: String,
    pub action: String,
    pub outfile: PathBuf,
    pub release_status: ReleaseStatus,
    pub platforms: Option<Vec<Platform>>,
    pub selected: bool,
}

impl ListedTarget {
    pub fn platforms_label(&self) -> String {
        match &self.platforms {
            None => "all".to_string(),
            Some(platforms) => platforms
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

pub struct TargetListing {
    pub context: BuildContext,
    pub targets: Vec<ListedTarget>,
    pub navigation: Vec<String>,
}

/// Every target of the project in discovery order, marked with its selection
/// status, plus the navigation list for the project's context.
pub fn list_targets(project: &Project) -> TargetListing {
    let context = project.context;
    let targets = project
        .pool
        .manifests
        .iter()
        .flat_map(|manifest| {
            manifest.targets.iter().map(move |target| ListedTarget {
                manifest: manifest.path.clone(),
                app: target.app_name().to_string(),
                action: target.action().to_string(),
                outfile: target.outfile_path.clone(),
                release_status: target.release_status,
                platforms: target.platforms.clone(),
                selected: is_build_target(target, &context),
            })
        })
        .collect();

    TargetListing {
        context,
        targets,
        navigation: get_link_creation_apps(&project.pool, &context),
    }
}
