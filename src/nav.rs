use std::collections::BTreeSet;

use crate::manifest::ManifestPool;
use crate::select::{is_build_target, BuildContext};

/// Names of the apps that appear in the shared navigation menu.
///
/// Only targets selected under `context` whose `nav` is exactly `"new"`
/// contribute. The result is sorted and free of duplicates, so it does not
/// depend on the order manifests were discovered in.
pub fn get_link_creation_apps(pool: &ManifestPool, context: &BuildContext) -> Vec<String> {
    pool.targets()
        .filter(|target| is_build_target(target, context) && target.is_nav_new())
        .map(|target| target.app_name().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
