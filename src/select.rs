use serde::Serialize;

use crate::manifest::{BuildTarget, ManifestPool, Platform, ReleaseStatus};

/// The run-wide selection criteria. Serialized into every template as `args`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildContext {
    pub platform: Platform,
    pub release: ReleaseStatus,
}

impl Default for BuildContext {
    fn default() -> Self {
        Self {
            platform: Platform::Web,
            release: ReleaseStatus::Deprecated,
        }
    }
}

/// Whether `target` is built under `context`: the platform must be listed (or
/// no platforms given) and the target must be at least as mature as the
/// release threshold.
pub fn is_build_target(target: &BuildTarget, context: &BuildContext) -> bool {
    target.builds_for(context.platform) && context.release <= target.release_status
}

/// Qualifying targets of the pool, in discovery order.
pub fn select_targets<'a>(
    pool: &'a ManifestPool,
    context: &BuildContext,
) -> Vec<&'a BuildTarget> {
    pool.targets()
        .filter(|target| is_build_target(target, context))
        .collect()
}
