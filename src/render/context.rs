use serde::Serialize;
use tera::Context;

use crate::error::{BuildError, Result};
use crate::manifest::BuildTarget;
use crate::select::BuildContext;

/// Navigation data shared by every page, exposed to templates as `packages`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Packages {
    pub new: Vec<String>,
}

/// A selected target paired with the variables its template is rendered with.
pub struct RenderJob<'a> {
    pub target: &'a BuildTarget,
    pub context: Context,
}

/// Merge `args` and `packages` into the target's `subtemplate_dict`.
///
/// The run-wide keys take precedence over same-named dict entries.
pub fn build_render_context(
    target: &BuildTarget,
    args: &BuildContext,
    packages: &Packages,
) -> Result<Context> {
    let mut context =
        Context::from_serialize(&target.subtemplate_dict).map_err(|e| BuildError::RenderError {
            file: target.subtemplate_path.display().to_string(),
            source: e,
        })?;
    context.insert("args", args);
    context.insert("packages", packages);
    Ok(context)
}

/// Build the render job for every selected target, preserving their order.
pub fn render_jobs<'a>(
    targets: &[&'a BuildTarget],
    args: &BuildContext,
    navigation: &[String],
) -> Result<Vec<RenderJob<'a>>> {
    let packages = Packages {
        new: navigation.to_vec(),
    };
    targets
        .iter()
        .map(|&target| {
            Ok(RenderJob {
                target,
                context: build_render_context(target, args, &packages)?,
            })
        })
        .collect()
}
