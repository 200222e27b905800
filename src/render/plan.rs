use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::OutputConfig;
use crate::error::{BuildError, Result};
use crate::paths::normalized_name;
use crate::render::context::RenderJob;
use crate::render::pretty::make_readable;
use crate::render::templates::TemplateSet;

/// An output file that has been rendered in memory but not yet written.
pub struct PlannedFile {
    /// Path relative to the project root.
    pub relative_path: PathBuf,
    pub content: String,
    pub app: String,
    pub action: String,
}

/// Everything a build would write, in target order.
pub struct RenderPlan {
    pub files: Vec<PlannedFile>,
}

/// Render every job through the template set without touching the output tree.
///
/// Fails on the first missing or broken template, and when two jobs would
/// write the same output file.
pub fn plan_render(
    jobs: &[RenderJob<'_>],
    templates: &mut TemplateSet,
    output: &OutputConfig,
) -> Result<RenderPlan> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for job in jobs {
        let outfile = normalized_name(&job.target.outfile_path);
        if let Some(first) = seen.insert(outfile.clone(), job.target.app_name()) {
            return Err(BuildError::DuplicateOutput {
                path: PathBuf::from(outfile),
                first: first.to_string(),
                second: job.target.app_name().to_string(),
            });
        }
    }

    let mut files = Vec::with_capacity(jobs.len());
    for job in jobs {
        let html = templates.render(&job.target.subtemplate_path, &job.context)?;
        let content = if output.pretty {
            make_readable(&html, output.indent)
        } else {
            html
        };
        files.push(PlannedFile {
            relative_path: job.target.outfile_path.clone(),
            content,
            app: job.target.app_name().to_string(),
            action: job.target.action().to_string(),
        });
    }

    Ok(RenderPlan { files })
}

/// Write one planned file under `root`, replacing any previous contents.
/// Returns the absolute destination.
pub fn write_planned_file(file: &PlannedFile, root: &Path) -> Result<PathBuf> {
    let dest_path = root.join(&file.relative_path);
    if let Some(parent) = dest_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| BuildError::Io {
            context: format!("creating directory {}", parent.display()),
            source: e,
        })?;
    }
    std::fs::write(&dest_path, &file.content).map_err(|e| BuildError::Io {
        context: format!("writing {}", dest_path.display()),
        source: e,
    })?;
    Ok(dest_path)
}
