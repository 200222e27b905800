pub mod check;
pub mod config;
pub mod error;
pub mod listing;
pub mod manifest;
pub mod nav;
pub mod paths;
pub mod render;
pub mod select;

use std::path::{Path, PathBuf};

use console::style;

use crate::config::{load_config, ProjectConfig};
use crate::error::Result;
use crate::manifest::{discover_manifests, ManifestPool, Platform, ReleaseStatus};
use crate::nav::get_link_creation_apps;
use crate::render::{plan_render, render_jobs, write_planned_file, RenderPlan, TemplateSet};
use crate::select::{select_targets, BuildContext};

pub struct BuildOptions {
    pub root: PathBuf,
    pub platform: Option<Platform>,
    pub release: Option<ReleaseStatus>,
}

/// A project root with its configuration and every manifest it contains.
pub struct Project {
    pub root: PathBuf,
    pub config: ProjectConfig,
    pub context: BuildContext,
    pub pool: ManifestPool,
}

/// Everything needed to write a build that has been rendered but not yet written.
pub struct FullBuildPlan {
    pub root: PathBuf,
    pub context: BuildContext,
    pub navigation: Vec<String>,
    pub render_plan: RenderPlan,
    /// Targets discovered but not selected under `context`.
    pub skipped: usize,
}

pub struct BuiltSite {
    pub root: PathBuf,
    pub files_written: Vec<PathBuf>,
}

/// Command-line flags win over `[defaults]` in appbuild.toml, which win over
/// the built-in web/deprecated context.
pub fn resolve_context(options: &BuildOptions, config: &ProjectConfig) -> BuildContext {
    let fallback = BuildContext::default();
    BuildContext {
        platform: options
            .platform
            .or(config.defaults.platform)
            .unwrap_or(fallback.platform),
        release: options
            .release
            .or(config.defaults.release)
            .unwrap_or(fallback.release),
    }
}

/// Load config and discover every manifest under the project root.
pub fn open_project(options: &BuildOptions) -> Result<Project> {
    let config = load_config(&options.root)?;
    let context = resolve_context(options, &config);
    let pool = discover_manifests(&options.root, &config.manifests)?;
    Ok(Project {
        root: options.root.clone(),
        config,
        context,
        pool,
    })
}

/// Plan a build: discover manifests, select targets, resolve navigation and
/// render every page in memory.
///
/// Navigation is resolved over the whole manifest pool before any page
/// context is built. Nothing is written to disk.
pub fn plan_build(options: BuildOptions) -> Result<FullBuildPlan> {
    let project = open_project(&options)?;
    let context = project.context;

    let navigation = get_link_creation_apps(&project.pool, &context);
    let selected = select_targets(&project.pool, &context);
    let skipped = project.pool.target_count() - selected.len();

    let jobs = render_jobs(&selected, &context, &navigation)?;
    let mut templates = TemplateSet::new(&project.root);
    let render_plan = plan_render(&jobs, &mut templates, &project.config.output)?;

    Ok(FullBuildPlan {
        root: project.root,
        context,
        navigation,
        render_plan,
        skipped,
    })
}

/// Write every planned page, reporting each one as it lands.
pub fn execute_build(plan: FullBuildPlan) -> Result<BuiltSite> {
    let mut files_written = Vec::with_capacity(plan.render_plan.files.len());

    for file in &plan.render_plan.files {
        let dest = write_planned_file(file, &plan.root)?;
        println!(
            "  {} {} {} {}",
            style(&file.app).bold(),
            style(&file.action).green(),
            style("→").dim(),
            style(display_path(&dest, &plan.root)).cyan()
        );
        files_written.push(dest);
    }

    println!(
        "\n{} Build complete: {} pages written, {} targets skipped",
        style("✓").green().bold(),
        files_written.len(),
        plan.skipped
    );

    Ok(BuiltSite {
        root: plan.root,
        files_written,
    })
}

/// Plan and write a build.
pub fn build(options: BuildOptions) -> Result<BuiltSite> {
    let plan = plan_build(options)?;
    execute_build(plan)
}

fn display_path(path: &Path, root: &Path) -> String {
    paths::relative_to(path, root).display().to_string()
}
