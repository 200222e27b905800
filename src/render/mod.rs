pub mod context;
pub mod plan;
pub mod pretty;
pub mod templates;

pub use context::{build_render_context, render_jobs, Packages, RenderJob};
pub use plan::{plan_render, write_planned_file, PlannedFile, RenderPlan};
pub use pretty::make_readable;
pub use templates::TemplateSet;
