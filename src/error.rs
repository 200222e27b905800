#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum BuildError {
    #[error("Project root not found: {path}")]
    #[diagnostic(help("Pass the directory containing your applications with --root"))]
    RootNotFound { path: PathBuf },

    #[error("Failed to parse {path}")]
    #[diagnostic(help("Check the TOML syntax in your appbuild.toml file"))]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse manifest {path}")]
    #[diagnostic(help(
        "A manifest must be a JSON array of build targets with release_status, \
         subtemplate_path, outfile_path and subtemplate_dict (name, action)"
    ))]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Subtemplate not found: {path}")]
    #[diagnostic(help("subtemplate_path is resolved relative to the project root"))]
    TemplateNotFound { path: PathBuf },

    #[error("Failed to load template {name}")]
    #[diagnostic(help("Check your template syntax"))]
    TemplateParse {
        name: String,
        #[source]
        source: tera::Error,
    },

    #[error("Template rendering failed for {file}")]
    #[diagnostic(help("Check your template syntax and the variables in subtemplate_dict"))]
    RenderError {
        file: String,
        #[source]
        source: tera::Error,
    },

    #[error("Output {path} is produced by more than one target ({first}, {second})")]
    #[diagnostic(help("Every build target must write to its own outfile_path"))]
    DuplicateOutput {
        path: PathBuf,
        first: String,
        second: String,
    },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Glob pattern error: {pattern}")]
    GlobPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

pub type Result<T> = std::result::Result<T, BuildError>;
