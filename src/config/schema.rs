use serde::{Deserialize, Serialize};

use crate::manifest::{Platform, ReleaseStatus};

/// Project-level configuration read from `appbuild.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub manifests: ManifestsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Fallbacks for flags not given on the command line.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DefaultsConfig {
    pub platform: Option<Platform>,
    pub release: Option<ReleaseStatus>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ManifestsConfig {
    #[serde(default = "default_manifest_file_name")]
    pub file_name: String,

    /// Globs (relative to the root) for directories and files never scanned.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

fn default_manifest_file_name() -> String {
    "manifest.json".to_string()
}

fn default_exclude() -> Vec<String> {
    vec![
        "**/node_modules".to_string(),
        "**/.git".to_string(),
        "**/target".to_string(),
    ]
}

impl Default for ManifestsConfig {
    fn default() -> Self {
        Self {
            file_name: default_manifest_file_name(),
            exclude: default_exclude(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_true")]
    pub pretty: bool,

    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_true() -> bool {
    true
}

fn default_indent() -> usize {
    1
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_true(),
            indent: default_indent(),
        }
    }
}
