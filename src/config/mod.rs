pub mod schema;

use std::path::Path;

use crate::error::{BuildError, Result};

pub use schema::{DefaultsConfig, ManifestsConfig, OutputConfig, ProjectConfig};

pub const CONFIG_FILE_NAME: &str = "appbuild.toml";

/// Load `appbuild.toml` from the project root.
///
/// A missing file yields the default configuration; a file that exists but
/// cannot be read or parsed is an error.
pub fn load_config(root: &Path) -> Result<ProjectConfig> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&config_path).map_err(|e| BuildError::Io {
        context: format!("reading {}", config_path.display()),
        source: e,
    })?;

    toml::from_str(&content).map_err(|e| BuildError::ConfigParse {
        path: config_path,
        source: e,
    })
}
