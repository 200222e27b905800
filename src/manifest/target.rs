use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Release maturity of a build target. Variants are declared in order of
/// increasing maturity, so the derived `Ord` is the selection ordering.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Serialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseStatus {
    Redirect,
    Experimental,
    Deprecated,
    Alpha,
    Beta,
    Release,
}

impl ReleaseStatus {
    pub const ALL: [ReleaseStatus; 6] = [
        ReleaseStatus::Redirect,
        ReleaseStatus::Experimental,
        ReleaseStatus::Deprecated,
        ReleaseStatus::Alpha,
        ReleaseStatus::Beta,
        ReleaseStatus::Release,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReleaseStatus::Redirect => "redirect",
            ReleaseStatus::Experimental => "experimental",
            ReleaseStatus::Deprecated => "deprecated",
            ReleaseStatus::Alpha => "alpha",
            ReleaseStatus::Beta => "beta",
            ReleaseStatus::Release => "release",
        }
    }
}

impl fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Serialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Web,
    Chrome,
    Firefox,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Web, Platform::Chrome, Platform::Firefox];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Web => "web",
            Platform::Chrome => "chrome",
            Platform::Firefox => "firefox",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One template-to-output rendering job, as listed in a `manifest.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildTarget {
    pub release_status: ReleaseStatus,

    /// `None` means the target is built for every platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<Platform>>,

    pub subtemplate_path: PathBuf,
    pub outfile_path: PathBuf,
    pub subtemplate_dict: SubtemplateDict,
}

/// Variables handed to the subtemplate. `name` and `action` are required;
/// anything else in the manifest is passed through untouched.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubtemplateDict {
    pub name: String,
    pub action: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// The `nav` value that puts an app into the shared navigation menu.
pub const NAV_NEW: &str = "new";

impl BuildTarget {
    pub fn builds_for(&self, platform: Platform) -> bool {
        match &self.platforms {
            None => true,
            Some(platforms) => platforms.contains(&platform),
        }
    }

    pub fn is_nav_new(&self) -> bool {
        self.subtemplate_dict.nav.as_deref() == Some(NAV_NEW)
    }

    pub fn app_name(&self) -> &str {
        &self.subtemplate_dict.name
    }

    pub fn action(&self) -> &str {
        &self.subtemplate_dict.action
    }
}
