//! Optional TOML settings file.
//!
//! Every key is optional. Values from the file replace built-in defaults and are
//! in turn overridden by command-line flags.
//!
//! ```toml
//! format = "xml"
//! device_group = "Branches"
//! include_tags = true
//! tag_name = "from-asa"
//! on_malformed = "skip"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::convert::{ConvertOptions, MalformedLinePolicy};
use crate::render::OutputFormat;

/// Settings as read from a file; `None` means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub format: Option<OutputFormat>,
    pub device_group: Option<String>,
    pub include_tags: Option<bool>,
    pub tag_name: Option<String>,
    pub on_malformed: Option<MalformedLinePolicy>,
}

/// Errors returned when loading a settings file.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load settings from a TOML file.
pub fn load_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigLoadError::Parse {
        path: path.display().to_string(),
        source,
    })
}

impl FileConfig {
    /// Overlay the values that are set onto `base`.
    pub fn apply(self, mut base: ConvertOptions) -> ConvertOptions {
        if let Some(format) = self.format {
            base.format = format;
        }
        if let Some(device_group) = self.device_group {
            base.device_group = device_group;
        }
        if let Some(include_tags) = self.include_tags {
            base.render.include_tags = include_tags;
        }
        if let Some(tag_name) = self.tag_name {
            base.render.tag_name = tag_name;
        }
        if let Some(policy) = self.on_malformed {
            base.on_malformed = policy;
        }
        base
    }
}
