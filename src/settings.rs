// src/settings.rs

//! Optional project settings from `makeup.toml`.
//!
//! ```toml
//! descriptor = "main.mk"
//! tool = "make -s"
//! bin_dir = ".bin"
//! dest_var = "BIN_DEST"
//! label_width = 12
//! ```
//!
//! Every key is optional. Command-line flags take precedence over the file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::descriptor::default_descriptor_path;
use crate::errors::{MakeupError, Result};
use crate::exec::DEFAULT_LABEL_WIDTH;

/// Settings file looked up in the working directory when none is given.
pub const DEFAULT_SETTINGS_FILE: &str = "makeup.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Root descriptor to load.
    #[serde(default = "default_descriptor_path")]
    pub descriptor: PathBuf,

    /// Delegate build tool; invoked as `<tool> -f <file> <target>`.
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Build output root, relative to the invocation directory.
    #[serde(default = "default_bin_dir")]
    pub bin_dir: PathBuf,

    /// Variable carrying each component's destination path.
    #[serde(default = "default_dest_var")]
    pub dest_var: String,

    /// Column width of component labels in run output.
    #[serde(default = "default_label_width")]
    pub label_width: usize,
}

fn default_tool() -> String {
    "make -s".to_string()
}

fn default_bin_dir() -> PathBuf {
    PathBuf::from(".bin")
}

fn default_dest_var() -> String {
    "BIN_DEST".to_string()
}

fn default_label_width() -> usize {
    DEFAULT_LABEL_WIDTH
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            descriptor: default_descriptor_path(),
            tool: default_tool(),
            bin_dir: default_bin_dir(),
            dest_var: default_dest_var(),
            label_width: default_label_width(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text and validate them.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tool.trim().is_empty() {
            return Err(MakeupError::ConfigError(
                "`tool` must not be empty".to_string(),
            ));
        }
        if self.dest_var.is_empty() || self.dest_var.contains('=') {
            return Err(MakeupError::ConfigError(format!(
                "`dest_var` must be a non-empty variable name without '=' (got {:?})",
                self.dest_var
            )));
        }
        if self.label_width == 0 {
            return Err(MakeupError::ConfigError(
                "`label_width` must be >= 1 (got 0)".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load settings.
///
/// - With an explicit `path`, the file must exist.
/// - Without one, `makeup.toml` in the working directory is used if present,
///   and built-in defaults otherwise.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_SETTINGS_FILE);
            if !default.is_file() {
                return Ok(Settings::default());
            }
            default
        }
    };

    let contents = std::fs::read_to_string(&path).map_err(|e| {
        MakeupError::ConfigError(format!("reading settings {}: {e}", path.display()))
    })?;
    Settings::from_toml(&contents)
}
