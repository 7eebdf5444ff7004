// src/errors.rs

//! Crate-wide error types.
//!
//! The leaf layers (parser, loader, validator, process runner) return
//! [`MakeupError`] so callers can match on what went wrong. The orchestration
//! layers wrap these in `anyhow` context as they bubble up.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MakeupError {
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("missing extern dependency '{label}': {} does not exist", path.display())]
    MissingExtern { label: String, path: PathBuf },

    #[error("missing component file: {} does not exist", path.display())]
    MissingComponent { path: PathBuf },

    #[error("failed check: `{cmd}` is not '{expected}', got '{actual}'")]
    CheckFailed {
        cmd: String,
        expected: String,
        actual: String,
    },

    #[error("command `{cmd}` {}", describe_exit(*code))]
    CommandFailed {
        cmd: String,
        code: Option<i32>,
        output: String,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MakeupError {
    /// Captured output of a failed command, if this error carries one.
    pub fn output(&self) -> Option<&str> {
        match self {
            MakeupError::CommandFailed { output, .. } => Some(output),
            _ => None,
        }
    }
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, MakeupError>;
