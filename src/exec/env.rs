// src/exec/env.rs

//! Environment bindings passed to delegate invocations.

use std::fmt;

/// A single `KEY=VALUE` environment binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvBinding {
    pub key: String,
    pub value: String,
}

impl EnvBinding {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Interpret one line of output as a binding.
    ///
    /// The line must contain `=`; it is split at the first one. Whitespace
    /// around the key and around the value is trimmed. Anything else in the
    /// value (quotes, further `=`) is kept verbatim. Lines with an empty key
    /// are rejected.
    pub fn parse_line(line: &str) -> Option<Self> {
        let (key, value) = line.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some(Self::new(key, value.trim()))
    }
}

impl fmt::Display for EnvBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Extract bindings from the output of a component's `env` target.
///
/// Every line containing `=` is treated as a binding; all other lines
/// (diagnostics, blank lines) are dropped. Order is preserved so that a
/// later binding of the same key shadows an earlier one once applied.
pub fn parse_env_bindings(output: &str) -> Vec<EnvBinding> {
    output.lines().filter_map(EnvBinding::parse_line).collect()
}
