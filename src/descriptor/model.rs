// src/descriptor/model.rs

use std::path::{Path, PathBuf};

/// One production of the root descriptor grammar.
///
/// The parser yields these in source order; [`Descriptor::from_directives`]
/// sorts them into their per-kind lists without reordering within a kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Include(Include),
    Check(Check),
    Override(Override),
}

/// A pre-flight sanity command declared by a `# check` / `# equal` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    /// Shell command to run.
    pub cmd: String,
    /// Substring that must appear in the command's combined output.
    pub equals: String,
}

/// A component reference declared by `include <path>`, optionally preceded
/// by `# extern <label>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    /// Path to the component descriptor, exactly as written.
    pub path: PathBuf,
    /// External source the component is vendored from, if declared.
    pub extern_label: Option<String>,
}

impl Include {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            extern_label: None,
        }
    }

    pub fn with_extern(path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            extern_label: Some(label.into()),
        }
    }

    /// Logical component name: the descriptor's file name without extension.
    pub fn component_name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Resolve the include path against the root descriptor's directory.
    ///
    /// Absolute include paths are returned unchanged.
    pub fn resolve(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.path)
    }
}

/// Declares that `component`'s `target` is supplied by the root descriptor
/// (as `<component>/<target>`) rather than by the component's own file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    pub component: String,
    pub target: String,
}

/// The parsed root descriptor.
///
/// Built once per invocation and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    pub checks: Vec<Check>,
    pub includes: Vec<Include>,
    pub overrides: Vec<Override>,
    /// Absolute path of the root descriptor file.
    pub full_path: PathBuf,
}

impl Descriptor {
    pub fn from_directives(
        directives: impl IntoIterator<Item = Directive>,
        full_path: impl Into<PathBuf>,
    ) -> Self {
        let mut descriptor = Descriptor {
            full_path: full_path.into(),
            ..Default::default()
        };

        for directive in directives {
            match directive {
                Directive::Include(include) => descriptor.includes.push(include),
                Directive::Check(check) => descriptor.checks.push(check),
                Directive::Override(ov) => descriptor.overrides.push(ov),
            }
        }

        descriptor
    }

    /// Whether an override exists for this component/target pair.
    ///
    /// Overrides naming components that are never included simply never
    /// match; they are not rejected anywhere.
    pub fn has_override(&self, component: &str, target: &str) -> bool {
        self.overrides
            .iter()
            .any(|o| o.component == component && o.target == target)
    }

    /// Directory that relative include paths are resolved against.
    pub fn base_dir(&self) -> PathBuf {
        match self.full_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}
