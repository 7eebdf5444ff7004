// src/engine/component.rs

use std::path::{Path, PathBuf};

use crate::descriptor::Include;
use crate::exec::EnvBinding;

/// Everything the orchestrator derives from one include.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Descriptor file name without its extension.
    pub name: String,
    /// Directory holding the component descriptor; invocations run here.
    pub dir: PathBuf,
    /// Component descriptor file name, relative to `dir`.
    pub file: String,
    /// Build artifact destination, `<bin_root>/<name>`.
    pub dest: PathBuf,
    pub extern_label: Option<String>,
}

impl Component {
    pub fn from_include(include: &Include, base_dir: &Path, bin_root: &Path) -> Self {
        let resolved = include.resolve(base_dir);
        let name = include.component_name();

        let dir = match resolved.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file = resolved
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            dest: bin_root.join(&name),
            name,
            dir,
            file,
            extern_label: include.extern_label.clone(),
        }
    }

    /// Shell command invoking `target` of this component's own descriptor.
    pub fn command(&self, tool: &str, target: &str) -> String {
        format!("{tool} -f {} {target}", self.file)
    }

    /// Binding that tells the component's build file where its artifact goes.
    pub fn dest_binding(&self, var: &str) -> EnvBinding {
        EnvBinding::new(var, self.dest.to_string_lossy())
    }
}
