// src/descriptor/loader.rs

use std::path::{Path, PathBuf};

use crate::descriptor::model::Descriptor;
use crate::descriptor::parser::parse;
use crate::descriptor::validate::validate_descriptor;
use crate::errors::Result;
use crate::fs::FileSystem;

/// Read and parse the root descriptor at `path`.
///
/// The descriptor's `full_path` is the canonical form of `path`. No
/// validation is performed; use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>, fs: &dyn FileSystem) -> Result<Descriptor> {
    let path = path.as_ref();
    let contents = fs.read_to_string(path)?;
    let full_path = fs.canonicalize(path)?;

    parse(contents.as_bytes(), full_path)
}

/// Load the root descriptor and confirm all of its includes exist.
pub fn load_and_validate(path: impl AsRef<Path>, fs: &dyn FileSystem) -> Result<Descriptor> {
    let descriptor = load_from_path(path, fs)?;
    validate_descriptor(&descriptor, fs)?;
    Ok(descriptor)
}

/// The root descriptor used when nothing else is configured.
pub fn default_descriptor_path() -> PathBuf {
    PathBuf::from("main.mk")
}
