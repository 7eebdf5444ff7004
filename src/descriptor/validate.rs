// src/descriptor/validate.rs

use crate::descriptor::model::Descriptor;
use crate::errors::{MakeupError, Result};
use crate::fs::FileSystem;

/// Confirm every included component descriptor exists on disk.
///
/// Stops at the first missing include. Includes declared with an extern
/// label fail with [`MakeupError::MissingExtern`] so the operator knows the
/// dependency needs fetching; plain includes fail with
/// [`MakeupError::MissingComponent`].
pub fn validate_descriptor(descriptor: &Descriptor, fs: &dyn FileSystem) -> Result<()> {
    let base_dir = descriptor.base_dir();

    for include in descriptor.includes.iter() {
        let path = include.resolve(&base_dir);
        if fs.is_file(&path) {
            continue;
        }

        return Err(match &include.extern_label {
            Some(label) => MakeupError::MissingExtern {
                label: label.clone(),
                path,
            },
            None => MakeupError::MissingComponent { path },
        });
    }

    Ok(())
}
