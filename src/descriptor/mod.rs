// src/descriptor/mod.rs

//! The root descriptor: the top-level build file an invocation starts from.
//!
//! - [`model`] defines the parsed representation.
//! - [`parser`] turns a byte stream into directives.
//! - [`loader`] reads the file from disk.
//! - [`validate`] confirms every included component file exists.

pub mod loader;
pub mod model;
pub mod parser;
pub mod validate;

pub use loader::{default_descriptor_path, load_and_validate, load_from_path};
pub use model::{Check, Descriptor, Directive, Include, Override};
pub use parser::{parse, parse_directives};
pub use validate::validate_descriptor;
