// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`process`] runs shell commands and captures their combined output.
//! - [`prefix`] holds the output sinks, including the line-prefixing
//!   multiplexer used when several components share the console.
//! - [`env`] turns `KEY=VALUE` output into environment bindings.
//! - [`backend`] provides the `CommandRunner` trait and the production
//!   `ShellRunner`, which tests replace with a fake.

pub mod backend;
pub mod env;
pub mod prefix;
pub mod process;

pub use backend::{CommandRunner, ShellRunner};
pub use env::{EnvBinding, parse_env_bindings};
pub use prefix::{DEFAULT_LABEL_WIDTH, LinePrefixer, OutputSink, OutputStream, StdStreams};
pub use process::{Capture, Invocation, run_shell};
