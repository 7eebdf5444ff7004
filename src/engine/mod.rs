// src/engine/mod.rs

//! Orchestration engine.
//!
//! - [`component`] derives per-component paths and commands from includes.
//! - [`checks`] runs the descriptor's pre-flight checks.
//! - [`orchestrator`] implements the build, test, run and clean phases.

use std::path::{Path, PathBuf};

use crate::settings::Settings;

pub mod checks;
pub mod component;
pub mod orchestrator;

pub use checks::run_checks;
pub use component::Component;
pub use orchestrator::{ConsoleFactory, Orchestrator};

/// Target that prints a component's runtime environment.
pub const ENV_TARGET: &str = "env";

/// A full pass over every declared component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Build,
    Test,
    Run,
    Clean,
}

impl Phase {
    /// Delegate tool target invoked for this phase.
    pub fn target(self) -> &'static str {
        match self {
            Phase::Build => "build",
            Phase::Test => "test",
            Phase::Run => "run",
            Phase::Clean => "clean",
        }
    }

    fn progress(self) -> &'static str {
        match self {
            Phase::Build => "building",
            Phase::Test => "testing",
            Phase::Run => "running",
            Phase::Clean => "cleaning",
        }
    }

    fn complete(self) -> &'static str {
        match self {
            Phase::Build => "build complete",
            Phase::Test => "test complete",
            Phase::Run => "run complete",
            Phase::Clean => "clean complete",
        }
    }
}

/// Options shared by every phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorOptions {
    /// Delegate tool command prefix, e.g. `make -s`.
    pub tool: String,
    /// Absolute build output root; each component gets `<bin_root>/<name>`.
    pub bin_root: PathBuf,
    /// Variable used to pass each component its destination path.
    pub dest_var: String,
    pub label_width: usize,
}

impl OrchestratorOptions {
    pub fn from_settings(settings: &Settings, cwd: &Path) -> Self {
        Self {
            tool: settings.tool.clone(),
            bin_root: cwd.join(&settings.bin_dir),
            dest_var: settings.dest_var.clone(),
            label_width: settings.label_width,
        }
    }
}
