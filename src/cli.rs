// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `makeup`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "makeup",
    version,
    about = "Build, test, run and clean every component declared in a root build file.",
    long_about = None
)]
pub struct CliArgs {
    /// Phase to execute. Without one, every component is built and then
    /// all of them are run together.
    #[command(subcommand)]
    pub command: Option<CliCommand>,

    /// Root descriptor to load.
    ///
    /// Overrides `descriptor` from the settings file (default: `main.mk`).
    #[arg(long, short = 'f', value_name = "PATH", global = true)]
    pub file: Option<PathBuf>,

    /// Settings file (TOML).
    ///
    /// Default: `makeup.toml` in the current directory, if present.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Delegate build tool command, e.g. `make -s`.
    #[arg(long, value_name = "CMD", global = true)]
    pub tool: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MAKEUP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the components, but don't execute anything.
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum CliCommand {
    /// Build every component, in order.
    Build,
    /// Run every component's tests, in order.
    Test,
    /// Clean every component, in order.
    Clean,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
