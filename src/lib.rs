// src/lib.rs

pub mod cli;
pub mod descriptor;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod settings;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::{CliArgs, CliCommand};
use crate::descriptor::load_and_validate;
use crate::engine::{Orchestrator, OrchestratorOptions};
use crate::exec::ShellRunner;
use crate::fs::RealFileSystem;
use crate::settings::{Settings, load_settings};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings loading (file + CLI overrides)
/// - root descriptor parsing and validation
/// - pre-flight checks
/// - the requested phase(s)
pub async fn run(args: CliArgs) -> Result<()> {
    let settings = resolve_settings(&args)?;

    let descriptor = load_and_validate(&settings.descriptor, &RealFileSystem)
        .with_context(|| format!("failed to load {}", settings.descriptor.display()))?;
    info!(
        path = %descriptor.full_path.display(),
        components = descriptor.includes.len(),
        checks = descriptor.checks.len(),
        "loaded root descriptor"
    );

    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let options = OrchestratorOptions::from_settings(&settings, &cwd);
    let orchestrator = Orchestrator::new(descriptor, options, Arc::new(ShellRunner));

    if args.dry_run {
        print_dry_run(&orchestrator);
        return Ok(());
    }

    dispatch(&orchestrator, args.command).await
}

/// Execute one CLI command against a ready orchestrator.
///
/// Every command runs the descriptor's checks first.
pub async fn dispatch(orchestrator: &Orchestrator, command: Option<CliCommand>) -> Result<()> {
    orchestrator
        .test_checks()
        .await
        .context("failed to TestChecks")?;

    match command {
        None => {
            orchestrator.build_all().await.context("failed to BuildAll")?;
            orchestrator.run_all().await.context("failed to RunAll")?;
        }
        Some(CliCommand::Build) => {
            orchestrator.build_all().await.context("failed to BuildAll")?;
        }
        Some(CliCommand::Test) => {
            orchestrator.test_all().await.context("failed to TestAll")?;
        }
        Some(CliCommand::Clean) => {
            orchestrator.clean_all().await.context("failed to CleanAll")?;
        }
    }

    Ok(())
}

/// Settings file, then CLI flags on top.
fn resolve_settings(args: &CliArgs) -> Result<Settings> {
    let mut settings = load_settings(args.config.as_deref()).context("failed to load settings")?;

    if let Some(file) = &args.file {
        settings.descriptor = file.clone();
    }
    if let Some(tool) = &args.tool {
        settings.tool = tool.clone();
    }

    settings.validate()?;
    debug!(?settings, "resolved settings");
    Ok(settings)
}

/// Simple dry-run output: checks, components and overrides.
fn print_dry_run(orchestrator: &Orchestrator) {
    let descriptor = orchestrator.descriptor();
    let options = orchestrator.options();

    println!("makeup dry-run");
    println!("  descriptor = {}", descriptor.full_path.display());
    println!("  tool = {}", options.tool);
    println!();

    println!("checks ({}):", descriptor.checks.len());
    for check in descriptor.checks.iter() {
        println!("  - {}", check.cmd);
        println!("      expect: {}", check.equals);
    }

    let components = orchestrator.components();
    println!("components ({}):", components.len());
    for component in components.iter() {
        println!("  - {}", component.name);
        println!("      dir: {}", component.dir.display());
        println!("      file: {}", component.file);
        println!("      {}: {}", options.dest_var, component.dest.display());
        if let Some(label) = &component.extern_label {
            println!("      extern: {label}");
        }
    }

    if !descriptor.overrides.is_empty() {
        println!("overrides ({}):", descriptor.overrides.len());
        for ov in descriptor.overrides.iter() {
            println!("  - {}/{}", ov.component, ov.target);
        }
    }

    debug!("dry-run complete (no execution)");
}
