// src/engine/orchestrator.rs

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::descriptor::Descriptor;
use crate::engine::checks::run_checks;
use crate::engine::component::Component;
use crate::engine::{ENV_TARGET, OrchestratorOptions, Phase};
use crate::exec::{CommandRunner, EnvBinding, Invocation, LinePrefixer, parse_env_bindings};

/// Produces the writer each run-phase multiplexer prints to.
pub type ConsoleFactory = Arc<dyn Fn() -> Box<dyn Write + Send> + Send + Sync>;

/// Drives the phases over every component of a validated descriptor.
///
/// Build, test and clean walk the components one at a time in include order
/// and stop at the first failure. Run starts every component at once and
/// lets all of them finish before reporting the first error seen.
#[derive(Clone)]
pub struct Orchestrator {
    descriptor: Arc<Descriptor>,
    options: Arc<OrchestratorOptions>,
    runner: Arc<dyn CommandRunner>,
    console: ConsoleFactory,
}

impl Orchestrator {
    pub fn new(
        descriptor: Descriptor,
        options: OrchestratorOptions,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            descriptor: Arc::new(descriptor),
            options: Arc::new(options),
            runner,
            console: Arc::new(|| Box::new(std::io::stdout()) as Box<dyn Write + Send>),
        }
    }

    /// Send run-phase output somewhere other than stdout.
    pub fn with_console(mut self, console: ConsoleFactory) -> Self {
        self.console = console;
        self
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn options(&self) -> &OrchestratorOptions {
        &self.options
    }

    /// Components in include order.
    pub fn components(&self) -> Vec<Component> {
        let base_dir = self.descriptor.base_dir();
        self.descriptor
            .includes
            .iter()
            .map(|include| Component::from_include(include, &base_dir, &self.options.bin_root))
            .collect()
    }

    /// Run the descriptor's pre-flight checks.
    pub async fn test_checks(&self) -> Result<()> {
        run_checks(&self.descriptor.checks, self.runner.as_ref()).await
    }

    pub async fn build_all(&self) -> Result<()> {
        self.run_sequential(Phase::Build).await
    }

    pub async fn test_all(&self) -> Result<()> {
        self.run_sequential(Phase::Test).await
    }

    pub async fn clean_all(&self) -> Result<()> {
        self.run_sequential(Phase::Clean).await
    }

    async fn run_sequential(&self, phase: Phase) -> Result<()> {
        for component in self.components() {
            info!(component = %component.name, "{}", phase.progress());

            let invocation = Invocation::mirrored(
                component.command(&self.options.tool, phase.target()),
            )
            .in_dir(&component.dir)
            .with_env([component.dest_binding(&self.options.dest_var)]);

            self.runner.run(invocation).await.with_context(|| {
                format!(
                    "failed to {} component '{}' in {}",
                    phase.target(),
                    component.name,
                    component.dir.display()
                )
            })?;

            info!(component = %component.name, "{}", phase.complete());
        }

        Ok(())
    }

    /// Run every component concurrently.
    ///
    /// A failing component does not stop its siblings: every worker runs to
    /// completion and the first error observed is returned afterwards.
    pub async fn run_all(&self) -> Result<()> {
        let mut workers = JoinSet::new();

        for component in self.components() {
            let this = self.clone();
            workers.spawn(async move {
                let name = component.name.clone();
                (name, this.run_component(component).await)
            });
        }

        let mut first_error: Option<anyhow::Error> = None;

        while let Some(joined) = workers.join_next().await {
            let (name, result) = match joined {
                Ok(pair) => pair,
                Err(e) => (
                    "<unknown>".to_string(),
                    Err(anyhow!(e).context("run worker did not complete")),
                ),
            };

            match result {
                Ok(()) => info!(component = %name, "{}", Phase::Run.complete()),
                Err(err) => {
                    error!(component = %name, error = %format!("{err:#}"), "component failed");
                    if first_error.is_none() {
                        first_error = Some(err);
                    } else {
                        warn!(component = %name, "additional run failure; only the first is returned");
                    }
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn run_component(&self, component: Component) -> Result<()> {
        info!(component = %component.name, "{}", Phase::Run.progress());

        let mut env = self
            .resolve_env(&component)
            .await
            .with_context(|| format!("failed to resolve env for component '{}'", component.name))?;
        env.push(component.dest_binding(&self.options.dest_var));

        let sink = LinePrefixer::with_width(
            &component.name,
            self.options.label_width,
            (self.console)(),
        );

        let invocation = Invocation::mirrored(component.command(&self.options.tool, Phase::Run.target()))
            .in_dir(&component.dir)
            .with_env(env)
            .with_sink(Arc::new(sink));

        self.runner.run(invocation).await.with_context(|| {
            format!(
                "failed to run component '{}' in {}",
                component.name,
                component.dir.display()
            )
        })?;

        Ok(())
    }

    /// Collect the bindings printed by the component's `env` target.
    ///
    /// With an `env` override for this component, the root descriptor's
    /// `<component>/env` rule is invoked instead of the component's own file,
    /// from the root descriptor's directory.
    async fn resolve_env(&self, component: &Component) -> Result<Vec<EnvBinding>> {
        let invocation = if self.descriptor.has_override(&component.name, ENV_TARGET) {
            Invocation::silent(format!(
                "{} -f {} {}/{}",
                self.options.tool,
                self.descriptor.full_path.display(),
                component.name,
                ENV_TARGET
            ))
            .in_dir(self.descriptor.base_dir())
        } else {
            Invocation::silent(component.command(&self.options.tool, ENV_TARGET))
                .in_dir(&component.dir)
        };

        let output = self
            .runner
            .run(invocation)
            .await
            .with_context(|| format!("failed to get env {}", component.dir.display()))?;

        Ok(parse_env_bindings(&output))
    }
}
