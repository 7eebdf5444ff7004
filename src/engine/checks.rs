// src/engine/checks.rs

//! Pre-flight checks declared in the root descriptor.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::descriptor::Check;
use crate::errors::MakeupError;
use crate::exec::{CommandRunner, Invocation};

/// Run each check in declaration order, stopping at the first failure.
///
/// Checks run silently, in the current directory, with no extra
/// environment. A check fails if its command exits non-zero or if the
/// expected text is absent from the combined output.
///
/// Nothing is cached: callers run this before every phase.
pub async fn run_checks(checks: &[Check], runner: &dyn CommandRunner) -> Result<()> {
    for check in checks {
        debug!(cmd = %check.cmd, expected = %check.equals, "running check");

        let output = runner
            .run(Invocation::silent(&check.cmd))
            .await
            .with_context(|| format!("failed to run check `{}`", check.cmd))?;

        if !output.contains(&check.equals) {
            return Err(MakeupError::CheckFailed {
                cmd: check.cmd.clone(),
                expected: check.equals.clone(),
                actual: output,
            }
            .into());
        }
    }

    if !checks.is_empty() {
        info!(count = checks.len(), "all checks passed");
    }

    Ok(())
}
