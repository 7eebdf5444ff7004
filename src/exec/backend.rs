// src/exec/backend.rs

//! Pluggable command runner abstraction.
//!
//! The check runner and the orchestrator talk to a [`CommandRunner`] instead
//! of spawning processes directly. Production code uses [`ShellRunner`];
//! tests can provide a runner that records invocations and replies with
//! scripted output without starting any process.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

use super::process::{Invocation, run_shell};

/// Trait abstracting how a shell invocation is executed.
pub trait CommandRunner: Send + Sync {
    /// Run the invocation to completion.
    ///
    /// Returns the combined output on success. Failures must keep the
    /// captured output reachable (see `MakeupError::CommandFailed`).
    fn run(
        &self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>>;
}

/// Runner that executes invocations through the platform shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(
        &self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>> {
        Box::pin(async move { run_shell(&invocation).await })
    }
}
