// src/exec/process.rs

//! Shell command execution with combined output capture.

use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::errors::{MakeupError, Result};
use crate::exec::env::EnvBinding;
use crate::exec::prefix::{OutputSink, OutputStream, StdStreams};

/// How a command's output is handled besides being captured.
#[derive(Clone, Default)]
pub enum Capture {
    /// Capture only; nothing is shown while the command runs.
    #[default]
    Silent,
    /// Capture and stream live to the given sink, or to this process's own
    /// stdout/stderr when no sink is given.
    Mirrored(Option<Arc<dyn OutputSink>>),
}

impl fmt::Debug for Capture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capture::Silent => f.write_str("Silent"),
            Capture::Mirrored(None) => f.write_str("Mirrored(std)"),
            Capture::Mirrored(Some(_)) => f.write_str("Mirrored(sink)"),
        }
    }
}

/// A shell command plus everything needed to run it.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    pub cmd: String,
    /// Working directory; `None` keeps the current one.
    pub dir: Option<PathBuf>,
    /// Extra bindings applied on top of the inherited environment, in order.
    pub env: Vec<EnvBinding>,
    pub capture: Capture,
}

impl Invocation {
    pub fn silent(cmd: impl Into<String>) -> Self {
        Self {
            cmd: cmd.into(),
            ..Default::default()
        }
    }

    pub fn mirrored(cmd: impl Into<String>) -> Self {
        Self {
            cmd: cmd.into(),
            capture: Capture::Mirrored(None),
            ..Default::default()
        }
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn with_env(mut self, bindings: impl IntoIterator<Item = EnvBinding>) -> Self {
        self.env.extend(bindings);
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn OutputSink>) -> Self {
        self.capture = Capture::Mirrored(Some(sink));
        self
    }

    /// Value the command will see for `key`, if this invocation sets it.
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .rev()
            .find(|b| b.key == key)
            .map(|b| b.value.as_str())
    }
}

/// Run an invocation through the platform shell.
///
/// Returns the combined stdout + stderr on success. A non-zero exit is
/// reported as [`MakeupError::CommandFailed`], which still carries the full
/// captured output.
pub async fn run_shell(invocation: &Invocation) -> Result<String> {
    debug!(
        cmd = %invocation.cmd,
        dir = ?invocation.dir,
        capture = ?invocation.capture,
        "running command"
    );

    // Build a shell command appropriate for the platform.
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(&invocation.cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(&invocation.cmd);
        c
    };

    if let Some(dir) = &invocation.dir {
        cmd.current_dir(dir);
    }
    for binding in invocation.env.iter() {
        cmd.env(&binding.key, &binding.value);
    }

    cmd.stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning `{}`", invocation.cmd))?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let sink: Option<Arc<dyn OutputSink>> = match &invocation.capture {
        Capture::Silent => None,
        Capture::Mirrored(Some(sink)) => Some(Arc::clone(sink)),
        Capture::Mirrored(None) => Some(Arc::new(StdStreams)),
    };

    let captured = Mutex::new(Vec::new());

    let (out_res, err_res, status) = tokio::join!(
        pump(stdout, OutputStream::Stdout, &captured, sink.as_deref()),
        pump(stderr, OutputStream::Stderr, &captured, sink.as_deref()),
        child.wait(),
    );

    out_res.with_context(|| format!("reading stdout of `{}`", invocation.cmd))?;
    err_res.with_context(|| format!("reading stderr of `{}`", invocation.cmd))?;
    let status = status.with_context(|| format!("waiting for `{}`", invocation.cmd))?;

    if let Some(sink) = &sink {
        if let Err(e) = sink.finish() {
            warn!(cmd = %invocation.cmd, error = %e, "failed to flush mirrored output");
        }
    }

    let output = {
        let bytes = captured.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    };

    debug!(
        cmd = %invocation.cmd,
        exit_code = ?status.code(),
        success = status.success(),
        "command exited"
    );

    if !status.success() {
        return Err(MakeupError::CommandFailed {
            cmd: invocation.cmd.clone(),
            code: status.code(),
            output,
        });
    }

    Ok(output)
}

/// Copy one child stream into the shared capture buffer, mirroring each
/// chunk to `sink` as it arrives.
async fn pump<R: AsyncRead + Unpin>(
    reader: Option<R>,
    stream: OutputStream,
    captured: &Mutex<Vec<u8>>,
    sink: Option<&dyn OutputSink>,
) -> std::io::Result<()> {
    let Some(mut reader) = reader else {
        return Ok(());
    };

    let mut buf = [0u8; 8192];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            return Ok(());
        }
        let chunk = &buf[..n];

        captured
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(chunk);

        if let Some(sink) = sink {
            // Keep draining even if the console goes away, or the child blocks.
            if let Err(e) = sink.write_chunk(stream, chunk) {
                warn!(?stream, error = %e, "failed to mirror command output");
            }
        }
    }
}
