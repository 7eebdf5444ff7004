// src/exec/prefix.rs

//! Line-reassembling output sinks.
//!
//! A delegate process writes its stdout and stderr in arbitrary chunks.
//! During the run phase several of them share one console, so each
//! component's output goes through its own [`LinePrefixer`], which only ever
//! emits whole lines tagged with the component's label:
//!
//! ```text
//! api         | listening on :8080
//! worker      | connected to queue
//! ```

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};

/// Default column width for component labels.
pub const DEFAULT_LABEL_WIDTH: usize = 12;

/// Which standard stream of the child a chunk was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// Destination for live (mirrored) process output.
pub trait OutputSink: Send + Sync {
    /// Accept one chunk as read from the child process.
    fn write_chunk(&self, stream: OutputStream, chunk: &[u8]) -> io::Result<()>;

    /// Called once after the process has exited and both streams are drained.
    fn finish(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Mirrors output to this process's own stdout / stderr, unmodified.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdStreams;

impl OutputSink for StdStreams {
    fn write_chunk(&self, stream: OutputStream, chunk: &[u8]) -> io::Result<()> {
        match stream {
            OutputStream::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(chunk)?;
                out.flush()
            }
            OutputStream::Stderr => {
                let mut err = io::stderr().lock();
                err.write_all(chunk)?;
                err.flush()
            }
        }
    }
}

struct PrefixState<W> {
    out: W,
    pending: Vec<u8>,
}

/// Writes every complete line it receives to `out` as `<label><pad>| <line>`.
///
/// Bytes after the last newline are held back until a later write completes
/// the line (or [`LinePrefixer::finish`] is called). Both of a process's
/// streams feed the same instance, so the buffer sits behind a mutex.
pub struct LinePrefixer<W> {
    prefix: String,
    state: Mutex<PrefixState<W>>,
}

impl<W: Write + Send> LinePrefixer<W> {
    pub fn new(label: &str, out: W) -> Self {
        Self::with_width(label, DEFAULT_LABEL_WIDTH, out)
    }

    /// Labels shorter than `width` are padded with spaces; longer labels are
    /// written as-is.
    pub fn with_width(label: &str, width: usize, out: W) -> Self {
        Self {
            prefix: format!("{label:<width$}| "),
            state: Mutex::new(PrefixState {
                out,
                pending: Vec::new(),
            }),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Buffer `chunk` and emit every line it completes.
    pub fn write(&self, chunk: &[u8]) -> io::Result<usize> {
        let mut state = self.lock();
        state.pending.extend_from_slice(chunk);

        let Some(last_newline) = state.pending.iter().rposition(|b| *b == b'\n') else {
            return Ok(chunk.len());
        };

        let complete: Vec<u8> = state.pending.drain(..=last_newline).collect();
        let body = &complete[..complete.len() - 1];
        for line in body.split(|b| *b == b'\n') {
            emit_line(&mut state.out, &self.prefix, line)?;
        }
        state.out.flush()?;

        Ok(chunk.len())
    }

    /// Emit any retained partial line as a final, newline-terminated line.
    pub fn finish(&self) -> io::Result<()> {
        let mut state = self.lock();
        if state.pending.is_empty() {
            return Ok(());
        }
        let rest = std::mem::take(&mut state.pending);
        emit_line(&mut state.out, &self.prefix, &rest)?;
        state.out.flush()
    }

    /// Bytes currently held back waiting for a newline.
    pub fn pending(&self) -> Vec<u8> {
        self.lock().pending.clone()
    }

    /// Consume the prefixer and return the underlying writer.
    ///
    /// Any partial line still pending is discarded.
    pub fn into_inner(self) -> W {
        self.state
            .into_inner()
            .unwrap_or_else(|e| e.into_inner())
            .out
    }

    fn lock(&self) -> MutexGuard<'_, PrefixState<W>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn emit_line<W: Write>(out: &mut W, prefix: &str, line: &[u8]) -> io::Result<()> {
    let mut buf = Vec::with_capacity(prefix.len() + line.len() + 1);
    buf.extend_from_slice(prefix.as_bytes());
    buf.extend_from_slice(line);
    buf.push(b'\n');
    out.write_all(&buf)
}

impl<W: Write + Send> OutputSink for LinePrefixer<W> {
    fn write_chunk(&self, _stream: OutputStream, chunk: &[u8]) -> io::Result<()> {
        self.write(chunk).map(|_| ())
    }

    fn finish(&self) -> io::Result<()> {
        LinePrefixer::finish(self)
    }
}
