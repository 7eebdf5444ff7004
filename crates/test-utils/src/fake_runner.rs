use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use makeup::errors::{MakeupError, Result};
use makeup::exec::{Capture, CommandRunner, Invocation, OutputStream};

#[derive(Debug, Clone)]
enum Reply {
    Output(String),
    Fail { code: i32, output: String },
}

#[derive(Debug, Clone)]
struct Script {
    needle: String,
    reply: Reply,
    delay: Option<Duration>,
}

#[derive(Debug, Default)]
struct State {
    scripts: Vec<Script>,
    calls: Vec<Invocation>,
    completed: Vec<String>,
}

/// A fake command runner that:
/// - records every invocation it receives, in call order
/// - replies with scripted output for commands containing a given needle
///   (first matching script wins; unmatched commands succeed with no output)
/// - forwards scripted output to a mirrored sink, like a real process would
/// - records which commands ran to completion after any scripted delay.
#[derive(Debug, Clone, Default)]
pub struct FakeRunner {
    state: Arc<Mutex<State>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to commands containing `needle` with `output`.
    pub fn respond(self, needle: &str, output: &str) -> Self {
        self.script(needle, Reply::Output(output.to_string()), None)
    }

    /// Fail commands containing `needle` with the given exit code and output.
    pub fn fail(self, needle: &str, code: i32, output: &str) -> Self {
        self.script(
            needle,
            Reply::Fail {
                code,
                output: output.to_string(),
            },
            None,
        )
    }

    /// Succeed with no output after sleeping for `delay`.
    pub fn delay(self, needle: &str, delay: Duration) -> Self {
        self.script(needle, Reply::Output(String::new()), Some(delay))
    }

    fn script(self, needle: &str, reply: Reply, delay: Option<Duration>) -> Self {
        self.state.lock().unwrap().scripts.push(Script {
            needle: needle.to_string(),
            reply,
            delay,
        });
        self
    }

    /// Every invocation received so far.
    pub fn calls(&self) -> Vec<Invocation> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Commands of every invocation received so far.
    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|i| i.cmd).collect()
    }

    /// Commands that finished (successfully or not), in completion order.
    pub fn completed(&self) -> Vec<String> {
        self.state.lock().unwrap().completed.clone()
    }

    /// First recorded invocation whose command contains `needle`.
    pub fn find(&self, needle: &str) -> Option<Invocation> {
        self.calls().into_iter().find(|i| i.cmd.contains(needle))
    }
}

impl CommandRunner for FakeRunner {
    fn run(
        &self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>> {
        let script = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(invocation.clone());
            state
                .scripts
                .iter()
                .find(|s| invocation.cmd.contains(&s.needle))
                .cloned()
        };

        Box::pin(async move {
            if let Some(delay) = script.as_ref().and_then(|s| s.delay) {
                tokio::time::sleep(delay).await;
            }

            let result = match script.map(|s| s.reply) {
                None => Ok(String::new()),
                Some(Reply::Output(output)) => Ok(output),
                Some(Reply::Fail { code, output }) => Err(MakeupError::CommandFailed {
                    cmd: invocation.cmd.clone(),
                    code: Some(code),
                    output,
                }),
            };

            if let Capture::Mirrored(Some(sink)) = &invocation.capture {
                let output = match &result {
                    Ok(output) => output.as_str(),
                    Err(e) => e.output().unwrap_or_default(),
                };
                sink.write_chunk(OutputStream::Stdout, output.as_bytes())
                    .map_err(MakeupError::from)?;
                sink.finish().map_err(MakeupError::from)?;
            }

            self.state
                .lock()
                .unwrap()
                .completed
                .push(invocation.cmd.clone());

            result
        })
    }
}
