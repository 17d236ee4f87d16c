//! # Command Executor
//!
//! Runs a registry action as a child process and captures everything it
//! writes.
//!
//! ## Key Design Decisions
//!
//! ### Direct exec, no shell
//!
//! The action string is split on whitespace and handed to
//! [`std::process::Command`] as program + arguments. Quotes, globs and
//! redirections are passed through literally.
//!
//! ### Captured, not streamed
//!
//! stdout and stderr are piped and read to completion; the caller only sees
//! them once the child has exited. stdin is null, environment and working
//! directory are inherited from baker.
//!
//! ### Blocking
//!
//! [`SystemRunner`] waits for the child with no timeout, so a long build
//! freezes the dashboard until it finishes. [`CommandRunner`] is the seam for
//! moving this onto a worker later.

use std::io;
use std::process::{Command, Stdio};
use thiserror::Error;

/// Output of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// A command that could not be started at all.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Failed to launch '{name}': {source}")]
    LaunchFailure {
        name: String,
        #[source]
        source: io::Error,
    },
}

/// Spawns a program and waits for it.
pub trait CommandRunner {
    fn run(&mut self, program: &str, args: &[&str]) -> io::Result<CapturedOutput>;
}

/// Runner backed by real OS processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, program: &str, args: &[&str]) -> io::Result<CapturedOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(CapturedOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        })
    }
}

/// Run `argv` through `runner`, attributing any spawn failure to the command
/// called `name`.
pub fn execute(
    runner: &mut dyn CommandRunner,
    name: &str,
    argv: &[&str],
) -> Result<CapturedOutput, LaunchError> {
    let Some((program, args)) = argv.split_first() else {
        return Err(LaunchError::LaunchFailure {
            name: name.to_string(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "empty command line"),
        });
    };

    log::debug!("Spawning {:?} for '{}'", argv, name);

    runner
        .run(program, args)
        .map_err(|source| LaunchError::LaunchFailure {
            name: name.to_string(),
            source,
        })
}
