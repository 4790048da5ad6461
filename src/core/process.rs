// This module is the seam between backends and the operating system's process spawning.
// ProcessRunner has two entry points matching the two phases of a sanity check: running the
// compiler with stdout/stderr captured for diagnostics, and running a produced binary with its
// output discarded. The probe command carries OsStrings because it embeds the scratch directory
// path, which need not be valid UTF-8. Both are synchronous; neither imposes a timeout, so a hung child blocks the
// caller until it exits. SystemRunner is the std::process::Command implementation; tests supply
// their own runner to observe which commands a backend attempts.

//! Child process execution.

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Exit status and captured output of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Exit code, or `None` if the process was terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs child processes on behalf of a backend.
pub trait ProcessRunner {
    /// Run `command` in `cwd`, capturing stdout and stderr.
    fn run_captured(&self, command: &[String], cwd: &Path) -> io::Result<CapturedOutput>;

    /// Run `command` with stdout and stderr discarded, returning its exit code.
    fn run_discarding(&self, command: &[OsString]) -> io::Result<Option<i32>>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run_captured(&self, command: &[String], cwd: &Path) -> io::Result<CapturedOutput> {
        (**self).run_captured(command, cwd)
    }

    fn run_discarding(&self, command: &[OsString]) -> io::Result<Option<i32>> {
        (**self).run_discarding(command)
    }
}

/// Spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    fn command<S: AsRef<OsStr>>(command: &[S]) -> io::Result<Command> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command line"))?;
        let mut cmd = Command::new(program);
        cmd.args(args);
        Ok(cmd)
    }
}

impl ProcessRunner for SystemRunner {
    fn run_captured(&self, command: &[String], cwd: &Path) -> io::Result<CapturedOutput> {
        let output = Self::command(command)?
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()?;
        Ok(CapturedOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn run_discarding(&self, command: &[OsString]) -> io::Result<Option<i32>> {
        let status = Self::command(command)?
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        Ok(status.code())
    }
}
