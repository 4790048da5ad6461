// This module implements the SDCC toolchain sanity check: write a probe source into a scratch
// directory, compile (and, when the target can be executed, link) it, then run the produced
// binary directly or through the configured execution wrapper. The procedure follows the usual
// C compiler check with one SDCC-specific difference: SDCC rejects an `.exe` output name, so the
// probe binary is named `<stem>[_cross].out`. A cross compiler with no execution wrapper is only
// asked to compile, and its output is assumed runnable. Compilation and execution are strictly
// sequential; the probe is never run if compilation failed. Process spawning goes through a
// ProcessRunner so the state machine can be driven without a real toolchain.

//! Compile-and-run sanity check.

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::core::{
    join_args, join_os_args, BuildEnvironment, CapturedOutput, CompileCheckMode, Compiler, CompilerError, CompilerResult,
    ProcessRunner,
};

/// Suffix of the probe binary; SDCC does not accept `.exe`.
pub const BINARY_SUFFIX: &str = ".out";

/// Why the probe binary did not run successfully.
#[derive(Debug)]
pub enum RunFailure {
    /// The process could not be started at all.
    Launch(io::Error),
    /// The process ran and exited unsuccessfully; `None` if killed by a signal.
    ExitStatus(Option<i32>),
}

impl fmt::Display for RunFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunFailure::Launch(e) => write!(f, "could not be launched: {e}"),
            RunFailure::ExitStatus(Some(code)) => write!(f, "exited with status {code}"),
            RunFailure::ExitStatus(None) => f.write_str("was terminated by a signal"),
        }
    }
}

/// Result of one sanity check.
#[derive(Debug)]
pub enum SanityCheckOutcome {
    /// The compiler exited unsuccessfully or could not be started.
    CompileFailed { status: Option<i32> },
    RunFailed(RunFailure),
    /// Cross compiling without an execution wrapper; the probe was only compiled.
    RunSkipped,
    Success,
}

impl SanityCheckOutcome {
    /// Whether the toolchain must be considered unusable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SanityCheckOutcome::CompileFailed { .. } | SanityCheckOutcome::RunFailed(_))
    }
}

impl fmt::Display for SanityCheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanityCheckOutcome::CompileFailed { status: Some(code) } => {
                write!(f, "compile failed (status {code})")
            }
            SanityCheckOutcome::CompileFailed { status: None } => f.write_str("compile failed"),
            SanityCheckOutcome::RunFailed(why) => write!(f, "run failed: probe {why}"),
            SanityCheckOutcome::RunSkipped => f.write_str("run skipped (cross compiler without exe wrapper)"),
            SanityCheckOutcome::Success => f.write_str("success"),
        }
    }
}

/// Outcome of a sanity check together with everything needed to diagnose it.
#[derive(Debug)]
pub struct SanityReport {
    pub outcome: SanityCheckOutcome,
    /// Shell-quoted compiler invocation.
    pub compiler: String,
    pub language: &'static str,
    pub mode: CompileCheckMode,
    pub compile_command: Vec<String>,
    pub compile_output: CapturedOutput,
    /// `None` when execution was not attempted.
    pub run_command: Option<Vec<OsString>>,
}

impl SanityReport {
    /// Turn fatal outcomes into errors carrying the attempted command line.
    pub fn into_result(self) -> CompilerResult<SanityCheckOutcome> {
        match self.outcome {
            SanityCheckOutcome::CompileFailed { .. } => Err(CompilerError::CannotCompile {
                compiler: self.compiler,
                command: join_args(&self.compile_command),
                stdout: self.compile_output.stdout,
                stderr: self.compile_output.stderr,
            }),
            SanityCheckOutcome::RunFailed(RunFailure::Launch(source)) => Err(CompilerError::CannotInvoke {
                command: join_os_args(&self.run_command.unwrap_or_default()),
                source,
            }),
            SanityCheckOutcome::RunFailed(RunFailure::ExitStatus(status)) => Err(CompilerError::NotRunnable {
                language: self.language.to_string(),
                compiler: self.compiler,
                command: join_os_args(&self.run_command.unwrap_or_default()),
                status,
            }),
            outcome => Ok(outcome),
        }
    }
}

/// Run the sanity check for `compiler` in `work_dir`.
///
/// `work_dir` must not be shared with a concurrent check: the probe file
/// names are fixed. Only failing to write the probe source is returned as an
/// error; every toolchain failure is reported through the outcome.
pub fn run_sanity_check<C, R>(
    compiler: &C,
    env: &BuildEnvironment,
    work_dir: &Path,
    source_name: &str,
    code: &str,
    runner: &R,
) -> CompilerResult<SanityReport>
where
    C: Compiler + ?Sized,
    R: ProcessRunner + ?Sized,
{
    log::debug!(
        "Sanity testing {} compiler: {}",
        compiler.display_language(),
        compiler.name_string()
    );
    log::debug!("Is cross compiler: {}.", compiler.is_cross());

    let source_path = work_dir.join(source_name);
    fs::write(&source_path, code).map_err(|source| CompilerError::ProbeWrite {
        path: source_path.clone(),
        source,
    })?;

    let mut binname = source_name
        .rsplit_once('.')
        .map_or(source_name, |(stem, _)| stem)
        .to_string();
    let mut mode = CompileCheckMode::Link;
    if compiler.is_cross() {
        binname.push_str("_cross");
        if compiler.exe_wrapper().is_none() {
            // Linking cross built programs needs target knowledge we lack here.
            mode = CompileCheckMode::Compile;
        }
    }
    binname.push_str(BINARY_SUFFIX);

    let (cargs, largs) = compiler.basic_compiler_args(env, mode);
    let mut extra_flags = match mode {
        CompileCheckMode::Compile => compiler.compile_only_args(),
        _ => Vec::new(),
    };
    extra_flags.extend(cargs);
    extra_flags.extend(compiler.linker_to_compiler_args(largs));

    // Extra flags go last: they may end in an option that forwards everything
    // after it to the linker.
    let mut compile_command = compiler.exelist().to_vec();
    compile_command.push(source_name.to_string());
    compile_command.extend(compiler.output_args(&binname));
    compile_command.extend(extra_flags);

    log::debug!("Sanity check compiler command line: {}", join_args(&compile_command));
    let compile_output = runner
        .run_captured(&compile_command, work_dir)
        .unwrap_or_else(|e| CapturedOutput {
            status: None,
            stdout: String::new(),
            stderr: format!("could not launch compiler: {e}"),
        });
    log::debug!("Sanity check compile stdout:\n{}\n-----", compile_output.stdout);
    log::debug!("Sanity check compile stderr:\n{}\n-----", compile_output.stderr);

    let mut report = SanityReport {
        outcome: SanityCheckOutcome::Success,
        compiler: compiler.name_string(),
        language: compiler.display_language(),
        mode,
        compile_command,
        compile_output,
        run_command: None,
    };

    if !report.compile_output.success() {
        report.outcome = SanityCheckOutcome::CompileFailed {
            status: report.compile_output.status,
        };
        return Ok(report);
    }

    if mode == CompileCheckMode::Compile {
        log::debug!("Cannot run cross compiled probe without an exe wrapper; assuming it works.");
        report.outcome = SanityCheckOutcome::RunSkipped;
        return Ok(report);
    }

    let binary = work_dir.join(&binname).into_os_string();
    let run_command: Vec<OsString> = match compiler.exe_wrapper() {
        Some(wrapper) if compiler.is_cross() => wrapper
            .get_command()
            .iter()
            .map(OsString::from)
            .chain([binary])
            .collect(),
        _ => vec![binary],
    };
    log::debug!("Running test binary command: {}", join_os_args(&run_command));

    // Probe programs may write diagnostics; their output is not inspected.
    report.outcome = match runner.run_discarding(&run_command) {
        Err(e) => SanityCheckOutcome::RunFailed(RunFailure::Launch(e)),
        Ok(Some(0)) => SanityCheckOutcome::Success,
        Ok(status) => SanityCheckOutcome::RunFailed(RunFailure::ExitStatus(status)),
    };
    report.run_command = Some(run_command);
    Ok(report)
}
