// This module defines the error type shared by every compiler backend using the thiserror
// crate. CompilerError covers the three failure classes a backend can report: configuration
// errors (a backend constructed for a toolchain it cannot drive, a setting value with no flag
// table entry, an option value outside its allowed choices), capability errors (an operation
// the compiler family does not provide), and toolchain errors raised by the sanity check
// (probe source could not be written, the compiler failed, the probe binary could not be
// launched or exited unsuccessfully). Toolchain variants carry the exact command line that
// was attempted and any captured output so callers can report them verbatim.

//! Error types for compiler backends.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for compiler backends.
#[derive(Error, Debug)]
pub enum CompilerError {
    #[error("{compiler} supports only cross-compilation.")]
    CrossOnly { compiler: &'static str },

    #[error("Unknown {key} value: {value:?}")]
    UnknownSetting { key: &'static str, value: String },

    #[error("Value {value:?} is not one of the choices for option {option}. Possible choices are: {choices}")]
    InvalidOption {
        option: String,
        value: String,
        choices: String,
    },

    #[error("{operation} not implemented for {compiler}")]
    NotImplemented {
        operation: &'static str,
        compiler: &'static str,
    },

    #[error("Could not write sanity check source {}: {source}", .path.display())]
    ProbeWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Compiler {compiler} cannot compile programs.")]
    CannotCompile {
        compiler: String,
        command: String,
        stdout: String,
        stderr: String,
    },

    #[error("Could not invoke sanity test executable: {source}.")]
    CannotInvoke {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Executables created by {language} compiler {compiler} are not runnable.")]
    NotRunnable {
        language: String,
        compiler: String,
        command: String,
        status: Option<i32>,
    },
}

impl CompilerError {
    /// Whether the error means the toolchain itself is unusable, as opposed to
    /// the backend being misconfigured or asked for something it cannot do.
    pub fn is_toolchain_failure(&self) -> bool {
        matches!(
            self,
            CompilerError::CannotCompile { .. }
                | CompilerError::CannotInvoke { .. }
                | CompilerError::NotRunnable { .. }
        )
    }

    /// The command line attached to a toolchain failure, if any.
    pub fn command(&self) -> Option<&str> {
        match self {
            CompilerError::CannotCompile { command, .. }
            | CompilerError::CannotInvoke { command, .. }
            | CompilerError::NotRunnable { command, .. } => Some(command),
            _ => None,
        }
    }
}

/// Result type alias for backend operations.
pub type CompilerResult<T> = Result<T, CompilerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_only_message() {
        let err = CompilerError::CrossOnly { compiler: "sdcc" };
        assert_eq!(err.to_string(), "sdcc supports only cross-compilation.");
        assert!(!err.is_toolchain_failure());
        assert!(err.command().is_none());
    }

    #[test]
    fn toolchain_failures_expose_command() {
        let err = CompilerError::NotRunnable {
            language: "C".into(),
            compiler: "sdcc".into(),
            command: "/tmp/x_cross.out".into(),
            status: Some(1),
        };
        assert!(err.is_toolchain_failure());
        assert_eq!(err.command(), Some("/tmp/x_cross.out"));
        assert_eq!(
            err.to_string(),
            "Executables created by C compiler sdcc are not runnable."
        );
    }
}
