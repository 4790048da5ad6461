// This module is the compiler-family independent half of the crate: the backend contract
// (Compiler and CompilerArgs), the abstract build settings and the FlagTable type backends use
// to map them, option descriptions, toolchain identity, child process execution and the shared
// error type. Nothing here knows about any particular vendor's flags; backends such as
// crate::sdcc build on these pieces.

//! Shared backend infrastructure.
//!
//! # Key Components
//!
//! - [`compiler`] - the [`Compiler`] / [`CompilerArgs`] traits
//! - [`settings`] - build type, optimization and warning levels, [`FlagTable`]
//! - [`options`] - option keys and combo options
//! - [`machine`] - toolchain identity, execution wrapper, user build arguments
//! - [`process`] - the [`ProcessRunner`] seam and its [`SystemRunner`]

pub mod args;
pub mod compiler;
pub mod error;
pub mod machine;
pub mod options;
pub mod process;
pub mod settings;

pub use args::{join_args, join_os_args, split_args, to_args, ArgumentList};

pub use compiler::{Compiler, CompilerArgs, SANITY_CHECK_CODE, SANITY_CHECK_SOURCE};

pub use error::{CompilerError, CompilerResult};

pub use machine::{BuildEnvironment, CompileCheckMode, ExeWrapper, Language, MachineChoice, ToolchainIdentity};

pub use options::{BaseOptions, OptionDict, OptionKey, UserComboOption};

pub use process::{CapturedOutput, ProcessRunner, SystemRunner};

pub use settings::{BuildType, FlagTable, OptimizationLevel, WarningLevel};
