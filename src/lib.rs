//! Compiler backends for a build system.
//!
//! A backend translates the build system's toolchain-independent settings
//! (build type, optimization level, debug info, language standard, include
//! paths, warning policy) into the command line of one compiler family, and
//! verifies a configured toolchain with a compile-and-run sanity check.
//!
//! # Primary Usage
//!
//! ```ignore
//! use toolchain_backend::core::{BuildEnvironment, CompilerArgs, ToolchainIdentity};
//! use toolchain_backend::sdcc::SdccCompiler;
//!
//! let cc = SdccCompiler::new(ToolchainIdentity::cross(["sdcc", "-mz80"], "4.2.0", None))?;
//! cc.sanity_check(&scratch_dir, &BuildEnvironment::from_env())?;
//!
//! let mut args = cc.include_args("include", false);
//! args.extend(cc.debug_args(true)?);
//! let args = cc.compute_parameters_with_absolute_paths(&args, "/src/build");
//! ```
//!
//! # Architecture
//!
//! - [`core`](crate::core) - backend contract, settings, flag tables, options, process execution
//! - [`sdcc`] - the Small Device C Compiler backend

pub mod core;
pub mod sdcc;

pub use crate::core::{
    // Contract
    Compiler, CompilerArgs,
    // Settings and tables
    BuildType, FlagTable, OptimizationLevel, WarningLevel,
    // Identity and environment
    BuildEnvironment, ExeWrapper, ToolchainIdentity,
    // Errors
    CompilerError, CompilerResult,
};
pub use sdcc::{SanityCheckOutcome, SanityReport, SdccCompiler};
