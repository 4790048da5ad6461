// This module defines the contract every compiler backend implements. The build system only
// ever talks to a backend through these two traits, so vendor irregularities stay inside each
// implementation. Compiler covers identity (executable, target machine, cross status, execution
// wrapper), the capability declarations (user options, base options), the generic argument
// conventions shared by most C compilers (output file, compile-only, user args for a check
// mode), and the sanity check. CompilerArgs is the argument-synthesis surface: it turns one
// abstract setting at a time into the tokens for this compiler family, and rewrites relative
// search paths in an already assembled list. Variant selection (which backend to instantiate
// for a discovered executable) belongs to a registry outside this crate.

//! Compiler backend contract.
//!
//! A backend is one type per compiler family implementing [`Compiler`] and
//! [`CompilerArgs`]. Every method returning an [`ArgumentList`] builds a fresh
//! list owned by the caller; backends never retain them.
//!
//! An empty list is an answer, not an omission: it states that the setting has
//! no effect on this compiler family.

use std::path::Path;

use super::args::{join_args, to_args, ArgumentList};
use super::error::CompilerResult;
use super::machine::{BuildEnvironment, CompileCheckMode, ExeWrapper, Language, MachineChoice, ToolchainIdentity};
use super::options::{BaseOptions, OptionDict};
use super::settings::{BuildType, OptimizationLevel, WarningLevel};

/// File name of the C sanity check probe.
pub const SANITY_CHECK_SOURCE: &str = "sanitycheckc.c";

/// Body of the C sanity check probe.
///
/// Uses `class` as an identifier so a C++ compiler masquerading as a C
/// compiler fails to build it.
pub const SANITY_CHECK_CODE: &str = "int main(void) { int class=0; return class; }\n";

/// Identity, capabilities and sanity check of a compiler.
pub trait Compiler {
    /// Short identifier of the compiler family, e.g. `sdcc`.
    fn id(&self) -> &'static str;

    fn identity(&self) -> &ToolchainIdentity;

    /// Sanity check the toolchain by building (and where possible running) a
    /// probe program inside `work_dir`.
    fn sanity_check(&self, work_dir: &Path, env: &BuildEnvironment) -> CompilerResult<()>;

    fn language(&self) -> Language {
        self.identity().language
    }

    fn display_language(&self) -> &'static str {
        self.language().display_name()
    }

    fn exelist(&self) -> &[String] {
        &self.identity().exelist
    }

    fn for_machine(&self) -> MachineChoice {
        self.identity().for_machine
    }

    fn is_cross(&self) -> bool {
        self.identity().is_cross
    }

    fn exe_wrapper(&self) -> Option<&ExeWrapper> {
        self.identity().exe_wrapper.as_ref()
    }

    /// The compiler invocation as a single shell-quoted string.
    fn name_string(&self) -> String {
        join_args(self.exelist())
    }

    fn output_args(&self, target: &str) -> ArgumentList {
        vec!["-o".to_string(), target.to_string()]
    }

    fn compile_only_args(&self) -> ArgumentList {
        to_args(&["-c"])
    }

    /// Translate linker arguments into a form the compiler driver forwards.
    fn linker_to_compiler_args(&self, args: ArgumentList) -> ArgumentList {
        args
    }

    /// User compile and link arguments applicable to a check in `mode`.
    fn basic_compiler_args(&self, env: &BuildEnvironment, mode: CompileCheckMode) -> (ArgumentList, ArgumentList) {
        env.basic_args(mode)
    }

    /// User-selectable options this compiler exposes.
    fn options(&self) -> OptionDict {
        OptionDict::new()
    }

    /// Base options (`b_*`) this compiler exposes.
    fn base_options(&self) -> BaseOptions {
        BaseOptions::new()
    }
}

/// Argument synthesis for one compiler family.
pub trait CompilerArgs: Compiler {
    /// Arguments passed on every invocation.
    fn always_args(&self) -> ArgumentList;

    /// Extra flags for a build type, layered over optimization and debug flags.
    fn buildtype_args(&self, buildtype: BuildType) -> CompilerResult<ArgumentList>;

    fn optimization_args(&self, level: OptimizationLevel) -> CompilerResult<ArgumentList>;

    fn debug_args(&self, is_debug: bool) -> CompilerResult<ArgumentList>;

    /// One include flag for one directory; an empty path means the current directory.
    fn include_args(&self, path: &str, is_system: bool) -> ArgumentList;

    /// Compile flags derived from the options returned by [`Compiler::options`].
    fn option_compile_args(&self, options: &OptionDict) -> ArgumentList;

    fn option_link_args(&self, options: &OptionDict) -> ArgumentList;

    fn preprocess_only_args(&self) -> ArgumentList;

    fn werror_args(&self) -> ArgumentList;

    fn warn_args(&self, level: WarningLevel) -> ArgumentList;

    /// Flags that silence all warnings.
    fn no_warn_args(&self) -> ArgumentList;

    /// Flags that force optimization off regardless of the compiler default.
    fn no_optimization_args(&self) -> ArgumentList;

    /// Flags for position-independent code.
    fn pic_args(&self) -> ArgumentList;

    fn largefile_args(&self) -> ArgumentList;

    fn no_stdinc_args(&self) -> ArgumentList;

    fn no_stdlib_link_args(&self) -> ArgumentList;

    /// A compiler object configured to only run the preprocessor.
    fn preprocessor(&self) -> CompilerResult<Box<dyn Compiler>>;

    /// Anchor relative include and library search paths in `args` at `build_dir`.
    fn compute_parameters_with_absolute_paths(&self, args: &[String], build_dir: &str) -> ArgumentList;
}
