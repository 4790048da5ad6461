// This module is the backend for the Small Device C Compiler (SDCC) family. SDCC only produces
// code for small embedded targets, so a backend instance exists only for cross toolchains and
// construction fails for a native one. Argument synthesis is table driven for build type,
// optimization and debug info (see flags), and computed for everything else. SDCC has no
// position-independent code, no switch to silence warnings, no switch to force optimization
// off and no large-file flag; those requests answer with an empty list. The only option it
// exposes is the C language standard; the only base option is b_ndebug.

//! SDCC compiler backend.
//!
//! ```ignore
//! use toolchain_backend::core::{BuildEnvironment, CompilerArgs, ExeWrapper, OptimizationLevel, ToolchainIdentity};
//! use toolchain_backend::sdcc::SdccCompiler;
//!
//! let identity = ToolchainIdentity::cross(["sdcc", "-mstm8"], "4.2.0", Some(ExeWrapper::new(["ucsim_stm8"])));
//! let cc = SdccCompiler::new(identity)?;
//! cc.sanity_check(&work_dir, &BuildEnvironment::from_env())?;
//! let args = cc.optimization_args(OptimizationLevel::S)?; // ["--opt-code-size"]
//! ```

pub mod flags;
pub mod paths;
pub mod sanity;

use std::path::Path;

use crate::core::{
    to_args, ArgumentList, BaseOptions, BuildEnvironment, BuildType, Compiler, CompilerArgs, CompilerError, CompilerResult,
    OptimizationLevel, OptionDict, OptionKey, ProcessRunner, SystemRunner, ToolchainIdentity, UserComboOption,
    WarningLevel, SANITY_CHECK_CODE, SANITY_CHECK_SOURCE,
};

pub use sanity::{run_sanity_check, RunFailure, SanityCheckOutcome, SanityReport};

/// Backend for the SDCC compiler family.
#[derive(Debug, Clone)]
pub struct SdccCompiler {
    identity: ToolchainIdentity,
    base_options: BaseOptions,
}

impl SdccCompiler {
    pub const ID: &'static str = "sdcc";

    /// Create the backend for a discovered SDCC toolchain.
    ///
    /// SDCC only targets embedded machines, so `identity` must be a cross
    /// compiler.
    pub fn new(identity: ToolchainIdentity) -> CompilerResult<Self> {
        if !identity.is_cross {
            return Err(CompilerError::CrossOnly { compiler: Self::ID });
        }
        log::debug!(
            "Configured {} compiler {} (version {}) for {:?} machine",
            identity.language,
            identity.exelist.join(" "),
            identity.version,
            identity.for_machine
        );
        let base_options = ["b_ndebug"].into_iter().map(OptionKey::base).collect();
        Ok(Self { identity, base_options })
    }

    /// Key of the language standard option.
    pub fn std_option_key(&self) -> OptionKey {
        OptionKey::for_language("std", self.for_machine(), self.language())
    }

    /// Run the sanity check using `runner` for process execution and return
    /// the full report instead of an error.
    pub fn sanity_check_with<R: ProcessRunner + ?Sized>(
        &self,
        work_dir: &Path,
        env: &BuildEnvironment,
        runner: &R,
    ) -> CompilerResult<SanityReport> {
        run_sanity_check(self, env, work_dir, SANITY_CHECK_SOURCE, SANITY_CHECK_CODE, runner)
    }
}

impl Compiler for SdccCompiler {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn identity(&self) -> &ToolchainIdentity {
        &self.identity
    }

    fn sanity_check(&self, work_dir: &Path, env: &BuildEnvironment) -> CompilerResult<()> {
        let outcome = self.sanity_check_with(work_dir, env, &SystemRunner)?.into_result()?;
        log::info!("{} compiler {} sanity check: {}", self.display_language(), self.name_string(), outcome);
        Ok(())
    }

    fn options(&self) -> OptionDict {
        let mut opts = OptionDict::new();
        opts.insert(
            self.std_option_key(),
            UserComboOption::first_is_default("C language standard to use", flags::STD_CHOICES),
        );
        opts
    }

    fn base_options(&self) -> BaseOptions {
        self.base_options.clone()
    }
}

impl CompilerArgs for SdccCompiler {
    fn always_args(&self) -> ArgumentList {
        Vec::new()
    }

    fn buildtype_args(&self, buildtype: BuildType) -> CompilerResult<ArgumentList> {
        flags::BUILDTYPE_ARGS.args(buildtype)
    }

    fn optimization_args(&self, level: OptimizationLevel) -> CompilerResult<ArgumentList> {
        flags::OPTIMIZATION_ARGS.args(level)
    }

    fn debug_args(&self, is_debug: bool) -> CompilerResult<ArgumentList> {
        flags::DEBUG_ARGS.args(is_debug)
    }

    fn include_args(&self, path: &str, _is_system: bool) -> ArgumentList {
        let path = if path.is_empty() { "." } else { path };
        vec![format!("{}{path}", flags::INCLUDE_PREFIX)]
    }

    fn option_compile_args(&self, options: &OptionDict) -> ArgumentList {
        match options.get(&self.std_option_key()) {
            Some(std) if std.value() != flags::STD_DEFAULT => vec![format!("-std={}", std.value())],
            _ => Vec::new(),
        }
    }

    fn option_link_args(&self, _options: &OptionDict) -> ArgumentList {
        Vec::new()
    }

    fn preprocess_only_args(&self) -> ArgumentList {
        to_args(&[flags::PREPROCESS_ONLY])
    }

    fn werror_args(&self) -> ArgumentList {
        to_args(&[flags::WERROR])
    }

    // SDCC has no warning level switches.
    fn warn_args(&self, _level: WarningLevel) -> ArgumentList {
        Vec::new()
    }

    // Warnings cannot be silenced wholesale.
    fn no_warn_args(&self) -> ArgumentList {
        Vec::new()
    }

    fn no_optimization_args(&self) -> ArgumentList {
        Vec::new()
    }

    // No PIC support in SDCC.
    fn pic_args(&self) -> ArgumentList {
        Vec::new()
    }

    fn largefile_args(&self) -> ArgumentList {
        Vec::new()
    }

    fn no_stdinc_args(&self) -> ArgumentList {
        to_args(&[flags::NO_STDINC])
    }

    fn no_stdlib_link_args(&self) -> ArgumentList {
        to_args(&[flags::NO_STDLIB])
    }

    fn preprocessor(&self) -> CompilerResult<Box<dyn Compiler>> {
        Err(CompilerError::NotImplemented {
            operation: "get_preprocessor",
            compiler: Self::ID,
        })
    }

    fn compute_parameters_with_absolute_paths(&self, args: &[String], build_dir: &str) -> ArgumentList {
        paths::compute_parameters_with_absolute_paths(args, build_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ExeWrapper, MachineChoice};

    fn sdcc() -> SdccCompiler {
        SdccCompiler::new(ToolchainIdentity::cross(["sdcc", "-mstm8"], "4.2.0", None)).unwrap()
    }

    #[test]
    fn native_toolchain_is_rejected() {
        let err = SdccCompiler::new(ToolchainIdentity::native(["sdcc"], "4.2.0")).unwrap_err();
        assert!(matches!(err, CompilerError::CrossOnly { compiler: "sdcc" }));
    }

    #[test]
    fn identity_passthrough() {
        let id = ToolchainIdentity::cross(["sdcc"], "4.2.0", Some(ExeWrapper::new(["s51", "-t", "8052"])));
        let cc = SdccCompiler::new(id).unwrap();
        assert_eq!(cc.id(), "sdcc");
        assert!(cc.is_cross());
        assert_eq!(cc.exe_wrapper().unwrap().get_command().len(), 3);
        assert_eq!(cc.for_machine(), MachineChoice::Host);
        assert_eq!(cc.name_string(), "sdcc");
    }

    #[test]
    fn std_option_defaults_to_none() {
        let cc = sdcc();
        let opts = cc.options();
        assert_eq!(opts.len(), 1);
        let std = &opts[&cc.std_option_key()];
        assert_eq!(std.value(), "none");
        assert_eq!(std.description, "C language standard to use");
        assert_eq!(std.choices().first().map(String::as_str), Some("none"));
        assert!(std.choices().iter().any(|c| c == "iso9899:199409"));
        assert!(std.choices().iter().any(|c| c == "sdcc2x"));
        assert!(cc.option_compile_args(&opts).is_empty());
    }

    #[test]
    fn std_option_selects_standard() {
        let cc = sdcc();
        let mut opts = cc.options();
        if let Some(std) = opts.get_mut(&cc.std_option_key()) {
            std.set_value("c99").unwrap();
        }
        assert_eq!(cc.option_compile_args(&opts), vec!["-std=c99"]);
        assert!(cc.option_link_args(&opts).is_empty());
    }

    #[test]
    fn base_options_expose_ndebug() {
        let base = sdcc().base_options();
        assert_eq!(base.len(), 1);
        assert!(base.contains(&OptionKey::base("b_ndebug")));
    }

    #[test]
    fn preprocessor_is_unavailable() {
        let err = sdcc().preprocessor().err().unwrap();
        assert_eq!(err.to_string(), "get_preprocessor not implemented for sdcc");
    }
}
