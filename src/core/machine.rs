//! Toolchain identity and the environment a backend is configured in.
//!
//! These are the interface-boundary types the surrounding build system hands
//! to a backend: who the compiler is, which machine it targets, how to run
//! what it produces, and which user arguments apply to every compile/link.

use std::env;
use std::fmt;

use super::args::split_args;

/// Which machine a compiler produces code for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum MachineChoice {
    /// The machine doing the build.
    Build,
    /// The machine the build output runs on.
    #[default]
    Host,
}

impl MachineChoice {
    /// Prefix used in option names; the host machine has none.
    pub fn option_prefix(&self) -> &'static str {
        match self {
            MachineChoice::Build => "build.",
            MachineChoice::Host => "",
        }
    }
}

/// Source language a compiler object handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Language {
    C,
}

impl Language {
    /// Short name used in option keys (`c_std`, `c_args`).
    pub fn id(&self) -> &'static str {
        match self {
            Language::C => "c",
        }
    }

    /// Human readable name used in diagnostics.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::C => "C",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// What a compile check should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileCheckMode {
    Preprocess,
    Compile,
    Link,
}

/// Command that runs a target binary on the build machine (an emulator or
/// remote-run helper). The binary path is appended to the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExeWrapper {
    command: Vec<String>,
}

impl ExeWrapper {
    pub fn new<I, S>(command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into_iter().map(Into::into).collect(),
        }
    }

    pub fn get_command(&self) -> &[String] {
        &self.command
    }
}

/// A discovered compiler as the build system describes it.
#[derive(Debug, Clone)]
pub struct ToolchainIdentity {
    /// Invocation of the compiler, e.g. `["sdcc", "-mstm8"]`.
    pub exelist: Vec<String>,
    pub version: String,
    pub for_machine: MachineChoice,
    pub language: Language,
    pub is_cross: bool,
    pub exe_wrapper: Option<ExeWrapper>,
}

impl ToolchainIdentity {
    /// Identity of a compiler targeting the host machine natively.
    pub fn native<I, S>(exelist: I, version: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exelist: exelist.into_iter().map(Into::into).collect(),
            version: version.into(),
            for_machine: MachineChoice::Host,
            language: Language::C,
            is_cross: false,
            exe_wrapper: None,
        }
    }

    /// Identity of a cross compiler, optionally with an execution wrapper.
    pub fn cross<I, S>(exelist: I, version: impl Into<String>, exe_wrapper: Option<ExeWrapper>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            is_cross: true,
            exe_wrapper,
            ..Self::native(exelist, version)
        }
    }
}

/// User arguments the build configuration applies to every compile and link
/// for a language (`c_args` / `c_link_args`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildEnvironment {
    pub compile_args: Vec<String>,
    pub link_args: Vec<String>,
}

impl BuildEnvironment {
    pub fn new(compile_args: Vec<String>, link_args: Vec<String>) -> Self {
        Self { compile_args, link_args }
    }

    /// Parse compile and link flags written as shell words.
    pub fn from_flags(cflags: &str, ldflags: &str) -> Self {
        Self::new(split_args(cflags), split_args(ldflags))
    }

    /// Read `CFLAGS` and `LDFLAGS` from the process environment.
    ///
    /// Values are split with shell quoting rules, so `-DMSG="a b"` stays one
    /// argument.
    pub fn from_env() -> Self {
        Self {
            compile_args: split_env("CFLAGS"),
            link_args: split_env("LDFLAGS"),
        }
    }

    /// User compile and link arguments applicable to `mode`.
    ///
    /// Link arguments are only returned for [`CompileCheckMode::Link`].
    pub fn basic_args(&self, mode: CompileCheckMode) -> (Vec<String>, Vec<String>) {
        let largs = if mode == CompileCheckMode::Link {
            self.link_args.clone()
        } else {
            Vec::new()
        };
        (self.compile_args.clone(), largs)
    }
}

fn split_env(name: &str) -> Vec<String> {
    env::var(name)
        .map(|v| split_args(&v))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_identity_keeps_wrapper() {
        let id = ToolchainIdentity::cross(["sdcc", "-mz80"], "4.2.0", Some(ExeWrapper::new(["ucsim_z80"])));
        assert!(id.is_cross);
        assert_eq!(id.exelist, vec!["sdcc", "-mz80"]);
        assert_eq!(id.exe_wrapper.unwrap().get_command(), ["ucsim_z80".to_string()]);
    }

    #[test]
    fn link_args_only_in_link_mode() {
        let env = BuildEnvironment::new(vec!["--std-c99".into()], vec!["--code-loc".into(), "0x100".into()]);
        let (c, l) = env.basic_args(CompileCheckMode::Compile);
        assert_eq!(c, vec!["--std-c99"]);
        assert!(l.is_empty());
        let (_, l) = env.basic_args(CompileCheckMode::Link);
        assert_eq!(l, vec!["--code-loc", "0x100"]);
    }

    #[test]
    fn quoted_flags_survive_as_single_arguments() {
        let env = BuildEnvironment::from_flags(r#"-DMSG="a b" -I'my inc'"#, "--code-loc 0x8000");
        let (c, l) = env.basic_args(CompileCheckMode::Link);
        assert_eq!(c, vec!["-DMSG=a b", "-Imy inc"]);
        assert_eq!(l, vec!["--code-loc", "0x8000"]);
    }

    #[test]
    fn environment_flags_use_shell_quoting() {
        let var = "TOOLCHAIN_BACKEND_MACHINE_TEST_FLAGS";
        env::set_var(var, r#"-DMSG="a b" -I'my inc'"#);
        assert_eq!(split_env(var), vec!["-DMSG=a b", "-Imy inc"]);
        env::remove_var(var);
        assert!(split_env(var).is_empty());
    }

    #[test]
    fn option_prefix_per_machine() {
        assert_eq!(MachineChoice::Host.option_prefix(), "");
        assert_eq!(MachineChoice::Build.option_prefix(), "build.");
    }
}
