//! Command-line front end for the SDCC backend.
//!
//! Prints the arguments the backend synthesises for a set of build settings,
//! lists the options it exposes, or sanity checks a toolchain.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use toolchain_backend::core::{
    join_args, split_args, BuildEnvironment, BuildType, Compiler, CompilerArgs, CompilerResult, ExeWrapper,
    OptimizationLevel, SystemRunner, ToolchainIdentity,
};
use toolchain_backend::sdcc::SdccCompiler;

#[derive(Parser, Debug)]
#[command(name = "sdcc-probe", version, about = "Inspect and sanity check an SDCC toolchain")]
struct Cli {
    /// Compiler invocation as shell words (e.g. "sdcc -mstm8").
    #[arg(long, env = "SDCC", default_value = "sdcc")]
    exe: String,

    /// Execution wrapper for target binaries; repeat once per token.
    #[arg(long = "exe-wrapper", value_name = "TOKEN")]
    exe_wrapper: Vec<String>,

    /// Compiler version reported in diagnostics.
    #[arg(long = "compiler-version", default_value = "unknown")]
    compiler_version: String,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile and, if possible, run a probe program.
    Sanity {
        /// Scratch directory for the probe; must not be shared with another check.
        #[arg(long)]
        work_dir: PathBuf,
    },
    /// Print the compile arguments for a set of build settings.
    Flags {
        #[arg(long, default_value = "debug")]
        buildtype: String,
        #[arg(long, default_value = "0")]
        optimization: String,
        #[arg(long)]
        debug: bool,
        #[arg(long, default_value = "none")]
        std: String,
        #[arg(short = 'I', long = "include")]
        include: Vec<String>,
        #[arg(long)]
        werror: bool,
        /// Anchor relative include paths at this directory.
        #[arg(long)]
        build_dir: Option<String>,
    },
    /// List the options the backend exposes.
    Options,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e}");
            if let Some(command) = e.command() {
                log::error!("Command: {command}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CompilerResult<ExitCode> {
    let exe_wrapper = (!cli.exe_wrapper.is_empty()).then(|| ExeWrapper::new(cli.exe_wrapper));
    let identity = ToolchainIdentity::cross(split_args(&cli.exe), cli.compiler_version, exe_wrapper);
    let cc = SdccCompiler::new(identity)?;

    match cli.command {
        Command::Sanity { work_dir } => {
            let report = cc.sanity_check_with(&work_dir, &BuildEnvironment::from_env(), &SystemRunner)?;
            println!("{}", report.outcome);
            let fatal = report.outcome.is_fatal();
            if fatal {
                if !report.compile_output.stderr.is_empty() {
                    eprintln!("{}", report.compile_output.stderr.trim_end());
                }
                report.into_result()?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Flags {
            buildtype,
            optimization,
            debug,
            std,
            include,
            werror,
            build_dir,
        } => {
            let mut args = cc.always_args();
            args.extend(cc.buildtype_args(buildtype.parse::<BuildType>()?)?);
            args.extend(cc.optimization_args(optimization.parse::<OptimizationLevel>()?)?);
            args.extend(cc.debug_args(debug)?);

            let mut options = cc.options();
            if let Some(opt) = options.get_mut(&cc.std_option_key()) {
                opt.set_value(&std)?;
            }
            args.extend(cc.option_compile_args(&options));

            if werror {
                args.extend(cc.werror_args());
            }
            for dir in &include {
                args.extend(cc.include_args(dir, false));
            }
            if let Some(build_dir) = build_dir {
                args = cc.compute_parameters_with_absolute_paths(&args, &build_dir);
            }
            println!("{}", join_args(&args));
            Ok(ExitCode::SUCCESS)
        }
        Command::Options => {
            for (key, opt) in cc.options() {
                println!("{key} = {} ({})", opt.value(), opt.description);
                println!("    choices: {}", opt.choices().join(", "));
            }
            for key in cc.base_options() {
                println!("{key} (base option)");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
