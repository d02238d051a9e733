//! edarun CLI — translate build descriptions into simulator scripts and run
//! them.
//!
//! Provides `edarun tools` to list backends, `edarun setup` to generate
//! scripts, `edarun build` to generate and compile, and `edarun run` for the
//! full generate–build–simulate cycle. Build and run are separate lifecycle
//! phases: the build script compiles and elaborates, the run script only
//! simulates, so reruns with different plusargs never recompile.

#![warn(missing_docs)]

mod build;
mod pipeline;
mod run;
mod setup;
mod tools;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// edarun — simulator build/run script generator.
#[derive(Parser, Debug)]
#[command(name = "edarun", version, about = "Simulator build/run script generator")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the supported simulator backends.
    Tools,
    /// Generate build and run scripts without executing anything.
    Setup(BuildArgs),
    /// Generate scripts, then execute the build script.
    Build(BuildArgs),
    /// Generate scripts, build, then execute the simulation.
    Run(BuildArgs),
}

/// Arguments shared by `setup`, `build`, and `run`.
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Path to the build description TOML file.
    pub description: String,

    /// Simulator backend to target.
    #[arg(short, long)]
    pub tool: String,

    /// Directory for generated scripts (default: `build/<tool>`).
    #[arg(long)]
    pub work_root: Option<String>,

    /// Output format for warnings.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Tools => tools::run(),
        Command::Setup(args) => setup::run(args, cli.quiet),
        Command::Build(args) => build::run(args, cli.quiet),
        Command::Run(args) => run::run(args, cli.quiet),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_setup_invocation() {
        let cli = Cli::parse_from(["edarun", "setup", "sim.toml", "--tool", "modelsim"]);
        match cli.command {
            Command::Setup(args) => {
                assert_eq!(args.description, "sim.toml");
                assert_eq!(args.tool, "modelsim");
                assert!(args.work_root.is_none());
                assert_eq!(args.format, ReportFormat::Text);
            }
            _ => panic!("expected setup subcommand"),
        }
    }

    #[test]
    fn parse_global_quiet() {
        let cli = Cli::parse_from(["edarun", "run", "sim.toml", "-t", "vcs", "-q"]);
        assert!(cli.quiet);
    }
}
