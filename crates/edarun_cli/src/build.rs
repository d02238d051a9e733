//! `edarun build` — synthesize scripts, then execute the build phase.

use std::process;

use edarun_diagnostics::DiagnosticSink;

use crate::pipeline::{self, PreparedBuild};
use crate::BuildArgs;

/// Runs the `edarun build` command.
///
/// Performs the full setup phase, then executes the registry's default
/// target in the work root. Returns the child's exit code on tool failure.
pub fn run(args: &BuildArgs, quiet: bool) -> Result<i32, Box<dyn std::error::Error>> {
    let sink = DiagnosticSink::new();
    let prepared = pipeline::prepare(args, &sink)?;
    pipeline::write_script_set(&prepared.work_root, &prepared.scripts)?;
    pipeline::report_diagnostics(&sink, args.format, quiet);

    execute_build(&prepared, quiet)
}

/// Executes the default build target in the work root.
///
/// The abort-on-error header inside the script turns any failed step into a
/// nonzero exit; this function only relays it.
pub(crate) fn execute_build(
    prepared: &PreparedBuild,
    quiet: bool,
) -> Result<i32, Box<dyn std::error::Error>> {
    let target = prepared
        .scripts
        .commands
        .default_target()
        .ok_or("no default build target registered")?;
    let command = prepared
        .scripts
        .commands
        .find_target(target)
        .ok_or_else(|| format!("default target '{target}' has no command"))?;
    let (program, rest) = command
        .argv
        .split_first()
        .ok_or("default target command is empty")?;

    if !quiet {
        eprintln!(
            "   Building with {} in {}",
            prepared.backend.tool_name(),
            prepared.work_root.display()
        );
    }

    let status = process::Command::new(program)
        .args(rest)
        .current_dir(&prepared.work_root)
        .status()?;
    if !status.success() {
        let code = status.code().unwrap_or(1);
        eprintln!("error: build failed with exit code {code}");
        return Ok(code);
    }
    Ok(0)
}
