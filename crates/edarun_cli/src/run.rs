//! `edarun run` — the full generate, build, simulate cycle.

use std::process;

use edarun_diagnostics::DiagnosticSink;

use crate::pipeline;
use crate::BuildArgs;

/// Runs the `edarun run` command.
///
/// Setup and build first; the run script is only invoked after the build
/// exits zero. Returns the simulation's exit code, which is zero when the
/// scheduled run completes regardless of what the design under test
/// reported internally.
pub fn run(args: &BuildArgs, quiet: bool) -> Result<i32, Box<dyn std::error::Error>> {
    let sink = DiagnosticSink::new();
    let prepared = pipeline::prepare(args, &sink)?;
    pipeline::write_script_set(&prepared.work_root, &prepared.scripts)?;
    pipeline::report_diagnostics(&sink, args.format, quiet);

    let build_code = crate::build::execute_build(&prepared, quiet)?;
    if build_code != 0 {
        return Ok(build_code);
    }

    if !quiet {
        eprintln!("   Running {}", prepared.description.toplevel);
    }

    let run_spec = &prepared.scripts.run;
    let status = process::Command::new(&run_spec.cmd)
        .args(&run_spec.args)
        .current_dir(&prepared.work_root)
        .status()?;
    if !status.success() {
        eprintln!(
            "error: simulation failed with exit code {}",
            status.code().unwrap_or(1)
        );
    }
    Ok(status.code().unwrap_or(1))
}
