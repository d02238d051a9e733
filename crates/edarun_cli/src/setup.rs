//! `edarun setup` — synthesize and persist scripts without executing
//! anything.

use edarun_diagnostics::DiagnosticSink;

use crate::pipeline;
use crate::BuildArgs;

/// Runs the `edarun setup` command.
///
/// Loads the description, plans the script set for the chosen tool, writes
/// all generated files under the work root, and reports any warnings.
/// Returns exit code 0 on success.
pub fn run(args: &BuildArgs, quiet: bool) -> Result<i32, Box<dyn std::error::Error>> {
    let sink = DiagnosticSink::new();
    let prepared = pipeline::prepare(args, &sink)?;
    pipeline::write_script_set(&prepared.work_root, &prepared.scripts)?;
    pipeline::report_diagnostics(&sink, args.format, quiet);

    if !quiet {
        eprintln!(
            "   Generated {} files in {}",
            prepared.scripts.files.len(),
            prepared.work_root.display()
        );
    }
    Ok(0)
}
