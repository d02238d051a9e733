//! Shared helpers for the script-generating subcommands: load, plan,
//! persist, report.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use edarun_backend::{backend_for, Backend, BackendContext, ScriptSet};
use edarun_diagnostics::{DiagnosticSink, Severity};
use edarun_edam::{load_description, BuildDescription};

use crate::{BuildArgs, ReportFormat};

/// A planned build: the loaded description, the resolved backend, the
/// planned scripts, and the directory they persist into.
#[derive(Debug)]
pub struct PreparedBuild {
    /// The loaded build description.
    pub description: BuildDescription,
    /// The resolved backend.
    pub backend: Box<dyn Backend>,
    /// The planned script set.
    pub scripts: ScriptSet,
    /// Where the scripts are written and executed.
    pub work_root: PathBuf,
}

/// Loads the description and plans the script set for the chosen tool.
pub fn prepare(
    args: &BuildArgs,
    sink: &DiagnosticSink,
) -> Result<PreparedBuild, Box<dyn std::error::Error>> {
    let description = load_description(Path::new(&args.description))?;
    let backend = backend_for(&args.tool)?;
    let scripts = backend.plan(&BackendContext {
        description: &description,
        sink,
    })?;
    let work_root = resolve_work_root(args.work_root.as_deref(), backend.tool_name());
    Ok(PreparedBuild {
        description,
        backend,
        scripts,
        work_root,
    })
}

/// The directory generated scripts land in.
///
/// CLI `--work-root` overrides everything; otherwise `build/<tool>`.
pub fn resolve_work_root(cli_work_root: Option<&str>, tool: &str) -> PathBuf {
    match cli_work_root {
        Some(dir) => PathBuf::from(dir),
        None => Path::new("build").join(tool),
    }
}

/// Persists every generated file under the work root.
///
/// Writes are idempotent overwrites. Files the backend flagged executable
/// are chmod +x after being written.
pub fn write_script_set(work_root: &Path, scripts: &ScriptSet) -> io::Result<()> {
    fs::create_dir_all(work_root)?;
    for file in &scripts.files {
        let path = work_root.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &file.contents)?;
        if file.executable {
            make_executable(&path)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// Renders accumulated diagnostics per the report format.
pub fn report_diagnostics(sink: &DiagnosticSink, format: ReportFormat, quiet: bool) {
    let diagnostics = sink.diagnostics();
    if diagnostics.is_empty() {
        return;
    }

    match format {
        ReportFormat::Text => {
            for diag in &diagnostics {
                eprintln!("{diag}");
            }
            if !quiet {
                let warning_count = diagnostics
                    .iter()
                    .filter(|d| d.severity == Severity::Warning)
                    .count();
                eprintln!("   Result: {warning_count} warning(s)");
            }
        }
        ReportFormat::Json => {
            let json =
                serde_json::to_string_pretty(&diagnostics).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}
