//! ModelSim/Questa backend.
//!
//! Compilation runs inside `vsim -c` driven by two TCL files: a main script
//! that chains the RTL build script and any user-supplied TCL, and the RTL
//! build script holding the `vlib`/`vlog`/`vcom` sequence. The run script
//! invokes `vsim -c` directly with parameters, generics, and plusargs
//! encoded on the command line.

use serde::Deserialize;

use edarun_edam::{BuildDescription, ParamKind};

use crate::classify::{classify_files, ClassifiedFile, FileClass};
use crate::commands::EdaCommands;
use crate::error::BackendError;
use crate::options::{self, string_or_vec, CompilationMode};
use crate::registrar::{LibraryRegistrar, DEFAULT_LIBRARY};
use crate::script::{
    GeneratedFile, RunSpec, ScriptSet, ShellScript, TclScript, BUILD_SCRIPT, RUN_SCRIPT,
};
use crate::{Backend, BackendContext};

/// The TCL file holding library creation and compile commands.
const BUILD_RTL_TCL: &str = "edarun_build_rtl.tcl";
/// The TCL entry point sourced by the build script.
const MAIN_TCL: &str = "edarun_main.tcl";

/// Options for the ModelSim backend, from `[tools.modelsim]`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelsimOptions {
    /// `separate` (default) compiles each Verilog file with its own `vlog`
    /// command; `common` batches all Verilog-family files into one `vlog
    /// -mfcu` invocation so cross-file define scoping matches per-file
    /// compilation. VHDL always compiles separately.
    pub compilation_mode: CompilationMode,
    /// Extra `vcom` flags, inserted after the dialect flag and before the
    /// built-in `-quiet -work` tail.
    #[serde(deserialize_with = "string_or_vec")]
    pub vcom_options: Vec<String>,
    /// Extra `vlog` flags, inserted ahead of the define flags.
    #[serde(deserialize_with = "string_or_vec")]
    pub vlog_options: Vec<String>,
    /// Extra `vsim` flags for the run command, inserted before the encoded
    /// parameters.
    #[serde(deserialize_with = "string_or_vec")]
    pub vsim_options: Vec<String>,
}

/// The ModelSim/Questa backend.
#[derive(Debug)]
pub struct Modelsim;

impl Backend for Modelsim {
    fn tool_name(&self) -> &'static str {
        "modelsim"
    }

    fn description(&self) -> &'static str {
        "ModelSim/Questa simulator from Siemens EDA"
    }

    fn plan(&self, ctx: &BackendContext<'_>) -> Result<ScriptSet, BackendError> {
        let desc = ctx.description;
        let opts: ModelsimOptions = options::tool_options(desc, "modelsim")?;
        let common = opts.compilation_mode == CompilationMode::Common;
        let classification = classify_files(&desc.files, ctx.sink);

        let define_flags: Vec<String> = desc
            .defines
            .iter()
            .map(|(k, v)| format!("+define+{}={}", k, v.render(ParamKind::Define)))
            .collect();

        let mut registrar = LibraryRegistrar::new();
        let mut build_rtl = TclScript::new();
        let mut main_tcl = TclScript::new();
        main_tcl.line(format!("do {BUILD_RTL_TCL}"));

        let mut batch: Vec<&ClassifiedFile> = Vec::new();

        for file in &classification.files {
            if registrar.ensure(&file.library) {
                build_rtl.line(format!("vlib {}", file.library));
            }
            match &file.class {
                FileClass::Verilog { system } => {
                    batch.push(file);
                    if !common {
                        let mut args = opts.vlog_options.clone();
                        args.extend(define_flags.iter().cloned());
                        if *system {
                            args.push("-sv".to_string());
                        }
                        args.push("-quiet".to_string());
                        args.push("-work".to_string());
                        args.push(file.library.clone());
                        args.push(file.path.clone());
                        build_rtl.line(format!("vlog {}", args.join(" ")));
                    }
                }
                FileClass::Vhdl { standard } => {
                    let mut args = Vec::new();
                    if let Some(standard) = standard {
                        args.push(standard.flag().to_string());
                    }
                    args.extend(opts.vcom_options.iter().cloned());
                    args.push("-quiet".to_string());
                    args.push("-work".to_string());
                    args.push(file.library.clone());
                    args.push(file.path.clone());
                    build_rtl.line(format!("vcom {}", args.join(" ")));
                }
                FileClass::Tcl => main_tcl.line(format!("do {}", file.path)),
                FileClass::IncludeDir(_) | FileClass::User | FileClass::Unknown(_) => {}
            }
        }

        if common && !batch.is_empty() {
            build_rtl.line(batched_vlog(&opts, &define_flags, &batch, &classification.include_dirs));
        }

        let mut build_sh = ShellScript::new();
        build_sh.line(format!("vsim -c -do 'source {MAIN_TCL}; exit'"));

        let mut run_sh = ShellScript::new();
        run_sh.line(run_command(desc, &opts));

        let mut commands = EdaCommands::new();
        commands.add(
            vec!["bash".to_string(), BUILD_SCRIPT.to_string()],
            vec!["build".to_string()],
            vec![],
        );
        commands.set_default_target("build");

        Ok(ScriptSet {
            files: vec![
                GeneratedFile::new(BUILD_RTL_TCL, build_rtl.render()),
                GeneratedFile::new(MAIN_TCL, main_tcl.render()),
                GeneratedFile::executable(BUILD_SCRIPT, build_sh.render()),
                GeneratedFile::executable(RUN_SCRIPT, run_sh.render()),
            ],
            commands,
            run: RunSpec::bash(RUN_SCRIPT),
        })
    }
}

/// The single `vlog -mfcu` command for common-compilation mode.
///
/// If any file in the batch is SystemVerilog the whole batch gets `-sv`;
/// include directories are emitted once for the batch.
fn batched_vlog(
    opts: &ModelsimOptions,
    define_flags: &[String],
    batch: &[&ClassifiedFile],
    include_dirs: &[String],
) -> String {
    let mut args = opts.vlog_options.clone();
    args.extend(define_flags.iter().cloned());
    if batch
        .iter()
        .any(|f| matches!(f.class, FileClass::Verilog { system: true }))
    {
        args.push("-sv".to_string());
    }
    for dir in include_dirs {
        args.push(format!("+incdir+{dir}"));
    }
    args.push("-quiet".to_string());
    args.push("-work".to_string());
    args.push(DEFAULT_LIBRARY.to_string());
    args.push("-mfcu".to_string());
    let files: Vec<&str> = batch.iter().map(|f| f.path.as_str()).collect();
    format!("vlog {} {}", args.join(" "), files.join(" "))
}

/// The `vsim` run command with all parameter destinations encoded.
fn run_command(desc: &BuildDescription, opts: &ModelsimOptions) -> String {
    let mut cmd = vec!["vsim".to_string(), "-c".to_string()];
    for vpi in &desc.vpi_modules {
        cmd.push("-pli".to_string());
        cmd.push(vpi.name.clone());
    }
    cmd.extend(opts.vsim_options.iter().cloned());
    for (key, value) in &desc.parameters {
        cmd.push(format!("-g{}={}", key, value.render(ParamKind::VlogParam)));
    }
    for (key, value) in &desc.generics {
        cmd.push(format!("-g{}={}", key, value.render(ParamKind::Generic)));
    }
    for (key, value) in &desc.plusargs {
        cmd.push(format!("+{}={}", key, value.render(ParamKind::PlusArg)));
    }
    cmd.push("-do".to_string());
    cmd.push("'run -all; quit -code 0; exit'".to_string());
    cmd.push(desc.toplevel.clone());
    cmd.join(" ")
}
