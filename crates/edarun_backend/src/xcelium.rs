//! Cadence Xcelium backend.
//!
//! Xcelium's `xrun` front end owns the whole compile flow, so the build
//! script is a single `xrun -elaborate` invocation listing every source
//! file, and the run script re-enters the elaborated snapshot with
//! `xrun -R`. Libraries live inside the `-xmlibdirname` directory and are
//! managed by the tool itself; no library-creation commands are emitted.

use serde::Deserialize;

use edarun_edam::{BuildDescription, ParamKind};

use crate::classify::{classify_files, Classification, FileClass};
use crate::commands::EdaCommands;
use crate::error::BackendError;
use crate::options::{self, string_or_vec};
use crate::script::{GeneratedFile, RunSpec, ScriptSet, ShellScript, BUILD_SCRIPT, RUN_SCRIPT};
use crate::{Backend, BackendContext};

/// The library directory passed to every `xrun` invocation.
const LIBDIR: &str = "./xcelium.d";

/// Options for the Xcelium backend, from `[tools.xcelium]`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct XceliumOptions {
    /// Extra `xmvhdl` flags, forwarded through `-xmvhdl_opts`.
    #[serde(deserialize_with = "string_or_vec")]
    pub xmvhdl_options: Vec<String>,
    /// Extra `xmvlog` flags, forwarded through `-xmvlog_opts`.
    #[serde(deserialize_with = "string_or_vec")]
    pub xmvlog_options: Vec<String>,
    /// Extra `xmsim` flags for the run command, forwarded through
    /// `-xmsimargs`.
    #[serde(deserialize_with = "string_or_vec")]
    pub xmsim_options: Vec<String>,
    /// Extra flags passed to `xrun` itself during the build, after the
    /// built-in include and define flags.
    #[serde(deserialize_with = "string_or_vec")]
    pub xrun_options: Vec<String>,
}

/// The Cadence Xcelium backend.
#[derive(Debug)]
pub struct Xcelium;

impl Backend for Xcelium {
    fn tool_name(&self) -> &'static str {
        "xcelium"
    }

    fn description(&self) -> &'static str {
        "Xcelium simulator from Cadence"
    }

    fn plan(&self, ctx: &BackendContext<'_>) -> Result<ScriptSet, BackendError> {
        let desc = ctx.description;
        let opts: XceliumOptions = options::tool_options(desc, "xcelium")?;
        let classification = classify_files(&desc.files, ctx.sink);

        // xrun has no control-script hook, so tclSource gets the same
        // treatment as any other type this backend cannot consume.
        for file in &classification.files {
            if file.class == FileClass::Tcl {
                ctx.sink
                    .warn(format!("{} has unknown file type 'tclSource'", file.path));
            }
        }

        let mut build_sh = ShellScript::new();
        build_sh.line(compile_command(desc, &opts, &classification).join(" "));

        let mut run_sh = ShellScript::new();
        run_sh.line(run_command(desc, &opts).join(" "));

        let mut commands = EdaCommands::new();
        commands.add(
            vec!["bash".to_string(), BUILD_SCRIPT.to_string()],
            vec!["build".to_string()],
            vec![],
        );
        commands.set_default_target("build");

        Ok(ScriptSet {
            files: vec![
                GeneratedFile::executable(BUILD_SCRIPT, build_sh.render()),
                GeneratedFile::executable(RUN_SCRIPT, run_sh.render()),
            ],
            commands,
            run: RunSpec::bash(RUN_SCRIPT),
        })
    }
}

/// The `xrun -elaborate` command: compile and elaborate, no simulation.
fn compile_command(
    desc: &BuildDescription,
    opts: &XceliumOptions,
    classification: &Classification,
) -> Vec<String> {
    let mut cmd = vec![
        "xrun".to_string(),
        "-elaborate".to_string(),
        "-xmlibdirname".to_string(),
        LIBDIR.to_string(),
        "-log".to_string(),
        "xrun.log".to_string(),
    ];
    for dir in &classification.include_dirs {
        cmd.push("-incdir".to_string());
        cmd.push(dir.clone());
    }
    for (key, value) in &desc.defines {
        cmd.push("-define".to_string());
        cmd.push(format!("{}={}", key, value.render(ParamKind::Define)));
    }
    cmd.extend(opts.xrun_options.iter().cloned());
    if !opts.xmvlog_options.is_empty() {
        cmd.push("-xmvlog_opts".to_string());
        cmd.push(format!("\"{}\"", opts.xmvlog_options.join(" ")));
    }
    if !opts.xmvhdl_options.is_empty() {
        cmd.push("-xmvhdl_opts".to_string());
        cmd.push(format!("\"{}\"", opts.xmvhdl_options.join(" ")));
    }
    for file in classification.verilog_sources() {
        match file.class {
            FileClass::Verilog { system: true } => cmd.push("-sv".to_string()),
            _ => cmd.push("-v".to_string()),
        }
        cmd.push(file.path.clone());
    }
    for file in classification.vhdl_sources() {
        cmd.push("-vhdl".to_string());
        cmd.push(file.path.clone());
    }
    cmd.push("-top".to_string());
    cmd.push(desc.toplevel.clone());
    cmd
}

/// The `xrun -R` command: rerun the elaborated snapshot.
fn run_command(desc: &BuildDescription, opts: &XceliumOptions) -> Vec<String> {
    let mut cmd = vec![
        "xrun".to_string(),
        "-R".to_string(),
        "-xmlibdirname".to_string(),
        LIBDIR.to_string(),
        "-log".to_string(),
        "xrun_sim.log".to_string(),
    ];
    for (key, value) in &desc.parameters {
        cmd.push("-defparam".to_string());
        cmd.push(format!(
            "{}.{}={}",
            desc.toplevel,
            key,
            value.render(ParamKind::VlogParam)
        ));
    }
    for (key, value) in &desc.plusargs {
        cmd.push(format!("+{}={}", key, value.render(ParamKind::PlusArg)));
    }
    if !opts.xmsim_options.is_empty() {
        cmd.push("-xmsimargs".to_string());
        cmd.push(format!("\"{}\"", opts.xmsim_options.join(" ")));
    }
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use edarun_diagnostics::DiagnosticSink;
    use edarun_edam::load_description_from_str;

    fn plan(toml: &str) -> (ScriptSet, DiagnosticSink) {
        let desc = load_description_from_str(toml).unwrap();
        let sink = DiagnosticSink::new();
        let scripts = Xcelium
            .plan(&BackendContext {
                description: &desc,
                sink: &sink,
            })
            .unwrap();
        (scripts, sink)
    }

    fn build_sh(scripts: &ScriptSet) -> &str {
        &scripts.file(BUILD_SCRIPT).unwrap().contents
    }

    fn run_sh(scripts: &ScriptSet) -> &str {
        &scripts.file(RUN_SCRIPT).unwrap().contents
    }

    const MIXED: &str = r#"
name = "mixed"
toplevel = "top_tb"

[[files]]
name = "inc/defs.svh"
file_type = "systemVerilogSource"
is_include_file = true

[[files]]
name = "top.sv"
file_type = "systemVerilogSource"

[[files]]
name = "legacy.v"
file_type = "verilogSource"

[[files]]
name = "pkg.vhd"
file_type = "vhdlSource-2008"

[defines]
SIMULATION = 1
"#;

    #[test]
    fn build_command_lists_every_source() {
        let (scripts, sink) = plan(MIXED);
        assert_eq!(
            build_sh(&scripts),
            "#!/bin/bash\nset -e\n\
             xrun -elaborate -xmlibdirname ./xcelium.d -log xrun.log \
             -incdir inc -define SIMULATION=1 \
             -sv top.sv -v legacy.v -vhdl pkg.vhd -top top_tb\n"
        );
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn run_command_defparams_and_plusargs() {
        let toml = r#"
name = "params"
toplevel = "top_tb"

[parameters]
WIDTH = 8

[plusargs]
trace = true
"#;
        let (scripts, _) = plan(toml);
        assert_eq!(
            run_sh(&scripts),
            "#!/bin/bash\nset -e\n\
             xrun -R -xmlibdirname ./xcelium.d -log xrun_sim.log \
             -defparam top_tb.WIDTH=8 +trace=true\n"
        );
    }

    #[test]
    fn subtool_options_are_quoted_groups() {
        let toml = r#"
name = "opts"
toplevel = "top"

[[files]]
name = "a.v"
file_type = "verilogSource"

[tools.xcelium]
xmvlog_options = ["-nowarn", "MACDEF"]
xmvhdl_options = "-relax"
xmsim_options = ["-gui"]
xrun_options = ["-access", "+rwc"]
"#;
        let (scripts, _) = plan(toml);
        let build = build_sh(&scripts);
        assert!(build.contains("-access +rwc -xmvlog_opts \"-nowarn MACDEF\" -xmvhdl_opts \"-relax\""));
        assert!(run_sh(&scripts).contains("-xmsimargs \"-gui\""));
    }

    #[test]
    fn tcl_source_warns() {
        let toml = r#"
name = "tcl"
toplevel = "top"

[[files]]
name = "waves.tcl"
file_type = "tclSource"
"#;
        let (scripts, sink) = plan(toml);
        assert!(!build_sh(&scripts).contains("waves.tcl"));
        assert_eq!(
            sink.warnings(),
            vec!["waves.tcl has unknown file type 'tclSource'".to_string()]
        );
    }

    #[test]
    fn user_files_are_silently_skipped() {
        let toml = r#"
name = "user"
toplevel = "top"

[[files]]
name = "data.bin"
file_type = "user"
"#;
        let (scripts, sink) = plan(toml);
        assert!(!build_sh(&scripts).contains("data.bin"));
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn scripts_are_executable_and_registered() {
        let (scripts, _) = plan(MIXED);
        assert!(scripts.file(BUILD_SCRIPT).unwrap().executable);
        assert!(scripts.file(RUN_SCRIPT).unwrap().executable);
        assert_eq!(scripts.commands.default_target(), Some("build"));
        assert_eq!(scripts.run, RunSpec::bash(RUN_SCRIPT));
    }

    #[test]
    fn planning_is_deterministic() {
        let (first, _) = plan(MIXED);
        let (second, _) = plan(MIXED);
        assert_eq!(first.files, second.files);
    }
}
