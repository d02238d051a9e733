//! Synopsys VCS backend.
//!
//! VCS splits the flow into per-library analysis (`vlogan`/`vhdlan`) and a
//! separate elaboration step (`vcs`) that links the `simv` binary. Analysis
//! options travel in `.f` files, one per (library, tool, define-set) group;
//! library-to-directory mappings go in `synopsys_sim.setup`; parameter and
//! generic overrides go in `parameters.txt` consumed at elaboration. The run
//! script executes the linked binary directly.

use indexmap::IndexMap;
use serde::Deserialize;

use edarun_edam::{BuildDescription, ParamKind};

use crate::classify::{classify_files, FileClass};
use crate::commands::EdaCommands;
use crate::error::BackendError;
use crate::options::{self, string_or_vec};
use crate::script::{GeneratedFile, RunSpec, ScriptSet, ShellScript, BUILD_SCRIPT, RUN_SCRIPT};
use crate::{Backend, BackendContext};

/// The library mapping file VCS reads at startup.
const SETUP_FILE: &str = "synopsys_sim.setup";
/// The options file for the elaboration step.
const VCS_F: &str = "vcs.f";
/// The parameter override file consumed by `vcs -parameters`.
const PARAMETERS_FILE: &str = "parameters.txt";

/// Options for the VCS backend, from `[tools.vcs]`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VcsOptions {
    /// Disables 64-bit mode; by default every command carries `-full64`.
    #[serde(rename = "32bit")]
    pub thirty_two_bit: bool,
    /// Extra `vlogan` flags, written into each Verilog group's `.f` file
    /// after `-sverilog` and before the define flags.
    #[serde(deserialize_with = "string_or_vec")]
    pub vlogan_options: Vec<String>,
    /// Extra `vhdlan` flags, written into each VHDL group's `.f` file.
    #[serde(deserialize_with = "string_or_vec")]
    pub vhdlan_options: Vec<String>,
    /// Extra elaboration flags, written into `vcs.f` after `-top`.
    #[serde(deserialize_with = "string_or_vec")]
    pub vcs_options: Vec<String>,
    /// Extra run-time flags passed to the `simv` binary before the
    /// plusargs.
    #[serde(deserialize_with = "string_or_vec")]
    pub run_options: Vec<String>,
}

/// One analysis invocation: every file in the group shares the tool and the
/// rendered define set.
struct AnalysisGroup {
    tool: &'static str,
    defines: Vec<String>,
    files: Vec<String>,
}

/// The Synopsys VCS backend.
#[derive(Debug)]
pub struct Vcs;

impl Backend for Vcs {
    fn tool_name(&self) -> &'static str {
        "vcs"
    }

    fn description(&self) -> &'static str {
        "VCS simulator from Synopsys"
    }

    fn plan(&self, ctx: &BackendContext<'_>) -> Result<ScriptSet, BackendError> {
        let desc = ctx.description;
        let opts: VcsOptions = options::tool_options(desc, "vcs")?;
        let classification = classify_files(&desc.files, ctx.sink);
        let has_sv = classification.has_system_verilog();
        let full64 = if opts.thirty_two_bit {
            None
        } else {
            Some("-full64")
        };

        // Group sources per library in first-seen order, then within a
        // library by (tool, define set): files differing only in per-file
        // defines cannot share an analysis command.
        let mut groups: IndexMap<String, Vec<AnalysisGroup>> = IndexMap::new();
        for file in &classification.files {
            let tool = match &file.class {
                FileClass::Verilog { .. } => "vlogan",
                FileClass::Vhdl { .. } => "vhdlan",
                _ => continue,
            };

            let defines = if tool == "vlogan" {
                let mut merged = desc.defines.clone();
                for (k, v) in &file.defines {
                    merged.insert(k.clone(), v.clone());
                }
                merged
                    .iter()
                    .map(|(k, v)| {
                        format!("+define+{}={}", k, v.render_quoted(ParamKind::Define, "\"\""))
                    })
                    .collect()
            } else {
                Vec::new()
            };

            let lib_groups = groups.entry(file.library.clone()).or_default();
            match lib_groups
                .iter_mut()
                .find(|g| g.tool == tool && g.defines == defines)
            {
                Some(group) => group.files.push(file.path.clone()),
                None => lib_groups.push(AnalysisGroup {
                    tool,
                    defines,
                    files: vec![file.path.clone()],
                }),
            }
        }

        let mut files = Vec::new();
        let mut build_sh = ShellScript::new();
        let mut workdirs = Vec::new();

        for (lib, lib_groups) in &groups {
            for (i, group) in lib_groups.iter().enumerate() {
                let workdir = if i == 0 {
                    lib.clone()
                } else {
                    format!("{lib}_{i}")
                };
                let f_file = format!("{workdir}.f");

                let mut tokens = Vec::new();
                if group.tool == "vlogan" {
                    if has_sv {
                        tokens.push("-sverilog".to_string());
                    }
                    tokens.extend(opts.vlogan_options.iter().cloned());
                    tokens.extend(group.defines.iter().cloned());
                    for dir in &classification.include_dirs {
                        tokens.push(format!("+incdir+{dir}"));
                    }
                } else {
                    tokens.extend(opts.vhdlan_options.iter().cloned());
                }
                files.push(GeneratedFile::new(&f_file, tokens.join(" ") + "\n"));

                let mut cmd = vec![group.tool.to_string()];
                cmd.extend(full64.map(str::to_string));
                cmd.push("-file".to_string());
                cmd.push(f_file);
                cmd.push("-work".to_string());
                cmd.push(workdir.clone());
                cmd.extend(group.files.iter().cloned());
                build_sh.line(cmd.join(" "));

                workdirs.push(workdir);
            }
        }

        let binary_name = format!("{}.simv", desc.name);
        let vcs_f_tokens: Vec<String> = ["-top".to_string(), desc.toplevel.clone()]
            .into_iter()
            .chain(opts.vcs_options.iter().cloned())
            .collect();
        files.push(GeneratedFile::new(VCS_F, vcs_f_tokens.join(" ") + "\n"));
        files.push(GeneratedFile::new(PARAMETERS_FILE, parameters_file(desc)));
        files.push(GeneratedFile::new(SETUP_FILE, setup_file(&workdirs)));

        let mut elab = vec!["vcs".to_string()];
        elab.extend(full64.map(str::to_string));
        elab.push("-o".to_string());
        elab.push(binary_name.clone());
        elab.push("-file".to_string());
        elab.push(VCS_F.to_string());
        elab.push("-parameters".to_string());
        elab.push(PARAMETERS_FILE.to_string());
        build_sh.line(elab.join(" "));

        let mut run_cmd = vec![format!("./{binary_name}")];
        run_cmd.extend(opts.run_options.iter().cloned());
        for (key, value) in &desc.plusargs {
            run_cmd.push(format!("+{}={}", key, value.render(ParamKind::PlusArg)));
        }
        let mut run_sh = ShellScript::new();
        run_sh.line(run_cmd.join(" "));

        files.push(GeneratedFile::executable(BUILD_SCRIPT, build_sh.render()));
        files.push(GeneratedFile::executable(RUN_SCRIPT, run_sh.render()));

        let mut commands = EdaCommands::new();
        commands.add(
            vec!["bash".to_string(), BUILD_SCRIPT.to_string()],
            vec!["build".to_string()],
            vec![],
        );
        commands.set_default_target("build");

        Ok(ScriptSet {
            files,
            commands,
            run: RunSpec::bash(RUN_SCRIPT),
        })
    }
}

/// The `synopsys_sim.setup` library mapping: `work` is always the default,
/// every other analysis directory gets its own mapping line.
fn setup_file(workdirs: &[String]) -> String {
    let mut s = String::from("WORK > DEFAULT\nDEFAULT : ./work\n");
    for dir in workdirs {
        if dir != "work" {
            s.push_str(&format!("{dir} : ./{dir}\n"));
        }
    }
    s
}

/// The `parameters.txt` override file: one `assign <value> <key>` line per
/// Verilog parameter, then per VHDL generic. String values are quoted;
/// boolean generics keep their quoted rendering, boolean parameters stay
/// bare.
fn parameters_file(desc: &BuildDescription) -> String {
    let mut s = String::new();
    for (key, value) in &desc.parameters {
        s.push_str(&format!(
            "assign {} {}\n",
            value.render_quoted(ParamKind::VlogParam, "\""),
            key
        ));
    }
    for (key, value) in &desc.generics {
        s.push_str(&format!(
            "assign {} {}\n",
            value.render_quoted(ParamKind::Generic, "\""),
            key
        ));
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use edarun_diagnostics::DiagnosticSink;
    use edarun_edam::load_description_from_str;

    fn plan(toml: &str) -> (ScriptSet, DiagnosticSink) {
        let desc = load_description_from_str(toml).unwrap();
        let sink = DiagnosticSink::new();
        let scripts = Vcs
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

    const TWO_LIBS: &str = r#"
name = "duo"
toplevel = "top_tb"

[[files]]
name = "core/alu.sv"
file_type = "systemVerilogSource"
logical_name = "corelib"

[[files]]
name = "top.v"
file_type = "verilogSource"

[[files]]
name = "pkg.vhd"
file_type = "vhdlSource-2008"
"#;

    #[test]
    fn analysis_grouped_per_library() {
        let (scripts, _) = plan(TWO_LIBS);
        assert_eq!(
            build_sh(&scripts),
            "#!/bin/bash\nset -e\n\
             vlogan -full64 -file corelib.f -work corelib core/alu.sv\n\
             vlogan -full64 -file work.f -work work top.v\n\
             vhdlan -full64 -file work_1.f -work work_1 pkg.vhd\n\
             vcs -full64 -o duo.simv -file vcs.f -parameters parameters.txt\n"
        );
    }

    #[test]
    fn setup_file_maps_every_analysis_dir() {
        let (scripts, _) = plan(TWO_LIBS);
        assert_eq!(
            scripts.file(SETUP_FILE).unwrap().contents,
            "WORK > DEFAULT\nDEFAULT : ./work\ncorelib : ./corelib\nwork_1 : ./work_1\n"
        );
    }

    #[test]
    fn sverilog_applies_to_every_vlogan_group() {
        let (scripts, _) = plan(TWO_LIBS);
        // One SystemVerilog file anywhere makes every Verilog group -sverilog.
        assert_eq!(
            scripts.file("corelib.f").unwrap().contents,
            "-sverilog\n"
        );
        assert_eq!(scripts.file("work.f").unwrap().contents, "-sverilog\n");
        assert_eq!(scripts.file("work_1.f").unwrap().contents, "\n");
    }

    #[test]
    fn per_file_defines_split_groups() {
        let toml = r#"
name = "defs"
toplevel = "top"

[[files]]
name = "a.v"
file_type = "verilogSource"

[[files]]
name = "b.v"
file_type = "verilogSource"

[[files]]
name = "c.v"
file_type = "verilogSource"
[files.defines]
FAST = 1
"#;
        let (scripts, _) = plan(toml);
        let build = build_sh(&scripts);
        assert!(build.contains("vlogan -full64 -file work.f -work work a.v b.v\n"));
        assert!(build.contains("vlogan -full64 -file work_1.f -work work_1 c.v\n"));
        assert_eq!(
            scripts.file("work_1.f").unwrap().contents,
            "+define+FAST=1\n"
        );
    }

    #[test]
    fn global_defines_use_escaped_quotes() {
        let toml = r#"
name = "defs"
toplevel = "top"

[[files]]
name = "a.v"
file_type = "verilogSource"

[defines]
MODE = "fast"
"#;
        let (scripts, _) = plan(toml);
        assert_eq!(
            scripts.file("work.f").unwrap().contents,
            "+define+MODE=\"\"fast\"\"\n"
        );
    }

    #[test]
    fn include_dirs_in_vlogan_groups() {
        let toml = r#"
name = "inc"
toplevel = "top"

[[files]]
name = "inc/defs.vh"
file_type = "verilogSource"
is_include_file = true

[[files]]
name = "a.v"
file_type = "verilogSource"
"#;
        let (scripts, _) = plan(toml);
        assert_eq!(scripts.file("work.f").unwrap().contents, "+incdir+inc\n");
    }

    #[test]
    fn parameters_file_distinguishes_destinations() {
        let toml = r#"
name = "params"
toplevel = "top"

[parameters]
WIDTH = 8
FAST = true

[generics]
DEBUG = true
MODE = "turbo"
"#;
        let (scripts, _) = plan(toml);
        assert_eq!(
            scripts.file(PARAMETERS_FILE).unwrap().contents,
            "assign 8 WIDTH\n\
             assign true FAST\n\
             assign \"true\" DEBUG\n\
             assign \"turbo\" MODE\n"
        );
    }

    #[test]
    fn vcs_f_holds_toplevel_and_options() {
        let toml = r#"
name = "elab"
toplevel = "top_tb"

[tools.vcs]
vcs_options = ["-debug_access+all"]
"#;
        let (scripts, _) = plan(toml);
        assert_eq!(
            scripts.file(VCS_F).unwrap().contents,
            "-top top_tb -debug_access+all\n"
        );
    }

    #[test]
    fn run_script_executes_simv_with_plusargs() {
        let toml = r#"
name = "runny"
toplevel = "top"

[plusargs]
trace = true
seed = 42

[tools.vcs]
run_options = ["-licqueue"]
"#;
        let (scripts, _) = plan(toml);
        assert_eq!(
            scripts.file(RUN_SCRIPT).unwrap().contents,
            "#!/bin/bash\nset -e\n./runny.simv -licqueue +trace=true +seed=42\n"
        );
    }

    #[test]
    fn thirty_two_bit_drops_full64() {
        let toml = r#"
name = "small"
toplevel = "top"

[[files]]
name = "a.v"
file_type = "verilogSource"

[tools.vcs]
32bit = true
"#;
        let (scripts, _) = plan(toml);
        assert!(!build_sh(&scripts).contains("-full64"));
        assert!(build_sh(&scripts).contains("vlogan -file work.f -work work a.v"));
    }

    #[test]
    fn scripts_are_executable_and_registered() {
        let (scripts, _) = plan(TWO_LIBS);
        assert!(scripts.file(BUILD_SCRIPT).unwrap().executable);
        assert!(scripts.file(RUN_SCRIPT).unwrap().executable);
        assert!(!scripts.file(SETUP_FILE).unwrap().executable);
        assert_eq!(scripts.commands.default_target(), Some("build"));
        assert_eq!(scripts.run, RunSpec::bash(RUN_SCRIPT));
    }

    #[test]
    fn planning_is_deterministic() {
        let (first, _) = plan(TWO_LIBS);
        let (second, _) = plan(TWO_LIBS);
        assert_eq!(first.files, second.files);
    }
}
