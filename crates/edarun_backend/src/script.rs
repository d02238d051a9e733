//! Script builders and the planned output of a backend.
//!
//! Every backend produces two scripts, never one: `build.sh` performs
//! everything up to and including elaboration, `run.sh` performs only the
//! simulation, so a caller can rebuild rarely and rerun repeatedly with
//! different plusargs without recompiling. Both open with an abort-on-error
//! header in their dialect.

use crate::commands::EdaCommands;

/// The build script file name every backend emits.
pub const BUILD_SCRIPT: &str = "build.sh";
/// The run script file name every backend emits.
pub const RUN_SCRIPT: &str = "run.sh";

/// A bash script accumulating newline-terminated lines under a
/// `set -e` header, so the first failing step aborts with a nonzero exit.
#[derive(Debug)]
pub struct ShellScript {
    buf: String,
}

impl ShellScript {
    /// Creates a script containing only the shebang and abort-on-error
    /// header.
    pub fn new() -> Self {
        Self {
            buf: String::from("#!/bin/bash\nset -e\n"),
        }
    }

    /// Appends one line.
    pub fn line(&mut self, line: impl AsRef<str>) {
        self.buf.push_str(line.as_ref());
        self.buf.push('\n');
    }

    /// The full script text.
    pub fn render(self) -> String {
        self.buf
    }
}

impl Default for ShellScript {
    fn default() -> Self {
        Self::new()
    }
}

/// A TCL script whose header aborts the interpreter with exit code 1 on the
/// first error.
#[derive(Debug)]
pub struct TclScript {
    buf: String,
}

impl TclScript {
    /// Creates a script containing only the abort-on-error header.
    pub fn new() -> Self {
        Self {
            buf: String::from("onerror { quit -code 1; }\n"),
        }
    }

    /// Appends one line.
    pub fn line(&mut self, line: impl AsRef<str>) {
        self.buf.push_str(line.as_ref());
        self.buf.push('\n');
    }

    /// The full script text.
    pub fn render(self) -> String {
        self.buf
    }
}

impl Default for TclScript {
    fn default() -> Self {
        Self::new()
    }
}

/// One generated file, relative to the work root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the work root.
    pub path: String,
    /// The file contents.
    pub contents: String,
    /// Whether the persisted file must be marked executable.
    pub executable: bool,
}

impl GeneratedFile {
    /// A plain (non-executable) generated file.
    pub fn new(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
            executable: false,
        }
    }

    /// A generated file that must be chmod +x after writing.
    pub fn executable(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
            executable: true,
        }
    }
}

/// How to execute the run script once the build has succeeded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSpec {
    /// The interpreter to invoke.
    pub cmd: String,
    /// Arguments to the interpreter.
    pub args: Vec<String>,
}

impl RunSpec {
    /// A run spec invoking `bash <script>` in the work root.
    pub fn bash(script: impl Into<String>) -> Self {
        Self {
            cmd: "bash".to_string(),
            args: vec![script.into()],
        }
    }
}

/// Everything a backend plans: the generated files, the command registry,
/// and the run entry point. Immutable once returned.
#[derive(Debug)]
pub struct ScriptSet {
    /// All generated files, in emission order.
    pub files: Vec<GeneratedFile>,
    /// The registered build targets.
    pub commands: EdaCommands,
    /// How to execute the run phase.
    pub run: RunSpec,
}

impl ScriptSet {
    /// Looks up a generated file by its work-root-relative path.
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_script_header() {
        let mut script = ShellScript::new();
        script.line("echo hello");
        assert_eq!(script.render(), "#!/bin/bash\nset -e\necho hello\n");
    }

    #[test]
    fn tcl_script_header() {
        let mut script = TclScript::new();
        script.line("vlib work");
        assert_eq!(script.render(), "onerror { quit -code 1; }\nvlib work\n");
    }

    #[test]
    fn generated_file_flags() {
        let plain = GeneratedFile::new("a.f", "x");
        let exec = GeneratedFile::executable("build.sh", "y");
        assert!(!plain.executable);
        assert!(exec.executable);
    }

    #[test]
    fn run_spec_bash() {
        let run = RunSpec::bash(RUN_SCRIPT);
        assert_eq!(run.cmd, "bash");
        assert_eq!(run.args, vec!["run.sh"]);
    }

    #[test]
    fn script_set_lookup() {
        let set = ScriptSet {
            files: vec![GeneratedFile::new("a.tcl", "x")],
            commands: EdaCommands::new(),
            run: RunSpec::bash(RUN_SCRIPT),
        };
        assert!(set.file("a.tcl").is_some());
        assert!(set.file("b.tcl").is_none());
    }
}
