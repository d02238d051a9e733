//! Build-description types deserialized from an `edarun.toml` document.

use crate::param::ParamValue;
use indexmap::IndexMap;
use serde::Deserialize;

/// A single source file in the build description.
///
/// Immutable once ingested; backends read it but never modify it. The
/// `file_type` is a hierarchical tag such as `verilogSource`,
/// `systemVerilogSource-2017`, `vhdlSource-2008`, `tclSource`, or `user`.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceFile {
    /// Path to the file, relative to the work root or absolute.
    pub name: String,
    /// The hierarchical file-type tag.
    pub file_type: String,
    /// The compilation library this file belongs to. Absent or empty means
    /// the default library `work`.
    #[serde(default)]
    pub logical_name: Option<String>,
    /// Marks this file as include-only: its directory is collected for
    /// `+incdir+`-style flags and the file itself is never compiled.
    #[serde(default)]
    pub is_include_file: bool,
    /// Explicit include directory for an include file. Falls back to the
    /// file's parent directory when absent.
    #[serde(default)]
    pub include_path: Option<String>,
    /// Per-file defines merged over the description-wide defines (last write
    /// wins), honored by backends with per-file compilation units.
    #[serde(default)]
    pub defines: IndexMap<String, ParamValue>,
}

impl SourceFile {
    /// Creates a source file with the given path and type tag, in the
    /// default library.
    pub fn new(name: impl Into<String>, file_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_type: file_type.into(),
            logical_name: None,
            is_include_file: false,
            include_path: None,
            defines: IndexMap::new(),
        }
    }

    /// Assigns this file to a compilation library.
    pub fn in_library(mut self, library: impl Into<String>) -> Self {
        self.logical_name = Some(library.into());
        self
    }

    /// Marks this file as include-only.
    pub fn as_include_file(mut self) -> Self {
        self.is_include_file = true;
        self
    }

    /// Adds a per-file define.
    pub fn with_define(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.defines.insert(name.into(), value);
        self
    }
}

/// A VPI module to load into the simulator at run time.
#[derive(Debug, Clone, Deserialize)]
pub struct VpiModule {
    /// Name of the compiled VPI library.
    pub name: String,
}

/// A complete tool-agnostic build description.
///
/// Supplied fully formed by the ingestion side (see [`crate::loader`]);
/// read-only to the synthesis engine. Parameter maps preserve document order
/// because duplicate-name last-write-wins and command ordering both depend
/// on it.
#[derive(Debug, Deserialize)]
pub struct BuildDescription {
    /// The build name, used for tool artifacts such as the VCS `simv` binary.
    pub name: String,
    /// The top-level module or entity to elaborate and run.
    pub toplevel: String,
    /// The ordered source file list.
    #[serde(default)]
    pub files: Vec<SourceFile>,
    /// Verilog parameter overrides (`name -> value`).
    #[serde(default)]
    pub parameters: IndexMap<String, ParamValue>,
    /// VHDL generic overrides (`name -> value`).
    #[serde(default)]
    pub generics: IndexMap<String, ParamValue>,
    /// Runtime plusargs (`name -> value`).
    #[serde(default)]
    pub plusargs: IndexMap<String, ParamValue>,
    /// Preprocessor defines applied to every Verilog compilation.
    #[serde(default)]
    pub defines: IndexMap<String, ParamValue>,
    /// VPI modules to load at simulation time.
    #[serde(default)]
    pub vpi_modules: Vec<VpiModule>,
    /// Raw per-tool option tables (`[tools.<tool>]`). Each backend converts
    /// its own table into a typed options struct at plan time.
    #[serde(default)]
    pub tools: IndexMap<String, toml::Value>,
}

impl BuildDescription {
    /// Returns the raw option table for the given tool, if present.
    pub fn tool_table(&self, tool: &str) -> Option<&toml::Value> {
        self.tools.get(tool)
    }
}
