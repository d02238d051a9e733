//! File classification: the ordered dispatch every backend starts from.
//!
//! The incoming file list is walked once, in its original order: compile
//! order affects symbol visibility in simulators with position-dependent
//! elaboration, so the classification preserves the global sequence rather
//! than per-language buckets. Include-only files divert their directory into
//! an ordered, deduplicated list; unrecognized types produce a warning and
//! stay in the structure (class [`FileClass::Unknown`]) so library handling
//! still sees them, but no backend ever compiles them.

use crate::registrar::DEFAULT_LIBRARY;
use edarun_diagnostics::DiagnosticSink;
use edarun_edam::{ParamValue, SourceFile};
use indexmap::IndexMap;

/// VHDL language standard derived from the file-type suffix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VhdlStandard {
    /// VHDL-1987.
    Vhdl87,
    /// VHDL-1993.
    Vhdl93,
    /// VHDL-2008.
    Vhdl2008,
}

impl VhdlStandard {
    /// The dialect flag compilers expect for this standard.
    pub fn flag(self) -> &'static str {
        match self {
            VhdlStandard::Vhdl87 => "-87",
            VhdlStandard::Vhdl93 => "-93",
            VhdlStandard::Vhdl2008 => "-2008",
        }
    }
}

/// What a classified file is, as far as command synthesis is concerned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileClass {
    /// An include-only file; carries the directory to add to include paths.
    IncludeDir(String),
    /// A Verilog-family source file. `system` is true for SystemVerilog.
    Verilog {
        /// Whether the file needs SystemVerilog semantics.
        system: bool,
    },
    /// A VHDL source file with an optional dialect.
    Vhdl {
        /// The language standard, if the type tag carried one.
        standard: Option<VhdlStandard>,
    },
    /// A tool control script consumed by backends with a script interpreter.
    Tcl,
    /// An opaque user file; no action.
    User,
    /// An unrecognized type tag; warned about and excluded from commands.
    Unknown(String),
}

/// A source file after classification: normalized path, resolved library,
/// and dispatch class.
#[derive(Clone, Debug)]
pub struct ClassifiedFile {
    /// The file path with separators normalized to forward slashes.
    pub path: String,
    /// The resolved compilation library (default `work`).
    pub library: String,
    /// The dispatch class.
    pub class: FileClass,
    /// Per-file defines carried over from the description.
    pub defines: IndexMap<String, ParamValue>,
}

/// The result of classifying a file list.
#[derive(Debug, Default)]
pub struct Classification {
    /// Every input file in original order, classified.
    pub files: Vec<ClassifiedFile>,
    /// Include directories in first-seen order, deduplicated.
    pub include_dirs: Vec<String>,
}

impl Classification {
    /// Iterates the Verilog-family sources in original order.
    pub fn verilog_sources(&self) -> impl Iterator<Item = &ClassifiedFile> {
        self.files
            .iter()
            .filter(|f| matches!(f.class, FileClass::Verilog { .. }))
    }

    /// Iterates the VHDL sources in original order.
    pub fn vhdl_sources(&self) -> impl Iterator<Item = &ClassifiedFile> {
        self.files
            .iter()
            .filter(|f| matches!(f.class, FileClass::Vhdl { .. }))
    }

    /// Returns `true` if any Verilog-family source needs SystemVerilog
    /// semantics.
    pub fn has_system_verilog(&self) -> bool {
        self.files
            .iter()
            .any(|f| matches!(f.class, FileClass::Verilog { system: true }))
    }
}

/// Classifies the full ordered file list.
///
/// Unrecognized file types are reported to `sink` as warnings; classification
/// never fails.
pub fn classify_files(files: &[SourceFile], sink: &DiagnosticSink) -> Classification {
    let mut classification = Classification::default();

    for file in files {
        let path = normalize_path(&file.name);
        let library = match file.logical_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => DEFAULT_LIBRARY.to_string(),
        };

        let class = if file.is_include_file {
            let dir = match file.include_path.as_deref() {
                Some(dir) if !dir.is_empty() => normalize_path(dir),
                _ => parent_dir(&path).to_string(),
            };
            if !classification.include_dirs.contains(&dir) {
                classification.include_dirs.push(dir.clone());
            }
            FileClass::IncludeDir(dir)
        } else {
            classify_type(&file.file_type)
        };

        if let FileClass::Unknown(file_type) = &class {
            sink.warn(format!(
                "{} has unknown file type '{}'",
                file.name, file_type
            ));
        }

        classification.files.push(ClassifiedFile {
            path,
            library,
            class,
            defines: file.defines.clone(),
        });
    }

    classification
}

/// Maps a file-type tag to its dispatch class.
fn classify_type(file_type: &str) -> FileClass {
    if file_type.starts_with("systemVerilogSource") {
        FileClass::Verilog { system: true }
    } else if file_type.starts_with("verilogSource") {
        FileClass::Verilog { system: false }
    } else if file_type.starts_with("vhdlSource") {
        let standard = if file_type.ends_with("-87") {
            Some(VhdlStandard::Vhdl87)
        } else if file_type.ends_with("-93") {
            Some(VhdlStandard::Vhdl93)
        } else if file_type.ends_with("-2008") {
            Some(VhdlStandard::Vhdl2008)
        } else {
            None
        };
        FileClass::Vhdl { standard }
    } else if file_type == "tclSource" {
        FileClass::Tcl
    } else if file_type == "user" {
        FileClass::User
    } else {
        FileClass::Unknown(file_type.to_string())
    }
}

/// Normalizes path separators to the forward-slash form every destination
/// tool expects, regardless of the host's native separator.
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// The directory part of a normalized path, `.` when there is none.
fn parent_dir(path: &str) -> &str {
    match path.rsplit_once('/') {
        None => ".",
        Some(("", _)) => "/",
        Some((dir, _)) => dir,
    }
}
