//! Backend command synthesis: build descriptions in, simulator scripts out.
//!
//! Each backend translates a [`BuildDescription`] into the scripts and
//! control files that drive one simulator. All backends implement the same
//! contract: classify the file list, create compilation libraries before
//! any file that references them, encode parameters in the tool's argument
//! syntax, and emit a build script plus a run script. They differ in command
//! names, option spellings, and compilation-unit policy.
//!
//! Backends are stateless policies over an explicit [`BackendContext`]:
//! synthesis is a pure, order-preserving function of the description, with
//! warnings reported through the injected [`DiagnosticSink`].

#![warn(missing_docs)]

pub mod classify;
pub mod commands;
pub mod error;
pub mod modelsim;
pub mod options;
pub mod registrar;
pub mod script;
pub mod vcs;
pub mod xcelium;

pub use classify::{classify_files, Classification, ClassifiedFile, FileClass, VhdlStandard};
pub use commands::{Command, EdaCommands};
pub use error::BackendError;
pub use options::CompilationMode;
pub use registrar::{LibraryRegistrar, DEFAULT_LIBRARY};
pub use script::{GeneratedFile, RunSpec, ScriptSet, ShellScript, TclScript};

use edarun_diagnostics::DiagnosticSink;
use edarun_edam::BuildDescription;

/// The tool names accepted by [`backend_for`], in display order.
pub const SUPPORTED_TOOLS: &[&str] = &["modelsim", "vcs", "xcelium"];

/// Everything a backend may read while planning: the build description and
/// the sink for non-fatal diagnostics. Backends hold no state of their own.
pub struct BackendContext<'a> {
    /// The tool-agnostic build description, read-only.
    pub description: &'a BuildDescription,
    /// Where warnings are reported. Warnings never abort planning.
    pub sink: &'a DiagnosticSink,
}

/// A simulator backend: a policy that plans scripts for one tool.
pub trait Backend: std::fmt::Debug {
    /// The tool name this backend answers to (e.g. `modelsim`).
    fn tool_name(&self) -> &'static str;

    /// A one-line human-readable description of the tool.
    fn description(&self) -> &'static str;

    /// Plans the full script set for the given build description.
    ///
    /// Configuration errors abort the whole plan; no partial script set is
    /// ever returned. Unknown file types and other recoverable conditions
    /// are reported to the sink instead.
    fn plan(&self, ctx: &BackendContext<'_>) -> Result<ScriptSet, BackendError>;
}

/// Resolves a tool name to its backend.
pub fn backend_for(tool: &str) -> Result<Box<dyn Backend>, BackendError> {
    match tool {
        "modelsim" => Ok(Box::new(modelsim::Modelsim)),
        "vcs" => Ok(Box::new(vcs::Vcs)),
        "xcelium" => Ok(Box::new(xcelium::Xcelium)),
        _ => Err(BackendError::UnknownTool(tool.to_string())),
    }
}
