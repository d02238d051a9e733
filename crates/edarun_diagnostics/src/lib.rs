//! Diagnostic messages and the sink that script synthesis reports into.
//!
//! Synthesis never prints: warnings and errors are emitted into an injected
//! [`DiagnosticSink`] so the engine stays a pure function of its inputs, and
//! the caller decides how (and whether) to render what accumulated.

#![warn(missing_docs)]

pub mod diagnostic;
pub mod severity;
pub mod sink;

pub use diagnostic::Diagnostic;
pub use severity::Severity;
pub use sink::DiagnosticSink;
