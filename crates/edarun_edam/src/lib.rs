//! The tool-agnostic build description consumed by the edarun backends.
//!
//! This crate defines the data model for an EDA build: an ordered list of
//! tagged [`SourceFile`]s, typed [`ParamValue`]s grouped into parameter,
//! generic, plusarg, and define maps, and free-form per-tool option tables.
//! Descriptions are loaded from TOML via [`load_description`] and are
//! read-only once ingested.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod param;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_description, load_description_from_str};
pub use param::{ParamKind, ParamValue};
pub use types::{BuildDescription, SourceFile, VpiModule};
