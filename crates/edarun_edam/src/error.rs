//! Error types for build-description loading and validation.

/// Errors that can occur when loading or validating a build description.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the description file.
    #[error("failed to read build description: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML content could not be parsed. Parameter values of an
    /// unsupported type (floats, arrays, tables) surface here with the
    /// offending key named in the message.
    #[error("failed to parse build description: {0}")]
    Parse(String),

    /// A required field is missing from the description.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A `[tools.<tool>]` option table failed to deserialize into the
    /// backend's typed options struct.
    #[error("invalid options for tool '{tool}': {reason}")]
    ToolOptions {
        /// The tool whose option table was rejected.
        tool: String,
        /// Why the table was rejected.
        reason: String,
    },
}
