//! Error types for backend script synthesis.

use edarun_edam::ConfigError;

/// Errors that abort a backend's planning pass.
///
/// Recoverable conditions (unknown file types, skipped files) are reported
/// through the diagnostic sink instead and never appear here.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The requested tool has no backend.
    #[error("unknown tool '{0}' (supported: modelsim, vcs, xcelium)")]
    UnknownTool(String),

    /// The build description or a tool option table is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_tool() {
        let err = BackendError::UnknownTool("verilator".to_string());
        assert_eq!(
            format!("{err}"),
            "unknown tool 'verilator' (supported: modelsim, vcs, xcelium)"
        );
    }

    #[test]
    fn config_error_passes_through() {
        let err: BackendError = ConfigError::MissingField("toplevel".to_string()).into();
        assert_eq!(format!("{err}"), "missing required field: toplevel");
    }
}
