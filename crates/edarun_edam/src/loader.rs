//! Build-description loading and validation.

use crate::error::ConfigError;
use crate::types::BuildDescription;
use std::path::Path;

/// Loads and validates a build description from a TOML file.
pub fn load_description(path: &Path) -> Result<BuildDescription, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_description_from_str(&content)
}

/// Parses and validates a build description from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_description_from_str(content: &str) -> Result<BuildDescription, ConfigError> {
    let description: BuildDescription =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_description(&description)?;
    Ok(description)
}

/// Validates that required fields are present.
fn validate_description(description: &BuildDescription) -> Result<(), ConfigError> {
    if description.name.is_empty() {
        return Err(ConfigError::MissingField("name".to_string()));
    }
    if description.toplevel.is_empty() {
        return Err(ConfigError::MissingField("toplevel".to_string()));
    }
    Ok(())
}
