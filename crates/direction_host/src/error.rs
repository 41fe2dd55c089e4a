//! Errors that are meant to reach a human.
//!
//! Storage and DOM failures never show up here: providers report them as strings, the selector
//! logs them and degrades to "no data".

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures surfaced by use cases and backup import/export.
pub enum DirectionError {
    /// No record with the requested id exists in storage.
    #[error("Configuration not found")]
    ConfigNotFound,
    /// Backup data did not have the expected shape.
    #[error("Invalid config format: {0}")]
    InvalidImport(String),
    /// Export was requested while storage holds no records.
    #[error("No config to export")]
    NothingToExport,
    /// A value could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialize(String),
}

/// Result alias for operations that can fail with [`DirectionError`].
pub type Result<T> = std::result::Result<T, DirectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_is_stable() {
        assert_eq!(
            DirectionError::ConfigNotFound.to_string(),
            "Configuration not found"
        );
    }

    #[test]
    fn invalid_import_includes_reason() {
        let err = DirectionError::InvalidImport("Missing directionConfigs array".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid config format: Missing directionConfigs array"
        );
    }
}
