//! Storage keys and identifiers shared by every execution context.
//!
//! The popup and the content scripts only agree through these values, so hosts that override
//! them must do so consistently in every context.

use serde::{Deserialize, Serialize};

/// Storage key holding the JSON array of direction records.
pub const DIRECTION_CONFIGS_KEY: &str = "direction-configs";
/// Storage key holding the storage-version marker.
pub const EXTENSION_VERSION_KEY: &str = "extensionVersion";
/// Current storage-version marker and backup envelope version.
pub const STORAGE_VERSION: &str = "1.0.0";
/// Reserved id of the record created on first run.
pub const DEFAULT_CONFIG_ID: &str = "default-config";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
/// Per-context settings for the repository and service context.
pub struct DirectionSettings {
    /// Key under which the record array is persisted.
    pub storage_key: String,
    /// Key under which the storage-version marker is persisted.
    pub version_key: String,
    /// Version written to the marker and to export envelopes.
    pub storage_version: String,
    /// Id used for the first-run record and for imported entries without URLs.
    pub default_config_id: String,
}

impl Default for DirectionSettings {
    fn default() -> Self {
        Self {
            storage_key: DIRECTION_CONFIGS_KEY.to_string(),
            version_key: EXTENSION_VERSION_KEY.to_string(),
            storage_version: STORAGE_VERSION.to_string(),
            default_config_id: DEFAULT_CONFIG_ID.to_string(),
        }
    }
}

impl DirectionSettings {
    /// Parses settings from JSON, filling absent fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when `raw_json` is not a JSON object with string fields.
    pub fn from_json(raw_json: &str) -> Result<Self, String> {
        serde_json::from_str(raw_json).map_err(|e| e.to_string())
    }
}
