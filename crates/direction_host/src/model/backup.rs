//! Manual backup/restore envelope.
//!
//! The envelope carries bare direction states without ids or timestamps, so a restore derives
//! fresh identities. It is never read as authoritative storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::DirectionRecord;
use crate::error::{DirectionError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Direction settings of one record, without identity.
pub struct DirectionState {
    /// Forces right-to-left when `true`.
    #[serde(rename = "isRTL")]
    pub is_rtl: bool,
    /// Whether the record takes part in URL matching.
    pub enabled: bool,
    /// Target URL substrings.
    #[serde(default)]
    pub target_urls: Vec<String>,
}

impl From<&DirectionRecord> for DirectionState {
    fn from(record: &DirectionRecord) -> Self {
        Self {
            is_rtl: record.is_rtl(),
            enabled: record.enabled(),
            target_urls: record.target_urls().to_vec(),
        }
    }
}

impl DirectionState {
    /// Builds a fresh record whose id is the comma-joined target list.
    ///
    /// Entries with identical target lists map to the same id and therefore overwrite each
    /// other when saved.
    pub fn into_record(self, default_config_id: &str) -> DirectionRecord {
        let id = if self.target_urls.is_empty() {
            default_config_id.to_string()
        } else {
            self.target_urls.join(",")
        };
        DirectionRecord::new(id, self.is_rtl, self.enabled, self.target_urls)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Export/import document: `{ version, directionConfigs, lastUpdated }`.
pub struct ExtensionStorage {
    /// Storage version at export time.
    pub version: String,
    /// One entry per exported record, in storage order.
    pub direction_configs: Vec<DirectionState>,
    /// Export time.
    pub last_updated: DateTime<Utc>,
}

impl ExtensionStorage {
    /// Builds an envelope from the given records, stamped with `now_unix_ms`.
    pub fn from_records(version: &str, records: &[DirectionRecord], now_unix_ms: u64) -> Self {
        Self {
            version: version.to_string(),
            direction_configs: records.iter().map(DirectionState::from).collect(),
            last_updated: DateTime::<Utc>::from_timestamp_millis(now_unix_ms as i64)
                .unwrap_or_default(),
        }
    }

    /// Renders the envelope as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DirectionError::Serialize`] when serialization fails.
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| DirectionError::Serialize(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Backup data as handed over by a caller: raw JSON text or an already-parsed value.
pub enum ImportPayload {
    /// JSON text, e.g. the contents of a backup file.
    Text(String),
    /// A document that was already parsed.
    Parsed(Value),
}

impl From<&str> for ImportPayload {
    fn from(raw: &str) -> Self {
        Self::Text(raw.to_string())
    }
}

impl From<String> for ImportPayload {
    fn from(raw: String) -> Self {
        Self::Text(raw)
    }
}

impl From<Value> for ImportPayload {
    fn from(value: Value) -> Self {
        Self::Parsed(value)
    }
}

impl ImportPayload {
    /// Validates the payload shape and extracts the direction states.
    ///
    /// Only `directionConfigs` is required; `version` and `lastUpdated` are informational.
    ///
    /// # Errors
    ///
    /// Returns [`DirectionError::InvalidImport`] for unparseable JSON, a missing or non-array
    /// `directionConfigs` field, or entries that are not direction states.
    pub fn into_states(self) -> Result<Vec<DirectionState>> {
        let value = match self {
            Self::Text(raw) => serde_json::from_str::<Value>(&raw)
                .map_err(|e| DirectionError::InvalidImport(e.to_string()))?,
            Self::Parsed(value) => value,
        };

        let Some(entries) = value.get("directionConfigs").and_then(Value::as_array) else {
            return Err(DirectionError::InvalidImport(
                "Missing directionConfigs array".to_string(),
            ));
        };

        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                serde_json::from_value::<DirectionState>(entry.clone()).map_err(|e| {
                    DirectionError::InvalidImport(format!("entry {index}: {e}"))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn export_envelope_strips_identity_and_uses_camel_case() {
        let records = vec![DirectionRecord::from_parts(
            "r1",
            true,
            true,
            vec!["example.com".into()],
            10,
            20,
        )];
        let envelope = ExtensionStorage::from_records("1.0.0", &records, 1_704_164_645_678);
        let value = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(
            value,
            json!({
                "version": "1.0.0",
                "directionConfigs": [
                    {"isRTL": true, "enabled": true, "targetUrls": ["example.com"]}
                ],
                "lastUpdated": "2024-01-02T03:04:05.678Z",
            })
        );
    }

    #[test]
    fn text_and_parsed_payloads_yield_same_states() {
        let doc = json!({
            "version": "1.0.0",
            "directionConfigs": [{"isRTL": false, "enabled": true, "targetUrls": ["a.com"]}],
            "lastUpdated": "2024-01-02T03:04:05.678Z",
        });
        let from_text = ImportPayload::from(doc.to_string())
            .into_states()
            .expect("text import");
        let from_value = ImportPayload::from(doc).into_states().expect("value import");
        assert_eq!(from_text, from_value);
        assert_eq!(from_text[0].target_urls, vec!["a.com".to_string()]);
    }

    #[test]
    fn missing_configs_array_is_rejected() {
        let err = ImportPayload::from(json!({"version": "1.0.0", "directionConfigs": {}}))
            .into_states()
            .expect_err("object is not an array");
        assert_eq!(
            err,
            DirectionError::InvalidImport("Missing directionConfigs array".to_string())
        );
    }

    #[test]
    fn malformed_text_is_rejected() {
        let err = ImportPayload::from("{not json")
            .into_states()
            .expect_err("malformed json");
        assert!(matches!(err, DirectionError::InvalidImport(_)));
    }

    #[test]
    fn malformed_entry_reports_its_index() {
        let err = ImportPayload::from(json!({"directionConfigs": [
            {"isRTL": true, "enabled": true, "targetUrls": []},
            {"isRTL": "yes"},
        ]}))
        .into_states()
        .expect_err("second entry invalid");
        match err {
            DirectionError::InvalidImport(reason) => assert!(reason.starts_with("entry 1:")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn imported_ids_join_urls_or_fall_back_to_default() {
        let joined = DirectionState {
            is_rtl: true,
            enabled: true,
            target_urls: vec!["a.com".into(), "b.com".into()],
        }
        .into_record("default-config");
        assert_eq!(joined.id(), "a.com,b.com");

        let empty = DirectionState {
            is_rtl: false,
            enabled: false,
            target_urls: Vec::new(),
        }
        .into_record("default-config");
        assert_eq!(empty.id(), "default-config");
        assert!(!empty.enabled());
    }
}
