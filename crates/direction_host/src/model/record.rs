//! The persisted direction configuration record.

use serde::{Deserialize, Serialize};

use super::TextDirection;
use crate::{settings::DEFAULT_CONFIG_ID, time::{creation_stamp_ms, mutation_stamp_ms}};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredDirectionRecord")]
/// A set of target URL substrings mapped to a forced direction.
///
/// Records are value objects: every repository read reconstructs them from storage, and fields
/// only change through the mutation methods, each of which bumps `updated_at`.
pub struct DirectionRecord {
    id: String,
    #[serde(rename = "isRTL")]
    is_rtl: bool,
    enabled: bool,
    target_urls: Vec<String>,
    created_at: u64,
    updated_at: u64,
}

/// Wire shape of a record as read from storage, before timestamps are reconciled.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDirectionRecord {
    id: String,
    #[serde(rename = "isRTL")]
    is_rtl: bool,
    enabled: bool,
    #[serde(default)]
    target_urls: Vec<String>,
    #[serde(default, deserialize_with = "timestamp_ms::deserialize")]
    created_at: u64,
    #[serde(default, deserialize_with = "timestamp_ms::deserialize")]
    updated_at: u64,
}

impl From<StoredDirectionRecord> for DirectionRecord {
    fn from(stored: StoredDirectionRecord) -> Self {
        Self::from_parts(
            stored.id,
            stored.is_rtl,
            stored.enabled,
            stored.target_urls,
            stored.created_at,
            stored.updated_at,
        )
    }
}

impl DirectionRecord {
    /// Creates a record stamped with the current time.
    pub fn new(id: impl Into<String>, is_rtl: bool, enabled: bool, target_urls: Vec<String>) -> Self {
        let now = creation_stamp_ms();
        Self {
            id: id.into(),
            is_rtl,
            enabled,
            target_urls,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstructs a record from stored field values.
    ///
    /// `updated_at` is clamped to `created_at`, which also covers hand-edited storage.
    pub fn from_parts(
        id: impl Into<String>,
        is_rtl: bool,
        enabled: bool,
        target_urls: Vec<String>,
        created_at: u64,
        updated_at: u64,
    ) -> Self {
        Self {
            id: id.into(),
            is_rtl,
            enabled,
            target_urls,
            created_at,
            updated_at: updated_at.max(created_at),
        }
    }

    /// First-run record: left-to-right, enabled, no target URLs.
    pub fn default_config() -> Self {
        Self::new(DEFAULT_CONFIG_ID, false, true, Vec::new())
    }

    /// Unique record id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// `true` when the record forces right-to-left.
    pub fn is_rtl(&self) -> bool {
        self.is_rtl
    }

    /// Whether the record takes part in URL matching.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Target URL substrings in insertion order.
    pub fn target_urls(&self) -> &[String] {
        &self.target_urls
    }

    /// Creation time in unix milliseconds.
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Last mutation time in unix milliseconds.
    pub fn updated_at(&self) -> u64 {
        self.updated_at
    }

    /// Direction this record forces.
    pub fn direction(&self) -> TextDirection {
        TextDirection::from_is_rtl(self.is_rtl)
    }

    /// Flips between left-to-right and right-to-left.
    pub fn toggle_direction(&mut self) {
        self.is_rtl = !self.is_rtl;
        self.touch();
    }

    /// Flips the enabled flag.
    pub fn toggle_enabled(&mut self) {
        self.enabled = !self.enabled;
        self.touch();
    }

    /// Appends `url` unless an identical entry exists. Only a real append bumps `updated_at`.
    pub fn add_target_url(&mut self, url: &str) {
        if !self.target_urls.iter().any(|existing| existing == url) {
            self.target_urls.push(url.to_string());
            self.touch();
        }
    }

    /// Removes every entry equal to `url`.
    ///
    /// `updated_at` is bumped even when nothing was removed; readers rely on the timestamp
    /// changing after any remove request.
    pub fn remove_target_url(&mut self, url: &str) {
        self.target_urls.retain(|existing| existing != url);
        self.touch();
    }

    /// Returns `true` when any target entry is a substring of `url`.
    pub fn matches_url(&self, url: &str) -> bool {
        self.target_urls
            .iter()
            .any(|target| url.contains(target.as_str()))
    }

    fn touch(&mut self) {
        self.updated_at = mutation_stamp_ms(self.updated_at);
    }
}

/// Reads unix-millisecond timestamps, also accepting RFC 3339 strings.
mod timestamp_ms {
    use chrono::DateTime;
    use serde::{de::IgnoredAny, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Millis(u64),
        Fractional(f64),
        Text(String),
        Other(IgnoredAny),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match RawTimestamp::deserialize(deserializer)? {
            RawTimestamp::Millis(ms) => Ok(ms),
            RawTimestamp::Fractional(ms) => Ok(ms.max(0.0) as u64),
            RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(&text)
                .map(|parsed| parsed.timestamp_millis().max(0) as u64)
                .map_err(serde::de::Error::custom),
            // `Date` values written through extension storage come back as `{}`.
            RawTimestamp::Other(_) => Ok(0),
        }
    }
}
