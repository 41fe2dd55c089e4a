use serde::{Deserialize, Serialize};

use super::DirectionRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Notification payload describing a record's direction after a change.
pub struct DirectionChangeEvent {
    /// Id of the changed record.
    pub config_id: String,
    /// Direction flag after the change.
    #[serde(rename = "isRTL")]
    pub is_rtl: bool,
    /// Change time in unix milliseconds.
    pub timestamp: u64,
}

impl From<&DirectionRecord> for DirectionChangeEvent {
    fn from(record: &DirectionRecord) -> Self {
        Self {
            config_id: record.id().to_string(),
            is_rtl: record.is_rtl(),
            timestamp: record.updated_at(),
        }
    }
}
