//! Messages exchanged between the popup and content scripts through the extension runtime.

use serde::{Deserialize, Serialize};

use crate::model::TextDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
/// Direct popup-to-page commands that bypass storage.
pub enum RuntimeMessage {
    /// Force `direction` on the receiving page right away.
    ChangeDirection {
        /// Direction to apply.
        direction: TextDirection,
    },
}

impl RuntimeMessage {
    /// Decodes a message, returning `None` for payloads this extension did not send.
    pub fn from_json_value(value: serde_json::Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn change_direction_wire_shape() {
        let message = RuntimeMessage::ChangeDirection {
            direction: TextDirection::Rtl,
        };
        assert_eq!(
            serde_json::to_value(message).expect("serialize"),
            json!({"action": "changeDirection", "direction": "rtl"})
        );
    }

    #[test]
    fn foreign_messages_are_ignored() {
        assert_eq!(
            RuntimeMessage::from_json_value(json!({"action": "somethingElse"})),
            None
        );
        assert_eq!(
            RuntimeMessage::from_json_value(json!({"action": "changeDirection", "direction": "ltr"})),
            Some(RuntimeMessage::ChangeDirection {
                direction: TextDirection::Ltr
            })
        );
    }
}
