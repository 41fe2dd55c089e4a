//! Runtime messages between the popup and content scripts.

use std::rc::Rc;

use direction_host::{DirectionApplier, DocumentSurface, RuntimeMessage, TextDirection};
use leptos::logging;

/// Routes `changeDirection` runtime messages to `applier`.
///
/// Messages that do not decode are ignored.
///
/// # Errors
///
/// Returns an error when no extension runtime is reachable.
pub fn listen_for_direction_messages<D: DocumentSurface + 'static>(
    applier: Rc<DirectionApplier<D>>,
) -> Result<(), String> {
    crate::bridge::add_runtime_message_listener(Box::new(move |value: serde_json::Value| {
        match RuntimeMessage::from_json_value(value) {
            Some(message) => applier.handle_message(message),
            None => {
                logging::debug_warn!("ignoring unrelated runtime message");
            }
        }
    }))
}

/// Asks the content script of the active tab to force `direction` immediately.
///
/// # Errors
///
/// Returns an error when the message cannot be encoded or delivered.
pub async fn send_change_direction(direction: TextDirection) -> Result<(), String> {
    let message = serde_json::to_value(RuntimeMessage::ChangeDirection { direction })
        .map_err(|e| e.to_string())?;
    crate::bridge::send_message_to_active_tab(&message).await
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use direction_host::MemoryDocument;
    use futures::executor::block_on;

    #[test]
    fn listener_needs_an_extension_runtime() {
        let applier = Rc::new(DirectionApplier::new(Rc::new(MemoryDocument::new(
            "https://example.com/",
        ))));
        assert!(listen_for_direction_messages(applier).is_err());
    }

    #[test]
    fn sending_without_tabs_api_fails() {
        assert!(block_on(send_change_direction(TextDirection::Rtl)).is_err());
    }
}
