use serde_json::Value;

pub(crate) fn add_runtime_message_listener(handler: Box<dyn FnMut(Value)>) -> Result<(), String> {
    super::interop::add_runtime_message_listener(handler)
}

pub(crate) async fn send_message_to_active_tab(message: &Value) -> Result<(), String> {
    super::interop::send_message_to_active_tab(message).await
}
