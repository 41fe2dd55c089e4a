use super::*;
use js_sys::Promise;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen(inline_js = r#"
function extensionApi(namespace) {
  const root = namespace === 'chrome' ? globalThis.chrome : globalThis.browser;
  return root ?? null;
}

function storageArea(namespace) {
  const api = extensionApi(namespace);
  return api && api.storage && api.storage.local ? api.storage.local : null;
}

function requireArea(namespace) {
  const area = storageArea(namespace);
  if (!area) throw new Error(`${namespace}.storage.local unavailable`);
  return area;
}

function lastErrorMessage(api) {
  const lastError = api && api.runtime ? api.runtime.lastError : null;
  if (!lastError) return null;
  return lastError.message ?? String(lastError);
}

function callbackCall(api, target, method, arg) {
  return new Promise((resolve, reject) => {
    target[method](arg, (result) => {
      const message = lastErrorMessage(api);
      if (message) reject(new Error(message));
      else resolve(result);
    });
  });
}

function storageCall(namespace, method, arg) {
  const area = requireArea(namespace);
  if (namespace === 'chrome') return callbackCall(extensionApi('chrome'), area, method, arg);
  return Promise.resolve(area[method](arg));
}

export function jsExtensionRuntimePresent() {
  for (const namespace of ['chrome', 'browser']) {
    const api = extensionApi(namespace);
    if (api && api.runtime && api.runtime.id) return true;
  }
  return false;
}

export function jsExtensionStoragePresent(namespace) {
  return storageArea(namespace) !== null;
}

export async function jsExtensionStorageGet(namespace, key) {
  const items = await storageCall(namespace, 'get', key);
  if (!items || !Object.prototype.hasOwnProperty.call(items, key)) return null;
  return items[key];
}

export async function jsExtensionStorageSet(namespace, key, value) {
  await storageCall(namespace, 'set', { [key]: value });
}

export async function jsExtensionStorageRemove(namespace, key) {
  await storageCall(namespace, 'remove', key);
}

export function jsAddRuntimeMessageListener(handler) {
  const browserApi = extensionApi('browser');
  const api = browserApi && browserApi.runtime && browserApi.runtime.onMessage
    ? browserApi
    : extensionApi('chrome');
  if (!api || !api.runtime || !api.runtime.onMessage) {
    throw new Error('runtime.onMessage unavailable');
  }
  api.runtime.onMessage.addListener((message) => {
    handler(message);
  });
}

export async function jsSendMessageToActiveTab(message) {
  const query = { active: true, currentWindow: true };
  const browserApi = extensionApi('browser');
  let tabs;
  let api;
  if (browserApi && browserApi.tabs) {
    api = browserApi;
    tabs = await browserApi.tabs.query(query);
  } else {
    api = extensionApi('chrome');
    if (!api || !api.tabs) throw new Error('tabs API unavailable');
    tabs = await callbackCall(api, api.tabs, 'query', query);
  }
  const tab = tabs && tabs.length > 0 ? tabs[0] : null;
  if (!tab || tab.id === undefined) throw new Error('No active tab');
  if (api === browserApi) {
    await browserApi.tabs.sendMessage(tab.id, message);
    return;
  }
  await new Promise((resolve, reject) => {
    api.tabs.sendMessage(tab.id, message, () => {
      const text = lastErrorMessage(api);
      if (text) reject(new Error(text));
      else resolve();
    });
  });
}
"#)]
extern "C" {
    #[wasm_bindgen(js_name = jsExtensionRuntimePresent)]
    fn js_extension_runtime_present() -> bool;
    #[wasm_bindgen(js_name = jsExtensionStoragePresent)]
    fn js_extension_storage_present(namespace: &str) -> bool;
    #[wasm_bindgen(js_name = jsExtensionStorageGet)]
    fn js_extension_storage_get(namespace: &str, key: &str) -> Promise;
    #[wasm_bindgen(js_name = jsExtensionStorageSet)]
    fn js_extension_storage_set(namespace: &str, key: &str, value: JsValue) -> Promise;
    #[wasm_bindgen(js_name = jsExtensionStorageRemove)]
    fn js_extension_storage_remove(namespace: &str, key: &str) -> Promise;

    #[wasm_bindgen(catch, js_name = jsAddRuntimeMessageListener)]
    fn js_add_runtime_message_listener(handler: &js_sys::Function) -> Result<(), JsValue>;
    #[wasm_bindgen(js_name = jsSendMessageToActiveTab)]
    fn js_send_message_to_active_tab(message: JsValue) -> Promise;
}

async fn await_promise(promise: Promise) -> Result<JsValue, String> {
    JsFuture::from(promise).await.map_err(js_error_to_string)
}

fn js_error_to_string(err: JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Ok(message) = js_sys::Reflect::get(&err, &JsValue::from_str("message")) {
        if let Some(text) = message.as_string() {
            return text;
        }
    }
    format!("{err:?}")
}

fn to_js(value: &Value) -> Result<JsValue, String> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(|e| e.to_string())
}

fn from_js(value: JsValue) -> Result<Option<Value>, String> {
    if value.is_null() || value.is_undefined() {
        Ok(None)
    } else {
        from_value(value).map(Some).map_err(|e| e.to_string())
    }
}

fn local_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| "localStorage unavailable".to_string())
}

pub fn extension_runtime_present() -> bool {
    js_extension_runtime_present()
}

pub fn extension_storage_present(namespace: ExtensionNamespace) -> bool {
    js_extension_storage_present(namespace.as_str())
}

pub async fn extension_storage_get(
    namespace: ExtensionNamespace,
    key: &str,
) -> Result<Option<Value>, String> {
    let value = await_promise(js_extension_storage_get(namespace.as_str(), key)).await?;
    from_js(value)
}

pub async fn extension_storage_set(
    namespace: ExtensionNamespace,
    key: &str,
    value: &Value,
) -> Result<(), String> {
    let value = to_js(value)?;
    let _ = await_promise(js_extension_storage_set(namespace.as_str(), key, value)).await?;
    Ok(())
}

pub async fn extension_storage_remove(
    namespace: ExtensionNamespace,
    key: &str,
) -> Result<(), String> {
    let _ = await_promise(js_extension_storage_remove(namespace.as_str(), key)).await?;
    Ok(())
}

pub fn page_storage_present() -> bool {
    local_storage().is_ok()
}

pub fn page_storage_get(key: &str) -> Result<Option<String>, String> {
    local_storage()?
        .get_item(key)
        .map_err(|e| format!("localStorage get_item failed: {}", js_error_to_string(e)))
}

pub fn page_storage_set(key: &str, raw_json: &str) -> Result<(), String> {
    local_storage()?
        .set_item(key, raw_json)
        .map_err(|e| format!("localStorage set_item failed: {}", js_error_to_string(e)))
}

pub fn page_storage_remove(key: &str) -> Result<(), String> {
    local_storage()?
        .remove_item(key)
        .map_err(|e| format!("localStorage remove_item failed: {}", js_error_to_string(e)))
}

pub fn add_runtime_message_listener(mut handler: Box<dyn FnMut(Value)>) -> Result<(), String> {
    let closure = Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |message: JsValue| {
        match from_js(message) {
            Ok(Some(value)) => handler(value),
            Ok(None) => {}
            Err(err) => {
                leptos::logging::debug_warn!("ignoring undecodable runtime message: {err}");
            }
        }
    }));
    js_add_runtime_message_listener(closure.as_ref().unchecked_ref())
        .map_err(js_error_to_string)?;
    // The listener lives for the rest of the page context.
    closure.forget();
    Ok(())
}

pub async fn send_message_to_active_tab(message: &Value) -> Result<(), String> {
    let message = to_js(message)?;
    let _ = await_promise(js_send_message_to_active_tab(message)).await?;
    Ok(())
}
