//! Content-script wiring: page lifecycle guards and the `wasm_bindgen` entry point.

use std::rc::Rc;

use direction_host::{DirectionApplier, DocumentSurface};
use leptos::logging;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
use direction_host::DirectionSettings;
#[cfg(target_arch = "wasm32")]
use crate::{direction_context, listen_for_direction_messages, WebDocument};

/// Invalidates `applier` when the page unloads or is hidden.
///
/// # Errors
///
/// Returns an error when the listeners cannot be attached.
pub fn install_lifecycle_guards<D: DocumentSurface + 'static>(
    applier: Rc<DirectionApplier<D>>,
) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
        let document = window
            .document()
            .ok_or_else(|| "document unavailable".to_string())?;

        let on_unload = {
            let applier = applier.clone();
            Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event: web_sys::Event| {
                applier.invalidate();
            }))
        };
        window
            .add_event_listener_with_callback("beforeunload", on_unload.as_ref().unchecked_ref())
            .map_err(|e| format!("beforeunload listener failed: {e:?}"))?;
        on_unload.forget();

        let on_visibility = {
            let document = document.clone();
            Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event: web_sys::Event| {
                if document.hidden() {
                    applier.invalidate();
                }
            }))
        };
        document
            .add_event_listener_with_callback(
                "visibilitychange",
                on_visibility.as_ref().unchecked_ref(),
            )
            .map_err(|e| format!("visibilitychange listener failed: {e:?}"))?;
        on_visibility.forget();
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = applier;
        Err("page lifecycle events are only available when compiled for wasm32".to_string())
    }
}

/// Content-script entry point.
///
/// Runs the applier once the DOM is parsed, waiting for `DOMContentLoaded` while the document
/// is still loading.
#[wasm_bindgen]
pub fn start_content_script() {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            logging::error!("direction content script started without a document");
            return;
        };
        if waits_for_dom(document.ready_state()) {
            let on_ready = Closure::once_into_js(launch);
            if let Err(err) = document
                .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
            {
                logging::error!("DOMContentLoaded listener failed: {err:?}");
            }
        } else {
            launch();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        logging::warn!("direction content script requires a wasm32 browser build");
    }
}

/// `true` while the parser is still building the document.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn waits_for_dom(state: web_sys::DocumentReadyState) -> bool {
    state == web_sys::DocumentReadyState::Loading
}

#[cfg(target_arch = "wasm32")]
fn launch() {
    let context = direction_context(DirectionSettings::default());
    let applier = Rc::new(DirectionApplier::new(Rc::new(WebDocument)));

    if let Err(err) = install_lifecycle_guards(applier.clone()) {
        logging::debug_warn!("page lifecycle guards unavailable: {err}");
    }
    if let Err(err) = listen_for_direction_messages(applier.clone()) {
        logging::debug_warn!("runtime message listener unavailable: {err}");
    }

    wasm_bindgen_futures::spawn_local(async move {
        let repository = context.repository();
        applier.run(repository.as_ref()).await;
    });
}
