//! `web_sys` implementation of [`DocumentSurface`].

use direction_host::{AddedElementsCallback, DocumentSurface, MutationSubscription, TextDirection};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[derive(Debug, Clone, Copy, Default)]
/// The live page document, observed through a `MutationObserver` on its body.
pub struct WebDocument;

#[cfg(target_arch = "wasm32")]
fn document() -> Result<web_sys::Document, String> {
    web_sys::window()
        .ok_or_else(|| "window unavailable".to_string())?
        .document()
        .ok_or_else(|| "document unavailable".to_string())
}

#[cfg(target_arch = "wasm32")]
fn js_error(context: &str, err: wasm_bindgen::JsValue) -> String {
    format!("{context}: {err:?}")
}

#[cfg(target_arch = "wasm32")]
fn force_direction(element: &web_sys::Element, direction: TextDirection) -> Result<(), String> {
    element
        .set_attribute("dir", direction.as_str())
        .map_err(|e| js_error("set dir failed", e))?;
    if let Some(html) = element.dyn_ref::<web_sys::HtmlElement>() {
        let style = html.style();
        style
            .set_property("direction", direction.as_str())
            .map_err(|e| js_error("set direction style failed", e))?;
        style
            .set_property("text-align", direction.text_align())
            .map_err(|e| js_error("set text-align style failed", e))?;
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn added_elements(records: &js_sys::Array) -> Vec<web_sys::Element> {
    let mut elements = Vec::new();
    for record in records.iter() {
        let Ok(record) = record.dyn_into::<web_sys::MutationRecord>() else {
            continue;
        };
        if record.type_() != "childList" {
            continue;
        }
        let nodes = record.added_nodes();
        for index in 0..nodes.length() {
            let Some(node) = nodes.get(index) else {
                continue;
            };
            if node.node_type() != web_sys::Node::ELEMENT_NODE {
                continue;
            }
            if let Ok(element) = node.dyn_into::<web_sys::Element>() {
                elements.push(element);
            }
        }
    }
    elements
}

#[cfg(not(target_arch = "wasm32"))]
fn unsupported() -> String {
    "document APIs are only available when compiled for wasm32".to_string()
}

impl DocumentSurface for WebDocument {
    type Element = web_sys::Element;

    fn page_url(&self) -> Result<String, String> {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::window()
                .ok_or_else(|| "window unavailable".to_string())?
                .location()
                .href()
                .map_err(|e| js_error("location.href failed", e))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Err(unsupported())
        }
    }

    fn root_direction_attr(&self) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            document().ok()?.document_element()?.get_attribute("dir")
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            None
        }
    }

    fn apply_root_direction(&self, direction: TextDirection) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let root = document()?
                .document_element()
                .ok_or_else(|| "document root unavailable".to_string())?;
            force_direction(&root, direction)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = direction;
            Err(unsupported())
        }
    }

    fn apply_body_direction(&self, direction: TextDirection) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let body = document()?
                .body()
                .ok_or_else(|| "document body unavailable".to_string())?;
            force_direction(&body, direction)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = direction;
            Err(unsupported())
        }
    }

    fn element_has_dir(&self, element: &Self::Element) -> Result<bool, String> {
        #[cfg(target_arch = "wasm32")]
        {
            Ok(element.has_attribute("dir"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = element;
            Err(unsupported())
        }
    }

    fn set_element_dir(&self, element: &Self::Element, dir: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            element
                .set_attribute("dir", dir)
                .map_err(|e| js_error("set dir failed", e))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (element, dir);
            Err(unsupported())
        }
    }

    fn observe_added_elements(
        &self,
        callback: AddedElementsCallback<Self::Element>,
    ) -> Result<Box<dyn MutationSubscription>, String> {
        #[cfg(target_arch = "wasm32")]
        {
            let body = document()?
                .body()
                .ok_or_else(|| "document body unavailable".to_string())?;

            let mut callback = callback;
            let on_mutations: Box<dyn FnMut(js_sys::Array, web_sys::MutationObserver)> =
                Box::new(move |records, _observer| {
                    let elements = added_elements(&records);
                    if !elements.is_empty() {
                        callback(elements);
                    }
                });
            let closure = Closure::wrap(on_mutations);

            let observer = web_sys::MutationObserver::new(closure.as_ref().unchecked_ref())
                .map_err(|e| js_error("MutationObserver construction failed", e))?;
            let options = web_sys::MutationObserverInit::new();
            options.set_child_list(true);
            options.set_subtree(true);
            observer
                .observe_with_options(&body, &options)
                .map_err(|e| js_error("MutationObserver.observe failed", e))?;

            Ok(Box::new(WebMutationSubscription {
                observer: Some(observer),
                closure: Some(closure),
            }))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = callback;
            Err(unsupported())
        }
    }
}

#[cfg(target_arch = "wasm32")]
struct WebMutationSubscription {
    observer: Option<web_sys::MutationObserver>,
    // Kept alive for as long as the observer may call into it.
    closure: Option<Closure<dyn FnMut(js_sys::Array, web_sys::MutationObserver)>>,
}

#[cfg(target_arch = "wasm32")]
impl MutationSubscription for WebMutationSubscription {
    fn disconnect(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
        self.closure = None;
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for WebMutationSubscription {
    fn drop(&mut self) {
        self.disconnect();
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use direction_host::{ApplierState, DirectionApplier, MemoryStorageProvider, StorageSelector};
    use direction_host::{DirectionRecord, DirectionRepository, StorageDirectionRepository};
    use futures::executor::block_on;
    use std::rc::Rc;

    #[test]
    fn native_document_reports_unsupported_without_panicking() {
        let document = WebDocument;
        assert!(document.page_url().is_err());
        assert_eq!(document.root_direction_attr(), None);
        assert!(document.apply_root_direction(TextDirection::Rtl).is_err());
        assert!(document
            .observe_added_elements(Box::new(|_elements| {}))
            .is_err());
    }

    #[test]
    fn applier_over_native_document_stays_idle() {
        let repository = StorageDirectionRepository::new(
            Rc::new(StorageSelector::default().with_provider(MemoryStorageProvider::default())),
            "direction-configs",
        );
        let record = DirectionRecord::new("rtl", true, true, vec!["example.com".to_string()]);
        block_on(repository.save(&record));

        let applier = DirectionApplier::new(Rc::new(WebDocument));
        assert_eq!(block_on(applier.run(&repository)), ApplierState::Idle);
    }
}
