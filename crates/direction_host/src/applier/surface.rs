//! Document abstraction the direction applier drives.

use crate::model::TextDirection;

/// Callback receiving the elements added to the observed subtree in one mutation batch.
pub type AddedElementsCallback<E> = Box<dyn FnMut(Vec<E>)>;

/// Handle to an active mutation subscription.
pub trait MutationSubscription {
    /// Stops delivery. No callback may run once this returns.
    fn disconnect(&mut self);
}

/// The parts of a page document the applier reads and writes.
///
/// Every fallible operation reports failures as strings; the applier decides which of them are
/// fatal.
pub trait DocumentSurface {
    /// Handle to an element delivered by mutation observation.
    type Element;

    /// Full URL of the page.
    fn page_url(&self) -> Result<String, String>;

    /// `dir` attribute currently set on the document root.
    fn root_direction_attr(&self) -> Option<String>;

    /// Sets `dir` plus inline `direction`/`text-align` on the document root.
    fn apply_root_direction(&self, direction: TextDirection) -> Result<(), String>;

    /// Sets `dir` plus inline `direction`/`text-align` on the body.
    fn apply_body_direction(&self, direction: TextDirection) -> Result<(), String>;

    /// Reports whether `element` carries a `dir` attribute.
    fn element_has_dir(&self, element: &Self::Element) -> Result<bool, String>;

    /// Overwrites the `dir` attribute of `element`.
    fn set_element_dir(&self, element: &Self::Element, dir: &str) -> Result<(), String>;

    /// Subscribes to elements added anywhere under the body.
    fn observe_added_elements(
        &self,
        callback: AddedElementsCallback<Self::Element>,
    ) -> Result<Box<dyn MutationSubscription>, String>;
}
