//! Page-side logic that forces a direction and keeps it in place.
//!
//! States: `Idle` until a matching record is applied, `Applied` once the root and body carry the
//! direction, `Observing` while added elements are being reconciled, and `Invalidated` after the
//! page context ended. `Idle` is permanent for a page load when nothing matches.

mod memory;
mod surface;

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use leptos::logging;

pub use memory::{MemoryDocument, MemoryElementId, StyledNode};
pub use surface::{AddedElementsCallback, DocumentSurface, MutationSubscription};

use crate::{messages::RuntimeMessage, model::TextDirection, repository::DirectionRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Lifecycle of one content-script instance.
pub enum ApplierState {
    /// Injected, nothing applied.
    Idle,
    /// Direction forced on root and body.
    Applied,
    /// Added elements are being reconciled.
    Observing,
    /// Page context ended; every further call is a no-op.
    Invalidated,
}

/// Forces the direction of the first matching record onto a [`DocumentSurface`].
pub struct DirectionApplier<D: DocumentSurface + 'static> {
    surface: Rc<D>,
    live: Rc<Cell<bool>>,
    state: Cell<ApplierState>,
    subscription: RefCell<Option<Box<dyn MutationSubscription>>>,
}

impl<D: DocumentSurface + 'static> DirectionApplier<D> {
    /// Creates an idle applier for `surface`.
    pub fn new(surface: Rc<D>) -> Self {
        Self {
            surface,
            live: Rc::new(Cell::new(true)),
            state: Cell::new(ApplierState::Idle),
            subscription: RefCell::new(None),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ApplierState {
        self.state.get()
    }

    /// `false` once the page context ended.
    pub fn is_live(&self) -> bool {
        self.live.get()
    }

    /// Document this applier drives.
    pub fn surface(&self) -> &D {
        &self.surface
    }

    /// Looks up the first enabled record matching the page and forces its direction.
    ///
    /// Returns the resulting state. A page URL that cannot be read is fatal for this instance and
    /// is not retried.
    pub async fn run(&self, repository: &dyn DirectionRepository) -> ApplierState {
        if !self.is_live() {
            return self.state();
        }

        let records = repository.find_all().await;
        if !self.is_live() {
            return self.state();
        }

        let page_url = match self.surface.page_url() {
            Ok(url) => url,
            Err(err) => {
                logging::error!("direction applier setup failed: {err}");
                return self.state();
            }
        };

        let Some(record) = records
            .into_iter()
            .find(|record| record.enabled() && record.matches_url(&page_url))
        else {
            return self.state();
        };

        self.apply_direction(record.direction());
        self.start_observing();
        self.state()
    }

    /// Writes `direction` onto the document root and body.
    pub fn apply_direction(&self, direction: TextDirection) {
        if !self.is_live() {
            return;
        }
        if let Err(err) = self.surface.apply_root_direction(direction) {
            logging::debug_warn!("applying direction to document root failed: {err}");
        }
        if let Err(err) = self.surface.apply_body_direction(direction) {
            logging::debug_warn!("applying direction to body failed: {err}");
        }
        logging::log!(
            "RTL/LTR Extension: Direction applied - {}",
            direction.as_str().to_ascii_uppercase()
        );
        if self.state() == ApplierState::Idle {
            self.state.set(ApplierState::Applied);
        }
    }

    /// Attaches the added-element observer unless one is already attached.
    pub fn start_observing(&self) {
        if !self.is_live() || self.subscription.borrow().is_some() {
            return;
        }

        let surface = Rc::downgrade(&self.surface);
        let live = self.live.clone();
        let callback: AddedElementsCallback<D::Element> = Box::new(move |elements| {
            if !live.get() {
                return;
            }
            if let Some(surface) = surface.upgrade() {
                reassert_direction(surface.as_ref(), &elements);
            }
        });

        match self.surface.observe_added_elements(callback) {
            Ok(subscription) => {
                *self.subscription.borrow_mut() = Some(subscription);
                self.state.set(ApplierState::Observing);
            }
            Err(err) => logging::error!("failed to start direction observer: {err}"),
        }
    }

    /// Handles a direct popup command.
    pub fn handle_message(&self, message: RuntimeMessage) {
        match message {
            RuntimeMessage::ChangeDirection { direction } => {
                self.apply_direction(direction);
                self.start_observing();
            }
        }
    }

    /// Marks the page context as gone and detaches the observer.
    ///
    /// Idempotent. Pending callbacks and later calls become no-ops.
    pub fn invalidate(&self) {
        self.live.set(false);
        if let Some(mut subscription) = self.subscription.borrow_mut().take() {
            subscription.disconnect();
        }
        self.state.set(ApplierState::Invalidated);
    }
}

/// Rewrites the `dir` attribute of every added element that already carries one so it matches
/// the document root (`ltr` when the root has none).
///
/// Failures on one element are logged and skipped. Returns how many elements were rewritten.
pub fn reassert_direction<D: DocumentSurface + ?Sized>(
    surface: &D,
    elements: &[D::Element],
) -> usize {
    let forced = surface
        .root_direction_attr()
        .unwrap_or_else(|| TextDirection::Ltr.as_str().to_string());

    let mut rewritten = 0;
    for element in elements {
        match surface.element_has_dir(element) {
            Ok(true) => match surface.set_element_dir(element, &forced) {
                Ok(()) => rewritten += 1,
                Err(err) => {
                    logging::debug_warn!("resetting element direction failed: {err}");
                }
            },
            Ok(false) => {}
            Err(err) => {
                logging::debug_warn!("inspecting added element failed: {err}");
            }
        }
    }
    rewritten
}
