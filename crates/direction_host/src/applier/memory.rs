//! In-memory document used by tests and by hosts without a real DOM.

use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use super::surface::{AddedElementsCallback, DocumentSurface, MutationSubscription};
use crate::model::TextDirection;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Direction-related attribute and inline style values of a node.
pub struct StyledNode {
    /// `dir` attribute.
    pub dir: Option<String>,
    /// Inline `direction` style.
    pub direction_style: Option<String>,
    /// Inline `text-align` style.
    pub text_align_style: Option<String>,
}

impl StyledNode {
    fn apply(&mut self, direction: TextDirection) {
        self.dir = Some(direction.as_str().to_string());
        self.direction_style = Some(direction.as_str().to_string());
        self.text_align_style = Some(direction.text_align().to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Index of an element inserted into a [`MemoryDocument`].
pub struct MemoryElementId(pub usize);

#[derive(Debug, Default)]
struct MemoryElement {
    dir: Option<String>,
    failing: bool,
}

type SharedCallback = Rc<RefCell<AddedElementsCallback<MemoryElementId>>>;

#[derive(Default)]
struct DocumentState {
    url: String,
    root: StyledNode,
    body: Option<StyledNode>,
    elements: Vec<MemoryElement>,
    observers: Vec<(u64, SharedCallback)>,
    next_observer_id: u64,
    fail_next: bool,
}

#[derive(Clone)]
/// Document whose mutations are delivered synchronously to observers on insert.
///
/// Clones share the same document.
pub struct MemoryDocument {
    state: Rc<RefCell<DocumentState>>,
}

impl MemoryDocument {
    /// Creates a document at `url` with an empty body.
    pub fn new(url: impl Into<String>) -> Self {
        let document = Self::without_body(url);
        document.state.borrow_mut().body = Some(StyledNode::default());
        document
    }

    /// Creates a document at `url` that has no body element yet.
    pub fn without_body(url: impl Into<String>) -> Self {
        Self {
            state: Rc::new(RefCell::new(DocumentState {
                url: url.into(),
                ..DocumentState::default()
            })),
        }
    }

    /// Snapshot of the document root.
    pub fn root(&self) -> StyledNode {
        self.state.borrow().root.clone()
    }

    /// Snapshot of the body, if present.
    pub fn body(&self) -> Option<StyledNode> {
        self.state.borrow().body.clone()
    }

    /// `dir` attribute of an inserted element.
    pub fn element_dir(&self, id: MemoryElementId) -> Option<String> {
        self.state
            .borrow()
            .elements
            .get(id.0)
            .and_then(|element| element.dir.clone())
    }

    /// Number of attached observers.
    pub fn observer_count(&self) -> usize {
        self.state.borrow().observers.len()
    }

    /// Makes the next inserted element reject every attribute access.
    pub fn fail_next_element(&self) {
        self.state.borrow_mut().fail_next = true;
    }

    /// Inserts one element, as a page script would, and notifies observers.
    pub fn insert_element(&self, dir: Option<&str>) -> MemoryElementId {
        self.insert_elements(&[dir])[0]
    }

    /// Inserts a batch of elements delivered to observers as a single mutation batch.
    pub fn insert_elements(&self, dirs: &[Option<&str>]) -> Vec<MemoryElementId> {
        let ids = {
            let mut state = self.state.borrow_mut();
            let mut ids = Vec::with_capacity(dirs.len());
            for dir in dirs {
                let failing = std::mem::take(&mut state.fail_next);
                state.elements.push(MemoryElement {
                    dir: dir.map(str::to_string),
                    failing,
                });
                ids.push(MemoryElementId(state.elements.len() - 1));
            }
            ids
        };
        if self.state.borrow().body.is_some() {
            self.deliver(&ids);
        }
        ids
    }

    fn deliver(&self, ids: &[MemoryElementId]) {
        let observers: Vec<(u64, SharedCallback)> = self.state.borrow().observers.clone();
        for (observer_id, callback) in observers {
            let still_attached = self
                .state
                .borrow()
                .observers
                .iter()
                .any(|(id, _)| *id == observer_id);
            if still_attached {
                let mut callback = callback.borrow_mut();
                (&mut *callback)(ids.to_vec());
            }
        }
    }

    fn with_element<T>(
        &self,
        id: MemoryElementId,
        f: impl FnOnce(&mut MemoryElement) -> T,
    ) -> Result<T, String> {
        let mut state = self.state.borrow_mut();
        let element = state
            .elements
            .get_mut(id.0)
            .ok_or_else(|| format!("element {} does not exist", id.0))?;
        if element.failing {
            return Err(format!("element {} is detached", id.0));
        }
        Ok(f(element))
    }
}

struct MemorySubscription {
    observer_id: u64,
    state: Weak<RefCell<DocumentState>>,
    connected: Cell<bool>,
}

impl MutationSubscription for MemorySubscription {
    fn disconnect(&mut self) {
        if !self.connected.replace(false) {
            return;
        }
        if let Some(state) = self.state.upgrade() {
            state
                .borrow_mut()
                .observers
                .retain(|(id, _)| *id != self.observer_id);
        }
    }
}

impl DocumentSurface for MemoryDocument {
    type Element = MemoryElementId;

    fn page_url(&self) -> Result<String, String> {
        Ok(self.state.borrow().url.clone())
    }

    fn root_direction_attr(&self) -> Option<String> {
        self.state.borrow().root.dir.clone()
    }

    fn apply_root_direction(&self, direction: TextDirection) -> Result<(), String> {
        self.state.borrow_mut().root.apply(direction);
        Ok(())
    }

    fn apply_body_direction(&self, direction: TextDirection) -> Result<(), String> {
        let mut state = self.state.borrow_mut();
        let body = state
            .body
            .as_mut()
            .ok_or_else(|| "document body unavailable".to_string())?;
        body.apply(direction);
        Ok(())
    }

    fn element_has_dir(&self, element: &MemoryElementId) -> Result<bool, String> {
        self.with_element(*element, |el| el.dir.is_some())
    }

    fn set_element_dir(&self, element: &MemoryElementId, dir: &str) -> Result<(), String> {
        self.with_element(*element, |el| el.dir = Some(dir.to_string()))
    }

    fn observe_added_elements(
        &self,
        callback: AddedElementsCallback<MemoryElementId>,
    ) -> Result<Box<dyn MutationSubscription>, String> {
        let mut state = self.state.borrow_mut();
        if state.body.is_none() {
            return Err("document body unavailable".to_string());
        }
        let observer_id = state.next_observer_id;
        state.next_observer_id += 1;
        state
            .observers
            .push((observer_id, Rc::new(RefCell::new(callback))));
        Ok(Box::new(MemorySubscription {
            observer_id,
            state: Rc::downgrade(&self.state),
            connected: Cell::new(true),
        }))
    }
}
