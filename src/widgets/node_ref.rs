//! NodeRef — a widget's handle to the host element it is mounted on.
//!
//! Effects and resize callbacks hold a clone of the ref rather than the
//! element itself, so once the widget unmounts every pending measurement or
//! style write finds the ref empty and does nothing.

use std::cell::RefCell;
use std::rc::Rc;

use crate::platform::HostElement;

#[derive(Clone, Default)]
pub struct NodeRef {
    node: Rc<RefCell<Option<Rc<dyn HostElement>>>>,
}

impl NodeRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// The attached element, if any.
    pub fn get(&self) -> Option<Rc<dyn HostElement>> {
        self.node.borrow().clone()
    }

    pub fn set(&self, element: Rc<dyn HostElement>) {
        *self.node.borrow_mut() = Some(element);
    }

    pub fn clear(&self) {
        self.node.borrow_mut().take();
    }

    pub fn is_attached(&self) -> bool {
        self.node.borrow().is_some()
    }
}
