use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use super::{HostCapabilities, HostElement, ResizeCallback, ResizeHandle};
use crate::layout::Constraints;
use crate::widgets::{Children, measure_children};

type Listeners = Rc<RefCell<Vec<(u64, ResizeCallback)>>>;

/// An in-memory host element.
///
/// Records attributes and style properties, measures its content at a fixed
/// width and lets callers simulate content size changes. Used by the tests
/// and the demo; a real binding would forward the same calls to its toolkit.
pub struct HeadlessElement {
    capabilities: HostCapabilities,
    width: Cell<f32>,
    content: RefCell<Children>,
    content_height: Cell<f32>,
    attributes: RefCell<BTreeMap<String, String>>,
    style: RefCell<BTreeMap<String, String>>,
    listeners: Listeners,
    next_listener_id: Cell<u64>,
    registrations: Cell<usize>,
    style_writes: Cell<usize>,
}

impl HeadlessElement {
    pub fn new() -> Self {
        Self {
            capabilities: HostCapabilities::all(),
            width: Cell::new(320.0),
            content: RefCell::new(Vec::new()),
            content_height: Cell::new(0.0),
            attributes: RefCell::new(BTreeMap::new()),
            style: RefCell::new(BTreeMap::new()),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_listener_id: Cell::new(0),
            registrations: Cell::new(0),
            style_writes: Cell::new(0),
        }
    }

    pub fn width(self, width: f32) -> Self {
        self.width.set(width);
        self
    }

    /// Simulate a host that cannot observe content resizes.
    pub fn without_resize_observer(mut self) -> Self {
        self.capabilities.remove(HostCapabilities::RESIZE_OBSERVER);
        self
    }

    /// Simulate a host that ignores inline custom properties.
    pub fn without_style_properties(mut self) -> Self {
        self.capabilities.remove(HostCapabilities::STYLE_PROPERTIES);
        self
    }

    /// Change the content's natural height as if it had reflowed on its own,
    /// then notify resize observers.
    pub fn resize_content(&self, height: f32) {
        if self.content_height.replace(height) != height {
            self.notify_resize();
        }
    }

    /// Change the element's width, re-measuring the current content.
    pub fn set_width(&self, width: f32) {
        self.width.set(width);
        let height = self.measure();
        self.resize_content(height);
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    pub fn style_property(&self, name: &str) -> Option<String> {
        self.style.borrow().get(name).cloned()
    }

    /// Number of currently registered resize callbacks.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Number of resize registrations ever made.
    pub fn registration_count(&self) -> usize {
        self.registrations.get()
    }

    /// Number of `set_style_properties` calls received.
    pub fn style_write_count(&self) -> usize {
        self.style_writes.get()
    }

    fn measure(&self) -> f32 {
        measure_children(
            &self.content.borrow(),
            Constraints::for_width(self.width.get()),
        )
        .height
    }

    fn notify_resize(&self) {
        // Callbacks re-enter the element to measure it
        let callbacks: Vec<ResizeCallback> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in callbacks {
            callback();
        }
    }
}

impl Default for HeadlessElement {
    fn default() -> Self {
        Self::new()
    }
}

impl HostElement for HeadlessElement {
    fn capabilities(&self) -> HostCapabilities {
        self.capabilities
    }

    fn render_content(&self, children: &Children) {
        *self.content.borrow_mut() = children.clone();
        self.content_height.set(self.measure());
    }

    fn scroll_height(&self) -> f32 {
        self.content_height.get()
    }

    fn on_resize(&self, callback: ResizeCallback) -> Option<ResizeHandle> {
        if !self.capabilities.contains(HostCapabilities::RESIZE_OBSERVER) {
            return None;
        }

        let id = self.next_listener_id.get();
        self.next_listener_id.set(id + 1);
        self.registrations.set(self.registrations.get() + 1);
        self.listeners.borrow_mut().push((id, callback));

        let listeners = Rc::downgrade(&self.listeners);
        Some(ResizeHandle::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.borrow_mut().retain(|(other, _)| *other != id);
            }
        }))
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn set_style_properties(&self, properties: &[(&str, String)]) {
        if !self.capabilities.contains(HostCapabilities::STYLE_PROPERTIES) {
            return;
        }
        self.style_writes.set(self.style_writes.get() + 1);
        let mut style = self.style.borrow_mut();
        for (name, value) in properties {
            style.insert((*name).to_string(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{IntoChild, block, text};

    #[test]
    fn test_render_content_measures_at_width() {
        let host = HeadlessElement::new().width(100.0);
        let children: Children = vec![
            block(40.0).into_child(),
            text("a".repeat(30)).line_height(20.0).into_child(),
        ];
        host.render_content(&children);

        // 30 chars at 8px per char over 100px wraps into 3 lines
        assert_eq!(host.scroll_height(), 40.0 + 60.0);
    }

    #[test]
    fn test_resize_notifies_until_cancelled() {
        let host = HeadlessElement::new();
        let calls = Rc::new(Cell::new(0));

        let counter = calls.clone();
        let handle = host
            .on_resize(Rc::new(move || counter.set(counter.get() + 1)))
            .expect("resize observer supported");

        host.resize_content(120.0);
        host.resize_content(120.0);
        assert_eq!(calls.get(), 1);

        handle.cancel();
        assert_eq!(host.listener_count(), 0);
        host.resize_content(80.0);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_set_width_reflows_content() {
        let host = HeadlessElement::new().width(80.0);
        host.render_content(&vec![text("a".repeat(20)).line_height(10.0).into_child()]);
        assert_eq!(host.scroll_height(), 20.0);

        host.set_width(160.0);
        assert_eq!(host.scroll_height(), 10.0);
    }

    #[test]
    fn test_missing_capabilities() {
        let host = HeadlessElement::new()
            .without_resize_observer()
            .without_style_properties();
        assert!(host.on_resize(Rc::new(|| {})).is_none());

        host.set_style_properties(&[("--x", "1px".to_string())]);
        assert_eq!(host.style_property("--x"), None);
        assert_eq!(host.style_write_count(), 0);
    }
}
