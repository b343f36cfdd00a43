//! The contract between widgets and whatever actually displays them.
//!
//! A widget never touches a concrete element type. It measures, observes and
//! styles its element through [`HostElement`], so the timing logic stays pure
//! and a browser binding, a native toolkit or the in-memory
//! [`HeadlessElement`] can all sit underneath.

mod headless;

pub use headless::HeadlessElement;

use std::rc::Rc;

use bitflags::bitflags;

use crate::widgets::Children;

bitflags! {
    /// Optional features a host element may support.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct HostCapabilities: u8 {
        /// The host reports content size changes through [`HostElement::on_resize`]
        const RESIZE_OBSERVER  = 0b01;
        /// The host accepts inline custom style properties
        const STYLE_PROPERTIES = 0b10;
    }
}

/// Callback invoked by the host after the element's content changed size.
pub type ResizeCallback = Rc<dyn Fn()>;

/// A live resize registration. Cancelling it, or dropping it, removes the
/// callback from the host exactly once.
#[must_use = "dropping a ResizeHandle cancels the registration"]
pub struct ResizeHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl ResizeHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for ResizeHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for ResizeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeHandle")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// A measurable, observable, stylable element owned by one widget.
///
/// All methods take `&self`: the element is shared between the widget and
/// the effects it runs, and hosts are single-threaded.
pub trait HostElement {
    fn capabilities(&self) -> HostCapabilities;

    /// Replace the content of the element's inner wrapper.
    fn render_content(&self, children: &Children);

    /// Full height of the inner wrapper's content, including any part that is
    /// currently clipped by a collapse.
    fn scroll_height(&self) -> f32;

    /// Register `callback` for content size changes.
    ///
    /// Returns `None` when the host cannot observe resizes; callers then rely
    /// on measurements taken at mount and update time.
    fn on_resize(&self, callback: ResizeCallback) -> Option<ResizeHandle>;

    fn set_attribute(&self, name: &str, value: &str);

    /// Write several inline custom properties in one step.
    fn set_style_properties(&self, properties: &[(&str, String)]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_resize_handle_cancels_once() {
        let calls = Rc::new(Cell::new(0));

        let counter = calls.clone();
        let handle = ResizeHandle::new(move || counter.set(counter.get() + 1));
        handle.cancel();
        assert_eq!(calls.get(), 1);

        let counter = calls.clone();
        drop(ResizeHandle::new(move || counter.set(counter.get() + 1)));
        assert_eq!(calls.get(), 2);
    }
}
