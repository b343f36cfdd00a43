//! Collapsible — an expand/collapse container with a height transition.
//!
//! The widget measures the natural height of its content and hands the host
//! three custom properties: the height itself, a transition duration that
//! grows with the height, and a delay that is whatever that duration exceeds
//! the base duration by. The host stylesheet animates between the collapsed
//! and open states with them.
//!
//! ```ignore
//! let expanded = create_signal(false);
//!
//! let mut details = Collapsible::new("order-details")
//!     .open(expanded.clone())
//!     .child(text("Shipped in two packages"));
//! details.mount(host);
//!
//! expanded.set(true); // aria-hidden="false", class="Collapsible open"
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::Transition;
use crate::platform::{HostCapabilities, HostElement, ResizeCallback};
use crate::reactive::{
    IntoMaybeDyn, MaybeDyn, OwnerId, Signal, create_effect, create_signal, dispose_owner,
    on_cleanup, untrack, with_owner,
};
use crate::theme::Theme;
use crate::utilities::css::{class_names, ms, px};

use super::content::{Children, IntoChild};
use super::node_ref::NodeRef;

pub const CSS_VAR_COLLAPSIBLE_HEIGHT: &str = "--polaris-collapsible-height";
pub const CSS_VAR_COLLAPSIBLE_TRANSITION_DURATION: &str =
    "--polaris-collapsible-transition-duration";
pub const CSS_VAR_COLLAPSIBLE_TRANSITION_DELAY: &str = "--polaris-collapsible-transition-delay";

pub const CLASS_NAME: &str = "Collapsible";
pub const OPEN_CLASS_NAME: &str = "open";

/// Transition duration in milliseconds for content of `height` pixels,
/// using the default design tokens.
pub fn duration(height: f32) -> f32 {
    Theme::default().duration_for(height)
}

/// The custom properties projected for `transition`, in write order.
pub fn style_properties(transition: &Transition) -> [(&'static str, String); 3] {
    [
        (CSS_VAR_COLLAPSIBLE_HEIGHT, px(transition.height_px)),
        (
            CSS_VAR_COLLAPSIBLE_TRANSITION_DURATION,
            ms(transition.duration_ms),
        ),
        (CSS_VAR_COLLAPSIBLE_TRANSITION_DELAY, ms(transition.delay_ms)),
    ]
}

pub struct Collapsible {
    id: String,
    open_prop: Rc<RefCell<MaybeDyn<bool>>>,
    open_prop_revision: Signal<u64>,
    open: Signal<bool>,
    children: Rc<RefCell<Children>>,
    theme: Option<Theme>,
    height: Signal<Option<f32>>,
    node: NodeRef,
    handle_resize: ResizeCallback,
    scope: Option<OwnerId>,
}

impl Collapsible {
    /// Create a closed, empty collapsible.
    ///
    /// `id` is written verbatim to the host element; pass the same value to
    /// the trigger's `aria-controls`.
    pub fn new(id: impl Into<String>) -> Self {
        let node = NodeRef::new();
        let height = create_signal(None);

        // One handler per instance, so its identity never changes
        let handle_resize: ResizeCallback = {
            let node = node.clone();
            let height = height.clone();
            Rc::new(move || {
                let Some(element) = node.get() else {
                    return;
                };
                let measured = element.scroll_height();
                log::trace!("collapsible content resized to {measured}px");
                height.set(Some(measured));
            })
        };

        Self {
            id: id.into(),
            open_prop: Rc::new(RefCell::new(MaybeDyn::Static(false))),
            open_prop_revision: create_signal(0),
            open: create_signal(false),
            children: Rc::new(RefCell::new(Vec::new())),
            theme: None,
            height,
            node,
            handle_resize,
            scope: None,
        }
    }

    /// Whether the content is expanded. Accepts a bool, a signal or a closure.
    pub fn open(self, open: impl IntoMaybeDyn<bool>) -> Self {
        self.set_open(open);
        self
    }

    pub fn child(self, child: impl IntoChild) -> Self {
        self.children.borrow_mut().push(child.into_child());
        self
    }

    pub fn children<I>(self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoChild,
    {
        self.children
            .borrow_mut()
            .extend(children.into_iter().map(IntoChild::into_child));
        self
    }

    /// Use `theme` instead of the one provided through context.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Replace the `open` input. Effects re-run only if the resolved value
    /// differs from the current one.
    ///
    /// The input is resolved untracked, so calling this from inside an effect
    /// does not subscribe that effect to it.
    pub fn set_open(&self, open: impl IntoMaybeDyn<bool>) {
        *self.open_prop.borrow_mut() = open.into_maybe_dyn();
        let value = untrack(|| self.open_prop.borrow().get());
        self.open.set(value);
        self.open_prop_revision.update(|revision| *revision += 1);
    }

    /// Replace the content and re-measure. The resize registration is kept.
    pub fn set_children<I>(&self, children: I)
    where
        I: IntoIterator,
        I::Item: IntoChild,
    {
        *self.children.borrow_mut() = children.into_iter().map(IntoChild::into_child).collect();
        let Some(element) = self.node.get() else {
            return;
        };
        element.render_content(&self.children.borrow());
        (self.handle_resize)();
    }

    /// Attach to `host` and start tracking it.
    ///
    /// Mounting an already mounted collapsible moves it to the new host.
    pub fn mount(&mut self, host: Rc<dyn HostElement>) {
        if self.scope.is_some() {
            self.unmount();
        }

        if !host.capabilities().contains(HostCapabilities::STYLE_PROPERTIES) {
            log::warn!(
                "host for collapsible `{}` ignores custom properties, it will not animate",
                self.id
            );
        }

        self.node.set(host.clone());
        host.render_content(&self.children.borrow());

        let ((), scope) = with_owner(|| {
            self.bind_open_prop();
            self.project_attributes();
            self.observe_content();
            self.project_style();
        });
        self.scope = Some(scope);

        log::debug!(
            "mounted collapsible `{}` (open: {}, height: {:?})",
            self.id,
            self.open.get_untracked(),
            self.height.get_untracked()
        );
    }

    /// Detach from the host, releasing the resize registration. Safe to call
    /// when not mounted.
    pub fn unmount(&mut self) {
        let Some(scope) = self.scope.take() else {
            return;
        };
        dispose_owner(scope);
        self.node.clear();
        log::debug!("unmounted collapsible `{}`", self.id);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_open(&self) -> bool {
        self.open.get_untracked()
    }

    pub fn is_mounted(&self) -> bool {
        self.node.is_attached()
    }

    /// Last measured content height; `None` before the first measurement.
    pub fn height(&self) -> Option<f32> {
        self.height.get_untracked()
    }

    /// The transition derived from the last measured height.
    pub fn transition(&self) -> Transition {
        let theme = self.theme.clone().unwrap_or_else(Theme::current);
        Transition::for_height(self.height.get_untracked().unwrap_or(0.0), &theme)
    }

    pub fn class_name(&self) -> String {
        class_names(&[
            Some(CLASS_NAME),
            self.is_open().then_some(OPEN_CLASS_NAME),
        ])
    }

    /// The resize handler registered with the host. The same callback is
    /// returned for the lifetime of the widget.
    pub fn resize_handler(&self) -> ResizeCallback {
        self.handle_resize.clone()
    }

    fn bind_open_prop(&self) {
        let prop = self.open_prop.clone();
        let revision = self.open_prop_revision.clone();
        let open = self.open.clone();

        // Effects below belong to the mount scope, not to their handles
        create_effect(move || {
            revision.get();
            let value = prop.borrow().get();
            open.set(value);
        });
    }

    fn project_attributes(&self) {
        let id = self.id.clone();
        let open = self.open.clone();
        let node = self.node.clone();

        create_effect(move || {
            let open = open.get();
            let Some(element) = node.get() else {
                return;
            };
            element.set_attribute("id", &id);
            element.set_attribute("aria-hidden", if open { "false" } else { "true" });
            element.set_attribute(
                "class",
                &class_names(&[Some(CLASS_NAME), open.then_some(OPEN_CLASS_NAME)]),
            );
        });
    }

    fn observe_content(&self) {
        let id = self.id.clone();
        let open = self.open.clone();
        let height = self.height.clone();
        let node = self.node.clone();
        let handle_resize = self.handle_resize.clone();

        create_effect(move || {
            open.get();

            let Some(element) = node.get() else {
                return;
            };
            height.set(Some(element.scroll_height()));

            match element.on_resize(handle_resize.clone()) {
                Some(registration) => on_cleanup(move || registration.cancel()),
                None => log::debug!(
                    "host for collapsible `{id}` cannot observe resizes, measuring on updates only"
                ),
            }
        });
    }

    fn project_style(&self) {
        let height = self.height.clone();
        let theme = self.theme.clone();
        let node = self.node.clone();

        create_effect(move || {
            let measured = height.get().unwrap_or(0.0);
            let theme = theme.clone().unwrap_or_else(Theme::current);

            let Some(element) = node.get() else {
                return;
            };
            if !element
                .capabilities()
                .contains(HostCapabilities::STYLE_PROPERTIES)
            {
                return;
            }

            let transition = Transition::for_height(measured, &theme);
            log::trace!(
                "collapsible style: {}px over {}ms after {}ms",
                transition.height_px,
                transition.duration_ms,
                transition.delay_ms
            );
            element.set_style_properties(&style_properties(&transition));
        });
    }
}

impl Drop for Collapsible {
    fn drop(&mut self) {
        self.unmount();
    }
}
