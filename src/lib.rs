//! A reactive expand/collapse container.
//!
//! [`Collapsible`](widgets::Collapsible) measures its content through a
//! [`HostElement`](platform::HostElement), derives a transition duration from
//! the measured height and hands height, duration and delay to the host as
//! custom style properties.

pub mod animation;
pub mod app;
pub mod layout;
pub mod platform;
pub mod reactive;
pub mod theme;
pub mod tokens;
pub mod utilities;
pub mod widgets;

pub mod prelude {
    pub use crate::animation::{TimingFunction, Transition, animation_map};
    pub use crate::app::{AppConfig, AppProvider, ProviderScope};
    pub use crate::layout::{Constraints, Size};
    pub use crate::platform::{HeadlessElement, HostCapabilities, HostElement, ResizeHandle};
    pub use crate::reactive::{
        IntoMaybeDyn, MaybeDyn, Signal, batch, create_effect, create_signal, on_cleanup,
        use_context,
    };
    pub use crate::theme::Theme;
    pub use crate::widgets::{
        Collapsible, Content, IntoChild, NodeRef, block, column, text,
    };
}
