use crate::animation::{TimingFunction, animation_map_eased};
use crate::reactive::{Signal, use_context, with_context};
use crate::tokens::{
    COLLAPSE_MAX_HEIGHT, COLLAPSE_MIN_HEIGHT, DURATION_BASE_MS, DURATION_SLOWER_MS,
};

/// Motion settings consumed by animated widgets.
///
/// Defaults come from the design tokens. An [`AppProvider`] stores the theme
/// as a `Signal<Theme>` context; widgets can also take one explicitly.
///
/// [`AppProvider`]: crate::app::AppProvider
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub duration_base_ms: f32,
    pub duration_slower_ms: f32,
    /// Heights at or below this use `duration_base_ms`
    pub collapse_min_height: f32,
    /// Heights at or above this use `duration_slower_ms`
    pub collapse_max_height: f32,
    pub easing: TimingFunction,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            duration_base_ms: DURATION_BASE_MS,
            duration_slower_ms: DURATION_SLOWER_MS,
            collapse_min_height: COLLAPSE_MIN_HEIGHT,
            collapse_max_height: COLLAPSE_MAX_HEIGHT,
            easing: TimingFunction::Linear,
        }
    }
}

impl Theme {
    pub fn durations(mut self, base_ms: f32, slower_ms: f32) -> Self {
        self.duration_base_ms = base_ms;
        self.duration_slower_ms = slower_ms;
        self
    }

    pub fn collapse_bounds(mut self, min_height: f32, max_height: f32) -> Self {
        self.collapse_min_height = min_height;
        self.collapse_max_height = max_height;
        self
    }

    pub fn easing(mut self, easing: TimingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Transition duration in milliseconds for content of `height` pixels.
    pub fn duration_for(&self, height: f32) -> f32 {
        animation_map_eased(
            height,
            self.collapse_min_height,
            self.collapse_max_height,
            self.duration_base_ms,
            self.duration_slower_ms,
            &self.easing,
        )
    }

    /// The theme currently in context.
    ///
    /// Prefers a provided `Signal<Theme>` (reading it subscribes the running
    /// effect), then a plain `Theme`, then the token defaults.
    pub fn current() -> Theme {
        if let Some(signal) = use_context::<Signal<Theme>>() {
            return signal.get();
        }
        with_context::<Theme, _>(Theme::clone).unwrap_or_default()
    }
}
