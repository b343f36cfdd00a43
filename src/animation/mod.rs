mod mapping;
mod timing;

pub use mapping::{animation_map, animation_map_eased};
pub use timing::TimingFunction;

use crate::theme::Theme;

/// The values a host needs to animate a collapse: the target content height
/// and the timing of the height transition.
///
/// All three fields come from a single measured height, so they are always
/// mutually consistent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Content height in pixels
    pub height_px: f32,
    /// Duration of the height transition in milliseconds
    pub duration_ms: f32,
    /// Delay before the transition starts in milliseconds
    pub delay_ms: f32,
}

impl Transition {
    /// Derive the transition for content of `height` pixels.
    ///
    /// The delay is whatever the duration exceeds the theme's base duration
    /// by: zero for short content, growing with height.
    pub fn for_height(height: f32, theme: &Theme) -> Self {
        let duration_ms = theme.duration_for(height);
        Self {
            height_px: height,
            duration_ms,
            delay_ms: duration_ms - theme.duration_base_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{DURATION_BASE_MS, DURATION_SLOWER_MS};

    #[test]
    fn test_short_content_has_no_delay() {
        let transition = Transition::for_height(0.0, &Theme::default());
        assert_eq!(transition.height_px, 0.0);
        assert_eq!(transition.duration_ms, DURATION_BASE_MS);
        assert_eq!(transition.delay_ms, 0.0);
    }

    #[test]
    fn test_tall_content_uses_slower_duration() {
        let transition = Transition::for_height(1000.0, &Theme::default());
        assert_eq!(transition.duration_ms, DURATION_SLOWER_MS);
        assert_eq!(transition.delay_ms, DURATION_SLOWER_MS - DURATION_BASE_MS);
    }

    #[test]
    fn test_delay_tracks_duration() {
        let theme = Theme::default();
        for height in [150.0, 151.0, 300.0, 640.0, 999.0, 1000.0, 4096.0] {
            let transition = Transition::for_height(height, &theme);
            assert_eq!(transition.delay_ms, transition.duration_ms - DURATION_BASE_MS);
        }
    }
}
