//! Design tokens shared by the component library.
//!
//! Durations are in milliseconds, lengths in logical pixels.

pub const DURATION_BASE_MS: f32 = 200.0;
pub const DURATION_SLOWER_MS: f32 = 400.0;

/// Content at or below this height animates in [`DURATION_BASE_MS`].
pub const COLLAPSE_MIN_HEIGHT: f32 = 150.0;
/// Content at or above this height animates in [`DURATION_SLOWER_MS`].
pub const COLLAPSE_MAX_HEIGHT: f32 = 1000.0;
