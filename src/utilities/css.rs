//! Helpers for the values widgets hand to a host stylesheet.

/// Join the present class names with single spaces.
///
/// ```
/// use collapsible::utilities::css::class_names;
///
/// assert_eq!(class_names(&[Some("Collapsible"), None]), "Collapsible");
/// assert_eq!(class_names(&[Some("Collapsible"), Some("open")]), "Collapsible open");
/// ```
pub fn class_names(names: &[Option<&str>]) -> String {
    names
        .iter()
        .flatten()
        .filter(|name| !name.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a length in pixels, e.g. `300px`.
pub fn px(value: f32) -> String {
    format!("{}px", normalize(value))
}

/// Format a duration in milliseconds, e.g. `200ms`.
pub fn ms(value: f32) -> String {
    format!("{}ms", normalize(value))
}

// Non-finite values and negative zero never reach the stylesheet
fn normalize(value: f32) -> f32 {
    if value.is_finite() { value + 0.0 } else { 0.0 }
}
