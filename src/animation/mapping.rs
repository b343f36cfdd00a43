use super::timing::TimingFunction;

/// Map `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Values at or below `in_min` yield `out_min`, values at or above `in_max`
/// yield `out_max`, anything in between is interpolated linearly. A NaN
/// input yields `out_min`.
pub fn animation_map(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    animation_map_eased(
        value,
        in_min,
        in_max,
        out_min,
        out_max,
        &TimingFunction::Linear,
    )
}

/// Like [`animation_map`], with the normalized progress shaped by `timing`.
pub fn animation_map_eased(
    value: f32,
    in_min: f32,
    in_max: f32,
    out_min: f32,
    out_max: f32,
    timing: &TimingFunction,
) -> f32 {
    if value.is_nan() || value <= in_min {
        return out_min;
    }
    if value >= in_max {
        return out_max;
    }

    let progress = (value - in_min) / (in_max - in_min);
    out_min + (out_max - out_min) * timing.evaluate(progress)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_below_and_above_range() {
        assert_eq!(animation_map(0.0, 150.0, 1000.0, 200.0, 400.0), 200.0);
        assert_eq!(animation_map(150.0, 150.0, 1000.0, 200.0, 400.0), 200.0);
        assert_eq!(animation_map(1000.0, 150.0, 1000.0, 200.0, 400.0), 400.0);
        assert_eq!(animation_map(5000.0, 150.0, 1000.0, 200.0, 400.0), 400.0);
    }

    #[test]
    fn test_interpolates_linearly_inside_range() {
        assert_eq!(animation_map(575.0, 150.0, 1000.0, 200.0, 400.0), 300.0);
        assert_eq!(animation_map(5.0, 0.0, 10.0, 0.0, 1.0), 0.5);
    }

    #[test]
    fn test_nan_maps_to_lower_bound() {
        assert_eq!(animation_map(f32::NAN, 150.0, 1000.0, 200.0, 400.0), 200.0);
    }

    #[test]
    fn test_degenerate_range_is_a_step() {
        assert_eq!(animation_map(9.0, 10.0, 10.0, 1.0, 2.0), 1.0);
        assert_eq!(animation_map(10.5, 10.0, 10.0, 1.0, 2.0), 2.0);
    }

    #[test]
    fn test_easing_keeps_endpoints() {
        let ease = TimingFunction::EaseInOut;
        assert_eq!(animation_map_eased(150.0, 150.0, 1000.0, 200.0, 400.0, &ease), 200.0);
        assert_eq!(animation_map_eased(1000.0, 150.0, 1000.0, 200.0, 400.0, &ease), 400.0);
        let eased = animation_map_eased(300.0, 150.0, 1000.0, 200.0, 400.0, &TimingFunction::EaseIn);
        let linear = animation_map(300.0, 150.0, 1000.0, 200.0, 400.0);
        assert!(eased < linear);
    }
}
