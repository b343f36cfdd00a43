//! Sizes and constraints used to measure content.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min_width: f32,
    pub min_height: f32,
    pub max_width: f32,
    pub max_height: f32,
}

impl Constraints {
    /// Bounded horizontally, free to grow vertically. This is how content is
    /// measured for its scroll height: clipping never shortens it.
    pub fn for_width(width: f32) -> Self {
        Self {
            min_width: 0.0,
            min_height: 0.0,
            max_width: width.max(0.0),
            max_height: f32::INFINITY,
        }
    }

    pub fn constrain(&self, size: Size) -> Size {
        Size {
            width: size.width.max(self.min_width).min(self.max_width),
            height: size.height.max(self.min_height).min(self.max_height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_width_leaves_height_unbounded() {
        let c = Constraints::for_width(320.0);
        let size = c.constrain(Size::new(500.0, 5000.0));
        assert_eq!(size, Size::new(320.0, 5000.0));
    }

    #[test]
    fn test_constrain_applies_minimums() {
        let c = Constraints {
            min_width: 10.0,
            min_height: 20.0,
            ..Constraints::for_width(100.0)
        };
        assert_eq!(c.constrain(Size::zero()), Size::new(10.0, 20.0));
    }
}
