//! Renderable content placed inside widgets.
//!
//! Content only needs to report its size for a set of constraints; the host
//! decides how it is actually drawn.

use std::rc::Rc;

use crate::layout::{Constraints, Size};

/// Average glyph advance used to wrap text, in pixels.
const CHAR_WIDTH: f32 = 8.0;
const DEFAULT_LINE_HEIGHT: f32 = 20.0;

pub trait Content {
    fn measure(&self, constraints: Constraints) -> Size;
}

/// A shared handle to a piece of content.
#[derive(Clone)]
pub struct Child(Rc<dyn Content>);

impl Child {
    pub fn measure(&self, constraints: Constraints) -> Size {
        self.0.measure(constraints)
    }
}

pub type Children = Vec<Child>;

pub trait IntoChild {
    fn into_child(self) -> Child;
}

impl<T: Content + 'static> IntoChild for T {
    fn into_child(self) -> Child {
        Child(Rc::new(self))
    }
}

impl IntoChild for Child {
    fn into_child(self) -> Child {
        self
    }
}

/// Stack `children` vertically and return the size of the stack.
pub fn measure_children(children: &[Child], constraints: Constraints) -> Size {
    let size = children.iter().fold(Size::zero(), |acc, child| {
        let child_size = child.measure(constraints);
        Size::new(acc.width.max(child_size.width), acc.height + child_size.height)
    });
    constraints.constrain(size)
}

/// A fixed-height block that fills the available width.
pub struct Block {
    height: f32,
}

pub fn block(height: f32) -> Block {
    Block {
        height: height.max(0.0),
    }
}

impl Content for Block {
    fn measure(&self, constraints: Constraints) -> Size {
        let width = if constraints.max_width.is_finite() {
            constraints.max_width
        } else {
            0.0
        };
        constraints.constrain(Size::new(width, self.height))
    }
}

/// Text wrapped at the available width.
pub struct Text {
    content: String,
    line_height: f32,
}

pub fn text(content: impl Into<String>) -> Text {
    Text {
        content: content.into(),
        line_height: DEFAULT_LINE_HEIGHT,
    }
}

impl Text {
    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height.max(0.0);
        self
    }

    fn line_count(&self, max_width: f32) -> usize {
        let chars_per_line = ((max_width / CHAR_WIDTH).floor() as usize).max(1);
        self.content
            .lines()
            .map(|line| line.chars().count().div_ceil(chars_per_line).max(1))
            .sum()
    }
}

impl Content for Text {
    fn measure(&self, constraints: Constraints) -> Size {
        let lines = self.line_count(constraints.max_width);
        let longest = self
            .content
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let width = (longest as f32 * CHAR_WIDTH).min(constraints.max_width);
        constraints.constrain(Size::new(width, lines as f32 * self.line_height))
    }
}

/// A vertical stack of children separated by `spacing`.
pub struct Column {
    children: Children,
    spacing: f32,
}

pub fn column(children: Children) -> Column {
    Column {
        children,
        spacing: 0.0,
    }
}

impl Column {
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing.max(0.0);
        self
    }
}

impl Content for Column {
    fn measure(&self, constraints: Constraints) -> Size {
        let gaps = self.children.len().saturating_sub(1) as f32 * self.spacing;
        let stacked = measure_children(&self.children, Constraints::for_width(constraints.max_width));
        constraints.constrain(Size::new(stacked.width, stacked.height + gaps))
    }
}
