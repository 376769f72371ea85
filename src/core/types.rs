use serde::{Deserialize, Serialize};

use crate::core::geometry::Point;

/// Size of the drawing surface a chart is laid out on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    #[must_use]
    pub fn shorter_side(self) -> f64 {
        f64::from(self.width.min(self.height))
    }
}
