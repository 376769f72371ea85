use serde::{Deserialize, Serialize};

use crate::core::primitives::safe_divisor;

/// Point in drawing-surface space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Unit direction of an axis whose angle is measured clockwise from "up".
#[must_use]
pub fn axis_unit_vector(angle_degrees: f64) -> (f64, f64) {
    let radians = (angle_degrees - 90.0).to_radians();
    (radians.cos(), radians.sin())
}

/// Converts a polar position to surface coordinates.
///
/// Angle 0 points up and angles grow clockwise, matching a y-down surface.
#[must_use]
pub fn polar_to_cartesian(center_x: f64, center_y: f64, radius: f64, angle_degrees: f64) -> Point {
    let (dx, dy) = axis_unit_vector(angle_degrees);
    Point::new(center_x + radius * dx, center_y + radius * dy)
}

/// Places `value` along an axis of length `radius` scaled against `max`.
///
/// Values are not clamped here. A zero or non-finite `max` is treated as 1.
#[must_use]
pub fn value_to_coordinate(
    value: f64,
    max: f64,
    radius: f64,
    angle_degrees: f64,
    center_x: f64,
    center_y: f64,
) -> Point {
    let scaled = (value / safe_divisor(max)) * radius;
    polar_to_cartesian(center_x, center_y, scaled, angle_degrees)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn zero_angle_points_up() {
        let p = polar_to_cartesian(100.0, 100.0, 50.0, 0.0);
        assert_relative_eq!(p.x, 100.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn ninety_degrees_points_right() {
        let p = polar_to_cartesian(0.0, 0.0, 10.0, 90.0);
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_max_does_not_produce_nan() {
        let p = value_to_coordinate(5.0, 0.0, 10.0, 0.0, 0.0, 0.0);
        assert!(p.is_finite());
    }
}
