use serde::{Deserialize, Serialize};

use crate::core::geometry::Point;
use crate::core::types::Viewport;
use crate::error::{ChartError, ChartResult};

/// Weights of an alignment triple always add up to this total.
pub const WEIGHT_TOTAL: f64 = 100.0;
pub const DEFAULT_ALIGNMENT_PADDING: f64 = 60.0;
pub const DEFAULT_ALIGNMENT_LABELS: [&str; 3] = ["Mind", "Body", "Soul"];

/// Barycentric weights for the Top (`a`), Right (`b`) and Left (`c`) corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentWeights {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Default for AlignmentWeights {
    fn default() -> Self {
        Self::even_split()
    }
}

impl AlignmentWeights {
    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Integer split used for new charts and degenerate input.
    #[must_use]
    pub const fn even_split() -> Self {
        Self::new(33.0, 33.0, 34.0)
    }

    #[must_use]
    pub fn sum(self) -> f64 {
        self.a + self.b + self.c
    }

    /// Clamps negatives to zero and rescales to [`WEIGHT_TOTAL`].
    ///
    /// Falls back to [`AlignmentWeights::even_split`] when nothing positive remains.
    #[must_use]
    pub fn normalized(self) -> Self {
        let clamp = |value: f64| if value.is_finite() { value.max(0.0) } else { 0.0 };
        let (a, b, c) = (clamp(self.a), clamp(self.b), clamp(self.c));
        let sum = a + b + c;
        if sum <= 0.0 || !sum.is_finite() {
            return Self::even_split();
        }
        Self::new(
            a / sum * WEIGHT_TOTAL,
            b / sum * WEIGHT_TOTAL,
            c / sum * WEIGHT_TOTAL,
        )
    }

    /// Weights as fractions summing to one.
    #[must_use]
    pub fn fractions(self) -> (f64, f64, f64) {
        let normalized = self.normalized();
        (
            normalized.a / WEIGHT_TOTAL,
            normalized.b / WEIGHT_TOTAL,
            normalized.c / WEIGHT_TOTAL,
        )
    }

    /// Whole-percent values for display.
    #[must_use]
    pub fn rounded(self) -> (i64, i64, i64) {
        (
            self.a.round() as i64,
            self.b.round() as i64,
            self.c.round() as i64,
        )
    }

    #[must_use]
    pub fn get(self, corner: AlignmentCorner) -> f64 {
        match corner {
            AlignmentCorner::Top => self.a,
            AlignmentCorner::Right => self.b,
            AlignmentCorner::Left => self.c,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlignmentCorner {
    Top,
    Right,
    Left,
}

impl AlignmentCorner {
    pub const ALL: [AlignmentCorner; 3] = [Self::Top, Self::Right, Self::Left];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Right => 1,
            Self::Left => 2,
        }
    }
}

/// Alignment payload: one label per corner plus the current weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AlignmentChartDataJson")]
pub struct AlignmentChartData {
    labels: [String; 3],
    values: AlignmentWeights,
}

#[derive(Deserialize)]
struct AlignmentChartDataJson {
    labels: [String; 3],
    values: AlignmentWeights,
}

impl TryFrom<AlignmentChartDataJson> for AlignmentChartData {
    type Error = ChartError;

    fn try_from(raw: AlignmentChartDataJson) -> ChartResult<Self> {
        Self::new(raw.labels, raw.values)
    }
}

impl Default for AlignmentChartData {
    fn default() -> Self {
        Self {
            labels: DEFAULT_ALIGNMENT_LABELS.map(str::to_owned),
            values: AlignmentWeights::even_split(),
        }
    }
}

impl AlignmentChartData {
    pub fn new(labels: [String; 3], values: AlignmentWeights) -> ChartResult<Self> {
        for value in [values.a, values.b, values.c] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(
                    "alignment weights must be finite and >= 0".to_owned(),
                ));
            }
        }
        Ok(Self {
            labels,
            values: values.normalized(),
        })
    }

    #[must_use]
    pub fn labels(&self) -> &[String; 3] {
        &self.labels
    }

    #[must_use]
    pub fn label(&self, corner: AlignmentCorner) -> &str {
        &self.labels[corner.index()]
    }

    #[must_use]
    pub fn values(&self) -> AlignmentWeights {
        self.values
    }

    /// Replaces the whole triple at once.
    pub fn set_weights(&mut self, weights: AlignmentWeights) {
        self.values = weights.normalized();
    }

    pub fn rename_label(&mut self, corner: AlignmentCorner, label: impl Into<String>) {
        self.labels[corner.index()] = label.into();
    }
}

/// Equilateral triangle the alignment point lives in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentTriangle {
    pub top: Point,
    pub right: Point,
    pub left: Point,
}

impl AlignmentTriangle {
    /// Derives the corners from a square surface of `size` pixels.
    ///
    /// The triangle is shifted down by `height / 6` so it sits visually
    /// centered rather than centroid-centered.
    #[must_use]
    pub fn for_size(size: f64, padding: f64) -> Self {
        let side = size - padding * 2.0;
        let height = side * 3f64.sqrt() / 2.0;
        let cx = size / 2.0;
        let cy = size / 2.0 + height / 6.0;

        Self {
            top: Point::new(cx, cy - (2.0 / 3.0) * height),
            right: Point::new(cx + side / 2.0, cy + height / 3.0),
            left: Point::new(cx - side / 2.0, cy + height / 3.0),
        }
    }

    pub fn for_viewport(viewport: Viewport, padding: f64) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let size = viewport.shorter_side();
        let mut triangle = Self::for_size(size, padding);
        let center = viewport.center();
        let (dx, dy) = (center.x - size / 2.0, center.y - size / 2.0);
        for corner in [&mut triangle.top, &mut triangle.right, &mut triangle.left] {
            corner.x += dx;
            corner.y += dy;
        }
        Ok(triangle)
    }

    #[must_use]
    pub fn corner(self, corner: AlignmentCorner) -> Point {
        match corner {
            AlignmentCorner::Top => self.top,
            AlignmentCorner::Right => self.right,
            AlignmentCorner::Left => self.left,
        }
    }

    #[must_use]
    pub fn centroid(self) -> Point {
        Point::new(
            (self.top.x + self.right.x + self.left.x) / 3.0,
            (self.top.y + self.right.y + self.left.y) / 3.0,
        )
    }

    /// Midpoint of the Right-Left edge, where the decorative spokes start.
    #[must_use]
    pub fn base_midpoint(self) -> Point {
        Point::new(
            (self.right.x + self.left.x) / 2.0,
            (self.right.y + self.left.y) / 2.0,
        )
    }

    /// Signed area determinant of the barycentric solve.
    #[must_use]
    pub fn determinant(self) -> f64 {
        let (t, r, l) = (self.top, self.right, self.left);
        (r.y - l.y) * (t.x - l.x) + (l.x - r.x) * (t.y - l.y)
    }

    /// Raw barycentric coordinates `(u, v, w)` of `point`; `None` when degenerate.
    #[must_use]
    pub fn barycentric(self, point: Point) -> Option<(f64, f64, f64)> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() || !point.is_finite() {
            return None;
        }
        let (t, r, l) = (self.top, self.right, self.left);
        let u = ((r.y - l.y) * (point.x - l.x) + (l.x - r.x) * (point.y - l.y)) / det;
        let v = ((l.y - t.y) * (point.x - l.x) + (t.x - l.x) * (point.y - l.y)) / det;
        Some((u, v, 1.0 - u - v))
    }

    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        self.barycentric(point)
            .is_some_and(|(u, v, w)| u >= 0.0 && v >= 0.0 && w >= 0.0)
    }

    /// Converts a pointer position into weights summing to [`WEIGHT_TOTAL`].
    ///
    /// Negative coordinates are clamped to zero before renormalizing, which
    /// bends values slightly for points outside the triangle.
    #[must_use]
    pub fn weights_from_point(self, point: Point) -> AlignmentWeights {
        match self.barycentric(point) {
            Some((u, v, w)) => AlignmentWeights::new(u, v, w).normalized(),
            None => AlignmentWeights::even_split(),
        }
    }

    /// Affine combination of the corners for `weights`.
    #[must_use]
    pub fn point_from_weights(self, weights: AlignmentWeights) -> Point {
        let (a, b, c) = weights.fractions();
        Point::new(
            a * self.top.x + b * self.right.x + c * self.left.x,
            a * self.top.y + b * self.right.y + c * self.left.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn degenerate_triangle_falls_back_to_even_split() {
        let point = Point::new(5.0, 5.0);
        let triangle = AlignmentTriangle {
            top: point,
            right: point,
            left: point,
        };
        assert_eq!(
            triangle.weights_from_point(point),
            AlignmentWeights::even_split()
        );
    }

    #[test]
    fn zero_weights_normalize_to_even_split() {
        assert_eq!(
            AlignmentWeights::new(0.0, 0.0, 0.0).normalized(),
            AlignmentWeights::even_split()
        );
    }

    #[test]
    fn base_midpoint_sits_below_centroid() {
        let triangle = AlignmentTriangle::for_size(400.0, 60.0);
        assert!(triangle.base_midpoint().y > triangle.centroid().y);
        assert_relative_eq!(triangle.base_midpoint().x, 200.0, epsilon = 1e-9);
    }
}
