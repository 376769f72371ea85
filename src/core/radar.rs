use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::geometry::{Point, axis_unit_vector, polar_to_cartesian, value_to_coordinate};
use crate::core::primitives::{new_id, parse_hex_rgb};
use crate::core::types::Viewport;
use crate::error::{ChartError, ChartResult};

/// A polygon needs at least three vertices.
pub const MIN_RADAR_STATS: usize = 3;
pub const DEFAULT_FULL_MARK: f64 = 100.0;
pub const MIN_FULL_MARK: f64 = 1.0;
pub const MAX_FULL_MARK: f64 = 1000.0;
/// Quick-pick scales offered by the max-scale editor.
pub const FULL_MARK_PRESETS: [f64; 4] = [6.0, 10.0, 20.0, 100.0];
pub const DEFAULT_RADAR_COLOR: &str = "#4a3461";
pub const NEW_STAT_LABEL: &str = "New Stat";
pub const NEW_STAT_VALUE: f64 = 50.0;
/// Room left around the web for two label lines (48px) plus spacing.
pub const DEFAULT_RADAR_PADDING: f64 = 80.0;
pub const DEFAULT_RADAR_STAT_LABELS: [&str; 5] =
    ["Strength", "Agility", "Intelligence", "Charisma", "Wisdom"];

/// Vertex buffer sized for typical charts without heap allocation.
pub type RadarPolygon = SmallVec<[Point; 8]>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarStat {
    pub id: String,
    pub label: String,
    pub value: f64,
    pub full_mark: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl RadarStat {
    /// Creates a stat with a fresh id. `value` is clamped into `[0, full_mark]`.
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64, full_mark: f64) -> Self {
        let full_mark = clamp_full_mark(full_mark);
        Self {
            id: new_id(),
            label: label.into(),
            value: clamp_value(value, full_mark),
            full_mark,
            notes: None,
        }
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = normalize_notes(notes.into());
        self
    }

    /// Value as a fraction of the axis length.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.full_mark > 0.0 {
            self.value / self.full_mark
        } else {
            0.0
        }
    }

    fn validate(&self) -> ChartResult<()> {
        if !self.full_mark.is_finite() || self.full_mark <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "stat `{}` full mark must be finite and > 0",
                self.label
            )));
        }
        if !self.value.is_finite() || !(0.0..=self.full_mark).contains(&self.value) {
            return Err(ChartError::InvalidData(format!(
                "stat `{}` value must be finite and in [0, full mark]",
                self.label
            )));
        }
        Ok(())
    }
}

/// Radar payload: stats in display order around the circle plus an ink color.
///
/// Deserialization goes through [`RadarChartData::new`], so stored documents
/// are held to the same rules as freshly built charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RadarChartDataJson")]
pub struct RadarChartData {
    stats: Vec<RadarStat>,
    color: String,
}

#[derive(Deserialize)]
struct RadarChartDataJson {
    #[serde(alias = "data")]
    stats: Vec<RadarStat>,
    color: String,
}

impl TryFrom<RadarChartDataJson> for RadarChartData {
    type Error = ChartError;

    fn try_from(raw: RadarChartDataJson) -> ChartResult<Self> {
        Self::new(raw.stats, raw.color)
    }
}

impl Default for RadarChartData {
    fn default() -> Self {
        Self {
            stats: DEFAULT_RADAR_STAT_LABELS
                .iter()
                .map(|label| RadarStat::new(*label, NEW_STAT_VALUE, DEFAULT_FULL_MARK))
                .collect(),
            color: DEFAULT_RADAR_COLOR.to_owned(),
        }
    }
}

impl RadarChartData {
    pub fn new(stats: Vec<RadarStat>, color: impl Into<String>) -> ChartResult<Self> {
        if stats.len() < MIN_RADAR_STATS {
            return Err(ChartError::InvalidData(format!(
                "radar chart needs at least {MIN_RADAR_STATS} stats, got {}",
                stats.len()
            )));
        }
        for stat in &stats {
            stat.validate()?;
        }
        let color = color.into();
        validate_color(&color)?;
        Ok(Self { stats, color })
    }

    #[must_use]
    pub fn stats(&self) -> &[RadarStat] {
        &self.stats
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    #[must_use]
    pub fn axis_count(&self) -> usize {
        self.stats.len()
    }

    #[must_use]
    pub fn stat(&self, id: &str) -> Option<&RadarStat> {
        self.stats.iter().find(|stat| stat.id == id)
    }

    #[must_use]
    pub fn stat_index(&self, id: &str) -> Option<usize> {
        self.stats.iter().position(|stat| stat.id == id)
    }

    /// The scale all stats share; the first stat is authoritative.
    #[must_use]
    pub fn shared_full_mark(&self) -> f64 {
        self.stats
            .first()
            .map_or(DEFAULT_FULL_MARK, |stat| stat.full_mark)
    }

    pub fn set_color(&mut self, color: impl Into<String>) -> ChartResult<()> {
        let color = color.into();
        validate_color(&color)?;
        self.color = color;
        Ok(())
    }

    /// Sets one stat's value, clamped into `[0, full_mark]`.
    ///
    /// Returns `false` when no stat has `id` or `value` is not finite.
    pub fn set_stat_value(&mut self, id: &str, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self.stats.iter_mut().find(|stat| stat.id == id) {
            Some(stat) => {
                stat.value = clamp_value(value, stat.full_mark);
                true
            }
            None => false,
        }
    }

    pub fn rename_stat(&mut self, id: &str, label: impl Into<String>) -> bool {
        match self.stats.iter_mut().find(|stat| stat.id == id) {
            Some(stat) => {
                stat.label = label.into();
                true
            }
            None => false,
        }
    }

    /// Replaces a stat's notes. Empty text clears them.
    pub fn set_stat_notes(&mut self, id: &str, notes: impl Into<String>) -> bool {
        match self.stats.iter_mut().find(|stat| stat.id == id) {
            Some(stat) => {
                stat.notes = normalize_notes(notes.into());
                true
            }
            None => false,
        }
    }

    /// Appends a default stat on the shared scale and returns its id.
    pub fn add_stat(&mut self) -> String {
        let stat = RadarStat::new(NEW_STAT_LABEL, NEW_STAT_VALUE, self.shared_full_mark());
        let id = stat.id.clone();
        self.stats.push(stat);
        id
    }

    /// Removes a stat unless that would leave fewer than [`MIN_RADAR_STATS`].
    pub fn remove_stat(&mut self, id: &str) -> bool {
        if self.stats.len() <= MIN_RADAR_STATS {
            return false;
        }
        match self.stat_index(id) {
            Some(index) => {
                self.stats.remove(index);
                true
            }
            None => false,
        }
    }

    /// Rewrites every stat's full mark and pulls values down to fit.
    pub fn set_full_mark(&mut self, max: f64) {
        let max = clamp_full_mark(max);
        for stat in &mut self.stats {
            stat.full_mark = max;
            stat.value = stat.value.min(max);
        }
    }

    /// Moves the shared scale by `delta`.
    ///
    /// Stepping up stops at [`MAX_FULL_MARK`]; stepping down only stops at
    /// [`MIN_FULL_MARK`], so a typed scale above the cap can be walked down.
    pub fn step_full_mark(&mut self, delta: i32) {
        let stepped = self.shared_full_mark() + f64::from(delta);
        let next = if delta > 0 {
            stepped.min(MAX_FULL_MARK)
        } else {
            stepped
        };
        self.set_full_mark(next);
    }
}

/// Parses free-form scale input; unparsable text falls back to 100 and the
/// result never drops below 1.
#[must_use]
pub fn parse_full_mark(text: &str) -> f64 {
    let parsed = parse_leading_integer(text.trim()).unwrap_or(DEFAULT_FULL_MARK as i64);
    let parsed = if parsed == 0 {
        DEFAULT_FULL_MARK as i64
    } else {
        parsed
    };
    (parsed as f64).max(MIN_FULL_MARK)
}

fn parse_leading_integer(text: &str) -> Option<i64> {
    let sign_len = usize::from(text.starts_with(['-', '+']));
    let digits_len = text[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    text[..sign_len + digits_len].parse().ok()
}

/// Reference ring radii as fractions of the axis length, outermost first.
///
/// Up to 10 one ring per unit, up to 20 one ring per two units, otherwise 5.
#[must_use]
pub fn grid_levels(max: f64) -> Vec<f64> {
    let count = if !max.is_finite() || max > 20.0 {
        5
    } else if max <= 10.0 {
        max.floor().max(1.0) as usize
    } else {
        (max / 2.0).floor().max(1.0) as usize
    };
    (1..=count)
        .rev()
        .map(|level| level as f64 / count as f64)
        .collect()
}

#[must_use]
pub fn axis_angle(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    index as f64 * (360.0 / count as f64)
}

/// Shared center and axis length for a radar chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarLayout {
    pub center: Point,
    pub radius: f64,
}

impl RadarLayout {
    #[must_use]
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Layout for a square surface of `size` pixels.
    #[must_use]
    pub fn for_size(size: f64, padding: f64) -> Self {
        Self::new(
            Point::new(size / 2.0, size / 2.0),
            (size - padding * 2.0) / 2.0,
        )
    }

    pub fn for_viewport(viewport: Viewport, padding: f64) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Ok(Self::new(
            viewport.center(),
            (viewport.shorter_side() - padding * 2.0) / 2.0,
        ))
    }

    #[must_use]
    pub fn axis_end(self, index: usize, count: usize) -> Point {
        polar_to_cartesian(
            self.center.x,
            self.center.y,
            self.radius,
            axis_angle(index, count),
        )
    }

    #[must_use]
    pub fn vertex(self, value: f64, full_mark: f64, index: usize, count: usize) -> Point {
        value_to_coordinate(
            value,
            full_mark,
            self.radius,
            axis_angle(index, count),
            self.center.x,
            self.center.y,
        )
    }

    #[must_use]
    pub fn vertices(self, chart: &RadarChartData) -> RadarPolygon {
        let count = chart.axis_count();
        chart
            .stats()
            .iter()
            .enumerate()
            .map(|(index, stat)| self.vertex(stat.value, stat.full_mark, index, count))
            .collect()
    }

    /// One web ring at fractional radius `level`.
    #[must_use]
    pub fn ring(self, level: f64, count: usize) -> RadarPolygon {
        (0..count)
            .map(|index| {
                polar_to_cartesian(
                    self.center.x,
                    self.center.y,
                    self.radius * level,
                    axis_angle(index, count),
                )
            })
            .collect()
    }

    /// Converts a pointer position into a value on axis `index`.
    ///
    /// The pointer is projected onto the axis so dragging off the line still
    /// yields a 1-D value. The result is clamped to `[0, full_mark]` and
    /// rounded to the nearest integer.
    #[must_use]
    pub fn value_from_pointer(self, pointer: Point, index: usize, count: usize, full_mark: f64) -> f64 {
        if self.radius <= 0.0 || !full_mark.is_finite() || full_mark <= 0.0 || !pointer.is_finite() {
            return 0.0;
        }
        let (axis_x, axis_y) = axis_unit_vector(axis_angle(index, count));
        let projection = (pointer.x - self.center.x) * axis_x + (pointer.y - self.center.y) * axis_y;
        let value = (projection / self.radius) * full_mark;
        value.clamp(0.0, full_mark).round()
    }
}

fn clamp_value(value: f64, full_mark: f64) -> f64 {
    let full_mark = clamp_full_mark(full_mark);
    if value.is_finite() {
        value.clamp(0.0, full_mark)
    } else {
        0.0
    }
}

fn clamp_full_mark(max: f64) -> f64 {
    if max.is_finite() {
        max.max(MIN_FULL_MARK)
    } else {
        MIN_FULL_MARK
    }
}

fn normalize_notes(notes: String) -> Option<String> {
    if notes.is_empty() { None } else { Some(notes) }
}

fn validate_color(color: &str) -> ChartResult<()> {
    if parse_hex_rgb(color).is_none() {
        return Err(ChartError::InvalidData(format!(
            "color `{color}` must be a #rrggbb hex string"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_integer_parsing_matches_lenient_input() {
        assert_eq!(parse_full_mark("42abc"), 42.0);
        assert_eq!(parse_full_mark(""), 100.0);
        assert_eq!(parse_full_mark("abc"), 100.0);
        assert_eq!(parse_full_mark("0"), 100.0);
        assert_eq!(parse_full_mark("-5"), 1.0);
    }

    #[test]
    fn axis_angle_handles_empty_chart() {
        assert_eq!(axis_angle(0, 0), 0.0);
        assert_eq!(axis_angle(1, 4), 90.0);
    }

    #[test]
    fn value_clamp_is_total_for_bad_scales() {
        assert_eq!(clamp_value(5.0, -5.0), 1.0);
        assert_eq!(clamp_value(5.0, f64::NAN), 1.0);
        assert_eq!(clamp_value(-3.0, 0.0), 0.0);
        assert_eq!(clamp_value(f64::INFINITY, 10.0), 0.0);
    }
}
