use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::core::alignment::DEFAULT_ALIGNMENT_PADDING;
use crate::core::radar::DEFAULT_RADAR_PADDING;
use crate::error::{ChartError, ChartResult};

/// Horizontal room kept free around a chart on narrow windows.
pub const NARROW_WINDOW_MARGIN_X: f64 = 40.0;
/// Vertical room kept free for the header and toolbars on narrow windows.
pub const NARROW_WINDOW_MARGIN_Y: f64 = 200.0;

/// Editor bootstrap configuration.
///
/// Serializable so hosts can keep it next to their own settings; every field
/// falls back to its default when missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Square chart size on wide windows, in pixels.
    #[serde(default = "default_chart_size")]
    pub chart_size: f64,
    /// Windows narrower than this use the fitted narrow layout.
    #[serde(default = "default_mobile_breakpoint")]
    pub mobile_breakpoint: f64,
    #[serde(default = "default_radar_padding")]
    pub radar_padding: f64,
    #[serde(default = "default_alignment_padding")]
    pub alignment_padding: f64,
    /// Disables pointer editing; frames are rendered without handles.
    #[serde(default)]
    pub readonly: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            chart_size: default_chart_size(),
            mobile_breakpoint: default_mobile_breakpoint(),
            radar_padding: default_radar_padding(),
            alignment_padding: default_alignment_padding(),
            readonly: false,
        }
    }
}

impl EditorConfig {
    #[must_use]
    pub fn with_chart_size(mut self, chart_size: f64) -> Self {
        self.chart_size = chart_size;
        self
    }

    #[must_use]
    pub fn with_readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        for (field, value) in [
            ("chart_size", self.chart_size),
            ("mobile_breakpoint", self.mobile_breakpoint),
            ("radar_padding", self.radar_padding),
            ("alignment_padding", self.alignment_padding),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "editor config `{field}` must be finite and >= 0"
                )));
            }
        }
        if self.chart_size < self.min_chart_size() {
            return Err(ChartError::InvalidData(
                "editor config `chart_size` must exceed twice the padding".to_owned(),
            ));
        }
        Ok(())
    }

    /// Smallest chart that still leaves both charts a drawable area.
    #[must_use]
    pub fn min_chart_size(self) -> f64 {
        self.radar_padding.max(self.alignment_padding) * 2.0 + 1.0
    }

    /// Chart size for a window of the given size, never below
    /// [`EditorConfig::min_chart_size`].
    #[must_use]
    pub fn chart_size_for_window(self, window_width: f64, window_height: f64) -> f64 {
        if window_width < self.mobile_breakpoint {
            (window_width - NARROW_WINDOW_MARGIN_X)
                .min(window_height - NARROW_WINDOW_MARGIN_Y)
                .max(self.min_chart_size())
        } else {
            self.chart_size
        }
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse editor config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

/// Square viewport for a chart of `size` pixels.
pub fn square_viewport(size: f64) -> ChartResult<Viewport> {
    if !size.is_finite() || size < 1.0 || size > f64::from(u32::MAX) {
        return Err(ChartError::InvalidData(format!(
            "chart size must be finite and >= 1, got {size}"
        )));
    }
    Ok(Viewport::square(size.round() as u32))
}

fn default_chart_size() -> f64 {
    650.0
}

fn default_mobile_breakpoint() -> f64 {
    768.0
}

fn default_radar_padding() -> f64 {
    DEFAULT_RADAR_PADDING
}

fn default_alignment_padding() -> f64 {
    DEFAULT_ALIGNMENT_PADDING
}
