use tracing::{debug, trace};

use crate::core::radar::parse_full_mark;
use crate::core::{AlignmentCorner, AlignmentTriangle, AlignmentWeights, Point, RadarLayout};
use crate::error::ChartResult;
use crate::interaction::{AlignmentDragState, DragMode, RadarDragState};
use crate::render::{RenderFrame, Renderer};
use crate::store::{ChartKind, ChartPatch, ChartPayload, ChartPersistence, ChartStore};

use super::alignment_frame_builder::{
    AlignmentFrameInput, AlignmentFrameStyle, build_alignment_frame,
};
use super::comparison::{ComparisonSet, ComparisonValue};
use super::editor_config::{EditorConfig, square_viewport};
use super::radar_frame_builder::{RadarFrameInput, RadarFrameStyle, build_radar_frame};

/// Editing session for the active chart of a [`ChartStore`].
///
/// Holds only transient UI state: drag sessions, comparison overlays and the
/// current chart size. Every edit is written through the store it is given.
/// Edits aimed at a chart of the other kind, or with no active chart, are
/// no-ops returning `false`/`None`.
#[derive(Debug, Clone)]
pub struct ChartEditor {
    config: EditorConfig,
    chart_size: f64,
    radar_drag: RadarDragState,
    alignment_drag: AlignmentDragState,
    comparison: ComparisonSet,
    radar_style: RadarFrameStyle,
    alignment_style: AlignmentFrameStyle,
}

impl Default for ChartEditor {
    fn default() -> Self {
        Self {
            config: EditorConfig::default(),
            chart_size: EditorConfig::default().chart_size,
            radar_drag: RadarDragState::default(),
            alignment_drag: AlignmentDragState::default(),
            comparison: ComparisonSet::new(),
            radar_style: RadarFrameStyle::default(),
            alignment_style: AlignmentFrameStyle::default(),
        }
    }
}

impl ChartEditor {
    pub fn new(config: EditorConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            chart_size: config.chart_size,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn config(&self) -> EditorConfig {
        self.config
    }

    #[must_use]
    pub fn chart_size(&self) -> f64 {
        self.chart_size
    }

    /// Refits the chart to a resized host window.
    pub fn resize_window(&mut self, window_width: f64, window_height: f64) {
        self.chart_size = self
            .config
            .chart_size_for_window(window_width, window_height);
        trace!(chart_size = self.chart_size, "resize chart");
    }

    #[must_use]
    pub fn radar_layout(&self) -> RadarLayout {
        RadarLayout::for_size(self.chart_size, self.config.radar_padding)
    }

    #[must_use]
    pub fn alignment_triangle(&self) -> AlignmentTriangle {
        AlignmentTriangle::for_size(self.chart_size, self.config.alignment_padding)
    }

    #[must_use]
    pub fn radar_drag(&self) -> &RadarDragState {
        &self.radar_drag
    }

    #[must_use]
    pub fn alignment_drag_mode(&self) -> DragMode {
        self.alignment_drag.mode()
    }

    #[must_use]
    pub fn comparison(&self) -> &ComparisonSet {
        &self.comparison
    }

    pub fn set_radar_style(&mut self, style: RadarFrameStyle) {
        self.radar_style = style;
    }

    pub fn set_alignment_style(&mut self, style: AlignmentFrameStyle) {
        self.alignment_style = style;
    }

    /// Creates a chart, selects it and returns its id.
    pub fn add_chart<P: ChartPersistence>(
        &mut self,
        store: &mut ChartStore<P>,
        kind: ChartKind,
    ) -> String {
        self.reset_session();
        store.add_chart(kind)
    }

    pub fn select_chart<P: ChartPersistence>(
        &mut self,
        store: &mut ChartStore<P>,
        id: Option<&str>,
    ) {
        self.reset_session();
        store.set_active_chart(id);
    }

    pub fn delete_active_chart<P: ChartPersistence>(&mut self, store: &mut ChartStore<P>) -> bool {
        let Some(id) = active_id(store) else {
            return false;
        };
        self.reset_session();
        store.delete_chart(&id)
    }

    pub fn rename_chart<P: ChartPersistence>(&self, store: &mut ChartStore<P>, name: &str) -> bool {
        active_id(store).is_some_and(|id| store.update_chart(&id, ChartPatch::default().name(name)))
    }

    pub fn set_description<P: ChartPersistence>(
        &self,
        store: &mut ChartStore<P>,
        description: &str,
    ) -> bool {
        active_id(store).is_some_and(|id| {
            store.update_chart(&id, ChartPatch::default().description(description))
        })
    }

    /// Sets the radar ink color; invalid hex strings are rejected.
    pub fn set_color<P: ChartPersistence>(&self, store: &mut ChartStore<P>, color: &str) -> bool {
        self.edit_radar(store, |data| data.set_color(color).is_ok())
    }

    pub fn set_stat_value<P: ChartPersistence>(
        &self,
        store: &mut ChartStore<P>,
        stat_id: &str,
        value: f64,
    ) -> bool {
        self.edit_radar(store, |data| data.set_stat_value(stat_id, value))
    }

    pub fn rename_stat<P: ChartPersistence>(
        &self,
        store: &mut ChartStore<P>,
        stat_id: &str,
        label: &str,
    ) -> bool {
        self.edit_radar(store, |data| data.rename_stat(stat_id, label))
    }

    pub fn set_stat_notes<P: ChartPersistence>(
        &self,
        store: &mut ChartStore<P>,
        stat_id: &str,
        notes: &str,
    ) -> bool {
        self.edit_radar(store, |data| data.set_stat_notes(stat_id, notes))
    }

    /// Appends a default stat and returns its id.
    pub fn add_stat<P: ChartPersistence>(&self, store: &mut ChartStore<P>) -> Option<String> {
        let mut added = None;
        self.edit_radar(store, |data| {
            added = Some(data.add_stat());
            true
        });
        added
    }

    pub fn remove_stat<P: ChartPersistence>(
        &mut self,
        store: &mut ChartStore<P>,
        stat_id: &str,
    ) -> bool {
        if self.radar_drag.dragging_stat() == Some(stat_id) {
            self.radar_drag.pointer_up();
        }
        self.edit_radar(store, |data| data.remove_stat(stat_id))
    }

    pub fn set_full_mark<P: ChartPersistence>(&self, store: &mut ChartStore<P>, max: f64) -> bool {
        self.edit_radar(store, |data| {
            data.set_full_mark(max);
            true
        })
    }

    pub fn step_full_mark<P: ChartPersistence>(
        &self,
        store: &mut ChartStore<P>,
        delta: i32,
    ) -> bool {
        self.edit_radar(store, |data| {
            data.step_full_mark(delta);
            true
        })
    }

    /// Applies scale text typed by the user; see [`parse_full_mark`].
    pub fn set_full_mark_text<P: ChartPersistence>(
        &self,
        store: &mut ChartStore<P>,
        text: &str,
    ) -> bool {
        self.set_full_mark(store, parse_full_mark(text))
    }

    pub fn rename_alignment_label<P: ChartPersistence>(
        &self,
        store: &mut ChartStore<P>,
        corner: AlignmentCorner,
        label: &str,
    ) -> bool {
        self.edit_alignment(store, |data| {
            data.rename_label(corner, label);
            true
        })
    }

    pub fn set_alignment_weights<P: ChartPersistence>(
        &self,
        store: &mut ChartStore<P>,
        weights: AlignmentWeights,
    ) -> bool {
        self.edit_alignment(store, |data| {
            data.set_weights(weights);
            true
        })
    }

    /// Captures the pointer on a radar handle or axis.
    pub fn radar_pointer_down<P: ChartPersistence>(
        &mut self,
        store: &ChartStore<P>,
        stat_id: &str,
    ) -> bool {
        if self.config.readonly {
            return false;
        }
        let known = store
            .active_chart()
            .and_then(|chart| chart.as_radar())
            .is_some_and(|data| data.stat(stat_id).is_some());
        if known {
            self.radar_drag.pointer_down(stat_id);
        }
        known
    }

    /// Moves the captured radar handle and writes the new value.
    pub fn radar_pointer_move<P: ChartPersistence>(
        &self,
        store: &mut ChartStore<P>,
        pointer: Point,
    ) -> Option<f64> {
        let update = {
            let data = store.active_chart()?.as_radar()?;
            self.radar_drag.pointer_move(pointer, data, self.radar_layout())?
        };
        self.set_stat_value(store, &update.stat_id, update.value);
        Some(update.value)
    }

    pub fn radar_pointer_up(&mut self) {
        self.radar_drag.pointer_up();
    }

    /// Captures the pointer on the alignment triangle and moves the point there.
    pub fn alignment_pointer_down<P: ChartPersistence>(
        &mut self,
        store: &mut ChartStore<P>,
        pointer: Point,
    ) -> Option<AlignmentWeights> {
        if self.config.readonly || store.active_chart()?.as_alignment().is_none() {
            return None;
        }
        let weights = self.alignment_drag.pointer_down(pointer, self.alignment_triangle());
        self.set_alignment_weights(store, weights);
        Some(weights)
    }

    pub fn alignment_pointer_move<P: ChartPersistence>(
        &self,
        store: &mut ChartStore<P>,
        pointer: Point,
    ) -> Option<AlignmentWeights> {
        let weights = self
            .alignment_drag
            .pointer_move(pointer, self.alignment_triangle())?;
        self.set_alignment_weights(store, weights).then_some(weights)
    }

    pub fn alignment_pointer_up(&mut self) {
        self.alignment_drag.pointer_up();
    }

    pub fn add_comparison<P: ChartPersistence>(
        &mut self,
        store: &ChartStore<P>,
        chart_id: &str,
    ) -> bool {
        self.comparison.add(store.collection(), chart_id)
    }

    pub fn remove_comparison(&mut self, chart_id: &str) -> bool {
        self.comparison.remove(chart_id)
    }

    #[must_use]
    pub fn comparison_values<P: ChartPersistence>(
        &self,
        store: &ChartStore<P>,
        label: &str,
    ) -> Vec<ComparisonValue> {
        self.comparison.comparison_values(store.collection(), label)
    }

    /// Builds the frame for the active chart, `None` when nothing is selected.
    pub fn build_active_frame<P: ChartPersistence>(
        &self,
        store: &ChartStore<P>,
    ) -> ChartResult<Option<RenderFrame>> {
        let Some(chart) = store.active_chart() else {
            return Ok(None);
        };
        let viewport = square_viewport(self.chart_size)?;
        let frame = match &chart.payload {
            ChartPayload::Radar(data) => {
                let overlays = self.comparison.overlay_data(store.collection());
                build_radar_frame(RadarFrameInput {
                    viewport,
                    chart: data,
                    layout: self.radar_layout(),
                    style: self.radar_style,
                    dragging_stat: self.radar_drag.dragging_stat(),
                    interactive: !self.config.readonly,
                    overlays: &overlays,
                })?
            }
            ChartPayload::Alignment(data) => build_alignment_frame(AlignmentFrameInput {
                viewport,
                chart: data,
                triangle: self.alignment_triangle(),
                style: self.alignment_style,
                dragging: self.alignment_drag.mode() == DragMode::Dragging,
            })?,
        };
        Ok(Some(frame))
    }

    /// Renders the active chart. Returns `false` when nothing is selected.
    pub fn render_active<P: ChartPersistence, R: Renderer>(
        &self,
        store: &ChartStore<P>,
        renderer: &mut R,
    ) -> ChartResult<bool> {
        match self.build_active_frame(store)? {
            Some(frame) => {
                renderer.render(&frame)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn edit_radar<P, F>(&self, store: &mut ChartStore<P>, edit: F) -> bool
    where
        P: ChartPersistence,
        F: FnOnce(&mut crate::core::RadarChartData) -> bool,
    {
        active_id(store).is_some_and(|id| store.update_radar(&id, edit))
    }

    fn edit_alignment<P, F>(&self, store: &mut ChartStore<P>, edit: F) -> bool
    where
        P: ChartPersistence,
        F: FnOnce(&mut crate::core::AlignmentChartData) -> bool,
    {
        active_id(store).is_some_and(|id| store.update_alignment(&id, edit))
    }

    fn reset_session(&mut self) {
        debug!("reset editor session");
        self.radar_drag.pointer_up();
        self.alignment_drag.pointer_up();
        self.comparison.clear();
    }
}

fn active_id<P: ChartPersistence>(store: &ChartStore<P>) -> Option<String> {
    store.active_chart().map(|chart| chart.id.clone())
}
