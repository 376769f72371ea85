use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{AlignmentTriangle, AlignmentWeights, Point, RadarChartData, RadarLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragMode {
    Idle,
    Dragging,
}

/// Value emitted while a radar axis handle is dragged.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarDragUpdate {
    pub stat_id: String,
    pub value: f64,
}

/// Drag session for the radar handles.
///
/// Pointer-down on a handle or axis captures the pointer until pointer-up;
/// every move in between yields a new value for the captured stat.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RadarDragState {
    dragging_stat: Option<String>,
}

impl RadarDragState {
    #[must_use]
    pub fn mode(&self) -> DragMode {
        if self.dragging_stat.is_some() {
            DragMode::Dragging
        } else {
            DragMode::Idle
        }
    }

    #[must_use]
    pub fn dragging_stat(&self) -> Option<&str> {
        self.dragging_stat.as_deref()
    }

    pub fn pointer_down(&mut self, stat_id: impl Into<String>) {
        let stat_id = stat_id.into();
        trace!(stat_id = %stat_id, "radar drag start");
        self.dragging_stat = Some(stat_id);
    }

    /// Projects `pointer` onto the captured stat's axis.
    ///
    /// Returns `None` while idle or when the captured stat no longer exists.
    #[must_use]
    pub fn pointer_move(
        &self,
        pointer: Point,
        chart: &RadarChartData,
        layout: RadarLayout,
    ) -> Option<RadarDragUpdate> {
        let stat_id = self.dragging_stat.as_deref()?;
        let index = chart.stat_index(stat_id)?;
        let stat = &chart.stats()[index];
        let value = layout.value_from_pointer(pointer, index, chart.axis_count(), stat.full_mark);
        Some(RadarDragUpdate {
            stat_id: stat_id.to_owned(),
            value,
        })
    }

    pub fn pointer_up(&mut self) {
        if let Some(stat_id) = self.dragging_stat.take() {
            trace!(stat_id = %stat_id, "radar drag end");
        }
    }
}

/// Drag session for the alignment point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentDragState {
    mode: DragMode,
}

impl Default for AlignmentDragState {
    fn default() -> Self {
        Self {
            mode: DragMode::Idle,
        }
    }
}

impl AlignmentDragState {
    #[must_use]
    pub fn mode(self) -> DragMode {
        self.mode
    }

    /// Starts dragging and resolves the press position right away, so a
    /// single click moves the point.
    pub fn pointer_down(&mut self, pointer: Point, triangle: AlignmentTriangle) -> AlignmentWeights {
        self.mode = DragMode::Dragging;
        trace!(x = pointer.x, y = pointer.y, "alignment drag start");
        triangle.weights_from_point(pointer)
    }

    #[must_use]
    pub fn pointer_move(self, pointer: Point, triangle: AlignmentTriangle) -> Option<AlignmentWeights> {
        match self.mode {
            DragMode::Dragging => Some(triangle.weights_from_point(pointer)),
            DragMode::Idle => None,
        }
    }

    pub fn pointer_up(&mut self) {
        if self.mode == DragMode::Dragging {
            trace!("alignment drag end");
        }
        self.mode = DragMode::Idle;
    }
}
