mod alignment_frame_builder;
mod comparison;
mod editor;
mod editor_config;
mod radar_frame_builder;

pub use alignment_frame_builder::{
    AlignmentFrameInput, AlignmentFrameStyle, AlignmentGeometry, alignment_geometry,
    build_alignment_frame,
};
pub use comparison::{ComparisonSet, ComparisonValue};
pub use editor::ChartEditor;
pub use editor_config::{
    EditorConfig, NARROW_WINDOW_MARGIN_X, NARROW_WINDOW_MARGIN_Y, square_viewport,
};
pub use radar_frame_builder::{
    RadarFrameInput, RadarFrameStyle, RadarGeometry, build_radar_frame, label_offset,
    radar_geometry,
};
