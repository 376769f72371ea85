pub mod alignment;
pub mod geometry;
pub mod primitives;
pub mod radar;
pub mod types;

pub use alignment::{AlignmentChartData, AlignmentCorner, AlignmentTriangle, AlignmentWeights};
pub use geometry::{Point, polar_to_cartesian, value_to_coordinate};
pub use radar::{RadarChartData, RadarLayout, RadarPolygon, RadarStat, grid_levels};
pub use types::Viewport;
