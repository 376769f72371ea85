//! stat-charts: headless editing engine for RPG stat charts.
//!
//! Radar (spider) charts and three-way barycentric alignment triangles:
//! pointer-to-value mapping, a drag state machine, backend-agnostic render
//! frames and a persisted chart collection.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod store;
pub mod telemetry;

pub use api::{ChartEditor, EditorConfig};
pub use error::{ChartError, ChartResult};
pub use store::{ChartKind, ChartStore};
