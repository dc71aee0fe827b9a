//! Chart layer: the chart model and the three things that populate or
//! mutate it.
//!
//! * `builder`: background pass turning the active table into per-run
//!   point series, with progress reporting.
//! * `highlight`: one selected row as a cross-run scatter series, keeping
//!   manual x overrides alive across re-selection.
//! * `editor`: batched axis/tick/point edits applied on submit.

pub mod builder;
pub mod editor;
pub mod highlight;
pub mod model;

pub use model::{AxisSpec, ChartModel, Point, Series};
