//! UI layer: panels, plots and the graph editor window. All state lives in
//! [`crate::state::AppState`]; these functions only render and dispatch
//! requests.

pub mod editor;
pub mod panels;
pub mod plot;
