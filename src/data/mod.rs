//! Data layer: tables, the reshape transform, and the dataset store.
//!
//! ```text
//!  multi-run .csv
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ transform  │  latest-run-first export → canonical layout
//!   └───────────┘  (round-tripped through "<stem> (Edited).csv")
//!        │
//!        ▼
//!   ┌───────────┐
//!   │   store    │  name → Dataset, active dataset, save paths,
//!   └───────────┘  column/row lookups
//!        │
//!        ▼
//!   ┌───────────┐
//!   │   Table    │  rectangular grid of string cells
//!   └───────────┘
//! ```

pub mod error;
pub mod store;
pub mod table;
pub mod transform;

pub use error::DataError;
pub use store::{Dataset, DatasetStore};
pub use table::Table;
