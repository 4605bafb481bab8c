//! Capflow Loader - Portfolio snapshot files for the capflow engine
//!
//! Loads planning inputs from RON files:
//! - Project and program records
//! - Staff categories and hour allocations
//! - Scenarios, including the baseline
//!
//! Multiple files merge into one snapshot with duplicate-id detection.
//! Enable the `serde_json` feature for JSON input support:
//! ```toml
//! capflow-loader = { version = "0.1", features = ["serde_json"] }
//! ```

mod error;
mod loader;
mod snapshot;

pub use error::{Error, Result};
pub use loader::Loader;
pub use snapshot::{AllocationEntry, PortfolioSnapshot};
