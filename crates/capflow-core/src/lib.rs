//! Capflow Core - Staffing forecast engine for capital improvement planning
//!
//! This crate provides the domain model and the deterministic forecast
//! pipeline:
//! - Portfolio records: phased capital projects and continuous programs
//! - Staff categories and sparse hour-allocation tables
//! - Timeline derivation from raw schedule fields
//! - Month-by-month required vs. available FTE forecasting
//! - Staffing gap detection with severity classification
//! - Advisory input validation
//!
//! The engine is a pure, synchronous computation: every entry point reads
//! its inputs, allocates fresh outputs, and holds no state between calls.
//! Malformed domain data never causes a failure - bad dates and dangling
//! references degrade to zero contribution.

pub mod config;
pub mod forecast;
mod gap;
mod identity;
mod month;
mod portfolio;
mod staff;
mod timeline;
pub mod validate;

pub use forecast::{Forecast, ForecastMonth};
pub use gap::{find_gaps, Severity, StaffingGap};
pub use identity::{CategoryId, ProjectId};
pub use month::{add_months_to_date, parse_date, Month};
pub use portfolio::{
    ContinuousHours, ContinuousSchedule, DeliveryType, PhasedSchedule, Portfolio, ProjectRecord,
    ProjectType, Schedule,
};
pub use staff::{AllocationTable, PhaseHours, StaffCategory};
pub use timeline::{derive_timelines, ProjectTimeline, Timeline};
pub use validate::{validate, ValidationIssue, ValidationReport};
