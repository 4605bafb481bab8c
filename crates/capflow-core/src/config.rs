//! Shared forecast constants
//!
//! The forecaster and the gap analyzer must agree on unit conversion and
//! thresholds, so the values live here and nowhere else.

/// Working hours in one FTE-month: 4.33 average weeks per month at 40 h/week
pub const HOURS_PER_FTE_MONTH: f64 = 4.33 * 40.0;

/// Minimum shortfall (in FTE) before a gap record is emitted
pub const GAP_THRESHOLD_FTE: f64 = 0.1;

/// Gaps above this (in FTE) are classified as critical
pub const CRITICAL_GAP_FTE: f64 = 1.0;

/// Shortest supported forecast horizon, in months
pub const MIN_HORIZON_MONTHS: u32 = 1;

/// Longest supported forecast horizon, in months (ten years)
pub const MAX_HORIZON_MONTHS: u32 = 120;

/// Clamp a caller-supplied horizon into the supported range.
///
/// Out-of-range horizons are clamped, never rejected.
///
/// # Example
///
/// ```
/// use capflow_core::config::clamp_horizon;
///
/// assert_eq!(clamp_horizon(0), 1);
/// assert_eq!(clamp_horizon(24), 24);
/// assert_eq!(clamp_horizon(500), 120);
/// ```
pub fn clamp_horizon(months: u32) -> u32 {
    months.clamp(MIN_HORIZON_MONTHS, MAX_HORIZON_MONTHS)
}
