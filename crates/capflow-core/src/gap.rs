//! Staffing gap detection
//!
//! Scans a forecast and emits a discrete shortage record for every
//! (month, category) pair where demand exceeds capacity by more than the
//! shared significance threshold.

use crate::config::{CRITICAL_GAP_FTE, GAP_THRESHOLD_FTE};
use crate::forecast::Forecast;
use crate::month::Month;
use crate::staff::StaffCategory;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How severe a staffing gap is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Shortfall of up to one FTE
    Moderate,
    /// Shortfall of more than one FTE
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Moderate => write!(f, "Moderate"),
            Severity::Critical => write!(f, "Critical"),
        }
    }
}

/// A month where one category's required FTE exceeds its available FTE
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffingGap {
    /// Month of the shortage
    pub month: Month,
    /// Category name (the forecast aggregation key)
    pub category: String,
    /// Required FTE
    pub required: f64,
    /// Available FTE
    pub available: f64,
    /// Shortfall: `required - available`
    pub gap: f64,
}

impl StaffingGap {
    /// Display label for the gap month
    pub fn month_label(&self) -> String {
        self.month.label()
    }

    /// Severity classification, derived from the shared threshold
    pub fn severity(&self) -> Severity {
        if self.gap > CRITICAL_GAP_FTE {
            Severity::Critical
        } else {
            Severity::Moderate
        }
    }
}

/// Find every significant staffing gap in a forecast
///
/// A gap is emitted iff `required - available > 0.1` FTE. Output is ordered
/// by month, then by the given category-list order.
pub fn find_gaps(forecast: &Forecast, categories: &[StaffCategory]) -> Vec<StaffingGap> {
    let mut gaps = Vec::new();

    for row in forecast.iter() {
        for category in categories {
            let required = row.required_for(&category.name);
            let available = row.capacity_for(&category.name);
            let gap = required - available;
            if gap > GAP_THRESHOLD_FTE {
                gaps.push(StaffingGap {
                    month: row.month,
                    category: category.name.clone(),
                    required,
                    available,
                    gap,
                });
            }
        }
    }

    gaps
}
