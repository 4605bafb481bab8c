//! Resource forecaster: month-by-month required vs. available FTE
//!
//! For a fixed monthly horizon anchored at the earliest valid design start,
//! the forecaster scans every record for every month and accumulates demand
//! per staff category, then pairs it with that category's monthly capacity.
//!
//! # Accumulation rules
//!
//! - Phased records contribute `(allocated phase hours / phase duration)`
//!   hours per month while the month start lies in `[start, end)` of the
//!   phase, converted to FTE. PM hours are tracked in allocations but are
//!   not demand.
//! - Continuous records are active over `[start, end]`, end included. While
//!   active they contribute their design-hours rollup to every category with
//!   design capacity, and their construction-hours rollup to every category
//!   with construction capacity.
//!
//! The output is deterministic: months ascend from the anchor, category
//! columns follow the portfolio's category order.

use crate::config::{clamp_horizon, HOURS_PER_FTE_MONTH};
use crate::month::Month;
use crate::portfolio::{Portfolio, ProjectRecord, Schedule};
use crate::staff::{PhaseHours, StaffCategory};
use crate::timeline::{derive_timelines, ProjectTimeline, Timeline};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One month of the forecast: required and available FTE per category name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastMonth {
    /// The calendar month this row covers
    pub month: Month,
    /// Required FTE keyed by category name
    pub required: IndexMap<String, f64>,
    /// Available FTE keyed by category name
    pub capacity: IndexMap<String, f64>,
}

impl ForecastMonth {
    fn new(month: Month) -> Self {
        Self {
            month,
            required: IndexMap::new(),
            capacity: IndexMap::new(),
        }
    }

    /// Display label for this month, e.g. `Jan 2024`
    pub fn label(&self) -> String {
        self.month.label()
    }

    /// Required FTE for a category; absent categories are zero
    pub fn required_for(&self, category: &str) -> f64 {
        self.required.get(category).copied().unwrap_or(0.0)
    }

    /// Available FTE for a category; absent categories are zero
    pub fn capacity_for(&self, category: &str) -> f64 {
        self.capacity.get(category).copied().unwrap_or(0.0)
    }

    /// Required FTE summed across categories
    pub fn total_required(&self) -> f64 {
        self.required.values().sum()
    }

    /// Available FTE summed across categories
    pub fn total_capacity(&self) -> f64 {
        self.capacity.values().sum()
    }
}

/// An ordered forecast over a monthly horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// First month of the horizon
    pub start: Month,
    /// One entry per month, ascending and contiguous
    pub months: Vec<ForecastMonth>,
}

impl Forecast {
    /// Number of months in the forecast
    pub fn len(&self) -> usize {
        self.months.len()
    }

    /// True when the forecast has no months
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Iterate the forecast months in order
    pub fn iter(&self) -> impl Iterator<Item = &ForecastMonth> {
        self.months.iter()
    }
}

/// Build a forecast anchored relative to `today`
///
/// The horizon is clamped to the supported range. The first month is the
/// month of the earliest valid design start across all records, or the month
/// of `today` when no record has a valid start date. An empty project or
/// category list produces an empty forecast.
///
/// `availability` optionally overrides per-category monthly capacity, in
/// FTE, keyed by category name; categories absent from the map fall back to
/// their capacity fields.
pub fn run_at(
    today: NaiveDate,
    portfolio: &Portfolio,
    horizon_months: u32,
    availability: Option<&IndexMap<String, f64>>,
) -> Forecast {
    let horizon = clamp_horizon(horizon_months);
    let timelines = derive_timelines(&portfolio.projects);
    let start = anchor_month(today, &timelines);

    if portfolio.projects.is_empty() || portfolio.categories.is_empty() {
        return Forecast {
            start,
            months: Vec::new(),
        };
    }

    let mut months = Vec::with_capacity(horizon as usize);
    let mut month = start;
    for _ in 0..horizon {
        let cursor = month.first_day();
        let mut row = ForecastMonth::new(month);

        for category in &portfolio.categories {
            let mut required = 0.0;
            for (record, pt) in portfolio.projects.iter().zip(&timelines) {
                let hours = portfolio.allocations.hours_for(&record.id, &category.id);
                required += demand_fte(record, &pt.timeline, hours, category, cursor);
            }

            let capacity = availability
                .and_then(|map| map.get(&category.name).copied())
                .unwrap_or_else(|| category.monthly_capacity_fte());

            row.required.insert(category.name.clone(), required);
            row.capacity.insert(category.name.clone(), capacity);
        }

        months.push(row);
        month = month.add_months(1);
    }

    Forecast { start, months }
}

/// Build a forecast anchored relative to the current local date
pub fn run(
    portfolio: &Portfolio,
    horizon_months: u32,
    availability: Option<&IndexMap<String, f64>>,
) -> Forecast {
    run_at(
        chrono::Local::now().date_naive(),
        portfolio,
        horizon_months,
        availability,
    )
}

/// FTE one record demands from one category in the month starting at
/// `month_start`
///
/// Shared with downstream conflict attribution so per-record contributions
/// always match the aggregate forecast.
pub fn demand_fte(
    record: &ProjectRecord,
    timeline: &Timeline,
    allocation: PhaseHours,
    category: &StaffCategory,
    month_start: NaiveDate,
) -> f64 {
    match &record.schedule {
        Schedule::Phased(phased) => {
            let mut fte = 0.0;
            if phased.design_duration > 0
                && Timeline::in_exclusive(month_start, timeline.design_start, timeline.design_end)
            {
                let monthly = allocation.design_hours / phased.design_duration as f64;
                fte += monthly / HOURS_PER_FTE_MONTH;
            }
            if phased.construction_duration > 0
                && Timeline::in_exclusive(
                    month_start,
                    timeline.construction_start,
                    timeline.construction_end,
                )
            {
                let monthly = allocation.construction_hours / phased.construction_duration as f64;
                fte += monthly / HOURS_PER_FTE_MONTH;
            }
            fte
        }
        Schedule::Continuous(cont) => {
            // Program window keeps its inclusive end bound, unlike the
            // exclusive phase windows above.
            if !Timeline::in_inclusive(month_start, timeline.design_start, timeline.construction_end)
            {
                return 0.0;
            }
            let mut fte = 0.0;
            if category.design_capacity > 0.0 {
                fte += cont.design_hours / HOURS_PER_FTE_MONTH;
            }
            if category.construction_capacity > 0.0 {
                fte += cont.construction_hours / HOURS_PER_FTE_MONTH;
            }
            fte
        }
    }
}

fn anchor_month(today: NaiveDate, timelines: &[ProjectTimeline]) -> Month {
    timelines
        .iter()
        .filter_map(|pt| pt.timeline.earliest_start())
        .min()
        .map(Month::from_date)
        .unwrap_or_else(|| Month::from_date(today))
}
