//! Budget-timing impact: fiscal-year spend under baseline vs. scenario
//!
//! Shifting a schedule moves spend between fiscal years even when the total
//! is unchanged. Each record's budget is spread uniformly over its phase
//! windows - design budget across the design months, construction budget
//! across the construction months, and a program's annual budget at one
//! twelfth per active month - then bucketed into July-start fiscal years.

use capflow_core::{Month, ProjectRecord, ProjectTimeline, Schedule, Timeline};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One fiscal year's spend under the baseline and under a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetImpactRow {
    /// Fiscal year, labeled by ending calendar year
    pub fiscal_year: i32,
    /// Baseline spend in dollars
    pub baseline_total: f64,
    /// Scenario spend in dollars
    pub scenario_total: f64,
    /// `scenario_total - baseline_total`
    pub delta: f64,
    /// True when the scenario spends more than the baseline this year
    pub exceeded_limit: bool,
}

/// Compare fiscal-year spend between two schedule variants of the same
/// record set
///
/// Rows cover every fiscal year either side touches, ascending.
pub fn budget_impacts(
    baseline_projects: &[ProjectRecord],
    baseline_timelines: &[ProjectTimeline],
    scenario_projects: &[ProjectRecord],
    scenario_timelines: &[ProjectTimeline],
) -> Vec<BudgetImpactRow> {
    let baseline = spread_by_fiscal_year(baseline_projects, baseline_timelines);
    let scenario = spread_by_fiscal_year(scenario_projects, scenario_timelines);

    let mut years: BTreeMap<i32, (f64, f64)> = BTreeMap::new();
    for (year, total) in baseline {
        years.entry(year).or_default().0 = total;
    }
    for (year, total) in scenario {
        years.entry(year).or_default().1 = total;
    }

    years
        .into_iter()
        .map(|(fiscal_year, (baseline_total, scenario_total))| BudgetImpactRow {
            fiscal_year,
            baseline_total,
            scenario_total,
            delta: scenario_total - baseline_total,
            exceeded_limit: scenario_total > baseline_total,
        })
        .collect()
}

/// Spread every record's budget over its phase months and sum per fiscal
/// year
pub fn spread_by_fiscal_year(
    projects: &[ProjectRecord],
    timelines: &[ProjectTimeline],
) -> BTreeMap<i32, f64> {
    let mut totals: BTreeMap<i32, f64> = BTreeMap::new();

    for (record, pt) in projects.iter().zip(timelines) {
        match &record.schedule {
            Schedule::Phased(phased) => {
                if phased.design_duration > 0 {
                    let monthly = record.design_budget / phased.design_duration as f64;
                    add_window(
                        &mut totals,
                        pt.timeline.design_start,
                        pt.timeline.design_end,
                        false,
                        monthly,
                    );
                }
                if phased.construction_duration > 0 {
                    let monthly = record.construction_budget / phased.construction_duration as f64;
                    add_window(
                        &mut totals,
                        pt.timeline.construction_start,
                        pt.timeline.construction_end,
                        false,
                        monthly,
                    );
                }
            }
            Schedule::Continuous(_) => {
                let monthly = record.annual_budget / 12.0;
                add_window(
                    &mut totals,
                    pt.timeline.design_start,
                    pt.timeline.construction_end,
                    true,
                    monthly,
                );
            }
        }
    }

    totals
}

fn add_window(
    totals: &mut BTreeMap<i32, f64>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    inclusive_end: bool,
    monthly_amount: f64,
) {
    let (Some(start), Some(end)) = (start, end) else {
        return;
    };
    if monthly_amount == 0.0 {
        return;
    }

    // First month whose start instant lies inside the window
    let mut month = Month::from_date(start);
    if month.first_day() < start {
        month = month.add_months(1);
    }
    loop {
        let cursor = month.first_day();
        let inside = if inclusive_end {
            Timeline::in_inclusive(cursor, Some(start), Some(end))
        } else {
            Timeline::in_exclusive(cursor, Some(start), Some(end))
        };
        if !inside {
            break;
        }
        *totals.entry(month.fiscal_year()).or_default() += monthly_amount;
        month = month.add_months(1);
    }
}
