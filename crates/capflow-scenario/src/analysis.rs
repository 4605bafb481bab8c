//! Scenario analysis: run the forecast pipeline twice and diff the results
//!
//! The analyzer derives timelines, forecasts, and gaps for the portfolio as
//! given (the baseline) and for the portfolio with a scenario's date
//! overrides applied, then assembles the comparison bundle consumed by
//! planning views: gap deltas by month, budget-timing deltas by fiscal
//! year, ranked conflict highlights and recommendations, and aggregate gap
//! statistics.

use crate::budget::{budget_impacts, BudgetImpactRow};
use crate::comparison::{compare_gaps, GapComparisonRow};
use crate::conflict::{highlight_conflicts, ConflictHighlight};
use crate::scenario::{Scenario, ScenarioId};
use crate::summary::{recommend, summarize, GapSummary, Recommendation};
use capflow_core::{
    derive_timelines, find_gaps, forecast, Forecast, Month, Portfolio, ProjectRecord,
    ProjectTimeline, StaffingGap,
};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Everything one scenario analysis produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAnalysis {
    /// The analyzed scenario
    pub scenario_id: ScenarioId,
    /// First month of the scenario forecast
    pub start: Month,
    /// Records with the scenario's overrides applied
    pub projects: Vec<ProjectRecord>,
    /// Timelines derived from the adjusted records
    pub timelines: Vec<ProjectTimeline>,
    /// The scenario-side forecast
    pub forecast: Forecast,
    /// The scenario-side staffing gaps
    pub gaps: Vec<StaffingGap>,
    /// Aggregate statistics over the scenario gaps
    pub gap_summary: GapSummary,
    /// Per-month baseline vs. scenario gap totals
    pub gap_comparison: Vec<GapComparisonRow>,
    /// Per-fiscal-year baseline vs. scenario spend
    pub budget_impacts: Vec<BudgetImpactRow>,
    /// Worst gaps attributed to their driving records
    pub conflict_highlights: Vec<ConflictHighlight>,
    /// Ranked planning suggestions
    pub recommendations: Vec<Recommendation>,
}

/// Analyze a scenario against its baseline portfolio, anchored at `today`
///
/// `availability` optionally overrides per-category monthly capacity in FTE
/// for both pipeline runs. A scenario with no overrides reproduces the
/// baseline outputs exactly.
pub fn analyze_at(
    today: NaiveDate,
    portfolio: &Portfolio,
    scenario: &Scenario,
    horizon_months: u32,
    availability: Option<&IndexMap<String, f64>>,
) -> ScenarioAnalysis {
    let scenario_portfolio = Portfolio {
        projects: scenario.apply_to(&portfolio.projects),
        categories: portfolio.categories.clone(),
        allocations: portfolio.allocations.clone(),
        project_types: portfolio.project_types.clone(),
    };

    let baseline_forecast = forecast::run_at(today, portfolio, horizon_months, availability);
    let baseline_gaps = find_gaps(&baseline_forecast, &portfolio.categories);
    let baseline_timelines = derive_timelines(&portfolio.projects);

    let scenario_forecast =
        forecast::run_at(today, &scenario_portfolio, horizon_months, availability);
    let scenario_gaps = find_gaps(&scenario_forecast, &scenario_portfolio.categories);
    let scenario_timelines = derive_timelines(&scenario_portfolio.projects);

    let gap_summary = summarize(&scenario_gaps);
    let gap_comparison = compare_gaps(&baseline_gaps, &scenario_gaps);
    let budget_rows = budget_impacts(
        &portfolio.projects,
        &baseline_timelines,
        &scenario_portfolio.projects,
        &scenario_timelines,
    );
    let conflict_highlights = highlight_conflicts(
        &scenario_gaps,
        &scenario_portfolio.projects,
        &scenario_timelines,
        &scenario_portfolio.allocations,
        &scenario_portfolio.categories,
    );
    let recommendations = recommend(&gap_summary, &conflict_highlights);

    ScenarioAnalysis {
        scenario_id: scenario.id.clone(),
        start: scenario_forecast.start,
        projects: scenario_portfolio.projects,
        timelines: scenario_timelines,
        forecast: scenario_forecast,
        gaps: scenario_gaps,
        gap_summary,
        gap_comparison,
        budget_impacts: budget_rows,
        conflict_highlights,
        recommendations,
    }
}

/// Analyze a scenario anchored at the current local date
pub fn analyze(
    portfolio: &Portfolio,
    scenario: &Scenario,
    horizon_months: u32,
    availability: Option<&IndexMap<String, f64>>,
) -> ScenarioAnalysis {
    analyze_at(
        chrono::Local::now().date_naive(),
        portfolio,
        scenario,
        horizon_months,
        availability,
    )
}
