//! Baseline-vs-scenario gap comparison by month

use capflow_core::{Month, StaffingGap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Total staffing gap for one month under the baseline and under a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapComparisonRow {
    /// The month being compared
    pub month: Month,
    /// Baseline gap summed across categories, FTE
    pub baseline_gap: f64,
    /// Scenario gap summed across categories, FTE
    pub scenario_gap: f64,
    /// `scenario_gap - baseline_gap`
    pub delta: f64,
}

/// Aggregate two gap lists into per-month comparison rows
///
/// Rows cover every month where either side has a gap, in chronological
/// order. A month absent from one side contributes zero on that side.
pub fn compare_gaps(baseline: &[StaffingGap], scenario: &[StaffingGap]) -> Vec<GapComparisonRow> {
    let mut totals: BTreeMap<Month, (f64, f64)> = BTreeMap::new();

    for gap in baseline {
        totals.entry(gap.month).or_default().0 += gap.gap;
    }
    for gap in scenario {
        totals.entry(gap.month).or_default().1 += gap.gap;
    }

    totals
        .into_iter()
        .map(|(month, (baseline_gap, scenario_gap))| GapComparisonRow {
            month,
            baseline_gap,
            scenario_gap,
            delta: scenario_gap - baseline_gap,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gap(year: i32, month: i32, category: &str, amount: f64) -> StaffingGap {
        StaffingGap {
            month: Month::new(year, month),
            category: category.to_string(),
            required: amount + 1.0,
            available: 1.0,
            gap: amount,
        }
    }

    #[test]
    fn test_sums_across_categories() {
        let baseline = vec![
            gap(2024, 1, "Engineers", 0.5),
            gap(2024, 1, "Inspectors", 0.3),
        ];
        let scenario = vec![gap(2024, 1, "Engineers", 0.2)];

        let rows = compare_gaps(&baseline, &scenario);
        assert_eq!(rows.len(), 1);
        assert!((rows[0].baseline_gap - 0.8).abs() < 1e-12);
        assert!((rows[0].scenario_gap - 0.2).abs() < 1e-12);
        assert!((rows[0].delta - (-0.6)).abs() < 1e-12);
    }

    #[test]
    fn test_covers_union_of_months_in_order() {
        let baseline = vec![gap(2024, 2, "Engineers", 0.5)];
        let scenario = vec![gap(2024, 4, "Engineers", 0.5), gap(2024, 1, "Engineers", 0.3)];

        let rows = compare_gaps(&baseline, &scenario);
        let months: Vec<Month> = rows.iter().map(|r| r.month).collect();
        assert_eq!(
            months,
            vec![Month::new(2024, 1), Month::new(2024, 2), Month::new(2024, 4)]
        );

        // Months absent from one side read as zero there
        assert_eq!(rows[1].scenario_gap, 0.0);
        assert!((rows[1].delta + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_identical_inputs_yield_zero_deltas() {
        let gaps = vec![gap(2024, 1, "Engineers", 0.5), gap(2024, 3, "Engineers", 1.2)];
        let rows = compare_gaps(&gaps, &gaps);
        assert!(rows.iter().all(|r| r.delta == 0.0));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(compare_gaps(&[], &[]).is_empty());
    }
}
