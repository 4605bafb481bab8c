//! Aggregate gap statistics and ranked recommendations

use crate::conflict::ConflictHighlight;
use capflow_core::{Severity, StaffingGap};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Scalar statistics over a scenario's staffing gaps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapSummary {
    /// Sum of every gap, in FTE-months
    pub total_gap: f64,
    /// Gaps classified critical
    pub critical_count: usize,
    /// Gaps classified moderate
    pub moderate_count: usize,
    /// Largest single gap, FTE
    pub worst_gap: f64,
    /// Month label of the largest gap, empty when there are no gaps
    pub worst_month_label: String,
    /// Category of the largest gap, empty when there are no gaps
    pub worst_category: String,
    /// Distinct months with at least one gap
    pub shortage_month_count: usize,
    /// Distinct shorthanded categories, in first-gap order
    pub affected_categories: Vec<String>,
}

/// Summarize a gap list
pub fn summarize(gaps: &[StaffingGap]) -> GapSummary {
    let mut summary = GapSummary::default();
    if gaps.is_empty() {
        return summary;
    }

    let mut months = HashSet::new();
    let mut categories = IndexSet::new();
    let mut worst: &StaffingGap = &gaps[0];

    for gap in gaps {
        summary.total_gap += gap.gap;
        match gap.severity() {
            Severity::Critical => summary.critical_count += 1,
            Severity::Moderate => summary.moderate_count += 1,
        }
        months.insert(gap.month);
        categories.insert(gap.category.clone());
        if gap.gap > worst.gap {
            worst = gap;
        }
    }

    summary.worst_gap = worst.gap;
    summary.worst_month_label = worst.month_label();
    summary.worst_category = worst.category.clone();
    summary.shortage_month_count = months.len();
    summary.affected_categories = categories.into_iter().collect();
    summary
}

/// How urgently a recommendation should be acted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A human-readable planning suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub message: String,
}

/// Message used when a scenario has no conflicts
pub const NO_CONFLICTS_MESSAGE: &str =
    "No significant staffing conflicts detected; current schedules fit available capacity.";

/// Derive ranked recommendations from gap statistics and conflict
/// highlights
///
/// Always returns at least one entry: a fixed fallback when there is
/// nothing to flag.
pub fn recommend(summary: &GapSummary, conflicts: &[ConflictHighlight]) -> Vec<Recommendation> {
    if conflicts.is_empty() {
        return vec![Recommendation {
            priority: Priority::Low,
            message: NO_CONFLICTS_MESSAGE.to_string(),
        }];
    }

    let mut recommendations = Vec::new();

    let worst = &conflicts[0];
    let message = match worst.top_contributors.first() {
        Some(driver) => format!(
            "{} is short {:.1} FTE in {}, driven mostly by {}; shift that schedule or add {} capacity.",
            worst.category,
            worst.gap,
            worst.month_label(),
            driver.name,
            worst.category,
        ),
        None => format!(
            "{} is short {:.1} FTE in {}; add {} capacity or re-sequence the work.",
            worst.category,
            worst.gap,
            worst.month_label(),
            worst.category,
        ),
    };
    recommendations.push(Recommendation {
        priority: Priority::High,
        message,
    });

    if summary.critical_count > 0 {
        recommendations.push(Recommendation {
            priority: Priority::High,
            message: format!(
                "{} shortfall(s) exceed one full FTE; consider consultant delivery or hiring in {}.",
                summary.critical_count, summary.worst_category,
            ),
        });
    }

    let mut by_category: IndexMap<&str, usize> = IndexMap::new();
    for conflict in conflicts {
        *by_category.entry(conflict.category.as_str()).or_default() += 1;
    }
    if let Some((category, count)) = by_category.iter().find(|(_, count)| **count >= 2) {
        recommendations.push(Recommendation {
            priority: Priority::Medium,
            message: format!(
                "Shortfalls concentrate in {} across {} of the worst months; rebalance that category's project load.",
                category, count,
            ),
        });
    }

    if summary.moderate_count > 0 {
        recommendations.push(Recommendation {
            priority: Priority::Low,
            message: format!(
                "{} moderate shortfall(s) remain; small schedule shifts may absorb them.",
                summary.moderate_count,
            ),
        });
    }

    recommendations.sort_by_key(|r| r.priority);
    recommendations
}
