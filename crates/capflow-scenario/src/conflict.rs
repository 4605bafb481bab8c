//! Conflict highlights: the worst staffing gaps and who causes them
//!
//! A gap record says a month and category are short; a conflict highlight
//! adds the records responsible, so a planner knows which schedules to move.
//! Contributions are computed with the same demand function the forecaster
//! uses, so attribution always sums consistently with the aggregate numbers.
//!
//! Output is deterministic: highlights rank by gap size (ties broken by
//! month, then category) and contributors by demand (ties broken by record
//! id).

use capflow_core::forecast::demand_fte;
use capflow_core::{
    AllocationTable, Month, ProjectId, ProjectRecord, ProjectTimeline, Severity, StaffCategory,
    StaffingGap,
};
use serde::{Deserialize, Serialize};

/// Highlights reported per analysis
pub const MAX_HIGHLIGHTS: usize = 5;

/// Contributing records reported per highlight
pub const MAX_CONTRIBUTORS: usize = 3;

/// One record's share of a month's demand for a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectContribution {
    pub project_id: ProjectId,
    pub name: String,
    /// FTE this record demands from the category in the highlighted month
    pub fte: f64,
}

/// One of the worst gaps in a scenario, attributed to its top contributors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictHighlight {
    /// Month of the shortfall
    pub month: Month,
    /// Category name
    pub category: String,
    /// Shortfall in FTE
    pub gap: f64,
    /// Severity of the shortfall
    pub severity: Severity,
    /// Records demanding the most from this category this month, largest
    /// first
    pub top_contributors: Vec<ProjectContribution>,
}

impl ConflictHighlight {
    /// Display label for the highlighted month
    pub fn month_label(&self) -> String {
        self.month.label()
    }
}

/// Rank the worst gaps and attribute each to its top contributing records
pub fn highlight_conflicts(
    gaps: &[StaffingGap],
    projects: &[ProjectRecord],
    timelines: &[ProjectTimeline],
    allocations: &AllocationTable,
    categories: &[StaffCategory],
) -> Vec<ConflictHighlight> {
    let mut ranked: Vec<&StaffingGap> = gaps.iter().collect();
    ranked.sort_by(|a, b| {
        b.gap
            .total_cmp(&a.gap)
            .then_with(|| a.month.cmp(&b.month))
            .then_with(|| a.category.cmp(&b.category))
    });

    ranked
        .into_iter()
        .take(MAX_HIGHLIGHTS)
        .filter_map(|gap| {
            let category = categories.iter().find(|c| c.name == gap.category)?;
            let cursor = gap.month.first_day();

            let mut contributors: Vec<ProjectContribution> = projects
                .iter()
                .zip(timelines)
                .filter_map(|(record, pt)| {
                    let hours = allocations.hours_for(&record.id, &category.id);
                    let fte = demand_fte(record, &pt.timeline, hours, category, cursor);
                    (fte > 0.0).then(|| ProjectContribution {
                        project_id: record.id.clone(),
                        name: record.name.clone(),
                        fte,
                    })
                })
                .collect();

            contributors.sort_by(|a, b| {
                b.fte
                    .total_cmp(&a.fte)
                    .then_with(|| a.project_id.as_str().cmp(b.project_id.as_str()))
            });
            contributors.truncate(MAX_CONTRIBUTORS);

            Some(ConflictHighlight {
                month: gap.month,
                category: gap.category.clone(),
                gap: gap.gap,
                severity: gap.severity(),
                top_contributors: contributors,
            })
        })
        .collect()
}
