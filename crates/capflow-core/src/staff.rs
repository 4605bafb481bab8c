//! Staff categories and per-project hour allocations

use crate::config::HOURS_PER_FTE_MONTH;
use crate::identity::{CategoryId, ProjectId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A staffing category (e.g. civil engineers, inspectors)
///
/// The `name` doubles as the demand-aggregation key in forecast output, so
/// it must be unique across the portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffCategory {
    /// Unique identifier
    pub id: CategoryId,
    /// Display name, used as the aggregation key in forecast rows
    pub name: String,
    /// Billing rate in dollars per hour
    #[serde(default)]
    pub hourly_rate: f64,
    /// Hours per month this category can spend on design work
    #[serde(default)]
    pub design_capacity: f64,
    /// Hours per month this category can spend on construction work
    #[serde(default)]
    pub construction_capacity: f64,
}

impl StaffCategory {
    /// Create a category with no capacity
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hourly_rate: 0.0,
            design_capacity: 0.0,
            construction_capacity: 0.0,
        }
    }

    /// Total monthly availability converted to FTE
    pub fn monthly_capacity_fte(&self) -> f64 {
        (self.design_capacity + self.construction_capacity) / HOURS_PER_FTE_MONTH
    }
}

/// Hours allocated to one (project, category) pair, totals for the whole
/// phase - the monthly rate is total divided by the phase duration in months
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseHours {
    /// Project-management hours (tracked, but not forecast demand)
    #[serde(default)]
    pub pm_hours: f64,
    /// Design-phase hours
    #[serde(default)]
    pub design_hours: f64,
    /// Construction-phase hours
    #[serde(default)]
    pub construction_hours: f64,
}

impl PhaseHours {
    /// Create an allocation
    pub fn new(pm_hours: f64, design_hours: f64, construction_hours: f64) -> Self {
        Self {
            pm_hours,
            design_hours,
            construction_hours,
        }
    }

    /// True when every field is zero
    pub fn is_zero(&self) -> bool {
        self.pm_hours == 0.0 && self.design_hours == 0.0 && self.construction_hours == 0.0
    }
}

/// Sparse two-level allocation map: project -> category -> hours
///
/// Absent keys mean zero allocated hours; lookups never fail. Insertion
/// order is preserved so iteration is deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllocationTable {
    by_project: IndexMap<ProjectId, IndexMap<CategoryId, PhaseHours>>,
}

impl AllocationTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the allocation for a (project, category) pair, replacing any
    /// existing entry. All-zero allocations are removed rather than stored.
    pub fn set(
        &mut self,
        project: impl Into<ProjectId>,
        category: impl Into<CategoryId>,
        hours: PhaseHours,
    ) {
        let project = project.into();
        let category = category.into();
        if hours.is_zero() {
            if let Some(row) = self.by_project.get_mut(&project) {
                row.shift_remove(&category);
                if row.is_empty() {
                    self.by_project.shift_remove(&project);
                }
            }
        } else {
            self.by_project.entry(project).or_default().insert(category, hours);
        }
    }

    /// Allocated hours for a (project, category) pair; absent entries are zero
    pub fn hours_for(&self, project: &ProjectId, category: &CategoryId) -> PhaseHours {
        self.by_project
            .get(project)
            .and_then(|row| row.get(category))
            .copied()
            .unwrap_or_default()
    }

    /// All allocations for one project
    pub fn project_row<'a>(
        &'a self,
        project: &ProjectId,
    ) -> impl Iterator<Item = (&'a CategoryId, &'a PhaseHours)> + 'a {
        self.by_project.get(project).into_iter().flatten()
    }

    /// Remove every allocation for a project
    pub fn remove_project(&mut self, project: &ProjectId) {
        self.by_project.shift_remove(project);
    }

    /// Iterate all (project, category, hours) entries
    pub fn iter(&self) -> impl Iterator<Item = (&ProjectId, &CategoryId, &PhaseHours)> {
        self.by_project
            .iter()
            .flat_map(|(p, row)| row.iter().map(move |(c, h)| (p, c, h)))
    }

    /// Number of (project, category) entries
    pub fn len(&self) -> usize {
        self.by_project.values().map(|row| row.len()).sum()
    }

    /// True when no allocations are stored
    pub fn is_empty(&self) -> bool {
        self.by_project.is_empty()
    }
}
