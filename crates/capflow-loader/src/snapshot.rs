//! Snapshot schema for portfolio input files

use capflow_core::{
    AllocationTable, CategoryId, PhaseHours, Portfolio, ProjectId, ProjectRecord, ProjectType,
    StaffCategory,
};
use capflow_scenario::Scenario;
use serde::{Deserialize, Serialize};

/// One allocation row as written in input files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationEntry {
    /// Record the hours are allocated to
    pub project_id: ProjectId,
    /// Category the hours come from
    pub category_id: CategoryId,
    #[serde(default)]
    pub pm_hours: f64,
    #[serde(default)]
    pub design_hours: f64,
    #[serde(default)]
    pub construction_hours: f64,
}

/// A portfolio input file: any subset of the sections may be present
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
    #[serde(default)]
    pub categories: Vec<StaffCategory>,
    #[serde(default)]
    pub allocations: Vec<AllocationEntry>,
    #[serde(default)]
    pub project_types: Vec<ProjectType>,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

impl PortfolioSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert into an engine portfolio plus the scenarios the file carried
    ///
    /// All-zero allocation rows are dropped, matching the allocation
    /// table's own storage rule.
    pub fn into_portfolio(self) -> (Portfolio, Vec<Scenario>) {
        let mut allocations = AllocationTable::new();
        for entry in self.allocations {
            allocations.set(
                entry.project_id,
                entry.category_id,
                PhaseHours::new(entry.pm_hours, entry.design_hours, entry.construction_hours),
            );
        }

        let portfolio = Portfolio {
            projects: self.projects,
            categories: self.categories,
            allocations,
            project_types: self.project_types,
        };
        (portfolio, self.scenarios)
    }
}
