//! Portfolio records: capital projects and recurring programs
//!
//! A portfolio holds two kinds of work. *Projects* carry discrete design and
//! construction phases, each with its own start date and duration. *Programs*
//! are continuous bodies of work modeled as a single active window with
//! monthly hour commitments. The two shapes share one record type with a
//! tagged `Schedule` enum so every consumer matches exhaustively instead of
//! probing fields.

use crate::identity::{CategoryId, ProjectId};
use crate::staff::{AllocationTable, StaffCategory};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How a project is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryType {
    /// Delivered by in-house staff
    #[default]
    SelfPerform,
    /// Mixed in-house and consultant delivery
    Hybrid,
    /// Delivered by consultants
    Consultant,
}

/// A project classification (plain reference data)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectType {
    pub id: String,
    pub name: String,
}

/// Monthly hour commitments a program draws from one staff category
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContinuousHours {
    #[serde(default)]
    pub pm_hours: f64,
    #[serde(default)]
    pub design_hours: f64,
    #[serde(default)]
    pub construction_hours: f64,
}

impl ContinuousHours {
    /// Create a monthly commitment
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

/// Schedule fields for a phased capital project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhasedSchedule {
    /// Design phase start date, `YYYY-MM-DD`
    #[serde(default)]
    pub design_start: Option<String>,
    /// Design phase length in months
    #[serde(default)]
    pub design_duration: u32,
    /// Construction phase start date, `YYYY-MM-DD`
    #[serde(default)]
    pub construction_start: Option<String>,
    /// Construction phase length in months
    #[serde(default)]
    pub construction_duration: u32,
}

/// Schedule fields for a continuous program
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContinuousSchedule {
    /// Program start date, `YYYY-MM-DD`
    #[serde(default)]
    pub start: Option<String>,
    /// Program end date, `YYYY-MM-DD`; must not precede `start`
    #[serde(default)]
    pub end: Option<String>,
    /// Per-category monthly commitments; entries that go all-zero are pruned
    #[serde(default)]
    pub hours_by_category: IndexMap<CategoryId, ContinuousHours>,
    /// Rollup of per-category PM hours
    #[serde(default)]
    pub pm_hours: f64,
    /// Rollup of per-category design hours
    #[serde(default)]
    pub design_hours: f64,
    /// Rollup of per-category construction hours
    #[serde(default)]
    pub construction_hours: f64,
}

impl ContinuousSchedule {
    /// Set (or with all-zero hours, remove) one category's monthly
    /// commitment, then recompute the rollup fields
    pub fn set_category_hours(&mut self, category: impl Into<CategoryId>, hours: ContinuousHours) {
        let category = category.into();
        if hours.is_zero() {
            self.hours_by_category.shift_remove(&category);
        } else {
            self.hours_by_category.insert(category, hours);
        }
        self.recompute_rollups();
    }

    /// Recompute the rollup fields from the per-category breakdown
    pub fn recompute_rollups(&mut self) {
        self.pm_hours = self.hours_by_category.values().map(|h| h.pm_hours).sum();
        self.design_hours = self.hours_by_category.values().map(|h| h.design_hours).sum();
        self.construction_hours = self
            .hours_by_category
            .values()
            .map(|h| h.construction_hours)
            .sum();
    }
}

/// The schedule variant of a portfolio record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Schedule {
    /// Discrete design + construction phases
    Phased(PhasedSchedule),
    /// One continuous active window
    Continuous(ContinuousSchedule),
}

/// A capital project or recurring program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Unique, stable identifier
    pub id: ProjectId,
    /// Display name
    pub name: String,
    /// Optional classification reference
    #[serde(default)]
    pub project_type_id: Option<String>,
    /// Delivery model
    #[serde(default)]
    pub delivery: DeliveryType,
    /// Total budget in dollars
    #[serde(default)]
    pub total_budget: f64,
    /// Design-phase budget in dollars
    #[serde(default)]
    pub design_budget: f64,
    /// Construction-phase budget in dollars
    #[serde(default)]
    pub construction_budget: f64,
    /// Annual budget in dollars (programs)
    #[serde(default)]
    pub annual_budget: f64,
    /// Phased or continuous schedule
    pub schedule: Schedule,
}

impl ProjectRecord {
    /// Create a phased project record
    pub fn phased(
        id: impl Into<ProjectId>,
        name: impl Into<String>,
        schedule: PhasedSchedule,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            project_type_id: None,
            delivery: DeliveryType::default(),
            total_budget: 0.0,
            design_budget: 0.0,
            construction_budget: 0.0,
            annual_budget: 0.0,
            schedule: Schedule::Phased(schedule),
        }
    }

    /// Create a continuous program record
    pub fn continuous(
        id: impl Into<ProjectId>,
        name: impl Into<String>,
        schedule: ContinuousSchedule,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            project_type_id: None,
            delivery: DeliveryType::default(),
            total_budget: 0.0,
            design_budget: 0.0,
            construction_budget: 0.0,
            annual_budget: 0.0,
            schedule: Schedule::Continuous(schedule),
        }
    }

    /// True for continuous program records
    pub fn is_program(&self) -> bool {
        matches!(self.schedule, Schedule::Continuous(_))
    }
}

/// The full input snapshot the engine computes over
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Portfolio {
    /// All projects and programs
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
    /// All staff categories
    #[serde(default)]
    pub categories: Vec<StaffCategory>,
    /// Hour allocations by (project, category)
    #[serde(default)]
    pub allocations: AllocationTable,
    /// Project classifications (reference data)
    #[serde(default)]
    pub project_types: Vec<ProjectType>,
}

impl Portfolio {
    /// Create an empty portfolio
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a record by id
    pub fn project(&self, id: &ProjectId) -> Option<&ProjectRecord> {
        self.projects.iter().find(|p| &p.id == id)
    }

    /// Look up a category by id
    pub fn category(&self, id: &CategoryId) -> Option<&StaffCategory> {
        self.categories.iter().find(|c| &c.id == id)
    }
}
