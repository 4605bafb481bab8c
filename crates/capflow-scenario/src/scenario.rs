//! Scenario model: named schedule variants compared against a baseline
//!
//! A scenario is a sparse set of per-record date overrides. The baseline
//! scenario carries no overrides and is immutable; editable scenarios are
//! created by duplicating the baseline or another scenario. Overrides for
//! records that no longer exist are ignored, and override fields that do not
//! apply to a record's schedule shape fall back to the baseline dates.

use crate::error::{Error, Result};
use capflow_core::{ProjectId, ProjectRecord, Schedule};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a scenario
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioId(pub String);

impl ScenarioId {
    /// Create a new scenario ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ScenarioId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Per-record date overrides; every field is optional and missing fields
/// fall back to the record's own dates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleAdjustment {
    /// Overrides a phased record's design start, `YYYY-MM-DD`
    #[serde(default)]
    pub design_start: Option<String>,
    /// Overrides a phased record's construction start, `YYYY-MM-DD`
    #[serde(default)]
    pub construction_start: Option<String>,
    /// Overrides a program's start, `YYYY-MM-DD`
    #[serde(default)]
    pub program_start: Option<String>,
    /// Overrides a program's end, `YYYY-MM-DD`
    #[serde(default)]
    pub program_end: Option<String>,
}

impl ScheduleAdjustment {
    /// True when no field overrides anything
    pub fn is_empty(&self) -> bool {
        self.design_start.is_none()
            && self.construction_start.is_none()
            && self.program_start.is_none()
            && self.program_end.is_none()
    }
}

/// A named schedule variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Unique identifier
    pub id: ScenarioId,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    is_baseline: bool,
    #[serde(default)]
    adjustments: IndexMap<ProjectId, ScheduleAdjustment>,
}

impl Scenario {
    /// Create the baseline scenario (no overrides, immutable)
    pub fn baseline(id: impl Into<ScenarioId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            is_baseline: true,
            adjustments: IndexMap::new(),
        }
    }

    /// Create an editable copy of this scenario under a new id and name
    pub fn duplicate_as(&self, id: impl Into<ScenarioId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: self.description.clone(),
            is_baseline: false,
            adjustments: self.adjustments.clone(),
        }
    }

    /// True for the baseline scenario
    pub fn is_baseline(&self) -> bool {
        self.is_baseline
    }

    /// The override stored for a record, if any
    pub fn adjustment(&self, project: &ProjectId) -> Option<&ScheduleAdjustment> {
        self.adjustments.get(project)
    }

    /// Iterate stored overrides in insertion order
    pub fn adjustments(&self) -> impl Iterator<Item = (&ProjectId, &ScheduleAdjustment)> {
        self.adjustments.iter()
    }

    /// True when at least one record has an override
    pub fn has_adjustments(&self) -> bool {
        !self.adjustments.is_empty()
    }

    /// Set (or with an empty adjustment, clear) the override for a record
    pub fn set_adjustment(
        &mut self,
        project: impl Into<ProjectId>,
        adjustment: ScheduleAdjustment,
    ) -> Result<()> {
        self.ensure_editable()?;
        let project = project.into();
        if adjustment.is_empty() {
            self.adjustments.shift_remove(&project);
        } else {
            self.adjustments.insert(project, adjustment);
        }
        Ok(())
    }

    /// Remove one record's override, restoring its baseline dates
    pub fn reset_project(&mut self, project: &ProjectId) -> Result<()> {
        self.ensure_editable()?;
        self.adjustments.shift_remove(project);
        Ok(())
    }

    /// Remove every override, restoring the baseline schedule
    pub fn reset_all(&mut self) -> Result<()> {
        self.ensure_editable()?;
        self.adjustments.clear();
        Ok(())
    }

    /// Apply this scenario's overrides to a record list
    ///
    /// Returns adjusted clones in input order. Overrides for unknown record
    /// ids are ignored, and override fields that do not match a record's
    /// schedule shape are treated as absent.
    pub fn apply_to(&self, records: &[ProjectRecord]) -> Vec<ProjectRecord> {
        records
            .iter()
            .map(|record| {
                let mut record = record.clone();
                if let Some(adjustment) = self.adjustments.get(&record.id) {
                    apply_adjustment(&mut record, adjustment);
                }
                record
            })
            .collect()
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.is_baseline {
            Err(Error::BaselineImmutable(self.id.to_string()))
        } else {
            Ok(())
        }
    }
}

fn apply_adjustment(record: &mut ProjectRecord, adjustment: &ScheduleAdjustment) {
    match &mut record.schedule {
        Schedule::Phased(phased) => {
            if let Some(date) = &adjustment.design_start {
                phased.design_start = Some(date.clone());
            }
            if let Some(date) = &adjustment.construction_start {
                phased.construction_start = Some(date.clone());
            }
        }
        Schedule::Continuous(cont) => {
            if let Some(date) = &adjustment.program_start {
                cont.start = Some(date.clone());
            }
            if let Some(date) = &adjustment.program_end {
                cont.end = Some(date.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capflow_core::{ContinuousSchedule, PhasedSchedule};

    fn editable() -> Scenario {
        Scenario::baseline("base", "Baseline").duplicate_as("s1", "Accelerated")
    }

    #[test]
    fn test_baseline_rejects_mutation() {
        let mut baseline = Scenario::baseline("base", "Baseline");
        let err = baseline
            .set_adjustment("p1", ScheduleAdjustment::default())
            .unwrap_err();
        assert!(matches!(err, Error::BaselineImmutable(_)));
        assert!(baseline.reset_all().is_err());
    }

    #[test]
    fn test_duplicate_is_editable() {
        let mut scenario = editable();
        assert!(!scenario.is_baseline());

        scenario
            .set_adjustment(
                "p1",
                ScheduleAdjustment {
                    design_start: Some("2024-03-01".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(scenario.has_adjustments());
    }

    #[test]
    fn test_empty_adjustment_clears() {
        let mut scenario = editable();
        scenario
            .set_adjustment(
                "p1",
                ScheduleAdjustment {
                    design_start: Some("2024-03-01".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        scenario
            .set_adjustment("p1", ScheduleAdjustment::default())
            .unwrap();
        assert!(!scenario.has_adjustments());
    }

    #[test]
    fn test_reset_project_and_all() {
        let mut scenario = editable();
        for id in ["p1", "p2"] {
            scenario
                .set_adjustment(
                    id,
                    ScheduleAdjustment {
                        design_start: Some("2025-01-01".to_string()),
                        ..Default::default()
                    },
                )
                .unwrap();
        }

        scenario.reset_project(&ProjectId::new("p1")).unwrap();
        assert!(scenario.adjustment(&ProjectId::new("p1")).is_none());
        assert!(scenario.adjustment(&ProjectId::new("p2")).is_some());

        scenario.reset_all().unwrap();
        assert!(!scenario.has_adjustments());
    }

    #[test]
    fn test_apply_to_overrides_matching_fields() {
        let records = vec![
            ProjectRecord::phased(
                "p1",
                "Bridge",
                PhasedSchedule {
                    design_start: Some("2024-01-01".to_string()),
                    design_duration: 3,
                    construction_start: Some("2024-04-01".to_string()),
                    construction_duration: 6,
                },
            ),
            ProjectRecord::continuous(
                "pr1",
                "Pavement",
                ContinuousSchedule {
                    start: Some("2024-06-01".to_string()),
                    end: Some("2025-05-31".to_string()),
                    ..Default::default()
                },
            ),
        ];

        let mut scenario = editable();
        scenario
            .set_adjustment(
                "p1",
                ScheduleAdjustment {
                    design_start: Some("2024-03-01".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        scenario
            .set_adjustment(
                "pr1",
                ScheduleAdjustment {
                    program_end: Some("2024-12-31".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let adjusted = scenario.apply_to(&records);

        match &adjusted[0].schedule {
            Schedule::Phased(p) => {
                assert_eq!(p.design_start.as_deref(), Some("2024-03-01"));
                // Untouched field keeps its baseline value
                assert_eq!(p.construction_start.as_deref(), Some("2024-04-01"));
            }
            Schedule::Continuous(_) => panic!("expected phased"),
        }
        match &adjusted[1].schedule {
            Schedule::Continuous(c) => {
                assert_eq!(c.start.as_deref(), Some("2024-06-01"));
                assert_eq!(c.end.as_deref(), Some("2024-12-31"));
            }
            Schedule::Phased(_) => panic!("expected continuous"),
        }
    }

    #[test]
    fn test_apply_to_ignores_unknown_ids_and_mismatched_fields() {
        let records = vec![ProjectRecord::phased(
            "p1",
            "Bridge",
            PhasedSchedule {
                design_start: Some("2024-01-01".to_string()),
                design_duration: 3,
                construction_start: None,
                construction_duration: 0,
            },
        )];

        let mut scenario = editable();
        // Unknown record id
        scenario
            .set_adjustment(
                "ghost",
                ScheduleAdjustment {
                    design_start: Some("2030-01-01".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        // Program fields on a phased record
        scenario
            .set_adjustment(
                "p1",
                ScheduleAdjustment {
                    program_start: Some("2030-01-01".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let adjusted = scenario.apply_to(&records);
        assert_eq!(adjusted.len(), 1);
        match &adjusted[0].schedule {
            Schedule::Phased(p) => assert_eq!(p.design_start.as_deref(), Some("2024-01-01")),
            Schedule::Continuous(_) => panic!("expected phased"),
        }
    }

    #[test]
    fn test_serde_round_trip_keeps_baseline_flag() {
        let scenario = Scenario::baseline("base", "Baseline");
        let ron = ron::to_string(&scenario).unwrap();
        let back: Scenario = ron::from_str(&ron).unwrap();
        assert!(back.is_baseline());
    }
}
