//! Scenario set lifecycle management
//!
//! A `ScenarioSet` owns the baseline plus any number of editable scenarios.
//! The baseline is stored apart from the editable map, so the
//! exactly-one-baseline invariant holds structurally: it cannot be removed,
//! duplicated-over, or handed out mutably.

use crate::error::{Error, Result};
use crate::scenario::{Scenario, ScenarioId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The baseline scenario plus its editable variants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSet {
    baseline: Scenario,
    scenarios: IndexMap<ScenarioId, Scenario>,
}

impl ScenarioSet {
    /// Create a set containing only a fresh baseline
    pub fn new(baseline_id: impl Into<ScenarioId>, baseline_name: impl Into<String>) -> Self {
        Self {
            baseline: Scenario::baseline(baseline_id, baseline_name),
            scenarios: IndexMap::new(),
        }
    }

    /// The baseline scenario
    pub fn baseline(&self) -> &Scenario {
        &self.baseline
    }

    /// Look up any scenario, baseline included
    pub fn get(&self, id: &ScenarioId) -> Option<&Scenario> {
        if self.baseline.id == *id {
            Some(&self.baseline)
        } else {
            self.scenarios.get(id)
        }
    }

    /// Mutable access to an editable scenario; the baseline is refused
    pub fn get_mut(&mut self, id: &ScenarioId) -> Result<&mut Scenario> {
        if self.baseline.id == *id {
            return Err(Error::BaselineImmutable(id.to_string()));
        }
        self.scenarios
            .get_mut(id)
            .ok_or_else(|| Error::UnknownScenario(id.to_string()))
    }

    /// Duplicate an existing scenario (or the baseline) into a new editable
    /// scenario
    pub fn duplicate(
        &mut self,
        source: &ScenarioId,
        new_id: impl Into<ScenarioId>,
        new_name: impl Into<String>,
    ) -> Result<&Scenario> {
        let new_id = new_id.into();
        if new_id == self.baseline.id || self.scenarios.contains_key(&new_id) {
            return Err(Error::DuplicateScenario(new_id.to_string()));
        }
        let source = self
            .get(source)
            .ok_or_else(|| Error::UnknownScenario(source.to_string()))?;

        let duplicate = source.duplicate_as(new_id.clone(), new_name);
        self.scenarios.insert(new_id.clone(), duplicate);
        // Just inserted under this key
        Ok(&self.scenarios[&new_id])
    }

    /// Remove an editable scenario; the baseline is refused
    pub fn remove(&mut self, id: &ScenarioId) -> Result<Scenario> {
        if self.baseline.id == *id {
            return Err(Error::BaselineImmutable(id.to_string()));
        }
        self.scenarios
            .shift_remove(id)
            .ok_or_else(|| Error::UnknownScenario(id.to_string()))
    }

    /// Iterate every scenario, baseline first
    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        std::iter::once(&self.baseline).chain(self.scenarios.values())
    }

    /// Total number of scenarios, baseline included
    pub fn len(&self) -> usize {
        1 + self.scenarios.len()
    }

    /// Always false: the baseline is always present
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScheduleAdjustment;

    fn set() -> ScenarioSet {
        ScenarioSet::new("base", "Baseline")
    }

    #[test]
    fn test_new_set_has_only_baseline() {
        let set = set();
        assert_eq!(set.len(), 1);
        assert!(set.baseline().is_baseline());
        assert!(set.get(&ScenarioId::new("base")).is_some());
    }

    #[test]
    fn test_duplicate_from_baseline() {
        let mut set = set();
        let id = ScenarioId::new("base");
        let scenario = set.duplicate(&id, "s1", "Accelerated").unwrap();
        assert!(!scenario.is_baseline());
        assert_eq!(scenario.name, "Accelerated");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_duplicate_from_scenario_copies_adjustments() {
        let mut set = set();
        set.duplicate(&ScenarioId::new("base"), "s1", "First").unwrap();
        set.get_mut(&ScenarioId::new("s1"))
            .unwrap()
            .set_adjustment(
                "p1",
                ScheduleAdjustment {
                    design_start: Some("2025-01-01".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        set.duplicate(&ScenarioId::new("s1"), "s2", "Second").unwrap();
        let copy = set.get(&ScenarioId::new("s2")).unwrap();
        assert!(copy.has_adjustments());
    }

    #[test]
    fn test_duplicate_id_collision() {
        let mut set = set();
        set.duplicate(&ScenarioId::new("base"), "s1", "First").unwrap();

        let err = set
            .duplicate(&ScenarioId::new("base"), "s1", "Again")
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateScenario(_)));

        let err = set
            .duplicate(&ScenarioId::new("base"), "base", "Shadow")
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateScenario(_)));
    }

    #[test]
    fn test_duplicate_unknown_source() {
        let mut set = set();
        let err = set
            .duplicate(&ScenarioId::new("missing"), "s1", "Copy")
            .unwrap_err();
        assert!(matches!(err, Error::UnknownScenario(_)));
    }

    #[test]
    fn test_baseline_cannot_be_removed_or_borrowed_mutably() {
        let mut set = set();
        let id = ScenarioId::new("base");
        assert!(matches!(set.remove(&id), Err(Error::BaselineImmutable(_))));
        assert!(matches!(set.get_mut(&id), Err(Error::BaselineImmutable(_))));
    }

    #[test]
    fn test_remove_editable_scenario() {
        let mut set = set();
        set.duplicate(&ScenarioId::new("base"), "s1", "First").unwrap();
        let removed = set.remove(&ScenarioId::new("s1")).unwrap();
        assert_eq!(removed.id.as_str(), "s1");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_iter_baseline_first() {
        let mut set = set();
        set.duplicate(&ScenarioId::new("base"), "s1", "First").unwrap();
        set.duplicate(&ScenarioId::new("base"), "s2", "Second").unwrap();

        let ids: Vec<&str> = set.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["base", "s1", "s2"]);
    }
}
