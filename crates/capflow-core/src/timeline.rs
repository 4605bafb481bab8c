//! Timeline derivation: raw schedule fields to concrete phase windows
//!
//! Every forecast run re-derives timelines from the raw date strings; they
//! are never persisted. Unparsable dates come through as `None`, which makes
//! every window comparison false - the record still participates in the run
//! but contributes no demand.

use crate::month::{add_months_to_date, parse_date};
use crate::portfolio::{ProjectRecord, Schedule};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::identity::ProjectId;

/// Concrete phase windows for one record
///
/// For programs all four bounds collapse to the single program window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub design_start: Option<NaiveDate>,
    pub design_end: Option<NaiveDate>,
    pub construction_start: Option<NaiveDate>,
    pub construction_end: Option<NaiveDate>,
}

impl Timeline {
    /// Derive the timeline for one record
    pub fn for_record(record: &ProjectRecord) -> Self {
        match &record.schedule {
            Schedule::Phased(phased) => {
                let design_start = parse_date(phased.design_start.as_deref());
                let design_end =
                    design_start.and_then(|d| add_months_to_date(d, phased.design_duration));
                let construction_start = parse_date(phased.construction_start.as_deref());
                let construction_end = construction_start
                    .and_then(|d| add_months_to_date(d, phased.construction_duration));
                Self {
                    design_start,
                    design_end,
                    construction_start,
                    construction_end,
                }
            }
            Schedule::Continuous(cont) => {
                let start = parse_date(cont.start.as_deref());
                let end = parse_date(cont.end.as_deref());
                Self {
                    design_start: start,
                    design_end: end,
                    construction_start: start,
                    construction_end: end,
                }
            }
        }
    }

    /// Earliest usable start instant, used to anchor the forecast horizon
    pub fn earliest_start(&self) -> Option<NaiveDate> {
        self.design_start
    }

    /// True when `instant` falls within `[start, end)`; false whenever a
    /// bound is missing
    pub fn in_exclusive(instant: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
        match (start, end) {
            (Some(s), Some(e)) => s <= instant && instant < e,
            _ => false,
        }
    }

    /// True when `instant` falls within `[start, end]`, end bound included;
    /// false whenever a bound is missing
    pub fn in_inclusive(instant: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
        match (start, end) {
            (Some(s), Some(e)) => s <= instant && instant <= e,
            _ => false,
        }
    }
}

/// A record id paired with its derived timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTimeline {
    pub project_id: ProjectId,
    pub timeline: Timeline,
}

/// Derive timelines for every record, in input order
pub fn derive_timelines(records: &[ProjectRecord]) -> Vec<ProjectTimeline> {
    records
        .iter()
        .map(|record| ProjectTimeline {
            project_id: record.id.clone(),
            timeline: Timeline::for_record(record),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::{ContinuousSchedule, PhasedSchedule};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_phased_timeline() {
        let record = ProjectRecord::phased(
            "p1",
            "Bridge",
            PhasedSchedule {
                design_start: Some("2024-01-01".to_string()),
                design_duration: 3,
                construction_start: Some("2024-04-01".to_string()),
                construction_duration: 6,
            },
        );

        let tl = Timeline::for_record(&record);
        assert_eq!(tl.design_start, Some(date(2024, 1, 1)));
        assert_eq!(tl.design_end, Some(date(2024, 4, 1)));
        assert_eq!(tl.construction_start, Some(date(2024, 4, 1)));
        assert_eq!(tl.construction_end, Some(date(2024, 10, 1)));
    }

    #[test]
    fn test_continuous_timeline_collapses_to_program_window() {
        let record = ProjectRecord::continuous(
            "pr1",
            "Pavement",
            ContinuousSchedule {
                start: Some("2024-06-01".to_string()),
                end: Some("2025-05-31".to_string()),
                ..Default::default()
            },
        );

        let tl = Timeline::for_record(&record);
        assert_eq!(tl.design_start, Some(date(2024, 6, 1)));
        assert_eq!(tl.design_end, Some(date(2025, 5, 31)));
        assert_eq!(tl.construction_start, tl.design_start);
        assert_eq!(tl.construction_end, tl.design_end);
    }

    #[test]
    fn test_bad_date_yields_none_not_default() {
        let record = ProjectRecord::phased(
            "p1",
            "Bad dates",
            PhasedSchedule {
                design_start: Some("01/15/2024".to_string()),
                design_duration: 3,
                construction_start: None,
                construction_duration: 0,
            },
        );

        let tl = Timeline::for_record(&record);
        assert_eq!(tl.design_start, None);
        assert_eq!(tl.design_end, None);
        assert_eq!(tl.construction_start, None);
    }

    #[test]
    fn test_window_tests_false_on_missing_bounds() {
        let d = date(2024, 1, 1);
        assert!(!Timeline::in_exclusive(d, None, Some(d)));
        assert!(!Timeline::in_exclusive(d, Some(d), None));
        assert!(!Timeline::in_inclusive(d, None, None));
    }

    #[test]
    fn test_exclusive_vs_inclusive_end() {
        let start = Some(date(2024, 1, 1));
        let end = Some(date(2024, 4, 1));
        let at_end = date(2024, 4, 1);

        assert!(!Timeline::in_exclusive(at_end, start, end));
        assert!(Timeline::in_inclusive(at_end, start, end));
    }

    #[test]
    fn test_derive_timelines_preserves_order() {
        let records = vec![
            ProjectRecord::phased("b", "B", PhasedSchedule::default()),
            ProjectRecord::phased("a", "A", PhasedSchedule::default()),
        ];
        let timelines = derive_timelines(&records);
        assert_eq!(timelines[0].project_id.as_str(), "b");
        assert_eq!(timelines[1].project_id.as_str(), "a");
    }
}
