//! Advisory data-quality diagnostics
//!
//! The engine itself never rejects malformed domain data - bad dates and
//! dangling references simply contribute nothing to a forecast. Callers who
//! want to surface those problems run `validate` first and present the
//! report; nothing here changes engine output.

use crate::identity::{CategoryId, ProjectId};
use crate::month::parse_date;
use crate::portfolio::{Portfolio, Schedule};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// One data-quality finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationIssue {
    /// A date field did not parse as `YYYY-MM-DD`
    UnparsableDate {
        project: ProjectId,
        field: String,
        raw: String,
    },
    /// A program's end date precedes its start date
    ProgramEndsBeforeStart { project: ProjectId },
    /// An allocation references a project id not in the portfolio
    UnknownAllocationProject { project: ProjectId },
    /// An allocation references a category id not in the portfolio
    UnknownAllocationCategory {
        project: ProjectId,
        category: CategoryId,
    },
    /// A phase has allocated hours but zero duration, so the hours can
    /// never appear in a forecast
    ZeroDurationPhaseWithHours {
        project: ProjectId,
        phase: String,
    },
    /// An allocation carries only PM hours, which are tracked but never
    /// forecast as demand
    PmHoursOnly {
        project: ProjectId,
        category: CategoryId,
    },
    /// Two categories share a name, which collides in forecast aggregation
    DuplicateCategoryName { name: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::UnparsableDate {
                project,
                field,
                raw,
            } => write!(f, "project {}: {} '{}' is not a valid date", project, field, raw),
            ValidationIssue::ProgramEndsBeforeStart { project } => {
                write!(f, "program {}: end date precedes start date", project)
            }
            ValidationIssue::UnknownAllocationProject { project } => {
                write!(f, "allocation references unknown project {}", project)
            }
            ValidationIssue::UnknownAllocationCategory { project, category } => write!(
                f,
                "allocation for project {} references unknown category {}",
                project, category
            ),
            ValidationIssue::ZeroDurationPhaseWithHours { project, phase } => write!(
                f,
                "project {}: {} hours allocated but the phase has zero duration",
                project, phase
            ),
            ValidationIssue::PmHoursOnly { project, category } => write!(
                f,
                "allocation for project {} category {} holds only PM hours, which do not forecast",
                project, category
            ),
            ValidationIssue::DuplicateCategoryName { name } => {
                write!(f, "duplicate staff category name '{}'", name)
            }
        }
    }
}

/// All findings for one portfolio
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Findings in portfolio order
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Number of findings
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// True when the portfolio is clean
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Iterate the findings
    pub fn iter(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for issue in &self.issues {
            writeln!(f, "{}", issue)?;
        }
        Ok(())
    }
}

/// Inspect a portfolio for data-quality problems
pub fn validate(portfolio: &Portfolio) -> ValidationReport {
    let mut issues = Vec::new();

    let mut seen_names: HashSet<&str> = HashSet::new();
    for category in &portfolio.categories {
        if !seen_names.insert(category.name.as_str()) {
            issues.push(ValidationIssue::DuplicateCategoryName {
                name: category.name.clone(),
            });
        }
    }

    for record in &portfolio.projects {
        match &record.schedule {
            Schedule::Phased(phased) => {
                check_date(&mut issues, &record.id, "design_start", &phased.design_start);
                check_date(
                    &mut issues,
                    &record.id,
                    "construction_start",
                    &phased.construction_start,
                );

                let hours: Vec<_> = portfolio.allocations.project_row(&record.id).collect();
                let design_hours: f64 = hours.iter().map(|(_, h)| h.design_hours).sum();
                let construction_hours: f64 =
                    hours.iter().map(|(_, h)| h.construction_hours).sum();
                if phased.design_duration == 0 && design_hours > 0.0 {
                    issues.push(ValidationIssue::ZeroDurationPhaseWithHours {
                        project: record.id.clone(),
                        phase: "design".to_string(),
                    });
                }
                if phased.construction_duration == 0 && construction_hours > 0.0 {
                    issues.push(ValidationIssue::ZeroDurationPhaseWithHours {
                        project: record.id.clone(),
                        phase: "construction".to_string(),
                    });
                }
            }
            Schedule::Continuous(cont) => {
                check_date(&mut issues, &record.id, "start", &cont.start);
                check_date(&mut issues, &record.id, "end", &cont.end);
                if let (Some(start), Some(end)) =
                    (parse_date(cont.start.as_deref()), parse_date(cont.end.as_deref()))
                {
                    if end < start {
                        issues.push(ValidationIssue::ProgramEndsBeforeStart {
                            project: record.id.clone(),
                        });
                    }
                }
            }
        }
    }

    let project_ids: HashSet<&ProjectId> = portfolio.projects.iter().map(|p| &p.id).collect();
    let category_ids: HashSet<&CategoryId> = portfolio.categories.iter().map(|c| &c.id).collect();

    for (project, category, hours) in portfolio.allocations.iter() {
        if !project_ids.contains(project) {
            issues.push(ValidationIssue::UnknownAllocationProject {
                project: project.clone(),
            });
        }
        if !category_ids.contains(category) {
            issues.push(ValidationIssue::UnknownAllocationCategory {
                project: project.clone(),
                category: category.clone(),
            });
        }
        if hours.pm_hours > 0.0 && hours.design_hours == 0.0 && hours.construction_hours == 0.0 {
            issues.push(ValidationIssue::PmHoursOnly {
                project: project.clone(),
                category: category.clone(),
            });
        }
    }

    ValidationReport { issues }
}

fn check_date(
    issues: &mut Vec<ValidationIssue>,
    project: &ProjectId,
    field: &str,
    raw: &Option<String>,
) {
    if let Some(raw) = raw {
        if parse_date(Some(raw)).is_none() {
            issues.push(ValidationIssue::UnparsableDate {
                project: project.clone(),
                field: field.to_string(),
                raw: raw.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::{ContinuousSchedule, PhasedSchedule, ProjectRecord};
    use crate::staff::{PhaseHours, StaffCategory};

    #[test]
    fn test_clean_portfolio() {
        let mut portfolio = Portfolio::new();
        portfolio.projects.push(ProjectRecord::phased(
            "p1",
            "Bridge",
            PhasedSchedule {
                design_start: Some("2024-01-01".to_string()),
                design_duration: 3,
                construction_start: Some("2024-04-01".to_string()),
                construction_duration: 6,
            },
        ));
        portfolio.categories.push(StaffCategory::new("c1", "Engineers"));
        portfolio
            .allocations
            .set("p1", "c1", PhaseHours::new(10.0, 240.0, 960.0));

        let report = validate(&portfolio);
        assert!(report.is_empty(), "unexpected issues: {}", report);
    }

    #[test]
    fn test_unparsable_date() {
        let mut portfolio = Portfolio::new();
        portfolio.projects.push(ProjectRecord::phased(
            "p1",
            "Bad",
            PhasedSchedule {
                design_start: Some("01/15/2024".to_string()),
                ..Default::default()
            },
        ));

        let report = validate(&portfolio);
        assert_eq!(report.len(), 1);
        assert!(matches!(
            &report.issues[0],
            ValidationIssue::UnparsableDate { field, .. } if field == "design_start"
        ));
    }

    #[test]
    fn test_program_end_before_start() {
        let mut portfolio = Portfolio::new();
        portfolio.projects.push(ProjectRecord::continuous(
            "pr1",
            "Backwards",
            ContinuousSchedule {
                start: Some("2025-01-01".to_string()),
                end: Some("2024-01-01".to_string()),
                ..Default::default()
            },
        ));

        let report = validate(&portfolio);
        assert_eq!(report.len(), 1);
        assert!(matches!(
            report.issues[0],
            ValidationIssue::ProgramEndsBeforeStart { .. }
        ));
    }

    #[test]
    fn test_dangling_allocation_references() {
        let mut portfolio = Portfolio::new();
        portfolio.categories.push(StaffCategory::new("c1", "Engineers"));
        portfolio
            .allocations
            .set("ghost", "c1", PhaseHours::new(0.0, 100.0, 0.0));
        portfolio
            .allocations
            .set("ghost", "c-ghost", PhaseHours::new(0.0, 50.0, 0.0));

        let report = validate(&portfolio);
        assert!(report
            .iter()
            .any(|i| matches!(i, ValidationIssue::UnknownAllocationProject { .. })));
        assert!(report
            .iter()
            .any(|i| matches!(i, ValidationIssue::UnknownAllocationCategory { .. })));
    }

    #[test]
    fn test_pm_hours_only_flagged() {
        let mut portfolio = Portfolio::new();
        portfolio.projects.push(ProjectRecord::phased(
            "p1",
            "Managed",
            PhasedSchedule {
                design_start: Some("2024-01-01".to_string()),
                design_duration: 3,
                ..Default::default()
            },
        ));
        portfolio.categories.push(StaffCategory::new("c1", "Managers"));
        portfolio
            .allocations
            .set("p1", "c1", PhaseHours::new(120.0, 0.0, 0.0));

        let report = validate(&portfolio);
        assert!(report
            .iter()
            .any(|i| matches!(i, ValidationIssue::PmHoursOnly { .. })));
    }

    #[test]
    fn test_zero_duration_phase_with_hours() {
        let mut portfolio = Portfolio::new();
        portfolio.projects.push(ProjectRecord::phased(
            "p1",
            "Stuck",
            PhasedSchedule {
                design_start: Some("2024-01-01".to_string()),
                design_duration: 0,
                ..Default::default()
            },
        ));
        portfolio.categories.push(StaffCategory::new("c1", "Engineers"));
        portfolio
            .allocations
            .set("p1", "c1", PhaseHours::new(0.0, 200.0, 0.0));

        let report = validate(&portfolio);
        assert!(report
            .iter()
            .any(|i| matches!(i, ValidationIssue::ZeroDurationPhaseWithHours { .. })));
    }

    #[test]
    fn test_duplicate_category_names() {
        let mut portfolio = Portfolio::new();
        portfolio.categories.push(StaffCategory::new("c1", "Engineers"));
        portfolio.categories.push(StaffCategory::new("c2", "Engineers"));

        let report = validate(&portfolio);
        assert_eq!(report.len(), 1);
        assert!(matches!(
            &report.issues[0],
            ValidationIssue::DuplicateCategoryName { name } if name == "Engineers"
        ));
    }
}
