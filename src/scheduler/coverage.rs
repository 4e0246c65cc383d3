//! Tier-3 break-coverage check.
//!
//! An employee supporting a tier-3 student needs a minimum number of
//! break-coverage assignments. The check is advisory: it reports a
//! deficiency for display and never blocks an assignment.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Covered | Schedule entries whose label starts with `Break Coverage` |
//! | Needed | max(0, required - covered), tier-3 employees only |

use serde::Serialize;

use crate::models::{Employee, EmployeeId};

/// Default number of break-coverage slots a tier-3 employee needs.
pub const DEFAULT_REQUIRED_BREAK_COVERAGE: usize = 3;

/// Coverage state of one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "missing")]
pub enum BreakCoverageStatus {
    /// Employee does not support a tier-3 student; nothing to show.
    NotApplicable,
    /// Requirement met.
    Satisfied,
    /// This many more break-coverage slots are needed.
    Deficient(usize),
}

impl BreakCoverageStatus {
    /// Evaluates an employee against `required` break-coverage slots.
    pub fn evaluate(employee: &Employee, required: usize) -> Self {
        if !employee.working_with_tier3 {
            return Self::NotApplicable;
        }
        match required.saturating_sub(employee.break_coverage_count()) {
            0 => Self::Satisfied,
            missing => Self::Deficient(missing),
        }
    }

    /// Number of break-coverage slots still needed (never negative).
    pub fn breaks_needed(&self) -> usize {
        match self {
            Self::Deficient(n) => *n,
            _ => 0,
        }
    }

    /// UI hint text, if the status should be shown.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::NotApplicable => None,
            Self::Satisfied => Some("Breaks covered".to_string()),
            Self::Deficient(n) => Some(format!("{n} breaks need coverage")),
        }
    }
}

/// Break-coverage status across a roster.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    /// Required break-coverage slots per tier-3 employee.
    pub required: usize,
    /// Per-employee status, in roster order.
    pub statuses: Vec<(EmployeeId, BreakCoverageStatus)>,
}

impl CoverageReport {
    /// Computes the report for a roster.
    pub fn calculate(employees: &[Employee], required: usize) -> Self {
        let statuses = employees
            .iter()
            .map(|e| (e.id.clone(), BreakCoverageStatus::evaluate(e, required)))
            .collect();
        Self { required, statuses }
    }

    /// Status for one employee.
    pub fn status_of(&self, id: &EmployeeId) -> Option<BreakCoverageStatus> {
        self.statuses
            .iter()
            .find(|(eid, _)| eid == id)
            .map(|(_, status)| *status)
    }

    /// Sum of missing break-coverage slots across the roster.
    pub fn total_breaks_needed(&self) -> usize {
        self.statuses.iter().map(|(_, s)| s.breaks_needed()).sum()
    }

    /// Whether every tier-3 employee is covered.
    pub fn is_satisfied(&self) -> bool {
        self.total_breaks_needed() == 0
    }
}
