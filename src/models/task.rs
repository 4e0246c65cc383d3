//! Task vocabulary.
//!
//! Tasks are what an employee does during a slot. The vocabulary offered
//! to the assignment grid is closed (`Grade 1`..`Grade 8`, recess duties,
//! `Break Coverage`, `Break`); labels outside it survive as
//! [`Task::Custom`] so persisted data is never lost.
//!
//! `Break Coverage` is parametrized by the employee being covered and is
//! stored as `"Break Coverage (<name>)"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Label prefix shared by every break-coverage task.
pub const BREAK_COVERAGE: &str = "Break Coverage";

/// Highest grade in the vocabulary.
pub const MAX_GRADE: u8 = 8;

/// A task assigned to a time slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Task {
    /// Classroom support for a grade (1..=8).
    Grade(u8),
    /// Morning recess supervision.
    AmRecessDuty,
    /// Afternoon recess supervision.
    PmRecessDuty,
    /// Covering another employee's break.
    ///
    /// `None` means the covered employee has not been chosen yet; such a
    /// task is only valid inside the assignment workflow.
    BreakCoverage(Option<String>),
    /// The employee's own break.
    Break,
    /// Any other label (legacy or hand-edited data).
    Custom(String),
}

impl Task {
    /// Tasks offered by the assignment UI, in display order.
    pub fn vocabulary() -> Vec<Task> {
        let mut tasks: Vec<Task> = (1..=MAX_GRADE).map(Task::Grade).collect();
        tasks.extend([
            Task::AmRecessDuty,
            Task::PmRecessDuty,
            Task::BreakCoverage(None),
            Task::Break,
        ]);
        tasks
    }

    /// Break coverage for a named employee.
    pub fn break_coverage(covered: impl Into<String>) -> Self {
        Task::BreakCoverage(Some(covered.into()))
    }

    /// Whether this task counts toward break coverage.
    ///
    /// Matches on the label prefix, so custom labels such as
    /// `"Break Coverage - Room 4"` also count.
    pub fn is_break_coverage(&self) -> bool {
        match self {
            Task::BreakCoverage(_) => true,
            Task::Custom(label) => label.starts_with(BREAK_COVERAGE),
            _ => false,
        }
    }

    /// Whether this is a break-coverage task still missing its covered employee.
    pub fn needs_coverage_target(&self) -> bool {
        matches!(self, Task::BreakCoverage(None))
    }

    /// The covered employee's name, if this is resolved break coverage.
    pub fn covered_employee(&self) -> Option<&str> {
        match self {
            Task::BreakCoverage(Some(name)) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Whether the task belongs to the closed vocabulary.
    pub fn is_known(&self) -> bool {
        match self {
            Task::Grade(g) => (1..=MAX_GRADE).contains(g),
            Task::Custom(_) => false,
            _ => true,
        }
    }

    /// Display / storage label.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::Grade(g) => write!(f, "Grade {g}"),
            Task::AmRecessDuty => f.write_str("AM Recess Duty"),
            Task::PmRecessDuty => f.write_str("PM Recess Duty"),
            Task::BreakCoverage(None) => f.write_str(BREAK_COVERAGE),
            Task::BreakCoverage(Some(name)) => write!(f, "{BREAK_COVERAGE} ({name})"),
            Task::Break => f.write_str("Break"),
            Task::Custom(label) => f.write_str(label),
        }
    }
}

impl From<&str> for Task {
    fn from(label: &str) -> Self {
        match label {
            "AM Recess Duty" => return Task::AmRecessDuty,
            "PM Recess Duty" => return Task::PmRecessDuty,
            "Break" => return Task::Break,
            BREAK_COVERAGE => return Task::BreakCoverage(None),
            _ => {}
        }

        if let Some(grade) = label
            .strip_prefix("Grade ")
            .and_then(|g| g.parse::<u8>().ok())
            .filter(|g| (1..=MAX_GRADE).contains(g))
        {
            return Task::Grade(grade);
        }

        if let Some(name) = label
            .strip_prefix(BREAK_COVERAGE)
            .and_then(|rest| rest.strip_prefix(" ("))
            .and_then(|rest| rest.strip_suffix(')'))
            .filter(|name| !name.trim().is_empty())
        {
            return Task::break_coverage(name);
        }

        Task::Custom(label.to_string())
    }
}

impl From<String> for Task {
    fn from(label: String) -> Self {
        Task::from(label.as_str())
    }
}

impl FromStr for Task {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Task::from(s))
    }
}

impl Serialize for Task {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for Task {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Task::from)
    }
}
