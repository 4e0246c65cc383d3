//! Employee (E.A.) model.
//!
//! An employee is the resource being scheduled: a named staff member with
//! a slot schedule and a flag recording whether they support a tier-3
//! student (which makes their break coverage count, see
//! [`BreakCoverageStatus`](crate::scheduler::BreakCoverageStatus)).

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{SlotSchedule, Task, TimeSlot};

/// Stable, unique employee identifier.
///
/// Freshly generated ids embed a v4 UUID, so an id is never handed out
/// again after its employee is deleted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Wraps an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh identifier (`employee-<uuid>`).
    pub fn generate() -> Self {
        Self(format!("employee-{}", Uuid::new_v4()))
    }

    /// The identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A schedulable staff member.
///
/// Field names follow the persisted roster layout
/// (`id`, `name`, `schedule`, `workingWithTier3`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique identifier.
    pub id: EmployeeId,
    /// Display name.
    pub name: String,
    /// Slot assignments.
    #[serde(default)]
    pub schedule: SlotSchedule,
    /// Whether the employee supports a tier-3 student.
    #[serde(default)]
    pub working_with_tier3: bool,
}

impl Employee {
    /// Creates an employee with a fresh id and an empty schedule.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(EmployeeId::generate(), name)
    }

    /// Creates an employee with a given id.
    pub fn with_id(id: EmployeeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            schedule: SlotSchedule::new(),
            working_with_tier3: false,
        }
    }

    /// Sets the tier-3 flag.
    pub fn with_tier3(mut self, working_with_tier3: bool) -> Self {
        self.working_with_tier3 = working_with_tier3;
        self
    }

    /// Assigns a task to a slot.
    pub fn with_task(mut self, slot: TimeSlot, task: Task) -> Self {
        self.schedule.assign(slot, task);
        self
    }

    /// Number of break-coverage entries in the schedule.
    pub fn break_coverage_count(&self) -> usize {
        self.schedule.count_matching(Task::is_break_coverage)
    }
}
