//! Schedule store: the authoritative in-memory roster.
//!
//! The store is built once from a storage snapshot ([`ScheduleStore::hydrate`])
//! and owns every roster mutation. Each mutation is write-through and
//! atomic: the next roster is computed on a copy, persisted wholesale
//! under the roster key, and only then swapped in. If persistence fails
//! the in-memory roster is unchanged and the error is returned.
//!
//! # Fail-soft policy
//! Mutations that target an unknown employee, a blank name or an
//! unassigned slot are no-ops reported as `Ok(false)`. Nothing is written
//! for a no-op.

mod storage;

pub use storage::{FileStore, KeyValueStore, MemoryStore};

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::config::ScheduleConfig;
use crate::error::{Result, ScheduleError};
use crate::models::{Employee, EmployeeId, Task, TimeSlot};
use crate::validation::validate_roster;

/// Storage key the roster is persisted under by default.
pub const DEFAULT_STORAGE_KEY: &str = "employees";

/// A roster mutation, as emitted by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum RosterCommand {
    /// Add an employee with the given name.
    AddEmployee {
        /// Display name (trimmed; blank names are ignored).
        name: String,
    },
    /// Remove an employee and their schedule.
    DeleteEmployee {
        /// Target employee.
        id: EmployeeId,
    },
    /// Flip the tier-3 flag.
    ToggleTier3 {
        /// Target employee.
        id: EmployeeId,
    },
    /// Assign a task to one slot.
    AssignTask {
        /// Target employee.
        employee_id: EmployeeId,
        /// Slot to assign.
        slot: TimeSlot,
        /// Task; break coverage must name the covered employee.
        task: Task,
    },
    /// Delete a single scheduled slot.
    UnassignTask {
        /// Target employee.
        employee_id: EmployeeId,
        /// Slot to clear.
        slot: TimeSlot,
    },
    /// Delete every scheduled slot in `[start, end)`.
    ClearInterval {
        /// Target employee.
        employee_id: EmployeeId,
        /// First slot to clear.
        start: TimeSlot,
        /// Exclusive end.
        end: TimeSlot,
    },
}

/// In-memory roster with write-through persistence.
#[derive(Debug)]
pub struct ScheduleStore<S: KeyValueStore> {
    storage: S,
    key: String,
    employees: Vec<Employee>,
}

impl<S: KeyValueStore> ScheduleStore<S> {
    /// Loads the roster stored under [`DEFAULT_STORAGE_KEY`].
    pub fn hydrate(storage: S) -> Result<Self> {
        Self::hydrate_with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Loads the roster using the configured storage key.
    pub fn from_config(storage: S, config: &ScheduleConfig) -> Result<Self> {
        Self::hydrate_with_key(storage, &config.storage_key)
    }

    /// Loads the roster stored under `key`.
    ///
    /// Absent data yields an empty roster. Malformed data is logged and
    /// also yields an empty roster. Records repeating an earlier id are
    /// dropped. Only a failure to read the storage itself is an error.
    pub fn hydrate_with_key(storage: S, key: &str) -> Result<Self> {
        let employees = match storage.get(key)? {
            None => {
                debug!(key, "no persisted roster; starting empty");
                Vec::new()
            }
            Some(raw) => match serde_json::from_str::<Vec<Employee>>(&raw) {
                Ok(employees) => dedupe(employees),
                Err(err) => {
                    warn!(key, %err, "persisted roster is malformed; starting empty");
                    Vec::new()
                }
            },
        };

        if let Err(issues) = validate_roster(&employees) {
            for issue in &issues {
                warn!(kind = ?issue.kind, "{}", issue.message);
            }
        }

        info!(key, employees = employees.len(), "roster hydrated");
        Ok(Self {
            storage,
            key: key.to_string(),
            employees,
        })
    }

    /// Employees in roster order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Looks up an employee.
    pub fn employee(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| &e.id == id)
    }

    /// Employees flagged as supporting a tier-3 student.
    pub fn tier3_employees(&self) -> impl Iterator<Item = &Employee> {
        self.employees.iter().filter(|e| e.working_with_tier3)
    }

    /// Number of employees.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Storage key the roster is written under.
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the store, returning its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Adds an employee with a fresh id.
    ///
    /// Returns the new id, or `None` if `name` is blank.
    pub fn add_employee(&mut self, name: &str) -> Result<Option<EmployeeId>> {
        let name = name.trim();
        if name.is_empty() {
            debug!("ignoring employee with blank name");
            return Ok(None);
        }

        let employee = Employee::new(name);
        let id = employee.id.clone();
        let mut next = self.employees.clone();
        next.push(employee);
        self.commit(next)?;

        info!(employee_id = %id, name, "employee added");
        Ok(Some(id))
    }

    /// Removes an employee and their schedule.
    pub fn delete_employee(&mut self, id: &EmployeeId) -> Result<bool> {
        if self.employee(id).is_none() {
            debug!(employee_id = %id, "delete of unknown employee ignored");
            return Ok(false);
        }

        let next = self
            .employees
            .iter()
            .filter(|e| &e.id != id)
            .cloned()
            .collect();
        self.commit(next)?;

        info!(employee_id = %id, "employee deleted");
        Ok(true)
    }

    /// Sets `slot` to `task` for an employee (last write wins).
    ///
    /// # Errors
    /// [`ScheduleError::UnresolvedBreakCoverage`] if `task` is break
    /// coverage without a covered employee; the caller must resolve it
    /// first (see [`AssignmentWorkflow`](crate::workflow::AssignmentWorkflow)).
    /// [`ScheduleError::InvalidTask`] for a grade outside `1..=MAX_GRADE`,
    /// which would not survive a reload.
    pub fn assign_task(&mut self, id: &EmployeeId, slot: TimeSlot, task: Task) -> Result<bool> {
        if task.needs_coverage_target() {
            return Err(ScheduleError::UnresolvedBreakCoverage);
        }
        if matches!(task, Task::Grade(_)) && !task.is_known() {
            return Err(ScheduleError::InvalidTask(task.label()));
        }

        let label = task.label();
        let changed = self.update(id, |e| {
            let previous = e.schedule.assign(slot, task.clone());
            previous.as_ref() != Some(&task)
        })?;
        if changed {
            debug!(employee_id = %id, %slot, task = %label, "task assigned");
        }
        Ok(changed)
    }

    /// Removes the assignment at `slot`, if any.
    pub fn unassign_task(&mut self, id: &EmployeeId, slot: TimeSlot) -> Result<bool> {
        let changed = self.update(id, |e| e.schedule.unassign(slot).is_some())?;
        if changed {
            debug!(employee_id = %id, %slot, "task unassigned");
        }
        Ok(changed)
    }

    /// Removes every assignment in `[start, end)`.
    pub fn clear_interval(
        &mut self,
        id: &EmployeeId,
        start: TimeSlot,
        end: TimeSlot,
    ) -> Result<bool> {
        let changed = self.update(id, |e| e.schedule.clear_range(start, end) > 0)?;
        if changed {
            debug!(employee_id = %id, %start, %end, "interval cleared");
        }
        Ok(changed)
    }

    /// Flips the tier-3 flag.
    pub fn toggle_tier3(&mut self, id: &EmployeeId) -> Result<bool> {
        let changed = self.update(id, |e| {
            e.working_with_tier3 = !e.working_with_tier3;
            true
        })?;
        if changed {
            debug!(employee_id = %id, "tier-3 flag toggled");
        }
        Ok(changed)
    }

    /// Applies a UI command. Returns whether the roster changed.
    pub fn apply(&mut self, command: RosterCommand) -> Result<bool> {
        match command {
            RosterCommand::AddEmployee { name } => Ok(self.add_employee(&name)?.is_some()),
            RosterCommand::DeleteEmployee { id } => self.delete_employee(&id),
            RosterCommand::ToggleTier3 { id } => self.toggle_tier3(&id),
            RosterCommand::AssignTask {
                employee_id,
                slot,
                task,
            } => self.assign_task(&employee_id, slot, task),
            RosterCommand::UnassignTask { employee_id, slot } => {
                self.unassign_task(&employee_id, slot)
            }
            RosterCommand::ClearInterval {
                employee_id,
                start,
                end,
            } => self.clear_interval(&employee_id, start, end),
        }
    }

    /// Applies `f` to a copy of one employee and commits if it reports a change.
    fn update(&mut self, id: &EmployeeId, f: impl FnOnce(&mut Employee) -> bool) -> Result<bool> {
        let Some(index) = self.employees.iter().position(|e| &e.id == id) else {
            debug!(employee_id = %id, "mutation of unknown employee ignored");
            return Ok(false);
        };

        let mut next = self.employees.clone();
        if !f(&mut next[index]) {
            return Ok(false);
        }
        self.commit(next)?;
        Ok(true)
    }

    /// Persists `next` wholesale, then makes it current.
    fn commit(&mut self, next: Vec<Employee>) -> Result<()> {
        let raw = serde_json::to_string(&next)?;
        self.storage.set(&self.key, &raw)?;
        self.employees = next;
        Ok(())
    }
}

fn dedupe(employees: Vec<Employee>) -> Vec<Employee> {
    let mut seen = HashSet::new();
    employees
        .into_iter()
        .filter(|e| {
            let fresh = seen.insert(e.id.clone());
            if !fresh {
                warn!(employee_id = %e.id, name = %e.name, "dropping duplicate employee id");
            }
            fresh
        })
        .collect()
}
