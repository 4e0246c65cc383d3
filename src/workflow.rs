//! Task-assignment workflow.
//!
//! Holds the selection made in the assignment UI (employee, task, slots)
//! between discrete UI events and turns it into store mutations.
//!
//! # Break-coverage resolution
//!
//! ```text
//! Idle ──assign(Break Coverage)──▶ AwaitingCoverageSelection
//!  ▲                                   │            │
//!  └──────── confirm_coverage(name) ───┘            │
//!  └──────── cancel() ──────────────────────────────┘
//! ```
//!
//! Any task other than `Break Coverage` is assigned immediately. `Break
//! Coverage` first asks which tier-3 employee's break is being covered;
//! confirming assigns `Break Coverage (<name>)` to every selected slot.
//! Confirming or cancelling clears the slot and task selection.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{EmployeeId, SlotSequence, Task, TimeSlot};
use crate::store::{KeyValueStore, ScheduleStore};

/// Workflow state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum WorkflowState {
    /// No pending question.
    #[default]
    Idle,
    /// Waiting for the user to pick whose break is covered.
    AwaitingCoverageSelection {
        /// Names of tier-3 employees offered as candidates.
        candidates: Vec<String>,
    },
}

/// Why an assignment attempt did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No employee selected.
    NoEmployee,
    /// Selected employee is no longer on the roster.
    UnknownEmployee,
    /// No task selected.
    NoTask,
    /// No slots selected.
    NoSlots,
    /// `confirm_coverage` called while not awaiting a selection.
    NotAwaiting,
    /// Confirmed name is blank, not among the candidates, or no longer a
    /// tier-3 employee on the roster.
    UnknownCandidate,
}

/// Result of an assignment step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum AssignOutcome {
    /// Task written to the selected slots.
    Assigned {
        /// Employee receiving the task.
        employee_id: EmployeeId,
        /// Task written (coverage resolved).
        task: Task,
        /// Number of slots written.
        slots: usize,
    },
    /// Break coverage needs a covered employee first.
    AwaitingCoverage {
        /// Tier-3 employees to choose from.
        candidates: Vec<String>,
    },
    /// Pending selection discarded.
    Cancelled,
    /// Nothing attempted.
    Skipped {
        /// Why.
        reason: SkipReason,
    },
}

impl AssignOutcome {
    fn skipped(reason: SkipReason) -> Self {
        Self::Skipped { reason }
    }
}

/// Assignment UI selection and break-coverage state machine.
#[derive(Debug, Clone, Default)]
pub struct AssignmentWorkflow {
    sequence: SlotSequence,
    employee: Option<EmployeeId>,
    task: Option<Task>,
    slots: BTreeSet<TimeSlot>,
    state: WorkflowState,
}

impl AssignmentWorkflow {
    /// Creates a workflow over the given slot grid.
    pub fn new(sequence: SlotSequence) -> Self {
        Self {
            sequence,
            ..Default::default()
        }
    }

    /// Current state.
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// Slot grid the workflow selects from.
    pub fn sequence(&self) -> &SlotSequence {
        &self.sequence
    }

    /// Selected employee.
    pub fn selected_employee(&self) -> Option<&EmployeeId> {
        self.employee.as_ref()
    }

    /// Selected task.
    pub fn selected_task(&self) -> Option<&Task> {
        self.task.as_ref()
    }

    /// Selected slots, in chronological order.
    pub fn selected_slots(&self) -> impl Iterator<Item = TimeSlot> + '_ {
        self.slots.iter().copied()
    }

    /// Whether `slot` is selected.
    pub fn is_selected(&self, slot: TimeSlot) -> bool {
        self.slots.contains(&slot)
    }

    /// Selects (or clears) the employee to assign to.
    pub fn select_employee(&mut self, employee: Option<EmployeeId>) {
        self.employee = employee;
    }

    /// Selects (or clears) the task to assign.
    pub fn select_task(&mut self, task: Option<Task>) {
        self.task = task;
    }

    /// Toggles a slot's selection. Returns whether it is now selected.
    ///
    /// Slots outside the workflow's grid are ignored.
    pub fn toggle_slot(&mut self, slot: TimeSlot) -> bool {
        if !self.sequence.contains(slot) {
            return false;
        }
        if self.slots.remove(&slot) {
            false
        } else {
            self.slots.insert(slot);
            true
        }
    }

    /// Adds every slot from `from` through `to` to the selection.
    pub fn select_range(&mut self, from: TimeSlot, to: TimeSlot) {
        self.slots.extend(self.sequence.range(from, to));
    }

    /// Clears the slot selection.
    pub fn clear_slots(&mut self) {
        self.slots.clear();
    }

    /// Attempts to assign the selected task to the selected slots.
    ///
    /// Missing selections skip the attempt. Unresolved break coverage
    /// moves to [`WorkflowState::AwaitingCoverageSelection`] and writes
    /// nothing.
    pub fn assign<S: KeyValueStore>(
        &mut self,
        store: &mut ScheduleStore<S>,
    ) -> Result<AssignOutcome> {
        if let WorkflowState::AwaitingCoverageSelection { candidates } = &self.state {
            return Ok(AssignOutcome::AwaitingCoverage {
                candidates: candidates.clone(),
            });
        }

        let Some(employee_id) = self.employee.clone() else {
            return Ok(AssignOutcome::skipped(SkipReason::NoEmployee));
        };
        let Some(task) = self.task.clone() else {
            return Ok(AssignOutcome::skipped(SkipReason::NoTask));
        };
        if self.slots.is_empty() {
            return Ok(AssignOutcome::skipped(SkipReason::NoSlots));
        }
        if store.employee(&employee_id).is_none() {
            return Ok(AssignOutcome::skipped(SkipReason::UnknownEmployee));
        }

        if task.needs_coverage_target() {
            let candidates: Vec<String> =
                store.tier3_employees().map(|e| e.name.clone()).collect();
            info!(
                employee_id = %employee_id,
                candidates = candidates.len(),
                "break coverage awaiting covered employee"
            );
            self.state = WorkflowState::AwaitingCoverageSelection {
                candidates: candidates.clone(),
            };
            return Ok(AssignOutcome::AwaitingCoverage { candidates });
        }

        self.write(store, employee_id, task)
    }

    /// Resolves pending break coverage with the covered employee's name.
    ///
    /// A blank or unlisted name, or a candidate who has since left the
    /// roster or lost the tier-3 flag, leaves the workflow awaiting. If the
    /// assignee has been deleted meanwhile, nothing is written.
    pub fn confirm_coverage<S: KeyValueStore>(
        &mut self,
        store: &mut ScheduleStore<S>,
        covered: &str,
    ) -> Result<AssignOutcome> {
        let WorkflowState::AwaitingCoverageSelection { candidates } = &self.state else {
            return Ok(AssignOutcome::skipped(SkipReason::NotAwaiting));
        };
        let covered = covered.trim();
        let offered = !covered.is_empty() && candidates.iter().any(|c| c == covered);
        if !offered || !store.tier3_employees().any(|e| e.name == covered) {
            debug!(covered, "coverage candidate rejected");
            return Ok(AssignOutcome::skipped(SkipReason::UnknownCandidate));
        }

        self.state = WorkflowState::Idle;
        let Some(employee_id) = self.employee.clone() else {
            self.reset_selection();
            return Ok(AssignOutcome::skipped(SkipReason::NoEmployee));
        };
        if store.employee(&employee_id).is_none() {
            debug!(
                employee_id = %employee_id,
                "assignee left the roster before coverage was confirmed"
            );
            self.reset_selection();
            return Ok(AssignOutcome::skipped(SkipReason::UnknownEmployee));
        }
        self.write(store, employee_id, Task::break_coverage(covered))
    }

    /// Abandons any pending selection. Nothing is written.
    pub fn cancel(&mut self) -> AssignOutcome {
        debug!(state = ?self.state, "assignment cancelled");
        self.state = WorkflowState::Idle;
        self.reset_selection();
        AssignOutcome::Cancelled
    }

    fn write<S: KeyValueStore>(
        &mut self,
        store: &mut ScheduleStore<S>,
        employee_id: EmployeeId,
        task: Task,
    ) -> Result<AssignOutcome> {
        let slots: Vec<TimeSlot> = self.slots.iter().copied().collect();
        for slot in &slots {
            store.assign_task(&employee_id, *slot, task.clone())?;
        }
        info!(
            employee_id = %employee_id,
            task = %task,
            slots = slots.len(),
            "task assigned to selection"
        );

        self.reset_selection();
        Ok(AssignOutcome::Assigned {
            employee_id,
            task,
            slots: slots.len(),
        })
    }

    fn reset_selection(&mut self) {
        self.slots.clear();
        self.task = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn slot(label: &str) -> TimeSlot {
        TimeSlot::from_label(label).unwrap()
    }

    struct Fixture {
        store: ScheduleStore<MemoryStore>,
        ann: EmployeeId,
        bob: EmployeeId,
    }

    fn fixture() -> Fixture {
        let mut store = ScheduleStore::hydrate(MemoryStore::new()).unwrap();
        let ann = store.add_employee("Ann").unwrap().unwrap();
        let bob = store.add_employee("Bob").unwrap().unwrap();
        store.add_employee("Cy").unwrap();
        store.toggle_tier3(&bob).unwrap();
        Fixture { store, ann, bob }
    }

    #[test]
    fn test_immediate_assignment() {
        let mut f = fixture();
        let mut wf = AssignmentWorkflow::default();
        wf.select_employee(Some(f.ann.clone()));
        wf.select_task(Some(Task::Grade(3)));
        wf.select_range(slot("9:00 am"), slot("9:10 am"));

        let outcome = wf.assign(&mut f.store).unwrap();
        assert_eq!(
            outcome,
            AssignOutcome::Assigned {
                employee_id: f.ann.clone(),
                task: Task::Grade(3),
                slots: 3
            }
        );
        assert_eq!(f.store.employee(&f.ann).unwrap().schedule.len(), 3);
        assert_eq!(wf.selected_slots().count(), 0);
        assert_eq!(wf.selected_task(), None);
        assert_eq!(wf.selected_employee(), Some(&f.ann));
    }

    #[test]
    fn test_missing_selection_is_skipped() {
        let mut f = fixture();
        let mut wf = AssignmentWorkflow::default();
        let skipped = |reason| AssignOutcome::Skipped { reason };

        assert_eq!(wf.assign(&mut f.store).unwrap(), skipped(SkipReason::NoEmployee));
        wf.select_employee(Some(f.ann.clone()));
        assert_eq!(wf.assign(&mut f.store).unwrap(), skipped(SkipReason::NoTask));
        wf.select_task(Some(Task::Break));
        assert_eq!(wf.assign(&mut f.store).unwrap(), skipped(SkipReason::NoSlots));

        wf.select_employee(Some(EmployeeId::new("ghost")));
        wf.toggle_slot(slot("9:00 am"));
        assert_eq!(
            wf.assign(&mut f.store).unwrap(),
            skipped(SkipReason::UnknownEmployee)
        );
        assert!(f.store.employee(&f.ann).unwrap().schedule.is_empty());
    }

    #[test]
    fn test_break_coverage_resolution() {
        let mut f = fixture();
        let mut wf = AssignmentWorkflow::default();
        wf.select_employee(Some(f.ann.clone()));
        wf.select_task(Some(Task::BreakCoverage(None)));
        wf.toggle_slot(slot("11:00 am"));
        wf.toggle_slot(slot("11:05 am"));

        let outcome = wf.assign(&mut f.store).unwrap();
        assert_eq!(
            outcome,
            AssignOutcome::AwaitingCoverage {
                candidates: vec!["Bob".into()]
            }
        );
        assert!(matches!(
            wf.state(),
            WorkflowState::AwaitingCoverageSelection { .. }
        ));
        assert!(f.store.employee(&f.ann).unwrap().schedule.is_empty());

        let outcome = wf.confirm_coverage(&mut f.store, "Bob").unwrap();
        assert!(matches!(outcome, AssignOutcome::Assigned { slots: 2, .. }));
        assert_eq!(wf.state(), &WorkflowState::Idle);
        assert_eq!(wf.selected_task(), None);
        assert_eq!(wf.selected_slots().count(), 0);

        let ann = f.store.employee(&f.ann).unwrap();
        let task = ann.schedule.task_at(slot("11:00 am")).unwrap();
        assert_eq!(task.label(), "Break Coverage (Bob)");
    }

    #[test]
    fn test_reassign_while_awaiting_repeats_question() {
        let mut f = fixture();
        let mut wf = AssignmentWorkflow::default();
        wf.select_employee(Some(f.ann.clone()));
        wf.select_task(Some(Task::BreakCoverage(None)));
        wf.toggle_slot(slot("11:00 am"));
        wf.assign(&mut f.store).unwrap();

        let again = wf.assign(&mut f.store).unwrap();
        assert!(matches!(again, AssignOutcome::AwaitingCoverage { .. }));
    }

    #[test]
    fn test_confirm_rejects_non_candidates() {
        let mut f = fixture();
        let mut wf = AssignmentWorkflow::default();
        wf.select_employee(Some(f.ann.clone()));
        wf.select_task(Some(Task::BreakCoverage(None)));
        wf.toggle_slot(slot("11:00 am"));
        wf.assign(&mut f.store).unwrap();

        for name in ["", "Cy", "Nobody"] {
            assert_eq!(
                wf.confirm_coverage(&mut f.store, name).unwrap(),
                AssignOutcome::Skipped {
                    reason: SkipReason::UnknownCandidate
                }
            );
        }
        assert!(matches!(
            wf.state(),
            WorkflowState::AwaitingCoverageSelection { .. }
        ));
    }

    fn awaiting_bob(f: &mut Fixture) -> AssignmentWorkflow {
        let mut wf = AssignmentWorkflow::default();
        wf.select_employee(Some(f.ann.clone()));
        wf.select_task(Some(Task::BreakCoverage(None)));
        wf.toggle_slot(slot("11:00 am"));
        assert_eq!(
            wf.assign(&mut f.store).unwrap(),
            AssignOutcome::AwaitingCoverage {
                candidates: vec!["Bob".into()]
            }
        );
        wf
    }

    #[test]
    fn test_confirm_after_assignee_deleted() {
        let mut f = fixture();
        let mut wf = awaiting_bob(&mut f);
        f.store.delete_employee(&f.ann).unwrap();

        assert_eq!(
            wf.confirm_coverage(&mut f.store, "Bob").unwrap(),
            AssignOutcome::Skipped {
                reason: SkipReason::UnknownEmployee
            }
        );
        assert_eq!(wf.state(), &WorkflowState::Idle);
        assert_eq!(wf.selected_slots().count(), 0);
        assert_eq!(f.store.len(), 2);
        assert!(f.store.employees().iter().all(|e| e.schedule.is_empty()));
    }

    #[test]
    fn test_confirm_after_candidate_deleted() {
        let mut f = fixture();
        let mut wf = awaiting_bob(&mut f);
        f.store.delete_employee(&f.bob).unwrap();

        assert_eq!(
            wf.confirm_coverage(&mut f.store, "Bob").unwrap(),
            AssignOutcome::Skipped {
                reason: SkipReason::UnknownCandidate
            }
        );
        assert!(matches!(
            wf.state(),
            WorkflowState::AwaitingCoverageSelection { .. }
        ));
        assert!(f.store.employee(&f.ann).unwrap().schedule.is_empty());
        assert!(crate::validation::validate_roster(f.store.employees()).is_ok());
    }

    #[test]
    fn test_confirm_after_candidate_loses_tier3() {
        let mut f = fixture();
        let mut wf = awaiting_bob(&mut f);
        f.store.toggle_tier3(&f.bob).unwrap();

        assert_eq!(
            wf.confirm_coverage(&mut f.store, "Bob").unwrap(),
            AssignOutcome::Skipped {
                reason: SkipReason::UnknownCandidate
            }
        );
        assert!(f.store.employee(&f.ann).unwrap().schedule.is_empty());

        assert_eq!(wf.cancel(), AssignOutcome::Cancelled);
    }

    #[test]
    fn test_cancel_clears_selection() {
        let mut f = fixture();
        let mut wf = AssignmentWorkflow::default();
        wf.select_employee(Some(f.bob.clone()));
        wf.select_task(Some(Task::BreakCoverage(None)));
        wf.toggle_slot(slot("1:00 pm"));
        wf.assign(&mut f.store).unwrap();

        assert_eq!(wf.cancel(), AssignOutcome::Cancelled);
        assert_eq!(wf.state(), &WorkflowState::Idle);
        assert_eq!(wf.selected_task(), None);
        assert_eq!(wf.selected_slots().count(), 0);
        assert!(f.store.employee(&f.bob).unwrap().schedule.is_empty());

        assert_eq!(
            wf.confirm_coverage(&mut f.store, "Bob").unwrap(),
            AssignOutcome::Skipped {
                reason: SkipReason::NotAwaiting
            }
        );
    }

    #[test]
    fn test_no_tier3_candidates() {
        let mut store = ScheduleStore::hydrate(MemoryStore::new()).unwrap();
        let ann = store.add_employee("Ann").unwrap().unwrap();
        let mut wf = AssignmentWorkflow::default();
        wf.select_employee(Some(ann));
        wf.select_task(Some(Task::BreakCoverage(None)));
        wf.toggle_slot(slot("1:00 pm"));

        assert_eq!(
            wf.assign(&mut store).unwrap(),
            AssignOutcome::AwaitingCoverage { candidates: vec![] }
        );
    }

    #[test]
    fn test_toggle_slot() {
        let mut wf = AssignmentWorkflow::new(SlotSequence::dashboard());
        assert!(wf.toggle_slot(slot("9:00 am")));
        assert!(wf.is_selected(slot("9:00 am")));
        assert!(!wf.toggle_slot(slot("9:00 am")));
        assert!(!wf.is_selected(slot("9:00 am")));

        // Outside the 96-slot grid.
        assert!(!wf.toggle_slot(slot("7:00 pm")));
        assert_eq!(wf.selected_slots().count(), 0);
    }

    #[test]
    fn test_selection_is_chronological() {
        let mut wf = AssignmentWorkflow::default();
        wf.toggle_slot(slot("10:00 am"));
        wf.toggle_slot(slot("8:30 am"));
        wf.toggle_slot(slot("9:15 am"));
        let labels: Vec<String> = wf.selected_slots().map(TimeSlot::label).collect();
        assert_eq!(labels, vec!["8:30 am", "9:15 am", "10:00 am"]);
    }
}
