//! Per-employee slot schedule.
//!
//! Maps each assigned [`TimeSlot`] to exactly one [`Task`]. A slot that
//! is absent from the map is unassigned. Assignment overwrites (last
//! write wins), so a slot can never hold two tasks.
//!
//! # Persistence
//! Serializes as a JSON object of slot label → task label. Deserialization
//! is lenient about keys: entries whose label does not name a canonical
//! slot are dropped with a warning instead of failing the whole roster.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use super::{SlotSequence, Task, TimeSlot};

/// An employee's slot → task mapping, ordered chronologically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SlotSchedule {
    entries: BTreeMap<TimeSlot, Task>,
}

impl SlotSchedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `task` to `slot`, returning the task it replaced.
    pub fn assign(&mut self, slot: TimeSlot, task: Task) -> Option<Task> {
        self.entries.insert(slot, task)
    }

    /// Assigns a task to a slot (builder form).
    pub fn with_task(mut self, slot: TimeSlot, task: Task) -> Self {
        self.assign(slot, task);
        self
    }

    /// Removes the assignment at `slot`, returning it if present.
    pub fn unassign(&mut self, slot: TimeSlot) -> Option<Task> {
        self.entries.remove(&slot)
    }

    /// Removes every assignment in `[start, end)`.
    ///
    /// Returns the number of slots cleared.
    pub fn clear_range(&mut self, start: TimeSlot, end: TimeSlot) -> usize {
        let doomed: Vec<TimeSlot> = self
            .entries
            .range(start..end)
            .map(|(slot, _)| *slot)
            .collect();
        for slot in &doomed {
            self.entries.remove(slot);
        }
        doomed.len()
    }

    /// Task at `slot`, if assigned.
    pub fn task_at(&self, slot: TimeSlot) -> Option<&Task> {
        self.entries.get(&slot)
    }

    /// Iterates assignments in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (TimeSlot, &Task)> {
        self.entries.iter().map(|(slot, task)| (*slot, task))
    }

    /// Assignments restricted to a slot sequence.
    pub fn iter_within<'a>(
        &'a self,
        sequence: &SlotSequence,
    ) -> impl Iterator<Item = (TimeSlot, &'a Task)> + 'a {
        let end = sequence.end();
        self.entries
            .range(..end)
            .map(|(slot, task)| (*slot, task))
    }

    /// Number of slots whose task satisfies `pred`.
    pub fn count_matching(&self, pred: impl Fn(&Task) -> bool) -> usize {
        self.entries.values().filter(|task| pred(task)).count()
    }

    /// Number of assigned slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no slot is assigned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(TimeSlot, Task)> for SlotSchedule {
    fn from_iter<I: IntoIterator<Item = (TimeSlot, Task)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'de> Deserialize<'de> for SlotSchedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Task>::deserialize(deserializer)?;
        let mut entries = BTreeMap::new();
        for (label, task) in raw {
            match TimeSlot::from_label(&label) {
                Ok(slot) => {
                    entries.insert(slot, task);
                }
                Err(err) => warn!(%err, task = %task, "dropping schedule entry"),
            }
        }
        Ok(Self { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(label: &str) -> TimeSlot {
        TimeSlot::from_label(label).unwrap()
    }

    #[test]
    fn test_last_write_wins() {
        let mut s = SlotSchedule::new();
        assert_eq!(s.assign(slot("9:00 am"), Task::Grade(1)), None);
        assert_eq!(
            s.assign(slot("9:00 am"), Task::Grade(2)),
            Some(Task::Grade(1))
        );
        assert_eq!(s.len(), 1);
        assert_eq!(s.task_at(slot("9:00 am")), Some(&Task::Grade(2)));
    }

    #[test]
    fn test_unassign() {
        let mut s = SlotSchedule::new().with_task(slot("9:00 am"), Task::Break);
        assert_eq!(s.unassign(slot("9:00 am")), Some(Task::Break));
        assert_eq!(s.unassign(slot("9:00 am")), None);
        assert!(s.is_empty());
    }

    #[test]
    fn test_iteration_is_chronological() {
        let s = SlotSchedule::new()
            .with_task(slot("10:00 am"), Task::Grade(2))
            .with_task(slot("8:30 am"), Task::Grade(1))
            .with_task(slot("1:15 pm"), Task::Break);

        let labels: Vec<String> = s.iter().map(|(slot, _)| slot.label()).collect();
        assert_eq!(labels, vec!["8:30 am", "10:00 am", "1:15 pm"]);
    }

    #[test]
    fn test_clear_range() {
        let mut s: SlotSchedule = SlotSequence::assignment()
            .range(slot("9:00 am"), slot("9:20 am"))
            .map(|slot| (slot, Task::Grade(4)))
            .collect();
        assert_eq!(s.len(), 5);

        let cleared = s.clear_range(slot("9:05 am"), slot("9:15 am"));
        assert_eq!(cleared, 2);
        assert!(s.task_at(slot("9:00 am")).is_some());
        assert!(s.task_at(slot("9:05 am")).is_none());
        assert!(s.task_at(slot("9:15 am")).is_some());
    }

    #[test]
    fn test_iter_within_sequence() {
        let s = SlotSchedule::new()
            .with_task(slot("9:00 am"), Task::Grade(1))
            .with_task(slot("7:00 pm"), Task::Grade(2));
        let dash: Vec<TimeSlot> = s
            .iter_within(&SlotSequence::dashboard())
            .map(|(slot, _)| slot)
            .collect();
        assert_eq!(dash, vec![slot("9:00 am")]);
    }

    #[test]
    fn test_count_matching() {
        let s = SlotSchedule::new()
            .with_task(slot("9:00 am"), Task::break_coverage("Ann"))
            .with_task(slot("9:05 am"), Task::break_coverage("Ann"))
            .with_task(slot("9:10 am"), Task::Break);
        assert_eq!(s.count_matching(Task::is_break_coverage), 2);
    }

    #[test]
    fn test_serde_lenient_keys() {
        let json = r#"{"8:35 AM":"Grade 1","8:30 am":"Grade 1","25:00 xm":"Break"}"#;
        let s: SlotSchedule = serde_json::from_str(json).unwrap();
        assert_eq!(s.len(), 2);

        let out = serde_json::to_string(&s).unwrap();
        assert_eq!(out, r#"{"8:30 am":"Grade 1","8:35 am":"Grade 1"}"#);
    }
}
