//! Run-length schedule compression.
//!
//! Converts a dense slot → task mapping into the minimal ordered list of
//! contiguous intervals sharing one task. The dashboard, the print view
//! and the employee cards all render from this one function, so they
//! always agree on the same intervals.
//!
//! # Algorithm
//!
//! 1. Walk the canonical slot sequence in chronological order.
//! 2. Keep the open run `(start, task)`; an unassigned slot is the
//!    "no task" sentinel and never opens a run.
//! 3. When the slot's task differs from the open run's, close the run at
//!    this slot and open a new one (if the slot is assigned).
//! 4. After the last slot, close any open run at the sequence's
//!    one-past-last boundary.
//!
//! Every interval is half-open: it covers `[start, end)`. This holds for
//! the final run too, so expanding the intervals reproduces the schedule
//! exactly.
//!
//! # Complexity
//! O(n log m) for n sequence slots and m assigned slots.

use std::fmt;

use serde::Serialize;

use crate::models::{SlotSchedule, SlotSequence, Task, TimeSlot};

/// A maximal run of slots sharing one task, covering `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleInterval {
    /// First slot of the run.
    pub start: TimeSlot,
    /// Slot after the last slot of the run (exclusive).
    pub end: TimeSlot,
    /// Task shared by every slot of the run.
    pub task: Task,
}

impl ScheduleInterval {
    /// Creates an interval.
    pub fn new(start: TimeSlot, end: TimeSlot, task: Task) -> Self {
        Self { start, end, task }
    }

    /// Last slot actually carrying the task (inclusive end).
    pub fn last_slot(&self) -> TimeSlot {
        self.end.prev().unwrap_or(self.start).max(self.start)
    }

    /// Whether `slot` falls inside `[start, end)`.
    #[inline]
    pub fn contains(&self, slot: TimeSlot) -> bool {
        self.start <= slot && slot < self.end
    }

    /// Number of slots covered.
    #[inline]
    pub fn slot_count(&self) -> usize {
        usize::from(self.end.index().saturating_sub(self.start.index()))
    }

    /// Duration in minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.slot_count() as u32 * crate::models::SLOT_MINUTES
    }

    /// Slots covered, in order.
    pub fn slots(&self) -> impl Iterator<Item = TimeSlot> {
        (self.start.index()..self.end.index()).filter_map(TimeSlot::new)
    }
}

impl fmt::Display for ScheduleInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} {}", self.start, self.end, self.task)
    }
}

/// Compresses a schedule into contiguous task intervals.
///
/// Only slots in `slots` are considered; assignments outside the
/// sequence (e.g. evening slots on the 96-slot dashboard) are ignored.
///
/// # Example
///
/// ```
/// use ea_schedule::models::{SlotSchedule, SlotSequence, Task, TimeSlot};
/// use ea_schedule::scheduler::compress;
///
/// let seq = SlotSequence::dashboard();
/// let schedule: SlotSchedule = ["8:30 am", "8:35 am", "8:40 am"]
///     .iter()
///     .map(|l| (TimeSlot::from_label(l).unwrap(), Task::Grade(1)))
///     .collect();
///
/// let runs = compress(&schedule, &seq);
/// assert_eq!(runs.len(), 1);
/// assert_eq!(runs[0].start.label(), "8:30 am");
/// assert_eq!(runs[0].end.label(), "8:45 am");
/// assert_eq!(runs[0].last_slot().label(), "8:40 am");
/// ```
pub fn compress(schedule: &SlotSchedule, slots: &SlotSequence) -> Vec<ScheduleInterval> {
    let mut intervals = Vec::new();
    let mut open: Option<(TimeSlot, &Task)> = None;

    for slot in slots.iter() {
        let task = schedule.task_at(slot);

        if let (Some((_, current)), Some(next)) = (open, task) {
            if current == next {
                continue;
            }
        }

        if let Some((start, current)) = open.take() {
            intervals.push(ScheduleInterval::new(start, slot, current.clone()));
        }
        open = task.map(|t| (slot, t));
    }

    if let Some((start, current)) = open {
        intervals.push(ScheduleInterval::new(start, slots.end(), current.clone()));
    }

    intervals
}

/// Expands intervals back into a slot schedule.
///
/// Later intervals overwrite earlier ones where they overlap.
pub fn expand(intervals: &[ScheduleInterval]) -> SlotSchedule {
    intervals
        .iter()
        .flat_map(|iv| iv.slots().map(move |slot| (slot, iv.task.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(label: &str) -> TimeSlot {
        TimeSlot::from_label(label).unwrap()
    }

    fn fill(schedule: &mut SlotSchedule, from: &str, to: &str, task: Task) {
        for s in SlotSequence::assignment().range(slot(from), slot(to)) {
            schedule.assign(s, task.clone());
        }
    }

    fn sample() -> SlotSchedule {
        let mut s = SlotSchedule::new();
        fill(&mut s, "8:30 am", "8:55 am", Task::Grade(1));
        fill(&mut s, "9:00 am", "9:10 am", Task::AmRecessDuty);
        // gap 9:15 - 9:55
        fill(&mut s, "10:00 am", "10:30 am", Task::break_coverage("Bob"));
        fill(&mut s, "10:35 am", "10:40 am", Task::Grade(1));
        s
    }

    #[test]
    fn test_single_run() {
        let mut s = SlotSchedule::new();
        fill(&mut s, "8:30 am", "8:40 am", Task::Grade(1));

        let runs = compress(&s, &SlotSequence::dashboard());
        assert_eq!(
            runs,
            vec![ScheduleInterval::new(
                slot("8:30 am"),
                slot("8:45 am"),
                Task::Grade(1)
            )]
        );
        assert_eq!(runs[0].last_slot(), slot("8:40 am"));
        assert_eq!(runs[0].slot_count(), 3);
        assert_eq!(runs[0].duration_minutes(), 15);
    }

    #[test]
    fn test_runs_and_gaps() {
        let runs = compress(&sample(), &SlotSequence::dashboard());
        let rendered: Vec<String> = runs.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "8:30 am - 9:00 am Grade 1",
                "9:00 am - 9:15 am AM Recess Duty",
                "10:00 am - 10:35 am Break Coverage (Bob)",
                "10:35 am - 10:45 am Grade 1",
            ]
        );
    }

    #[test]
    fn test_empty_schedule() {
        assert!(compress(&SlotSchedule::new(), &SlotSequence::dashboard()).is_empty());
    }

    #[test]
    fn test_run_reaching_last_slot_uses_boundary() {
        let seq = SlotSequence::dashboard();
        let mut s = SlotSchedule::new();
        fill(&mut s, "4:15 pm", "4:25 pm", Task::PmRecessDuty);

        let runs = compress(&s, &seq);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].end, seq.end());
        assert_eq!(runs[0].end.label(), "4:30 pm");
        assert_eq!(runs[0].last_slot(), seq.last());
    }

    #[test]
    fn test_full_grid_boundary() {
        let seq = SlotSequence::assignment();
        let s = SlotSchedule::new().with_task(seq.last(), Task::Break);
        let runs = compress(&s, &seq);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].end.index(), 192);
        assert_eq!(runs[0].slots().count(), 1);
    }

    #[test]
    fn test_assignments_outside_sequence_are_ignored() {
        let mut s = sample();
        fill(&mut s, "6:00 pm", "6:30 pm", Task::Grade(8));
        let dash = compress(&s, &SlotSequence::dashboard());
        assert_eq!(dash.len(), 4);
        let grid = compress(&s, &SlotSequence::assignment());
        assert_eq!(grid.len(), 5);
    }

    #[test]
    fn test_insertion_order_irrelevant() {
        let mut s = SlotSchedule::new();
        s.assign(slot("8:40 am"), Task::Grade(2));
        s.assign(slot("8:30 am"), Task::Grade(2));
        s.assign(slot("8:35 am"), Task::Grade(2));
        assert_eq!(compress(&s, &SlotSequence::dashboard()).len(), 1);
    }

    #[test]
    fn test_adjacent_distinct_coverage_targets_split() {
        let mut s = SlotSchedule::new();
        fill(&mut s, "11:00 am", "11:10 am", Task::break_coverage("Ann"));
        fill(&mut s, "11:15 am", "11:25 am", Task::break_coverage("Bob"));
        let runs = compress(&s, &SlotSequence::dashboard());
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].end, runs[1].start);
    }

    #[test]
    fn test_expand_reproduces_schedule() {
        let seq = SlotSequence::assignment();
        let mut s = sample();
        s.assign(seq.last(), Task::Break);
        s.assign(TimeSlot::first().next().next(), Task::Custom("Library".into()));

        let runs = compress(&s, &seq);
        assert_eq!(expand(&runs), s);
    }

    #[test]
    fn test_compress_is_idempotent() {
        let seq = SlotSequence::dashboard();
        let once = compress(&sample(), &seq);
        let twice = compress(&expand(&once), &seq);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_interval_contains() {
        let iv = ScheduleInterval::new(slot("9:00 am"), slot("9:15 am"), Task::Break);
        assert!(iv.contains(slot("9:00 am")));
        assert!(iv.contains(slot("9:10 am")));
        assert!(!iv.contains(slot("9:15 am")));
        assert!(!iv.contains(slot("8:55 am")));
    }
}
