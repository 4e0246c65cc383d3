//! Scheduling domain models.
//!
//! Provides the core data types of the daily staff schedule: the
//! canonical 5-minute slot grid, the task vocabulary, per-employee slot
//! schedules and the employees themselves.
//!
//! # Domain Mappings
//!
//! | ea-schedule | Meaning |
//! |-------------|---------|
//! | TimeSlot | 5-minute point in the day, from 08:30 |
//! | SlotSequence | Canonical ordered slots (dashboard / assignment grid) |
//! | Task | Grade support, recess duty, break, break coverage |
//! | SlotSchedule | One employee's slot → task mapping |
//! | Employee | Staff member (E.A.) with schedule and tier-3 flag |

mod employee;
mod schedule;
mod slot;
mod task;

pub use employee::{Employee, EmployeeId};
pub use schedule::SlotSchedule;
pub use slot::{
    SlotSequence, TimeSlot, DASHBOARD_SLOTS, DAY_START_MINUTES, MAX_SLOTS, SLOT_MINUTES,
};
pub use task::{Task, BREAK_COVERAGE, MAX_GRADE};
