//! Scheduling core for educational-assistant (E.A.) staff.
//!
//! Tracks a roster of employees, each with a task per five-minute slot of
//! the school day, and keeps that roster persisted after every change.
//! Schedules are shown as run-length intervals, and tier-3 support staff
//! get an advisory check on how many of their breaks are covered.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimeSlot`, `SlotSequence`, `Task`,
//!   `SlotSchedule`, `Employee`
//! - **`scheduler`**: Interval compression and break-coverage evaluation
//! - **`store`**: Roster store with write-through persistence
//! - **`workflow`**: Assignment flow, including break-coverage resolution
//! - **`views`**: Dashboard grid, print text and employee cards
//! - **`validation`**: Roster integrity checks (duplicate IDs, coverage refs)
//! - **`config`**: TOML and environment configuration
//!
//! # Example
//!
//! ```
//! use ea_schedule::models::{SlotSequence, Task, TimeSlot};
//! use ea_schedule::scheduler::compress;
//! use ea_schedule::store::{MemoryStore, ScheduleStore};
//!
//! let mut store = ScheduleStore::hydrate(MemoryStore::new()).unwrap();
//! let id = store.add_employee("Alice").unwrap().unwrap();
//!
//! let seq = SlotSequence::assignment();
//! for slot in seq.range(TimeSlot::first(), TimeSlot::new(2).unwrap()) {
//!     store.assign_task(&id, slot, Task::Grade(1)).unwrap();
//! }
//!
//! let alice = store.employee(&id).unwrap();
//! let intervals = compress(&alice.schedule, &seq);
//! assert_eq!(intervals[0].to_string(), "8:30 am - 8:45 am Grade 1");
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod store;
pub mod validation;
pub mod views;
pub mod workflow;

pub use error::{Result, ScheduleError};
