//! Algorithms over employee schedules.
//!
//! # Compression
//!
//! [`compress`] turns a slot → task mapping into contiguous
//! `[start, end)` intervals; [`expand`] is its inverse. Every view
//! (dashboard, print, employee card) renders from these intervals.
//!
//! # Coverage
//!
//! [`BreakCoverageStatus`] and [`CoverageReport`] evaluate the advisory
//! tier-3 break-coverage requirement.

mod compress;
mod coverage;

pub use compress::{compress, expand, ScheduleInterval};
pub use coverage::{BreakCoverageStatus, CoverageReport, DEFAULT_REQUIRED_BREAK_COVERAGE};
