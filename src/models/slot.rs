//! Time slot and canonical slot sequence models.
//!
//! The working day is divided into 5-minute slots starting at 08:30.
//! A slot is identified by its position in that sequence, never by its
//! label, so iteration is always chronological regardless of how a
//! schedule was built or how its labels sort as strings.
//!
//! # Sequences
//! - Dashboard / print view: 96 slots (08:30 onwards).
//! - Assignment grid: 192 slots. The tail of this sequence wraps past
//!   midnight (`12:00 am` .. `12:25 am`); ordering stays by index.
//!
//! # Labels
//! Labels are 12-hour clock strings with a lowercase suffix (`"8:30 am"`).
//! Parsing is case-insensitive, so `"8:30 AM"` names the same slot.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ScheduleError;

/// Width of one slot (minutes).
pub const SLOT_MINUTES: u32 = 5;

/// Clock time of slot 0, in minutes after midnight (08:30).
pub const DAY_START_MINUTES: u32 = 8 * 60 + 30;

/// Length of the assignment grid; no slot index reaches this value.
pub const MAX_SLOTS: u16 = 192;

/// Length of the dashboard and print view.
pub const DASHBOARD_SLOTS: u16 = 96;

const MINUTES_PER_DAY: u32 = 24 * 60;
const LABEL_FORMAT: &str = "%-I:%M %P";
const PARSE_FORMAT: &str = "%I:%M %p";

/// A 5-minute slot, identified by its position in the canonical sequence.
///
/// Ordering follows the position, so a `BTreeMap<TimeSlot, _>` iterates
/// chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(u16);

impl TimeSlot {
    /// Creates a slot from its sequence index.
    ///
    /// Returns `None` if the index lies outside the assignment grid.
    pub fn new(index: u16) -> Option<Self> {
        (index < MAX_SLOTS).then_some(Self(index))
    }

    /// The first slot of the day (08:30).
    pub fn first() -> Self {
        Self(0)
    }

    /// Position that may sit one past the last slot; only used as an
    /// exclusive interval end.
    pub(crate) fn boundary(index: u16) -> Self {
        Self(index.min(MAX_SLOTS))
    }

    /// Looks up a slot by its clock label (e.g. `"8:30 am"`).
    pub fn from_label(label: &str) -> Result<Self, ScheduleError> {
        let unknown = || ScheduleError::UnknownSlot(label.to_string());
        let time = NaiveTime::parse_from_str(&label.trim().to_ascii_uppercase(), PARSE_FORMAT)
            .map_err(|_| unknown())?;

        let minute_of_day = time.hour() * 60 + time.minute();
        let offset = (minute_of_day + MINUTES_PER_DAY - DAY_START_MINUTES) % MINUTES_PER_DAY;
        if offset % SLOT_MINUTES != 0 {
            return Err(unknown());
        }

        u16::try_from(offset / SLOT_MINUTES)
            .ok()
            .and_then(Self::new)
            .ok_or_else(unknown)
    }

    /// Position in the canonical sequence.
    #[inline]
    pub fn index(self) -> u16 {
        self.0
    }

    /// The following slot (or boundary past the last slot).
    #[inline]
    pub fn next(self) -> Self {
        Self::boundary(self.0 + 1)
    }

    /// The preceding slot, if any.
    #[inline]
    pub fn prev(self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }

    /// Clock time at which this slot starts.
    pub fn clock_time(self) -> NaiveTime {
        let minutes = (DAY_START_MINUTES + SLOT_MINUTES * u32::from(self.0)) % MINUTES_PER_DAY;
        // Always below one day, so construction cannot fail.
        NaiveTime::from_num_seconds_from_midnight_opt(minutes * 60, 0).unwrap_or_default()
    }

    /// 12-hour clock label, e.g. `"8:30 am"`.
    pub fn label(self) -> String {
        self.clock_time().format(LABEL_FORMAT).to_string()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for TimeSlot {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Self::from_label(&label).map_err(serde::de::Error::custom)
    }
}

/// A canonical, chronologically ordered run of slots starting at 08:30.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSequence {
    len: u16,
}

impl SlotSequence {
    /// Creates a sequence of `len` slots.
    ///
    /// Returns `None` for an empty sequence or one longer than the
    /// assignment grid.
    pub fn new(len: u16) -> Option<Self> {
        (1..=MAX_SLOTS).contains(&len).then_some(Self { len })
    }

    /// The 96-slot dashboard / print sequence.
    pub fn dashboard() -> Self {
        Self {
            len: DASHBOARD_SLOTS,
        }
    }

    /// The 192-slot assignment grid sequence.
    pub fn assignment() -> Self {
        Self { len: MAX_SLOTS }
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    /// Always `false`; sequences hold at least one slot.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether a slot belongs to this sequence.
    #[inline]
    pub fn contains(&self, slot: TimeSlot) -> bool {
        slot.0 < self.len
    }

    /// The last slot of the sequence.
    pub fn last(&self) -> TimeSlot {
        TimeSlot(self.len - 1)
    }

    /// The "one past last" boundary, used as the end of a run that
    /// reaches the final slot.
    pub fn end(&self) -> TimeSlot {
        TimeSlot::boundary(self.len)
    }

    /// Iterates the slots in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = TimeSlot> {
        (0..self.len).map(TimeSlot)
    }

    /// Slots from `from` through `to` (inclusive), clipped to the sequence.
    ///
    /// The bounds may be given in either order.
    pub fn range(&self, from: TimeSlot, to: TimeSlot) -> impl Iterator<Item = TimeSlot> {
        let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
        let hi = hi.0.min(self.len.saturating_sub(1));
        (lo.0..=hi).map(TimeSlot)
    }

    /// All labels in order.
    pub fn labels(&self) -> Vec<String> {
        self.iter().map(TimeSlot::label).collect()
    }
}

impl Default for SlotSequence {
    fn default() -> Self {
        Self::assignment()
    }
}
