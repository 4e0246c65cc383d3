//! Error types shared across the crate.
//!
//! Most roster operations are fail-soft: a mutation that targets an unknown
//! employee or slot reports `Ok(false)` instead of an error. `ScheduleError`
//! is reserved for storage failures and caller contract breaches.

use thiserror::Error;

/// Crate result alias.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Errors raised by the schedule store, storage backends and configuration.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Backing storage could not be read or written.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// Roster could not be encoded as JSON.
    #[error("roster serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    /// A label does not name a slot in the canonical sequence.
    #[error("unknown time slot label: {0:?}")]
    UnknownSlot(String),
    /// A task outside the vocabulary, such as a grade above the highest one.
    #[error("task is not in the vocabulary: {0}")]
    InvalidTask(String),
    /// `Break Coverage` reached the store without a covered employee.
    #[error("break coverage assignment is missing the covered employee")]
    UnresolvedBreakCoverage,
    /// Configuration values are inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Configuration file is not valid TOML.
    #[error("failed to parse configuration: {0}")]
    TomlConfig(#[from] toml::de::Error),
}
