//! Runtime configuration.
//!
//! Values come from defaults, then an optional TOML file, then
//! environment overrides:
//!
//! | Key | Env | Default |
//! |-----|-----|---------|
//! | `storage_key` | `EA_SCHEDULE_STORAGE_KEY` | `employees` |
//! | `required_break_coverage` | `EA_SCHEDULE_REQUIRED_BREAK_COVERAGE` | 3 |
//! | `dashboard_slots` | | 96 |
//! | `assignment_slots` | | 192 |

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Result, ScheduleError};
use crate::models::{SlotSequence, DASHBOARD_SLOTS, MAX_SLOTS};
use crate::scheduler::DEFAULT_REQUIRED_BREAK_COVERAGE;
use crate::store::DEFAULT_STORAGE_KEY;

/// Env var overriding [`ScheduleConfig::storage_key`].
pub const ENV_STORAGE_KEY: &str = "EA_SCHEDULE_STORAGE_KEY";

/// Env var overriding [`ScheduleConfig::required_break_coverage`].
pub const ENV_REQUIRED_BREAK_COVERAGE: &str = "EA_SCHEDULE_REQUIRED_BREAK_COVERAGE";

/// Scheduling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Storage key the roster is persisted under.
    pub storage_key: String,
    /// Break-coverage slots a tier-3 employee needs.
    pub required_break_coverage: usize,
    /// Slots shown on the dashboard and print view.
    pub dashboard_slots: u16,
    /// Slots offered by the assignment grid.
    pub assignment_slots: u16,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            required_break_coverage: DEFAULT_REQUIRED_BREAK_COVERAGE,
            dashboard_slots: DASHBOARD_SLOTS,
            assignment_slots: MAX_SLOTS,
        }
    }
}

impl ScheduleConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path` (defaults if the file is missing),
    /// then applies environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = match fs::read_to_string(path) {
            Ok(raw) => toml::from_str(&raw)?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file; using defaults");
                Self::default()
            }
            Err(err) => return Err(err.into()),
        };
        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides from an environment lookup.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(ENV_STORAGE_KEY) {
            self.storage_key = key;
        }
        if let Some(raw) = lookup(ENV_REQUIRED_BREAK_COVERAGE) {
            match raw.trim().parse() {
                Ok(n) => self.required_break_coverage = n,
                Err(_) => warn!(value = %raw, "ignoring {ENV_REQUIRED_BREAK_COVERAGE}"),
            }
        }
    }

    /// Checks value consistency.
    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(ScheduleError::Config("storage_key must not be empty".into()));
        }
        for (name, len) in [
            ("dashboard_slots", self.dashboard_slots),
            ("assignment_slots", self.assignment_slots),
        ] {
            if len == 0 || len > MAX_SLOTS {
                return Err(ScheduleError::Config(format!(
                    "{name} must be between 1 and {MAX_SLOTS}, got {len}"
                )));
            }
        }
        if self.dashboard_slots > self.assignment_slots {
            return Err(ScheduleError::Config(
                "dashboard_slots must not exceed assignment_slots".into(),
            ));
        }
        Ok(())
    }

    /// Dashboard / print sequence.
    pub fn dashboard_sequence(&self) -> SlotSequence {
        SlotSequence::new(self.dashboard_slots).unwrap_or_else(SlotSequence::dashboard)
    }

    /// Assignment grid sequence.
    pub fn assignment_sequence(&self) -> SlotSequence {
        SlotSequence::new(self.assignment_slots).unwrap_or_else(SlotSequence::assignment)
    }
}
