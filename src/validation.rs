//! Integrity checks for a roster.
//!
//! Run when a roster is loaded from storage. Detects:
//! - Duplicate employee IDs
//! - Blank employee names
//! - Task labels outside the vocabulary
//! - Break coverage that names no one, or names nobody on the roster
//!
//! All problems are collected; the caller decides whether to log or reject.

use std::collections::HashSet;

use crate::models::{Employee, Task};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two employees share the same ID.
    DuplicateId,
    /// An employee has an empty or whitespace-only name.
    BlankName,
    /// A slot carries a label outside the task vocabulary.
    UnknownTask,
    /// A break-coverage entry has no covered employee.
    UnresolvedCoverage,
    /// A break-coverage entry names someone not on the roster.
    UnknownCoveredEmployee,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a roster.
///
/// Checks:
/// 1. No duplicate employee IDs
/// 2. No blank names
/// 3. Every task label belongs to the vocabulary
/// 4. Break coverage names an employee, and that employee is on the roster
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_roster(employees: &[Employee]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut ids = HashSet::new();
    for e in employees {
        if !ids.insert(e.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate employee ID: {}", e.id),
            ));
        }
        if e.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlankName,
                format!("Employee '{}' has a blank name", e.id),
            ));
        }
    }

    let names: HashSet<&str> = employees.iter().map(|e| e.name.as_str()).collect();

    for e in employees {
        for (slot, task) in e.schedule.iter() {
            match task {
                Task::BreakCoverage(None) => errors.push(ValidationError::new(
                    ValidationErrorKind::UnresolvedCoverage,
                    format!("Employee '{}' at {slot}: break coverage names no one", e.id),
                )),
                Task::BreakCoverage(Some(covered)) if !names.contains(covered.as_str()) => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownCoveredEmployee,
                        format!(
                            "Employee '{}' at {slot}: covers unknown employee '{covered}'",
                            e.id
                        ),
                    ))
                }
                Task::Custom(label) => errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownTask,
                    format!("Employee '{}' at {slot}: unknown task '{label}'", e.id),
                )),
                _ => {}
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
