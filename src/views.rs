//! Read models for the dashboard, the print view and employee cards.
//!
//! Every view is built from [`compress`], so the interactive dashboard
//! and the printed schedule show identical intervals for the same roster.

use std::fmt;

use serde::Serialize;

use crate::models::{Employee, EmployeeId, SlotSequence, TimeSlot};
use crate::scheduler::{compress, BreakCoverageStatus, ScheduleInterval};

/// One cell of the daily grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCell<'a> {
    /// No task at this slot.
    Empty,
    /// First slot of an interval; the interval is rendered here.
    Start(&'a ScheduleInterval),
    /// Slot inside an interval that started on an earlier row.
    Continued(&'a ScheduleInterval),
}

impl GridCell<'_> {
    /// Whether a task occupies this slot.
    pub fn is_occupied(&self) -> bool {
        !matches!(self, GridCell::Empty)
    }

    /// Text shown in the cell.
    pub fn text(&self) -> String {
        match self {
            GridCell::Start(iv) => iv.to_string(),
            _ => String::new(),
        }
    }
}

/// One employee column of the grid.
#[derive(Debug, Clone, Serialize)]
pub struct GridColumn {
    /// Employee shown in this column.
    pub employee_id: EmployeeId,
    /// Column header.
    pub name: String,
    /// Compressed schedule, in order.
    pub intervals: Vec<ScheduleInterval>,
}

impl GridColumn {
    /// Cell for `slot`.
    pub fn cell(&self, slot: TimeSlot) -> GridCell<'_> {
        match self.intervals.iter().find(|iv| iv.contains(slot)) {
            Some(iv) if iv.start == slot => GridCell::Start(iv),
            Some(iv) => GridCell::Continued(iv),
            None => GridCell::Empty,
        }
    }
}

/// Consolidated daily schedule: rows are slots, columns are employees.
#[derive(Debug, Clone, Serialize)]
pub struct DailyGrid {
    #[serde(skip)]
    slots: SlotSequence,
    /// One column per employee, in roster order.
    pub columns: Vec<GridColumn>,
}

impl DailyGrid {
    /// Builds the grid for a roster over `slots`.
    pub fn build(employees: &[Employee], slots: SlotSequence) -> Self {
        let columns = employees
            .iter()
            .map(|e| GridColumn {
                employee_id: e.id.clone(),
                name: e.name.clone(),
                intervals: compress(&e.schedule, &slots),
            })
            .collect();
        Self { slots, columns }
    }

    /// Row slots.
    pub fn slots(&self) -> &SlotSequence {
        &self.slots
    }

    /// Cells of one row, in column order.
    pub fn row(&self, slot: TimeSlot) -> Vec<GridCell<'_>> {
        self.columns.iter().map(|c| c.cell(slot)).collect()
    }
}

impl fmt::Display for DailyGrid {
    /// Plain-text table for printing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let time_width = self
            .slots
            .iter()
            .map(|s| s.label().len())
            .max()
            .unwrap_or(0)
            .max("Time".len());
        let widths: Vec<usize> = self
            .columns
            .iter()
            .map(|c| {
                c.intervals
                    .iter()
                    .map(|iv| iv.to_string().len())
                    .max()
                    .unwrap_or(0)
                    .max(c.name.len())
            })
            .collect();

        write!(f, "{:<time_width$}", "Time")?;
        for (column, width) in self.columns.iter().zip(&widths) {
            write!(f, " | {:<width$}", column.name)?;
        }
        writeln!(f)?;

        for slot in self.slots.iter() {
            write!(f, "{:<time_width$}", slot.label())?;
            for (cell, width) in self.row(slot).iter().zip(&widths) {
                write!(f, " | {:<width$}", cell.text())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Employee card: schedule lines plus the tier-3 coverage indicator.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeSummary {
    /// Employee.
    pub employee_id: EmployeeId,
    /// Display name.
    pub name: String,
    /// Whether the employee supports a tier-3 student.
    pub working_with_tier3: bool,
    /// Compressed schedule.
    pub intervals: Vec<ScheduleInterval>,
    /// Advisory break-coverage status.
    pub coverage: BreakCoverageStatus,
}

impl EmployeeSummary {
    /// Builds a card over `slots`, checking `required` break coverage.
    pub fn build(employee: &Employee, slots: &SlotSequence, required: usize) -> Self {
        Self {
            employee_id: employee.id.clone(),
            name: employee.name.clone(),
            working_with_tier3: employee.working_with_tier3,
            intervals: compress(&employee.schedule, slots),
            coverage: BreakCoverageStatus::evaluate(employee, required),
        }
    }

    /// Card lines (`"<start> - <end> <task>"`).
    pub fn lines(&self) -> Vec<String> {
        self.intervals.iter().map(ToString::to_string).collect()
    }
}
