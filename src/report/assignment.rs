//! Assignment report: one readable line per assigned row plus the total cost

use std::fmt;

use serde::Serialize;

use crate::pipeline::{Assignment, CostMatrix};

/// Currency prefix used in report lines and totals (Guatemalan quetzal)
pub const CURRENCY_PREFIX: &str = "Q";

/// A single reported row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentEntry {
    pub row: usize,
    pub col: usize,
    pub employee: String,
    pub job: String,
    pub cost: f64,
}

impl fmt::Display for AssignmentEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} va a trabajar como {}, cobrando {}{:.2}",
            self.employee, self.job, CURRENCY_PREFIX, self.cost
        )
    }
}

/// Report lines for an assignment and the aggregate cost
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssignmentReport {
    pub entries: Vec<AssignmentEntry>,
    /// Sum of all resolved costs, rounded to 2 decimal places
    pub total: f64,
}

impl AssignmentReport {
    /// The report as display lines
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.to_string()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `Q50.00` style total
    pub fn formatted_total(&self) -> String {
        format!("{}{:.2}", CURRENCY_PREFIX, self.total)
    }
}

/// Name for row `index`: its trimmed label, or `Employee N` when blank.
pub fn employee_name(labels: &[String], index: usize) -> String {
    label_or(labels, index, "Employee")
}

/// Name for column `index`: its trimmed label, or `Job N` when blank.
pub fn job_name(labels: &[String], index: usize) -> String {
    label_or(labels, index, "Job")
}

fn label_or(labels: &[String], index: usize, fallback: &str) -> String {
    match labels.get(index).map(|l| l.trim()) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => format!("{} {}", fallback, index + 1),
    }
}

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sum of `matrix[row][col]` over every assigned row, rounded to 2 decimals.
///
/// Out-of-range rows or columns contribute 0.
pub fn total_cost(assignment: &Assignment, matrix: &CostMatrix) -> f64 {
    let sum: f64 = assignment
        .assigned()
        .map(|(row, col)| matrix.get(row, col).unwrap_or(0.0))
        .sum();
    round2(sum)
}

/// Describe an assignment in words.
///
/// Never fails. Rows missing from the matrix are skipped. A row beyond the label
/// set with a zero cost is a padding row added by the solver's squaring: it emits
/// no line and adds nothing to the total.
pub fn describe(
    assignment: &Assignment,
    matrix: &CostMatrix,
    row_labels: &[String],
    col_labels: &[String],
) -> AssignmentReport {
    if assignment.is_empty() || matrix.is_empty() {
        return AssignmentReport::default();
    }

    let entries = assignment
        .assigned()
        .filter_map(|(row, col)| {
            let cells = matrix.row(row)?;
            let cost = cells.get(col).copied().unwrap_or(0.0);
            if cost == 0.0 && row >= row_labels.len() {
                return None;
            }

            Some(AssignmentEntry {
                row,
                col,
                employee: employee_name(row_labels, row),
                job: job_name(col_labels, col),
                cost,
            })
        })
        .collect();

    AssignmentReport {
        entries,
        total: total_cost(assignment, matrix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(50.0), 50.0);
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.236), 1.24);
        assert_eq!(round2(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_label_fallbacks() {
        let labels = vec!["  Ana ".to_string(), "   ".to_string()];
        assert_eq!(employee_name(&labels, 0), "Ana");
        assert_eq!(employee_name(&labels, 1), "Employee 2");
        assert_eq!(employee_name(&labels, 5), "Employee 6");
        assert_eq!(job_name(&[], 0), "Job 1");
    }

    #[test]
    fn test_entry_display() {
        let entry = AssignmentEntry {
            row: 0,
            col: 1,
            employee: "Ana".to_string(),
            job: "Clerk".to_string(),
            cost: 20.0,
        };
        assert_eq!(entry.to_string(), "Ana va a trabajar como Clerk, cobrando Q20.00");
    }
}
