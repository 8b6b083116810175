//! Terminal summary of a calculation

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use super::assignment::{employee_name, job_name, round2, AssignmentReport};
use super::chart::ChartBar;
use crate::pipeline::{AssignType, Assignment};

/// Width of the longest bar in the terminal chart
const CHART_WIDTH: usize = 40;

/// Number of blocks for `value` on a chart whose longest bar is `max`. Zero draws nothing.
fn bar_length(value: f64, max: f64) -> usize {
    if max > 0.0 && value > 0.0 {
        ((value / max) * CHART_WIDTH as f64).round() as usize
    } else {
        0
    }
}

/// Render a cost like the editor does: at most 2 decimals, no trailing zeros.
pub fn format_value(value: f64) -> String {
    round2(value).to_string()
}

/// Build a table of `rows` with employee/job headers, highlighting assigned cells.
pub fn matrix_table(
    rows: &[Vec<f64>],
    row_labels: &[String],
    col_labels: &[String],
    assignment: Option<&Assignment>,
) -> Table {
    let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);

    let mut header = vec![Cell::new("")];
    header.extend((0..width).map(|j| Cell::new(job_name(col_labels, j)).add_attribute(Attribute::Bold)));
    table.set_header(header);

    for (i, row) in rows.iter().enumerate() {
        let mut cells = vec![Cell::new(employee_name(row_labels, i)).add_attribute(Attribute::Bold)];
        cells.extend(row.iter().enumerate().map(|(j, &value)| {
            let cell = Cell::new(format_value(value)).set_alignment(CellAlignment::Right);
            if assignment.and_then(|a| a.column_for(i)) == Some(j) {
                cell.fg(Color::Green).add_attribute(Attribute::Bold)
            } else {
                cell
            }
        }));
        table.add_row(cells);
    }

    table
}

/// Print a titled matrix table, indented like the rest of the output
pub fn print_matrix(
    title: &str,
    rows: &[Vec<f64>],
    row_labels: &[String],
    col_labels: &[String],
    assignment: Option<&Assignment>,
) {
    println!();
    println!("    {} {}", style("▦").cyan(), style(title).white().bold());
    println!("    {}", style("─".repeat(50)).dim());
    let table = matrix_table(rows, row_labels, col_labels, assignment);
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

/// Everything shown at the end of a calculation
#[derive(Debug)]
pub struct AssignmentSummary<'a> {
    pub mode: AssignType,
    pub rows: &'a [Vec<f64>],
    pub row_labels: &'a [String],
    pub col_labels: &'a [String],
    pub assignment: Option<&'a Assignment>,
    pub report: &'a AssignmentReport,
    pub chart: &'a [ChartBar],
    pub solve_time: Option<Duration>,
}

impl AssignmentSummary<'_> {
    pub fn display(&self) {
        let Some(assignment) = self.assignment else {
            println!();
            println!(
                "    {} {}",
                style("⚠").yellow(),
                style(format!("The solver returned no {}", self.mode.label().to_lowercase())).yellow()
            );
            return;
        };

        print_matrix(
            &format!(
                "{} ({}: {})",
                self.mode.label().to_uppercase(),
                self.mode.total_caption(),
                self.report.formatted_total()
            ),
            self.rows,
            self.row_labels,
            self.col_labels,
            Some(assignment),
        );

        self.display_chart();

        println!();
        println!(
            "    {} {}",
            style("📝").cyan(),
            style("ASSIGNMENT DETAIL").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        if self.report.is_empty() {
            println!("      {}", style("No assignments to show").dim());
        }
        for line in self.report.lines() {
            println!("        {} {}", style("•").dim(), line);
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![Cell::new("🧮 Mode"), Cell::new(self.mode.label())]);
        table.add_row(vec![
            Cell::new("👥 Assigned rows"),
            Cell::new(self.report.entries.len()),
        ]);
        if let Some(elapsed) = self.solve_time {
            table.add_row(vec![
                Cell::new("⏱  Solver time"),
                Cell::new(format!("{:.2}s", elapsed.as_secs_f64())),
            ]);
        }
        table.add_row(vec![
            Cell::new("💰 Total"),
            Cell::new(self.report.formatted_total())
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        println!();
        for line in table.to_string().lines() {
            println!("    {}", line);
        }
    }

    fn display_chart(&self) {
        if self.chart.is_empty() {
            return;
        }

        println!();
        println!("    {} {}", style("📊").cyan(), style("ASSIGNMENT COSTS").white().bold());
        println!("    {}", style("─".repeat(50)).dim());

        let max = self.chart.iter().map(|b| b.value).fold(0.0, f64::max);
        let label_width = self.chart.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);

        let mut table = Table::new();
        table.load_preset(comfy_table::presets::NOTHING);
        for bar in self.chart {
            let (r, g, b) = bar.rgb();
            table.add_row(vec![
                Cell::new(format!("{:<width$}", bar.label, width = label_width)),
                Cell::new("█".repeat(bar_length(bar.value, max))).fg(Color::Rgb { r, g, b }),
                Cell::new(format_value(bar.value)).set_alignment(CellAlignment::Right),
            ]);
        }
        for line in table.to_string().lines() {
            println!("    {}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(10.0), "10");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(1.239), "1.24");
    }

    #[test]
    fn test_bar_length() {
        assert_eq!(bar_length(0.0, 30.0), 0);
        assert_eq!(bar_length(0.0, 0.0), 0);
        assert_eq!(bar_length(30.0, 30.0), CHART_WIDTH);
        assert_eq!(bar_length(15.0, 30.0), CHART_WIDTH / 2);
    }

    #[test]
    fn test_matrix_table_uses_fallback_names() {
        let rows = vec![vec![10.0, 20.0], vec![30.0, 5.0]];
        let labels = vec!["Ana".to_string()];
        let rendered = matrix_table(&rows, &labels, &[], None).to_string();
        assert!(rendered.contains("Ana"));
        assert!(rendered.contains("Employee 2"));
        assert!(rendered.contains("Job 1"));
        assert!(rendered.contains("Job 2"));
        assert!(rendered.contains("30"));
    }
}
