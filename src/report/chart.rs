//! Per-row cost series for bar charts

use serde::Serialize;

use super::assignment::employee_name;
use crate::pipeline::{Assignment, CostMatrix};

/// Bar colors, cycled by bar index
pub const PALETTE: [&str; 16] = [
    "#3498db", "#e74c3c", "#2ecc71", "#f1c40f", "#9b59b6", "#1abc9c", "#e67e22", "#34495e",
    "#7f8c8d", "#ff6b6b", "#6c5ce7", "#00b894", "#fd79a8", "#dfe6e9", "#00cec9", "#fdcb6e",
];

/// One bar: an employee and the cost of the job they were given
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub row: usize,
    pub col: usize,
    pub label: String,
    /// Cell cost as stored; rounding happens when it is displayed
    pub value: f64,
    pub color: &'static str,
}

impl ChartBar {
    /// The bar color as RGB components
    pub fn rgb(&self) -> (u8, u8, u8) {
        hex_to_rgb(self.color).unwrap_or((255, 255, 255))
    }
}

/// Color for the bar at `index`
pub fn bar_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Bars for every assigned row that falls inside the matrix.
pub fn chart_series(
    assignment: &Assignment,
    matrix: &CostMatrix,
    row_labels: &[String],
) -> Vec<ChartBar> {
    if assignment.is_empty() || matrix.is_empty() {
        return Vec::new();
    }

    let rows = matrix.row_count();
    let cols = matrix.col_count();

    assignment
        .assigned()
        .filter(|&(row, col)| row < rows && col < cols)
        .enumerate()
        .map(|(index, (row, col))| ChartBar {
            row,
            col,
            label: employee_name(row_labels, row),
            value: matrix.get(row, col).unwrap_or(0.0),
            color: bar_color(index),
        })
        .collect()
}
