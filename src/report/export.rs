//! JSON export of a finished calculation

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use super::assignment::AssignmentReport;
use super::chart::ChartBar;
use crate::pipeline::{AssignType, Assignment, CostMatrix, ReducedMatrix, SquareMatrix};

/// Metadata about the calculation
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    /// Timestamp of the export (ISO 8601 format)
    pub timestamp: String,
    /// Hungaro version
    pub hungaro_version: String,
    /// Solver endpoint that computed the assignment
    pub solver_url: String,
    /// Optimization direction
    pub assign_type: AssignType,
    /// Input file, when the matrix was loaded from disk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_file: Option<String>,
}

/// Complete export: inputs, derived matrices and the interpreted result
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationExport<'a> {
    pub metadata: ExportMetadata,
    pub cost_matrix: &'a CostMatrix,
    pub row_labels: &'a [String],
    pub col_labels: &'a [String],
    pub square_matrix: &'a SquareMatrix,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduced_matrix: Option<&'a ReducedMatrix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignments: Option<&'a Assignment>,
    pub lines: Vec<String>,
    pub total: f64,
    pub chart: &'a [ChartBar],
}

/// Parameters describing where a calculation came from
pub struct ExportParams<'a> {
    pub solver_url: &'a str,
    pub assign_type: AssignType,
    pub input_file: Option<&'a Path>,
}

/// Inputs and outputs of one calculation
pub struct ExportData<'a> {
    pub matrix: &'a CostMatrix,
    pub row_labels: &'a [String],
    pub col_labels: &'a [String],
    pub square: &'a SquareMatrix,
    pub reduced: Option<&'a ReducedMatrix>,
    pub assignment: Option<&'a Assignment>,
    pub report: &'a AssignmentReport,
    pub chart: &'a [ChartBar],
}

/// Build the export structure without writing it
pub fn build_export<'a>(data: &ExportData<'a>, params: &ExportParams) -> CalculationExport<'a> {
    CalculationExport {
        metadata: ExportMetadata {
            timestamp: Utc::now().to_rfc3339(),
            hungaro_version: env!("CARGO_PKG_VERSION").to_string(),
            solver_url: params.solver_url.to_string(),
            assign_type: params.assign_type,
            input_file: params.input_file.map(|p| p.display().to_string()),
        },
        cost_matrix: data.matrix,
        row_labels: data.row_labels,
        col_labels: data.col_labels,
        square_matrix: data.square,
        reduced_matrix: data.reduced,
        assignments: data.assignment,
        lines: data.report.lines(),
        total: data.report.total,
        chart: data.chart,
    }
}

/// Write a calculation to a pretty-printed JSON file
pub fn export_calculation(data: &ExportData, params: &ExportParams, output_path: &Path) -> Result<()> {
    let export = build_export(data, params);

    let file = std::fs::File::create(output_path)
        .with_context(|| format!("Failed to create export file: {}", output_path.display()))?;
    serde_json::to_writer_pretty(file, &export)
        .with_context(|| format!("Failed to write export file: {}", output_path.display()))?;

    Ok(())
}
