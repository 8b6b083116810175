//! Cost matrix loader for CSV, Parquet and JSON files

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;
use serde_json::Value;

use super::matrix::{coerce_cell, sanitize, CostMatrix};

/// A cost matrix read from disk along with whatever labels the file carried
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedMatrix {
    pub matrix: CostMatrix,
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
}

impl LoadedMatrix {
    fn new(matrix: CostMatrix, mut row_labels: Vec<String>, mut col_labels: Vec<String>) -> Self {
        row_labels.resize(matrix.row_count(), String::new());
        col_labels.resize(matrix.col_count(), String::new());
        Self {
            matrix,
            row_labels,
            col_labels,
        }
    }
}

/// Load a cost matrix (CSV, Parquet or JSON based on extension)
///
/// For CSV and Parquet, header names become job labels. A leading text column is
/// read as employee labels instead of costs. Every other column is read as numbers;
/// empty or invalid cells become 0.
pub fn load_matrix(path: &Path) -> Result<LoadedMatrix> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let loaded = match extension.as_str() {
        "csv" => {
            let df = LazyCsvReader::new(path)
                .finish()
                .and_then(|lf| lf.collect())
                .with_context(|| format!("Failed to load CSV file: {}", path.display()))?;
            from_dataframe(&df)?
        }
        "parquet" => {
            let df = LazyFrame::scan_parquet(path, Default::default())
                .and_then(|lf| lf.collect())
                .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?;
            from_dataframe(&df)?
        }
        "json" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read JSON file: {}", path.display()))?;
            from_json(&text)
                .with_context(|| format!("Failed to parse JSON file: {}", path.display()))?
        }
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet, json",
            extension
        ),
    };

    if loaded.matrix.is_empty() || loaded.matrix.col_count() == 0 {
        anyhow::bail!("No cost values found in {}", path.display());
    }

    Ok(loaded)
}

/// Build a cost matrix from a DataFrame
pub fn from_dataframe(df: &DataFrame) -> Result<LoadedMatrix> {
    let columns = df.get_columns();
    let label_column = columns
        .first()
        .filter(|col| matches!(col.dtype(), DataType::String));

    let row_labels: Vec<String> = match label_column {
        Some(col) => col
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or("").to_string())
            .collect(),
        None => Vec::new(),
    };

    let cost_columns = &columns[usize::from(label_column.is_some())..];
    let col_labels: Vec<String> = cost_columns.iter().map(|c| c.name().to_string()).collect();

    let mut rows = vec![Vec::with_capacity(cost_columns.len()); df.height()];
    for column in cost_columns {
        let values = column
            .cast(&DataType::Float64)
            .with_context(|| format!("Column '{}' is not numeric", column.name()))?;
        for (row, value) in rows
            .iter_mut()
            .zip(values.as_materialized_series().f64()?.into_iter())
        {
            row.push(value.map(sanitize).unwrap_or(0.0));
        }
    }

    Ok(LoadedMatrix::new(CostMatrix::new(rows), row_labels, col_labels))
}

/// Build a cost matrix from JSON text.
///
/// Accepts `{"costMatrix": [[..]], "rowLabels": [..], "colLabels": [..]}` (labels
/// optional) or a bare `[[..]]` array. Cells may be numbers or numeric strings.
pub fn from_json(text: &str) -> Result<LoadedMatrix> {
    let value: Value = serde_json::from_str(text)?;

    let (matrix_value, row_labels, col_labels) = match &value {
        Value::Array(_) => (&value, Vec::new(), Vec::new()),
        Value::Object(map) => {
            let matrix_value = map
                .get("costMatrix")
                .or_else(|| map.get("matrix"))
                .ok_or_else(|| anyhow::anyhow!("Missing \"costMatrix\" field"))?;
            (
                matrix_value,
                json_labels(map.get("rowLabels")),
                json_labels(map.get("colLabels")),
            )
        }
        _ => anyhow::bail!("Expected a matrix array or an object with \"costMatrix\""),
    };

    let rows: Vec<Vec<f64>> = matrix_value
        .as_array()
        .ok_or_else(|| anyhow::anyhow!("\"costMatrix\" must be an array of rows"))?
        .iter()
        .map(|row| {
            row.as_array()
                .map(|cells| cells.iter().map(json_cell).collect())
                .ok_or_else(|| anyhow::anyhow!("Each matrix row must be an array"))
        })
        .collect::<Result<_>>()?;

    let matrix = CostMatrix::new(rows);
    matrix.validate()?;

    Ok(LoadedMatrix::new(matrix, row_labels, col_labels))
}

fn json_cell(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().map(sanitize).unwrap_or(0.0),
        Value::String(s) => coerce_cell(s),
        _ => 0.0,
    }
}

fn json_labels(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .map(|item| item.as_str().unwrap_or("").to_string())
                .collect()
        })
        .unwrap_or_default()
}
