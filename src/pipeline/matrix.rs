//! Cost matrix types and the canonical cell coercion rule
//!
//! Every path that turns user input into a cost (editor keystrokes, CSV/Parquet
//! columns, JSON files) goes through [`coerce_cell`] or [`sanitize`], so a cost is
//! always a non-negative finite number by the time any computation sees it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Validation failures for a cost matrix about to be submitted
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    #[error("The matrix is empty. Set its dimensions before calculating.")]
    Empty,

    #[error("The matrix is not valid: row {row} has {found} cell(s), expected {expected}")]
    Ragged {
        /// 1-indexed row number, as shown to the user
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Clamp a raw value to a usable cost: NaN, infinities and negatives become 0.
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Parse the text of a single cell into a cost.
///
/// Empty or non-numeric text is 0. Editing happens keystroke by keystroke, so
/// partial input like `"-"` or `"1e"` must never be an error.
pub fn coerce_cell(text: &str) -> f64 {
    text.trim().parse::<f64>().map(sanitize).unwrap_or(0.0)
}

/// Rectangular table of costs as edited by the user (rows = employees, cols = jobs)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct CostMatrix {
    rows: Vec<Vec<f64>>,
}

impl CostMatrix {
    /// Build a matrix from numeric rows, sanitizing every cell.
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(sanitize).collect())
            .collect();
        Self { rows }
    }

    /// Build a matrix from the raw text of each cell.
    pub fn from_text<S: AsRef<str>>(cells: &[Vec<S>]) -> Self {
        let rows = cells
            .iter()
            .map(|row| row.iter().map(|cell| coerce_cell(cell.as_ref())).collect())
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Column count, taken from the first row.
    pub fn col_count(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        self.rows.get(row).map(|r| r.as_slice())
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Check the matrix can be submitted: non-empty and every row the same length.
    pub fn validate(&self) -> Result<(), MatrixError> {
        validate_rectangular(&self.rows)
    }
}

impl From<Vec<Vec<f64>>> for CostMatrix {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        Self::new(rows)
    }
}

impl From<CostMatrix> for Vec<Vec<f64>> {
    fn from(matrix: CostMatrix) -> Self {
        matrix.rows
    }
}

/// Reject empty or ragged tables.
pub fn validate_rectangular<T>(rows: &[Vec<T>]) -> Result<(), MatrixError> {
    let first = rows.first().ok_or(MatrixError::Empty)?;
    let expected = first.len();

    match rows.iter().position(|row| row.len() != expected) {
        Some(index) => Err(MatrixError::Ragged {
            row: index + 1,
            expected,
            found: rows[index].len(),
        }),
        None => Ok(()),
    }
}

/// Square matrix of costs, `size x size`
///
/// Produced fresh by [`crate::pipeline::normalize`], or decoded from the solver's
/// reply. Never mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SquareMatrix {
    cells: Vec<Vec<f64>>,
}

impl SquareMatrix {
    pub(crate) fn from_cells(cells: Vec<Vec<f64>>) -> Self {
        Self { cells }
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<'de> Deserialize<'de> for SquareMatrix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // `null` for the matrix or a row reads as empty; a `null` or non-numeric
        // cell (how NaN and Infinity arrive in JSON) reads as 0.
        let raw = Option::<Vec<Option<Vec<Value>>>>::deserialize(deserializer)?;
        let cells = raw
            .unwrap_or_default()
            .into_iter()
            .map(|row| {
                row.unwrap_or_default()
                    .iter()
                    .map(|cell| cell.as_f64().map(sanitize).unwrap_or(0.0))
                    .collect()
            })
            .collect();
        Ok(Self { cells })
    }
}

/// A square matrix after one round of row then column minimum subtraction
///
/// Either computed locally as a preview or taken over from the solver's reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReducedMatrix {
    matrix: SquareMatrix,
}

impl ReducedMatrix {
    pub(crate) fn from_cells(cells: Vec<Vec<f64>>) -> Self {
        Self {
            matrix: SquareMatrix::from_cells(cells),
        }
    }

    /// Adopt the reduced matrix computed by the solver.
    pub fn from_solver(matrix: SquareMatrix) -> Self {
        Self { matrix }
    }

    pub fn matrix(&self) -> &SquareMatrix {
        &self.matrix
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        self.matrix.rows()
    }

    pub fn size(&self) -> usize {
        self.matrix.size()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.matrix.get(row, col)
    }

    /// Whether any cell is non-zero; an all-zero reduction is not worth showing.
    pub fn has_nonzero(&self) -> bool {
        self.rows().iter().flatten().any(|&v| v != 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_clamps_negative_and_non_finite() {
        assert_eq!(sanitize(12.5), 12.5);
        assert_eq!(sanitize(-3.0), 0.0);
        assert_eq!(sanitize(f64::NAN), 0.0);
        assert_eq!(sanitize(f64::INFINITY), 0.0);
        assert_eq!(sanitize(f64::NEG_INFINITY), 0.0);
        assert_eq!(sanitize(-0.0).to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn test_coerce_cell_parses_numbers() {
        assert_eq!(coerce_cell("42"), 42.0);
        assert_eq!(coerce_cell("  7.25 "), 7.25);
        assert_eq!(coerce_cell("1."), 1.0);
        assert_eq!(coerce_cell("2e2"), 200.0);
    }

    #[test]
    fn test_coerce_cell_partial_input_is_zero() {
        assert_eq!(coerce_cell(""), 0.0);
        assert_eq!(coerce_cell("-"), 0.0);
        assert_eq!(coerce_cell("1e"), 0.0);
        assert_eq!(coerce_cell("abc"), 0.0);
        assert_eq!(coerce_cell("-15"), 0.0);
        assert_eq!(coerce_cell("inf"), 0.0);
    }

    #[test]
    fn test_validate_rectangular() {
        let empty: Vec<Vec<f64>> = Vec::new();
        assert_eq!(validate_rectangular(&empty), Err(MatrixError::Empty));

        let ok = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        assert!(validate_rectangular(&ok).is_ok());

        let ragged = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0]];
        assert_eq!(
            validate_rectangular(&ragged),
            Err(MatrixError::Ragged {
                row: 3,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_cost_matrix_deserialize_sanitizes() {
        let matrix: CostMatrix = serde_json::from_str("[[1.5, -2], [3, 4]]").unwrap();
        assert_eq!(matrix.rows(), &[vec![1.5, 0.0], vec![3.0, 4.0]]);
        assert_eq!(serde_json::to_string(&matrix).unwrap(), "[[1.5,0.0],[3.0,4.0]]");
    }

    #[test]
    fn test_square_matrix_deserialize_tolerates_nulls() {
        let matrix: SquareMatrix = serde_json::from_str("[[0, null], [1, \"x\"]]").unwrap();
        assert_eq!(matrix.rows(), &[vec![0.0, 0.0], vec![1.0, 0.0]]);

        let matrix: SquareMatrix = serde_json::from_str("null").unwrap();
        assert!(matrix.is_empty());
    }

    #[test]
    fn test_reduced_matrix_has_nonzero() {
        assert!(!ReducedMatrix::from_cells(vec![vec![0.0, 0.0], vec![0.0, 0.0]]).has_nonzero());
        assert!(ReducedMatrix::from_cells(vec![vec![0.0, 1.0], vec![0.0, 0.0]]).has_nonzero());
        assert!(!ReducedMatrix::default().has_nonzero());
    }
}
