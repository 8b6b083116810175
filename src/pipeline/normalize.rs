//! Square-matrix normalization

use super::matrix::{sanitize, CostMatrix, SquareMatrix};

/// Pad a cost matrix to `size x size`, `size = max(rows, cols)`, filling with 0.
///
/// The column count comes from the first row; a missing cell in a shorter row is
/// treated like padding. An empty matrix normalizes to `[[0]]` so downstream
/// consumers always receive a non-empty square matrix.
pub fn normalize(matrix: &CostMatrix) -> SquareMatrix {
    let row_count = matrix.row_count();
    if row_count == 0 {
        return SquareMatrix::from_cells(vec![vec![0.0]]);
    }

    let col_count = matrix.col_count();
    let size = row_count.max(col_count);

    let cells = (0..size)
        .map(|i| {
            (0..size)
                .map(|j| {
                    if i < row_count && j < col_count {
                        matrix.get(i, j).map(sanitize).unwrap_or(0.0)
                    } else {
                        0.0
                    }
                })
                .collect()
        })
        .collect();

    SquareMatrix::from_cells(cells)
}
