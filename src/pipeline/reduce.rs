//! Row and column reduction (the preprocessing step of the Hungarian method)

use super::matrix::{ReducedMatrix, SquareMatrix};

/// Subtract each row's minimum, then each column's minimum.
///
/// After the row pass every value is non-negative and every row holds a zero.
/// A column containing one of those zeros has minimum 0 and is left unchanged,
/// so the row zeros survive the column pass. This is a single round, not a fixed
/// point, and it does not search for an assignment.
pub fn reduce(matrix: &SquareMatrix) -> ReducedMatrix {
    let row_reduced: Vec<Vec<f64>> = matrix
        .rows()
        .iter()
        .map(|row| {
            let row_min = min_of(row.iter().copied());
            row.iter().map(|&v| v - row_min).collect()
        })
        .collect();

    let width = row_reduced.iter().map(|row| row.len()).max().unwrap_or(0);
    let col_mins: Vec<f64> = (0..width)
        .map(|j| min_of(row_reduced.iter().filter_map(|row| row.get(j).copied())))
        .collect();

    let cells = row_reduced
        .into_iter()
        .map(|row| {
            row.into_iter()
                .zip(col_mins.iter())
                .map(|(v, &col_min)| v - col_min)
                .collect()
        })
        .collect();

    ReducedMatrix::from_cells(cells)
}

fn min_of(values: impl Iterator<Item = f64>) -> f64 {
    let min = values.fold(f64::INFINITY, f64::min);
    if min.is_finite() {
        min
    } else {
        0.0
    }
}
