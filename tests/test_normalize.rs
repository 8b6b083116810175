//! Tests for square-matrix normalization

use hungaro::pipeline::{normalize, CostMatrix};

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_empty_matrix_normalizes_to_single_zero() {
    let square = normalize(&CostMatrix::new(Vec::new()));
    assert_eq!(square.size(), 1);
    assert_eq!(square.rows(), &[vec![0.0]]);
}

#[test]
fn test_square_matrix_is_unchanged() {
    let (matrix, _, _) = common::payroll_fixture();
    let square = normalize(&matrix);
    assert_eq!(square.rows(), matrix.rows());
}

#[test]
fn test_wide_matrix_gets_padding_rows() {
    let matrix = common::matrix(&[&[1.0, 2.0, 3.0]]);
    let square = normalize(&matrix);

    assert_eq!(square.size(), 3);
    assert_eq!(
        square.rows(),
        &[
            vec![1.0, 2.0, 3.0],
            vec![0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0]
        ]
    );
}

#[test]
fn test_tall_matrix_gets_padding_columns() {
    let matrix = common::matrix(&[&[4.0], &[5.0]]);
    let square = normalize(&matrix);
    assert_eq!(square.rows(), &[vec![4.0, 0.0], vec![5.0, 0.0]]);
}

#[test]
fn test_text_cells_are_coerced() {
    let cells = vec![vec!["12", "abc"], vec!["", "-4"], vec![" 3.5 ", "7"]];
    let square = normalize(&CostMatrix::from_text(&cells));

    assert_eq!(
        square.rows(),
        &[
            vec![12.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0],
            vec![3.5, 7.0, 0.0]
        ]
    );
}

#[test]
fn test_normalize_preserves_cells_for_random_shapes() {
    for (rows, cols) in [(1, 1), (1, 5), (5, 1), (3, 7), (8, 4), (6, 6)] {
        let raw = common::random_matrix(rows, cols, 100.0);
        let matrix = CostMatrix::new(raw.clone());
        let square = normalize(&matrix);
        let size = rows.max(cols);

        assert_eq!(square.size(), size, "size for {}x{}", rows, cols);
        assert!(square.rows().iter().all(|row| row.len() == size));

        for i in 0..size {
            for j in 0..size {
                let expected = if i < rows && j < cols { raw[i][j] } else { 0.0 };
                assert_eq!(square.get(i, j), Some(expected), "cell ({}, {})", i, j);
            }
        }
    }
}

#[test]
fn test_normalize_does_not_mutate_input() {
    let matrix = common::matrix(&[&[1.0, 2.0, 3.0]]);
    let before = matrix.clone();
    let _ = normalize(&matrix);
    assert_eq!(matrix, before);
}
