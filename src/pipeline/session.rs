//! Editing session state
//!
//! Holds the cells and labels the user is editing, the selected mode and the last
//! applied solver reply. Everything shown from a calculation (reduced matrix,
//! report, chart) is derived from here on demand.
//!
//! Calculations are identified by a monotonically increasing id. A reply is only
//! applied when it is newer than the last one applied, so a slow reply that lands
//! after a fresher one is dropped instead of overwriting it.

use thiserror::Error;

use super::matrix::{CostMatrix, MatrixError, ReducedMatrix};
use super::normalize::normalize;
use super::reduce::reduce;
use super::solver::{AssignType, Assignment, SolverRequest, SolverResponse};
use crate::report::{chart_series, describe, total_cost, AssignmentReport, ChartBar};

/// Errors from session operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("Please enter valid values for rows and columns (got {rows} x {cols}).")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error(transparent)]
    InvalidMatrix(#[from] MatrixError),
}

/// A submitted calculation waiting for the solver's reply
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub id: u64,
    pub request: SolverRequest,
}

/// Solver reply together with the matrix it was computed for
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedResult {
    pub id: u64,
    pub matrix: CostMatrix,
    pub response: SolverResponse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    cells: Vec<Vec<String>>,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    mode: AssignType,
    reduced: Option<ReducedMatrix>,
    result: Option<AppliedResult>,
    last_issued: u64,
    last_applied: u64,
}

impl Session {
    /// Blank `rows x cols` session. Both dimensions must be positive.
    pub fn new(rows: usize, cols: usize) -> Result<Self, SessionError> {
        if rows == 0 || cols == 0 {
            return Err(SessionError::InvalidDimensions { rows, cols });
        }

        Ok(Self {
            cells: vec![vec![String::new(); cols]; rows],
            row_labels: vec![String::new(); rows],
            col_labels: vec![String::new(); cols],
            mode: AssignType::Min,
            reduced: None,
            result: None,
            last_issued: 0,
            last_applied: 0,
        })
    }

    /// Session seeded from an existing matrix; labels are padded or cut to fit.
    pub fn from_matrix(
        matrix: &CostMatrix,
        row_labels: &[String],
        col_labels: &[String],
    ) -> Result<Self, SessionError> {
        matrix.validate()?;
        let mut session = Self::new(matrix.row_count(), matrix.col_count())?;

        for (i, row) in matrix.rows().iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                session.cells[i][j] = value.to_string();
            }
        }
        for (slot, label) in session.row_labels.iter_mut().zip(row_labels) {
            *slot = label.clone();
        }
        for (slot, label) in session.col_labels.iter_mut().zip(col_labels) {
            *slot = label.clone();
        }

        Ok(session)
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.col_labels.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.cells.get(row).and_then(|r| r.get(col)).map(|s| s.as_str())
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    pub fn mode(&self) -> AssignType {
        self.mode
    }

    /// Replace the text of a cell. Returns false when out of range.
    pub fn set_cell(&mut self, row: usize, col: usize, text: &str) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = text.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_row_label(&mut self, row: usize, label: &str) -> bool {
        set_label(&mut self.row_labels, row, label)
    }

    pub fn set_col_label(&mut self, col: usize, label: &str) -> bool {
        set_label(&mut self.col_labels, col, label)
    }

    pub fn set_mode(&mut self, mode: AssignType) {
        self.mode = mode;
    }

    /// Blank every cell and label, go back to `min` and forget any result.
    ///
    /// The request counters are kept so replies to earlier requests still read as stale.
    pub fn reset(&mut self) {
        for row in &mut self.cells {
            row.iter_mut().for_each(String::clear);
        }
        self.row_labels.iter_mut().for_each(String::clear);
        self.col_labels.iter_mut().for_each(String::clear);
        self.mode = AssignType::Min;
        self.reduced = None;
        self.result = None;
        self.last_applied = self.last_issued;
    }

    /// The current cells coerced to costs
    pub fn cost_matrix(&self) -> CostMatrix {
        CostMatrix::from_text(&self.cells)
    }

    /// Validate the matrix, compute the local reduction preview and issue a request.
    ///
    /// A ragged or empty matrix blocks submission and leaves the session untouched.
    pub fn begin_calculation(&mut self) -> Result<Calculation, SessionError> {
        let matrix = self.cost_matrix();
        matrix.validate()?;

        self.reduced = Some(reduce(&normalize(&matrix)));
        self.last_issued += 1;

        Ok(Calculation {
            id: self.last_issued,
            request: SolverRequest {
                cost_matrix: matrix,
                assign_type: self.mode,
            },
        })
    }

    /// Apply a solver reply. Returns false, leaving the session as it was, when a
    /// newer reply has already been applied.
    pub fn apply_response(&mut self, calculation: Calculation, response: SolverResponse) -> bool {
        if calculation.id <= self.last_applied {
            return false;
        }

        self.last_applied = calculation.id;
        self.reduced = Some(ReducedMatrix::from_solver(response.reduced_matrix.clone()));
        self.result = Some(AppliedResult {
            id: calculation.id,
            matrix: calculation.request.cost_matrix,
            response,
        });
        true
    }

    /// Record that a calculation failed. Cells, labels and any earlier result stay as
    /// they were. Returns false when the failure belongs to a superseded request.
    pub fn fail_calculation(&mut self, calculation: &Calculation) -> bool {
        if calculation.id <= self.last_applied || calculation.id != self.last_issued {
            return false;
        }
        self.last_applied = calculation.id;
        true
    }

    /// Whether a request has been issued that no reply has superseded yet
    pub fn is_pending(&self) -> bool {
        self.last_issued > self.last_applied
    }

    pub fn result(&self) -> Option<&AppliedResult> {
        self.result.as_ref()
    }

    /// Reduced matrix to display: the solver's once a reply arrived, else the local preview
    pub fn displayed_reduced(&self) -> Option<&ReducedMatrix> {
        self.reduced.as_ref()
    }

    /// Assignment for the selected mode from the last applied reply
    pub fn active_assignment(&self) -> Option<&Assignment> {
        self.result
            .as_ref()
            .and_then(|r| r.response.assignment_for(self.mode))
    }

    /// Report of the active assignment against the matrix it was solved for
    pub fn report(&self) -> AssignmentReport {
        match (&self.result, self.active_assignment()) {
            (Some(result), Some(assignment)) => describe(
                assignment,
                &result.matrix,
                &self.row_labels,
                &self.col_labels,
            ),
            _ => AssignmentReport::default(),
        }
    }

    pub fn chart(&self) -> Vec<ChartBar> {
        match (&self.result, self.active_assignment()) {
            (Some(result), Some(assignment)) => {
                chart_series(assignment, &result.matrix, &self.row_labels)
            }
            _ => Vec::new(),
        }
    }

    pub fn total_cost(&self) -> f64 {
        match (&self.result, self.active_assignment()) {
            (Some(result), Some(assignment)) => total_cost(assignment, &result.matrix),
            _ => 0.0,
        }
    }
}

fn set_label(labels: &mut [String], index: usize, label: &str) -> bool {
    match labels.get_mut(index) {
        Some(slot) => {
            *slot = label.to_string();
            true
        }
        None => false,
    }
}
