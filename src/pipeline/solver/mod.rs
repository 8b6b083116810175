//! Solver gateway: the boundary with the remote assignment solver
//!
//! The crate never solves the assignment problem itself. It sends the cost matrix
//! and an optimization direction to a [`SolverGateway`] and interprets what comes
//! back. The wire format is JSON with camelCase keys:
//!
//! - request: `{ "costMatrix": [[..]], "assignType": "min" | "max" }`
//! - response: `{ "reducedMatrix": [[..]], "minResult": { "assignments": [..] }, "maxResult": { .. } }`
//!
//! Either result may be absent and assignment entries may be `null`; none of that
//! is an error here.

mod http;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::matrix::{CostMatrix, SquareMatrix};

pub use http::{HttpSolverGateway, SolverConfig, DEFAULT_SOLVER_URL, DEFAULT_TIMEOUT_SECS};

/// Message shown when the solver fails without saying why
pub const FALLBACK_ERROR_MESSAGE: &str = "Error calculating the assignment";

/// Optimization direction passed opaquely to the solver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AssignType {
    #[default]
    Min,
    Max,
}

impl AssignType {
    /// Human-readable name of the mode
    pub fn label(&self) -> &'static str {
        match self {
            AssignType::Min => "Minimum assignment",
            AssignType::Max => "Maximum assignment",
        }
    }

    /// Caption for the total of this mode
    pub fn total_caption(&self) -> &'static str {
        match self {
            AssignType::Min => "Minimum cost",
            AssignType::Max => "Maximum sum",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            AssignType::Min => AssignType::Max,
            AssignType::Max => AssignType::Min,
        }
    }
}

impl fmt::Display for AssignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignType::Min => write!(f, "min"),
            AssignType::Max => write!(f, "max"),
        }
    }
}

/// Row -> column mapping chosen by the solver; `None` means the row is unassigned
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Assignment(Vec<Option<usize>>);

impl Assignment {
    pub fn new(columns: Vec<Option<usize>>) -> Self {
        Self(columns)
    }

    /// Assignment where every row has a column
    pub fn from_columns(columns: &[usize]) -> Self {
        Self(columns.iter().map(|&c| Some(c)).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Column assigned to `row`, if any
    pub fn column_for(&self, row: usize) -> Option<usize> {
        self.0.get(row).copied().flatten()
    }

    /// `(row, column)` pairs for every assigned row, in row order
    pub fn assigned(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(row, col)| col.map(|c| (row, c)))
    }
}

impl FromIterator<Option<usize>> for Assignment {
    fn from_iter<I: IntoIterator<Item = Option<usize>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for Assignment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A `null` list is empty; anything that is not a non-negative integer
        // index reads as unassigned.
        let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?;
        Ok(raw
            .unwrap_or_default()
            .iter()
            .map(|v| v.as_f64().and_then(to_index))
            .collect())
    }
}

fn to_index(value: f64) -> Option<usize> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
        Some(value as usize)
    } else {
        None
    }
}

/// Body sent to the solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverRequest {
    pub cost_matrix: CostMatrix,
    pub assign_type: AssignType,
}

/// One optimization outcome
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    #[serde(default)]
    pub assignments: Assignment,
}

/// Reply from the solver
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverResponse {
    #[serde(default)]
    pub reduced_matrix: SquareMatrix,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_result: Option<SolverResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_result: Option<SolverResult>,
}

impl SolverResponse {
    /// The assignment matching `mode`, when the solver returned one
    pub fn assignment_for(&self, mode: AssignType) -> Option<&Assignment> {
        let result = match mode {
            AssignType::Min => self.min_result.as_ref(),
            AssignType::Max => self.max_result.as_ref(),
        };
        result.map(|r| &r.assignments)
    }
}

/// Failures reported by a solver gateway
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// The solver answered with an error status
    #[error("{message}")]
    Solver { status: u16, message: String },

    /// The request never got an answer
    #[error("{fallback}: {0}", fallback = FALLBACK_ERROR_MESSAGE)]
    Transport(String),

    /// The solver answered with something that is not a valid reply
    #[error("{fallback}: invalid solver response ({0})", fallback = FALLBACK_ERROR_MESSAGE)]
    Decode(String),
}

/// Anything that can compute assignments for a cost matrix
pub trait SolverGateway {
    fn solve(&self, request: &SolverRequest) -> Result<SolverResponse, GatewayError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "message")]
    error: Option<String>,
}

/// Extract the server-provided message from an error body like `{"error": "..."}`.
pub fn solver_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .map(|msg| msg.trim().to_string())
        .filter(|msg| !msg.is_empty())
}
