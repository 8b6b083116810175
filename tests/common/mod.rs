//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;

use hungaro::pipeline::{
    CostMatrix, GatewayError, SolverGateway, SolverRequest, SolverResponse,
};
use tempfile::TempDir;

/// Build a cost matrix from literal rows
pub fn matrix(rows: &[&[f64]]) -> CostMatrix {
    CostMatrix::new(rows.iter().map(|r| r.to_vec()).collect())
}

/// Owned labels from string literals
pub fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// The 2x2 matrix used throughout the report examples
///
/// - costs `[[10, 20], [30, 5]]`
/// - employees `Ana`, `Luis`
/// - jobs `Cashier`, `Clerk`
pub fn payroll_fixture() -> (CostMatrix, Vec<String>, Vec<String>) {
    (
        matrix(&[&[10.0, 20.0], &[30.0, 5.0]]),
        labels(&["Ana", "Luis"]),
        labels(&["Cashier", "Clerk"]),
    )
}

/// Random rectangular matrix with costs in `0..max`
pub fn random_matrix(rows: usize, cols: usize, max: f64) -> Vec<Vec<f64>> {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    (0..rows)
        .map(|_| (0..cols).map(|_| rng.gen_range(0.0..max)).collect())
        .collect()
}

/// Parse a solver reply from its wire JSON
pub fn response(json: serde_json::Value) -> SolverResponse {
    serde_json::from_value(json).unwrap()
}

/// Reply to the payroll fixture: reduced matrix plus both assignments
pub fn payroll_response() -> SolverResponse {
    response(serde_json::json!({
        "reducedMatrix": [[0, 10], [25, 0]],
        "minResult": { "assignments": [0, 1] },
        "maxResult": { "assignments": [1, 0] }
    }))
}

/// Write a fixture file into a temp directory
pub fn write_fixture(temp_dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = temp_dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Gateway that replays queued outcomes and records every request it receives
pub struct StubGateway {
    outcomes: Mutex<VecDeque<Result<SolverResponse, GatewayError>>>,
    pub requests: Mutex<Vec<SolverRequest>>,
}

impl StubGateway {
    pub fn new(outcomes: Vec<Result<SolverResponse, GatewayError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(response: SolverResponse) -> Self {
        Self::new(vec![Ok(response)])
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl SolverGateway for StubGateway {
    fn solve(&self, request: &SolverRequest) -> Result<SolverResponse, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Transport("no reply queued".to_string())))
    }
}
