//! HTTP solver gateway backed by ureq

use std::time::Duration;

use ureq::Agent;

use super::{
    solver_error_message, GatewayError, SolverGateway, SolverRequest, SolverResponse,
    FALLBACK_ERROR_MESSAGE,
};

pub const DEFAULT_SOLVER_URL: &str = "https://hungarobackendr.onrender.com/hungarian";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and how long to wait for the solver
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    pub url: String,
    pub timeout: Duration,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOLVER_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl SolverConfig {
    /// Read `HUNGARO_SOLVER_URL` and `HUNGARO_SOLVER_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> Self {
        let url = std::env::var("HUNGARO_SOLVER_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SOLVER_URL.to_string());
        let timeout = std::env::var("HUNGARO_SOLVER_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        Self { url, timeout }
    }

    /// Apply explicit command-line values on top of this config.
    pub fn with_overrides(mut self, url: Option<&str>, timeout_secs: Option<u64>) -> Self {
        if let Some(url) = url {
            self.url = url.to_string();
        }
        if let Some(secs) = timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        self
    }
}

/// Posts cost matrices to a remote solver as JSON
#[derive(Debug, Clone)]
pub struct HttpSolverGateway {
    config: SolverConfig,
    http: Agent,
}

impl HttpSolverGateway {
    pub fn new(config: SolverConfig) -> Self {
        let http = ureq::AgentBuilder::new()
            .timeout_connect(config.timeout)
            .timeout_read(config.timeout)
            .timeout_write(config.timeout)
            .build();
        Self { config, http }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

impl SolverGateway for HttpSolverGateway {
    fn solve(&self, request: &SolverRequest) -> Result<SolverResponse, GatewayError> {
        let response = self
            .http
            .post(&self.config.url)
            .set("Content-Type", "application/json")
            .send_json(request);

        match response {
            Ok(resp) => resp
                .into_json::<SolverResponse>()
                .map_err(|err| GatewayError::Decode(err.to_string())),
            Err(ureq::Error::Status(status, resp)) => {
                let message = resp
                    .into_string()
                    .ok()
                    .and_then(|body| solver_error_message(&body))
                    .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
                Err(GatewayError::Solver { status, message })
            }
            Err(err) => Err(GatewayError::Transport(err.to_string())),
        }
    }
}
