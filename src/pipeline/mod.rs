//! Pipeline module - cost matrix preparation and solver plumbing

pub mod loader;
pub mod matrix;
pub mod normalize;
pub mod reduce;
pub mod session;
pub mod solver;

pub use loader::*;
pub use matrix::*;
pub use normalize::*;
pub use reduce::*;
pub use session::*;
pub use solver::{
    AssignType, Assignment, GatewayError, HttpSolverGateway, SolverConfig, SolverGateway,
    SolverRequest, SolverResponse, SolverResult, FALLBACK_ERROR_MESSAGE,
};
