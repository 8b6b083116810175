//! Hungaro: Hungarian Assignment Library
//!
//! A library for editing labelled cost matrices, preparing them for the
//! Hungarian method (square padding and row/column reduction), sending them to
//! a remote assignment solver, and reporting the chosen assignment.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
