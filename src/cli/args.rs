//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::{AssignType, SolverConfig};

/// Hungaro - edit a cost matrix and get its optimal assignment
#[derive(Parser, Debug)]
#[command(name = "hungaro")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Cost matrix to open in the editor (CSV, Parquet or JSON).
    /// Without it, the editor starts with a blank matrix of --rows x --cols.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Number of employees (rows) for a blank matrix
    #[arg(long, default_value = "2", value_parser = validate_dimension)]
    pub rows: usize,

    /// Number of jobs (columns) for a blank matrix
    #[arg(long, default_value = "2", value_parser = validate_dimension)]
    pub cols: usize,

    /// Optimization direction
    #[arg(short, long, value_enum, default_value_t = AssignType::Min)]
    pub mode: AssignType,

    #[command(flatten)]
    pub solver: SolverArgs,
}

/// Solver endpoint options shared by every command that calls the solver
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SolverArgs {
    /// Solver endpoint URL. Overrides HUNGARO_SOLVER_URL.
    #[arg(long, global = true)]
    pub solver_url: Option<String>,

    /// Solver timeout in seconds. Overrides HUNGARO_SOLVER_TIMEOUT_SECS.
    #[arg(long, global = true, value_parser = validate_timeout)]
    pub timeout: Option<u64>,
}

impl SolverArgs {
    /// Environment configuration with these flags applied on top
    pub fn config(&self) -> SolverConfig {
        SolverConfig::from_env().with_overrides(self.solver_url.as_deref(), self.timeout)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a cost matrix file to the solver and print the assignment report
    Solve {
        /// Cost matrix file (CSV, Parquet or JSON)
        input: PathBuf,

        /// Optimization direction
        #[arg(short, long, value_enum, default_value_t = AssignType::Min)]
        mode: AssignType,

        /// Write the full result as JSON to this path.
        /// Given without a value, writes next to the input with an '_assignment.json' suffix.
        #[arg(short, long)]
        export: Option<Option<PathBuf>>,

        /// Skip interactive confirmation prompts
        #[arg(long, default_value = "false")]
        no_confirm: bool,
    },

    /// Show the square and reduced matrices for a file without calling the solver
    Preview {
        /// Cost matrix file (CSV, Parquet or JSON)
        input: PathBuf,
    },
}

/// Derive the default export path for an input file:
/// same directory, '_assignment.json' suffix.
pub fn default_export_path(input: &std::path::Path) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| std::path::Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("matrix");
    parent.join(format!("{}_assignment.json", stem))
}

/// Resolve the `--export` flag: present without a value means "use the default path".
pub fn resolve_export_path(
    input: &std::path::Path,
    export: Option<&Option<PathBuf>>,
) -> Option<PathBuf> {
    export.map(|path| path.clone().unwrap_or_else(|| default_export_path(input)))
}

/// Validator for matrix dimensions
fn validate_dimension(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value == 0 {
        Err("dimensions must be at least 1".to_string())
    } else {
        Ok(value)
    }
}

/// Validator for the solver timeout
fn validate_timeout(s: &str) -> Result<u64, String> {
    let value: u64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number of seconds", s))?;

    if value == 0 {
        Err("timeout must be at least 1 second".to_string())
    } else {
        Ok(value)
    }
}
