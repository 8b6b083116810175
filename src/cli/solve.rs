//! Batch commands: solve a matrix file, or preview its reduction offline

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use super::prompts::{confirm_retry, confirm_submission};
use crate::pipeline::{
    load_matrix, normalize, reduce, AssignType, LoadedMatrix, Session, SolverGateway,
};
use crate::report::{export_calculation, print_matrix, AssignmentSummary, ExportData, ExportParams};
use crate::utils::{
    create_spinner, finish_with_failure, finish_with_success, print_banner, print_completion,
    print_config, print_info, print_step_header, print_step_time, print_success,
    print_warning,
};

/// Options for a batch solve
pub struct SolveOptions<'a> {
    pub input: &'a Path,
    pub mode: AssignType,
    pub export: Option<&'a Path>,
    pub no_confirm: bool,
    pub solver_url: &'a str,
}

/// Load a matrix file, send it to the solver and print the assignment report.
///
/// Returns the session holding the applied result.
pub fn run_solve(options: &SolveOptions, gateway: &dyn SolverGateway) -> Result<Session> {
    print_banner(env!("CARGO_PKG_VERSION"));

    let loaded = load_with_spinner(options.input)?;
    let rows = loaded.matrix.row_count();
    let cols = loaded.matrix.col_count();
    print_config(Some(options.input), rows, cols, options.mode, options.solver_url);

    // Step 1 + 2: local preparation
    print_preparation(&loaded);

    // Step 3: solver round-trip
    print_step_header(3, "Solve");
    let step_start = Instant::now();

    let mut session = Session::from_matrix(&loaded.matrix, &loaded.row_labels, &loaded.col_labels)?;
    session.set_mode(options.mode);

    if !options.no_confirm && !confirm_submission(rows, cols, options.solver_url)? {
        print_info("Cancelled by user.");
        return Ok(session);
    }

    loop {
        let calculation = session.begin_calculation()?;
        let spinner = create_spinner("Waiting for the solver...");

        match gateway.solve(&calculation.request) {
            Ok(response) => {
                finish_with_success(&spinner, "Solver replied");
                session.apply_response(calculation, response);
                break;
            }
            Err(err) => {
                finish_with_failure(&spinner, &err.to_string());
                session.fail_calculation(&calculation);
                if options.no_confirm || !confirm_retry()? {
                    return Err(err).context("The solver could not compute the assignment");
                }
            }
        }
    }
    let solve_time = step_start.elapsed();
    print_step_time(solve_time);

    // Step 4: report
    print_step_header(4, "Assignment Report");
    let report = session.report();
    let chart = session.chart();
    let assignment = session.active_assignment();

    if let Some(reduced) = session.displayed_reduced().filter(|r| r.has_nonzero()) {
        print_matrix(
            "SOLVER REDUCED MATRIX",
            reduced.rows(),
            session.row_labels(),
            session.col_labels(),
            assignment,
        );
    }

    AssignmentSummary {
        mode: session.mode(),
        rows: loaded.matrix.rows(),
        row_labels: session.row_labels(),
        col_labels: session.col_labels(),
        assignment,
        report: &report,
        chart: &chart,
        solve_time: Some(solve_time),
    }
    .display();

    if let Some(export_path) = options.export {
        let square = normalize(&loaded.matrix);
        export_calculation(
            &ExportData {
                matrix: &loaded.matrix,
                row_labels: session.row_labels(),
                col_labels: session.col_labels(),
                square: &square,
                reduced: session.displayed_reduced(),
                assignment,
                report: &report,
                chart: &chart,
            },
            &ExportParams {
                solver_url: options.solver_url,
                assign_type: session.mode(),
                input_file: Some(options.input),
            },
            export_path,
        )?;
        println!();
        print_success(&format!("Result exported to {}", export_path.display()));
    }

    print_completion();
    Ok(session)
}

/// Show the square and reduced matrices of a file without contacting the solver
pub fn run_preview(input: &Path) -> Result<()> {
    let loaded = load_with_spinner(input)?;
    print_preparation(&loaded);
    println!();
    Ok(())
}

fn load_with_spinner(input: &Path) -> Result<LoadedMatrix> {
    let spinner = create_spinner("Loading cost matrix...");
    match load_matrix(input) {
        Ok(loaded) => {
            finish_with_success(
                &spinner,
                &format!(
                    "Loaded {} x {} matrix from {}",
                    loaded.matrix.row_count(),
                    loaded.matrix.col_count(),
                    input.display()
                ),
            );
            Ok(loaded)
        }
        Err(err) => {
            finish_with_failure(&spinner, "Could not load the cost matrix");
            Err(err)
        }
    }
}

fn print_preparation(loaded: &LoadedMatrix) {
    let rows = loaded.matrix.row_count();
    let cols = loaded.matrix.col_count();

    print_step_header(1, "Normalize");
    let square = normalize(&loaded.matrix);
    if rows == cols {
        print_info("Matrix is already square");
    } else if rows < cols {
        print_info(&format!("Added {} padding row(s) with zero cost", cols - rows));
    } else {
        print_info(&format!("Added {} padding column(s) with zero cost", rows - cols));
    }
    print_matrix(
        "SQUARE MATRIX",
        square.rows(),
        &loaded.row_labels,
        &loaded.col_labels,
        None,
    );

    print_step_header(2, "Reduce (local preview)");
    let reduced = reduce(&square);
    if reduced.has_nonzero() {
        print_matrix(
            "REDUCED MATRIX",
            reduced.rows(),
            &loaded.row_labels,
            &loaded.col_labels,
            None,
        );
    } else {
        print_warning("Every reduced cost is zero; any assignment is optimal");
    }
}
