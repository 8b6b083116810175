//! Hungaro: Hungarian Assignment CLI Tool
//!
//! Edit a labelled cost matrix in the terminal, or solve a matrix file in batch,
//! using a remote Hungarian-method solver.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use hungaro::cli::{
    resolve_export_path, run_editor, run_preview, run_solve, Cli, Commands, SolveOptions,
};
use hungaro::pipeline::{load_matrix, HttpSolverGateway, Session};
use hungaro::utils::{print_info, print_success};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.solver.config();

    // Handle subcommands
    if let Some(command) = &cli.command {
        return match command {
            Commands::Solve {
                input,
                mode,
                export,
                no_confirm,
            } => {
                let export_path = resolve_export_path(input, export.as_ref());
                let gateway = HttpSolverGateway::new(config.clone());
                run_solve(
                    &SolveOptions {
                        input,
                        mode: *mode,
                        export: export_path.as_deref(),
                        no_confirm: *no_confirm,
                        solver_url: &config.url,
                    },
                    &gateway,
                )
                .map(|_| ())
            }
            Commands::Preview { input } => run_preview(input),
        };
    }

    // Interactive editor
    let mut session = match &cli.input {
        Some(path) => {
            let loaded = load_matrix(path)?;
            Session::from_matrix(&loaded.matrix, &loaded.row_labels, &loaded.col_labels)?
        }
        None => Session::new(cli.rows, cli.cols)?,
    };
    session.set_mode(cli.mode);

    let gateway = Arc::new(HttpSolverGateway::new(config.clone()));
    let session = run_editor(session, gateway, &config.url)?;

    if session.active_assignment().is_some() {
        let report = session.report();
        print_success(&format!(
            "{}: {}",
            session.mode().total_caption(),
            report.formatted_total()
        ));
        for line in report.lines() {
            println!("      {}", line);
        }
    } else {
        print_info("Editor closed without an assignment.");
    }

    Ok(())
}
