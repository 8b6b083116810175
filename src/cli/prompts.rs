//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::Confirm;

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str, default: bool) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}

/// Prompt user to confirm sending the matrix to the solver
pub fn confirm_submission(rows: usize, cols: usize, solver_url: &str) -> Result<bool> {
    let message = format!(
        "Send the {} x {} cost matrix to {}?",
        rows, cols, solver_url
    );
    confirm_step(&message, true)
}

/// Ask whether to try the calculation again after a failure
pub fn confirm_retry() -> Result<bool> {
    confirm_step("Calculation failed. Try again?", false)
}
