//! Terminal styling utilities for a modern, visually appealing TUI

use console::{style, Emoji};
use std::path::Path;

use crate::pipeline::AssignType;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static GRID: Emoji<'_, '_> = Emoji("🧮 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
pub static LINK: Emoji<'_, '_> = Emoji("🔗 ", "");

/// Print the application banner with ASCII art
pub fn print_banner(version: &str) {
    let banner = r#"
    ██╗  ██╗██╗   ██╗███╗   ██╗ ██████╗  █████╗ ██████╗  ██████╗
    ██║  ██║██║   ██║████╗  ██║██╔════╝ ██╔══██╗██╔══██╗██╔═══██╗
    ███████║██║   ██║██╔██╗ ██║██║  ███╗███████║██████╔╝██║   ██║
    ██╔══██║██║   ██║██║╚██╗██║██║   ██║██╔══██║██╔══██╗██║   ██║
    ██║  ██║╚██████╔╝██║ ╚████║╚██████╔╝██║  ██║██║  ██║╚██████╔╝
    ╚═╝  ╚═╝ ╚═════╝ ╚═╝  ╚═══╝ ╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═╝ ╚═════╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {} {}",
        style("∑").magenta().bold(),
        style("Assignment problems, one reduction at a time").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(
    input: Option<&Path>,
    rows: usize,
    cols: usize,
    mode: AssignType,
    solver_url: &str,
) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);
    let source = input
        .map(|p| truncate_path(p, 38))
        .unwrap_or_else(|| "(editor)".to_string());

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!("    │  {} Input:  {:<39}│", FOLDER, source);
    println!(
        "    │  {} Matrix: {:<39}│",
        GRID,
        format!("{} employee(s) x {} job(s)", rows, cols)
    );
    println!("    │  {} Mode:   {:<39}│", TARGET, mode.label());
    println!("    ├{}┤", line);
    println!(
        "    │  {} Solver: {:<39}│",
        LINK,
        style(truncate_string(solver_url, 38)).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("    {} {}", style("⚠").yellow().bold(), style(message).yellow());
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Hungaro calculation complete!").green().bold()
    );
    println!();
}

/// Print how long a step took
pub fn print_step_time(elapsed: std::time::Duration) {
    println!(
        "    {}",
        style(format!("⏱  {:.2}s", elapsed.as_secs_f64())).dim()
    );
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len <= max_len {
        s.to_string()
    } else {
        let tail: String = s.chars().skip(len - max_len + 3).collect();
        format!("...{}", tail)
    }
}
