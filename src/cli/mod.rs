//! CLI module - argument parsing, prompts, the matrix editor and batch commands

mod args;
pub mod editor;
mod prompts;
pub mod solve;

pub use args::{default_export_path, resolve_export_path, Cli, Commands, SolverArgs};
pub use editor::{run_editor, EditorAction, EditorState, Focus, StatusKind, StatusMessage};
pub use prompts::*;
pub use solve::{run_preview, run_solve, SolveOptions};
