//! Report module - interpreting and presenting solver results

pub mod assignment;
pub mod chart;
pub mod export;
pub mod summary;

pub use assignment::*;
pub use chart::*;
pub use export::*;
pub use summary::*;
