//! Configured simulation runs and their summaries

pub mod runner;
pub mod summary;

pub use runner::Simulation;
pub use summary::{GridStatistics, RunSummary};
