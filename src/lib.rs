// Labzen - rubric tallies and mechanics checks for course labs
// Reads Jupyter and R Markdown labs, sums their rubric points and checks the lab repository

pub mod cli;
pub mod loader;
pub mod mechanics;
pub mod models;
pub mod parser;
pub mod tally;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use loader::{load_blocks, LoadError};
pub use models::{Category, DetailTable, RubricEntry, SummaryTable};
pub use tally::{tally, TallyError};
