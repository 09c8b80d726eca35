//! Batch generation and duplicate statistics

pub mod driver;
pub mod report;

// Re-export main functionality
pub use driver::{generate_batch, BatchConfig, BatchGenerator};
pub use report::{duplicate_proportion, duplicate_stats, BatchOutput, BatchReport, DuplicateStats};
