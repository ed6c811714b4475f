//! Error types for the spot feed classifier.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("feed line {line}: expected {expected} comma-separated fields, got {found}")]
    ColumnCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("feed has {found} non-blank lines, need at least 2 header lines")]
    MissingHeader { found: usize },

    #[error("failed to read feed text: {0}")]
    Read(#[from] csv::Error),
}
