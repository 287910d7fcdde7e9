use std::io;

use thiserror::Error;

use crate::types::{CategoryLabel, ColumnName, ProductName};

/// Error type for generation, cleaning, aggregation, and export failures.
#[derive(Debug, Error)]
pub enum EdaError {
    #[error("generation error: {0}")]
    Generation(String),
    #[error("cannot compute {operation} over an empty dataset")]
    EmptyDataset { operation: &'static str },
    #[error("row {row}: product '{product}' does not belong to category '{category}'")]
    Integrity {
        row: usize,
        category: CategoryLabel,
        product: ProductName,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("row {row}: {column} is still missing; impute it before normalizing dates")]
    Unimputed { row: usize, column: ColumnName },
}
