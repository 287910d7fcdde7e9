use serde::{Deserialize, Serialize};

use crate::constants::generator::{DEFAULT_ROW_COUNT, DEFAULT_SEED};
use crate::constants::summary::DEFAULT_TOP_PRODUCTS;
use crate::errors::EdaError;

/// Parameters of the synthetic sales generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of base rows drawn before duplicates are appended.
    pub row_count: usize,
    /// Seed for the generator's RNG stream.
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            row_count: DEFAULT_ROW_COUNT,
            seed: DEFAULT_SEED,
        }
    }
}

impl GeneratorConfig {
    /// Validate a signed row count (as read from user input) and build a config.
    pub fn new(row_count: i64, seed: u64) -> Result<Self, EdaError> {
        if row_count <= 0 {
            return Err(EdaError::Generation(format!(
                "row_count must be greater than zero, got {row_count}"
            )));
        }
        let row_count = usize::try_from(row_count).map_err(|_| {
            EdaError::Generation(format!("row_count {row_count} does not fit in memory"))
        })?;
        Ok(Self { row_count, seed })
    }
}

/// Parameters of the summary stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Number of products kept in the top-products ranking.
    pub top_products: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            top_products: DEFAULT_TOP_PRODUCTS,
        }
    }
}

/// Top-level configuration for one end-to-end analysis run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub generator: GeneratorConfig,
    pub summary: SummaryConfig,
}
