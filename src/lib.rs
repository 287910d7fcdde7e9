#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Command-line runner and console report.
pub mod app;
/// Calendar helpers for the generator window and derived date fields.
pub mod calendar;
/// Fixed category, product, and region vocabularies.
pub mod catalog;
/// Cleaning pipeline steps.
pub mod clean;
/// Generator, summary, and run configuration.
pub mod config;
/// Centralized constants used by the generator, cleaning, and summaries.
pub mod constants;
/// Raw and cleaned table types.
pub mod data;
/// Deterministic synthetic sales generator.
pub mod generator;
mod hash;
/// Pre-cleaning inspection.
pub mod inspect;
/// Sales share and concentration helpers.
pub mod metrics;
/// End-to-end analysis runner and JSON export.
pub mod pipeline;
/// Deterministic RNG passed explicitly to the generator.
pub mod rng;
/// Descriptive statistics helpers.
pub mod stats;
/// Grouped summary tables.
pub mod summary;
/// Shared type aliases.
pub mod types;

mod errors;

pub use catalog::{Category, Region};
pub use clean::{CleaningOutcome, CleaningReport, clean};
pub use config::{AnalysisConfig, GeneratorConfig, SummaryConfig};
pub use data::{CleanRecord, CleanTable, SalesRecord, SalesTable};
pub use errors::EdaError;
pub use generator::{generate, generate_seeded};
pub use inspect::{Inspection, inspect};
pub use pipeline::{Analysis, run_analysis};
pub use rng::DeterministicRng;
pub use summary::{
    CorrelationMatrix, GroupStats, MonthlySales, ProductSales, RegionCategoryGrid, Summary,
    summarize,
};
