//! End-to-end run: generate, inspect, clean, summarize.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::clean::{CleaningReport, clean};
use crate::config::AnalysisConfig;
use crate::data::{CleanTable, SalesTable};
use crate::errors::EdaError;
use crate::generator::generate;
use crate::inspect::{Inspection, inspect};
use crate::metrics::{SalesConcentration, sales_concentration};
use crate::rng::DeterministicRng;
use crate::summary::{Summary, summarize};

/// Results of one analysis run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Analysis {
    pub config: AnalysisConfig,
    /// Fingerprint of the generated (raw) table.
    pub fingerprint: u64,
    pub inspection: Inspection,
    pub cleaning: CleaningReport,
    pub summary: Summary,
    pub category_concentration: Option<SalesConcentration>,
    pub region_concentration: Option<SalesConcentration>,
    /// First rows of the raw table, for previews.
    #[serde(skip)]
    pub raw_preview: SalesTable,
    #[serde(skip)]
    pub cleaned: CleanTable,
}

/// Run every stage once with a fresh RNG seeded from the config.
pub fn run_analysis(config: &AnalysisConfig, preview_rows: usize) -> Result<Analysis, EdaError> {
    let mut rng = DeterministicRng::new(config.generator.seed);
    let raw = generate(&config.generator, &mut rng)?;
    let fingerprint = raw.fingerprint();
    let inspection = inspect(&raw);
    let raw_preview = SalesTable::new(raw.records().iter().take(preview_rows).cloned().collect());

    let outcome = clean(raw)?;
    let summary = summarize(&outcome.table, &config.summary)?;
    let category_concentration = sales_concentration(&summary.category);
    let region_concentration = sales_concentration(&summary.region);
    info!(
        "[sales_eda:pipeline] analysis complete (fingerprint={:016x})",
        fingerprint
    );

    Ok(Analysis {
        config: *config,
        fingerprint,
        inspection,
        cleaning: outcome.report,
        summary,
        category_concentration,
        region_concentration,
        raw_preview,
        cleaned: outcome.table,
    })
}

/// Write `analysis` as pretty-printed JSON, creating parent directories.
pub fn write_json(analysis: &Analysis, path: &Path) -> Result<(), EdaError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let payload = serde_json::to_string_pretty(analysis)?;
    fs::write(path, payload)?;
    info!("[sales_eda:pipeline] wrote {}", path.display());
    Ok(())
}
