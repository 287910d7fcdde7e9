use std::error::Error;
use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Parser, error::ErrorKind};

use crate::config::{AnalysisConfig, GeneratorConfig, SummaryConfig};
use crate::constants::generator::{DEFAULT_ROW_COUNT, DEFAULT_SEED};
use crate::constants::report::PREVIEW_ROWS;
use crate::constants::summary::DEFAULT_TOP_PRODUCTS;
use crate::data::{CleanRecord, SalesRecord};
use crate::inspect::{ColumnStats, Inspection};
use crate::metrics::SalesConcentration;
use crate::pipeline::{Analysis, run_analysis, write_json};
use crate::summary::{CorrelationMatrix, GroupStats, RegionCategoryGrid, Summary};

#[derive(Debug, Parser)]
#[command(
    name = "sales_eda",
    disable_help_subcommand = true,
    about = "Synthetic sales exploratory analysis",
    long_about = "Generate a deterministic synthetic sales table, inspect it, clean it, and print grouped summary statistics.",
    after_help = "Set RUST_LOG=info (or debug) to see pipeline stage logs."
)]
struct SalesAnalysisCli {
    #[arg(
        long = "rows",
        default_value_t = DEFAULT_ROW_COUNT as i64,
        allow_negative_numbers = true,
        help = "Number of base rows generated before duplicate injection"
    )]
    rows: i64,
    #[arg(long, default_value_t = DEFAULT_SEED, help = "Deterministic generator seed")]
    seed: u64,
    #[arg(
        long = "top-products",
        default_value_t = DEFAULT_TOP_PRODUCTS,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..),
        help = "Number of products kept in the top-products ranking"
    )]
    top_products: usize,
    #[arg(
        long = "json",
        value_name = "PATH",
        help = "Optional path for a JSON export of the inspection, cleaning report, and summaries"
    )]
    json: Option<PathBuf>,
}

/// Parse arguments, run the analysis once, and print the report.
pub fn run_sales_analysis<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let Some(cli) =
        parse_cli::<SalesAnalysisCli>(std::iter::once("sales_eda".to_string()).chain(args_iter))?
    else {
        return Ok(());
    };

    let config = AnalysisConfig {
        generator: GeneratorConfig::new(cli.rows, cli.seed)?,
        summary: SummaryConfig {
            top_products: cli.top_products,
        },
    };

    println!(
        "Generating synthetic sales data (rows={}, seed={})...",
        config.generator.row_count, config.generator.seed
    );
    let analysis = run_analysis(&config, PREVIEW_ROWS)?;

    print_inspection(&analysis);
    print_cleaning(&analysis);
    print_summary(&analysis.summary);
    print_concentration("category", analysis.category_concentration.as_ref());
    print_concentration("region", analysis.region_concentration.as_ref());

    if let Some(path) = cli.json {
        write_json(&analysis, &path)?;
        println!();
        println!("Analysis exported to {}", path.display());
    }

    println!();
    println!("=== ANALYSIS COMPLETE ===");
    Ok(())
}

/// Parse CLI arguments; `Ok(None)` means help or version was already printed.
fn parse_cli<T: Parser>(
    args: impl IntoIterator<Item = impl Into<std::ffi::OsString> + Clone>,
) -> Result<Option<T>, Box<dyn Error>> {
    T::try_parse_from(args).map(Some).or_else(|err| match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            err.print()?;
            Ok(None)
        }
        _ => Err(err.into()),
    })
}

fn print_inspection(analysis: &Analysis) {
    let inspection: &Inspection = &analysis.inspection;
    println!();
    println!("=== DATA INSPECTION ===");
    println!(
        "shape        : {} rows x {} columns",
        inspection.rows, inspection.columns
    );
    println!("fingerprint  : {:016x}", analysis.fingerprint);
    println!();
    println!("[FIRST {} ROWS]", analysis.raw_preview.len());
    for record in analysis.raw_preview.records() {
        println!("  {}", raw_row(record));
    }
    println!();
    println!("[MISSING VALUES]");
    for entry in &inspection.missing {
        println!("  {:<12} {}", entry.column, entry.missing);
    }
    println!();
    println!("duplicate rows: {}", inspection.duplicate_rows);
    println!();
    println!("[SUMMARY STATISTICS]");
    println!(
        "  {:<12} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    );
    for stats in &inspection.describe {
        println!("  {}", describe_row(stats));
    }
}

fn print_cleaning(analysis: &Analysis) {
    let report = &analysis.cleaning;
    println!();
    println!("=== DATA CLEANING ===");
    println!("regions imputed as Unknown : {}", report.regions_imputed);
    println!(
        "unit prices imputed        : {} (median {:.2})",
        report.prices_imputed, report.median_unit_price
    );
    println!("duplicate rows removed     : {}", report.duplicates_removed);
    println!(
        "rows                       : {} -> {}",
        report.rows_before, report.rows_after
    );
    if let Some(first) = analysis.cleaned.records().first() {
        println!("first cleaned row          : {}", clean_row(first));
    }
    println!(
        "total sales                : {}",
        format_amount(analysis.cleaned.total_sales())
    );
}

fn print_summary(summary: &Summary) {
    println!();
    println!("=== EXPLORATORY DATA ANALYSIS ===");
    print_groups("Sales by Category", &summary.category);
    print_groups("Sales by Region", &summary.region);

    println!();
    println!("[Monthly Sales Trend]");
    for entry in &summary.monthly {
        let sales = entry
            .sales
            .map(format_amount)
            .unwrap_or_else(|| "n/a".to_string());
        println!("  {:<10} {:>16}", entry.month.name(), sales);
    }

    print_correlation(&summary.correlation);
    print_grid(&summary.region_category);

    println!();
    println!("[Top {} Products by Sales]", summary.top_products.len());
    for (rank, entry) in summary.top_products.iter().enumerate() {
        println!(
            "  {:>2}. {:<16} {:>16}",
            rank + 1,
            entry.product,
            format_amount(entry.sales)
        );
    }
}

fn print_groups(title: &str, groups: &[GroupStats]) {
    println!();
    println!("[{}]", title);
    println!("  {:<16} {:>16} {:>12} {:>6}", "group", "sum", "mean", "count");
    for group in groups {
        println!(
            "  {:<16} {:>16} {:>12} {:>6}",
            group.key,
            format_amount(group.sum),
            format_amount(group.mean),
            group.count
        );
    }
}

fn print_correlation(matrix: &CorrelationMatrix) {
    println!();
    println!("[Correlation Matrix]");
    print!("  {:<12}", "");
    for column in &matrix.columns {
        print!(" {:>11}", column);
    }
    println!();
    for (name, row) in matrix.columns.iter().zip(&matrix.values) {
        print!("  {:<12}", name);
        for value in row {
            print!(" {:>11}", format_optional(*value, 4));
        }
        println!();
    }
}

fn print_grid(grid: &RegionCategoryGrid) {
    println!();
    println!("[Average Sales by Region and Category]");
    print!("  {:<10}", "region");
    for category in &grid.categories {
        print!(" {:>15}", category);
    }
    println!();
    for (region, row) in grid.regions.iter().zip(&grid.mean_sales) {
        print!("  {:<10}", region);
        for value in row {
            print!(" {:>15}", format_optional(*value, 2));
        }
        println!();
    }
}

fn print_concentration(label: &str, metrics: Option<&SalesConcentration>) {
    let Some(metrics) = metrics else {
        return;
    };
    println!();
    println!("--- sales share by {} ---", label);
    for entry in &metrics.per_group {
        println!("{}: sales={} share={:.3}", entry.key, format_amount(entry.sales), entry.share);
    }
    println!(
        "spread: groups={} min={} max={} mean={} ratio={:.2}",
        metrics.groups,
        format_amount(metrics.min),
        format_amount(metrics.max),
        format_amount(metrics.mean),
        metrics.ratio
    );
}

fn raw_row(record: &SalesRecord) -> String {
    format!(
        "{} | {} | {} | {} | qty={} | price={} | sales={:.2}",
        record.date.date(),
        record.category,
        record.product,
        record
            .region
            .map(|region| region.to_string())
            .unwrap_or_else(|| "<missing>".to_string()),
        record.quantity,
        record
            .unit_price
            .map(|price| format!("{price:.2}"))
            .unwrap_or_else(|| "<missing>".to_string()),
        record.sales
    )
}

fn clean_row(record: &CleanRecord) -> String {
    format!(
        "{} ({} Q{}) | {} | {} | {} | qty={} | price={:.2} | sales={:.2}",
        record.date,
        record.month.name(),
        record.quarter,
        record.category,
        record.product,
        record.region,
        record.quantity,
        record.unit_price,
        record.sales
    )
}

fn describe_row(stats: &ColumnStats) -> String {
    format!(
        "{:<12} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        stats.column,
        stats.count,
        format_optional(stats.mean, 2),
        format_optional(stats.std, 2),
        format_optional(stats.min, 2),
        format_optional(stats.p25, 2),
        format_optional(stats.p50, 2),
        format_optional(stats.p75, 2),
        format_optional(stats.max, 2)
    )
}

fn format_optional(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|value| format!("{value:.decimals$}"))
        .unwrap_or_else(|| "n/a".to_string())
}

/// Render an amount with two decimals and comma-grouped thousands.
pub fn format_amount(value: f64) -> String {
    let rendered = format!("{:.2}", value.abs());
    let (whole, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));
    let mut grouped_reversed = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().rev().enumerate() {
        if idx > 0 && idx % 3 == 0 {
            grouped_reversed.push(',');
        }
        grouped_reversed.push(ch);
    }
    let grouped: String = grouped_reversed.chars().rev().collect();
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}
