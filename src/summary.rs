//! Grouped summary tables over a cleaned sales table.
//!
//! All queries are read-only. Each fails with [`EdaError::EmptyDataset`] on a
//! table with no rows rather than returning undefined means.

use chrono::Month;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::calendar::CALENDAR_MONTHS;
use crate::config::SummaryConfig;
use crate::constants::columns::{QUANTITY, QUARTER, SALES, UNIT_PRICE};
use crate::constants::summary::CORRELATION_COLUMNS;
use crate::data::{CleanRecord, CleanTable};
use crate::errors::EdaError;
use crate::stats;
use crate::types::{ColumnName, GroupKey, ProductName};

/// Sum, mean, and count of `sales` for one group.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupStats {
    pub key: GroupKey,
    pub sum: f64,
    pub mean: f64,
    pub count: usize,
}

/// Total sales for one calendar month. `None` when no row falls in the month.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthlySales {
    pub month: Month,
    pub sales: Option<f64>,
}

/// Pairwise Pearson correlations of the numeric columns.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<ColumnName>,
    /// Row-major; `None` where a column has zero variance.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Coefficient for the named column pair.
    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let row = self.columns.iter().position(|name| *name == row)?;
        let column = self.columns.iter().position(|name| *name == column)?;
        self.values[row][column]
    }
}

/// Mean sales per (region, category) pair, regions as rows.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegionCategoryGrid {
    pub regions: Vec<GroupKey>,
    pub categories: Vec<GroupKey>,
    /// `None` where a pair has no rows.
    pub mean_sales: Vec<Vec<Option<f64>>>,
}

impl RegionCategoryGrid {
    /// Mean sales for one pair.
    pub fn get(&self, region: &str, category: &str) -> Option<f64> {
        let row = self.regions.iter().position(|name| name == region)?;
        let column = self.categories.iter().position(|name| name == category)?;
        self.mean_sales[row][column]
    }
}

/// Total sales of one product.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductSales {
    pub product: ProductName,
    pub sales: f64,
}

/// Every summary table computed for a cleaned table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub category: Vec<GroupStats>,
    pub region: Vec<GroupStats>,
    pub monthly: Vec<MonthlySales>,
    pub correlation: CorrelationMatrix,
    pub region_category: RegionCategoryGrid,
    pub top_products: Vec<ProductSales>,
}

#[derive(Clone, Copy, Debug, Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Compute every summary table.
pub fn summarize(table: &CleanTable, config: &SummaryConfig) -> Result<Summary, EdaError> {
    ensure_rows(table, "summary")?;
    let summary = Summary {
        category: category_summary(table)?,
        region: region_summary(table)?,
        monthly: monthly_summary(table)?,
        correlation: correlation_matrix(table)?,
        region_category: region_category_means(table)?,
        top_products: top_products(table, config.top_products)?,
    };
    debug!(
        "[sales_eda:summary] {} categories, {} regions, {} products ranked",
        summary.category.len(),
        summary.region.len(),
        summary.top_products.len()
    );
    Ok(summary)
}

/// Sales aggregates per category, ordered by category label.
pub fn category_summary(table: &CleanTable) -> Result<Vec<GroupStats>, EdaError> {
    ensure_rows(table, "category summary")?;
    Ok(group_stats(table, |record| record.category.to_string()))
}

/// Sales aggregates per region (including `Unknown`), ordered by region label.
pub fn region_summary(table: &CleanTable) -> Result<Vec<GroupStats>, EdaError> {
    ensure_rows(table, "region summary")?;
    Ok(group_stats(table, |record| record.region.to_string()))
}

/// Total sales per month in January..December order; always 12 entries.
pub fn monthly_summary(table: &CleanTable) -> Result<Vec<MonthlySales>, EdaError> {
    ensure_rows(table, "monthly summary")?;
    let mut totals: [Option<f64>; 12] = [None; 12];
    for record in table.records() {
        let slot = &mut totals[record.month.number_from_month() as usize - 1];
        *slot = Some(slot.unwrap_or(0.0) + record.sales);
    }
    Ok(CALENDAR_MONTHS
        .into_iter()
        .zip(totals)
        .map(|(month, sales)| MonthlySales { month, sales })
        .collect())
}

/// Pearson correlations across Quantity, Unit_Price, Sales, and Quarter.
pub fn correlation_matrix(table: &CleanTable) -> Result<CorrelationMatrix, EdaError> {
    ensure_rows(table, "correlation matrix")?;
    let records = table.records();
    let columns: Vec<Vec<f64>> = CORRELATION_COLUMNS
        .iter()
        .map(|&name| {
            records
                .iter()
                .map(|record| numeric_value(record, name))
                .collect::<Vec<_>>()
        })
        .collect();

    let values: Vec<Vec<Option<f64>>> = columns
        .iter()
        .map(|xs| {
            columns
                .iter()
                .map(|ys| stats::pearson(xs, ys))
                .collect::<Vec<_>>()
        })
        .collect();

    for (idx, name) in CORRELATION_COLUMNS.iter().enumerate() {
        if values[idx][idx].is_none() {
            warn!(
                "[sales_eda:summary] correlation undefined for column {} (fewer than two distinct values)",
                name
            );
        }
    }

    Ok(CorrelationMatrix {
        columns: CORRELATION_COLUMNS.to_vec(),
        values,
    })
}

/// Mean sales per (region, category) pivoted into a grid.
pub fn region_category_means(table: &CleanTable) -> Result<RegionCategoryGrid, EdaError> {
    ensure_rows(table, "region/category means")?;
    let mut cells: IndexMap<(GroupKey, GroupKey), Accumulator> = IndexMap::new();
    for record in table.records() {
        cells
            .entry((record.region.to_string(), record.category.to_string()))
            .or_default()
            .push(record.sales);
    }

    let regions = sorted_unique(cells.keys().map(|(region, _)| region.clone()));
    let categories = sorted_unique(cells.keys().map(|(_, category)| category.clone()));
    let mean_sales = regions
        .iter()
        .map(|region| {
            categories
                .iter()
                .map(|category| {
                    cells
                        .get(&(region.clone(), category.clone()))
                        .map(Accumulator::mean)
                })
                .collect::<Vec<_>>()
        })
        .collect();

    Ok(RegionCategoryGrid {
        regions,
        categories,
        mean_sales,
    })
}

/// Products ranked by total sales, highest first; ties ordered by name.
pub fn top_products(table: &CleanTable, limit: usize) -> Result<Vec<ProductSales>, EdaError> {
    ensure_rows(table, "top products")?;
    let mut totals: IndexMap<ProductName, f64> = IndexMap::new();
    for record in table.records() {
        *totals.entry(record.product.clone()).or_insert(0.0) += record.sales;
    }
    let mut ranked: Vec<ProductSales> = totals
        .into_iter()
        .map(|(product, sales)| ProductSales { product, sales })
        .collect();
    ranked.sort_by(|a, b| {
        b.sales
            .total_cmp(&a.sales)
            .then_with(|| a.product.cmp(&b.product))
    });
    ranked.truncate(limit);
    Ok(ranked)
}

fn ensure_rows(table: &CleanTable, operation: &'static str) -> Result<(), EdaError> {
    if table.is_empty() {
        return Err(EdaError::EmptyDataset { operation });
    }
    Ok(())
}

fn group_stats(table: &CleanTable, key: impl Fn(&CleanRecord) -> GroupKey) -> Vec<GroupStats> {
    let mut groups: IndexMap<GroupKey, Accumulator> = IndexMap::new();
    for record in table.records() {
        groups.entry(key(record)).or_default().push(record.sales);
    }
    groups.sort_keys();
    groups
        .into_iter()
        .map(|(key, acc)| GroupStats {
            key,
            sum: acc.sum,
            mean: acc.mean(),
            count: acc.count,
        })
        .collect()
}

fn numeric_value(record: &CleanRecord, column: &str) -> f64 {
    match column {
        QUANTITY => f64::from(record.quantity),
        UNIT_PRICE => record.unit_price,
        SALES => record.sales,
        QUARTER => f64::from(record.quarter),
        _ => f64::NAN,
    }
}

fn sorted_unique(keys: impl Iterator<Item = GroupKey>) -> Vec<GroupKey> {
    let mut keys: Vec<GroupKey> = keys.collect();
    keys.sort();
    keys.dedup();
    keys
}
