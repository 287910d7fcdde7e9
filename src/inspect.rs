//! Pre-cleaning inspection of the raw table: shape, missing values,
//! duplicate rows, and descriptive statistics of the numeric columns.

use std::collections::HashSet;

use serde::Serialize;
use tracing::warn;

use crate::constants::columns::{QUANTITY, RAW_COLUMNS, REGION, SALES, UNIT_PRICE};
use crate::data::{SalesRecord, SalesTable};
use crate::stats;
use crate::types::ColumnName;

/// Number of missing values in one column.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MissingCount {
    pub column: ColumnName,
    pub missing: usize,
}

/// Descriptive statistics of one numeric column. Missing values are skipped.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColumnStats {
    pub column: ColumnName,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnStats {
    fn describe(column: ColumnName, values: &[f64]) -> Self {
        Self {
            column,
            count: values.len(),
            mean: stats::mean(values),
            std: stats::sample_std(values),
            min: stats::min(values),
            p25: stats::quantile(values, 0.25),
            p50: stats::median(values),
            p75: stats::quantile(values, 0.75),
            max: stats::max(values),
        }
    }
}

/// Inspection results for a raw table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Inspection {
    pub rows: usize,
    pub columns: usize,
    /// One entry per raw column, in column order.
    pub missing: Vec<MissingCount>,
    /// Rows identical to an earlier row across every column.
    pub duplicate_rows: usize,
    /// Quantity, Unit_Price, and Sales.
    pub describe: Vec<ColumnStats>,
}

impl Inspection {
    /// Missing count for `column`, or zero for unknown columns.
    pub fn missing_in(&self, column: &str) -> usize {
        self.missing
            .iter()
            .find(|entry| entry.column == column)
            .map(|entry| entry.missing)
            .unwrap_or(0)
    }
}

/// Inspect `table` without modifying it.
pub fn inspect(table: &SalesTable) -> Inspection {
    let records = table.records();
    let missing = RAW_COLUMNS
        .iter()
        .map(|&column| MissingCount {
            column,
            missing: records
                .iter()
                .filter(|record| is_missing(record, column))
                .count(),
        })
        .collect();

    let duplicate_rows = count_duplicates(records);
    if duplicate_rows > 0 {
        warn!(
            "[sales_eda:inspect] {} rows duplicate an earlier row",
            duplicate_rows
        );
    }

    let quantities: Vec<f64> = records
        .iter()
        .map(|record| f64::from(record.quantity))
        .collect();
    let prices: Vec<f64> = records.iter().filter_map(|record| record.unit_price).collect();
    let sales: Vec<f64> = records.iter().map(|record| record.sales).collect();

    Inspection {
        rows: records.len(),
        columns: RAW_COLUMNS.len(),
        missing,
        duplicate_rows,
        describe: vec![
            ColumnStats::describe(QUANTITY, &quantities),
            ColumnStats::describe(UNIT_PRICE, &prices),
            ColumnStats::describe(SALES, &sales),
        ],
    }
}

fn is_missing(record: &SalesRecord, column: &str) -> bool {
    match column {
        REGION => record.region.is_none(),
        UNIT_PRICE => record.unit_price.is_none(),
        _ => false,
    }
}

pub(crate) fn count_duplicates(records: &[SalesRecord]) -> usize {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .filter(|record| !seen.insert(record.row_key()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Region};
    use crate::constants::columns::DATE;
    use chrono::NaiveDate;

    fn record(quantity: u32, price: Option<f64>, region: Option<Region>) -> SalesRecord {
        SalesRecord {
            date: NaiveDate::from_ymd_opt(2022, 2, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            category: Category::Sports,
            product: "Basketball".to_string(),
            region,
            quantity,
            unit_price: price,
            sales: f64::from(quantity) * price.unwrap_or(100.0),
        }
    }

    #[test]
    fn counts_missing_values_per_column() {
        let table = SalesTable::new(vec![
            record(1, None, Some(Region::East)),
            record(2, Some(20.0), None),
            record(3, None, None),
        ]);
        let inspection = inspect(&table);
        assert_eq!(inspection.rows, 3);
        assert_eq!(inspection.columns, 7);
        assert_eq!(inspection.missing_in(UNIT_PRICE), 2);
        assert_eq!(inspection.missing_in(REGION), 2);
        assert_eq!(inspection.missing_in(DATE), 0);
        assert_eq!(inspection.missing.len(), 7);
    }

    #[test]
    fn duplicates_count_repeats_after_first_occurrence() {
        let a = record(1, Some(10.0), Some(Region::North));
        let b = record(2, Some(10.0), Some(Region::North));
        let table = SalesTable::new(vec![a.clone(), b.clone(), a.clone(), a, b]);
        assert_eq!(inspect(&table).duplicate_rows, 3);
    }

    #[test]
    fn describe_skips_missing_prices() {
        let table = SalesTable::new(vec![
            record(1, Some(10.0), Some(Region::West)),
            record(3, None, Some(Region::West)),
            record(2, Some(30.0), Some(Region::West)),
        ]);
        let inspection = inspect(&table);
        let price = &inspection.describe[1];
        assert_eq!(price.column, UNIT_PRICE);
        assert_eq!(price.count, 2);
        assert_eq!(price.mean, Some(20.0));
        assert_eq!(price.p50, Some(20.0));
        let quantity = &inspection.describe[0];
        assert_eq!(quantity.count, 3);
        assert_eq!(quantity.min, Some(1.0));
        assert_eq!(quantity.max, Some(3.0));
    }

    #[test]
    fn empty_table_describes_nothing() {
        let inspection = inspect(&SalesTable::default());
        assert_eq!(inspection.rows, 0);
        assert_eq!(inspection.duplicate_rows, 0);
        assert!(inspection.describe.iter().all(|stats| stats.mean.is_none()));
    }
}
