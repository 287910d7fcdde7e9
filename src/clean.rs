//! Cleaning pipeline. Each step takes a table by value and returns a new one;
//! [`clean`] runs them in their required order.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{info, warn};

use crate::calendar::{month_of, normalize_timestamp, quarter_of};
use crate::catalog::Region;
use crate::constants::columns::{REGION, UNIT_PRICE};
use crate::data::{CleanRecord, CleanTable, SalesRecord, SalesTable};
use crate::errors::EdaError;
use crate::stats;

/// Counts produced while cleaning.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CleaningReport {
    pub rows_before: usize,
    pub rows_after: usize,
    pub regions_imputed: usize,
    pub prices_imputed: usize,
    /// Median of the present unit prices before imputation.
    pub median_unit_price: f64,
    pub duplicates_removed: usize,
}

/// Cleaned table together with its report.
#[derive(Clone, Debug, PartialEq)]
pub struct CleaningOutcome {
    pub table: CleanTable,
    pub report: CleaningReport,
}

/// Replace missing regions with [`Region::Unknown`]. Returns the new table and
/// the number of rows changed.
pub fn impute_region(table: SalesTable) -> (SalesTable, usize) {
    let mut imputed = 0;
    let records = table
        .into_records()
        .into_iter()
        .map(|mut record| {
            if record.region.is_none() {
                record.region = Some(Region::Unknown);
                imputed += 1;
            }
            record
        })
        .collect();
    (SalesTable::new(records), imputed)
}

/// Replace missing unit prices with the median of the present ones.
///
/// `sales` is left untouched on imputed rows. Returns the new table, the
/// number of rows changed, and the median used.
pub fn impute_unit_price(table: SalesTable) -> Result<(SalesTable, usize, f64), EdaError> {
    let present: Vec<f64> = table
        .records()
        .iter()
        .filter_map(|record| record.unit_price)
        .collect();
    let median = stats::median(&present).ok_or(EdaError::EmptyDataset {
        operation: "unit price median",
    })?;

    let mut imputed = 0;
    let records = table
        .into_records()
        .into_iter()
        .map(|mut record| {
            if record.unit_price.is_none() {
                record.unit_price = Some(median);
                imputed += 1;
            }
            record
        })
        .collect();
    Ok((SalesTable::new(records), imputed, median))
}

/// Drop rows identical to an earlier row across every column, keeping the
/// first occurrence. Returns the new table and the number of rows removed.
pub fn drop_duplicates(table: SalesTable) -> (SalesTable, usize) {
    let before = table.len();
    let mut seen = HashSet::with_capacity(before);
    let records: Vec<SalesRecord> = table
        .into_records()
        .into_iter()
        .filter(|record| seen.insert(record.row_key()))
        .collect();
    let removed = before - records.len();
    (SalesTable::new(records), removed)
}

/// Normalize dates and derive `month` and `quarter`.
///
/// Fails with [`EdaError::Unimputed`] if a region or unit price is still
/// missing, i.e. when called before the imputation steps.
pub fn normalize_dates(table: SalesTable) -> Result<CleanTable, EdaError> {
    let records = table
        .into_records()
        .into_iter()
        .enumerate()
        .map(|(row, record)| {
            let region = record
                .region
                .ok_or(EdaError::Unimputed { row, column: REGION })?;
            let unit_price = record
                .unit_price
                .ok_or(EdaError::Unimputed { row, column: UNIT_PRICE })?;
            let date = normalize_timestamp(record.date);
            Ok(CleanRecord {
                date,
                category: record.category,
                product: record.product,
                region,
                quantity: record.quantity,
                unit_price,
                sales: record.sales,
                month: month_of(date),
                quarter: quarter_of(date),
            })
        })
        .collect::<Result<Vec<_>, EdaError>>()?;
    Ok(CleanTable::new(records))
}

/// Run the full cleaning pipeline: region imputation, unit price imputation,
/// duplicate removal, date normalization.
pub fn clean(table: SalesTable) -> Result<CleaningOutcome, EdaError> {
    if table.is_empty() {
        return Err(EdaError::EmptyDataset {
            operation: "cleaning",
        });
    }
    let rows_before = table.len();

    let (table, regions_imputed) = impute_region(table);
    let (table, prices_imputed, median_unit_price) = impute_unit_price(table)?;
    if regions_imputed > 0 || prices_imputed > 0 {
        warn!(
            "[sales_eda:clean] imputed {} regions as '{}' and {} unit prices with median {:.2}",
            regions_imputed,
            Region::Unknown,
            prices_imputed,
            median_unit_price
        );
    }

    let (table, duplicates_removed) = drop_duplicates(table);
    if duplicates_removed > 0 {
        warn!(
            "[sales_eda:clean] removed {} duplicate rows",
            duplicates_removed
        );
    }

    let table = normalize_dates(table)?;
    table.check_integrity()?;
    info!(
        "[sales_eda:clean] cleaned table has {} rows (from {})",
        table.len(),
        rows_before
    );

    Ok(CleaningOutcome {
        report: CleaningReport {
            rows_before,
            rows_after: table.len(),
            regions_imputed,
            prices_imputed,
            median_unit_price,
            duplicates_removed,
        },
        table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use chrono::{Month, NaiveDate};

    fn record(day: u32, price: Option<f64>, region: Option<Region>) -> SalesRecord {
        SalesRecord {
            date: NaiveDate::from_ymd_opt(2022, 4, day)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            category: Category::Clothing,
            product: "Jeans".to_string(),
            region,
            quantity: 2,
            unit_price: price,
            sales: 2.0 * price.unwrap_or(99.0),
        }
    }

    #[test]
    fn region_imputation_uses_unknown_sentinel() {
        let table = SalesTable::new(vec![
            record(1, Some(10.0), None),
            record(2, Some(10.0), Some(Region::South)),
        ]);
        let (table, imputed) = impute_region(table);
        assert_eq!(imputed, 1);
        assert_eq!(table.records()[0].region, Some(Region::Unknown));
        assert_eq!(table.records()[1].region, Some(Region::South));
    }

    #[test]
    fn price_imputation_uses_median_and_keeps_sales() {
        let table = SalesTable::new(vec![
            record(1, Some(10.0), Some(Region::East)),
            record(2, None, Some(Region::East)),
            record(3, Some(30.0), Some(Region::East)),
            record(4, Some(100.0), Some(Region::East)),
        ]);
        let (table, imputed, median) = impute_unit_price(table).unwrap();
        assert_eq!(imputed, 1);
        assert_eq!(median, 30.0);
        let repaired = &table.records()[1];
        assert_eq!(repaired.unit_price, Some(30.0));
        assert_eq!(repaired.sales, 198.0);
    }

    #[test]
    fn price_imputation_without_any_price_is_empty_dataset() {
        let table = SalesTable::new(vec![record(1, None, Some(Region::East))]);
        assert!(matches!(
            impute_unit_price(table),
            Err(EdaError::EmptyDataset { .. })
        ));
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let a = record(1, Some(10.0), Some(Region::West));
        let b = record(2, Some(20.0), Some(Region::West));
        let table = SalesTable::new(vec![a.clone(), b.clone(), a.clone(), b.clone(), a.clone()]);
        let (table, removed) = drop_duplicates(table);
        assert_eq!(removed, 3);
        assert_eq!(table.records(), &[a, b]);
    }

    #[test]
    fn normalize_dates_derives_calendar_fields() {
        let table = SalesTable::new(vec![record(30, Some(10.0), Some(Region::North))]);
        let clean = normalize_dates(table).unwrap();
        let row = &clean.records()[0];
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2022, 4, 30).unwrap());
        assert_eq!(row.month, Month::April);
        assert_eq!(row.quarter, 2);
    }

    #[test]
    fn normalize_dates_rejects_unimputed_rows() {
        let table = SalesTable::new(vec![
            record(1, Some(10.0), Some(Region::North)),
            record(2, None, Some(Region::North)),
        ]);
        assert!(matches!(
            normalize_dates(table),
            Err(EdaError::Unimputed {
                row: 1,
                column: UNIT_PRICE
            })
        ));

        let table = SalesTable::new(vec![record(3, Some(10.0), None)]);
        let err = normalize_dates(table).unwrap_err();
        assert!(matches!(err, EdaError::Unimputed { row: 0, column: REGION }));
        assert!(err.to_string().contains("impute"));
    }

    #[test]
    fn duplicates_with_missing_fields_collapse_after_imputation() {
        let a = record(5, None, None);
        let table = SalesTable::new(vec![
            a.clone(),
            record(6, Some(40.0), Some(Region::North)),
            a,
        ]);
        let outcome = clean(table).unwrap();
        assert_eq!(outcome.report.rows_before, 3);
        assert_eq!(outcome.report.rows_after, 2);
        assert_eq!(outcome.report.regions_imputed, 2);
        assert_eq!(outcome.report.prices_imputed, 2);
        assert_eq!(outcome.report.duplicates_removed, 1);
        assert_eq!(outcome.report.median_unit_price, 40.0);
    }

    #[test]
    fn cleaning_an_empty_table_fails() {
        assert!(matches!(
            clean(SalesTable::default()),
            Err(EdaError::EmptyDataset { .. })
        ));
    }
}
