use chrono::{Month, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Region};
use crate::errors::EdaError;
use crate::hash::stable_hash_parts;
use crate::types::{HashPart, ProductName};

/// One row of the raw working table, as produced by the generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Order timestamp (midnight of the drawn day).
    pub date: NaiveDateTime,
    pub category: Category,
    /// Product name; must belong to `category`.
    pub product: ProductName,
    /// `None` when the region was blanked out.
    pub region: Option<Region>,
    pub quantity: u32,
    /// `None` when the unit price was blanked out.
    pub unit_price: Option<f64>,
    /// `quantity * unit_price` at generation time. Never recomputed.
    pub sales: f64,
}

/// Hashable identity of a raw row across every column.
///
/// Floats compare by bit pattern, so two rows are equal only when every
/// rendered value is identical.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct RowKey {
    date: NaiveDateTime,
    category: Category,
    product: ProductName,
    region: Option<Region>,
    quantity: u32,
    unit_price: Option<u64>,
    sales: u64,
}

impl SalesRecord {
    pub(crate) fn row_key(&self) -> RowKey {
        RowKey {
            date: self.date,
            category: self.category,
            product: self.product.clone(),
            region: self.region,
            quantity: self.quantity,
            unit_price: self.unit_price.map(f64::to_bits),
            sales: self.sales.to_bits(),
        }
    }

    fn hash_part(&self) -> HashPart {
        format!(
            "{}|{}|{}|{}|{}|{:?}|{:?}",
            self.date,
            self.category,
            self.product,
            self.region.map(|region| region.as_str()).unwrap_or("-"),
            self.quantity,
            self.unit_price,
            self.sales
        )
    }
}

/// Raw sales table. Rows keep insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesTable {
    records: Vec<SalesRecord>,
}

impl SalesTable {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<SalesRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// FNV-1a digest over every row in order; equal tables yield equal
    /// fingerprints on every build and platform.
    pub fn fingerprint(&self) -> u64 {
        stable_hash_parts(self.records.iter().map(SalesRecord::hash_part))
    }

    /// Verify that every product belongs to its row's category.
    pub fn check_integrity(&self) -> Result<(), EdaError> {
        check_pairs(
            self.records
                .iter()
                .map(|record| (record.category, record.product.as_str())),
        )
    }
}

/// One row of the cleaned table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CleanRecord {
    pub date: NaiveDate,
    pub category: Category,
    pub product: ProductName,
    pub region: Region,
    pub quantity: u32,
    pub unit_price: f64,
    pub sales: f64,
    /// Derived from `date`.
    pub month: Month,
    /// Derived from `date` (1-4).
    pub quarter: u32,
}

/// Cleaned table: no missing values, no exact duplicates, calendar fields derived.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CleanTable {
    records: Vec<CleanRecord>,
}

impl CleanTable {
    pub fn new(records: Vec<CleanRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CleanRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of the `sales` column.
    pub fn total_sales(&self) -> f64 {
        self.records.iter().map(|record| record.sales).sum()
    }

    /// Verify that every product belongs to its row's category.
    pub fn check_integrity(&self) -> Result<(), EdaError> {
        check_pairs(
            self.records
                .iter()
                .map(|record| (record.category, record.product.as_str())),
        )
    }
}

fn check_pairs<'a>(pairs: impl Iterator<Item = (Category, &'a str)>) -> Result<(), EdaError> {
    for (row, (category, product)) in pairs.enumerate() {
        if !category.owns(product) {
            return Err(EdaError::Integrity {
                row,
                category: category.to_string(),
                product: product.to_string(),
            });
        }
    }
    Ok(())
}
