/// Constants used by the synthetic sales generator.
pub mod generator {
    /// Default number of base rows generated before duplicate injection.
    pub const DEFAULT_ROW_COUNT: usize = 1500;
    /// Default seed for the generator RNG stream.
    pub const DEFAULT_SEED: u64 = 42;
    /// Year/month/day of the first day in the sampling window.
    pub const WINDOW_START: (i32, u32, u32) = (2022, 1, 1);
    /// Number of day offsets drawable from the window start (exclusive upper bound).
    pub const WINDOW_DAYS: i64 = 365;
    /// Inclusive lower bound for generated quantities.
    pub const QUANTITY_MIN: u32 = 1;
    /// Exclusive upper bound for generated quantities.
    pub const QUANTITY_MAX: u32 = 5;
    /// Inclusive lower bound for generated unit prices.
    pub const UNIT_PRICE_MIN: f64 = 10.0;
    /// Exclusive upper bound for generated unit prices.
    pub const UNIT_PRICE_MAX: f64 = 500.0;
    /// Fraction of base rows whose region is blanked out.
    pub const MISSING_REGION_FRACTION: f64 = 0.05;
    /// Fraction of base rows whose unit price is blanked out.
    pub const MISSING_PRICE_FRACTION: f64 = 0.03;
    /// Number of existing rows appended again as exact duplicates.
    pub const DUPLICATE_ROWS: usize = 10;
}

/// Constants used by the cleaning pipeline.
pub mod cleaning {
    /// Label substituted for missing regions.
    pub const UNKNOWN_REGION_LABEL: &str = "Unknown";
}

/// Constants used by summary tables.
pub mod summary {
    use super::columns::{QUANTITY, QUARTER, SALES, UNIT_PRICE};
    use crate::types::ColumnName;

    /// Default number of products kept in the top-products ranking.
    pub const DEFAULT_TOP_PRODUCTS: usize = 8;
    /// Numeric columns included in the correlation matrix, in output order.
    pub const CORRELATION_COLUMNS: [ColumnName; 4] = [QUANTITY, UNIT_PRICE, SALES, QUARTER];
}

/// Column names of the raw working table, in output order.
pub mod columns {
    use crate::types::ColumnName;

    pub const DATE: ColumnName = "Date";
    pub const CATEGORY: ColumnName = "Category";
    pub const PRODUCT: ColumnName = "Product";
    pub const REGION: ColumnName = "Region";
    pub const QUANTITY: ColumnName = "Quantity";
    pub const UNIT_PRICE: ColumnName = "Unit_Price";
    pub const SALES: ColumnName = "Sales";
    /// Derived by cleaning; not part of the raw table.
    pub const QUARTER: ColumnName = "Quarter";

    /// Every raw column in table order.
    pub const RAW_COLUMNS: [ColumnName; 7] =
        [DATE, CATEGORY, PRODUCT, REGION, QUANTITY, UNIT_PRICE, SALES];
}

/// Constants used by the command-line report.
pub mod report {
    /// Number of rows previewed in the inspection section.
    pub const PREVIEW_ROWS: usize = 5;
}

/// Table fingerprint constants.
pub mod hash {
    /// FNV-1a 64-bit offset basis.
    pub const FNV1A64_OFFSET: u64 = 0xcbf29ce484222325;
    /// FNV-1a 64-bit prime.
    pub const FNV1A64_PRIME: u64 = 0x100000001b3;
    /// Byte appended after each part; never produced by UTF-8 text.
    pub const PART_SEPARATOR: u8 = 0xff;
}
