//! Deterministic synthetic sales data.
//!
//! Per base row the RNG stream is consumed in a fixed order: day offset,
//! category, product, region, quantity, unit price. Missing values and
//! duplicate rows are injected afterwards, from the same stream.

use chrono::{Duration, NaiveDateTime};
use rand::Rng;
use rand::seq::index;
use tracing::{debug, info};

use crate::calendar::window_start;
use crate::catalog::{Category, Region};
use crate::config::GeneratorConfig;
use crate::constants::generator::{
    DUPLICATE_ROWS, MISSING_PRICE_FRACTION, MISSING_REGION_FRACTION, QUANTITY_MAX, QUANTITY_MIN,
    UNIT_PRICE_MAX, UNIT_PRICE_MIN, WINDOW_DAYS,
};
use crate::data::{SalesRecord, SalesTable};
use crate::errors::EdaError;
use crate::rng::DeterministicRng;

/// Generate `config.row_count` base rows plus [`DUPLICATE_ROWS`] duplicates,
/// drawing every random value from `rng`.
pub fn generate<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<SalesTable, EdaError> {
    let row_count = config.row_count;
    if row_count == 0 {
        return Err(EdaError::Generation(
            "row_count must be greater than zero".to_string(),
        ));
    }
    let start = window_start()
        .ok_or_else(|| EdaError::Generation("invalid generator window start".to_string()))?;

    let capacity = row_count.checked_add(DUPLICATE_ROWS).ok_or_else(|| {
        EdaError::Generation(format!("row_count {row_count} is too large"))
    })?;
    let mut records = Vec::new();
    records.try_reserve(capacity).map_err(|err| {
        EdaError::Generation(format!("cannot allocate {capacity} rows: {err}"))
    })?;
    for _ in 0..row_count {
        records.push(draw_record(start, rng));
    }

    let missing_regions = scaled_count(row_count, MISSING_REGION_FRACTION);
    for idx in index::sample(rng, row_count, missing_regions) {
        records[idx].region = None;
    }
    let missing_prices = scaled_count(row_count, MISSING_PRICE_FRACTION);
    for idx in index::sample(rng, row_count, missing_prices) {
        records[idx].unit_price = None;
    }
    debug!(
        "[sales_eda:generate] blanked {} regions and {} unit prices",
        missing_regions, missing_prices
    );

    for idx in duplicate_indices(row_count, rng) {
        let duplicate = records[idx].clone();
        records.push(duplicate);
    }

    let table = SalesTable::new(records);
    table.check_integrity()?;
    info!(
        "[sales_eda:generate] generated {} rows ({} base + {} duplicates, seed={})",
        table.len(),
        row_count,
        DUPLICATE_ROWS,
        config.seed
    );
    Ok(table)
}

/// Generate with a fresh [`DeterministicRng`] seeded from `seed`.
pub fn generate_seeded(row_count: usize, seed: u64) -> Result<SalesTable, EdaError> {
    let config = GeneratorConfig { row_count, seed };
    let mut rng = DeterministicRng::new(seed);
    generate(&config, &mut rng)
}

/// Number of rows selected by a fractional sample, rounding half to even.
pub fn scaled_count(row_count: usize, fraction: f64) -> usize {
    (row_count as f64 * fraction).round_ties_even() as usize
}

fn draw_record<R: Rng + ?Sized>(start: NaiveDateTime, rng: &mut R) -> SalesRecord {
    let date = start + Duration::days(rng.random_range(0..WINDOW_DAYS));
    let category = pick(&Category::ALL, rng);
    let product = pick(category.products(), rng).to_string();
    let region = pick(&Region::OBSERVED, rng);
    let quantity = rng.random_range(QUANTITY_MIN..QUANTITY_MAX);
    let unit_price = rng.random_range(UNIT_PRICE_MIN..UNIT_PRICE_MAX);
    SalesRecord {
        date,
        category,
        product,
        region: Some(region),
        quantity,
        unit_price: Some(unit_price),
        sales: f64::from(quantity) * unit_price,
    }
}

/// Rows to append as duplicates: distinct rows when enough exist, otherwise
/// drawn with replacement so the appended count is always [`DUPLICATE_ROWS`].
fn duplicate_indices<R: Rng + ?Sized>(row_count: usize, rng: &mut R) -> Vec<usize> {
    if row_count >= DUPLICATE_ROWS {
        index::sample(rng, row_count, DUPLICATE_ROWS).into_vec()
    } else {
        (0..DUPLICATE_ROWS)
            .map(|_| rng.random_range(0..row_count))
            .collect()
    }
}

// Callers only pass the fixed, non-empty catalog slices.
fn pick<T: Copy, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> T {
    items[rng.random_range(0..items.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn scaled_count_rounds_half_to_even() {
        assert_eq!(scaled_count(1500, MISSING_REGION_FRACTION), 75);
        assert_eq!(scaled_count(1500, MISSING_PRICE_FRACTION), 45);
        assert_eq!(scaled_count(30, MISSING_REGION_FRACTION), 2);
        assert_eq!(scaled_count(1, MISSING_PRICE_FRACTION), 0);
    }

    #[test]
    fn zero_rows_is_a_generation_error() {
        let config = GeneratorConfig {
            row_count: 0,
            seed: 7,
        };
        let mut rng = DeterministicRng::new(7);
        assert!(matches!(
            generate(&config, &mut rng),
            Err(EdaError::Generation(_))
        ));
    }

    #[test]
    fn oversized_row_counts_are_generation_errors() {
        assert!(matches!(
            generate_seeded(usize::MAX, 1),
            Err(EdaError::Generation(_))
        ));

        let config = match GeneratorConfig::new(i64::MAX, 1) {
            Ok(config) => config,
            Err(err) => {
                assert!(matches!(err, EdaError::Generation(_)));
                return;
            }
        };
        let mut rng = DeterministicRng::new(1);
        assert!(matches!(
            generate(&config, &mut rng),
            Err(EdaError::Generation(_))
        ));
    }

    #[test]
    fn drawn_records_respect_ranges() {
        let start = window_start().unwrap();
        let mut rng = DeterministicRng::new(11);
        for _ in 0..500 {
            let record = draw_record(start, &mut rng);
            let offset = (record.date - start).num_days();
            assert!((0..WINDOW_DAYS).contains(&offset));
            assert!((QUANTITY_MIN..QUANTITY_MAX).contains(&record.quantity));
            let price = record.unit_price.unwrap();
            assert!((UNIT_PRICE_MIN..UNIT_PRICE_MAX).contains(&price));
            assert_eq!(record.sales, f64::from(record.quantity) * price);
            assert!(record.category.owns(&record.product));
        }
    }

    #[test]
    fn duplicates_are_distinct_rows_when_possible() {
        let mut rng = DeterministicRng::new(3);
        let picked = duplicate_indices(50, &mut rng);
        let unique: HashSet<_> = picked.iter().collect();
        assert_eq!(picked.len(), DUPLICATE_ROWS);
        assert_eq!(unique.len(), DUPLICATE_ROWS);

        let small = duplicate_indices(3, &mut rng);
        assert_eq!(small.len(), DUPLICATE_ROWS);
        assert!(small.iter().all(|idx| *idx < 3));
    }

    #[test]
    fn appended_rows_copy_existing_rows() {
        let table = generate_seeded(40, 9).unwrap();
        let (base, appended) = table.records().split_at(40);
        for duplicate in appended {
            assert!(base.contains(duplicate));
        }
    }
}
