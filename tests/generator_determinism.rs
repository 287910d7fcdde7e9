use sales_eda::constants::generator::{
    DUPLICATE_ROWS, MISSING_PRICE_FRACTION, MISSING_REGION_FRACTION,
};
use sales_eda::generator::scaled_count;
use sales_eda::{Category, DeterministicRng, GeneratorConfig, SalesTable, generate, generate_seeded};

fn table_bytes(table: &SalesTable) -> Vec<u8> {
    serde_json::to_vec(table).unwrap()
}

#[test]
fn same_seed_produces_byte_identical_tables() {
    let first = generate_seeded(500, 42).unwrap();
    let second = generate_seeded(500, 42).unwrap();
    assert_eq!(first, second);
    assert_eq!(table_bytes(&first), table_bytes(&second));
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[test]
fn different_seeds_produce_different_tables() {
    let a = generate_seeded(200, 1).unwrap();
    let b = generate_seeded(200, 2).unwrap();
    assert_ne!(a, b);
    assert_ne!(a.fingerprint(), b.fingerprint());
}

#[test]
fn explicit_rng_matches_seeded_helper() {
    let config = GeneratorConfig {
        row_count: 150,
        seed: 77,
    };
    let mut rng = DeterministicRng::new(config.seed);
    let explicit = generate(&config, &mut rng).unwrap();
    assert_eq!(explicit, generate_seeded(150, 77).unwrap());
}

#[test]
fn row_count_is_base_plus_duplicates() {
    for row_count in [1, 3, 9, 10, 11, 37, 250, 1500] {
        let table = generate_seeded(row_count, 42).unwrap();
        assert_eq!(
            table.len(),
            row_count + DUPLICATE_ROWS,
            "row_count={row_count}"
        );
    }
}

#[test]
fn missing_values_are_injected_at_exact_rates_in_base_rows() {
    for (row_count, seed) in [(1500, 42), (333, 9), (40, 3)] {
        let table = generate_seeded(row_count, seed).unwrap();
        let base = &table.records()[..row_count];
        let missing_regions = base.iter().filter(|r| r.region.is_none()).count();
        let missing_prices = base.iter().filter(|r| r.unit_price.is_none()).count();
        assert_eq!(
            missing_regions,
            scaled_count(row_count, MISSING_REGION_FRACTION)
        );
        assert_eq!(
            missing_prices,
            scaled_count(row_count, MISSING_PRICE_FRACTION)
        );
    }
    let default_run = generate_seeded(1500, 42).unwrap();
    let base = &default_run.records()[..1500];
    assert_eq!(base.iter().filter(|r| r.region.is_none()).count(), 75);
    assert_eq!(base.iter().filter(|r| r.unit_price.is_none()).count(), 45);
}

#[test]
fn every_product_belongs_to_its_category() {
    for seed in 0..5 {
        let table = generate_seeded(400, seed).unwrap();
        assert!(
            table
                .records()
                .iter()
                .all(|record| record.category.owns(&record.product))
        );
        table.check_integrity().unwrap();
    }
}

#[test]
fn every_category_and_region_appears_in_a_default_run() {
    let table = generate_seeded(1500, 42).unwrap();
    for category in Category::ALL {
        assert!(
            table.records().iter().any(|r| r.category == category),
            "missing {category}"
        );
    }
    for region in sales_eda::Region::OBSERVED {
        assert!(table.records().iter().any(|r| r.region == Some(region)));
    }
}

#[test]
fn sales_equal_quantity_times_price_where_price_is_present() {
    let table = generate_seeded(300, 12).unwrap();
    for record in table.records() {
        if let Some(price) = record.unit_price {
            assert_eq!(record.sales, f64::from(record.quantity) * price);
        }
    }
}
