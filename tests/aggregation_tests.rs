use feesim::aggregate::columns::ColumnMap;
use feesim::config::ColumnPatterns;
use feesim::{aggregate, extract_records, scan, Dataset, TransactionRecord, Unit};
use pretty_assertions::assert_eq;

fn rec(counterparty: &str, period: &str, value: f64, quantity: f64) -> TransactionRecord {
    TransactionRecord {
        counterparty: counterparty.to_string(),
        period: period.to_string(),
        value,
        quantity,
    }
}

fn sample_dataset() -> Dataset {
    Dataset {
        headers: vec![
            "Importer".into(),
            "Shipment Date".into(),
            "Value (USD)".into(),
            "Quantity (KG)".into(),
        ],
        rows: vec![
            vec!["ACME Foods".into(), "2023-03-10".into(), "$5,000".into(), "1,000kg".into()],
            vec!["ACME Foods".into(), "2024-02-18".into(), "$4,200".into(), "1,000".into()],
            vec!["Globex".into(), "2024-06-02".into(), "4,800".into(), "1,000".into()],
            // Zero quantity: must not contribute anywhere.
            vec!["Globex".into(), "2024-07-09".into(), "$900".into(), "0".into()],
            // No year token in the period field: never matches a period.
            vec!["Globex".into(), "n/a".into(), "$700".into(), "100".into()],
        ],
    }
}

#[test]
fn column_resolution_then_extraction() {
    let dataset = sample_dataset();
    let map = ColumnMap::resolve(&dataset.headers, &ColumnPatterns::default()).unwrap();
    assert_eq!(map.counterparty, "Importer");
    assert_eq!(map.period, "Shipment Date");

    let records = extract_records(&dataset, &map);
    assert_eq!(records.len(), 5);
    assert_eq!(records[0].value, 5_000.0);
    assert_eq!(records[0].quantity, 1_000.0);
}

#[test]
fn zero_quantity_rows_are_excluded_from_all_statistics() {
    let dataset = sample_dataset();
    let map = ColumnMap::resolve(&dataset.headers, &ColumnPatterns::default()).unwrap();
    let records = extract_records(&dataset, &map);
    let stats = aggregate(&records, "2023", "2024", "ACME Foods");

    // Eval 2024: ACME 4200/1000 and Globex 4800/1000; the $900 zero-
    // quantity row is absent.
    assert_eq!(stats.eval.total_value, 9_000.0);
    assert_eq!(stats.eval.total_quantity, 2_000.0);
    assert_eq!(stats.eval.unit_prices.len(), 2);
}

#[test]
fn unresolved_value_column_contributes_nothing() {
    let dataset = Dataset {
        headers: vec!["Importer".into(), "Year".into(), "mystery".into()],
        rows: vec![vec!["ACME".into(), "2024".into(), "42".into()]],
    };
    let map = ColumnMap::resolve(&dataset.headers, &ColumnPatterns::default()).unwrap();
    assert_eq!(map.value, None);
    assert!(extract_records(&dataset, &map).is_empty());
}

#[test]
fn empty_dataset_yields_zero_stats_not_an_error() {
    let stats = aggregate(&[], "2023", "2024", "ACME");
    assert_eq!(stats.eval.value_weighted_mean(), 0.0);
    assert_eq!(stats.eval.std_dev(), 1.0);
    assert_eq!(stats.target_eval.total_quantity, 0.0);
}

#[test]
fn scan_collects_sorted_unique_years_and_counterparties() {
    let dataset = sample_dataset();
    let map = ColumnMap::resolve(&dataset.headers, &ColumnPatterns::default()).unwrap();
    let summary = scan(&dataset, &map);

    assert_eq!(summary.counterparties, vec!["ACME Foods", "Globex"]);
    assert_eq!(summary.years, vec!["2023", "2024"]);
    assert_eq!(summary.row_count, 5);
    assert_eq!(
        summary.default_periods(),
        Some(("2023".to_string(), "2024".to_string()))
    );
}

#[test]
fn derived_inputs_anchor_the_counterparty_against_the_market() {
    let records = vec![
        rec("ACME", "2023", 5_000.0, 1_000.0),
        rec("Other", "2023", 4_900.0, 1_000.0),
        rec("ACME", "2024", 4_200.0, 1_000.0),
        rec("Other", "2024", 4_800.0, 1_000.0),
    ];
    let stats = aggregate(&records, "2023", "2024", "ACME");

    let spread = stats.spread_inputs(Unit::Kg);
    assert_eq!(spread.my_price, 4.2);
    assert_eq!(spread.market_price, 4.5);
    assert_eq!(spread.volume, 1_000.0);

    let z = stats.zscore_inputs(Unit::Kg);
    assert_eq!(z.base_my_price, 5.0);
    assert_eq!(z.base_mean, 4.95);
    assert_eq!(z.eval_my_price, 4.2);
    assert_eq!(z.eval_mean, 4.5);
    // Periods hold two distinct prices, so the std is the real spread
    // around the weighted mean, not a floor constant.
    assert!(z.base_std > 0.0);
    assert!(z.eval_std > 0.0);
}

#[test]
fn a_record_mentioning_both_years_counts_toward_base_only() {
    let records = vec![rec("ACME", "2023 revised 2024", 1_000.0, 100.0)];
    let stats = aggregate(&records, "2023", "2024", "ACME");
    assert_eq!(stats.base.total_quantity, 100.0);
    assert_eq!(stats.eval.total_quantity, 0.0);
}
