//! End-to-end: CSV on disk through ingestion, column resolution,
//! aggregation, savings attribution, and fee assessment.

use feesim::aggregate::columns::ColumnMap;
use feesim::config::ColumnPatterns;
use feesim::{
    aggregate, assess, catalog, extract_records, read_csv, scan, CapPolicy, SavingsStrategy,
    SpreadStrategy, Unit,
};
use indoc::indoc;
use std::io::Write;

const CSV: &str = indoc! {r#"
    Importer,Shipment Date,Value (USD),Quantity (KG)
    ACME Foods,2023-01-15,"$10,000","2,000kg"
    Globex,2023-05-20,"$9,800","2,000"
    ACME Foods,2024-03-02,"$8,400","2,000"
    Globex,2024-08-11,"$9,600","2,000"
    Globex,2024-09-01,$500,0
"#};

fn write_fixture() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp csv");
    file.write_all(CSV.as_bytes()).expect("write fixture");
    file.flush().expect("flush fixture");
    file
}

#[test]
fn csv_to_assessment() {
    let file = write_fixture();
    let dataset = read_csv(file.path()).unwrap();
    assert_eq!(dataset.rows.len(), 5);

    let map = ColumnMap::resolve(&dataset.headers, &ColumnPatterns::default()).unwrap();
    let summary = scan(&dataset, &map);
    let (base_year, eval_year) = summary.default_periods().unwrap();
    assert_eq!((base_year.as_str(), eval_year.as_str()), ("2023", "2024"));

    let records = extract_records(&dataset, &map);
    let stats = aggregate(&records, &base_year, &eval_year, "ACME Foods");

    // Zero-quantity row excluded: eval has ACME 8400/2000 + Globex 9600/2000.
    assert_eq!(stats.eval.total_value, 18_000.0);
    assert_eq!(stats.eval.total_quantity, 4_000.0);

    let inputs = stats.spread_inputs(Unit::Kg);
    assert_eq!(inputs.my_price, 4.2); // ACME eval price
    assert_eq!(inputs.market_price, 4.5); // market eval mean
    assert_eq!(inputs.volume, 2_000.0);

    let savings = SpreadStrategy { inputs }.compute();
    assert!((savings.total_saving - 600.0).abs() < 1e-9);

    let model = catalog::find("C").unwrap();
    let assessment = assess(model, 100_000.0, &savings, &CapPolicy::default());
    assert_eq!(assessment.fixed_fee, 30_000.0);
    assert!((assessment.contingent_fee.capped - 240.0).abs() < 1e-9);
    assert!(!assessment.contingent_fee.was_capped);
    assert!((assessment.total_cost - 30_240.0).abs() < 1e-9);
}

#[test]
fn dataset_with_one_year_has_no_default_periods() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Importer,Year,Value,Quantity").unwrap();
    writeln!(file, "ACME,2024,100,10").unwrap();
    file.flush().unwrap();

    let dataset = read_csv(file.path()).unwrap();
    let map = ColumnMap::resolve(&dataset.headers, &ColumnPatterns::default()).unwrap();
    let summary = scan(&dataset, &map);
    assert_eq!(summary.years, vec!["2024"]);
    assert_eq!(summary.default_periods(), None);
}

#[test]
fn unknown_counterparty_yields_zero_savings_not_an_error() {
    let file = write_fixture();
    let dataset = read_csv(file.path()).unwrap();
    let map = ColumnMap::resolve(&dataset.headers, &ColumnPatterns::default()).unwrap();
    let records = extract_records(&dataset, &map);
    let stats = aggregate(&records, "2023", "2024", "Nobody Inc");

    let inputs = stats.spread_inputs(Unit::Kg);
    assert_eq!(inputs.my_price, 0.0);
    assert_eq!(inputs.volume, 0.0);
    let savings = SpreadStrategy { inputs }.compute();
    assert_eq!(savings.total_saving, 0.0);
}
