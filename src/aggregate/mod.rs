//! Single-pass aggregation of historical transaction records into the
//! period statistics that feed savings attribution.
//!
//! Records carry free-text period labels; membership in a period is a
//! substring match on the 4-digit year token. Zero-quantity records
//! cannot contribute a unit price and are skipped entirely.

pub mod columns;

use crate::core::{PeriodStats, TransactionRecord};
use crate::engine::savings::{SpreadInputs, ZScoreInputs};
use crate::io::reader::Dataset;
use crate::units::{convert_price, convert_volume, Unit};
use columns::ColumnMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static YEAR_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"20\d{2}").expect("year token pattern is valid"));

/// Market-wide and counterparty-scoped statistics for the base and
/// evaluation periods. Transient: rebuilt whenever any upstream input
/// changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregateStats {
    pub base: PeriodStats,
    pub eval: PeriodStats,
    pub target_base: PeriodStats,
    pub target_eval: PeriodStats,
}

impl AggregateStats {
    /// Native statistics are per-KG; rescale for the display unit.
    fn price(&self, raw: f64, unit: Unit) -> f64 {
        round2(convert_price(raw, Unit::Kg, unit))
    }

    /// Default inputs for the spread methodology: the counterparty's
    /// evaluation-period price against the market's, over the
    /// counterparty's evaluation-period volume.
    pub fn spread_inputs(&self, unit: Unit) -> SpreadInputs {
        SpreadInputs {
            my_price: self.price(self.target_eval.value_weighted_mean(), unit),
            market_price: self.price(self.eval.value_weighted_mean(), unit),
            volume: convert_volume(self.target_eval.total_quantity, Unit::Kg, unit).round(),
        }
    }

    /// Default inputs for the z-score methodology.
    pub fn zscore_inputs(&self, unit: Unit) -> ZScoreInputs {
        ZScoreInputs {
            base_mean: self.price(self.base.value_weighted_mean(), unit),
            base_std: self.price(self.base.std_dev(), unit),
            base_my_price: self.price(self.target_base.value_weighted_mean(), unit),
            eval_mean: self.price(self.eval.value_weighted_mean(), unit),
            eval_std: self.price(self.eval.std_dev(), unit),
            eval_my_price: self.price(self.target_eval.value_weighted_mean(), unit),
            volume: convert_volume(self.target_eval.total_quantity, Unit::Kg, unit).round(),
        }
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Aggregate records into the four period statistics in one pass.
///
/// A record whose label mentions both years counts toward the base
/// period only. Records matching `counterparty` additionally
/// accumulate into the target-scoped stats for their period.
pub fn aggregate(
    records: &[TransactionRecord],
    base_year: &str,
    eval_year: &str,
    counterparty: &str,
) -> AggregateStats {
    let mut stats = AggregateStats::default();
    for rec in records {
        let Some(price) = rec.unit_price() else {
            continue;
        };
        let is_target = rec.counterparty == counterparty;
        if rec.period.contains(base_year) {
            stats.base.add(rec.value, rec.quantity, price);
            if is_target {
                stats.target_base.add(rec.value, rec.quantity, price);
            }
        } else if rec.period.contains(eval_year) {
            stats.eval.add(rec.value, rec.quantity, price);
            if is_target {
                stats.target_eval.add(rec.value, rec.quantity, price);
            }
        }
    }
    stats
}

/// What a freshly loaded dataset offers to choose from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub counterparties: Vec<String>,
    pub years: Vec<String>,
    pub row_count: usize,
}

impl DatasetSummary {
    /// Default period selection: the two most recent years present.
    pub fn default_periods(&self) -> Option<(String, String)> {
        match self.years.as_slice() {
            [.., base, eval] => Some((base.clone(), eval.clone())),
            _ => None,
        }
    }
}

/// Collect sorted unique counterparties and year tokens from a dataset.
pub fn scan(dataset: &Dataset, map: &ColumnMap) -> DatasetSummary {
    let mut counterparties: Vec<String> = Vec::new();
    let mut years: Vec<String> = Vec::new();
    for row in 0..dataset.rows.len() {
        if let Some(name) = dataset.cell(row, &map.counterparty) {
            let name = name.trim();
            if !name.is_empty() {
                counterparties.push(name.to_string());
            }
        }
        if let Some(label) = dataset.cell(row, &map.period) {
            if let Some(m) = YEAR_TOKEN.find(label) {
                years.push(m.as_str().to_string());
            }
        }
    }
    counterparties.sort();
    counterparties.dedup();
    years.sort();
    years.dedup();
    DatasetSummary {
        counterparties,
        years,
        row_count: dataset.rows.len(),
    }
}

/// Turn dataset rows into typed records using a resolved column map.
///
/// Fails closed: if the value or quantity role is unresolved, no record
/// contributes anything. Unparseable cells degrade to 0.
pub fn extract_records(dataset: &Dataset, map: &ColumnMap) -> Vec<TransactionRecord> {
    let (Some(value_col), Some(quantity_col)) = (&map.value, &map.quantity) else {
        log::warn!("value or quantity column unresolved; dataset contributes no records");
        return Vec::new();
    };
    (0..dataset.rows.len())
        .map(|row| TransactionRecord {
            counterparty: dataset
                .cell(row, &map.counterparty)
                .unwrap_or_default()
                .trim()
                .to_string(),
            period: dataset.cell(row, &map.period).unwrap_or_default().to_string(),
            value: parse_money(dataset.cell(row, value_col).unwrap_or_default()),
            quantity: parse_quantity(dataset.cell(row, quantity_col).unwrap_or_default()),
        })
        .collect()
}

/// Monetary cells may carry currency symbols and thousands separators.
pub fn parse_money(cell: &str) -> f64 {
    let cleaned: String = cell.chars().filter(|c| !matches!(c, '$' | ',')).collect();
    cleaned.trim().parse().unwrap_or(0.0)
}

/// Quantity cells may carry thousands separators or kg suffixes.
pub fn parse_quantity(cell: &str) -> f64 {
    let cleaned: String = cell
        .chars()
        .filter(|c| !matches!(c, ',' | 'k' | 'g' | 'K' | 'G'))
        .collect();
    cleaned.trim().parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(counterparty: &str, period: &str, value: f64, quantity: f64) -> TransactionRecord {
        TransactionRecord {
            counterparty: counterparty.to_string(),
            period: period.to_string(),
            value,
            quantity,
        }
    }

    #[test]
    fn zero_quantity_records_contribute_nothing() {
        let records = vec![rec("ACME", "2024", 1_000.0, 0.0), rec("ACME", "2024", 500.0, 100.0)];
        let stats = aggregate(&records, "2023", "2024", "ACME");
        assert_eq!(stats.eval.total_value, 500.0);
        assert_eq!(stats.eval.total_quantity, 100.0);
        assert_eq!(stats.eval.unit_prices.len(), 1);
    }

    #[test]
    fn period_match_is_substring_not_equality() {
        let records = vec![rec("ACME", "2023-07-14", 200.0, 50.0)];
        let stats = aggregate(&records, "2023", "2024", "ACME");
        assert_eq!(stats.base.total_quantity, 50.0);
        assert_eq!(stats.eval.total_quantity, 0.0);
    }

    #[test]
    fn target_rows_accumulate_into_both_scopes() {
        let records = vec![
            rec("ACME", "2024", 420.0, 100.0),
            rec("Other", "2024", 450.0, 100.0),
        ];
        let stats = aggregate(&records, "2023", "2024", "ACME");
        assert_eq!(stats.eval.total_value, 870.0);
        assert_eq!(stats.target_eval.total_value, 420.0);
        assert!(stats.target_base.unit_prices.is_empty());
    }

    #[test]
    fn money_and_quantity_scrubbing() {
        assert_eq!(parse_money("$1,234.50"), 1234.5);
        assert_eq!(parse_quantity("2,500kg"), 2500.0);
        assert_eq!(parse_quantity("75 KG"), 75.0);
        assert_eq!(parse_money("n/a"), 0.0);
    }

    #[test]
    fn spread_inputs_use_eval_period_anchors() {
        let records = vec![
            rec("ACME", "2024", 420.0, 100.0),
            rec("Other", "2024", 480.0, 100.0),
        ];
        let stats = aggregate(&records, "2023", "2024", "ACME");
        let inputs = stats.spread_inputs(Unit::Kg);
        assert_eq!(inputs.my_price, 4.2);
        assert_eq!(inputs.market_price, 4.5);
        assert_eq!(inputs.volume, 100.0);
    }

    #[test]
    fn tonne_display_rescales_prices_and_volume() {
        let records = vec![rec("ACME", "2024", 420.0, 100.0)];
        let stats = aggregate(&records, "2023", "2024", "ACME");
        let inputs = stats.spread_inputs(Unit::Mt);
        assert_eq!(inputs.my_price, 4_200.0);
        assert_eq!(inputs.volume, 0.0); // 100 kg rounds to 0 tonnes
    }

    #[test]
    fn default_periods_take_the_last_two_years() {
        let summary = DatasetSummary {
            counterparties: vec![],
            years: vec!["2021".into(), "2023".into(), "2024".into()],
            row_count: 0,
        };
        assert_eq!(
            summary.default_periods(),
            Some(("2023".to_string(), "2024".to_string()))
        );
        let one = DatasetSummary {
            counterparties: vec![],
            years: vec!["2024".into()],
            row_count: 0,
        };
        assert_eq!(one.default_periods(), None);
    }
}
