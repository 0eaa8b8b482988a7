//! Static registry of pricing models and the item-strategy guide.
//!
//! The catalog is fixed by the partnership program; it is not loaded
//! from configuration. The "OLD" entry is the no-program baseline used
//! for comparison output.

use crate::core::{PricingModel, RiskLevel};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static CATALOG: Lazy<Vec<PricingModel>> = Lazy::new(|| {
    vec![
        model(
            "OLD",
            "Legacy flat fee",
            1.0,
            0.0,
            RiskLevel::None,
            "100% fixed fee, no performance component",
        ),
        model(
            "A",
            "A. Steady",
            0.8,
            0.10,
            RiskLevel::Low,
            "Low risk: high fixed floor, small performance share",
        ),
        model(
            "B",
            "B. Balanced",
            0.6,
            0.20,
            RiskLevel::Medium,
            "Balanced split between fixed fee and performance share",
        ),
        model(
            "C",
            "C. Performance focused",
            0.3,
            0.40,
            RiskLevel::High,
            "High reward: discounted fixed fee, large performance share",
        ),
        model(
            "D",
            "D. Performance maximized",
            0.1,
            0.50,
            RiskLevel::VeryHigh,
            "Minimal fixed fee, maximal performance share",
        ),
        model(
            "E",
            "E. Prepaid fixed",
            1.0,
            0.0,
            RiskLevel::Fixed,
            "100% fixed fee paid up front, no performance fee",
        ),
    ]
});

fn model(
    id: &str,
    name: &str,
    fixed_fee_ratio: f64,
    contingent_fee_ratio: f64,
    risk: RiskLevel,
    description: &str,
) -> PricingModel {
    PricingModel {
        id: id.to_string(),
        name: name.to_string(),
        fixed_fee_ratio,
        contingent_fee_ratio,
        risk,
        description: description.to_string(),
    }
}

/// All catalog models in presentation order, baseline first.
pub fn all() -> &'static [PricingModel] {
    &CATALOG
}

/// Look up a model by id, case-insensitively.
pub fn find(id: &str) -> Option<&'static PricingModel> {
    CATALOG.iter().find(|m| m.id.eq_ignore_ascii_case(id))
}

/// Volatility profile of a commodity group and the models recommended
/// for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemStrategy {
    pub id: String,
    pub label: String,
    pub recommended: Vec<String>,
    pub profile: String,
    pub rationale: String,
}

static ITEM_STRATEGIES: Lazy<Vec<ItemStrategy>> = Lazy::new(|| {
    vec![
        strategy(
            "market_linked",
            "Type A. Market-linked",
            &["C", "D"],
            "Tracks international benchmarks (CBOT and similar) with very high \
             volatility: wheat, corn, coffee.",
            "Volatility is high, so share risk and reward through a large \
             performance component (C or D).",
        ),
        strategy(
            "seasonal",
            "Type B. Seasonal",
            &["B", "C"],
            "Supply swings with the harvest calendar in a roughly sinusoidal \
             pattern: fruit concentrates, dairy.",
            "Periodic swings favor a balanced model (B) or a performance-focused \
             one (C) to capture the troughs.",
        ),
        strategy(
            "step_change",
            "Type C. Step-change",
            &["A", "E"],
            "Annual contracts hold prices flat for long stretches, then jump at \
             renewal: processed foods, sauces.",
            "Prices are stable, so a high fixed-fee model (A) or the prepaid \
             model (E) fits best.",
        ),
        strategy(
            "event_driven",
            "Type D. Event-driven",
            &["D"],
            "Stable in normal times but spikes on shocks such as disease or war: \
             pork, eggs, cooking oil.",
            "Shocks are unpredictable, so minimize the standing cost with the \
             performance-maximized model (D).",
        ),
    ]
});

fn strategy(
    id: &str,
    label: &str,
    recommended: &[&str],
    profile: &str,
    rationale: &str,
) -> ItemStrategy {
    ItemStrategy {
        id: id.to_string(),
        label: label.to_string(),
        recommended: recommended.iter().map(|s| s.to_string()).collect(),
        profile: profile.to_string(),
        rationale: rationale.to_string(),
    }
}

/// The four commodity strategy profiles in presentation order.
pub fn item_strategies() -> &'static [ItemStrategy] {
    &ITEM_STRATEGIES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_six_models_with_baseline() {
        assert_eq!(all().len(), 6);
        let baseline = find("OLD").unwrap();
        assert_eq!(baseline.fixed_fee_ratio, 1.0);
        assert_eq!(baseline.contingent_fee_ratio, 0.0);
    }

    #[test]
    fn ratios_stay_in_unit_interval() {
        for m in all() {
            assert!((0.0..=1.0).contains(&m.fixed_fee_ratio), "{}", m.id);
            assert!((0.0..=1.0).contains(&m.contingent_fee_ratio), "{}", m.id);
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(find("c").unwrap().id, "C");
        assert!(find("Z").is_none());
    }

    #[test]
    fn every_recommendation_names_a_catalog_model() {
        for s in item_strategies() {
            for id in &s.recommended {
                assert!(find(id).is_some(), "{} recommends unknown {}", s.id, id);
            }
        }
    }
}
