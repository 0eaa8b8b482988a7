use serde::{Deserialize, Serialize};

/// Fallback standard deviation when a period has no priced records.
pub const EMPTY_STD_FALLBACK: f64 = 1.0;

/// Smallest standard deviation a period may report. The value is used
/// as a denominator in z-score normalization, so it must stay positive.
pub const MIN_STD: f64 = 0.1;

/// How risky a pricing model is for the vendor side of the deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskLevel {
    None,
    Low,
    Medium,
    High,
    VeryHigh,
    Fixed,
}

/// A named fee structure: a fixed-fee ratio applied to the standard
/// contract price plus a contingent ratio applied to recognized savings.
/// The ratios are independent levers; they are not required to sum to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingModel {
    pub id: String,
    pub name: String,
    pub fixed_fee_ratio: f64,
    pub contingent_fee_ratio: f64,
    pub risk: RiskLevel,
    pub description: String,
}

/// Forecast inputs driving the fee computation engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimulationInputs {
    pub standard_contract_price: f64,
    pub estimated_savings: f64,
}

impl Default for SimulationInputs {
    fn default() -> Self {
        Self {
            standard_contract_price: 100_000.0,
            estimated_savings: 200_000.0,
        }
    }
}

/// What the contingent-fee cap is derived from.
///
/// The two bases reflect a genuine divergence in the business policy:
/// the primary variant caps at a multiple of the standard contract
/// price, the alternate variant caps at a multiple of the model's own
/// fixed fee and treats a zero fixed fee as uncapped. Which one is
/// authoritative is a stakeholder decision, so both stay selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapBasis {
    StandardPrice,
    FixedFee,
}

/// Upper bound on the contingent fee, shared by the forecast view and
/// the realized-savings view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CapPolicy {
    pub multiplier: f64,
    pub basis: CapBasis,
}

impl Default for CapPolicy {
    fn default() -> Self {
        Self {
            multiplier: 3.0,
            basis: CapBasis::StandardPrice,
        }
    }
}

impl CapPolicy {
    /// Cap amount for one computation. `None` means uncapped, which
    /// only arises under the fixed-fee basis when the fixed fee is 0.
    pub fn cap_amount(&self, standard_contract_price: f64, fixed_fee: f64) -> Option<f64> {
        match self.basis {
            CapBasis::StandardPrice => Some(standard_contract_price * self.multiplier),
            CapBasis::FixedFee => {
                if fixed_fee == 0.0 {
                    None
                } else {
                    Some(fixed_fee * self.multiplier)
                }
            }
        }
    }
}

/// Full cost picture for one pricing model under one forecast.
/// Recomputed from scratch on every input change; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub model_id: String,
    pub fixed_fee: f64,
    /// Standard contract price minus the fixed fee.
    pub discount_amount: f64,
    pub raw_contingent_fee: f64,
    pub capped_contingent_fee: f64,
    pub was_capped: bool,
    pub cap_amount: Option<f64>,
    pub total_cost: f64,
    /// Estimated savings minus the capped contingent fee. Deliberately
    /// not floored: a negative value is a valid signal.
    pub net_benefit: f64,
    pub roi_percent: f64,
}

/// One parsed row of the historical dataset. Held for the session,
/// never mutated, replaced wholesale when a new dataset loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub counterparty: String,
    /// Free-text period label containing a 4-digit year token.
    pub period: String,
    pub value: f64,
    pub quantity: f64,
}

impl TransactionRecord {
    /// Unit price, defined only for positive quantity. Zero-quantity
    /// records are excluded from all statistics.
    pub fn unit_price(&self) -> Option<f64> {
        (self.quantity > 0.0).then(|| self.value / self.quantity)
    }
}

/// Accumulated statistics over one period, market-wide or scoped to a
/// single counterparty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeriodStats {
    pub total_value: f64,
    pub total_quantity: f64,
    pub unit_prices: Vec<f64>,
}

impl PeriodStats {
    pub fn add(&mut self, value: f64, quantity: f64, unit_price: f64) {
        self.total_value += value;
        self.total_quantity += quantity;
        self.unit_prices.push(unit_price);
    }

    /// Total value over total quantity, 0 for an empty period.
    pub fn value_weighted_mean(&self) -> f64 {
        if self.total_quantity > 0.0 {
            self.total_value / self.total_quantity
        } else {
            0.0
        }
    }

    /// Population standard deviation of per-record unit prices around
    /// the value-weighted mean. Never returns 0: an empty period yields
    /// [`EMPTY_STD_FALLBACK`], a degenerate one yields [`MIN_STD`].
    pub fn std_dev(&self) -> f64 {
        if self.unit_prices.is_empty() {
            return EMPTY_STD_FALLBACK;
        }
        let mean = self.value_weighted_mean();
        let variance = self
            .unit_prices
            .iter()
            .map(|p| (p - mean).powi(2))
            .sum::<f64>()
            / self.unit_prices.len() as f64;
        let std = variance.sqrt();
        if std == 0.0 {
            MIN_STD
        } else {
            std
        }
    }
}

/// Which savings-measurement methodology produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SavingsMethod {
    /// Direct spread between the counterparty's price and the market.
    Standard,
    /// Distribution-normalized relative-position improvement.
    ZScore,
}

impl std::fmt::Display for SavingsMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SavingsMethod::Standard => write!(f, "Standard"),
            SavingsMethod::ZScore => write!(f, "Z-Score"),
        }
    }
}

/// Method-specific intermediate figures, kept for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SavingsDetail {
    Spread {
        my_price: f64,
        market_price: f64,
        spread: f64,
    },
    ZScore {
        z_base: f64,
        z_eval: f64,
        delta_z: f64,
    },
}

/// Recognized savings under one methodology.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsResult {
    pub method: SavingsMethod,
    /// Per-unit saving, NOT floored (a regression shows as negative).
    pub unit_saving: f64,
    /// Volume-scaled saving, floored at 0 before fee application.
    pub total_saving: f64,
    pub detail: SavingsDetail,
}
