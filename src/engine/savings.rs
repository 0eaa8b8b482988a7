//! Savings attribution: turn realized or assumed price data into
//! recognized savings under one of two methodologies, then route the
//! result through the same contingent-fee capping used for forecasts.

use crate::core::{CapPolicy, PricingModel, SavingsDetail, SavingsMethod, SavingsResult};
use serde::{Deserialize, Serialize};

/// Inputs for the direct-spread methodology: a single evaluation point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpreadInputs {
    pub my_price: f64,
    pub market_price: f64,
    pub volume: f64,
}

/// Inputs for the z-score methodology: distribution parameters for the
/// base and evaluation periods plus the counterparty's price in each.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ZScoreInputs {
    pub base_mean: f64,
    pub base_std: f64,
    pub base_my_price: f64,
    pub eval_mean: f64,
    pub eval_std: f64,
    pub eval_my_price: f64,
    pub volume: f64,
}

/// One savings-measurement methodology. Implementations are pure; the
/// same inputs always produce the same result.
pub trait SavingsStrategy {
    fn method(&self) -> SavingsMethod;
    fn compute(&self) -> SavingsResult;
}

/// Direct spread: pay for the gap between the market price and the
/// counterparty's own price. A counterparty already pricing below
/// market never produces negative recognized savings.
#[derive(Debug, Clone, Copy)]
pub struct SpreadStrategy {
    pub inputs: SpreadInputs,
}

impl SavingsStrategy for SpreadStrategy {
    fn method(&self) -> SavingsMethod {
        SavingsMethod::Standard
    }

    fn compute(&self) -> SavingsResult {
        let SpreadInputs {
            my_price,
            market_price,
            volume,
        } = self.inputs;
        let spread = (market_price - my_price).max(0.0);
        SavingsResult {
            method: SavingsMethod::Standard,
            unit_saving: spread,
            total_saving: spread * volume,
            detail: SavingsDetail::Spread {
                my_price,
                market_price,
                spread,
            },
        }
    }
}

/// Distribution-normalized attribution. Raw price deltas are not
/// comparable across periods with different volatility regimes, so
/// each period's price is expressed as a z-score first; the change in
/// relative position is then rescaled by the evaluation period's
/// volatility to get a dollar-per-unit figure.
#[derive(Debug, Clone, Copy)]
pub struct ZScoreStrategy {
    pub inputs: ZScoreInputs,
}

impl ZScoreStrategy {
    /// A std of 0 contributes a z of 0 rather than a non-finite value.
    /// PeriodStats already floors its std, but hand-entered inputs can
    /// still carry a zero.
    fn z(price: f64, mean: f64, std: f64) -> f64 {
        if std != 0.0 {
            (price - mean) / std
        } else {
            0.0
        }
    }
}

impl SavingsStrategy for ZScoreStrategy {
    fn method(&self) -> SavingsMethod {
        SavingsMethod::ZScore
    }

    fn compute(&self) -> SavingsResult {
        let i = self.inputs;
        let z_base = Self::z(i.base_my_price, i.base_mean, i.base_std);
        let z_eval = Self::z(i.eval_my_price, i.eval_mean, i.eval_std);
        // delta_z > 0 means the counterparty's relative position improved.
        let delta_z = z_base - z_eval;
        let unit_saving = delta_z * i.eval_std;
        // A regression in relative position never yields negative
        // recognized savings; the unit figure stays unfloored.
        let total_saving = (unit_saving * i.volume).max(0.0);
        SavingsResult {
            method: SavingsMethod::ZScore,
            unit_saving,
            total_saving,
            detail: SavingsDetail::ZScore {
                z_base,
                z_eval,
                delta_z,
            },
        }
    }
}

/// A contingent fee after the cap rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContingentFee {
    pub raw: f64,
    pub capped: f64,
    pub was_capped: bool,
    pub cap_amount: Option<f64>,
}

/// The contingent-fee formula shared with the forecast engine:
/// ratio x recognized savings, capped per the policy.
pub fn apply_contingent_fee(
    total_saving: f64,
    model: &PricingModel,
    standard_contract_price: f64,
    cap_policy: &CapPolicy,
) -> ContingentFee {
    let fixed_fee = standard_contract_price * model.fixed_fee_ratio;
    let raw = total_saving * model.contingent_fee_ratio;
    let cap_amount = cap_policy.cap_amount(standard_contract_price, fixed_fee);
    let (capped, was_capped) = match cap_amount {
        Some(cap) if raw > cap => (cap, true),
        _ => (raw, false),
    };
    ContingentFee {
        raw,
        capped,
        was_capped,
        cap_amount,
    }
}

/// Final profitability picture for one attribution run: the locked-in
/// fixed fee plus the capped contingent fee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub model_id: String,
    pub method: SavingsMethod,
    pub fixed_fee: f64,
    pub recognized_saving: f64,
    pub contingent_fee: ContingentFee,
    pub total_cost: f64,
}

/// Combine a savings result with a pricing model into the final
/// assessment.
pub fn assess(
    model: &PricingModel,
    standard_contract_price: f64,
    savings: &SavingsResult,
    cap_policy: &CapPolicy,
) -> Assessment {
    let fixed_fee = standard_contract_price * model.fixed_fee_ratio;
    let contingent_fee =
        apply_contingent_fee(savings.total_saving, model, standard_contract_price, cap_policy);
    Assessment {
        model_id: model.id.clone(),
        method: savings.method,
        fixed_fee,
        recognized_saving: savings.total_saving,
        total_cost: fixed_fee + contingent_fee.capped,
        contingent_fee,
    }
}
