//! Forecast-side fee computation: one pricing model plus simulation
//! inputs in, a full cost breakdown out.
//!
//! Inputs are not validated here. Negative prices or savings propagate
//! arithmetically; rejecting them is the caller's concern.

use crate::catalog;
use crate::core::{CapPolicy, CostBreakdown, PricingModel, SimulationInputs};

/// Apply the cap to a raw contingent fee. `None` means uncapped.
fn apply_cap(raw: f64, cap_amount: Option<f64>) -> (f64, bool) {
    match cap_amount {
        Some(cap) if raw > cap => (cap, true),
        _ => (raw, false),
    }
}

/// Compute the full cost breakdown for one model under one forecast.
pub fn compute_breakdown(
    model: &PricingModel,
    inputs: &SimulationInputs,
    cap_policy: &CapPolicy,
) -> CostBreakdown {
    let fixed_fee = inputs.standard_contract_price * model.fixed_fee_ratio;
    let discount_amount = inputs.standard_contract_price - fixed_fee;
    let raw_contingent_fee = inputs.estimated_savings * model.contingent_fee_ratio;

    // The cap is based on the standard contract price by default so
    // that low-fixed-fee models are not strangled by a near-zero cap.
    let cap_amount = cap_policy.cap_amount(inputs.standard_contract_price, fixed_fee);
    let (capped_contingent_fee, was_capped) = apply_cap(raw_contingent_fee, cap_amount);

    let total_cost = fixed_fee + capped_contingent_fee;
    let net_benefit = inputs.estimated_savings - capped_contingent_fee;
    let roi_percent = if total_cost > 0.0 {
        (inputs.estimated_savings - total_cost) / total_cost * 100.0
    } else {
        0.0
    };

    CostBreakdown {
        model_id: model.id.clone(),
        fixed_fee,
        discount_amount,
        raw_contingent_fee,
        capped_contingent_fee,
        was_capped,
        cap_amount,
        total_cost,
        net_benefit,
        roi_percent,
    }
}

/// One breakdown per catalog model, each computed independently under
/// the same inputs and capping rule.
pub fn compare_across_catalog(
    inputs: &SimulationInputs,
    cap_policy: &CapPolicy,
) -> Vec<CostBreakdown> {
    catalog::all()
        .iter()
        .map(|model| compute_breakdown(model, inputs, cap_policy))
        .collect()
}
