use crate::catalog;
use crate::config;
use crate::core::{PricingModel, SimulationInputs};
use crate::engine::fees::{compare_across_catalog, compute_breakdown};
use crate::io::output::{create_writer, ComparisonReport, OutputFormat, SimulationReport};
use anyhow::{bail, Result};
use chrono::Utc;
use std::path::PathBuf;

#[derive(Debug)]
pub struct SimulateConfig {
    pub price: Option<f64>,
    pub savings: Option<f64>,
    pub model: Option<String>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

/// Resolve the model id from the flag or the configured default.
pub fn resolve_model(requested: Option<&str>) -> Result<&'static PricingModel> {
    let defaults = &config::get_config().defaults;
    let id = requested.unwrap_or(&defaults.model);
    match catalog::find(id) {
        Some(model) => Ok(model),
        None => {
            let known: Vec<&str> = catalog::all().iter().map(|m| m.id.as_str()).collect();
            bail!("unknown pricing model '{}' (known: {})", id, known.join(", "))
        }
    }
}

/// Resolve simulation inputs from flags with configured fallbacks.
pub fn resolve_inputs(price: Option<f64>, savings: Option<f64>) -> SimulationInputs {
    let defaults = &config::get_config().defaults;
    SimulationInputs {
        standard_contract_price: price.unwrap_or(defaults.standard_contract_price),
        estimated_savings: savings.unwrap_or(defaults.estimated_savings),
    }
}

pub fn simulate_model(cfg: SimulateConfig) -> Result<()> {
    let model = resolve_model(cfg.model.as_deref())?;
    let inputs = resolve_inputs(cfg.price, cfg.savings);
    let cap_policy = config::get_config().cap_policy();
    log::debug!("simulating {} over {inputs:?}", model.id);

    let report = SimulationReport {
        generated_at: Utc::now(),
        model: model.clone(),
        inputs,
        breakdown: compute_breakdown(model, &inputs, &cap_policy),
    };
    let mut writer = create_writer(cfg.format, cfg.output.as_deref())?;
    writer.write_simulation(&report)
}

pub fn compare_models(cfg: SimulateConfig) -> Result<()> {
    let selected = resolve_model(cfg.model.as_deref())?;
    let inputs = resolve_inputs(cfg.price, cfg.savings);
    let cap_policy = config::get_config().cap_policy();

    let report = ComparisonReport {
        generated_at: Utc::now(),
        inputs,
        selected_model: selected.id.clone(),
        entries: compare_across_catalog(&inputs, &cap_policy),
    };
    let mut writer = create_writer(cfg.format, cfg.output.as_deref())?;
    writer.write_comparison(&report)
}
