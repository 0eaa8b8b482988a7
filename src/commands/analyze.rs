use crate::advisor::{proposal_prompt, ProposalFigures};
use crate::aggregate::{self, columns::ColumnMap};
use crate::config;
use crate::core::SavingsMethod;
use crate::engine::savings::{assess, SavingsStrategy, SpreadStrategy, ZScoreStrategy};
use crate::io::output::{create_writer, fmt_usd, AnalysisReport, OutputFormat};
use crate::io::reader::read_csv;
use crate::units::Unit;
use anyhow::{bail, Result};
use chrono::Utc;
use std::path::PathBuf;

use super::simulate::{resolve_inputs, resolve_model};

#[derive(Debug)]
pub struct AnalyzeConfig {
    pub dataset: PathBuf,
    pub counterparty: String,
    pub base_year: Option<String>,
    pub eval_year: Option<String>,
    pub method: SavingsMethod,
    pub unit: Unit,
    pub model: Option<String>,
    pub price: Option<f64>,
    pub show_prompt: bool,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

pub fn analyze_dataset(cfg: AnalyzeConfig) -> Result<()> {
    let app_config = config::get_config();
    let dataset = read_csv(&cfg.dataset)?;
    let map = ColumnMap::resolve(&dataset.headers, &app_config.columns)?;
    let summary = aggregate::scan(&dataset, &map);

    let (base_year, eval_year) = match (cfg.base_year, cfg.eval_year) {
        (Some(base), Some(eval)) => (base, eval),
        (base, eval) => {
            let Some((default_base, default_eval)) = summary.default_periods() else {
                bail!(
                    "dataset holds {} distinct year(s); pass --base-year and --eval-year \
                     or provide data covering at least two years",
                    summary.years.len()
                );
            };
            (base.unwrap_or(default_base), eval.unwrap_or(default_eval))
        }
    };

    if !summary.counterparties.iter().any(|c| c == &cfg.counterparty) {
        log::warn!(
            "counterparty '{}' not found in dataset; statistics will be zero",
            cfg.counterparty
        );
    }

    let records = aggregate::extract_records(&dataset, &map);
    let stats = aggregate::aggregate(&records, &base_year, &eval_year, &cfg.counterparty);

    let savings = match cfg.method {
        SavingsMethod::Standard => SpreadStrategy {
            inputs: stats.spread_inputs(cfg.unit),
        }
        .compute(),
        SavingsMethod::ZScore => ZScoreStrategy {
            inputs: stats.zscore_inputs(cfg.unit),
        }
        .compute(),
    };

    let model = resolve_model(cfg.model.as_deref())?;
    let inputs = resolve_inputs(cfg.price, None);
    let cap_policy = app_config.cap_policy();
    let assessment = assess(model, inputs.standard_contract_price, &savings, &cap_policy);

    let report = AnalysisReport {
        generated_at: Utc::now(),
        model: model.clone(),
        method: cfg.method,
        counterparty: cfg.counterparty,
        base_year,
        eval_year,
        unit: cfg.unit,
        row_count: summary.row_count,
        savings,
        assessment: assessment.clone(),
    };
    let mut writer = create_writer(cfg.format, cfg.output.as_deref())?;
    writer.write_analysis(&report)?;

    if cfg.show_prompt {
        let prompt = proposal_prompt(&ProposalFigures {
            model_name: model.name.clone(),
            fixed_fee: fmt_usd(assessment.fixed_fee),
            recognized_saving: fmt_usd(assessment.recognized_saving),
            contingent_fee: fmt_usd(assessment.contingent_fee.capped),
            total_cost: fmt_usd(assessment.total_cost),
            method: report.method.to_string(),
        });
        println!("\n--- proposal prompt ---\n{prompt}");
    }
    Ok(())
}
