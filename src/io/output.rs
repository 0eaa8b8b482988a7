//! Report writers for the three CLI views (simulation, catalog
//! comparison, dataset analysis) plus the currency formatting contract:
//! whole US dollars with comma grouping.

use crate::core::{CostBreakdown, PricingModel, SavingsDetail, SavingsMethod, SavingsResult,
    SimulationInputs};
use crate::engine::savings::Assessment;
use crate::units::Unit;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::*;
use comfy_table::{presets::UTF8_FULL, Table};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
    Markdown,
}

/// Forecast for one pricing model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub generated_at: DateTime<Utc>,
    pub model: PricingModel,
    pub inputs: SimulationInputs,
    pub breakdown: CostBreakdown,
}

/// Side-by-side forecast across the whole catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub generated_at: DateTime<Utc>,
    pub inputs: SimulationInputs,
    pub selected_model: String,
    pub entries: Vec<CostBreakdown>,
}

/// Savings attribution over a historical dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub model: PricingModel,
    pub method: SavingsMethod,
    pub counterparty: String,
    pub base_year: String,
    pub eval_year: String,
    pub unit: Unit,
    pub row_count: usize,
    pub savings: SavingsResult,
    pub assessment: Assessment,
}

pub trait ReportWriter {
    fn write_simulation(&mut self, report: &SimulationReport) -> Result<()>;
    fn write_comparison(&mut self, report: &ComparisonReport) -> Result<()>;
    fn write_analysis(&mut self, report: &AnalysisReport) -> Result<()>;
}

/// Format a monetary amount as whole US dollars with comma grouping,
/// e.g. `$1,234` and `-$1,234`. Halves round away from zero.
pub fn fmt_usd(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

pub fn create_writer(format: OutputFormat, output: Option<&Path>) -> Result<Box<dyn ReportWriter>> {
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(
            fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };
    Ok(match format {
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(sink)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(sink)),
    })
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> ReportWriter for JsonWriter<W> {
    fn write_simulation(&mut self, report: &SimulationReport) -> Result<()> {
        self.write_json(report)
    }

    fn write_comparison(&mut self, report: &ComparisonReport) -> Result<()> {
        self.write_json(report)
    }

    fn write_analysis(&mut self, report: &AnalysisReport) -> Result<()> {
        self.write_json(report)
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, title: &str, generated_at: &DateTime<Utc>) -> Result<()> {
        writeln!(self.writer, "# {title}")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> ReportWriter for MarkdownWriter<W> {
    fn write_simulation(&mut self, report: &SimulationReport) -> Result<()> {
        self.write_header("Fee Simulation", &report.generated_at)?;
        writeln!(self.writer, "Model: **{}**", report.model.name)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Item | Amount |")?;
        writeln!(self.writer, "|------|--------|")?;
        let b = &report.breakdown;
        writeln!(
            self.writer,
            "| Standard contract price | {} |",
            fmt_usd(report.inputs.standard_contract_price)
        )?;
        writeln!(
            self.writer,
            "| Estimated savings | {} |",
            fmt_usd(report.inputs.estimated_savings)
        )?;
        writeln!(self.writer, "| Fixed fee | {} |", fmt_usd(b.fixed_fee))?;
        writeln!(
            self.writer,
            "| Discount vs standard | {} |",
            fmt_usd(b.discount_amount)
        )?;
        writeln!(
            self.writer,
            "| Contingent fee | {}{} |",
            fmt_usd(b.capped_contingent_fee),
            if b.was_capped { " (capped)" } else { "" }
        )?;
        if let Some(cap) = b.cap_amount {
            writeln!(self.writer, "| Fee cap | {} |", fmt_usd(cap))?;
        }
        writeln!(self.writer, "| Total cost | {} |", fmt_usd(b.total_cost))?;
        writeln!(self.writer, "| Net benefit | {} |", fmt_usd(b.net_benefit))?;
        writeln!(self.writer, "| Client ROI | {:.1}% |", b.roi_percent)?;
        Ok(())
    }

    fn write_comparison(&mut self, report: &ComparisonReport) -> Result<()> {
        self.write_header("Catalog Comparison", &report.generated_at)?;
        writeln!(
            self.writer,
            "| Model | Fixed fee | Contingent fee | Total cost | Capped |"
        )?;
        writeln!(self.writer, "|-------|-----------|----------------|------------|--------|")?;
        for entry in &report.entries {
            let marker = if entry.model_id == report.selected_model {
                " (selected)"
            } else {
                ""
            };
            writeln!(
                self.writer,
                "| {}{} | {} | {} | {} | {} |",
                entry.model_id,
                marker,
                fmt_usd(entry.fixed_fee),
                fmt_usd(entry.capped_contingent_fee),
                fmt_usd(entry.total_cost),
                if entry.was_capped { "yes" } else { "no" }
            )?;
        }
        Ok(())
    }

    fn write_analysis(&mut self, report: &AnalysisReport) -> Result<()> {
        self.write_header("Partnership Validation", &report.generated_at)?;
        writeln!(
            self.writer,
            "Counterparty **{}**, {} vs {}, {} rows, unit {}.",
            report.counterparty,
            report.base_year,
            report.eval_year,
            report.row_count,
            report.unit
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Method: **{}**", report.method)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Item | Amount |")?;
        writeln!(self.writer, "|------|--------|")?;
        writeln!(
            self.writer,
            "| Recognized savings | {} |",
            fmt_usd(report.savings.total_saving)
        )?;
        writeln!(
            self.writer,
            "| Fixed fee | {} |",
            fmt_usd(report.assessment.fixed_fee)
        )?;
        writeln!(
            self.writer,
            "| Contingent fee | {}{} |",
            fmt_usd(report.assessment.contingent_fee.capped),
            if report.assessment.contingent_fee.was_capped {
                " (capped)"
            } else {
                ""
            }
        )?;
        writeln!(
            self.writer,
            "| Total cost | {} |",
            fmt_usd(report.assessment.total_cost)
        )?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for TerminalWriter<W> {
    fn write_simulation(&mut self, report: &SimulationReport) -> Result<()> {
        let b = &report.breakdown;
        writeln!(
            self.writer,
            "{} {}",
            "Simulation for".bold(),
            report.model.name.blue().bold()
        )?;
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Item", "Amount"]);
        table.add_row(vec![
            "Standard contract price".to_string(),
            fmt_usd(report.inputs.standard_contract_price),
        ]);
        table.add_row(vec![
            "Estimated savings".to_string(),
            fmt_usd(report.inputs.estimated_savings),
        ]);
        table.add_row(vec!["Fixed fee".to_string(), fmt_usd(b.fixed_fee)]);
        table.add_row(vec![
            "Discount vs standard".to_string(),
            fmt_usd(b.discount_amount),
        ]);
        let fee_label = if b.was_capped {
            format!("{} {}", fmt_usd(b.capped_contingent_fee), "CAP".yellow().bold())
        } else {
            fmt_usd(b.capped_contingent_fee)
        };
        table.add_row(vec!["Contingent fee".to_string(), fee_label]);
        if let Some(cap) = b.cap_amount {
            table.add_row(vec!["Fee cap".to_string(), fmt_usd(cap)]);
        }
        table.add_row(vec!["Total cost".to_string(), fmt_usd(b.total_cost)]);
        table.add_row(vec!["Net benefit".to_string(), fmt_usd(b.net_benefit)]);
        table.add_row(vec![
            "Client ROI".to_string(),
            format!("{:.1}%", b.roi_percent),
        ]);
        writeln!(self.writer, "{table}")?;
        Ok(())
    }

    fn write_comparison(&mut self, report: &ComparisonReport) -> Result<()> {
        writeln!(
            self.writer,
            "{} (savings {})",
            "Catalog comparison".bold(),
            fmt_usd(report.inputs.estimated_savings)
        )?;
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            "Model",
            "Fixed fee",
            "Contingent fee",
            "Total cost",
            "Capped",
        ]);
        for entry in &report.entries {
            let id = if entry.model_id == report.selected_model {
                format!("{} *", entry.model_id)
            } else {
                entry.model_id.clone()
            };
            table.add_row(vec![
                id,
                fmt_usd(entry.fixed_fee),
                fmt_usd(entry.capped_contingent_fee),
                fmt_usd(entry.total_cost),
                if entry.was_capped { "yes" } else { "no" }.to_string(),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer, "* currently selected model")?;
        Ok(())
    }

    fn write_analysis(&mut self, report: &AnalysisReport) -> Result<()> {
        writeln!(
            self.writer,
            "{} — {} vs {}, counterparty {}, {} rows",
            "Partnership validation".bold(),
            report.base_year,
            report.eval_year,
            report.counterparty.blue(),
            report.row_count
        )?;
        match &report.savings.detail {
            SavingsDetail::Spread {
                my_price,
                market_price,
                spread,
            } => {
                writeln!(
                    self.writer,
                    "Standard method: my {my_price:.2} vs market {market_price:.2} \
                     ({unit}), spread {spread:.2}",
                    unit = report.unit
                )?;
            }
            SavingsDetail::ZScore {
                z_base,
                z_eval,
                delta_z,
            } => {
                writeln!(
                    self.writer,
                    "Z-score method: base {z_base:+.2}σ, eval {z_eval:+.2}σ, \
                     improvement {delta_z:+.2}σ"
                )?;
            }
        }
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Item", "Amount"]);
        table.add_row(vec![
            format!("Recognized savings ({})", report.method),
            fmt_usd(report.savings.total_saving),
        ]);
        table.add_row(vec![
            "Fixed fee".to_string(),
            fmt_usd(report.assessment.fixed_fee),
        ]);
        let fee = &report.assessment.contingent_fee;
        let fee_label = if fee.was_capped {
            format!("{} {}", fmt_usd(fee.capped), "CAP".yellow().bold())
        } else {
            fmt_usd(fee.capped)
        };
        table.add_row(vec!["Contingent fee".to_string(), fee_label]);
        table.add_row(vec![
            "Total cost".to_string(),
            fmt_usd(report.assessment.total_cost),
        ]);
        writeln!(self.writer, "{table}")?;
        Ok(())
    }
}
