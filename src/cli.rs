use crate::core::SavingsMethod;
use crate::io::output::OutputFormat;
use crate::units::Unit;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "feesim")]
#[command(about = "Partnership fee-model simulator and savings validator", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Forecast the cost breakdown for one pricing model
    Simulate {
        /// Standard contract price (defaults from feesim.toml)
        #[arg(long)]
        price: Option<f64>,

        /// Estimated annual savings
        #[arg(long)]
        savings: Option<f64>,

        /// Pricing model id (OLD, A-E)
        #[arg(short, long)]
        model: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare the cost breakdown across every catalog model
    Compare {
        /// Standard contract price (defaults from feesim.toml)
        #[arg(long)]
        price: Option<f64>,

        /// Estimated annual savings
        #[arg(long)]
        savings: Option<f64>,

        /// Model to highlight as selected
        #[arg(short, long)]
        model: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a pricing model against a historical transaction dataset
    Analyze {
        /// CSV dataset of historical transactions
        dataset: PathBuf,

        /// Counterparty to attribute savings to
        #[arg(short, long)]
        counterparty: String,

        /// Base (reference) year; defaults to the second-newest year
        #[arg(long)]
        base_year: Option<String>,

        /// Evaluation year; defaults to the newest year in the dataset
        #[arg(long)]
        eval_year: Option<String>,

        /// Savings-measurement methodology
        #[arg(long, value_enum, default_value = "standard")]
        method: SavingsMethod,

        /// Display unit for prices and volumes
        #[arg(short, long, value_enum, default_value = "kg")]
        unit: Unit,

        /// Pricing model id (defaults from feesim.toml)
        #[arg(short, long)]
        model: Option<String>,

        /// Standard contract price (defaults from feesim.toml)
        #[arg(long)]
        price: Option<f64>,

        /// Emit the AI proposal prompt built from the results
        #[arg(long)]
        show_prompt: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the pricing-model catalog and the item-strategy guide
    Models,

    /// Write a default feesim.toml to the current directory
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
