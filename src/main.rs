use anyhow::Result;
use clap::Parser;
use feesim::cli::{Cli, Commands};
use feesim::commands::{
    analyze_dataset, compare_models, init_config, list_models, simulate_model, AnalyzeConfig,
    SimulateConfig,
};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            price,
            savings,
            model,
            format,
            output,
        } => simulate_model(SimulateConfig {
            price,
            savings,
            model,
            format,
            output,
        }),
        Commands::Compare {
            price,
            savings,
            model,
            format,
            output,
        } => compare_models(SimulateConfig {
            price,
            savings,
            model,
            format,
            output,
        }),
        Commands::Analyze {
            dataset,
            counterparty,
            base_year,
            eval_year,
            method,
            unit,
            model,
            price,
            show_prompt,
            format,
            output,
        } => analyze_dataset(AnalyzeConfig {
            dataset,
            counterparty,
            base_year,
            eval_year,
            method,
            unit,
            model,
            price,
            show_prompt,
            format,
            output,
        }),
        Commands::Models => list_models(),
        Commands::Init { force } => init_config(force),
    }
}
