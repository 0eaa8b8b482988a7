//! CLI command implementations.
//!
//! Each submodule owns one subcommand: configuration struct in, report
//! written to the selected sink. All computation lives in the library;
//! these modules only wire inputs to the engines and writers.

pub mod analyze;
pub mod init;
pub mod models;
pub mod simulate;

pub use analyze::{analyze_dataset, AnalyzeConfig};
pub use init::init_config;
pub use models::list_models;
pub use simulate::{compare_models, simulate_model, SimulateConfig};
