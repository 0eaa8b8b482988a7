// Export modules for library usage
pub mod advisor;
pub mod aggregate;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod engine;
pub mod io;
pub mod units;

// Re-export commonly used types
pub use crate::core::{
    CapBasis, CapPolicy, CostBreakdown, PeriodStats, PricingModel, RiskLevel, SavingsDetail,
    SavingsMethod, SavingsResult, SimulationInputs, TransactionRecord,
};

pub use crate::engine::fees::{compare_across_catalog, compute_breakdown};
pub use crate::engine::savings::{
    apply_contingent_fee, assess, Assessment, ContingentFee, SavingsStrategy, SpreadInputs,
    SpreadStrategy, ZScoreInputs, ZScoreStrategy,
};

pub use crate::aggregate::{aggregate, extract_records, scan, AggregateStats, DatasetSummary};

pub use crate::io::output::{create_writer, fmt_usd, OutputFormat, ReportWriter};
pub use crate::io::reader::{read_csv, Dataset};

pub use crate::units::{convert_price, convert_volume, Unit, UnitError, UNIT_RATIO};
