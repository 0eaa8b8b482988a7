//! The calculation core: fee computation over a forecast and savings
//! attribution over realized price data. Everything in here is pure
//! and recomputed from explicit inputs; no hidden state, no I/O.

pub mod fees;
pub mod savings;

pub use fees::{compare_across_catalog, compute_breakdown};
pub use savings::{
    apply_contingent_fee, assess, Assessment, ContingentFee, SavingsStrategy, SpreadInputs,
    SpreadStrategy, ZScoreInputs, ZScoreStrategy,
};
