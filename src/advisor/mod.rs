//! The text-generation collaborator: an opaque prompt-to-text seam.
//!
//! The calculation core only builds prompt strings from structured
//! figures and accepts back opaque text. Transport failures surface as
//! a fixed fallback message and never invalidate a computation.

use crate::catalog::ItemStrategy;
use crate::core::PricingModel;
use anyhow::Result;

/// Shown when the generator fails for any reason.
pub const FALLBACK_MESSAGE: &str =
    "The advisory service could not be reached. Please try again later.";

/// An opaque natural-language text generator.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Generator returning a fixed response; serves tests and offline use.
pub struct CannedGenerator {
    pub response: String,
}

impl TextGenerator for CannedGenerator {
    fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.response.clone())
    }
}

/// Structured figures for the proposal prompt. Monetary fields arrive
/// already formatted so the prompt matches what the client will see.
#[derive(Debug, Clone)]
pub struct ProposalFigures {
    pub model_name: String,
    pub fixed_fee: String,
    pub recognized_saving: String,
    pub contingent_fee: String,
    pub total_cost: String,
    pub method: String,
}

/// Prompt asking for a model recommendation given a client's situation.
pub fn strategy_prompt(client_context: &str, catalog: &[PricingModel]) -> String {
    let mut options = String::new();
    for model in catalog.iter().filter(|m| m.id != "OLD") {
        options.push_str(&format!(
            "- {}. {} (fixed {:.0}%, contingent {:.0}%)\n",
            model.id,
            model.name,
            model.fixed_fee_ratio * 100.0,
            model.contingent_fee_ratio * 100.0,
        ));
    }
    format!(
        "You are a B2B partnership expert. A client is using a fee simulator to \
         decide whether to license a trade-data solution.\n\
         Client situation: \"{client_context}\"\n\n\
         Model options:\n{options}\n\
         Recommend the single best-fitting model and lay out its key selling \
         points in about five concise, well-structured sentences."
    )
}

/// Prompt for an executive summary of a finished simulation.
pub fn proposal_prompt(figures: &ProposalFigures) -> String {
    format!(
        "As a sales consultant, write an executive summary for a proposal based \
         on this data:\n\
         - Model: {model}\n\
         - Fixed fee: {fixed}\n\
         - Recognized savings ({method}): {savings}\n\
         - Contingent fee: {fee}\n\
         - Total cost: {total}\n\n\
         Emphasize the economic upside, cite the figures, keep a courteous tone, \
         and stay within three to four sentences.",
        model = figures.model_name,
        fixed = figures.fixed_fee,
        method = figures.method,
        savings = figures.recognized_saving,
        fee = figures.contingent_fee,
        total = figures.total_cost,
    )
}

/// Run a prompt through the generator, degrading to the fallback
/// message on any error.
pub fn request_text(generator: &dyn TextGenerator, prompt: &str) -> String {
    match generator.generate(prompt) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("text generation failed: {e:#}");
            FALLBACK_MESSAGE.to_string()
        }
    }
}

/// Rule-based recommendation used when no generator is configured: the
/// item-strategy guide already names the preferred models.
pub fn offline_recommendation(strategy: &ItemStrategy, catalog: &[PricingModel]) -> String {
    let names: Vec<&str> = strategy
        .recommended
        .iter()
        .filter_map(|id| catalog.iter().find(|m| &m.id == id))
        .map(|m| m.name.as_str())
        .collect();
    format!(
        "{profile} Recommended: {names}. {rationale}",
        profile = strategy.profile,
        names = names.join(", "),
        rationale = strategy.rationale,
    )
}
