//! Configuration loaded from `feesim.toml` in the working directory
//! (searched upward a few levels). Everything has a sensible default;
//! the file only needs to exist to override something.

use crate::core::{CapBasis, CapPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const CONFIG_FILE_NAME: &str = "feesim.toml";

/// Regex fragments matched case-insensitively against dataset headers
/// to assign column roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnPatterns {
    #[serde(default = "default_counterparty_pattern")]
    pub counterparty: String,

    #[serde(default = "default_period_pattern")]
    pub period: String,

    #[serde(default = "default_value_pattern")]
    pub value: String,

    #[serde(default = "default_quantity_pattern")]
    pub quantity: String,
}

impl Default for ColumnPatterns {
    fn default() -> Self {
        Self {
            counterparty: default_counterparty_pattern(),
            period: default_period_pattern(),
            value: default_value_pattern(),
            quantity: default_quantity_pattern(),
        }
    }
}

fn default_counterparty_pattern() -> String {
    "importer|buyer|company".to_string()
}

fn default_period_pattern() -> String {
    "year|date".to_string()
}

fn default_value_pattern() -> String {
    "value|amount|usd|price".to_string()
}

fn default_quantity_pattern() -> String {
    "volume|quantity|qty|kg".to_string()
}

/// Contingent-fee cap configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapConfig {
    /// Cap = basis amount x multiplier.
    #[serde(default = "default_cap_multiplier")]
    pub multiplier: f64,

    /// `standard-price` (primary variant) or `fixed-fee` (alternate
    /// variant, uncapped when the fixed fee is 0).
    #[serde(default = "default_cap_basis")]
    pub basis: CapBasis,
}

impl Default for CapConfig {
    fn default() -> Self {
        Self {
            multiplier: default_cap_multiplier(),
            basis: default_cap_basis(),
        }
    }
}

fn default_cap_multiplier() -> f64 {
    3.0
}

fn default_cap_basis() -> CapBasis {
    CapBasis::StandardPrice
}

/// Default simulation inputs when the CLI flags are omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultInputs {
    #[serde(default = "default_standard_contract_price")]
    pub standard_contract_price: f64,

    #[serde(default = "default_estimated_savings")]
    pub estimated_savings: f64,

    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for DefaultInputs {
    fn default() -> Self {
        Self {
            standard_contract_price: default_standard_contract_price(),
            estimated_savings: default_estimated_savings(),
            model: default_model(),
        }
    }
}

fn default_standard_contract_price() -> f64 {
    100_000.0
}

fn default_estimated_savings() -> f64 {
    200_000.0
}

fn default_model() -> String {
    "C".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeesimConfig {
    #[serde(default)]
    pub cap: CapConfig,

    #[serde(default)]
    pub columns: ColumnPatterns,

    #[serde(default)]
    pub defaults: DefaultInputs,
}

impl FeesimConfig {
    pub fn cap_policy(&self) -> CapPolicy {
        CapPolicy {
            multiplier: self.cap.multiplier,
            basis: self.cap.basis,
        }
    }
}

static CONFIG: OnceLock<FeesimConfig> = OnceLock::new();

fn parse_config(contents: &str) -> Result<FeesimConfig, String> {
    toml::from_str::<FeesimConfig>(contents)
        .map_err(|e| format!("Failed to parse {CONFIG_FILE_NAME}: {e}"))
}

fn try_load_from_path(path: &Path) -> Option<FeesimConfig> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Failed to read config file {}: {}", path.display(), e);
            }
            return None;
        }
    };
    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", path.display());
            Some(config)
        }
        Err(e) => {
            eprintln!("Warning: {e}. Using defaults.");
            None
        }
    }
}

fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        parent.pop().then_some(parent)
    })
    .take(max_depth)
}

/// Load configuration, searching upward from the current directory.
pub fn load_config() -> FeesimConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 5;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!("Failed to get current directory: {e}. Using default config.");
            return FeesimConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_from_path(&path))
        .unwrap_or_default()
}

/// Get the cached configuration.
pub fn get_config() -> &'static FeesimConfig {
    CONFIG.get_or_init(load_config)
}

/// Default configuration serialized as TOML, used by `feesim init`.
pub fn default_config_toml() -> String {
    toml::to_string_pretty(&FeesimConfig::default())
        .expect("default config serializes to TOML")
}
