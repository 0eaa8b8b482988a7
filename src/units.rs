//! Conversion between the two measurement units used for prices and
//! volumes. Prices are inverse-scaled (a price per tonne is 1000x the
//! price per kilogram); volumes are direct-scaled.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Kilograms per metric tonne.
pub const UNIT_RATIO: f64 = 1000.0;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UnitError {
    #[error("unrecognized unit '{0}' (expected KG or MT)")]
    Unknown(String),
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Unit {
    #[default]
    Kg,
    Mt,
}

impl Unit {
    pub fn label(self) -> &'static str {
        match self {
            Unit::Kg => "KG",
            Unit::Mt => "MT",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "KG" => Ok(Unit::Kg),
            "MT" => Ok(Unit::Mt),
            other => Err(UnitError::Unknown(other.to_string())),
        }
    }
}

/// Rescale a per-unit price between unit systems.
pub fn convert_price(value: f64, from: Unit, to: Unit) -> f64 {
    match (from, to) {
        (Unit::Kg, Unit::Mt) => value * UNIT_RATIO,
        (Unit::Mt, Unit::Kg) => value / UNIT_RATIO,
        _ => value,
    }
}

/// Rescale a volume between unit systems.
pub fn convert_volume(value: f64, from: Unit, to: Unit) -> f64 {
    match (from, to) {
        (Unit::Kg, Unit::Mt) => value / UNIT_RATIO,
        (Unit::Mt, Unit::Kg) => value * UNIT_RATIO,
        _ => value,
    }
}
