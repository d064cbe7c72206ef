//! Delivery band resolution
//!
//! Maps the logical delivery slot and ISO date of a request onto the codes
//! the platform expects. Pure and side-effect free; the orchestrator calls it
//! before any runner is acquired.

use crate::utils::error::{GatewayError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical delivery slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryBand {
    /// 09:00 - 13:00
    Maniana,
    /// 13:00 - 18:00
    Tarde,
    /// 18:00 - 22:00
    Noche,
}

impl DeliveryBand {
    /// Platform band code
    pub fn code(&self) -> &'static str {
        match self {
            DeliveryBand::Maniana => "1_9_13",
            DeliveryBand::Tarde => "1_13_18",
            DeliveryBand::Noche => "1_18_22",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryBand::Maniana => "MANIANA",
            DeliveryBand::Tarde => "TARDE",
            DeliveryBand::Noche => "NOCHE",
        }
    }
}

impl FromStr for DeliveryBand {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "MANIANA" => Ok(DeliveryBand::Maniana),
            "TARDE" => Ok(DeliveryBand::Tarde),
            "NOCHE" => Ok(DeliveryBand::Noche),
            other => Err(GatewayError::invalid_band(other)),
        }
    }
}

impl fmt::Display for DeliveryBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Band and date in platform form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDelivery {
    pub band: DeliveryBand,
    pub band_code: &'static str,
    /// `YYYYMMDD`
    pub date: String,
}

/// Resolve a logical band and a `YYYY-MM-DD` date.
///
/// The band is checked first so an unknown band is always reported as such,
/// even when the date is also malformed.
pub fn resolve(band: &str, date: &str) -> Result<ResolvedDelivery> {
    let band: DeliveryBand = band.parse()?;
    let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| GatewayError::validation(format!("Fecha inválida '{}': {}", date, e)))?;

    Ok(ResolvedDelivery {
        band,
        band_code: band.code(),
        date: parsed.format("%Y%m%d").to_string(),
    })
}
