//! Client configuration
//!
//! Every setting can come from a command-line flag or an environment
//! variable; a `.env` file in the working directory is loaded first.

use std::time::Duration;

use clap::Args;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::pricing::{self, SurchargeRates};

/// Backend address used when none is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Configuration values that parsed but cannot be used.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A surcharge rate was negative.
    #[error("{name} surcharge cannot be negative (got {value})")]
    NegativeSurcharge { name: &'static str, value: Decimal },

    /// A surcharge rate does not fit in minor units.
    #[error("{name} surcharge is out of range (got {value})")]
    SurchargeOutOfRange { name: &'static str, value: Decimal },
}

/// Backend and pricing settings.
#[derive(Debug, Clone, Args)]
pub struct ClientConfig {
    /// Base URL of the café backend API
    #[arg(
        long,
        env = "MATCHA_API_BASE_URL",
        default_value = DEFAULT_API_BASE_URL,
        global = true
    )]
    pub api_base_url: String,

    /// Request timeout in seconds
    #[arg(
        long,
        env = "MATCHA_TIMEOUT_SECONDS",
        default_value_t = 10_u64,
        global = true
    )]
    pub timeout_seconds: u64,

    /// Per-unit surcharge for lactose-free or almond milk
    #[arg(
        long,
        env = "MATCHA_MILK_SURCHARGE",
        default_value = "15.00",
        global = true
    )]
    pub milk_surcharge: Decimal,

    /// Per-unit surcharge for each food extra
    #[arg(
        long,
        env = "MATCHA_EXTRA_SURCHARGE",
        default_value = "20.00",
        global = true
    )]
    pub extra_surcharge: Decimal,
}

impl ClientConfig {
    /// HTTP request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Surcharge rates in the menu currency.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either rate is negative or too large.
    pub fn surcharge_rates(&self) -> Result<SurchargeRates, ConfigError> {
        let milk = rate_in_minor_units("milk", self.milk_surcharge)?;
        let extra = rate_in_minor_units("extra", self.extra_surcharge)?;

        Ok(SurchargeRates::from_minor(milk, extra))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: 10,
            milk_surcharge: pricing::major_units(pricing::DEFAULT_MILK_SURCHARGE),
            extra_surcharge: pricing::major_units(pricing::DEFAULT_EXTRA_SURCHARGE),
        }
    }
}

fn rate_in_minor_units(name: &'static str, value: Decimal) -> Result<i64, ConfigError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ConfigError::NegativeSurcharge { name, value });
    }

    pricing::minor_units(value).ok_or(ConfigError::SurchargeOutOfRange { name, value })
}

/// Log output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    #[default]
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        global = true
    )]
    pub log_format: LogFormat,
}
