//! Handles settings for the CLI. Values are read, in order of precedence,
//! from command line flags, `SPLIBIZ_*` environment variables and the
//! optional `config/splibiz.toml` file.
use std::str::FromStr;

use config::{Config, Environment, File};
use ledger::{Money, SplitPolicy};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "config/splibiz.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `tracing` level for the CLI and the ledger.
    pub level: String,
    /// Balances below this are shown as settled.
    pub epsilon: String,
    /// `equal` or `largest_remainder`.
    pub split_policy: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            epsilon: "0.01".to_string(),
            split_policy: SplitPolicy::Equal.as_str().to_string(),
        }
    }
}

impl Settings {
    /// Loads the settings; a missing default file is not an error, a
    /// missing explicit one is.
    pub fn new(path: Option<&str>) -> Result<Self> {
        let file = match path {
            Some(path) => File::with_name(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_PATH).required(false),
        };
        let settings = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix("SPLIBIZ"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn epsilon(&self) -> Result<Money> {
        Decimal::from_str(self.epsilon.trim())
            .ok()
            .filter(|value| value.is_sign_positive())
            .map(Money::new)
            .ok_or_else(|| AppError::Setting {
                key: "epsilon",
                value: self.epsilon.clone(),
            })
    }

    pub fn split_policy(&self) -> Result<SplitPolicy> {
        SplitPolicy::try_from(self.split_policy.as_str()).map_err(|_| AppError::Setting {
            key: "split_policy",
            value: self.split_policy.clone(),
        })
    }
}
