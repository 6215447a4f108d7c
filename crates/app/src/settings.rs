//! Handles settings for the application. Configuration is read from
//! `config/roomie.toml` (or the file given with `--config`) and from
//! `ROOMIE_*` environment variables, e.g. `ROOMIE_HOUSEHOLD__CURRENCY=EUR`.
use config::{Config, Environment, File};
use engine::Currency;
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_CONFIG_PATH: &str = "config/roomie.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    /// Log level for the `roomie` and `engine` targets.
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Household {
    pub currency: Currency,
    /// JSON file holding the household expenses.
    pub expenses: String,
}

impl Default for Household {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            expenses: "expenses.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub household: Household,
}

impl Settings {
    pub fn new(path: Option<&str>) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path.unwrap_or(DEFAULT_CONFIG_PATH)).required(false))
            .add_source(environment())
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

/// `ROOMIE_<SECTION>__<KEY>` variables, e.g. `ROOMIE_APP__LEVEL=debug`.
fn environment() -> Environment {
    Environment::with_prefix("ROOMIE")
        .prefix_separator("_")
        .separator("__")
}
