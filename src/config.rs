use crate::error::{CestaError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_CURRENCY: &str = "R$";

/// Formatting configuration, stored as `config.json` next to the data files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Currency prefix used when formatting prices (e.g. "R$", "US$")
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Decimal places in formatted prices
    #[serde(default = "default_decimal_places")]
    pub decimal_places: usize,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_decimal_places() -> usize {
    2
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            decimal_places: 2,
        }
    }
}

impl StoreConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(CestaError::Io)?;
        let config: StoreConfig =
            serde_json::from_str(&content).map_err(CestaError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(CestaError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(CestaError::Serialization)?;
        fs::write(config_path, content).map_err(CestaError::Io)?;
        Ok(())
    }

    pub fn format_price(&self, value: f64) -> String {
        format!("{}{:.*}", self.currency, self.decimal_places, value)
    }
}
