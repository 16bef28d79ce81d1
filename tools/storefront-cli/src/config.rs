//! CLI configuration.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use storefront_engine::checkout::CheckoutPolicy;
use storefront_engine::countdown::CountdownConfig;
use storefront_engine::money::Currency;
use storefront_observability::LoggingConfig;

/// Config file names, in lookup order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Storefront configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Snapshot storage.
    #[serde(default)]
    pub store: StoreConfig,

    /// Product and event sources.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Checkout rules.
    #[serde(default)]
    pub checkout: CheckoutPolicy,

    /// Countdown timer.
    #[serde(default)]
    pub countdown: CountdownSection,

    /// Log level and format.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Cart currency.
    #[serde(default)]
    pub currency: CurrencyConfig,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// The configured cart currency.
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.currency.code)
            .ok_or_else(|| anyhow!("Unsupported currency code: {}", self.currency.code))
    }

    /// Timer settings, validated.
    pub fn countdown_config(&self) -> Result<CountdownConfig> {
        CountdownConfig::from_millis(self.countdown.tick_interval_ms)
            .context("Invalid [countdown] section")
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// `[store]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding cart and wishlist snapshots.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Fixed session id. A random one is generated and remembered otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
}

fn default_data_dir() -> String {
    ".storefront/data".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            session: None,
        }
    }
}

/// `[catalog]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON array of products.
    #[serde(default = "default_products")]
    pub products: String,

    /// JSON array of timed events.
    #[serde(default = "default_events")]
    pub events: String,

    /// JSON-lines file that receives submitted orders.
    #[serde(default = "default_orders")]
    pub orders: String,
}

fn default_products() -> String {
    "products.json".to_string()
}

fn default_events() -> String {
    "events.json".to_string()
}

fn default_orders() -> String {
    ".storefront/orders.jsonl".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            products: default_products(),
            events: default_events(),
            orders: default_orders(),
        }
    }
}

/// `[countdown]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownSection {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

fn default_tick_interval_ms() -> u64 {
    1000
}

impl Default for CountdownSection {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// `[currency]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    #[serde(default = "default_currency_code")]
    pub code: String,
}

fn default_currency_code() -> String {
    "USD".to_string()
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            code: default_currency_code(),
        }
    }
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    r#"# Storefront configuration

[store]
data_dir = ".storefront/data"
# session = "sess_fixed"

[catalog]
products = "products.json"
events = "events.json"
orders = ".storefront/orders.jsonl"

[checkout]
allow_empty_cart = false

[countdown]
tick_interval_ms = 1000

[logging]
level = "info"
format = "human"

[currency]
code = "USD"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_observability::{LogFormat, LogLevel};

    #[test]
    fn test_default_config_parses() {
        let config: StorefrontConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.store.data_dir, ".storefront/data");
        assert!(!config.checkout.allow_empty_cart);
        assert_eq!(config.countdown.tick_interval_ms, 1000);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.logging.format, LogFormat::Human);
        assert_eq!(config.currency().unwrap(), Currency::USD);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: StorefrontConfig = toml::from_str("").unwrap();
        assert_eq!(config.catalog.products, "products.json");
        assert!(config.countdown_config().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let config: StorefrontConfig =
            toml::from_str("[countdown]\ntick_interval_ms = 5000\n[currency]\ncode = \"XYZ\"").unwrap();
        assert!(config.countdown_config().is_err());
        assert!(config.currency().is_err());
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.json");

        let mut config = StorefrontConfig::default();
        config.checkout.allow_empty_cart = true;
        config.save(&path).unwrap();

        let loaded = StorefrontConfig::load(&path).unwrap();
        assert!(loaded.checkout.allow_empty_cart);
    }
}
