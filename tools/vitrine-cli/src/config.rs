//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use vitrine_commerce::cart::CartConfig;
use vitrine_commerce::checkout::CheckoutConfig;

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["vitrine.toml", ".vitrine.toml", "vitrine.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Cart store settings.
    #[serde(default)]
    pub cart: CartConfig,

    /// Where cart records are kept.
    #[serde(default)]
    pub storage: StorageConfig,

    /// WhatsApp checkout settings.
    #[serde(default)]
    pub checkout: CheckoutSection,
}

impl CliConfig {
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

    /// Checkout settings, if a WhatsApp number is configured.
    pub fn checkout_config(&self) -> Option<CheckoutConfig> {
        let number = self.checkout.whatsapp_number.as_ref()?;
        let mut config = CheckoutConfig::new(number.clone()).with_currency(self.cart.currency);
        if let Some(greeting) = &self.checkout.greeting {
            config.greeting = greeting.clone();
        }
        Some(config)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "json")
}

/// Storage configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding cart records (default: platform data dir).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
}

/// Checkout configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSection {
    /// Store's WhatsApp number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp_number: Option<String>,

    /// Message greeting override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeting: Option<String>,
}

/// Generate a default vitrine.toml config file.
pub fn generate_default_config() -> String {
    r#"# Vitrine cart configuration

[cart]
storage_key = "vitrine-cart"
currency = "BRL"

[storage]
# data_dir = ".vitrine"

[checkout]
# whatsapp_number = "+55 11 99999-8888"
# greeting = "Olá! Gostaria de fazer o seguinte pedido:"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_commerce::Currency;

    #[test]
    fn test_default_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
        assert!(config.checkout_config().is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
[cart]
currency = "USD"

[checkout]
whatsapp_number = "+1 555 123 4567"
"#,
        )
        .unwrap();

        assert_eq!(config.cart.storage_key, "vitrine-cart");
        assert_eq!(config.cart.currency, Currency::USD);
        let checkout = config.checkout_config().unwrap();
        assert_eq!(checkout.currency, Currency::USD);
        assert_eq!(checkout.whatsapp_number, "+1 555 123 4567");
    }

    #[test]
    fn test_save_and_load_json_and_toml() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.storage.data_dir = Some("carts".to_string());
        config.checkout.greeting = Some("Oi!".to_string());

        for name in ["vitrine.toml", "vitrine.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(CliConfig::load(&path).unwrap(), config);
        }
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vitrine.toml");
        std::fs::write(&path, "[cart\n").unwrap();

        let err = CliConfig::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse TOML config"));
    }
}
