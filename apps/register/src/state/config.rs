//! # Configuration State
//!
//! Stores register configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TILL_*`, e.g. `TILL_AUTHORITY_URL`)
//! 2. Config file (`$TILL_CONFIG`, or `till.toml` in the working directory)
//! 3. Defaults (this file)
//!
//! `TILL_BUSINESS_ADDRESS` is a comma-separated list of address lines.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use till_authority::AuthorityConfig;
use till_core::receipt::format_amount;
use till_core::{BusinessIdentity, Locale, Money, ReceiptStyle};
use till_db::DbConfig;

/// Points at an explicit config file. When set, the file must exist.
pub const CONFIG_PATH_VAR: &str = "TILL_CONFIG";

const ENV_PREFIX: &str = "TILL";

/// Register configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Shop name (first line of every receipt)
    pub business_name: String,

    /// Address lines under the shop name
    pub business_address: Vec<String>,

    pub business_phone: String,

    /// Printed after every amount, e.g. `7.00 S`
    pub currency_symbol: String,

    /// Inventory authority API root
    pub authority_url: String,

    /// Whole-request timeout for authority calls
    pub request_timeout_secs: u64,

    /// SQLite file holding the local history blob
    pub database_path: PathBuf,

    /// UI language at startup
    pub default_locale: Locale,
}

impl Default for ConfigState {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Business: "Aiham caraj", Barta'a
    /// - Currency: `S`
    /// - Authority: `http://localhost:5000/api`, 10s timeout
    /// - Database: platform data dir (`till.db`)
    fn default() -> Self {
        let business = BusinessIdentity::default();
        let authority = AuthorityConfig::default();

        ConfigState {
            business_name: business.name,
            business_address: business.address_lines,
            business_phone: business.phone,
            currency_symbol: "S".to_string(),
            authority_url: authority.base_url,
            request_timeout_secs: authority.request_timeout.as_secs(),
            database_path: default_database_path(),
            default_locale: Locale::default(),
        }
    }
}

/// `<data dir>/till.db`, or `./till.db` when the platform has no home dir.
fn default_database_path() -> PathBuf {
    ProjectDirs::from("com", "till", "pos")
        .map(|dirs| dirs.data_dir().join("till.db"))
        .unwrap_or_else(|| PathBuf::from("till.db"))
}

impl ConfigState {
    /// Loads configuration from the file and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_VAR).ok();
        let file = match &path {
            Some(path) => File::with_name(path).required(true),
            None => File::with_name("till").required(false),
        };

        Self::build(Config::builder().add_source(file), None)
    }

    /// Loads configuration from TOML text and an explicit variable map.
    ///
    /// Same layering as [`ConfigState::load`] without touching the process.
    pub fn from_sources(
        toml: Option<&str>,
        env: Map<String, String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(toml) = toml {
            builder = builder.add_source(File::from_str(toml, FileFormat::Toml));
        }

        Self::build(builder, Some(env))
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("business_address")
            .try_parsing(true)
            .source(env);

        builder
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(700)), "7.00 S");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        format_amount(amount, &self.currency_symbol)
    }

    pub fn business(&self) -> BusinessIdentity {
        BusinessIdentity {
            name: self.business_name.clone(),
            address_lines: self.business_address.clone(),
            phone: self.business_phone.clone(),
        }
    }

    pub fn receipt_style(&self, locale: Locale) -> ReceiptStyle {
        ReceiptStyle {
            business: self.business(),
            locale,
            currency_symbol: self.currency_symbol.clone(),
        }
    }

    pub fn authority_config(&self) -> AuthorityConfig {
        AuthorityConfig::new(self.authority_url.clone())
            .request_timeout(Duration::from_secs(self.request_timeout_secs))
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = ConfigState::from_sources(None, Map::new()).unwrap();

        assert_eq!(config.business_name, "Aiham caraj");
        assert_eq!(config.currency_symbol, "S");
        assert_eq!(config.authority_url, "http://localhost:5000/api");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.default_locale, Locale::En);
    }

    #[test]
    fn test_file_then_env() {
        let toml = r#"
            business_name = "Corner Shop"
            currency_symbol = "ILS"
            request_timeout_secs = 3
        "#;
        let config = ConfigState::from_sources(
            Some(toml),
            env(&[
                ("TILL_CURRENCY_SYMBOL", "$"),
                ("TILL_DEFAULT_LOCALE", "he"),
                ("TILL_BUSINESS_ADDRESS", "1 Main St,Haifa"),
            ]),
        )
        .unwrap();

        assert_eq!(config.business_name, "Corner Shop");
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.default_locale, Locale::He);
        assert_eq!(config.business_address, vec!["1 Main St", "Haifa"]);
    }

    #[test]
    fn test_derived_configs() {
        let config = ConfigState::from_sources(
            None,
            env(&[
                ("TILL_AUTHORITY_URL", "http://10.0.0.2:5000/api/"),
                ("TILL_REQUEST_TIMEOUT_SECS", "4"),
            ]),
        )
        .unwrap();

        let authority = config.authority_config();
        assert_eq!(authority.url("/stock"), "http://10.0.0.2:5000/api/stock");
        assert_eq!(authority.request_timeout, Duration::from_secs(4));

        let style = config.receipt_style(Locale::Ar);
        assert_eq!(style.locale, Locale::Ar);
        assert_eq!(style.business.phone, "052-634-3989");
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(700)), "7.00 S");
        assert_eq!(config.format_currency(Money::zero()), "0.00 S");
    }
}
