//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Company-level settings.
    pub company: CompanyConfig,
    /// Ledger posting configuration.
    pub posting: PostingConfig,
}

/// Company-level settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyConfig {
    /// Display name of the company.
    #[serde(default = "default_company_name")]
    pub name: String,
    /// Functional currency code (ISO 4217).
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
}

fn default_company_name() -> String {
    "Ledgerly".to_string()
}

fn default_base_currency() -> String {
    "USD".to_string()
}

/// Ledger posting configuration.
///
/// The sale confirmation workflow resolves these codes against the chart of
/// accounts; a code that resolves to no live account is a configuration
/// error at confirmation time.
#[derive(Debug, Clone, Deserialize)]
pub struct PostingConfig {
    /// Account code debited for cash sales.
    #[serde(default = "default_cash_account")]
    pub cash_account_code: String,
    /// Account code debited for credit sales (accounts receivable).
    #[serde(default = "default_receivable_account")]
    pub receivable_account_code: String,
    /// Account code credited with sales revenue.
    #[serde(default = "default_revenue_account")]
    pub revenue_account_code: String,
}

fn default_cash_account() -> String {
    "1000".to_string()
}

fn default_receivable_account() -> String {
    "1100".to_string()
}

fn default_revenue_account() -> String {
    "4000".to_string()
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: default_company_name(),
            base_currency: default_base_currency(),
        }
    }
}

impl Default for PostingConfig {
    fn default() -> Self {
        Self {
            cash_account_code: default_cash_account(),
            receivable_account_code: default_receivable_account(),
            revenue_account_code: default_revenue_account(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            company: CompanyConfig::default(),
            posting: PostingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LEDGERLY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
