//! Client configuration

use clap::Args;
use rusty_money::iso::Currency;
use thiserror::Error;

use revenge::{money::find_currency, pricing::TaxRate};

pub mod api;
pub mod checkout;
pub mod logging;
pub mod session;

pub use api::ApiConfig;
pub use checkout::CheckoutConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use session::SessionConfig;

/// Errors raised while validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The tax rate is not a fraction between 0 and 1.
    #[error("invalid tax rate: {0}")]
    TaxRate(#[from] revenge::pricing::TaxRateError),

    /// The currency code is not a known ISO 4217 code.
    #[error("unknown currency code `{0}`")]
    UnknownCurrency(String),

    /// The API base URL cannot be parsed.
    #[error("invalid API base URL `{0}`")]
    BaseUrl(String),
}

/// Settings shared by every command.
#[derive(Debug, Args)]
pub struct ClientConfig {
    /// Backend API settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Checkout settings.
    #[command(flatten)]
    pub checkout: CheckoutConfig,

    /// Session persistence settings.
    #[command(flatten)]
    pub session: SessionConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

/// Configuration after validation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Backend API settings.
    pub api: ApiConfig,

    /// Tax applied at checkout.
    pub tax_rate: TaxRate,

    /// Currency amounts are shown in.
    pub currency: &'static Currency,

    /// Where the session is persisted between commands.
    pub session_file: std::path::PathBuf,
}

impl ClientConfig {
    /// Validate the raw settings.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an out-of-range tax rate, an unknown
    /// currency or a malformed base URL.
    pub fn validate(&self) -> Result<Settings, ConfigError> {
        let tax_rate: TaxRate = self.checkout.tax_rate.parse()?;

        let currency = find_currency(&self.checkout.currency)
            .ok_or_else(|| ConfigError::UnknownCurrency(self.checkout.currency.clone()))?;

        reqwest::Url::parse(&self.api.base_url)
            .map_err(|_err| ConfigError::BaseUrl(self.api.base_url.clone()))?;

        Ok(Settings {
            api: self.api.clone(),
            tax_rate,
            currency,
            session_file: self.session.path(),
        })
    }
}
