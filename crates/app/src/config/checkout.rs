//! Checkout Config

use clap::Args;

/// Checkout settings.
#[derive(Debug, Args)]
pub struct CheckoutConfig {
    /// Sales tax (IGV) as a fraction of the subtotal
    #[arg(long, env = "POS_TAX_RATE", default_value = "0.18")]
    pub tax_rate: String,

    /// ISO 4217 code of the store currency
    #[arg(long, env = "POS_CURRENCY", default_value = "PEN")]
    pub currency: String,
}
