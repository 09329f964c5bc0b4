//! Application configuration
//!
//! Every setting is a CLI flag with an environment variable fallback; `.env`
//! is loaded by the binary before parsing.

use clap::Args;

pub mod checkout;
pub mod events;
pub mod items;
pub mod logging;

pub use checkout::CheckoutConfig;
pub use events::EventStoreConfig;
pub use items::ItemStoreConfig;
pub use logging::{LogFormat, LoggingConfig};

/// Shopfront settings.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Item store settings.
    #[command(flatten)]
    pub items: ItemStoreConfig,

    /// Event store settings.
    #[command(flatten)]
    pub events: EventStoreConfig,

    /// Checkout settings.
    #[command(flatten)]
    pub checkout: CheckoutConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
