//! Item Store Config

use clap::Args;

/// REST item store settings.
#[derive(Debug, Args)]
pub struct ItemStoreConfig {
    /// Item store base URL
    #[arg(
        long,
        env = "ITEM_STORE_URL",
        default_value = "https://67e5137018194932a584633a.mockapi.io",
        global = true
    )]
    pub item_store_url: String,

    /// HTTP connect timeout in seconds
    #[arg(
        long,
        env = "HTTP_CONNECT_TIMEOUT_SECONDS",
        default_value_t = 10u64,
        global = true
    )]
    pub http_connect_timeout_seconds: u64,
}
