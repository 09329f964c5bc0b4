//! Event Store Config

use clap::Args;

/// Firestore notification feed settings.
#[derive(Debug, Args)]
pub struct EventStoreConfig {
    /// Firestore REST base URL
    #[arg(
        long,
        env = "EVENT_STORE_URL",
        default_value = "https://firestore.googleapis.com/v1",
        global = true
    )]
    pub event_store_url: String,

    /// Firestore project id; notifications are skipped when unset
    #[arg(long, env = "FIRESTORE_PROJECT_ID", global = true)]
    pub firestore_project_id: Option<String>,

    /// Firestore web API key
    #[arg(long, env = "FIRESTORE_API_KEY", hide_env_values = true, global = true)]
    pub firestore_api_key: Option<String>,

    /// Feed poll interval in milliseconds
    #[arg(
        long,
        env = "FEED_POLL_INTERVAL_MS",
        default_value_t = 2_000u64,
        global = true
    )]
    pub feed_poll_interval_ms: u64,
}
