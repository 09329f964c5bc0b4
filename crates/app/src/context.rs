//! App Context

use std::{sync::Arc, time::Duration};

use jiff::tz::{Offset, TimeZone};
use reqwest::Client;
use shopfront::shipping::ShippingFormStore;
use thiserror::Error;
use tracing::info;

use crate::{
    carts::{CartReconciliation, CartSession},
    catalog::CatalogService,
    checkout::CheckoutCoordinator,
    config::AppConfig,
    feed::NotificationFeed,
    stores::{
        events::{EventStore, FirestoreEventStore, UnconfiguredEventStore},
        items::{HttpItemStore, ItemStore},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to build http client")]
    HttpClient(#[source] reqwest::Error),

    #[error("invalid display UTC offset")]
    TimeZone(#[source] jiff::Error),
}

/// Shared stores and settings the services are built from.
#[derive(Clone)]
pub struct AppContext {
    pub items: Arc<dyn ItemStore>,
    pub events: Arc<dyn EventStore>,
    pub shipping: Arc<ShippingFormStore>,
    pub zone: TimeZone,
    pub reconciliation: CartReconciliation,
    pub feed_interval: Duration,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("zone", &self.zone)
            .field("reconciliation", &self.reconciliation)
            .field("feed_interval", &self.feed_interval)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client can't be built or the display
    /// offset is out of range.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(
                config.items.http_connect_timeout_seconds,
            ))
            .build()
            .map_err(AppInitError::HttpClient)?;

        let offset = Offset::from_hours(config.checkout.display_utc_offset_hours)
            .map_err(AppInitError::TimeZone)?;

        let events: Arc<dyn EventStore> = match &config.events.firestore_project_id {
            Some(project_id) => Arc::new(FirestoreEventStore::new(
                &config.events.event_store_url,
                project_id,
                config.events.firestore_api_key.clone(),
                http.clone(),
            )),
            None => {
                info!("no event store project configured; notifications are disabled");
                Arc::new(UnconfiguredEventStore)
            }
        };

        Ok(Self {
            items: Arc::new(HttpItemStore::new(&config.items.item_store_url, http)),
            events,
            shipping: Arc::new(ShippingFormStore::new()),
            zone: TimeZone::fixed(offset),
            reconciliation: config.checkout.cart_reconciliation,
            feed_interval: Duration::from_millis(config.events.feed_poll_interval_ms),
        })
    }

    #[must_use]
    pub fn cart_session(&self) -> CartSession {
        CartSession::new(Arc::clone(&self.items))
    }

    #[must_use]
    pub fn checkout(&self) -> CheckoutCoordinator {
        CheckoutCoordinator::new(
            Arc::clone(&self.items),
            Arc::clone(&self.events),
            Arc::clone(&self.shipping),
            self.zone.clone(),
        )
    }

    #[must_use]
    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(Arc::clone(&self.items))
    }

    #[must_use]
    pub fn feed(&self) -> NotificationFeed {
        NotificationFeed::new(Arc::clone(&self.events))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::config::{
        CheckoutConfig, EventStoreConfig, ItemStoreConfig, LogFormat, LoggingConfig,
    };

    use super::*;

    fn config(offset: i8) -> AppConfig {
        AppConfig {
            items: ItemStoreConfig {
                item_store_url: "https://store.test".to_string(),
                http_connect_timeout_seconds: 1,
            },
            events: EventStoreConfig {
                event_store_url: "https://events.test/v1".to_string(),
                firestore_project_id: None,
                firestore_api_key: None,
                feed_poll_interval_ms: 250,
            },
            checkout: CheckoutConfig {
                cart_reconciliation: CartReconciliation::AfterOrder,
                display_utc_offset_hours: offset,
            },
            logging: LoggingConfig {
                log_level: "warn".to_string(),
                log_format: LogFormat::Compact,
            },
        }
    }

    #[tokio::test]
    async fn unconfigured_event_store_rejects_publishes() -> TestResult {
        let context = AppContext::from_config(&config(7))?;

        assert_eq!(context.reconciliation, CartReconciliation::AfterOrder);
        assert_eq!(context.feed_interval, Duration::from_millis(250));
        assert!(context.events.list().await.is_err());

        Ok(())
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        let result = AppContext::from_config(&config(30));

        assert!(matches!(result, Err(AppInitError::TimeZone(_))));
    }
}
