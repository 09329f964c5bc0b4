//! Event store
//!
//! Append-only notification feed.

use async_trait::async_trait;
use mockall::automock;
use shopfront::notifications::{Notification, StoredNotification};

pub mod errors;
mod firestore;

pub use errors::EventStoreError;
pub use firestore::FirestoreEventStore;

#[automock]
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Append a notification, returning its document id.
    async fn publish(&self, notification: &Notification) -> Result<String, EventStoreError>;

    /// Every stored notification, in no particular order.
    async fn list(&self) -> Result<Vec<StoredNotification>, EventStoreError>;
}

/// Stand-in used when no event store project is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredEventStore;

#[async_trait]
impl EventStore for UnconfiguredEventStore {
    async fn publish(&self, _notification: &Notification) -> Result<String, EventStoreError> {
        Err(EventStoreError::NotConfigured)
    }

    async fn list(&self) -> Result<Vec<StoredNotification>, EventStoreError> {
        Err(EventStoreError::NotConfigured)
    }
}
