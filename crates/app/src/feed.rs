//! Notification feed subscription.
//!
//! The event store has no push channel over REST, so a subscription polls the
//! list operation and forwards a snapshot only when it differs from the last
//! one delivered.

use std::{sync::Arc, time::Duration};

use shopfront::notifications::{StoredNotification, sort_by_arrival};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, warn};

use crate::stores::events::EventStore;

const SNAPSHOT_BUFFER: usize = 4;

/// Live view over the notification feed.
pub struct NotificationFeed {
    events: Arc<dyn EventStore>,
}

impl std::fmt::Debug for NotificationFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationFeed").finish_non_exhaustive()
    }
}

impl NotificationFeed {
    #[must_use]
    pub fn new(events: Arc<dyn EventStore>) -> Self {
        Self { events }
    }

    /// Start polling every `interval`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn subscribe(&self, interval: Duration) -> Subscription {
        let (sender, snapshots) = mpsc::channel(SNAPSHOT_BUFFER);

        let task = tokio::spawn(poll(Arc::clone(&self.events), interval, sender));

        Subscription { snapshots, task }
    }
}

/// Handle to a running feed poller. Dropping it stops the poller.
#[derive(Debug)]
pub struct Subscription {
    snapshots: mpsc::Receiver<Vec<StoredNotification>>,
    task: JoinHandle<()>,
}

impl Subscription {
    /// Wait for the next changed snapshot, ordered by arrival.
    pub async fn next(&mut self) -> Option<Vec<StoredNotification>> {
        self.snapshots.recv().await
    }

    /// Stop polling.
    pub fn unsubscribe(self) {
        self.task.abort();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn poll(
    events: Arc<dyn EventStore>,
    interval: Duration,
    sender: mpsc::Sender<Vec<StoredNotification>>,
) {
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last: Option<Vec<StoredNotification>> = None;

    loop {
        ticker.tick().await;

        let mut snapshot = match events.list().await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(%error, "failed to poll notifications");
                continue;
            }
        };

        sort_by_arrival(&mut snapshot);

        if last.as_ref() == Some(&snapshot) {
            continue;
        }

        debug!(notifications = snapshot.len(), "notification feed changed");

        if sender.send(snapshot.clone()).await.is_err() {
            break;
        }

        last = Some(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use shopfront::notifications::Notification;
    use testresult::TestResult;

    use crate::stores::events::{EventStoreError, MockEventStore};

    use super::*;

    fn stored(id: &str, at: &str) -> StoredNotification {
        StoredNotification {
            id: id.to_string(),
            created_at: at.parse().unwrap_or_default(),
            notification: Notification::default(),
        }
    }

    #[tokio::test]
    async fn emits_sorted_snapshots_only_when_they_change() -> TestResult {
        let calls = AtomicUsize::new(0);
        let mut events = MockEventStore::new();

        events.expect_list().returning(move || {
            match calls.fetch_add(1, Ordering::SeqCst) {
                0 | 1 => Ok(vec![stored("a", "2026-01-01T00:00:00Z")]),
                2 => Err(EventStoreError::NotConfigured),
                _ => Ok(vec![
                    stored("b", "2026-01-02T00:00:00Z"),
                    stored("a", "2026-01-01T00:00:00Z"),
                ]),
            }
        });

        let feed = NotificationFeed::new(Arc::new(events));
        let mut subscription = feed.subscribe(Duration::from_millis(1));

        let first = subscription.next().await.ok_or("feed closed")?;
        let second = subscription.next().await.ok_or("feed closed")?;

        subscription.unsubscribe();

        let ids = |snapshot: &[StoredNotification]| -> Vec<String> {
            snapshot.iter().map(|n| n.id.clone()).collect()
        };

        assert_eq!(ids(&first), ["a"]);
        assert_eq!(ids(&second), ["a", "b"]);

        Ok(())
    }
}
