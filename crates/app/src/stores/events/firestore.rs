//! Firestore REST event store.

use std::collections::HashMap;

use async_trait::async_trait;
use jiff::Timestamp;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use shopfront::notifications::{Notification, StoredNotification};
use tracing::{debug, warn};

use crate::stores::events::{EventStore, errors::EventStoreError};

const COLLECTION: &str = "notifications";
const PAGE_SIZE: u32 = 100;

/// Notification feed backed by a Firestore collection.
#[derive(Debug, Clone)]
pub struct FirestoreEventStore {
    collection_url: String,
    api_key: Option<String>,
    http: Client,
}

impl FirestoreEventStore {
    /// Create a client for the `notifications` collection of `project_id`.
    #[must_use]
    pub fn new(base_url: &str, project_id: &str, api_key: Option<String>, http: Client) -> Self {
        Self {
            collection_url: collection_url(base_url, project_id),
            api_key,
            http,
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.query(&[("key", key)]),
            None => request,
        }
    }
}

#[async_trait]
impl EventStore for FirestoreEventStore {
    async fn publish(&self, notification: &Notification) -> Result<String, EventStoreError> {
        let request = self
            .http
            .post(&self.collection_url)
            .json(&encode(notification));

        let response = self.authorize(request).send().await?;
        let document: Document = ensure_success(response).await?.json().await?;

        let id = document_id(&document.name).to_string();

        debug!(%id, "published notification");

        Ok(id)
    }

    async fn list(&self) -> Result<Vec<StoredNotification>, EventStoreError> {
        let mut notifications = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(&self.collection_url)
                .query(&[("pageSize", PAGE_SIZE)]);

            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let response = self.authorize(request).send().await?;
            let page: ListPage = ensure_success(response).await?.json().await?;

            notifications.extend(page.documents.into_iter().filter_map(decode));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(notifications)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListPage {
    #[serde(default)]
    documents: Vec<Value>,

    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    name: String,

    #[serde(default)]
    create_time: Option<Timestamp>,

    #[serde(default)]
    fields: HashMap<String, FieldValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldValue {
    #[serde(default)]
    string_value: Option<String>,
}

fn collection_url(base_url: &str, project_id: &str) -> String {
    format!(
        "{}/projects/{project_id}/databases/(default)/documents/{COLLECTION}",
        base_url.trim_end_matches('/')
    )
}

/// The trailing segment of a document resource name.
fn document_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

fn encode(notification: &Notification) -> Value {
    let fields: Map<String, Value> = [
        ("title", &notification.title),
        ("subtitle", &notification.subtitle),
        ("detail", &notification.detail),
        ("date", &notification.date),
        ("image", &notification.image),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), json!({ "stringValue": value })))
    .collect();

    json!({ "fields": fields })
}

fn decode(raw: Value) -> Option<StoredNotification> {
    let mut document: Document = match serde_json::from_value(raw) {
        Ok(document) => document,
        Err(error) => {
            warn!(%error, "skipping malformed notification document");
            return None;
        }
    };

    let Some(created_at) = document.create_time else {
        warn!(name = %document.name, "skipping notification without a create time");
        return None;
    };

    let mut field = |key: &str| {
        document
            .fields
            .remove(key)
            .and_then(|value| value.string_value)
            .unwrap_or_default()
    };

    let notification = Notification {
        title: field("title"),
        subtitle: field("subtitle"),
        detail: field("detail"),
        date: field("date"),
        image: field("image"),
    };

    Some(StoredNotification {
        id: document_id(&document.name).to_string(),
        created_at,
        notification,
    })
}

async fn ensure_success(response: Response) -> Result<Response, EventStoreError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();

        return Err(EventStoreError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn encodes_every_field_as_a_string_value() {
        let notification = Notification {
            title: "Đặt hàng thành công".to_string(),
            subtitle: "Đặt hàng ngày 5/3/2026".to_string(),
            detail: "Fern - Số lượng: 2 - Giá: 120.000đ".to_string(),
            date: "06:30:05 5/3/2026".to_string(),
            image: String::new(),
        };

        assert_eq!(
            encode(&notification),
            json!({
                "fields": {
                    "title": { "stringValue": "Đặt hàng thành công" },
                    "subtitle": { "stringValue": "Đặt hàng ngày 5/3/2026" },
                    "detail": { "stringValue": "Fern - Số lượng: 2 - Giá: 120.000đ" },
                    "date": { "stringValue": "06:30:05 5/3/2026" },
                    "image": { "stringValue": "" },
                }
            })
        );
    }

    #[test]
    fn decodes_documents_with_missing_fields() -> TestResult {
        let stored = decode(json!({
            "name": "projects/shop/databases/(default)/documents/notifications/abc123",
            "createTime": "2026-03-04T23:30:05.123456Z",
            "fields": {
                "title": { "stringValue": "Đặt hàng thành công" },
                "detail": { "integerValue": "3" },
            }
        }))
        .ok_or("document should decode")?;

        assert_eq!(stored.id, "abc123");
        assert_eq!(stored.notification.title, "Đặt hàng thành công");
        assert!(stored.notification.detail.is_empty());
        assert_eq!(stored.created_at, "2026-03-04T23:30:05.123456Z".parse()?);

        Ok(())
    }

    #[test]
    fn skips_documents_without_create_time() {
        assert_eq!(
            decode(json!({ "name": "projects/p/databases/(default)/documents/notifications/x" })),
            None
        );
        assert_eq!(decode(json!(["not", "a", "document"])), None);
    }

    #[test]
    fn builds_collection_url() {
        assert_eq!(
            collection_url("https://firestore.googleapis.com/v1/", "shop"),
            "https://firestore.googleapis.com/v1/projects/shop/databases/(default)/documents/notifications"
        );
    }
}
