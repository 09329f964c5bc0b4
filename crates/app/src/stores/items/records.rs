//! Item store records.
//!
//! Rows are deserialized loosely and converted into domain types at the
//! boundary. A list response is parsed element by element so one malformed
//! record is quarantined instead of failing the whole list.

use jiff::Timestamp;
use serde::{
    Deserialize,
    de::{DeserializeOwned, IgnoredAny},
};
use serde_json::Value;
use shopfront::{
    cart::{CartLineId, CartRecord, Quantity},
    catalog::{Category, CategoryId, Product, ProductId},
    orders::{OrderId, OrderSummary},
    prices::vnd,
};
use tracing::warn;

use crate::stores::items::errors::ItemStoreError;

/// Stored quantity, as a count or as a `"quantity N"` label. Any other value
/// reads as one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawQuantity {
    Count(i64),
    Label(String),
    Other(IgnoredAny),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartRow {
    id: CartLineId,
    product_id: ProductId,
    #[serde(default)]
    quantity: Option<RawQuantity>,
}

impl From<CartRow> for CartRecord {
    fn from(row: CartRow) -> Self {
        let quantity = match row.quantity {
            Some(RawQuantity::Count(count)) => Quantity::from_count(count),
            Some(RawQuantity::Label(label)) => Quantity::from_label(&label),
            Some(RawQuantity::Other(_)) | None => Quantity::ONE,
        };

        CartRecord {
            id: row.id,
            product_id: row.product_id,
            quantity,
        }
    }
}

/// Stored price, normally a localized string but sometimes a bare number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Text(String),
    Number(serde_json::Number),
}

impl RawPrice {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductRow {
    id: ProductId,
    #[serde(default)]
    name: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    price: RawPrice,
    #[serde(default)]
    image: String,
    category_id: CategoryId,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            kind: row.kind,
            price: row.price.into_text(),
            image: row.image,
            category_id: row.category_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryRow {
    id: CategoryId,
    #[serde(default)]
    name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderRow {
    id: OrderId,
    #[serde(default)]
    status: String,
    #[serde(default)]
    total: Option<Value>,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<OrderRow> for OrderSummary {
    fn from(row: OrderRow) -> Self {
        OrderSummary {
            id: row.id,
            status: row.status,
            total: row.total.as_ref().and_then(Value::as_i64).map(vnd),
            created_at: row
                .created_at
                .as_deref()
                .and_then(|raw| raw.parse::<Timestamp>().ok()),
        }
    }
}

/// Body returned by create calls; only the id is read.
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedRow<T> {
    pub(crate) id: T,
}

/// Parse each element of a list body, skipping and logging the ones that
/// don't fit `R`.
pub(crate) fn parse_list<R, T>(kind: &'static str, body: Value) -> Result<Vec<T>, ItemStoreError>
where
    R: DeserializeOwned,
    T: From<R>,
{
    let Value::Array(elements) = body else {
        return Err(ItemStoreError::NotAList { kind });
    };

    let parsed = elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| match serde_json::from_value::<R>(element) {
            Ok(row) => Some(T::from(row)),
            Err(error) => {
                warn!(kind, index, %error, "skipping malformed record");
                None
            }
        })
        .collect();

    Ok(parsed)
}
