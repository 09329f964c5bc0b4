//! HTTP item store client.

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use shopfront::{
    cart::{CartLineKey, CartRecord},
    catalog::{Category, CategoryId, NewCategory, NewProduct, Product, ProductId},
    orders::{NewOrder, OrderId, OrderSummary},
};
use tracing::debug;

use crate::stores::items::{
    ItemStore,
    errors::ItemStoreError,
    records::{CartRow, CategoryRow, CreatedRow, OrderRow, ProductRow, parse_list},
};

/// REST client for the item store.
#[derive(Debug, Clone)]
pub struct HttpItemStore {
    base_url: String,
    http: Client,
}

impl HttpItemStore {
    /// Create a client rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: &str, http: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn list<R, T>(&self, kind: &'static str, path: &str) -> Result<Vec<T>, ItemStoreError>
    where
        R: DeserializeOwned,
        T: From<R>,
    {
        let response = self.http.get(self.url(path)).send().await?;
        let body: Value = ensure_success(response, kind).await?.json().await?;

        parse_list::<R, T>(kind, body)
    }

    async fn write<B, R, T>(
        &self,
        method: Method,
        kind: &'static str,
        path: &str,
        body: &B,
    ) -> Result<T, ItemStoreError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
        T: From<R>,
    {
        let url = self.url(path);

        debug!(%method, %url, kind, "writing record");

        let response = self.http.request(method, url).json(body).send().await?;
        let row: R = ensure_success(response, kind).await?.json().await?;

        Ok(T::from(row))
    }

    async fn delete(&self, kind: &'static str, path: &str) -> Result<(), ItemStoreError> {
        let url = self.url(path);

        debug!(%url, kind, "deleting record");

        let response = self.http.delete(url).send().await?;

        ensure_success(response, kind).await?;

        Ok(())
    }
}

#[async_trait]
impl ItemStore for HttpItemStore {
    async fn list_carts(&self) -> Result<Vec<CartRecord>, ItemStoreError> {
        self.list::<CartRow, _>("cart", "/carts").await
    }

    async fn list_products(&self) -> Result<Vec<Product>, ItemStoreError> {
        self.list::<ProductRow, _>("product", "/products").await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ItemStoreError> {
        self.list::<CategoryRow, _>("category", "/categories").await
    }

    async fn list_orders(&self) -> Result<Vec<OrderSummary>, ItemStoreError> {
        self.list::<OrderRow, _>("order", "/orders").await
    }

    async fn create_order(&self, order: &NewOrder) -> Result<OrderId, ItemStoreError> {
        let created: CreatedRow<OrderId> = self
            .write::<_, CreatedRow<OrderId>, _>(Method::POST, "order", "/orders", order)
            .await?;

        Ok(created.id)
    }

    async fn create_category(&self, category: &NewCategory) -> Result<Category, ItemStoreError> {
        self.write::<_, CategoryRow, _>(Method::POST, "category", "/categories", category)
            .await
    }

    async fn update_category(
        &self,
        id: &CategoryId,
        category: &NewCategory,
    ) -> Result<Category, ItemStoreError> {
        self.write::<_, CategoryRow, _>(Method::PUT, "category", &category_path(id), category)
            .await
    }

    async fn delete_category(&self, id: &CategoryId) -> Result<(), ItemStoreError> {
        self.delete("category", &category_path(id)).await
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product, ItemStoreError> {
        self.write::<_, ProductRow, _>(Method::POST, "product", "/products", product)
            .await
    }

    async fn update_product(
        &self,
        id: &ProductId,
        product: &NewProduct,
    ) -> Result<Product, ItemStoreError> {
        self.write::<_, ProductRow, _>(
            Method::PUT,
            "product",
            &format!("/products/{id}"),
            product,
        )
        .await
    }

    async fn delete_product(
        &self,
        category: &CategoryId,
        id: &ProductId,
    ) -> Result<(), ItemStoreError> {
        self.delete("product", &product_path(category, id)).await
    }

    async fn delete_cart_line(&self, key: &CartLineKey) -> Result<(), ItemStoreError> {
        self.delete("cart line", &cart_line_path(key)).await
    }
}

async fn ensure_success(response: Response, kind: &str) -> Result<Response, ItemStoreError> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(ItemStoreError::NotFound(kind.to_string()));
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();

        return Err(ItemStoreError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response)
}

fn category_path(id: &CategoryId) -> String {
    format!("/categories/{id}")
}

fn product_path(category: &CategoryId, id: &ProductId) -> String {
    format!("{}/products/{id}", category_path(category))
}

fn cart_line_path(key: &CartLineKey) -> String {
    format!(
        "{}/carts/{}",
        product_path(&key.category_id, &key.product_id),
        key.cart_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_lines_are_addressed_through_category_and_product() {
        let key = CartLineKey {
            category_id: "4".into(),
            product_id: "17".into(),
            cart_id: "3".into(),
        };

        assert_eq!(cart_line_path(&key), "/categories/4/products/17/carts/3");
    }

    #[test]
    fn products_are_deleted_through_their_category() {
        assert_eq!(
            product_path(&"4".into(), &"17".into()),
            "/categories/4/products/17"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let store = HttpItemStore::new("https://store.test/", Client::new());

        assert_eq!(store.url("/carts"), "https://store.test/carts");
    }
}
