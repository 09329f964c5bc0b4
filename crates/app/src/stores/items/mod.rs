//! Item store
//!
//! The REST store holding carts, products, categories and orders.

use async_trait::async_trait;
use mockall::automock;
use shopfront::{
    cart::{CartLineKey, CartRecord},
    catalog::{Category, CategoryId, NewCategory, NewProduct, Product, ProductId},
    orders::{NewOrder, OrderId, OrderSummary},
};

pub mod errors;
mod http;
mod records;

pub use errors::ItemStoreError;
pub use http::HttpItemStore;

#[automock]
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Every cart record.
    async fn list_carts(&self) -> Result<Vec<CartRecord>, ItemStoreError>;

    /// Every product.
    async fn list_products(&self) -> Result<Vec<Product>, ItemStoreError>;

    /// Every category.
    async fn list_categories(&self) -> Result<Vec<Category>, ItemStoreError>;

    /// Every order.
    async fn list_orders(&self) -> Result<Vec<OrderSummary>, ItemStoreError>;

    /// Submit an order, returning the store-assigned id.
    async fn create_order(&self, order: &NewOrder) -> Result<OrderId, ItemStoreError>;

    /// Create a category.
    async fn create_category(&self, category: &NewCategory) -> Result<Category, ItemStoreError>;

    /// Replace a category.
    async fn update_category(
        &self,
        id: &CategoryId,
        category: &NewCategory,
    ) -> Result<Category, ItemStoreError>;

    /// Delete a category.
    async fn delete_category(&self, id: &CategoryId) -> Result<(), ItemStoreError>;

    /// Create a product.
    async fn create_product(&self, product: &NewProduct) -> Result<Product, ItemStoreError>;

    /// Replace a product.
    async fn update_product(
        &self,
        id: &ProductId,
        product: &NewProduct,
    ) -> Result<Product, ItemStoreError>;

    /// Delete a product, addressed through its category.
    async fn delete_product(
        &self,
        category: &CategoryId,
        id: &ProductId,
    ) -> Result<(), ItemStoreError>;

    /// Delete a cart line.
    async fn delete_cart_line(&self, key: &CartLineKey) -> Result<(), ItemStoreError>;
}
