//! Catalog service.

use std::sync::Arc;

use shopfront::catalog::{
    self, Category, CategoryId, NewCategory, NewProduct, Named, Product, ProductId,
};
use tracing::info;

use crate::{
    catalog::errors::CatalogError,
    prompt::{Confirm, Decision, Prompt},
    stores::items::ItemStore,
};

/// Listing filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Case-insensitive name filter; blank matches everything.
    pub search: Option<String>,

    /// Sort by name instead of store order.
    pub sort_by_name: bool,
}

/// A product with its category's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListing {
    pub product: Product,

    /// Category name, or the unknown label.
    pub category: String,
}

/// Result of a confirmed delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Cancelled,
    Deleted,
}

/// Admin operations over categories and products.
pub struct CatalogService {
    store: Arc<dyn ItemStore>,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService").finish_non_exhaustive()
    }
}

impl CatalogService {
    #[must_use]
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// List categories.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when the store can't be read.
    pub async fn categories(&self, query: &CatalogQuery) -> Result<Vec<Category>, CatalogError> {
        let categories = self.store.list_categories().await?;

        Ok(apply(&categories, query))
    }

    /// List products with their category labels.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when the store can't be read.
    pub async fn products(&self, query: &CatalogQuery) -> Result<Vec<ProductListing>, CatalogError> {
        let (products, categories) =
            tokio::join!(self.store.list_products(), self.store.list_categories());

        let (products, categories) = (products?, categories?);

        Ok(apply(&products, query)
            .into_iter()
            .map(|product| listing(product, &categories))
            .collect())
    }

    /// Look up one product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for an unknown id.
    pub async fn product(&self, id: &ProductId) -> Result<ProductListing, CatalogError> {
        let (products, categories) =
            tokio::join!(self.store.list_products(), self.store.list_categories());

        let product = products?
            .into_iter()
            .find(|product| &product.id == id)
            .ok_or_else(|| CatalogError::NotFound("product".to_string()))?;

        Ok(listing(product, &categories?))
    }

    /// Create a category with a validated, trimmed name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidCategory`] before any request when the
    /// name breaks a rule.
    pub async fn create_category(&self, name: &str) -> Result<Category, CatalogError> {
        let category = NewCategory::new(name)?;

        let created = self.store.create_category(&category).await?;

        info!(category_id = %created.id, "category created");

        Ok(created)
    }

    /// Rename a category.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidCategory`] for a bad name or
    /// [`CatalogError::NotFound`] for an unknown id.
    pub async fn rename_category(&self, id: &CategoryId, name: &str) -> Result<Category, CatalogError> {
        let category = NewCategory::new(name)?;

        let updated = self.store.update_category(id, &category).await?;

        info!(category_id = %id, "category renamed");

        Ok(updated)
    }

    /// Delete a category after confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for an unknown id.
    pub async fn delete_category(
        &self,
        id: &CategoryId,
        confirm: &dyn Confirm,
    ) -> Result<Deletion, CatalogError> {
        let prompt = Prompt::new("Xác nhận", format!("Bạn có chắc muốn xóa danh mục {id}?"));

        if confirm.confirm(&prompt) == Decision::Cancel {
            return Ok(Deletion::Cancelled);
        }

        self.store.delete_category(id).await?;

        info!(category_id = %id, "category deleted");

        Ok(Deletion::Deleted)
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidProduct`] before any request when a
    /// required field is missing.
    pub async fn create_product(&self, draft: &NewProduct) -> Result<Product, CatalogError> {
        draft.validate()?;

        let created = self.store.create_product(draft).await?;

        info!(product_id = %created.id, "product created");

        Ok(created)
    }

    /// Replace a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidProduct`] for a bad draft or
    /// [`CatalogError::NotFound`] for an unknown id.
    pub async fn update_product(
        &self,
        id: &ProductId,
        draft: &NewProduct,
    ) -> Result<Product, CatalogError> {
        draft.validate()?;

        let updated = self.store.update_product(id, draft).await?;

        info!(product_id = %id, "product updated");

        Ok(updated)
    }

    /// Delete a product after confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when the product is unknown locally
    /// or the store answers 404.
    pub async fn delete_product(
        &self,
        id: &ProductId,
        confirm: &dyn Confirm,
    ) -> Result<Deletion, CatalogError> {
        let product = self
            .store
            .list_products()
            .await?
            .into_iter()
            .find(|product| &product.id == id)
            .ok_or_else(|| CatalogError::NotFound("product".to_string()))?;

        let prompt = Prompt::new(
            "Xác nhận",
            format!("Bạn có chắc muốn xóa sản phẩm {}?", product.name),
        );

        if confirm.confirm(&prompt) == Decision::Cancel {
            return Ok(Deletion::Cancelled);
        }

        self.store
            .delete_product(&product.category_id, &product.id)
            .await?;

        info!(product_id = %id, "product deleted");

        Ok(Deletion::Deleted)
    }
}

fn apply<T: Named + Clone>(entries: &[T], query: &CatalogQuery) -> Vec<T> {
    let mut matched: Vec<T> = catalog::search(entries, query.search.as_deref().unwrap_or_default())
        .into_iter()
        .cloned()
        .collect();

    if query.sort_by_name {
        catalog::sort_by_name(&mut matched);
    }

    matched
}

fn listing(product: Product, categories: &[Category]) -> ProductListing {
    ProductListing {
        category: catalog::category_label(categories, &product.category_id).to_string(),
        product,
    }
}
