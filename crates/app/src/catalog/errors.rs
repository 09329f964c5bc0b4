//! Catalog service errors.

use shopfront::catalog::{CategoryNameError, ProductDraftError};
use thiserror::Error;

use crate::stores::items::ItemStoreError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    InvalidCategory(#[from] CategoryNameError),

    #[error(transparent)]
    InvalidProduct(#[from] ProductDraftError),

    #[error("item store error")]
    Store(#[source] ItemStoreError),
}

impl From<ItemStoreError> for CatalogError {
    fn from(error: ItemStoreError) -> Self {
        match error {
            ItemStoreError::NotFound(kind) => Self::NotFound(kind),
            other => Self::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_maps_to_not_found() {
        let error = CatalogError::from(ItemStoreError::NotFound("product".to_string()));

        assert!(matches!(error, CatalogError::NotFound(kind) if kind == "product"));
    }

    #[test]
    fn other_store_errors_are_wrapped() {
        let error = CatalogError::from(ItemStoreError::UnexpectedStatus {
            status: 502,
            body: String::new(),
        });

        assert!(matches!(error, CatalogError::Store(_)));
    }
}
