//! Checkout errors.

use shopfront::{orders::OrderError, validation::ValidationError};
use thiserror::Error;

use crate::stores::items::ItemStoreError;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("no items to check out")]
    NothingSelected,

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("failed to build order")]
    Order(#[from] OrderError),

    #[error("the item store rejected the order")]
    OrderRejected(#[source] ItemStoreError),

    #[error("this checkout has already completed")]
    AlreadyCompleted,
}
