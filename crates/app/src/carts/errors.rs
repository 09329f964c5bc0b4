//! Cart service errors.

use shopfront::{batch::BatchOutcome, cart::{CartLine, CartLineId}};
use thiserror::Error;

use crate::stores::items::ItemStoreError;

/// Per-line results of a batch of remote cart line deletes.
pub type DeleteOutcome = BatchOutcome<CartLine, ItemStoreError>;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("no cart lines are selected")]
    NothingSelected,

    #[error("cart line {0} not found")]
    LineNotFound(CartLineId),

    #[error("item store error")]
    Store(#[from] ItemStoreError),

    #[error(
        "{} of {} selected cart lines could not be removed",
        .0.failed.len(),
        .0.len()
    )]
    SelectionNotRemoved(DeleteOutcome),
}
