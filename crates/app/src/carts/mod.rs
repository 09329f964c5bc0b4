//! Carts

pub mod errors;
pub mod service;

pub use errors::{CartError, DeleteOutcome};
pub use service::*;
