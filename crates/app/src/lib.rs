//! Shopfront application layer: remote stores, cart and checkout services,
//! catalog administration and the notification feed.

pub mod carts;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod context;
pub mod feed;
pub mod observability;
pub mod prompt;
pub mod stores;

#[cfg(test)]
mod test;
