//! Shopfront
//!
//! Cart, pricing and checkout rules for the storefront client. Everything in
//! this crate is synchronous and side-effect free; talking to the remote item
//! and event stores lives in `shopfront-app`.

pub mod batch;
pub mod cart;
pub mod catalog;
pub mod ids;
pub mod notifications;
pub mod orders;
pub mod prelude;
pub mod prices;
pub mod pricing;
pub mod shipping;
pub mod validation;
