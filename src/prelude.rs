//! Shopfront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    batch::BatchOutcome,
    cart::{Cart, CartLine, CartLineId, CartLineKey, CartRecord, Quantity, QuantityChange},
    catalog::{Category, CategoryId, NewCategory, NewProduct, Product, ProductId},
    notifications::{Notification, StoredNotification},
    orders::{NewOrder, OrderError, OrderId, OrderSummary, PlacedOrder},
    prices::{PriceParseError, Vnd, format_price, parse_price, vnd},
    pricing::PricingError,
    shipping::{
        PaymentMethod, ShippingFormStore, ShippingInfo, ShippingInfoPatch, ShippingMethod,
    },
    validation::ValidationError,
};
