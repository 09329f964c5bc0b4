//! Shipping Form State
//!
//! The checkout form survives between the cart and payment steps through a
//! [`ShippingFormStore`] that is handed to both explicitly.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
    sync::{Mutex, PoisonError},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::prices::{Vnd, vnd};

/// Delivery options offered at checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShippingMethod {
    /// Express delivery.
    #[default]
    #[serde(rename = "Giao hàng Nhanh - 15.000đ")]
    Express,

    /// Cash on delivery.
    #[serde(rename = "Giao hàng COD - 20.000đ")]
    CashOnDelivery,
}

impl ShippingMethod {
    /// Every option, in display order.
    pub const ALL: [Self; 2] = [Self::Express, Self::CashOnDelivery];

    /// Label stored on orders and shown to customers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Express => "Giao hàng Nhanh - 15.000đ",
            Self::CashOnDelivery => "Giao hàng COD - 20.000đ",
        }
    }

    /// Delivery fee.
    #[must_use]
    pub fn cost(self) -> Vnd {
        match self {
            Self::Express => vnd(15_000),
            Self::CashOnDelivery => vnd(20_000),
        }
    }
}

/// Payment options offered at checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Credit or debit card.
    #[default]
    #[serde(rename = "Thẻ VISA/MASTERCARD")]
    Card,

    /// Domestic ATM card.
    #[serde(rename = "Thẻ ATM")]
    Atm,
}

impl PaymentMethod {
    /// Every option, in display order.
    pub const ALL: [Self; 2] = [Self::Card, Self::Atm];

    /// Label stored on orders and shown to customers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Card => "Thẻ VISA/MASTERCARD",
            Self::Atm => "Thẻ ATM",
        }
    }
}

impl Display for ShippingMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

/// A label that matches no known option.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown option {0:?}")]
pub struct UnknownOption(pub String);

impl FromStr for ShippingMethod {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.label() == s.trim())
            .ok_or_else(|| UnknownOption(s.to_string()))
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.label() == s.trim())
            .ok_or_else(|| UnknownOption(s.to_string()))
    }
}

/// Checkout form snapshot. Always fully populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    /// Customer's full name.
    pub name: String,

    /// Contact email.
    pub email: String,

    /// Delivery address.
    pub address: String,

    /// Mobile number.
    pub phone: String,

    /// Chosen delivery option.
    pub shipping_method: ShippingMethod,

    /// Chosen payment option.
    pub payment_method: PaymentMethod,
}

/// A partial update to [`ShippingInfo`]. Absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingInfoPatch {
    /// New name.
    pub name: Option<String>,

    /// New email.
    pub email: Option<String>,

    /// New address.
    pub address: Option<String>,

    /// New phone.
    pub phone: Option<String>,

    /// New delivery option.
    pub shipping_method: Option<ShippingMethod>,

    /// New payment option.
    pub payment_method: Option<PaymentMethod>,
}

impl From<ShippingInfo> for ShippingInfoPatch {
    fn from(info: ShippingInfo) -> Self {
        Self {
            name: Some(info.name),
            email: Some(info.email),
            address: Some(info.address),
            phone: Some(info.phone),
            shipping_method: Some(info.shipping_method),
            payment_method: Some(info.payment_method),
        }
    }
}

impl ShippingInfo {
    /// Apply a patch, keeping fields the patch leaves out.
    pub fn merge(&mut self, patch: ShippingInfoPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(method) = patch.shipping_method {
            self.shipping_method = method;
        }
        if let Some(method) = patch.payment_method {
            self.payment_method = method;
        }
    }

    /// The form with a patch applied, leaving `self` untouched.
    #[must_use]
    pub fn merged(&self, patch: ShippingInfoPatch) -> Self {
        let mut merged = self.clone();
        merged.merge(patch);
        merged
    }
}

/// Shared owner of the shipping form between checkout steps.
#[derive(Debug, Default)]
pub struct ShippingFormStore {
    info: Mutex<ShippingInfo>,
}

impl ShippingFormStore {
    /// A store holding the default form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with the given form.
    #[must_use]
    pub fn with_info(info: ShippingInfo) -> Self {
        Self {
            info: Mutex::new(info),
        }
    }

    /// Current form.
    #[must_use]
    pub fn get(&self) -> ShippingInfo {
        self.info
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Merge a patch into the stored form and return the result.
    pub fn merge(&self, patch: impl Into<ShippingInfoPatch>) -> ShippingInfo {
        let mut info = self.info.lock().unwrap_or_else(PoisonError::into_inner);

        info.merge(patch.into());

        info.clone()
    }

    /// Restore the default form.
    pub fn reset(&self) {
        *self.info.lock().unwrap_or_else(PoisonError::into_inner) = ShippingInfo::default();
    }
}
