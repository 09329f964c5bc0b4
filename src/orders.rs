//! Orders

use jiff::Timestamp;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::{
    cart::CartLine,
    catalog::ProductId,
    ids::TypedId,
    prices::Vnd,
    pricing::{self, PricingError},
    shipping::{PaymentMethod, ShippingInfo, ShippingMethod},
};

/// Order Id
pub type OrderId = TypedId<PlacedOrder>;

/// Status every new order starts in.
pub const PENDING: &str = "pending";

/// Errors raised while building an order.
#[derive(Debug, Error, PartialEq)]
pub enum OrderError {
    /// Nothing was selected.
    #[error("an order needs at least one item")]
    EmptySelection,

    /// Totals could not be computed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Customer block of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    /// Full name.
    pub name: String,

    /// Contact email.
    pub email: String,

    /// Delivery address.
    pub address: String,

    /// Mobile number.
    pub phone: String,
}

/// One ordered product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Ordered product.
    pub product_id: ProductId,

    /// Product name at order time.
    pub name: String,

    /// Unit price at order time.
    #[serde(serialize_with = "serialize_amount")]
    pub price: Vnd,

    /// Units ordered.
    pub quantity: u32,
}

/// Order payload submitted to the item store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Who the order ships to.
    pub customer: Customer,

    /// Ordered products.
    pub items: Vec<OrderItem>,

    /// Delivery option.
    pub shipping_method: ShippingMethod,

    /// Payment option.
    pub payment_method: PaymentMethod,

    /// Sum of `price * quantity` over the items.
    #[serde(serialize_with = "serialize_amount")]
    pub subtotal: Vnd,

    /// Delivery fee.
    #[serde(serialize_with = "serialize_amount")]
    pub shipping_cost: Vnd,

    /// `subtotal + shipping_cost`.
    #[serde(serialize_with = "serialize_amount")]
    pub total: Vnd,

    /// Order status; always [`PENDING`] on creation.
    pub status: &'static str,

    /// Submission time.
    pub created_at: Timestamp,
}

impl NewOrder {
    /// Build an order for the given lines.
    ///
    /// Every given line is ordered, whether or not it is still flagged as
    /// selected; callers pass the selection snapshot taken at checkout.
    ///
    /// # Errors
    ///
    /// - [`OrderError::EmptySelection`]: no lines were given.
    /// - [`OrderError::Pricing`]: totals overflowed.
    pub fn from_selection(
        lines: &[CartLine],
        info: &ShippingInfo,
        created_at: Timestamp,
    ) -> Result<Self, OrderError> {
        if lines.is_empty() {
            return Err(OrderError::EmptySelection);
        }

        let subtotal = pricing::total(lines)?;
        let shipping_cost = info.shipping_method.cost();
        let total = subtotal.add(shipping_cost).map_err(PricingError::from)?;

        Ok(Self {
            customer: Customer {
                name: info.name.trim().to_string(),
                email: info.email.trim().to_string(),
                address: info.address.trim().to_string(),
                phone: info.phone.clone(),
            },
            items: lines
                .iter()
                .map(|line| OrderItem {
                    product_id: line.product_id.clone(),
                    name: line.name.clone(),
                    price: line.price,
                    quantity: line.quantity.get(),
                })
                .collect(),
            shipping_method: info.shipping_method,
            payment_method: info.payment_method,
            subtotal,
            shipping_cost,
            total,
            status: PENDING,
            created_at,
        })
    }
}

/// An order the item store accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    /// Store-assigned id.
    pub id: OrderId,

    /// What was submitted.
    pub order: NewOrder,
}

/// Order as listed back from the item store.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    /// Store-assigned id.
    pub id: OrderId,

    /// Status label.
    pub status: String,

    /// Order total, when the record carries a readable one.
    pub total: Option<Vnd>,

    /// Submission time, when the record carries a readable one.
    pub created_at: Option<Timestamp>,
}

fn serialize_amount<S: Serializer>(amount: &Vnd, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(amount.to_minor_units())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::{cart::Quantity, prices::vnd};

    use super::*;

    fn line(id: &str, price: i64, quantity: u32) -> CartLine {
        CartLine {
            id: id.into(),
            product_id: format!("p{id}").into(),
            category_id: "c1".into(),
            name: format!("Plant {id}"),
            category: "Indoor".to_string(),
            price: vnd(price),
            quantity: Quantity::new(quantity),
            image: String::new(),
            checked: true,
        }
    }

    fn info() -> ShippingInfo {
        ShippingInfo {
            name: " Lê Văn C ".to_string(),
            email: "c@shop.vn".to_string(),
            address: "3 Trần Phú, Đà Nẵng".to_string(),
            phone: "0987654321".to_string(),
            ..ShippingInfo::default()
        }
    }

    #[test]
    fn total_is_subtotal_plus_shipping() -> TestResult {
        let lines = [line("1", 40_000, 2), line("2", 20_000, 1)];

        let order = NewOrder::from_selection(&lines, &info(), Timestamp::UNIX_EPOCH)?;

        assert_eq!(order.subtotal, vnd(100_000));
        assert_eq!(order.shipping_cost, vnd(15_000));
        assert_eq!(order.total, vnd(115_000));
        assert_eq!(order.status, PENDING);
        assert_eq!(order.customer.name, "Lê Văn C");

        Ok(())
    }

    #[test]
    fn cash_on_delivery_costs_more() -> TestResult {
        let info = ShippingInfo {
            shipping_method: ShippingMethod::CashOnDelivery,
            ..info()
        };

        let order = NewOrder::from_selection(&[line("1", 100_000, 1)], &info, Timestamp::UNIX_EPOCH)?;

        assert_eq!(order.total, vnd(120_000));

        Ok(())
    }

    #[test]
    fn empty_selection_is_rejected() {
        let result = NewOrder::from_selection(&[], &info(), Timestamp::UNIX_EPOCH);

        assert_eq!(result, Err(OrderError::EmptySelection));
    }

    #[test]
    fn serializes_to_store_shape() -> TestResult {
        let order = NewOrder::from_selection(&[line("1", 50_000, 2)], &info(), Timestamp::UNIX_EPOCH)?;

        let value = serde_json::to_value(&order)?;

        assert_eq!(
            value,
            json!({
                "customer": {
                    "name": "Lê Văn C",
                    "email": "c@shop.vn",
                    "address": "3 Trần Phú, Đà Nẵng",
                    "phone": "0987654321",
                },
                "items": [{
                    "productId": "p1",
                    "name": "Plant 1",
                    "price": 50_000,
                    "quantity": 2,
                }],
                "shippingMethod": "Giao hàng Nhanh - 15.000đ",
                "paymentMethod": "Thẻ VISA/MASTERCARD",
                "subtotal": 100_000,
                "shippingCost": 15_000,
                "total": 115_000,
                "status": "pending",
                "createdAt": "1970-01-01T00:00:00Z",
            })
        );

        Ok(())
    }
}
