//! Integration test for the cart-to-order pipeline.
//!
//! Stored cart records are joined with products, a subset is selected, and the
//! order and its confirmation notification are built from that selection:
//!
//! - Fern: 120.000đ x 2 (selected) = 240.000đ
//! - Moss: "35,000 VND" x 1 (not selected)
//! - Cactus: 15.000₫ x "quantity 3" (selected) = 45.000đ
//! - Orphan line pointing at a deleted product (dropped)
//!
//! Subtotal 285.000đ, cash on delivery 20.000đ, total 305.000đ.

use jiff::tz::{Offset, TimeZone};
use testresult::TestResult;

use shopfront::{cart, notifications, prelude::*, validation};

fn product(id: &str, name: &str, price: &str) -> Product {
    Product {
        id: id.into(),
        name: name.to_string(),
        kind: None,
        price: price.to_string(),
        image: format!("https://img.test/{id}.png"),
        category_id: "plants".into(),
    }
}

fn record(id: &str, product: &str, quantity: Quantity) -> CartRecord {
    CartRecord {
        id: id.into(),
        product_id: product.into(),
        quantity,
    }
}

#[test]
fn test_selected_lines_become_an_order() -> TestResult {
    let products = [
        product("p1", "Fern", "120.000đ"),
        product("p2", "Moss", "35,000 VND"),
        product("p3", "Cactus", "15.000₫"),
    ];

    let joined = cart::join(
        vec![
            record("c1", "p1", Quantity::new(2)),
            record("c2", "p2", Quantity::ONE),
            record("c3", "p3", Quantity::from_label("quantity 3")),
            record("c4", "deleted", Quantity::ONE),
        ],
        &products,
    );

    assert_eq!(joined.orphaned.len(), 1);
    assert!(joined.unpriced.is_empty());

    let mut cart = Cart::new(joined.lines);

    assert_eq!(cart.subtotal()?, vnd(0));

    assert!(cart.toggle_selected(&"c1".into()));
    assert!(cart.toggle_selected(&"c3".into()));

    assert_eq!(cart.subtotal()?, vnd(285_000));

    let info = ShippingInfo {
        name: "Trần Thị B".to_string(),
        email: "b@shop.vn".to_string(),
        address: "12 Nguyễn Huệ, Huế".to_string(),
        phone: "0351234567".to_string(),
        shipping_method: ShippingMethod::CashOnDelivery,
        payment_method: PaymentMethod::Atm,
    };

    validation::validate(&info)?;

    let selection = cart.selected();
    let placed_at = "2026-12-31T18:15:00Z".parse()?;

    let order = NewOrder::from_selection(&selection, &info, placed_at)?;

    assert_eq!(order.items.len(), 2);
    assert_eq!(order.subtotal, vnd(285_000));
    assert_eq!(order.shipping_cost, vnd(20_000));
    assert_eq!(order.total, vnd(305_000));
    assert_eq!(format_price(&order.total), "305.000đ");

    let zone = TimeZone::fixed(Offset::from_hours(7)?);
    let notification =
        Notification::order_placed(&selection, &notifications::localize(placed_at, &zone));

    assert_eq!(notification.subtitle, "Đặt hàng ngày 1/1/2027");
    assert_eq!(notification.image, "https://img.test/p1.png");
    assert_eq!(
        notification.detail,
        "Fern - Số lượng: 2 - Giá: 120.000đ\nCactus - Số lượng: 3 - Giá: 15.000đ"
    );

    Ok(())
}

#[test]
fn test_invalid_form_blocks_the_order() {
    let info = ShippingInfo {
        name: "  ".to_string(),
        email: "a.com".to_string(),
        address: String::new(),
        phone: "091234567".to_string(),
        ..ShippingInfo::default()
    };

    assert_eq!(validation::validate(&info), Err(ValidationError::MissingName));
    assert_eq!(
        validation::violations(&info),
        [
            ValidationError::MissingName,
            ValidationError::InvalidEmail,
            ValidationError::MissingAddress,
            ValidationError::InvalidPhone,
        ]
    );
}
