use std::str::FromStr;

use clap::{Args, ValueEnum};
use jiff::Timestamp;
use shopfront::{
    cart::{CartLineId, Quantity},
    prices::format_price,
    shipping::{PaymentMethod, ShippingInfoPatch, ShippingMethod},
    validation,
};
use shopfront_app::{carts::CartError, context::AppContext};
use thiserror::Error;

use crate::cli::{cart, describe};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Cart line to buy; repeat for several
    #[arg(long = "item", required = true)]
    items: Vec<CartLineId>,

    /// Set a line's quantity before checkout, as `<cart line id>=<quantity>`
    #[arg(long = "quantity")]
    quantities: Vec<QuantityOverride>,

    /// Customer's full name
    #[arg(long)]
    name: Option<String>,

    /// Contact email
    #[arg(long)]
    email: Option<String>,

    /// Delivery address
    #[arg(long)]
    address: Option<String>,

    /// Mobile number
    #[arg(long)]
    phone: Option<String>,

    /// Delivery option
    #[arg(long, value_enum)]
    shipping: Option<ShippingOption>,

    /// Payment option
    #[arg(long, value_enum)]
    payment: Option<PaymentOption>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ShippingOption {
    /// Giao hàng Nhanh, 15.000đ
    Express,

    /// Giao hàng COD, 20.000đ
    Cod,
}

impl From<ShippingOption> for ShippingMethod {
    fn from(option: ShippingOption) -> Self {
        match option {
            ShippingOption::Express => Self::Express,
            ShippingOption::Cod => Self::CashOnDelivery,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PaymentOption {
    /// Thẻ VISA/MASTERCARD
    Card,

    /// Thẻ ATM
    Atm,
}

impl From<PaymentOption> for PaymentMethod {
    fn from(option: PaymentOption) -> Self {
        match option {
            PaymentOption::Card => Self::Card,
            PaymentOption::Atm => Self::Atm,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct QuantityOverride {
    id: CartLineId,
    quantity: Quantity,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected <cart line id>=<quantity of at least 1>, got {0:?}")]
struct InvalidQuantityOverride(String);

impl FromStr for QuantityOverride {
    type Err = InvalidQuantityOverride;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidQuantityOverride(s.to_string());

        let (id, quantity) = s.split_once('=').ok_or_else(invalid)?;
        let quantity = quantity
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|quantity| *quantity > 0)
            .ok_or_else(invalid)?;

        if id.trim().is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            id: id.trim().into(),
            quantity: Quantity::new(quantity),
        })
    }
}

pub(crate) async fn run(args: CheckoutArgs, context: &AppContext) -> Result<(), String> {
    let mut session = context.cart_session();

    session.load().await;

    for QuantityOverride { id, quantity } in &args.quantities {
        session
            .set_quantity_to(id, *quantity)
            .map_err(|error| error.to_string())?;
    }

    for id in &args.items {
        let already_selected = session.cart().line(id).is_some_and(|line| line.checked);

        if !already_selected {
            session
                .toggle_selected(id)
                .map_err(|error| error.to_string())?;
        }
    }

    println!("{}", cart::render(session.cart()));

    let mut checkout = context.checkout();

    let form = checkout.form().merged(ShippingInfoPatch {
        name: args.name,
        email: args.email,
        address: args.address,
        phone: args.phone,
        shipping_method: args.shipping.map(Into::into),
        payment_method: args.payment.map(Into::into),
    });

    validation::validate(&form)
        .map_err(|error| format!("checkout failed: {}", describe(&error)))?;

    let handoff = session
        .begin_checkout(context.reconciliation)
        .await
        .map_err(|error| match error {
            CartError::SelectionNotRemoved(outcome) => {
                let failed: Vec<String> = outcome
                    .failed
                    .iter()
                    .map(|(line, error)| format!("{} ({})", line.id, describe(error)))
                    .collect();

                format!(
                    "could not remove the selected lines from the cart: {}",
                    failed.join(", ")
                )
            }
            other => describe(&other),
        })?;

    let receipt = checkout
        .submit(&handoff, form, Timestamp::now())
        .await
        .map_err(|error| format!("checkout failed: {}", describe(&error)))?;

    if let Some(outcome) = &receipt.cart_cleanup {
        session.reconcile(outcome);

        for (line, error) in &outcome.failed {
            println!(
                "order placed, but {} ({}) is still in the cart: {}",
                line.name,
                line.id,
                describe(error)
            );
        }
    }

    let order = &receipt.order.order;

    println!("order: {}", receipt.order.id);
    println!("subtotal: {}", format_price(&order.subtotal));
    println!("shipping: {} ({})", format_price(&order.shipping_cost), order.shipping_method);
    println!("payment: {}", order.payment_method);
    println!("total: {}", format_price(&order.total));

    if receipt.notification_id.is_none() {
        println!("order notification was not published");
    }

    Ok(())
}
