//! Checkout Config

use clap::Args;

use crate::carts::CartReconciliation;

/// Checkout behaviour settings.
#[derive(Debug, Args)]
pub struct CheckoutConfig {
    /// When purchased lines are deleted from the remote cart (before-order, after-order)
    #[arg(
        long,
        env = "CART_RECONCILIATION",
        value_enum,
        default_value_t = CartReconciliation::BeforeOrder,
        global = true
    )]
    pub cart_reconciliation: CartReconciliation,

    /// UTC offset, in hours, used for notification dates
    #[arg(
        long,
        env = "DISPLAY_UTC_OFFSET_HOURS",
        default_value_t = 7i8,
        allow_negative_numbers = true,
        global = true
    )]
    pub display_utc_offset_hours: i8,
}
