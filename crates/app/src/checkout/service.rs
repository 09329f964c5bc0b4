//! Checkout coordinator.

use std::sync::Arc;

use jiff::{Timestamp, tz::TimeZone};
use shopfront::{
    notifications::{Notification, localize},
    orders::{NewOrder, PlacedOrder},
    prices::format_price,
    shipping::{ShippingFormStore, ShippingInfo},
    validation,
};
use tracing::{error, info, warn};

use crate::{
    carts::{CheckoutHandoff, Cleanup, DeleteOutcome, service::delete_lines},
    checkout::errors::CheckoutError,
    stores::{events::EventStore, items::ItemStore},
};

/// Where a checkout is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckoutState {
    /// Waiting for the form.
    #[default]
    Idle,

    /// Checking the form.
    Validating,

    /// Writing the order.
    Submitting,

    /// The order was accepted.
    Succeeded,

    /// The order write failed.
    Failed,
}

/// What a successful checkout produced.
#[derive(Debug)]
pub struct CheckoutReceipt {
    /// The accepted order.
    pub order: PlacedOrder,

    /// Feed document id, when the notification was published.
    pub notification_id: Option<String>,

    /// Remote cart cleanup results, when the cart was reconciled after the
    /// order.
    pub cart_cleanup: Option<DeleteOutcome>,
}

/// Drives a single checkout from form to placed order.
pub struct CheckoutCoordinator {
    items: Arc<dyn ItemStore>,
    events: Arc<dyn EventStore>,
    shipping: Arc<ShippingFormStore>,
    zone: TimeZone,
    state: CheckoutState,
}

impl std::fmt::Debug for CheckoutCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutCoordinator")
            .field("zone", &self.zone)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl CheckoutCoordinator {
    #[must_use]
    pub fn new(
        items: Arc<dyn ItemStore>,
        events: Arc<dyn EventStore>,
        shipping: Arc<ShippingFormStore>,
        zone: TimeZone,
    ) -> Self {
        Self {
            items,
            events,
            shipping,
            zone,
            state: CheckoutState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// The last submitted form, used to pre-fill the next one.
    #[must_use]
    pub fn form(&self) -> ShippingInfo {
        self.shipping.get()
    }

    /// Validate the form and place the order for the handed-off lines.
    ///
    /// A failed notification publish is logged and does not fail the
    /// checkout. With [`Cleanup::Pending`] the purchased lines are deleted
    /// from the remote cart only after the order is accepted, and failed
    /// deletes are reported in the receipt.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::AlreadyCompleted`]: this checkout already succeeded.
    /// - [`CheckoutError::NothingSelected`]: the hand-off is empty.
    /// - [`CheckoutError::Invalid`]: the form breaks a rule; nothing is sent.
    /// - [`CheckoutError::Order`]: totals could not be computed.
    /// - [`CheckoutError::OrderRejected`]: the order write failed.
    pub async fn submit(
        &mut self,
        handoff: &CheckoutHandoff,
        form: ShippingInfo,
        submitted_at: Timestamp,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        if self.state == CheckoutState::Succeeded {
            return Err(CheckoutError::AlreadyCompleted);
        }

        if handoff.items.is_empty() {
            self.state = CheckoutState::Idle;
            return Err(CheckoutError::NothingSelected);
        }

        self.state = CheckoutState::Validating;

        if let Err(rule) = validation::validate(&form) {
            self.state = CheckoutState::Idle;
            return Err(rule.into());
        }

        self.state = CheckoutState::Submitting;

        let info = self.shipping.merge(form);

        let order = match NewOrder::from_selection(&handoff.items, &info, submitted_at) {
            Ok(order) => order,
            Err(source) => {
                self.state = CheckoutState::Failed;
                return Err(source.into());
            }
        };

        let id = match self.items.create_order(&order).await {
            Ok(id) => id,
            Err(source) => {
                error!(error = %source, "failed to place order");
                self.state = CheckoutState::Failed;
                return Err(CheckoutError::OrderRejected(source));
            }
        };

        info!(order_id = %id, total = %format_price(&order.total), items = order.items.len(), "order placed");

        let notification =
            Notification::order_placed(&handoff.items, &localize(submitted_at, &self.zone));

        let notification_id = match self.events.publish(&notification).await {
            Ok(notification_id) => Some(notification_id),
            Err(error) => {
                warn!(order_id = %id, %error, "failed to publish order notification");
                None
            }
        };

        let cart_cleanup = match handoff.cleanup {
            Cleanup::Done => None,
            Cleanup::Pending => {
                let outcome = delete_lines(self.items.as_ref(), handoff.items.clone()).await;

                if !outcome.is_complete() {
                    warn!(
                        order_id = %id,
                        failed = outcome.failed.len(),
                        "order placed but some cart lines could not be deleted"
                    );
                }

                Some(outcome)
            }
        };

        self.state = CheckoutState::Succeeded;

        Ok(CheckoutReceipt {
            order: PlacedOrder { id, order },
            notification_id,
            cart_cleanup,
        })
    }
}
