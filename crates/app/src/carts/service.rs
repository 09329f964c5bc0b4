//! Cart session service.

use std::sync::Arc;

use futures::future::join_all;
use shopfront::{
    batch::BatchOutcome,
    cart::{self, Cart, CartLine, CartLineId, CartLineKey, Quantity, QuantityChange},
    prices::Vnd,
    pricing::PricingError,
};
use tracing::{debug, error, info, warn};

use crate::{
    carts::errors::{CartError, DeleteOutcome},
    prompt::{Confirm, Decision, Prompt},
    stores::items::ItemStore,
};

/// When the purchased lines are deleted from the remote cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CartReconciliation {
    /// Delete the selected lines before the payment step; the order is only
    /// attempted once every delete succeeded.
    #[default]
    BeforeOrder,

    /// Keep the lines until the order is accepted, then delete them and
    /// report any failures without failing the checkout.
    AfterOrder,
}

/// Whether the session has finished its first load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// A load is in flight.
    Loading,

    /// The last load finished, successfully or not.
    Ready,
}

/// Remote cleanup still owed for a hand-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cleanup {
    /// The lines are already gone from the remote cart.
    Done,

    /// The lines must be deleted once the order is accepted.
    Pending,
}

/// Selection snapshot handed to the payment step.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutHandoff {
    /// Selected lines at the time of the hand-off.
    pub items: Vec<CartLine>,

    /// Outstanding remote cleanup.
    pub cleanup: Cleanup,
}

/// Result of a single line removal.
#[derive(Debug, Clone, PartialEq)]
pub enum Removal {
    /// The user backed out.
    Cancelled,

    /// The line was deleted remotely and locally.
    Removed(CartLine),
}

/// Result of clearing the whole cart.
#[derive(Debug)]
pub enum ClearOutcome {
    /// The user backed out.
    Cancelled,

    /// The local cart was emptied; per-line remote results.
    Cleared(DeleteOutcome),
}

/// A user's cart, joined with current products.
pub struct CartSession {
    store: Arc<dyn ItemStore>,
    cart: Cart,
    state: LoadState,
}

impl std::fmt::Debug for CartSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartSession")
            .field("cart", &self.cart)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl CartSession {
    #[must_use]
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            store,
            cart: Cart::default(),
            state: LoadState::Loading,
        }
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Fetch cart records and products concurrently and join them.
    ///
    /// Never fails: any store error is logged and leaves the cart empty.
    pub async fn load(&mut self) {
        self.state = LoadState::Loading;

        let (records, products) =
            tokio::join!(self.store.list_carts(), self.store.list_products());

        self.cart = match (records, products) {
            (Ok(records), Ok(products)) => {
                let joined = cart::join(records, &products);

                for record in &joined.orphaned {
                    debug!(cart_id = %record.id, product_id = %record.product_id, "dropping cart line without a product");
                }

                for (record, error) in &joined.unpriced {
                    warn!(cart_id = %record.id, product_id = %record.product_id, %error, "dropping cart line with an unreadable price");
                }

                info!(lines = joined.lines.len(), "cart loaded");

                Cart::new(joined.lines)
            }
            (Err(error), _) | (_, Err(error)) => {
                error!(%error, "failed to load cart");

                Cart::default()
            }
        };

        self.state = LoadState::Ready;
    }

    /// Step a line's quantity. Local only.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] for an unknown line.
    pub fn set_quantity(&mut self, id: &CartLineId, change: QuantityChange) -> Result<(), CartError> {
        if self.cart.set_quantity(id, change) {
            Ok(())
        } else {
            Err(CartError::LineNotFound(id.clone()))
        }
    }

    /// Replace a line's quantity. Local only.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] for an unknown line.
    pub fn set_quantity_to(&mut self, id: &CartLineId, quantity: Quantity) -> Result<(), CartError> {
        if self.cart.set_quantity_to(id, quantity) {
            Ok(())
        } else {
            Err(CartError::LineNotFound(id.clone()))
        }
    }

    /// Flip a line's selection. Local only.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] for an unknown line.
    pub fn toggle_selected(&mut self, id: &CartLineId) -> Result<(), CartError> {
        if self.cart.toggle_selected(id) {
            Ok(())
        } else {
            Err(CartError::LineNotFound(id.clone()))
        }
    }

    /// Total of the selected lines.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the total overflows.
    pub fn subtotal(&self) -> Result<Vnd, PricingError> {
        self.cart.subtotal()
    }

    /// Delete one line after confirmation.
    ///
    /// On a failed delete the line stays in the local cart.
    ///
    /// # Errors
    ///
    /// - [`CartError::LineNotFound`]: unknown line.
    /// - [`CartError::Store`]: the remote delete failed.
    pub async fn remove_line(
        &mut self,
        id: &CartLineId,
        confirm: &dyn Confirm,
    ) -> Result<Removal, CartError> {
        let line = self
            .cart
            .line(id)
            .cloned()
            .ok_or_else(|| CartError::LineNotFound(id.clone()))?;

        let prompt = Prompt::new(
            "Xác nhận",
            format!("Bạn có chắc muốn xóa {} khỏi giỏ hàng?", line.name),
        );

        if confirm.confirm(&prompt) == Decision::Cancel {
            return Ok(Removal::Cancelled);
        }

        if let Err(source) = self.store.delete_cart_line(&line.key()).await {
            error!(cart_id = %id, error = %source, "failed to delete cart line");

            return Err(source.into());
        }

        self.cart.remove(id);

        Ok(Removal::Removed(line))
    }

    /// Delete every line after confirmation.
    ///
    /// The local cart is emptied whatever the remote outcome.
    pub async fn clear_all(&mut self, confirm: &dyn Confirm) -> ClearOutcome {
        if self.cart.is_empty() {
            return ClearOutcome::Cleared(BatchOutcome::default());
        }

        let prompt = Prompt::new(
            "Xác nhận",
            "Bạn có chắc muốn xóa tất cả sản phẩm khỏi giỏ hàng?",
        );

        if confirm.confirm(&prompt) == Decision::Cancel {
            return ClearOutcome::Cancelled;
        }

        let outcome = delete_lines(self.store.as_ref(), self.cart.lines().to_vec()).await;

        self.cart.clear();

        if !outcome.is_complete() {
            warn!(
                failed = outcome.failed.len(),
                total = outcome.len(),
                "cart cleared locally but some lines could not be deleted remotely"
            );
        }

        ClearOutcome::Cleared(outcome)
    }

    /// Hand the selected lines to the payment step.
    ///
    /// With [`CartReconciliation::BeforeOrder`] the selected lines are deleted
    /// remotely first and only removed locally once every delete succeeded.
    ///
    /// # Errors
    ///
    /// - [`CartError::NothingSelected`]: no line is selected.
    /// - [`CartError::SelectionNotRemoved`]: a delete failed; the local cart
    ///   is unchanged but the remote cart may be partially cleared.
    pub async fn begin_checkout(
        &mut self,
        policy: CartReconciliation,
    ) -> Result<CheckoutHandoff, CartError> {
        let selected = self.cart.selected();

        if selected.is_empty() {
            return Err(CartError::NothingSelected);
        }

        if policy == CartReconciliation::AfterOrder {
            return Ok(CheckoutHandoff {
                items: selected,
                cleanup: Cleanup::Pending,
            });
        }

        let outcome = delete_lines(self.store.as_ref(), selected.clone()).await;

        if !outcome.is_complete() {
            error!(
                failed = outcome.failed.len(),
                total = outcome.len(),
                "failed to remove selected lines before checkout"
            );

            return Err(CartError::SelectionNotRemoved(outcome));
        }

        self.cart.remove_all(selected.iter().map(|line| &line.id));

        Ok(CheckoutHandoff {
            items: selected,
            cleanup: Cleanup::Done,
        })
    }

    /// Drop lines the checkout deleted remotely.
    pub fn reconcile(&mut self, outcome: &DeleteOutcome) {
        self.cart
            .remove_all(outcome.succeeded.iter().map(|line| &line.id));
    }
}

/// Delete the given lines concurrently, collecting every outcome.
pub(crate) async fn delete_lines(store: &dyn ItemStore, lines: Vec<CartLine>) -> DeleteOutcome {
    let keys: Vec<CartLineKey> = lines.iter().map(CartLine::key).collect();

    let results = join_all(keys.iter().map(|key| store.delete_cart_line(key))).await;

    BatchOutcome::collect(lines.into_iter().zip(results))
}

#[cfg(test)]
mod tests {
    use shopfront::prices::vnd;
    use testresult::TestResult;

    use crate::{
        prompt::MockConfirm,
        stores::items::{ItemStoreError, MockItemStore},
        test::{line, product, record},
    };

    use super::*;

    fn session(store: MockItemStore, lines: Vec<CartLine>) -> CartSession {
        let mut session = CartSession::new(Arc::new(store));
        session.cart = Cart::new(lines);
        session.state = LoadState::Ready;
        session
    }

    fn confirming(decision: Decision) -> MockConfirm {
        let mut confirm = MockConfirm::new();
        confirm.expect_confirm().return_const(decision);
        confirm
    }

    fn ids(cart: &Cart) -> Vec<&str> {
        cart.lines().iter().map(|line| line.id.as_str()).collect()
    }

    #[tokio::test]
    async fn load_joins_records_with_products() {
        let mut store = MockItemStore::new();

        store.expect_list_carts().once().returning(|| {
            Ok(vec![
                record("1", "p1", 2),
                record("2", "gone", 1),
                record("3", "p3", 1),
                record("4", "p4", 1),
            ])
        });
        store.expect_list_products().once().returning(|| {
            Ok(vec![
                product("p1", "Fern", "120.000đ"),
                product("p3", "Moss", "35.000đ"),
                product("p4", "Broken", "free"),
            ])
        });

        let mut session = CartSession::new(Arc::new(store));

        assert_eq!(session.state(), LoadState::Loading);

        session.load().await;

        assert_eq!(session.state(), LoadState::Ready);
        assert_eq!(ids(session.cart()), ["1", "3"]);
        assert!(
            session.cart().lines().iter().all(|line| !line.checked),
            "lines load unselected"
        );
    }

    #[tokio::test]
    async fn load_failure_leaves_an_empty_ready_cart() {
        let mut store = MockItemStore::new();

        store
            .expect_list_carts()
            .once()
            .returning(|| Ok(vec![record("1", "p1", 2)]));
        store.expect_list_products().once().returning(|| {
            Err(ItemStoreError::UnexpectedStatus {
                status: 500,
                body: String::new(),
            })
        });

        let mut session = CartSession::new(Arc::new(store));

        session.load().await;

        assert_eq!(session.state(), LoadState::Ready);
        assert!(session.cart().is_empty());
    }

    #[tokio::test]
    async fn local_edits_never_touch_the_store() -> TestResult {
        let mut store = MockItemStore::new();
        store.expect_delete_cart_line().never();

        let mut session = session(store, vec![line("1", 50_000, 1, false), line("2", 10_000, 3, false)]);

        session.set_quantity(&"1".into(), QuantityChange::Decrease)?;
        session.set_quantity(&"2".into(), QuantityChange::Increase)?;
        session.toggle_selected(&"2".into())?;

        assert_eq!(session.subtotal()?, vnd(40_000));

        session.set_quantity_to(&"2".into(), Quantity::new(10))?;

        assert_eq!(session.subtotal()?, vnd(100_000));
        assert!(matches!(
            session.toggle_selected(&"9".into()),
            Err(CartError::LineNotFound(_))
        ));
        assert!(matches!(
            session.set_quantity_to(&"9".into(), Quantity::ONE),
            Err(CartError::LineNotFound(_))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn cancelled_removal_keeps_the_line() -> TestResult {
        let mut store = MockItemStore::new();
        store.expect_delete_cart_line().never();

        let mut session = session(store, vec![line("1", 50_000, 1, false)]);

        let removal = session
            .remove_line(&"1".into(), &confirming(Decision::Cancel))
            .await?;

        assert_eq!(removal, Removal::Cancelled);
        assert_eq!(session.cart().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn confirmed_removal_deletes_remotely_then_locally() -> TestResult {
        let mut store = MockItemStore::new();

        store
            .expect_delete_cart_line()
            .once()
            .withf(|key| {
                key.cart_id.as_str() == "1"
                    && key.product_id.as_str() == "p1"
                    && key.category_id.as_str() == "c1"
            })
            .returning(|_| Ok(()));

        let mut session = session(store, vec![line("1", 50_000, 1, false), line("2", 1, 1, false)]);

        let removal = session
            .remove_line(&"1".into(), &confirming(Decision::Confirm))
            .await?;

        assert!(matches!(removal, Removal::Removed(ref line) if line.id.as_str() == "1"));
        assert_eq!(ids(session.cart()), ["2"]);

        Ok(())
    }

    #[tokio::test]
    async fn failed_removal_keeps_local_state() {
        let mut store = MockItemStore::new();

        store
            .expect_delete_cart_line()
            .once()
            .returning(|_| Err(ItemStoreError::NotFound("cart line".to_string())));

        let mut session = session(store, vec![line("1", 50_000, 1, false)]);

        let result = session
            .remove_line(&"1".into(), &confirming(Decision::Confirm))
            .await;

        assert!(matches!(result, Err(CartError::Store(ItemStoreError::NotFound(_)))));
        assert_eq!(session.cart().len(), 1);
    }

    #[tokio::test]
    async fn clearing_empties_the_cart_even_when_a_delete_fails() -> TestResult {
        let mut store = MockItemStore::new();

        store
            .expect_delete_cart_line()
            .times(3)
            .returning(|key| {
                if key.cart_id.as_str() == "2" {
                    Err(ItemStoreError::UnexpectedStatus {
                        status: 503,
                        body: String::new(),
                    })
                } else {
                    Ok(())
                }
            });

        let mut session = session(
            store,
            vec![
                line("1", 1_000, 1, true),
                line("2", 2_000, 1, false),
                line("3", 3_000, 1, false),
            ],
        );

        let ClearOutcome::Cleared(outcome) = session.clear_all(&confirming(Decision::Confirm)).await
        else {
            return Err("clearing was confirmed".into());
        };

        assert!(session.cart().is_empty());
        assert_eq!(outcome.succeeded.len(), 2);
        assert_eq!(
            outcome
                .failed
                .iter()
                .map(|(line, _)| line.id.as_str())
                .collect::<Vec<_>>(),
            ["2"]
        );

        Ok(())
    }

    #[tokio::test]
    async fn cancelled_clear_keeps_everything() {
        let mut store = MockItemStore::new();
        store.expect_delete_cart_line().never();

        let mut session = session(store, vec![line("1", 1_000, 1, true)]);

        let outcome = session.clear_all(&confirming(Decision::Cancel)).await;

        assert!(matches!(outcome, ClearOutcome::Cancelled));
        assert_eq!(session.cart().len(), 1);
    }

    #[tokio::test]
    async fn checkout_requires_a_selection() {
        let mut store = MockItemStore::new();
        store.expect_delete_cart_line().never();

        let mut session = session(store, vec![line("1", 1_000, 1, false)]);

        let result = session.begin_checkout(CartReconciliation::BeforeOrder).await;

        assert!(matches!(result, Err(CartError::NothingSelected)));
    }

    #[tokio::test]
    async fn checkout_removes_selected_lines_once_all_deletes_succeed() -> TestResult {
        let mut store = MockItemStore::new();

        store
            .expect_delete_cart_line()
            .times(2)
            .returning(|_| Ok(()));

        let mut session = session(
            store,
            vec![
                line("1", 1_000, 1, true),
                line("2", 2_000, 1, false),
                line("3", 3_000, 1, true),
            ],
        );

        let handoff = session.begin_checkout(CartReconciliation::BeforeOrder).await?;

        assert_eq!(handoff.cleanup, Cleanup::Done);
        assert_eq!(
            handoff.items.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(),
            ["1", "3"]
        );
        assert_eq!(ids(session.cart()), ["2"]);

        Ok(())
    }

    #[tokio::test]
    async fn failed_selection_delete_leaves_the_cart_unchanged() -> TestResult {
        let mut store = MockItemStore::new();

        store
            .expect_delete_cart_line()
            .times(2)
            .returning(|key| {
                if key.cart_id.as_str() == "3" {
                    Err(ItemStoreError::NotFound("cart line".to_string()))
                } else {
                    Ok(())
                }
            });

        let lines = vec![line("1", 1_000, 1, true), line("3", 3_000, 1, true)];
        let mut session = session(store, lines.clone());

        let result = session.begin_checkout(CartReconciliation::BeforeOrder).await;

        let Err(CartError::SelectionNotRemoved(outcome)) = result else {
            return Err("one delete failed".into());
        };

        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(session.cart().lines(), lines.as_slice());

        Ok(())
    }

    #[tokio::test]
    async fn after_order_policy_defers_deletes() -> TestResult {
        let mut store = MockItemStore::new();
        store.expect_delete_cart_line().never();

        let mut session = session(store, vec![line("1", 1_000, 2, true), line("2", 2_000, 1, false)]);

        let handoff = session.begin_checkout(CartReconciliation::AfterOrder).await?;

        assert_eq!(handoff.cleanup, Cleanup::Pending);
        assert_eq!(handoff.items.len(), 1);
        assert_eq!(session.cart().len(), 2);

        session.reconcile(&BatchOutcome::collect([(
            line("1", 1_000, 2, true),
            Ok::<(), ItemStoreError>(()),
        )]));

        assert_eq!(ids(session.cart()), ["2"]);

        Ok(())
    }
}
