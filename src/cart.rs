//! Cart
//!
//! Cart lines are built by joining the store's raw cart records with the
//! product they point at. Quantity and selection are client-side state; the
//! store only ever sees a line again when it is deleted.

use rustc_hash::FxHashMap;

use crate::{
    catalog::{CategoryId, Product, ProductId},
    ids::TypedId,
    prices::{PriceParseError, Vnd},
    pricing::{self, PricingError},
};

/// Cart Line Id
pub type CartLineId = TypedId<CartLine>;

/// A line quantity. Never below one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(u32);

impl Quantity {
    /// The smallest quantity a line can hold.
    pub const ONE: Self = Self(1);

    /// Clamp a count to at least one.
    #[must_use]
    pub fn new(count: u32) -> Self {
        Self(count.max(1))
    }

    /// Read a quantity from a signed count, clamping anything below one.
    #[must_use]
    pub fn from_count(count: i64) -> Self {
        u32::try_from(count).map_or_else(
            |_| if count < 1 { Self::ONE } else { Self(u32::MAX) },
            Self::new,
        )
    }

    /// Read a quantity label such as `"quantity 3"` or `"2"`.
    ///
    /// Leading digits after an optional `quantity` prefix are used; anything
    /// unreadable falls back to one.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        let rest = trimmed.strip_prefix("quantity").unwrap_or(trimmed).trim_start();

        let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();

        digits.parse::<u32>().map_or(Self::ONE, Self::new)
    }

    /// The count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// One more, saturating.
    #[must_use]
    pub const fn increased(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// One fewer, never below one.
    #[must_use]
    pub const fn decreased(self) -> Self {
        if self.0 > 1 { Self(self.0 - 1) } else { Self::ONE }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

/// Direction of a quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// Add one.
    Increase,

    /// Remove one, flooring at one.
    Decrease,
}

/// A cart record as stored remotely, before it is joined with its product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRecord {
    /// Store-assigned cart id.
    pub id: CartLineId,

    /// Product the line refers to.
    pub product_id: ProductId,

    /// Stored quantity.
    pub quantity: Quantity,
}

/// The composite address the store uses to delete a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CartLineKey {
    /// Category of the product.
    pub category_id: CategoryId,

    /// Product id.
    pub product_id: ProductId,

    /// Cart line id.
    pub cart_id: CartLineId,
}

/// A priced, orderable cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Store-assigned cart id.
    pub id: CartLineId,

    /// Product the line refers to.
    pub product_id: ProductId,

    /// Category of the product, needed to address deletes.
    pub category_id: CategoryId,

    /// Product name.
    pub name: String,

    /// Product type label.
    pub category: String,

    /// Unit price.
    pub price: Vnd,

    /// Units in the line.
    pub quantity: Quantity,

    /// Image URI.
    pub image: String,

    /// Selected for checkout. Client-side only.
    pub checked: bool,
}

impl CartLine {
    /// Join a cart record with its product.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceParseError`] when the product's price can't be read.
    pub fn from_parts(record: CartRecord, product: &Product) -> Result<Self, PriceParseError> {
        Ok(Self {
            price: product.parsed_price()?,
            id: record.id,
            product_id: record.product_id,
            category_id: product.category_id.clone(),
            name: product.name.clone(),
            category: product.kind_label().to_string(),
            quantity: record.quantity,
            image: product.image.clone(),
            checked: false,
        })
    }

    /// The delete address for this line.
    #[must_use]
    pub fn key(&self) -> CartLineKey {
        CartLineKey {
            category_id: self.category_id.clone(),
            product_id: self.product_id.clone(),
            cart_id: self.id.clone(),
        }
    }

    /// `price * quantity`.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] when the product overflows.
    pub fn line_total(&self) -> Result<Vnd, PricingError> {
        pricing::line_total(self)
    }
}

/// The outcome of joining cart records with products.
#[derive(Debug, Default)]
pub struct Join {
    /// Lines that joined and priced cleanly, in record order.
    pub lines: Vec<CartLine>,

    /// Records whose product no longer exists.
    pub orphaned: Vec<CartRecord>,

    /// Records whose product price could not be read.
    pub unpriced: Vec<(CartRecord, PriceParseError)>,
}

/// Join cart records with products by product id.
#[must_use]
pub fn join(records: Vec<CartRecord>, products: &[Product]) -> Join {
    let by_id: FxHashMap<&ProductId, &Product> =
        products.iter().map(|product| (&product.id, product)).collect();

    let mut joined = Join {
        lines: Vec::with_capacity(records.len()),
        ..Join::default()
    };

    for record in records {
        let Some(product) = by_id.get(&record.product_id) else {
            joined.orphaned.push(record);
            continue;
        };

        match CartLine::from_parts(record.clone(), product) {
            Ok(line) => joined.lines.push(line),
            Err(error) => joined.unpriced.push((record, error)),
        }
    }

    joined
}

/// In-memory cart state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create a cart holding the given lines.
    #[must_use]
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// All lines, in load order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line.
    #[must_use]
    pub fn line(&self, id: &CartLineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Change a line's quantity. Returns `false` when no line matches.
    pub fn set_quantity(&mut self, id: &CartLineId, change: QuantityChange) -> bool {
        self.update(id, |line| {
            line.quantity = match change {
                QuantityChange::Increase => line.quantity.increased(),
                QuantityChange::Decrease => line.quantity.decreased(),
            };
        })
    }

    /// Replace a line's quantity. Returns `false` when no line matches.
    pub fn set_quantity_to(&mut self, id: &CartLineId, quantity: Quantity) -> bool {
        self.update(id, |line| line.quantity = quantity)
    }

    /// Flip a line's selection. Returns `false` when no line matches.
    pub fn toggle_selected(&mut self, id: &CartLineId) -> bool {
        self.update(id, |line| line.checked = !line.checked)
    }

    /// Snapshot of the selected lines.
    #[must_use]
    pub fn selected(&self) -> Vec<CartLine> {
        self.lines.iter().filter(|line| line.checked).cloned().collect()
    }

    /// Whether any line is selected.
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.lines.iter().any(|line| line.checked)
    }

    /// Subtotal of the selected lines.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] when the sum overflows.
    pub fn subtotal(&self) -> Result<Vnd, PricingError> {
        pricing::subtotal(&self.lines)
    }

    /// Remove one line.
    pub fn remove(&mut self, id: &CartLineId) -> Option<CartLine> {
        let index = self.lines.iter().position(|line| &line.id == id)?;

        Some(self.lines.remove(index))
    }

    /// Remove every line whose id is listed.
    pub fn remove_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a CartLineId>) {
        let ids: Vec<&CartLineId> = ids.into_iter().collect();

        self.lines.retain(|line| !ids.contains(&&line.id));
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn update(&mut self, id: &CartLineId, apply: impl FnOnce(&mut CartLine)) -> bool {
        match self.lines.iter_mut().find(|line| &line.id == id) {
            Some(line) => {
                apply(line);
                true
            }
            None => false,
        }
    }
}
