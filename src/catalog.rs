//! Catalog
//!
//! Categories and products as the item store describes them, plus the local
//! rules the admin tooling applies before writing them back.

use std::cmp::Ordering;

use serde::Serialize;
use thiserror::Error;

use crate::{
    ids::TypedId,
    prices::{PriceParseError, Vnd, parse_price},
};

/// Label shown when a product has no type or an unknown category.
pub const UNKNOWN_LABEL: &str = "Không xác định";

/// Shortest accepted category name, in characters.
pub const CATEGORY_NAME_MIN: usize = 2;

/// Longest accepted category name, in characters.
pub const CATEGORY_NAME_MAX: usize = 50;

/// Category Id
pub type CategoryId = TypedId<Category>;

/// Product Id
pub type ProductId = TypedId<Product>;

/// Category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Store-assigned id.
    pub id: CategoryId,

    /// Display name.
    pub name: String,
}

/// Product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Store-assigned id.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Free-form product type, shown as the cart line's category label.
    pub kind: Option<String>,

    /// Localized price string exactly as stored, e.g. `"120.000đ"`.
    pub price: String,

    /// Image URI.
    pub image: String,

    /// Owning category.
    pub category_id: CategoryId,
}

impl Product {
    /// Parse the stored price.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceParseError`] when the stored price is not a valid amount.
    pub fn parsed_price(&self) -> Result<Vnd, PriceParseError> {
        parse_price(&self.price)
    }

    /// The type label, falling back to [`UNKNOWN_LABEL`].
    #[must_use]
    pub fn kind_label(&self) -> &str {
        self.kind
            .as_deref()
            .filter(|kind| !kind.trim().is_empty())
            .unwrap_or(UNKNOWN_LABEL)
    }
}

/// Category write payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCategory {
    /// Trimmed display name.
    pub name: String,
}

impl NewCategory {
    /// Validate and trim a category name.
    ///
    /// # Errors
    ///
    /// Returns a [`CategoryNameError`] describing the first rule the name breaks.
    pub fn new(name: &str) -> Result<Self, CategoryNameError> {
        validate_category_name(name)?;

        Ok(Self {
            name: name.trim().to_string(),
        })
    }
}

/// Product write payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    /// Display name.
    pub name: String,

    /// Product type.
    #[serde(rename = "type")]
    pub kind: String,

    /// Localized price string.
    pub price: String,

    /// Image URI.
    pub image: String,

    /// Owning category.
    pub category_id: CategoryId,
}

impl NewProduct {
    /// Check the fields the store requires.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductDraftError`] naming the first missing or invalid field.
    pub fn validate(&self) -> Result<(), ProductDraftError> {
        if self.name.trim().is_empty() {
            return Err(ProductDraftError::MissingName);
        }

        if self.price.trim().is_empty() {
            return Err(ProductDraftError::MissingPrice);
        }

        if self.category_id.as_str().trim().is_empty() {
            return Err(ProductDraftError::MissingCategory);
        }

        parse_price(&self.price)?;

        Ok(())
    }
}

impl From<&Product> for NewProduct {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            kind: product.kind.clone().unwrap_or_default(),
            price: product.price.clone(),
            image: product.image.clone(),
            category_id: product.category_id.clone(),
        }
    }
}

/// Category name rule violations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CategoryNameError {
    /// Blank name.
    #[error("category name must not be empty")]
    Empty,

    /// Fewer than [`CATEGORY_NAME_MIN`] characters.
    #[error("category name must be at least {CATEGORY_NAME_MIN} characters")]
    TooShort,

    /// More than [`CATEGORY_NAME_MAX`] characters.
    #[error("category name must be at most {CATEGORY_NAME_MAX} characters")]
    TooLong,

    /// Contains something other than letters, digits and whitespace.
    #[error("category name may only contain letters, digits and spaces")]
    InvalidCharacter(char),
}

/// Product payload problems.
#[derive(Debug, Error, PartialEq)]
pub enum ProductDraftError {
    /// Blank name.
    #[error("product name is required")]
    MissingName,

    /// Blank price.
    #[error("product price is required")]
    MissingPrice,

    /// Blank category id.
    #[error("product category is required")]
    MissingCategory,

    /// Price present but unreadable.
    #[error(transparent)]
    InvalidPrice(#[from] PriceParseError),
}

/// Check a category name against the admin rules.
///
/// Length is measured on the untrimmed name, in characters.
///
/// # Errors
///
/// Returns the first [`CategoryNameError`] the name breaks.
pub fn validate_category_name(name: &str) -> Result<(), CategoryNameError> {
    if name.trim().is_empty() {
        return Err(CategoryNameError::Empty);
    }

    let length = name.chars().count();

    if length < CATEGORY_NAME_MIN {
        return Err(CategoryNameError::TooShort);
    }

    if length > CATEGORY_NAME_MAX {
        return Err(CategoryNameError::TooLong);
    }

    if let Some(invalid) = name.chars().find(|c| !is_name_char(*c)) {
        return Err(CategoryNameError::InvalidCharacter(invalid));
    }

    Ok(())
}

fn is_name_char(c: char) -> bool {
    // Latin-1 and Latin Extended Additional cover Vietnamese letters.
    c.is_ascii_alphanumeric() || c.is_whitespace() || ('À'..='ỹ').contains(&c)
}

/// Anything with a display name the catalog can search and sort on.
pub trait Named {
    /// Display name.
    fn name(&self) -> &str;
}

impl Named for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Product {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Case-insensitive substring search on name. A blank query matches everything.
#[must_use]
pub fn search<'a, T: Named>(entries: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();

    entries
        .iter()
        .filter(|entry| needle.is_empty() || entry.name().to_lowercase().contains(&needle))
        .collect()
}

/// Sort by name, ascending, comparing case-insensitively first.
pub fn sort_by_name<T: Named>(entries: &mut [T]) {
    entries.sort_by(|a, b| compare_names(a.name(), b.name()));
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Name of the category with the given id, or [`UNKNOWN_LABEL`].
#[must_use]
pub fn category_label<'a>(categories: &'a [Category], id: &CategoryId) -> &'a str {
    categories
        .iter()
        .find(|category| &category.id == id)
        .map_or(UNKNOWN_LABEL, |category| category.name.as_str())
}
