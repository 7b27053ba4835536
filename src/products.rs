//! Products
//!
//! The canonical product shape. Raw backend records are accepted in
//! [`raw`], turned into [`Product`] by [`normalize`], and bucketed by
//! [`categories`]. Nothing downstream of normalisation sees the raw shape.

use std::{fmt, num::ParseIntError, str::FromStr};

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::items::modifiers::Size;

pub mod categories;
pub mod normalize;
pub mod raw;

#[cfg(test)]
pub(crate) mod fixtures;

use categories::MenuCategory;

/// Backend product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Wraps a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ProductId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Which modifier choices a product offers, computed once at normalisation.
#[expect(
    clippy::struct_excessive_bools,
    reason = "One independent flag per modifier family"
)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// The customer must pick a milk type.
    pub milk: bool,

    /// The customer may add food extras.
    pub extras: bool,

    /// The customer must pick a protein or creatine scoop.
    pub protein: bool,

    /// The customer may pick chilled or blended preparation (cold drinks).
    pub preparation: bool,
}

/// Canonical product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Backend identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Description, empty when the backend has none.
    pub description: String,

    /// Primary price. Zero means the product needs manual pricing.
    pub price: Money<'static, Currency>,

    /// Label of the primary size, if the product is sized.
    pub size_label: Option<String>,

    /// Label of the second size.
    pub large_size_label: Option<String>,

    /// Price of the second size, only when it parsed to a positive amount.
    pub large_price: Option<Money<'static, Currency>>,

    /// Category label exactly as the backend sent it.
    pub category_label: Option<String>,

    /// Explicit sub-category from the backend, used to resolve ambiguous categories.
    pub subcategory: Option<String>,

    /// Menu bucket, resolved at normalisation.
    pub category: MenuCategory,

    /// Modifier capabilities.
    pub capabilities: Capabilities,

    /// Image URL (data URL or image endpoint).
    pub image_url: Option<String>,

    /// Preparation time in minutes.
    pub preparation_minutes: Option<u32>,

    /// Whether the product can currently be sold.
    pub active: bool,
}

impl Product {
    /// Whether the product has no usable price and must not be sold.
    pub fn needs_pricing(&self) -> bool {
        self.price.to_minor_units() <= 0
    }

    /// Whether the product offers a second, larger size.
    pub fn has_large_size(&self) -> bool {
        self.large_price.is_some()
    }

    /// Resolves a requested size against the sizes this product actually has.
    ///
    /// Falls back to the regular size and primary price when the product has
    /// no second size.
    pub fn price_for(&self, size: Size) -> (Size, Money<'static, Currency>) {
        match (size, self.large_price) {
            (Size::Large, Some(price)) => (Size::Large, price),
            _ => (Size::Regular, self.price),
        }
    }

    /// Display label for a resolved size.
    pub fn size_label(&self, size: Size) -> String {
        let label = match size {
            Size::Regular => self.size_label.as_deref(),
            Size::Large => self.large_size_label.as_deref(),
        };

        label.unwrap_or(size.default_label()).to_string()
    }
}
