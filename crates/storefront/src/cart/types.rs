//! Cart domain types.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clementine_core::{Availability, ItemId, Price};

/// Selected product options qualifying a cart line (e.g., color, size).
///
/// `BTreeMap` keeps the map in a canonical key order so two selections
/// with the same pairs always compare (and serialize) equal.
pub type OptionSelection = BTreeMap<String, String>;

/// One distinct product held in the cart.
///
/// At most one `CartLine` exists per (id, options) pair; see
/// [`super::CartService::add_item`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Item identifier.
    pub id: ItemId,
    /// Display title.
    pub title: String,
    /// Image reference.
    pub image: String,
    /// Unit price.
    pub price: Price,
    /// Pre-discount price, when discounted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    /// Quantity, always >= 1 while the line exists.
    pub quantity: u32,
    /// Stock availability tag.
    pub availability: Availability,
    /// Selected product options, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<OptionSelection>,
    /// Whether this line participates in the checkout subtotal.
    pub selected: bool,
}

impl CartLine {
    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.amount * Decimal::from(self.quantity)
    }
}

/// Caller-supplied portion of a cart line; quantity and selection state
/// are decided by the add path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCartLine {
    /// Item identifier.
    pub id: ItemId,
    /// Display title.
    pub title: String,
    /// Image reference.
    pub image: String,
    /// Unit price.
    pub price: Price,
    /// Pre-discount price, when discounted.
    pub original_price: Option<Price>,
    /// Stock availability tag.
    pub availability: Availability,
    /// Selected product options, if any.
    pub options: Option<OptionSelection>,
}

impl NewCartLine {
    pub(crate) fn into_line(self, quantity: u32) -> CartLine {
        CartLine {
            id: self.id,
            title: self.title,
            image: self.image,
            price: self.price,
            original_price: self.original_price,
            quantity,
            availability: self.availability,
            options: self.options,
            selected: true,
        }
    }
}

/// Lightweight snapshot of a line moved out of the active cart but
/// retained for later reactivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLine {
    /// Item identifier.
    pub id: ItemId,
    /// Display title.
    pub title: String,
    /// Image reference.
    pub image: String,
    /// Unit price.
    pub price: Price,
    /// Pre-discount price, when discounted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
}

impl From<&CartLine> for SavedLine {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.clone(),
            title: line.title.clone(),
            image: line.image.clone(),
            price: line.price,
            original_price: line.original_price,
        }
    }
}

/// Running sums over the current line list.
///
/// Counts are line counts, not quantity sums; see
/// [`super::CartService::quantity_total`] for the quantity sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of price x quantity over all lines.
    pub subtotal: Decimal,
    /// Sum of price x quantity over selected lines only.
    pub selected_subtotal: Decimal,
    /// Number of lines.
    pub item_count: usize,
    /// Number of selected lines.
    pub selected_item_count: usize,
}

/// By-value snapshot handed from the cart view to the checkout flow.
///
/// The checkout flow treats a missing handoff as an empty state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutHandoff {
    /// Selected cart lines.
    pub lines: Vec<CartLine>,
    /// Subtotal over the selected lines.
    pub subtotal: Decimal,
    /// Whether the order is a gift.
    pub gift: bool,
}
