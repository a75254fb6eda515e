//! Status enums shared across the storefront.

use serde::{Deserialize, Serialize};

/// Stock availability of a cart line or catalog item.
///
/// Serialized with the kebab-case tags the persisted cart format uses
/// (`"in-stock"`, `"out-of-stock"`, `"limited"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Availability {
    #[default]
    InStock,
    OutOfStock,
    Limited,
}

impl Availability {
    /// Human-readable label for display.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::OutOfStock => "Out of Stock",
            Self::Limited => "Limited Availability",
        }
    }
}

/// Delivery speed chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DeliverySpeed {
    #[default]
    Standard,
    Express,
    Overnight,
}

impl DeliverySpeed {
    /// Business days until the order is expected to arrive.
    #[must_use]
    pub const fn transit_days(&self) -> u32 {
        match self {
            Self::Standard => 7,
            Self::Express => 3,
            Self::Overnight => 1,
        }
    }
}
