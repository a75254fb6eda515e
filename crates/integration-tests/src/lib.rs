//! Integration tests for Clementine.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p clementine-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart, saved-for-later, and selection behavior
//! - `product_filtering` - Filter, sort, and pagination over a fixture catalog
//! - `auth_flow` - Mocked sign-in, registration, and session restore
//! - `checkout_flow` - Cart to order handoff and order placement
//! - `persistence` - On-disk state across service reconstructions
//!
//! The library part of this crate holds shared fixtures.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clementine_core::{Price, ProductId};
use clementine_storefront::catalog::ProductListing;

/// A fixture catalog mirroring the demo one's shape: twelve listings,
/// eight in `Electronics`, one out of stock, a couple of promoted entries.
#[must_use]
pub fn fixture_catalog() -> Vec<ProductListing> {
    let mut catalog: Vec<ProductListing> = [
        (1, "Gamma Headphones", 8999, 4.6, "Electronics", "Gamma"),
        (2, "Delta Smartwatch", 14999, 4.4, "Electronics", "Delta"),
        (3, "Epsilon Tablet", 22900, 4.7, "Electronics", "Epsilon"),
        (4, "Zeta Desk Lamp", 3499, 4.2, "Home", "Zeta"),
        (5, "Eta French Press", 2799, 4.8, "Home", "Eta"),
        (6, "Theta Speaker", 4599, 4.3, "Electronics", "Theta"),
        (7, "Iota Keyboard", 7999, 4.5, "Electronics", "Iota"),
        (8, "Kappa Streaming Stick", 3999, 4.1, "Electronics", "Kappa"),
        (9, "Lambda Water Bottle", 1899, 4.9, "Outdoors", "Lambda"),
        (10, "Mu Charging Pad", 2499, 3.9, "Electronics", "Mu"),
        (11, "Nu Blanket", 5499, 4.4, "Home", "Nu"),
        (12, "Xi Webcam", 6499, 4.0, "Electronics", "Xi"),
    ]
    .into_iter()
    .map(|(id, name, cents, rating, category, brand)| ProductListing {
        id: ProductId::new(id),
        name: String::from(name),
        price: Price::from_cents(cents),
        original_price: None,
        image: format!("assets/products/{id}.svg"),
        rating,
        review_count: 500,
        category: String::from(category),
        brand: String::from(brand),
        discount_percent: 0,
        editors_choice: false,
        bestseller: false,
        free_shipping: true,
        in_stock: true,
    })
    .collect();

    for entry in &mut catalog {
        match entry.id.as_i32() {
            1 => entry.editors_choice = true,
            6 => entry.bestseller = true,
            10 => entry.in_stock = false,
            _ => {}
        }
    }
    catalog
}
