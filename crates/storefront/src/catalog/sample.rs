//! Built-in demo catalog used by the CLI and tests.

use clementine_core::{Price, ProductId};

use super::ProductListing;

#[allow(clippy::too_many_arguments)]
fn listing(
    id: i32,
    name: &str,
    cents: i64,
    original_cents: Option<i64>,
    rating: f32,
    review_count: u32,
    category: &str,
    brand: &str,
) -> ProductListing {
    let discount_percent = original_cents
        .filter(|original| *original > cents)
        .map_or(0, |original| {
            u8::try_from(((original - cents) * 100) / original).unwrap_or(0)
        });
    ProductListing {
        id: ProductId::new(id),
        name: name.to_owned(),
        price: Price::from_cents(cents),
        original_price: original_cents.map(Price::from_cents),
        image: format!("assets/products/{id}.svg"),
        rating,
        review_count,
        category: category.to_owned(),
        brand: brand.to_owned(),
        discount_percent,
        editors_choice: false,
        bestseller: false,
        free_shipping: true,
        in_stock: true,
    }
}

/// The stock twelve-listing demo catalog.
#[must_use]
pub fn sample_catalog() -> Vec<ProductListing> {
    let mut catalog = vec![
        listing(
            1,
            "Aurora Wireless Noise-Cancelling Headphones",
            8999,
            Some(12999),
            4.6,
            12483,
            "Electronics",
            "Aurora",
        ),
        listing(
            2,
            "Pulse Fitness Smartwatch with GPS",
            14999,
            Some(19999),
            4.4,
            8912,
            "Electronics",
            "Pulse",
        ),
        listing(
            3,
            "Voyager 10\" Tablet, 128 GB",
            22900,
            None,
            4.7,
            5421,
            "Electronics",
            "Voyager",
        ),
        listing(
            4,
            "Ember Smart LED Desk Lamp",
            3499,
            Some(4499),
            4.2,
            2310,
            "Home & Kitchen",
            "Ember",
        ),
        listing(
            5,
            "Cascade Stainless Steel French Press",
            2799,
            None,
            4.8,
            6704,
            "Home & Kitchen",
            "Cascade",
        ),
        listing(
            6,
            "Nimbus Portable Bluetooth Speaker",
            4599,
            Some(5999),
            4.3,
            15230,
            "Electronics",
            "Nimbus",
        ),
        listing(
            7,
            "Strata Mechanical Gaming Keyboard",
            7999,
            None,
            4.5,
            3877,
            "Electronics",
            "Strata",
        ),
        listing(
            8,
            "Meridian 4K Streaming Stick",
            3999,
            Some(4999),
            4.1,
            21056,
            "Electronics",
            "Meridian",
        ),
        listing(
            9,
            "Sierra Insulated Water Bottle, 32 oz",
            1899,
            None,
            4.9,
            9443,
            "Sports & Outdoors",
            "Sierra",
        ),
        listing(
            10,
            "Orbit Wireless Charging Pad",
            2499,
            Some(3499),
            3.9,
            4120,
            "Electronics",
            "Orbit",
        ),
        listing(
            11,
            "Harbor Weighted Blanket, 15 lb",
            5499,
            None,
            4.4,
            1875,
            "Home & Kitchen",
            "Harbor",
        ),
        listing(
            12,
            "Zenith 1080p Webcam with Ring Light",
            6499,
            Some(7999),
            4.0,
            2944,
            "Electronics",
            "Zenith",
        ),
    ];

    for entry in &mut catalog {
        match entry.id.as_i32() {
            1 => entry.editors_choice = true,
            5 | 6 => entry.bestseller = true,
            9 => entry.editors_choice = true,
            10 => entry.in_stock = false,
            _ => {}
        }
    }

    catalog
}
