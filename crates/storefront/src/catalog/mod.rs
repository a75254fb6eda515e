//! Product catalog: listing type, facet counts, and the filter engine.
//!
//! The catalog is a fixed in-memory set supplied once at engine
//! construction and never mutated afterward.

mod filter;
mod sample;

pub use filter::{
    CriteriaPatch, DEFAULT_PAGE_SIZE, FilterCriteria, PageToken, ProductFilterEngine, SortKey,
};
pub use sample::sample_catalog;

use serde::{Deserialize, Serialize};

use clementine_core::{Availability, ItemId, Price, ProductId};

use crate::cart::NewCartLine;

/// A catalog entry. Immutable for the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListing {
    /// Catalog identifier; higher ids are newer (the "newest" sort proxy).
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Current price.
    pub price: Price,
    /// Pre-discount price, when discounted.
    pub original_price: Option<Price>,
    /// Image reference.
    pub image: String,
    /// Average rating, 0-5, fractional allowed.
    pub rating: f32,
    /// Number of reviews behind the rating.
    pub review_count: u32,
    /// Category name.
    pub category: String,
    /// Brand name.
    pub brand: String,
    /// Discount percentage badge.
    pub discount_percent: u8,
    /// "Editor's choice" promotional badge.
    pub editors_choice: bool,
    /// "Bestseller" promotional badge.
    pub bestseller: bool,
    /// Qualifies for free shipping.
    pub free_shipping: bool,
    /// Currently in stock.
    pub in_stock: bool,
}

impl ProductListing {
    /// Promotion rank used by the relevance sort: editor's choice ranks
    /// before bestseller, and a listing carrying both badges ranks before
    /// one carrying editor's choice alone.
    #[must_use]
    pub const fn promotion_rank(&self) -> u8 {
        match (self.editors_choice, self.bestseller) {
            (true, true) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (false, false) => 3,
        }
    }

    /// Build the cart add-payload for this listing.
    #[must_use]
    pub fn to_cart_item(&self) -> NewCartLine {
        NewCartLine {
            id: ItemId::from(self.id),
            title: self.name.clone(),
            image: self.image.clone(),
            price: self.price,
            original_price: self.original_price,
            availability: if self.in_stock {
                Availability::InStock
            } else {
                Availability::OutOfStock
            },
            options: None,
        }
    }
}

/// A facet entry: a category or brand name with its catalog-wide count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount {
    /// Facet value (category or brand name).
    pub name: String,
    /// Number of catalog listings carrying this value.
    pub count: usize,
}

/// Tally facet counts over the full catalog, preserving first-seen order.
pub(crate) fn facet_counts<'a>(
    catalog: &'a [ProductListing],
    key: impl Fn(&'a ProductListing) -> &'a str,
) -> Vec<FacetCount> {
    let mut facets: Vec<FacetCount> = Vec::new();
    for listing in catalog {
        let name = key(listing);
        match facets.iter_mut().find(|facet| facet.name == name) {
            Some(facet) => facet.count += 1,
            None => facets.push(FacetCount {
                name: name.to_owned(),
                count: 1,
            }),
        }
    }
    facets
}

/// Case-insensitive substring search over a facet list (the brand search
/// box). An empty query returns everything.
#[must_use]
pub fn search_facets(facets: &[FacetCount], query: &str) -> Vec<FacetCount> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return facets.to_vec();
    }
    facets
        .iter()
        .filter(|facet| facet.name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facets() -> Vec<FacetCount> {
        vec![
            FacetCount {
                name: String::from("Northwind"),
                count: 2,
            },
            FacetCount {
                name: String::from("Solace Audio"),
                count: 1,
            },
        ]
    }

    #[test]
    fn test_search_facets_case_insensitive() {
        let hits = search_facets(&facets(), "north");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.first().map(|f| f.name.as_str()), Some("Northwind"));
    }

    #[test]
    fn test_search_facets_empty_query_returns_all() {
        assert_eq!(search_facets(&facets(), "  ").len(), 2);
    }
}
