//! Catalog browsing: filter, sort, and page through the demo catalog.

use std::collections::BTreeSet;
use std::str::FromStr;

use rust_decimal::Decimal;

use clementine_storefront::catalog::{
    CriteriaPatch, PageToken, ProductFilterEngine, SortKey, sample_catalog,
};
use clementine_storefront::config::StorefrontConfig;

/// Parsed browse flags.
pub struct BrowseRequest {
    pub search: Option<String>,
    pub categories: Vec<String>,
    pub brands: Vec<String>,
    pub ratings: Vec<u8>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub include_out_of_stock: bool,
    pub sort: SortKey,
    pub page: usize,
}

/// Render one catalog page for the given filters.
///
/// # Errors
///
/// Returns an error when a price flag fails to parse as a decimal amount.
pub fn run(
    config: &StorefrontConfig,
    request: BrowseRequest,
) -> Result<(), Box<dyn std::error::Error>> {
    let min_price = parse_price(request.min_price.as_deref())?;
    let max_price = parse_price(request.max_price.as_deref())?;

    let mut engine = ProductFilterEngine::with_page_size(sample_catalog(), config.page_size);
    engine.set_criteria(CriteriaPatch {
        search: request.search,
        categories: Some(request.categories.into_iter().collect::<BTreeSet<_>>()),
        brands: Some(request.brands.into_iter().collect::<BTreeSet<_>>()),
        min_ratings: Some(request.ratings.into_iter().collect::<BTreeSet<_>>()),
        price_bounds: Some((min_price, max_price)),
        include_out_of_stock: Some(request.include_out_of_stock),
        sort: Some(request.sort),
    });
    engine.go_to_page(request.page);

    if engine.match_count() == 0 {
        println!("No products match the current filters.");
        return Ok(());
    }

    println!(
        "Showing {}-{} of {} products (page {} of {})",
        engine.start_index(),
        engine.end_index(),
        engine.match_count(),
        engine.page(),
        engine.page_count(),
    );
    println!();

    for listing in engine.page_items() {
        let badge = if listing.editors_choice {
            "  [editor's choice]"
        } else if listing.bestseller {
            "  [bestseller]"
        } else {
            ""
        };
        let stock = if listing.in_stock {
            ""
        } else {
            "  (out of stock)"
        };
        println!(
            "  #{:<3} {:<48} {:>9}  {:.1}* ({}){badge}{stock}",
            listing.id,
            listing.name,
            listing.price.display(),
            listing.rating,
            listing.review_count,
        );
    }

    println!();
    println!("Pages: {}", render_pages(&engine.visible_pages()));
    Ok(())
}

fn parse_price(raw: Option<&str>) -> Result<Option<Decimal>, Box<dyn std::error::Error>> {
    raw.map(|raw| {
        Decimal::from_str(raw).map_err(|_| format!("invalid price: {raw}").into())
    })
    .transpose()
}

fn render_pages(tokens: &[PageToken]) -> String {
    tokens
        .iter()
        .map(|token| match token {
            PageToken::Page(n) => n.to_string(),
            PageToken::Ellipsis => String::from("..."),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
