//! Integration tests for the filter/sort/paginate engine over the
//! fixture catalog.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use clementine_integration_tests::fixture_catalog;
use clementine_storefront::catalog::{
    CriteriaPatch, PageToken, ProductFilterEngine, SortKey,
};

#[test]
fn test_category_filter_matches_eight_electronics() {
    let mut engine = ProductFilterEngine::new(fixture_catalog());
    engine.toggle_category("Electronics");

    // One of the eight is out of stock and hidden by default.
    assert_eq!(engine.match_count(), 7);
    engine.set_include_out_of_stock(true);
    assert_eq!(engine.match_count(), 8);
    assert!(engine
        .page_items()
        .iter()
        .all(|listing| listing.category == "Electronics"));
}

#[test]
fn test_every_visible_listing_satisfies_all_predicates() {
    let mut engine = ProductFilterEngine::new(fixture_catalog());
    engine.toggle_category("Electronics");
    engine.toggle_min_rating(4);
    engine.set_price_bounds(Some(Decimal::from(30)), Some(Decimal::from(100)));

    assert!(engine.match_count() > 0);
    for listing in engine.page_items() {
        assert_eq!(listing.category, "Electronics");
        assert!(listing.rating >= 4.0);
        assert!(listing.price.amount >= Decimal::from(30));
        assert!(listing.price.amount <= Decimal::from(100));
        assert!(listing.in_stock);
    }
}

#[test]
fn test_rating_sort_descends() {
    let mut engine = ProductFilterEngine::new(fixture_catalog());
    engine.set_sort(SortKey::Rating);

    let ratings: Vec<f32> = engine.page_items().iter().map(|l| l.rating).collect();
    let mut sorted = ratings.clone();
    sorted.sort_by(|a, b| b.total_cmp(a));
    assert_eq!(ratings, sorted);
}

#[test]
fn test_price_sorts_are_mirror_images() {
    let mut engine = ProductFilterEngine::new(fixture_catalog());
    engine.set_sort(SortKey::PriceLow);
    let ascending: Vec<Decimal> = engine
        .page_items()
        .iter()
        .map(|l| l.price.amount)
        .collect();

    engine.set_sort(SortKey::PriceHigh);
    let mut descending: Vec<Decimal> = engine
        .page_items()
        .iter()
        .map(|l| l.price.amount)
        .collect();
    descending.reverse();

    assert_eq!(ascending, descending);
}

#[test]
fn test_relevance_puts_promoted_listings_first() {
    let engine = ProductFilterEngine::new(fixture_catalog());
    let items = engine.page_items();

    assert!(items.first().unwrap().editors_choice);
    assert!(items.get(1).unwrap().bestseller);
}

#[test]
fn test_search_narrows_and_clearing_restores() {
    let mut engine = ProductFilterEngine::new(fixture_catalog());
    let all = engine.match_count();

    engine.set_search("webcam");
    assert_eq!(engine.match_count(), 1);

    engine.clear_filters();
    assert_eq!(engine.match_count(), all);
}

#[test]
fn test_single_page_when_matches_fit_page_size() {
    let mut engine = ProductFilterEngine::with_page_size(fixture_catalog(), 16);
    engine.set_include_out_of_stock(true);

    assert_eq!(engine.match_count(), 12);
    assert_eq!(engine.page_count(), 1);
    assert_eq!(engine.start_index(), 1);
    assert_eq!(engine.end_index(), 12);
    assert_eq!(engine.visible_pages(), vec![PageToken::Page(1)]);
}

#[test]
fn test_small_page_size_paginates() {
    let mut engine = ProductFilterEngine::with_page_size(fixture_catalog(), 5);
    engine.set_include_out_of_stock(true);

    assert_eq!(engine.page_count(), 3);
    assert_eq!(engine.page_items().len(), 5);

    engine.go_to_page(3);
    assert_eq!(engine.page_items().len(), 2);
    assert_eq!(engine.start_index(), 11);
    assert_eq!(engine.end_index(), 12);
}

#[test]
fn test_filter_change_resets_to_first_page() {
    let mut engine = ProductFilterEngine::with_page_size(fixture_catalog(), 5);
    engine.go_to_page(2);
    assert_eq!(engine.page(), 2);

    engine.set_criteria(CriteriaPatch {
        search: Some(String::from("a")),
        ..CriteriaPatch::default()
    });
    assert_eq!(engine.page(), 1);
}

#[test]
fn test_out_of_range_page_yields_empty_page_without_panicking() {
    let mut engine = ProductFilterEngine::with_page_size(fixture_catalog(), 5);
    engine.go_to_page(usize::MAX);

    assert!(engine.page_items().is_empty());
    let _ = engine.start_index();
    let _ = engine.end_index();
}

#[test]
fn test_facets_cover_the_whole_catalog() {
    let engine = ProductFilterEngine::new(fixture_catalog());

    let total: usize = engine.category_facets().iter().map(|f| f.count).sum();
    assert_eq!(total, 12);

    let electronics = engine
        .category_facets()
        .iter()
        .find(|f| f.name == "Electronics")
        .unwrap();
    assert_eq!(electronics.count, 8);
}
