//! Integration tests for on-disk persistence across service
//! reconstructions.

#![allow(clippy::unwrap_used)]

use clementine_core::ItemId;
use clementine_integration_tests::fixture_catalog;
use clementine_storefront::cart::CartService;
use clementine_storefront::storage::{JsonFileStore, KeyValueStore, keys};

fn cart_at(dir: &std::path::Path) -> CartService {
    let store = JsonFileStore::open(dir).unwrap();
    CartService::new(Box::new(store))
}

#[test]
fn test_cart_and_saved_list_survive_reconstruction() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = fixture_catalog();

    {
        let mut cart = cart_at(dir.path());
        cart.add_item(catalog.first().unwrap().to_cart_item(), 2);
        cart.add_item(catalog.get(1).unwrap().to_cart_item(), 1);
        let saved_id = cart.lines().get(1).unwrap().id.clone();
        cart.save_for_later(&saved_id);
    }

    let cart = cart_at(dir.path());
    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines().first().unwrap().quantity, 2);
    assert_eq!(cart.saved().len(), 1);
}

#[test]
fn test_selection_state_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = fixture_catalog();
    let id;

    {
        let mut cart = cart_at(dir.path());
        cart.add_item(catalog.first().unwrap().to_cart_item(), 1);
        id = cart.lines().first().unwrap().id.clone();
        cart.toggle_selected(&id);
    }

    let cart = cart_at(dir.path());
    assert!(!cart.lines().first().unwrap().selected);
    assert!(cart.is_in_cart(&id));
}

#[test]
fn test_corrupt_state_falls_back_to_empty_cart() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = JsonFileStore::open(dir.path()).unwrap();
    store.set(keys::CART_LINES, "{not json").unwrap();

    let cart = cart_at(dir.path());
    assert!(cart.lines().is_empty());
    assert!(cart.saved().is_empty());
}

#[test]
fn test_two_data_dirs_are_independent() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();
    let catalog = fixture_catalog();

    {
        let mut cart = cart_at(dir_a.path());
        cart.add_item(catalog.first().unwrap().to_cart_item(), 1);
    }

    let cart_b = cart_at(dir_b.path());
    assert!(cart_b.lines().is_empty());

    let cart_a = cart_at(dir_a.path());
    assert_eq!(cart_a.lines().len(), 1);
}

#[test]
fn test_removal_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = fixture_catalog();

    {
        let mut cart = cart_at(dir.path());
        cart.add_item(catalog.first().unwrap().to_cart_item(), 1);
        cart.remove_item(&ItemId::from(catalog.first().unwrap().id));
    }

    let cart = cart_at(dir.path());
    assert!(cart.lines().is_empty());
}
