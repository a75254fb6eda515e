//! Integration tests for the cart-to-checkout handoff and order
//! placement.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use rust_decimal::Decimal;

use clementine_core::DeliverySpeed;
use clementine_integration_tests::fixture_catalog;
use clementine_storefront::cart::CartService;
use clementine_storefront::checkout::{CheckoutError, CheckoutFlow};
use clementine_storefront::storage::MemoryStore;

fn loaded_cart() -> CartService {
    let catalog = fixture_catalog();
    let mut cart = CartService::new(Box::new(MemoryStore::new()));
    for listing in catalog.iter().take(2) {
        cart.add_item(listing.to_cart_item(), 1);
    }
    cart
}

#[tokio::test]
async fn test_cart_to_order_end_to_end() {
    let cart = loaded_cart();
    // Fixture items 1 and 2: $89.99 + $149.99.
    let handoff = cart.checkout_handoff(false);
    assert_eq!(handoff.subtotal, Decimal::new(23998, 2));

    let flow = CheckoutFlow::new(Some(handoff), Duration::ZERO);
    let order = flow.place_order().await.unwrap();

    assert!(order.order_number.starts_with("CLM-"));
    assert_eq!(order.lines.len(), 2);
    assert_eq!(order.totals.subtotal, Decimal::new(23998, 2));
    assert_eq!(order.totals.shipping, Decimal::ZERO);
    // 8% of 239.98, rounded to cents.
    assert_eq!(order.totals.tax, Decimal::new(1920, 2));
    assert_eq!(order.totals.total, Decimal::new(25918, 2));
}

#[tokio::test]
async fn test_only_selected_lines_reach_the_order() {
    let mut cart = loaded_cart();
    let skipped = cart.lines().first().unwrap().id.clone();
    cart.toggle_selected(&skipped);

    let flow = CheckoutFlow::new(Some(cart.checkout_handoff(false)), Duration::ZERO);
    let order = flow.place_order().await.unwrap();

    assert_eq!(order.lines.len(), 1);
    assert!(order.lines.iter().all(|line| line.id != skipped));
}

#[tokio::test]
async fn test_delivery_tier_changes_totals_and_estimate() {
    let cart = loaded_cart();
    let mut flow = CheckoutFlow::new(Some(cart.checkout_handoff(false)), Duration::ZERO);

    let standard_total = flow.totals().total;
    flow.select_delivery(DeliverySpeed::Express);
    assert_eq!(flow.totals().total, standard_total + Decimal::new(999, 2));

    let order = flow.place_order().await.unwrap();
    assert_eq!(order.delivery.speed, DeliverySpeed::Express);
    assert!(!order.estimated_delivery.is_empty());
}

#[tokio::test]
async fn test_unknown_address_id_keeps_current_selection() {
    let mut flow = CheckoutFlow::new(None, Duration::ZERO);
    assert!(flow.lines().is_empty());

    let before = flow.selected_address().unwrap().id.clone();
    flow.select_address("addr-unknown");
    assert_eq!(flow.selected_address().unwrap().id, before);
}

#[tokio::test]
async fn test_gift_flag_travels_with_the_handoff() {
    let cart = loaded_cart();
    let handoff = cart.checkout_handoff(true);
    assert!(handoff.gift);

    let flow = CheckoutFlow::new(Some(handoff), Duration::ZERO);
    assert!(flow.gift());
}

#[tokio::test]
async fn test_added_payment_method_is_used() {
    let cart = loaded_cart();
    let mut flow = CheckoutFlow::new(Some(cart.checkout_handoff(false)), Duration::ZERO);

    let added_id = flow
        .add_payment(clementine_storefront::checkout::PaymentInput {
            kind: clementine_storefront::checkout::PaymentKind::Credit,
            card_number: String::from("4000 0566 5566 5556"),
            cardholder: String::from("Jane Doe"),
            expiry_month: 9,
            expiry_year: 2031,
            cvv: String::from("456"),
        })
        .unwrap()
        .id
        .clone();

    assert_eq!(flow.selected_payment().unwrap().id, added_id);
    assert!(flow.place_order().await.is_ok());
}

#[tokio::test]
async fn test_invalid_payment_is_rejected_with_fields() {
    let mut flow = CheckoutFlow::new(None, Duration::ZERO);
    let err = flow
        .add_payment(clementine_storefront::checkout::PaymentInput {
            kind: clementine_storefront::checkout::PaymentKind::Debit,
            card_number: String::from("1234"),
            cardholder: String::new(),
            expiry_month: 0,
            expiry_year: 2031,
            cvv: String::from("1"),
        })
        .unwrap_err();

    match err {
        CheckoutError::InvalidPayment(violations) => {
            let fields: Vec<&str> = violations.iter().map(|v| v.field).collect();
            assert_eq!(fields, vec!["card_number", "cardholder", "expiry_month", "cvv"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
