//! Place a mock order from the selected cart lines.

use clementine_core::DeliverySpeed;

use clementine_storefront::cart::CartService;
use clementine_storefront::checkout::CheckoutFlow;
use clementine_storefront::config::StorefrontConfig;
use clementine_storefront::storage::JsonFileStore;

/// Hand the selected cart lines to checkout and place the order.
///
/// # Errors
///
/// Returns an error when the cart has no selected lines or the order
/// cannot be placed.
pub async fn run(
    config: &StorefrontConfig,
    delivery: DeliverySpeed,
    gift: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonFileStore::open(&config.data_dir)?;
    let mut cart = CartService::new(Box::new(store));

    let handoff = cart.checkout_handoff(gift);
    if handoff.lines.is_empty() {
        return Err("no selected items in the cart".into());
    }

    let mut flow = CheckoutFlow::new(Some(handoff), config.mock_latency());
    flow.select_delivery(delivery);

    let order = flow.place_order().await?;

    println!("Order {} placed!", order.order_number);
    println!();
    for line in &order.lines {
        println!(
            "  {:<48} {:>9} x{}",
            line.title,
            line.price.display(),
            line.quantity,
        );
    }
    println!();
    println!("Subtotal:  ${:.2}", order.totals.subtotal);
    println!("Shipping:  ${:.2}", order.totals.shipping);
    println!("Tax:       ${:.2}", order.totals.tax);
    println!("Total:     ${:.2}", order.totals.total);
    println!();
    println!(
        "Shipping to {} at {}, {}.",
        order.address.full_name, order.address.line1, order.address.city
    );
    println!(
        "{} - estimated delivery {}.",
        order.delivery.name, order.estimated_delivery
    );

    // Purchased lines leave the cart.
    for line in &order.lines {
        cart.remove_item(&line.id);
    }
    Ok(())
}
