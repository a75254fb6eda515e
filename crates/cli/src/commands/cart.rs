//! Cart management against the persisted data directory.

use clementine_core::ItemId;

use clementine_storefront::cart::CartService;
use clementine_storefront::catalog::sample_catalog;
use clementine_storefront::config::StorefrontConfig;
use clementine_storefront::storage::JsonFileStore;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

fn open_cart(config: &StorefrontConfig) -> Result<CartService, Box<dyn std::error::Error>> {
    let store = JsonFileStore::open(&config.data_dir)?;
    Ok(CartService::new(Box::new(store)))
}

/// Add `quantity` of a catalog product to the cart.
pub fn add(config: &StorefrontConfig, product_id: i32, quantity: u32) -> CommandResult {
    let catalog = sample_catalog();
    let listing = catalog
        .iter()
        .find(|listing| listing.id.as_i32() == product_id)
        .ok_or_else(|| format!("no product with id {product_id}"))?;

    let mut cart = open_cart(config)?;
    cart.add_item(listing.to_cart_item(), quantity.max(1));
    println!("Added {} x{} to the cart.", listing.name, quantity.max(1));
    Ok(())
}

/// Print cart lines and the saved-for-later list.
pub fn list(config: &StorefrontConfig) -> CommandResult {
    let cart = open_cart(config)?;

    if cart.lines().is_empty() {
        println!("Your cart is empty.");
    } else {
        println!("Cart:");
        for line in cart.lines() {
            let mark = if line.selected { "x" } else { " " };
            let options = line
                .options
                .as_ref()
                .map(|options| {
                    let pairs: Vec<String> =
                        options.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                    format!("  ({})", pairs.join(", "))
                })
                .unwrap_or_default();
            println!(
                "  [{mark}] {:<12} {:<48} {:>9} x{}{options}",
                line.id,
                line.title,
                line.price.display(),
                line.quantity,
            );
        }
    }

    if !cart.saved().is_empty() {
        println!();
        println!("Saved for later:");
        for saved in cart.saved() {
            println!(
                "      {:<12} {:<48} {:>9}",
                saved.id,
                saved.title,
                saved.price.display(),
            );
        }
    }
    Ok(())
}

/// Remove a line from the cart.
pub fn remove(config: &StorefrontConfig, item_id: &str) -> CommandResult {
    let mut cart = open_cart(config)?;
    cart.remove_item(&ItemId::from(item_id));
    println!("Removed {item_id} from the cart.");
    Ok(())
}

/// Change a line's quantity; zero removes the line.
pub fn set_quantity(config: &StorefrontConfig, item_id: &str, quantity: u32) -> CommandResult {
    let mut cart = open_cart(config)?;
    cart.set_quantity(&ItemId::from(item_id), quantity);
    if quantity == 0 {
        println!("Removed {item_id} from the cart.");
    } else {
        println!("Set {item_id} to quantity {quantity}.");
    }
    Ok(())
}

/// Move a cart line to the saved-for-later list.
pub fn save(config: &StorefrontConfig, item_id: &str) -> CommandResult {
    let mut cart = open_cart(config)?;
    cart.save_for_later(&ItemId::from(item_id));
    println!("Saved {item_id} for later.");
    Ok(())
}

/// Move a saved item back into the cart.
pub fn move_to_cart(config: &StorefrontConfig, item_id: &str) -> CommandResult {
    let mut cart = open_cart(config)?;
    cart.move_to_cart(&ItemId::from(item_id));
    println!("Moved {item_id} to the cart.");
    Ok(())
}

/// Print cart totals.
pub fn totals(config: &StorefrontConfig) -> CommandResult {
    let cart = open_cart(config)?;
    let totals = cart.totals();
    println!("Items:            {}", totals.item_count);
    println!("Selected items:   {}", totals.selected_item_count);
    println!("Subtotal:         ${:.2}", totals.subtotal);
    println!("Selected subtotal: ${:.2}", totals.selected_subtotal);
    Ok(())
}

/// Empty the cart.
pub fn clear(config: &StorefrontConfig) -> CommandResult {
    let mut cart = open_cart(config)?;
    cart.clear();
    println!("Cart cleared.");
    Ok(())
}
