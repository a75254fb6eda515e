//! Shopping cart state container.
//!
//! [`CartService`] owns the active cart lines and the saved-for-later list
//! for the session. Identity of a line is the (id, option-selection) pair:
//! adding a matching item merges quantities instead of creating a
//! duplicate line. Every mutation persists both collections best-effort
//! and publishes the updated snapshot to subscribers before returning.

mod service;
mod types;

pub use service::CartService;
pub use types::{CartLine, CartTotals, CheckoutHandoff, NewCartLine, OptionSelection, SavedLine};
