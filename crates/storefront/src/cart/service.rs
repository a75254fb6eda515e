//! The cart state container.

use rust_decimal::Decimal;
use tracing::debug;

use clementine_core::{Availability, ItemId};

use crate::observe::{ObserverSet, SubscriptionId};
use crate::storage::{KeyValueStore, keys, load_json, persist_json};

use super::types::{CartLine, CartTotals, CheckoutHandoff, NewCartLine, SavedLine};

/// Owns the active cart lines and the saved-for-later list.
///
/// Constructed with an injected [`KeyValueStore`]; both collections are
/// restored from it, falling back to empty when a key is absent,
/// malformed, or the store is unavailable. Every public mutation persists
/// the affected collection and notifies its subscribers synchronously
/// before returning. Persistence failures are logged and swallowed.
pub struct CartService {
    lines: Vec<CartLine>,
    saved: Vec<SavedLine>,
    store: Box<dyn KeyValueStore>,
    cart_observers: ObserverSet<[CartLine]>,
    saved_observers: ObserverSet<[SavedLine]>,
}

impl CartService {
    /// Create a cart container, restoring persisted state from `store`.
    #[must_use]
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        let lines: Vec<CartLine> = load_json(store.as_ref(), keys::CART_LINES).unwrap_or_default();
        let saved: Vec<SavedLine> =
            load_json(store.as_ref(), keys::SAVED_ITEMS).unwrap_or_default();
        debug!(
            lines = lines.len(),
            saved = saved.len(),
            "restored cart state"
        );
        Self {
            lines,
            saved,
            store,
            cart_observers: ObserverSet::new(),
            saved_observers: ObserverSet::new(),
        }
    }

    /// Current cart lines.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Current saved-for-later items.
    #[must_use]
    pub fn saved(&self) -> &[SavedLine] {
        &self.saved
    }

    /// Add `quantity` of `item` to the cart.
    ///
    /// If a line with the same id and identical option selection already
    /// exists its quantity is incremented; otherwise a new selected line
    /// is appended. Quantity is assumed positive by the caller.
    pub fn add_item(&mut self, item: NewCartLine, quantity: u32) {
        let existing = self
            .lines
            .iter_mut()
            .find(|line| line.id == item.id && line.options == item.options);

        match existing {
            Some(line) => {
                line.quantity += quantity;
                debug!(id = %item.id, quantity = line.quantity, "merged cart line");
            }
            None => {
                debug!(id = %item.id, quantity, "added cart line");
                self.lines.push(item.into_line(quantity));
            }
        }

        self.persist_cart();
        self.notify_cart();
    }

    /// Remove every line with the given id; no-op if absent.
    pub fn remove_item(&mut self, id: &ItemId) {
        self.lines.retain(|line| line.id != *id);
        self.persist_cart();
        self.notify_cart();
    }

    /// Overwrite the quantity of the line with the given id.
    ///
    /// A quantity of zero removes the line. The container enforces no
    /// upper bound; presentation layers may cap it. No-op if absent.
    pub fn set_quantity(&mut self, id: &ItemId, quantity: u32) {
        if quantity == 0 {
            self.remove_item(id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == *id) {
            line.quantity = quantity;
            self.persist_cart();
            self.notify_cart();
        }
    }

    /// Flip the checkout-selection flag of the line with the given id.
    pub fn toggle_selected(&mut self, id: &ItemId) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == *id) {
            line.selected = !line.selected;
            self.persist_cart();
            self.notify_cart();
        }
    }

    /// Mark every line as selected for checkout.
    pub fn select_all(&mut self) {
        for line in &mut self.lines {
            line.selected = true;
        }
        self.persist_cart();
        self.notify_cart();
    }

    /// Mark every line as not selected for checkout.
    pub fn deselect_all(&mut self) {
        for line in &mut self.lines {
            line.selected = false;
        }
        self.persist_cart();
        self.notify_cart();
    }

    /// Move the line with the given id from the cart to the saved list.
    ///
    /// The saved list de-duplicates by id: if an entry already exists the
    /// snapshot is dropped, but the line is removed from the cart either
    /// way. No-op if the id is not in the cart.
    pub fn save_for_later(&mut self, id: &ItemId) {
        let Some(line) = self.lines.iter().find(|line| line.id == *id) else {
            return;
        };
        let snapshot = SavedLine::from(line);

        if !self.saved.iter().any(|saved| saved.id == *id) {
            self.saved.push(snapshot);
            self.notify_saved();
        }
        self.persist_saved();

        self.remove_item(id);
    }

    /// Move a saved item back into the cart.
    ///
    /// Creates a selected line with quantity 1 and `in-stock`
    /// availability, routed through the same add path as
    /// [`Self::add_item`], so an equivalent existing line merges instead
    /// of duplicating. No-op if the id is not in the saved list.
    pub fn move_to_cart(&mut self, saved_id: &ItemId) {
        let Some(saved) = self.saved.iter().find(|saved| saved.id == *saved_id) else {
            return;
        };

        let item = NewCartLine {
            id: saved.id.clone(),
            title: saved.title.clone(),
            image: saved.image.clone(),
            price: saved.price,
            original_price: saved.original_price,
            availability: Availability::InStock,
            options: None,
        };
        self.add_item(item, 1);

        self.saved.retain(|saved| saved.id != *saved_id);
        self.persist_saved();
        self.notify_saved();
    }

    /// Delete an entry from the saved list.
    pub fn remove_saved(&mut self, id: &ItemId) {
        self.saved.retain(|saved| saved.id != *id);
        self.persist_saved();
        self.notify_saved();
    }

    /// Remove every line from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist_cart();
        self.notify_cart();
    }

    /// Running sums over the current line list.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        let subtotal: Decimal = self.lines.iter().map(CartLine::line_total).sum();
        let selected: Vec<&CartLine> = self.lines.iter().filter(|line| line.selected).collect();
        let selected_subtotal: Decimal = selected.iter().map(|line| line.line_total()).sum();

        CartTotals {
            subtotal,
            selected_subtotal,
            item_count: self.lines.len(),
            selected_item_count: selected.len(),
        }
    }

    /// Sum of quantities across all lines (the header badge count).
    #[must_use]
    pub fn quantity_total(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Whether any line carries the given id.
    #[must_use]
    pub fn is_in_cart(&self, id: &ItemId) -> bool {
        self.lines.iter().any(|line| line.id == *id)
    }

    /// By-value snapshot of the selected lines for the checkout flow.
    #[must_use]
    pub fn checkout_handoff(&self, gift: bool) -> CheckoutHandoff {
        let lines: Vec<CartLine> = self
            .lines
            .iter()
            .filter(|line| line.selected)
            .cloned()
            .collect();
        let subtotal = lines.iter().map(CartLine::line_total).sum();
        CheckoutHandoff {
            lines,
            subtotal,
            gift,
        }
    }

    /// Subscribe to cart snapshots.
    ///
    /// The observer is invoked immediately with the current snapshot, then
    /// synchronously after every mutation.
    pub fn subscribe_cart(
        &mut self,
        mut observer: impl FnMut(&[CartLine]) + Send + 'static,
    ) -> SubscriptionId {
        observer(&self.lines);
        self.cart_observers.subscribe(observer)
    }

    /// Subscribe to saved-list snapshots (replays the current snapshot).
    pub fn subscribe_saved(
        &mut self,
        mut observer: impl FnMut(&[SavedLine]) + Send + 'static,
    ) -> SubscriptionId {
        observer(&self.saved);
        self.saved_observers.subscribe(observer)
    }

    /// Remove a cart observer.
    pub fn unsubscribe_cart(&mut self, id: SubscriptionId) -> bool {
        self.cart_observers.unsubscribe(id)
    }

    /// Remove a saved-list observer.
    pub fn unsubscribe_saved(&mut self, id: SubscriptionId) -> bool {
        self.saved_observers.unsubscribe(id)
    }

    fn persist_cart(&mut self) {
        persist_json(self.store.as_mut(), keys::CART_LINES, &self.lines);
    }

    fn persist_saved(&mut self) {
        persist_json(self.store.as_mut(), keys::SAVED_ITEMS, &self.saved);
    }

    fn notify_cart(&mut self) {
        self.cart_observers.notify(&self.lines);
    }

    fn notify_saved(&mut self) {
        self.saved_observers.notify(&self.saved);
    }
}

impl core::fmt::Debug for CartService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CartService")
            .field("lines", &self.lines.len())
            .field("saved", &self.saved.len())
            .finish_non_exhaustive()
    }
}
