//! Pending order builder: derive a draft line for the item the shopper picked.

use storefront_catalog::Item;
use storefront_core::Entity;

use crate::cart::Cart;
use crate::error::CartError;
use crate::line::OrderLine;

/// Draft line for `item`, seeded from the cart.
///
/// - Item already in the cart: a copy of its line, so edits stay local until
///   merged.
/// - Otherwise: a new line with the item's id and title and quantity 0.
///
/// Pure; calling it twice without a merge in between yields equal drafts.
/// Fails only when the cart is closed.
pub fn begin_selection(item: &Item, cart: &Cart) -> Result<OrderLine, CartError> {
    cart.ensure_open()?;

    let draft = match cart.line(*item.id()) {
        Some(existing) => existing.clone(),
        None => OrderLine::for_item(item),
    };

    tracing::debug!(
        item_id = %draft.item_id(),
        quantity = draft.quantity(),
        seeded = cart.line(*item.id()).is_some(),
        "draft order line opened"
    );
    Ok(draft)
}
