//! Cart accumulator: validate drafts against stock and merge them.
//!
//! A draft **replaces** the quantity of the cart's existing line for the same
//! item; it never adds to it. The builder seeds a reopened draft with the
//! committed quantity, so whatever the shopper types is already the new total.
//!
//! The stock check here is an optimistic, client-side pre-check. It does not
//! know about other sessions' pending carts; the order backend is the
//! authoritative enforcement point.

use storefront_catalog::Item;
use storefront_core::{Entity, ItemId};

use crate::cart::Cart;
use crate::error::CartError;
use crate::line::OrderLine;

/// Validate `draft` for merging into `cart`, naming the reason on refusal.
///
/// `item` is the catalog's current view of the draft's item; `None` (or an
/// item with a different id) means the item is unknown.
pub fn check(draft: &OrderLine, cart: &Cart, item: Option<&Item>) -> Result<(), CartError> {
    cart.ensure_open()?;

    let item = match item {
        Some(item) if *item.id() == draft.item_id() => item,
        _ => return Err(CartError::UnknownItem(draft.item_id())),
    };

    if draft.quantity() < 0 {
        return Err(CartError::NegativeQuantity {
            item_id: draft.item_id(),
            quantity: draft.quantity(),
        });
    }

    if draft.quantity() > item.count() {
        return Err(CartError::OutOfStock {
            item_id: draft.item_id(),
            requested: draft.quantity(),
            available: item.count(),
        });
    }

    Ok(())
}

/// Whether `draft` may be merged. Collapses [`check`] to a flag for the UI.
pub fn can_accept(draft: &OrderLine, cart: &Cart, item: Option<&Item>) -> bool {
    match check(draft, cart, item) {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(
                item_id = %draft.item_id(),
                requested = draft.quantity(),
                previous = cart.line(draft.item_id()).map(OrderLine::quantity).unwrap_or(0),
                error = %err,
                "draft order line rejected"
            );
            false
        }
    }
}

/// Upsert `draft` into a new cart value.
///
/// Structural only: stock is **not** re-validated, so callers run [`check`]
/// (or [`can_accept`]) first. Item stock is never touched. A closed cart
/// yields `InvalidState` and the caller's cart stays as it was.
pub fn merge(draft: OrderLine, cart: &Cart) -> Result<Cart, CartError> {
    cart.ensure_open()?;

    let item_id = *draft.id();
    let previous = cart.line(item_id).map(OrderLine::quantity);
    let quantity = draft.quantity();
    let next = cart.upserted(draft);

    tracing::debug!(
        item_id = %item_id,
        quantity,
        previous = ?previous,
        lines = next.len(),
        version = next.version(),
        "draft order line merged"
    );
    Ok(next)
}

/// Drop the line for `item_id`, if any.
pub fn remove(item_id: ItemId, cart: &Cart) -> Result<Cart, CartError> {
    cart.ensure_open()?;
    let next = cart.without(item_id);
    tracing::debug!(item_id = %item_id, lines = next.len(), "order line removed");
    Ok(next)
}
