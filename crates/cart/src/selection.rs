use storefront_catalog::Item;
use storefront_core::Entity;

use crate::accumulator;
use crate::builder;
use crate::cart::Cart;
use crate::error::CartError;
use crate::line::OrderLine;

/// One open item selection: the item the shopper clicked plus its draft line.
///
/// Walks a single item through `DRAFT -> {discarded | MERGED}`. Reopening a
/// merged item is just another [`Selection::begin`], which seeds the draft
/// from the committed line.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    item: Item,
    draft: OrderLine,
}

impl Selection {
    pub fn begin(item: &Item, cart: &Cart) -> Result<Self, CartError> {
        let draft = builder::begin_selection(item, cart)?;
        Ok(Self {
            item: item.clone(),
            draft,
        })
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn draft(&self) -> &OrderLine {
        &self.draft
    }

    /// The same selection with the shopper's new total for this item.
    pub fn with_quantity(self, quantity: i64) -> Self {
        Self {
            draft: self.draft.with_quantity(quantity),
            item: self.item,
        }
    }

    /// Swap in a fresher catalog view of the item (e.g. after the listing
    /// was reloaded). `None` means the item vanished from the catalog.
    pub fn refreshed(self, item: Option<&Item>) -> Result<Self, CartError> {
        match item {
            Some(item) if *item.id() == self.draft.item_id() => Ok(Self {
                item: item.clone(),
                draft: self.draft,
            }),
            _ => Err(CartError::UnknownItem(self.draft.item_id())),
        }
    }

    pub fn check(&self, cart: &Cart) -> Result<(), CartError> {
        accumulator::check(&self.draft, cart, Some(&self.item))
    }

    pub fn can_accept(&self, cart: &Cart) -> bool {
        accumulator::can_accept(&self.draft, cart, Some(&self.item))
    }

    /// Validate and merge in one step.
    pub fn commit(self, cart: &Cart) -> Result<Cart, CartError> {
        self.check(cart)?;
        accumulator::merge(self.draft, cart)
    }

    /// Abandon the selection; the cart is untouched.
    pub fn discard(self) -> OrderLine {
        tracing::debug!(item_id = %self.draft.item_id(), "draft order line discarded");
        self.draft
    }
}
