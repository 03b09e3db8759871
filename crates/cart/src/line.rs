use serde::{Deserialize, Serialize};

use storefront_catalog::Item;
use storefront_core::{Entity, ItemId, ValueObject};

/// A purchase intent for one item: a draft while the shopper edits it, a
/// committed line once merged into a cart.
///
/// Immutable. Changing the quantity yields a new line, so a draft can never
/// alias the line stored in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    item_id: ItemId,
    item_title: String,
    quantity: i64,
}

impl OrderLine {
    pub fn new(item_id: ItemId, item_title: impl Into<String>, quantity: i64) -> Self {
        Self {
            item_id,
            item_title: item_title.into(),
            quantity,
        }
    }

    /// Fresh zero-quantity line for an item that is not in the cart yet.
    pub fn for_item(item: &Item) -> Self {
        Self::new(*item.id(), item.title(), 0)
    }

    pub fn with_quantity(&self, quantity: i64) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn item_title(&self) -> &str {
        &self.item_title
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}

/// Lines are keyed by the item they reference; a cart holds at most one line
/// per item id.
impl Entity for OrderLine {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.item_id
    }
}

impl ValueObject for OrderLine {}
