use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use storefront_core::{CartId, Entity, ItemId};

use crate::email::Email;
use crate::error::CartError;
use crate::line::OrderLine;

/// The shopper's in-progress cart.
///
/// Lines are keyed by item id, so "one line per item" holds by construction.
/// Once `closed_at` is set (by the backend) the cart is terminal and every
/// modifying operation fails with [`CartError::InvalidState`].
///
/// Serialized lines are a plain list; deserializing goes through
/// [`Cart::from_parts`] and starts the version counter over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "CartRecord", try_from = "CartRecord")]
pub struct Cart {
    id: Option<CartId>,
    email: Option<Email>,
    closed_at: Option<NaiveDate>,
    lines: BTreeMap<ItemId, OrderLine>,
    version: u64,
}

#[derive(Serialize, Deserialize)]
struct CartRecord {
    id: Option<CartId>,
    email: Option<Email>,
    closed_at: Option<NaiveDate>,
    #[serde(default)]
    lines: Vec<OrderLine>,
}

impl From<Cart> for CartRecord {
    fn from(cart: Cart) -> Self {
        Self {
            id: cart.id,
            email: cart.email,
            closed_at: cart.closed_at,
            lines: cart.lines.into_values().collect(),
        }
    }
}

impl TryFrom<CartRecord> for Cart {
    type Error = CartError;

    fn try_from(record: CartRecord) -> Result<Self, Self::Error> {
        Cart::from_parts(record.id, record.email, record.closed_at, record.lines)
    }
}

impl Cart {
    /// Empty open cart, as created at session start.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from stored parts (e.g. a backend response).
    pub fn from_parts(
        id: Option<CartId>,
        email: Option<Email>,
        closed_at: Option<NaiveDate>,
        lines: impl IntoIterator<Item = OrderLine>,
    ) -> Result<Self, CartError> {
        let mut map = BTreeMap::new();
        for line in lines {
            match map.entry(*line.id()) {
                Entry::Occupied(_) => return Err(CartError::DuplicateLine(line.item_id())),
                Entry::Vacant(slot) => {
                    slot.insert(line);
                }
            }
        }
        Ok(Self {
            id,
            email,
            closed_at,
            lines: map,
            version: 0,
        })
    }

    pub fn id(&self) -> Option<CartId> {
        self.id
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    pub fn closed_at(&self) -> Option<NaiveDate> {
        self.closed_at
    }

    pub fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }

    /// Bumped on every line change; lets an observer tell two values apart.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn line(&self, item_id: ItemId) -> Option<&OrderLine> {
        self.lines.get(&item_id)
    }

    /// Lines in item id order.
    pub fn lines(&self) -> impl Iterator<Item = &OrderLine> {
        self.lines.values()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line quantities, saturating at `i64::MAX`.
    pub fn total_quantity(&self) -> i64 {
        self.lines
            .values()
            .fold(0i64, |total, line| total.saturating_add(line.quantity()))
    }

    pub fn ensure_open(&self) -> Result<(), CartError> {
        match self.closed_at {
            Some(date) => Err(CartError::invalid_state(format!("cart was closed on {date}"))),
            None => Ok(()),
        }
    }

    /// Same cart with the checkout contact address set.
    pub fn with_email(&self, email: Email) -> Result<Self, CartError> {
        self.ensure_open()?;
        Ok(Self {
            email: Some(email),
            ..self.clone()
        })
    }

    /// The backend's view of this cart after it accepted the submission.
    pub fn closed(&self, id: CartId, closed_at: NaiveDate) -> Self {
        Self {
            id: Some(id),
            closed_at: Some(closed_at),
            ..self.clone()
        }
    }

    /// Upsert by item id: an existing line takes the draft's quantity, a new
    /// item gets the draft as its line.
    pub(crate) fn upserted(&self, draft: OrderLine) -> Self {
        let mut next = self.clone();
        match next.lines.entry(*draft.id()) {
            Entry::Occupied(mut slot) => {
                let updated = slot.get().with_quantity(draft.quantity());
                slot.insert(updated);
            }
            Entry::Vacant(slot) => {
                slot.insert(draft);
            }
        }
        next.version += 1;
        next
    }

    pub(crate) fn without(&self, item_id: ItemId) -> Self {
        let mut next = self.clone();
        if next.lines.remove(&item_id).is_some() {
            next.version += 1;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn new_cart_is_open_and_empty() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert!(!cart.is_closed());
        assert!(cart.id().is_none());
        assert!(cart.ensure_open().is_ok());
        assert_eq!(cart.total_quantity(), 0);
    }

    #[test]
    fn from_parts_rejects_duplicate_items() {
        let err = Cart::from_parts(
            None,
            None,
            None,
            [
                OrderLine::new(ItemId::new(1), "Widget", 1),
                OrderLine::new(ItemId::new(1), "Widget", 2),
            ],
        )
        .unwrap_err();
        assert_eq!(err, CartError::DuplicateLine(ItemId::new(1)));
    }

    #[test]
    fn upsert_replaces_quantity_and_keeps_one_line() {
        let cart = Cart::new().upserted(OrderLine::new(ItemId::new(5), "Lamp", 2));
        let cart = cart.upserted(OrderLine::new(ItemId::new(5), "Lamp", 4));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(ItemId::new(5)).unwrap().quantity(), 4);
        assert_eq!(cart.version(), 2);
    }

    #[test]
    fn lines_iterate_in_item_order() {
        let cart = Cart::new()
            .upserted(OrderLine::new(ItemId::new(9), "Gizmo", 1))
            .upserted(OrderLine::new(ItemId::new(2), "Gadget", 3));
        let ids: Vec<u64> = cart.lines().map(|l| l.item_id().get()).collect();
        assert_eq!(ids, vec![2, 9]);
        assert_eq!(cart.total_quantity(), 4);
    }

    #[test]
    fn without_missing_line_keeps_version() {
        let cart = Cart::new().upserted(OrderLine::new(ItemId::new(1), "Widget", 1));
        let same = cart.without(ItemId::new(7));
        assert_eq!(same, cart);

        let emptied = cart.without(ItemId::new(1));
        assert!(emptied.is_empty());
        assert_eq!(emptied.version(), cart.version() + 1);
    }

    #[test]
    fn total_quantity_saturates() {
        let cart = Cart::new()
            .upserted(OrderLine::new(ItemId::new(1), "Widget", i64::MAX - 1))
            .upserted(OrderLine::new(ItemId::new(2), "Gadget", i64::MAX - 1));
        assert_eq!(cart.total_quantity(), i64::MAX);
    }

    #[test]
    fn deserializing_rejects_repeated_items() {
        let err = serde_json::from_value::<Cart>(serde_json::json!({
            "id": null,
            "email": null,
            "closed_at": null,
            "lines": [
                { "item_id": 2, "item_title": "Gadget", "quantity": 1 },
                { "item_id": 2, "item_title": "Gadget", "quantity": 4 }
            ]
        }))
        .unwrap_err();
        assert!(err.to_string().contains("duplicate order line for item 2"));
    }

    #[test]
    fn serialized_cart_reads_back_with_fresh_version() {
        let cart = Cart::new()
            .upserted(OrderLine::new(ItemId::new(9), "Gizmo", 1))
            .upserted(OrderLine::new(ItemId::new(2), "Gadget", 3))
            .closed(CartId::new(4), date());
        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.get("version").is_none());

        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back.version(), 0);
        assert_eq!(back.closed_at(), Some(date()));
        assert_eq!(back.line(ItemId::new(2)), cart.line(ItemId::new(2)));
        assert_eq!(back.len(), 2);
    }

    #[test]
    fn closed_cart_is_terminal() {
        let cart = Cart::new().closed(CartId::new(3), date());
        assert!(cart.is_closed());
        assert_eq!(cart.id(), Some(CartId::new(3)));
        assert!(matches!(cart.ensure_open(), Err(CartError::InvalidState(_))));

        let email = Email::parse("a@b.io").unwrap();
        assert!(matches!(cart.with_email(email), Err(CartError::InvalidState(_))));
    }
}
