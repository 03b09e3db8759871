use thiserror::Error;

use storefront_core::{DomainError, ItemId};

/// Why a draft or cart operation was refused.
///
/// None of these are fatal to the session: the UI decides how to surface them
/// (typically by disabling the submit action).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("item {item_id} out of stock: requested {requested}, available {available}")]
    OutOfStock {
        item_id: ItemId,
        requested: i64,
        available: i64,
    },

    #[error("unknown item {0}")]
    UnknownItem(ItemId),

    #[error("negative quantity {quantity} for item {item_id}")]
    NegativeQuantity { item_id: ItemId, quantity: i64 },

    #[error("invalid cart state: {0}")]
    InvalidState(String),

    #[error("duplicate order line for item {0}")]
    DuplicateLine(ItemId),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl CartError {
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Stock-related rejections. An unknown item cannot be checked against
    /// stock, so it counts as one.
    pub fn is_stock_rejection(&self) -> bool {
        matches!(self, CartError::OutOfStock { .. } | CartError::UnknownItem(_))
    }
}
