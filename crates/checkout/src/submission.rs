use std::sync::Arc;

use thiserror::Error;

use storefront_cart::Cart;
use storefront_catalog::{CatalogError, StockShortfall};

/// Order backend failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// Current stock cannot cover the cart. Lines the client-side check
    /// accepted may still land here under concurrent shoppers.
    #[error("stock conflict on {} line(s)", .0.len())]
    StockConflict(Vec<StockShortfall>),

    #[error("invalid cart: {0}")]
    InvalidCart(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Catalog(CatalogError),
}

impl From<CatalogError> for SubmissionError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InsufficientStock(shortfalls) => Self::StockConflict(shortfalls),
            other => Self::Catalog(other),
        }
    }
}

/// Sink for submitted carts.
///
/// The backend is authoritative for final stock acceptance: it performs its
/// own check-and-decrement, assigns the cart id and sets `closed_at`.
pub trait OrderSubmission: Send + Sync {
    fn submit_cart(&self, cart: &Cart) -> Result<Cart, SubmissionError>;
}

impl<S> OrderSubmission for Arc<S>
where
    S: OrderSubmission + ?Sized,
{
    fn submit_cart(&self, cart: &Cart) -> Result<Cart, SubmissionError> {
        (**self).submit_cart(cart)
    }
}
