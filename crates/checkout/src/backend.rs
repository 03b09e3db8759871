use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use chrono::{NaiveDate, Utc};

use storefront_cart::Cart;
use storefront_catalog::{InMemoryCatalog, StockRequest};
use storefront_core::CartId;

use crate::submission::{OrderSubmission, SubmissionError};

type Clock = Box<dyn Fn() -> NaiveDate + Send + Sync>;

#[derive(Debug, Default)]
struct Ledger {
    carts: BTreeMap<CartId, Cart>,
    last_id: u64,
}

/// In-memory order backend.
///
/// Intended for tests/dev. Settles a cart the way the real backend does:
/// every line is checked against current catalog stock, stock is decremented
/// for all lines or none, and the stored cart gets an id and a closing date.
pub struct InMemoryOrderBackend {
    catalog: Arc<InMemoryCatalog>,
    ledger: RwLock<Ledger>,
    clock: Clock,
}

impl core::fmt::Debug for InMemoryOrderBackend {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InMemoryOrderBackend")
            .field("catalog", &self.catalog)
            .field("ledger", &self.ledger)
            .finish_non_exhaustive()
    }
}

impl InMemoryOrderBackend {
    pub fn new(catalog: Arc<InMemoryCatalog>) -> Self {
        Self::with_clock(catalog, || Utc::now().date_naive())
    }

    /// Use a fixed or fake clock for `closed_at` (tests).
    pub fn with_clock(
        catalog: Arc<InMemoryCatalog>,
        clock: impl Fn() -> NaiveDate + Send + Sync + 'static,
    ) -> Self {
        Self {
            catalog,
            ledger: RwLock::new(Ledger::default()),
            clock: Box::new(clock),
        }
    }

    pub fn find(&self, id: CartId) -> Result<Option<Cart>, SubmissionError> {
        let ledger = self
            .ledger
            .read()
            .map_err(|_| SubmissionError::Unavailable("lock poisoned".to_string()))?;
        Ok(ledger.carts.get(&id).cloned())
    }

    /// All settled carts, oldest first.
    pub fn list(&self) -> Result<Vec<Cart>, SubmissionError> {
        let ledger = self
            .ledger
            .read()
            .map_err(|_| SubmissionError::Unavailable("lock poisoned".to_string()))?;
        Ok(ledger.carts.values().cloned().collect())
    }

    fn validate(cart: &Cart) -> Result<(), SubmissionError> {
        if cart.email().is_none() {
            return Err(SubmissionError::InvalidCart("email is required".to_string()));
        }
        if cart.is_empty() {
            return Err(SubmissionError::InvalidCart("cart has no lines".to_string()));
        }
        if let Some(line) = cart.lines().find(|line| line.quantity() < 1) {
            return Err(SubmissionError::InvalidCart(format!(
                "quantity for item {} must be at least 1 (got {})",
                line.item_id(),
                line.quantity()
            )));
        }
        Ok(())
    }
}

impl OrderSubmission for InMemoryOrderBackend {
    fn submit_cart(&self, cart: &Cart) -> Result<Cart, SubmissionError> {
        // Closing is idempotent: a settled cart comes back as it is.
        if cart.is_closed() {
            return Ok(cart.clone());
        }
        Self::validate(cart)?;

        let mut ledger = self
            .ledger
            .write()
            .map_err(|_| SubmissionError::Unavailable("lock poisoned".to_string()))?;

        let requests: Vec<StockRequest> = cart
            .lines()
            .map(|line| StockRequest {
                item_id: line.item_id(),
                quantity: line.quantity(),
            })
            .collect();

        if let Err(err) = self.catalog.reserve(&requests) {
            let err = SubmissionError::from(err);
            tracing::warn!(error = %err, "cart submission rejected");
            return Err(err);
        }

        // Ids belong to the ledger; whatever id an open cart carries is ignored.
        ledger.last_id += 1;
        let id = CartId::new(ledger.last_id);
        let settled = cart.closed(id, (self.clock)());
        ledger.carts.insert(id, settled.clone());

        tracing::info!(
            cart_id = %id,
            lines = settled.len(),
            total_quantity = settled.total_quantity(),
            "cart submitted and closed"
        );
        Ok(settled)
    }
}
