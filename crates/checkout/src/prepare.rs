use thiserror::Error;

use storefront_cart::{Cart, CartError, Email, OrderLine, accumulator};

use crate::submission::{OrderSubmission, SubmissionError};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("invalid cart state: {0}")]
    InvalidState(String),

    #[error("invalid email: {0}")]
    InvalidEmail(String),

    #[error("cart has no lines to submit")]
    EmptyCart,

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

/// Read-only snapshot of a cart that is ready to be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    cart: Cart,
}

impl CheckoutRequest {
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn email(&self) -> Option<&Email> {
        self.cart.email()
    }

    /// Hand the snapshot to the order backend.
    pub fn submit<S>(&self, backend: &S) -> Result<Cart, CheckoutError>
    where
        S: OrderSubmission + ?Sized,
    {
        Ok(backend.submit_cart(&self.cart)?)
    }
}

/// Validate `raw` and set it as the cart's contact address.
pub fn attach_email(cart: &Cart, raw: &str) -> Result<Cart, CheckoutError> {
    let email = Email::parse(raw).map_err(|e| CheckoutError::InvalidEmail(e.to_string()))?;
    cart.with_email(email).map_err(|e| match e {
        CartError::InvalidState(msg) => CheckoutError::InvalidState(msg),
        other => CheckoutError::Cart(other),
    })
}

/// Build the submission snapshot for `cart`.
///
/// Zero-quantity lines are dropped (the backend only accepts quantities of at
/// least one). The caller's cart value is left as is.
pub fn prepare_checkout(cart: &Cart) -> Result<CheckoutRequest, CheckoutError> {
    if let Err(CartError::InvalidState(msg)) = cart.ensure_open() {
        return Err(CheckoutError::InvalidState(msg));
    }
    if cart.email().is_none() {
        return Err(CheckoutError::InvalidEmail("email is required at checkout".to_string()));
    }

    let empty: Vec<_> = cart
        .lines()
        .filter(|line| line.quantity() == 0)
        .map(OrderLine::item_id)
        .collect();

    let mut snapshot = cart.clone();
    for item_id in &empty {
        snapshot = accumulator::remove(*item_id, &snapshot)?;
    }

    if snapshot.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    tracing::debug!(
        lines = snapshot.len(),
        dropped = empty.len(),
        total_quantity = snapshot.total_quantity(),
        "checkout prepared"
    );
    Ok(CheckoutRequest { cart: snapshot })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use storefront_core::{CartId, ItemId};

    fn cart_with(lines: &[(u64, i64)]) -> Cart {
        let lines = lines
            .iter()
            .map(|(id, qty)| OrderLine::new(ItemId::new(*id), format!("Item {id}"), *qty));
        Cart::from_parts(None, None, None, lines).unwrap()
    }

    #[test]
    fn requires_valid_email() {
        let cart = cart_with(&[(1, 2)]);
        assert!(matches!(prepare_checkout(&cart), Err(CheckoutError::InvalidEmail(_))));
        assert!(matches!(attach_email(&cart, "not-an-email"), Err(CheckoutError::InvalidEmail(_))));
    }

    #[test]
    fn drops_zero_quantity_lines() {
        let cart = attach_email(&cart_with(&[(1, 2), (2, 0)]), "shopper@example.com").unwrap();
        let request = prepare_checkout(&cart).unwrap();

        assert_eq!(request.cart().len(), 1);
        assert!(request.cart().line(ItemId::new(2)).is_none());
        assert_eq!(request.email().map(Email::as_str), Some("shopper@example.com"));
        // Original cart keeps its draft-zero line.
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn empty_cart_cannot_check_out() {
        let cart = attach_email(&cart_with(&[(1, 0)]), "shopper@example.com").unwrap();
        assert!(matches!(prepare_checkout(&cart), Err(CheckoutError::EmptyCart)));
    }

    #[test]
    fn closed_cart_cannot_check_out() {
        let cart = attach_email(&cart_with(&[(1, 1)]), "shopper@example.com")
            .unwrap()
            .closed(CartId::new(1), NaiveDate::from_ymd_opt(2024, 2, 2).unwrap());
        assert!(matches!(prepare_checkout(&cart), Err(CheckoutError::InvalidState(_))));
        assert!(matches!(attach_email(&cart, "x@y.z"), Err(CheckoutError::InvalidState(_))));
    }
}
