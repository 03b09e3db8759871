//! REST payload shapes for carts and their order lines.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use storefront_cart::{Cart, CartError, Email, OrderLine};
use storefront_core::{CartId, ItemId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_id: Option<CartId>,
    pub item_id: ItemId,
    #[serde(default)]
    pub item_title: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CartId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<NaiveDate>,
    #[serde(default)]
    pub orders: Vec<OrderLineDto>,
}

impl From<&Cart> for CartDto {
    fn from(cart: &Cart) -> Self {
        Self {
            id: cart.id(),
            email: cart.email().map(|e| e.as_str().to_string()),
            closed_at: cart.closed_at(),
            orders: cart
                .lines()
                .map(|line| OrderLineDto {
                    cart_id: cart.id(),
                    item_id: line.item_id(),
                    item_title: line.item_title().to_string(),
                    quantity: line.quantity(),
                })
                .collect(),
        }
    }
}

impl TryFrom<CartDto> for Cart {
    type Error = CartError;

    fn try_from(dto: CartDto) -> Result<Self, Self::Error> {
        let email = dto.email.map(Email::parse).transpose()?;
        let lines = dto
            .orders
            .into_iter()
            .map(|line| OrderLine::new(line.item_id, line.item_title, line.quantity));
        Cart::from_parts(dto.id, email, dto.closed_at, lines)
    }
}
