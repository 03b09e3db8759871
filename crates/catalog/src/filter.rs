use serde::{Deserialize, Serialize};

use crate::item::{Item, Price};

/// Conjunctive filter over catalog items. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFilter {
    /// Case-insensitive substring match on the title.
    pub title_contains: Option<String>,
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
    /// Only items with `count > 0`.
    pub in_stock_only: bool,
}

impl ItemFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title_contains(mut self, needle: impl Into<String>) -> Self {
        self.title_contains = Some(needle.into());
        self
    }

    pub fn price_between(mut self, min: Price, max: Price) -> Self {
        self.min_price = Some(min);
        self.max_price = Some(max);
        self
    }

    pub fn in_stock_only(mut self) -> Self {
        self.in_stock_only = true;
        self
    }

    pub fn matches(&self, item: &Item) -> bool {
        if let Some(needle) = &self.title_contains {
            if !item.title().to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| item.price() < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| item.price() > max) {
            return false;
        }
        if self.in_stock_only && !item.in_stock() {
            return false;
        }
        true
    }
}
