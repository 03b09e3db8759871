use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use storefront_core::{Entity, ItemId};

use crate::filter::ItemFilter;
use crate::item::Item;
use crate::page::{Page, PageRequest, SortDirection, SortField};

/// Catalog operation error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("invalid sort: {0}")]
    InvalidSort(String),

    #[error("invalid page request: {0}")]
    InvalidPage(String),

    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    #[error("insufficient stock for {} item(s)", .0.len())]
    InsufficientStock(Vec<StockShortfall>),
}

/// Read-only, paginated source of items.
///
/// Implementations may be remote; callers treat every listing as a snapshot
/// that can be stale by the time a cart is submitted.
pub trait ItemCatalog: Send + Sync {
    /// List one page of items in the requested order.
    fn list_items(&self, request: &PageRequest) -> Result<Page<Item>, CatalogError>;

    /// Look up a single item by id.
    fn find(&self, id: ItemId) -> Result<Option<Item>, CatalogError>;
}

impl<S> ItemCatalog for Arc<S>
where
    S: ItemCatalog + ?Sized,
{
    fn list_items(&self, request: &PageRequest) -> Result<Page<Item>, CatalogError> {
        (**self).list_items(request)
    }

    fn find(&self, id: ItemId) -> Result<Option<Item>, CatalogError> {
        (**self).find(id)
    }
}

/// Quantity of one item a submission wants to take out of stock.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRequest {
    pub item_id: ItemId,
    pub quantity: i64,
}

/// A request that could not be satisfied by current stock.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockShortfall {
    pub item_id: ItemId,
    pub requested: i64,
    /// `None` when the item no longer exists.
    pub available: Option<i64>,
}

/// In-memory catalog.
///
/// Intended for tests/dev and as the backend's stock ledger in the demo.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    items: RwLock<BTreeMap<ItemId, Item>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let map = items.into_iter().map(|item| (*item.id(), item)).collect();
        Self {
            items: RwLock::new(map),
        }
    }

    /// Insert or replace an item.
    pub fn upsert(&self, item: Item) -> Result<(), CatalogError> {
        let mut items = self.write()?;
        items.insert(*item.id(), item);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// List one page of the items matching `filter`.
    pub fn list_filtered(
        &self,
        filter: &ItemFilter,
        request: &PageRequest,
    ) -> Result<Page<Item>, CatalogError> {
        if request.size == 0 {
            return Err(CatalogError::InvalidPage("page size must be positive".to_string()));
        }

        let items = self.read()?;
        let mut matching: Vec<Item> = items
            .values()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect();
        drop(items);

        matching.sort_by(|a, b| {
            let ordering = match request.sort.field {
                SortField::Id => a.id().cmp(b.id()),
                SortField::Title => a.title().cmp(b.title()).then_with(|| a.id().cmp(b.id())),
                SortField::Price => a.price().cmp(&b.price()).then_with(|| a.id().cmp(b.id())),
                SortField::Count => a.count().cmp(&b.count()).then_with(|| a.id().cmp(b.id())),
            };
            match request.sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let page = Page::slice(matching, request);
        tracing::debug!(
            page = page.page,
            returned = page.items.len(),
            total = page.total,
            has_more = page.has_more,
            "listed catalog page"
        );
        Ok(page)
    }

    /// Atomically take stock for every request, or nothing at all.
    ///
    /// Every request is checked against current stock under a single write
    /// lock; if any one falls short, no stock is touched and all shortfalls
    /// are returned in `CatalogError::InsufficientStock`.
    pub fn reserve(&self, requests: &[StockRequest]) -> Result<(), CatalogError> {
        let mut items = self.write()?;

        let shortfalls: Vec<StockShortfall> = requests
            .iter()
            .filter_map(|req| match items.get(&req.item_id) {
                Some(item) if req.quantity <= item.count() => None,
                Some(item) => Some(StockShortfall {
                    item_id: req.item_id,
                    requested: req.quantity,
                    available: Some(item.count()),
                }),
                None => Some(StockShortfall {
                    item_id: req.item_id,
                    requested: req.quantity,
                    available: None,
                }),
            })
            .collect();

        if !shortfalls.is_empty() {
            return Err(CatalogError::InsufficientStock(shortfalls));
        }

        for req in requests {
            if let Some(item) = items.get(&req.item_id) {
                let updated = item.with_count(item.count() - req.quantity);
                items.insert(req.item_id, updated);
            }
        }
        Ok(())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, BTreeMap<ItemId, Item>>, CatalogError> {
        self.items
            .read()
            .map_err(|_| CatalogError::Unavailable("lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, BTreeMap<ItemId, Item>>, CatalogError> {
        self.items
            .write()
            .map_err(|_| CatalogError::Unavailable("lock poisoned".to_string()))
    }
}

impl ItemCatalog for InMemoryCatalog {
    fn list_items(&self, request: &PageRequest) -> Result<Page<Item>, CatalogError> {
        self.list_filtered(&ItemFilter::default(), request)
    }

    fn find(&self, id: ItemId) -> Result<Option<Item>, CatalogError> {
        Ok(self.read()?.get(&id).cloned())
    }
}
