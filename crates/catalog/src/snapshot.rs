//! Accumulated view of the catalog as the shopper scrolls.

use std::collections::BTreeMap;

use storefront_core::{Entity, ItemId};

use crate::catalog::{CatalogError, ItemCatalog};
use crate::item::Item;
use crate::page::{PageRequest, Sort};

/// Items loaded so far, in listing order, plus the cursor for the next page.
///
/// The cart engine validates drafts against whatever this snapshot holds; an
/// item that has not been loaded (or has disappeared) is unknown to it.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    items: Vec<Item>,
    index: BTreeMap<ItemId, usize>,
    next: PageRequest,
    has_more: bool,
}

impl CatalogSnapshot {
    pub fn new(page_size: usize, sort: Sort) -> Self {
        Self {
            items: Vec::new(),
            index: BTreeMap::new(),
            next: PageRequest::first(page_size, sort),
            has_more: true,
        }
    }

    /// Fetch the next page and append it. No-op once the catalog is exhausted.
    ///
    /// Returns the number of items added or refreshed.
    pub fn load_next<C>(&mut self, catalog: &C) -> Result<usize, CatalogError>
    where
        C: ItemCatalog + ?Sized,
    {
        if !self.has_more {
            return Ok(0);
        }

        let page = catalog.list_items(&self.next)?;
        let loaded = page.items.len();
        for item in page.items {
            self.insert(item);
        }
        self.has_more = page.has_more;
        self.next = self.next.next();

        tracing::debug!(loaded, total_loaded = self.items.len(), has_more = self.has_more, "catalog snapshot advanced");
        Ok(loaded)
    }

    /// Drop everything and start again from the first page (e.g. after a
    /// sort change or a successful checkout changed stock).
    pub fn reset(&mut self, sort: Sort) {
        self.items.clear();
        self.index.clear();
        self.next = PageRequest::first(self.next.size, sort);
        self.has_more = true;
    }

    pub fn find(&self, id: ItemId) -> Option<&Item> {
        self.index.get(&id).and_then(|&pos| self.items.get(pos))
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn sort(&self) -> Sort {
        self.next.sort
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn insert(&mut self, item: Item) {
        match self.index.get(item.id()) {
            // Item shifted between pages; keep its first position, refresh data.
            Some(&pos) => self.items[pos] = item,
            None => {
                self.index.insert(*item.id(), self.items.len());
                self.items.push(item);
            }
        }
    }
}
