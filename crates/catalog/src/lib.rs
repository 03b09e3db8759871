//! Item catalog: the read-only source of purchasable items and their stock.
//!
//! The cart engine only ever reads from here. Stock decrements happen on the
//! backend side (see `InMemoryCatalog::reserve`), never in the cart itself.

pub mod catalog;
pub mod filter;
pub mod item;
pub mod page;
pub mod snapshot;

pub use catalog::{CatalogError, InMemoryCatalog, ItemCatalog, StockRequest, StockShortfall};
pub use filter::ItemFilter;
pub use item::{Item, ItemImage, Price};
pub use page::{Page, PageRequest, Sort, SortDirection, SortField, DEFAULT_PAGE_SIZE};
pub use snapshot::CatalogSnapshot;
