//! Scripted shopping session against the in-memory collaborators.

use std::sync::Arc;

use anyhow::{Context, anyhow};

use storefront_cart::{Cart, Selection};
use storefront_catalog::{CatalogSnapshot, InMemoryCatalog, Item, Price};
use storefront_checkout::{CartDto, InMemoryOrderBackend, attach_email, prepare_checkout};
use storefront_core::{Entity, ItemId};

use crate::config::StorefrontConfig;

/// What the session ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    pub settled: CartDto,
    pub rejected_quantity: i64,
    pub remaining_stock: Vec<(ItemId, i64)>,
}

pub fn seed_catalog() -> anyhow::Result<InMemoryCatalog> {
    let items = [
        Item::new(ItemId::new(1), "Widget", "A useful widget", Price::from_cents(1999), 10)?,
        Item::new(ItemId::new(2), "Gadget", "A shiny gadget", Price::from_cents(4500), 2)?,
        Item::new(ItemId::new(3), "Sprocket", "Fits most bicycles", Price::from_cents(799), 25)?,
    ];
    Ok(InMemoryCatalog::with_items(items))
}

/// Select, edit, reject, merge and check out, the way a shopper would.
pub fn run(config: &StorefrontConfig) -> anyhow::Result<DemoReport> {
    let catalog = Arc::new(seed_catalog()?);
    let backend = InMemoryOrderBackend::new(catalog.clone());

    let mut snapshot = CatalogSnapshot::new(config.page_size, config.default_sort);
    while snapshot.has_more() {
        snapshot.load_next(&catalog)?;
    }
    tracing::info!(items = snapshot.len(), sort = %snapshot.sort(), "catalog loaded");

    let widget = snapshot
        .find(ItemId::new(1))
        .ok_or_else(|| anyhow!("widget missing from catalog"))?;
    let sprocket = snapshot
        .find(ItemId::new(3))
        .ok_or_else(|| anyhow!("sprocket missing from catalog"))?;

    let cart = Cart::new();
    let cart = Selection::begin(widget, &cart)?.with_quantity(3).commit(&cart)?;
    let cart = Selection::begin(sprocket, &cart)?.with_quantity(5).commit(&cart)?;

    // Reopen the widget and ask for more than there is.
    let rejected_quantity = widget.count() + 2;
    let reopened = Selection::begin(widget, &cart)?.with_quantity(rejected_quantity);
    if let Err(err) = reopened.check(&cart) {
        tracing::info!(error = %err, "selection refused, cart unchanged");
    }

    let cart = attach_email(&cart, "shopper@example.com")?;
    let settled = prepare_checkout(&cart)?
        .submit(&backend)
        .context("order backend refused the cart")?;

    snapshot.reset(config.default_sort);
    while snapshot.has_more() {
        snapshot.load_next(&catalog)?;
    }
    let remaining_stock = snapshot
        .items()
        .iter()
        .map(|item| (*item.id(), item.count()))
        .collect();

    Ok(DemoReport {
        settled: CartDto::from(&settled),
        rejected_quantity,
        remaining_stock,
    })
}
