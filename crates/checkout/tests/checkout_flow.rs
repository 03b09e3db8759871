use std::sync::Arc;

use chrono::NaiveDate;

use storefront_cart::{Cart, CartError, Email, OrderLine, Selection, can_accept, merge};
use storefront_catalog::{CatalogSnapshot, InMemoryCatalog, Item, ItemCatalog, Price, Sort};
use storefront_checkout::{
    CartDto, CheckoutError, InMemoryOrderBackend, OrderSubmission, SubmissionError, attach_email,
    prepare_checkout,
};
use storefront_core::ItemId;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 15).unwrap()
}

fn seeded_catalog() -> Arc<InMemoryCatalog> {
    Arc::new(InMemoryCatalog::with_items([
        Item::new(ItemId::new(1), "Widget", "A useful widget", Price::from_cents(1999), 10).unwrap(),
        Item::new(ItemId::new(2), "Gadget", "A shiny gadget", Price::from_cents(4500), 2).unwrap(),
    ]))
}

fn loaded_snapshot(catalog: &InMemoryCatalog) -> CatalogSnapshot {
    let mut snapshot = CatalogSnapshot::new(20, Sort::default());
    while snapshot.has_more() {
        snapshot.load_next(catalog).unwrap();
    }
    snapshot
}

#[test]
fn shopper_builds_cart_and_checks_out() {
    let catalog = seeded_catalog();
    let backend = InMemoryOrderBackend::with_clock(catalog.clone(), today);
    let snapshot = loaded_snapshot(&catalog);
    let widget = snapshot.find(ItemId::new(1)).unwrap();

    let cart = Cart::new();

    // Pick the widget: fresh draft at zero.
    let selection = Selection::begin(widget, &cart).unwrap();
    assert_eq!(selection.draft().item_title(), "Widget");
    assert_eq!(selection.draft().quantity(), 0);

    // Three widgets fit within stock.
    let cart = selection.with_quantity(3).commit(&cart).unwrap();
    assert_eq!(cart.line(ItemId::new(1)).unwrap().quantity(), 3);

    // Reopen: the draft is seeded from the cart; twelve exceeds stock.
    let reopened = Selection::begin(widget, &cart).unwrap();
    assert_eq!(reopened.draft().quantity(), 3);
    let too_many = reopened.with_quantity(12);
    assert!(!too_many.can_accept(&cart));
    assert!(too_many.commit(&cart).is_err());
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.line(ItemId::new(1)).unwrap().quantity(), 3);

    // Check out.
    let cart = attach_email(&cart, "shopper@example.com").unwrap();
    let request = prepare_checkout(&cart).unwrap();
    let settled = request.submit(&backend).unwrap();

    assert!(settled.is_closed());
    assert_eq!(settled.closed_at(), Some(today()));
    assert_eq!(catalog.find(ItemId::new(1)).unwrap().unwrap().count(), 7);

    // A closed cart refuses further merges.
    let draft = settled.line(ItemId::new(1)).unwrap().with_quantity(1);
    let err = merge(draft, &settled).unwrap_err();
    assert!(matches!(err, CartError::InvalidState(_)));
    assert!(matches!(
        Selection::begin(widget, &settled),
        Err(CartError::InvalidState(_))
    ));

    let dto = CartDto::from(&settled);
    assert_eq!(dto.orders.len(), 1);
    assert_eq!(dto.orders[0].cart_id, settled.id());
}

#[test]
fn backend_overrules_stale_client_check() {
    let catalog = seeded_catalog();
    let backend = InMemoryOrderBackend::with_clock(catalog.clone(), today);

    // Both shoppers see two gadgets in stock.
    let snapshot = loaded_snapshot(&catalog);
    let gadget = snapshot.find(ItemId::new(2)).unwrap();

    let first = Selection::begin(gadget, &Cart::new())
        .unwrap()
        .with_quantity(2)
        .commit(&Cart::new())
        .unwrap();
    let second = first.clone();
    assert!(can_accept(second.line(ItemId::new(2)).unwrap(), &second, Some(gadget)));

    let first = attach_email(&first, "first@example.com").unwrap();
    let second = attach_email(&second, "second@example.com").unwrap();

    prepare_checkout(&first).unwrap().submit(&backend).unwrap();

    let err = prepare_checkout(&second).unwrap().submit(&backend).unwrap_err();
    match err {
        CheckoutError::Submission(SubmissionError::StockConflict(shortfalls)) => {
            assert_eq!(shortfalls[0].item_id, ItemId::new(2));
            assert_eq!(shortfalls[0].available, Some(0));
        }
        other => panic!("Expected StockConflict, got {other:?}"),
    }

    // After a reset, the refreshed snapshot shows the new stock and the
    // client check now refuses the same draft.
    let mut snapshot = snapshot;
    snapshot.reset(Sort::default());
    snapshot.load_next(&catalog).unwrap();
    let gadget = snapshot.find(ItemId::new(2)).unwrap();
    assert!(!can_accept(second.line(ItemId::new(2)).unwrap(), &second, Some(gadget)));
}

#[test]
fn unknown_item_is_never_merged() {
    let catalog = seeded_catalog();
    let snapshot = loaded_snapshot(&catalog);
    let ghost = Item::new(ItemId::new(99), "Ghost", "Not in the catalog", Price::default(), 5).unwrap();

    let cart = Cart::new();
    let draft = Selection::begin(&ghost, &cart).unwrap().with_quantity(1).discard();
    assert!(!can_accept(&draft, &cart, snapshot.find(ItemId::new(99))));
    assert!(cart.is_empty());
    assert!(backend_rejects_unknown(&catalog));
}

fn backend_rejects_unknown(catalog: &Arc<InMemoryCatalog>) -> bool {
    let backend = InMemoryOrderBackend::with_clock(catalog.clone(), today);
    let cart = Cart::from_parts(
        None,
        Some(Email::parse("x@example.com").unwrap()),
        None,
        [OrderLine::new(ItemId::new(99), "Ghost", 1)],
    )
    .unwrap();
    matches!(
        backend.submit_cart(&cart),
        Err(SubmissionError::StockConflict(shortfalls)) if shortfalls[0].available.is_none()
    )
}
