//! End-to-end behavior of the cart store over real storage backends.

use serde_json::json;
use vitrine_cache::{FileStore, KeyValueStore, MemoryStore};
use vitrine_commerce::prelude::*;

fn product(id: &str, price: f64) -> Product {
    Product::new(id, format!("Produto {}", id), price)
}

fn ids<S: KeyValueStore>(cart: &CartStore<S>) -> Vec<String> {
    cart.lines()
        .iter()
        .map(|l| l.product_id().to_string())
        .collect()
}

#[test]
fn test_one_line_per_product() {
    let mut cart = CartStore::open(MemoryStore::new());
    for id in ["a", "b", "a", "c", "b", "a"] {
        cart.add_one(product(id, 1.0)).unwrap();
    }

    assert_eq!(ids(&cart), vec!["a", "b", "c"]);
    assert_eq!(cart.item_quantity(&"a".into()), 3);
    assert_eq!(cart.total_items(), 6);
}

#[test]
fn test_quantity_accumulates() {
    let mut cart = CartStore::open(MemoryStore::new());
    cart.add_item(product("P", 1.0), 2).unwrap();
    cart.add_item(product("P", 1.0), 3).unwrap();

    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.item_quantity(&"P".into()), 5);
}

#[test]
fn test_update_to_zero_removes() {
    let mut cart = CartStore::open(MemoryStore::new());
    cart.add_item(product("P", 1.0), 2).unwrap();
    cart.update_quantity(&"P".into(), 0);

    assert!(!cart.is_in_cart(&"P".into()));
    assert_eq!(cart.item_quantity(&"P".into()), 0);
}

#[test]
fn test_remove_absent_leaves_cart_unchanged() {
    let mut cart = CartStore::open(MemoryStore::new());
    cart.add_item(product("A", 3.0), 2).unwrap();
    let before = cart.state().clone();

    cart.remove_item(&"missing".into());
    assert_eq!(cart.state(), &before);
}

#[test]
fn test_totals() {
    let mut cart = CartStore::open(MemoryStore::new());
    cart.add_item(product("A", 10.0), 2).unwrap();
    cart.add_item(product("B", 5.50), 1).unwrap();

    assert_eq!(cart.total_items(), 3);
    assert_eq!(cart.total_price(), 25.5);
}

#[test]
fn test_locale_price_string() {
    let mut cart = CartStore::open(MemoryStore::new());
    cart.add_item(Product::new("lux", "Kit Luxo", "R$ 1.234,56"), 3)
        .unwrap();

    assert!((cart.total_price() - 1234.56 * 3.0).abs() < 1e-9);
    assert_eq!(cart.total_money().unwrap().display(), "R$ 3.703,68");
}

#[test]
fn test_unparseable_price_counts_as_zero() {
    let mut cart = CartStore::open(MemoryStore::new());
    cart.add_item(Product::new("x", "Sob consulta", "consulte"), 2)
        .unwrap();
    cart.add_item(product("y", 4.0), 1).unwrap();

    assert_eq!(cart.total_items(), 3);
    assert_eq!(cart.total_price(), 4.0);
}

#[test]
fn test_persistence_roundtrip() {
    let storage = MemoryStore::new();
    {
        let mut cart = CartStore::open(storage.clone());
        cart.add_item(product("c", 1.0), 1).unwrap();
        cart.add_item(product("a", 2.0), 4).unwrap();
        cart.add_item(product("b", 3.0), 2).unwrap();
        cart.add_one(product("c", 1.0)).unwrap();
    }

    let restored = CartStore::open(storage);
    assert_eq!(ids(&restored), vec!["c", "a", "b"]);
    let quantities: Vec<u32> = restored.lines().iter().map(|l| l.quantity).collect();
    assert_eq!(quantities, vec![2, 4, 2]);
}

#[test]
fn test_roundtrip_keeps_snapshot_and_added_at() {
    let storage = MemoryStore::new();
    let raw = json!({
        "id": "base-01",
        "name": "Base Líquida",
        "price": "R$ 89,90",
        "images": ["base.jpg"],
        "category": "rosto",
        "shade": "bege claro"
    });
    let mut cart = CartStore::open(storage.clone());
    cart.add_one(serde_json::from_value(raw.clone()).unwrap())
        .unwrap();
    let original = cart.lines()[0].clone();

    let restored = CartStore::open(storage);
    let line = &restored.lines()[0];
    assert_eq!(line, &original);
    assert_eq!(serde_json::to_value(&line.product).unwrap(), raw);
}

#[test]
fn test_corrupt_records_yield_empty_cart() {
    for raw in ["{definitely not json", "{\"lines\": []}", "42", "null", "\"[]\""] {
        let storage = MemoryStore::with_entry(DEFAULT_CART_KEY, raw);
        let cart = CartStore::open(storage);
        assert!(cart.state().is_empty(), "record {:?} should load empty", raw);
    }
}

#[test]
fn test_partially_valid_record_keeps_good_lines() {
    let raw = json!([
        { "product": { "id": "1", "price": 10 }, "quantity": 2, "addedAt": "2024-03-01T09:30:00Z" },
        { "product": { "price": 99 }, "quantity": 1 },
        { "product": { "id": "2", "price": "5,50" }, "quantity": 1 },
        { "product": { "id": "1", "price": 10 }, "quantity": 1 }
    ]);
    let cart = CartStore::open(MemoryStore::with_entry(DEFAULT_CART_KEY, raw.to_string()));

    assert_eq!(ids(&cart), vec!["1", "2"]);
    assert_eq!(cart.item_quantity(&"1".into()), 3);
    assert_eq!(cart.total_price(), 35.5);
}

#[test]
fn test_corrupt_record_is_replaced_on_next_write() {
    let storage = MemoryStore::with_entry(DEFAULT_CART_KEY, "garbage");
    let mut cart = CartStore::open(storage.clone());
    cart.add_one(product("1", 1.0)).unwrap();

    let reopened = CartStore::open(storage);
    assert_eq!(ids(&reopened), vec!["1"]);
}

#[test]
fn test_order_preserved_on_re_add() {
    let mut cart = CartStore::open(MemoryStore::new());
    cart.add_one(product("A", 1.0)).unwrap();
    cart.add_one(product("B", 1.0)).unwrap();
    cart.add_one(product("A", 1.0)).unwrap();

    assert_eq!(ids(&cart), vec!["A", "B"]);
}

#[test]
fn test_checkout_scenario() {
    let mut cart = CartStore::open(MemoryStore::new());
    assert_eq!(cart.total_items(), 0);
    assert_eq!(cart.total_price(), 0.0);

    cart.add_item(product("1", 100.0), 1).unwrap();
    cart.add_item(product("2", 50.0), 2).unwrap();
    assert_eq!(cart.total_items(), 3);
    assert_eq!(cart.total_price(), 200.0);

    cart.update_quantity(&"1".into(), 0);
    assert_eq!(cart.total_items(), 2);
    assert_eq!(cart.total_price(), 100.0);
    assert!(!cart.is_in_cart(&"1".into()));
}

#[test]
fn test_file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut cart = CartStore::open(FileStore::open(dir.path()).unwrap());
        cart.add_item(product("a", 12.5), 2).unwrap();
        cart.add_one(product("b", 7.0)).unwrap();
    }

    let cart = CartStore::open(FileStore::open(dir.path()).unwrap());
    assert_eq!(ids(&cart), vec!["a", "b"]);
    assert_eq!(cart.total_price(), 32.0);
    assert!(dir.path().join(format!("{}.json", DEFAULT_CART_KEY)).is_file());
}

#[test]
fn test_clear_persists_empty_cart() {
    let storage = MemoryStore::new();
    let mut cart = CartStore::open(storage.clone());
    cart.add_one(product("a", 1.0)).unwrap();
    cart.clear_cart();

    assert!(CartStore::open(storage).state().is_empty());
}

#[test]
fn test_checkout_message_from_store() {
    let mut cart = CartStore::open(MemoryStore::new());
    cart.add_item(Product::new("1", "Batom", 100.0), 1).unwrap();

    let message =
        CheckoutMessage::from_state(cart.state(), &CheckoutConfig::new("+55 11 98888-7777"))
            .unwrap();
    assert!(message.text().contains("• 1x Batom - R$ 100,00"));
    assert!(message
        .whatsapp_url()
        .unwrap()
        .as_str()
        .starts_with("https://wa.me/5511988887777?text="));
}

#[test]
fn test_null_product_columns_still_load() {
    let raw = json!([
        { "product": { "id": "1", "name": "Batom", "price": 10, "images": null }, "quantity": 2 },
        { "product": { "id": "2", "name": null, "price": 5 }, "quantity": 1 },
        { "product": { "id": "3", "name": "Gloss", "price": null }, "quantity": 1 }
    ]);
    let storage = MemoryStore::with_entry(DEFAULT_CART_KEY, raw.to_string());
    let mut cart = CartStore::open(storage.clone());

    assert_eq!(ids(&cart), vec!["1", "2", "3"]);
    assert_eq!(cart.total_items(), 4);
    assert_eq!(cart.total_price(), 25.0);

    // Rewriting the record keeps every line readable.
    cart.add_one(product("4", 1.0)).unwrap();
    let reopened = CartStore::open(storage);
    assert_eq!(ids(&reopened), vec!["1", "2", "3", "4"]);
    assert_eq!(reopened.total_price(), 26.0);
}
