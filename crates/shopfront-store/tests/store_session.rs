//! Full-session behavior: startup seeding, background refresh, and the
//! persisted cart surviving across store instances.

use async_trait::async_trait;
use shopfront_commerce::{Product, ProductId, StockLevel};
use shopfront_data::{CatalogSource, FetchError};
use shopfront_storage::Storage;
use shopfront_store::{CartStore, ChannelSink, StoreConfig};
use std::sync::Arc;

struct FixtureSource;

#[async_trait]
impl CatalogSource for FixtureSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        Ok(vec![
            Product::new(1, "Sneaker", 179.9, "https://img.example/1.jpg"),
            Product::new(2, "Running Shoe", 139.9, "https://img.example/2.jpg"),
            Product::new(3, "Sandal", 59.9, "https://img.example/3.jpg"),
        ])
    }

    async fn fetch_stock(&self) -> Result<Vec<StockLevel>, FetchError> {
        Ok(vec![
            StockLevel::new(1, 5),
            StockLevel::new(2, 1),
            StockLevel::new(3, 0),
        ])
    }
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("shopfront_store=debug")
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn session_survives_restart() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::default();

    // First session: fill the cart.
    {
        let storage = Storage::open(dir.path()).unwrap();
        let (sink, _notices) = ChannelSink::channel();
        let store =
            CartStore::with_sink(Arc::new(FixtureSource), storage, config.clone(), sink);
        store.spawn_refresh().await.unwrap();

        store.add_product(ProductId::new(1));
        store.add_product(ProductId::new(1));
        store.add_product(ProductId::new(2));
        assert_eq!(store.item_count(), 3);
    }

    // Second session over the same directory: cart is seeded back.
    let storage = Storage::open(dir.path()).unwrap();
    let (sink, _notices) = ChannelSink::channel();
    let store = CartStore::with_sink(Arc::new(FixtureSource), storage, config, sink);

    let items = store.snapshot();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].product.id, ProductId::new(1));
    assert_eq!(items[0].amount, 2);
    assert_eq!(items[1].product.id, ProductId::new(2));
    assert_eq!(items[1].amount, 1);
}

#[tokio::test]
async fn persisted_payload_is_a_flat_item_array() {
    init_logging();
    let storage = Storage::in_memory();
    let (sink, _notices) = ChannelSink::channel();
    let store = CartStore::with_sink(
        Arc::new(FixtureSource),
        storage.clone(),
        StoreConfig::default(),
        sink,
    );
    store.refresh().await;

    store.add_product(ProductId::new(1));

    let payload: serde_json::Value = storage.get("shopfront:cart").unwrap().unwrap();
    assert_eq!(
        payload,
        serde_json::json!([{
            "id": 1,
            "title": "Sneaker",
            "price": 179.9,
            "image": "https://img.example/1.jpg",
            "amount": 1
        }])
    );
}

#[tokio::test]
async fn mutations_track_storage_and_notices() {
    init_logging();
    let storage = Storage::in_memory();
    let (sink, mut notices) = ChannelSink::channel();
    let store = CartStore::with_sink(
        Arc::new(FixtureSource),
        storage.clone(),
        StoreConfig::default(),
        sink,
    );
    store.refresh().await;

    // Product 2 has one unit in stock: the second add is rejected.
    store.add_product(ProductId::new(2));
    store.add_product(ProductId::new(2));
    assert_eq!(
        notices.try_recv().unwrap().message,
        shopfront_store::OUT_OF_STOCK_NOTICE
    );

    // Product 3 is out of stock but present in the catalog: the first
    // add still inserts it; only increments check stock.
    store.add_product(ProductId::new(3));
    assert_eq!(store.item_count(), 2);

    // Every mutation so far is reflected in storage.
    let persisted: Vec<serde_json::Value> = storage.get("shopfront:cart").unwrap().unwrap();
    assert_eq!(persisted.len(), 2);

    store.remove_product(ProductId::new(3));
    store.remove_product(ProductId::new(3));
    assert_eq!(
        notices.try_recv().unwrap().message,
        shopfront_store::REMOVE_FAILED_NOTICE
    );

    let persisted: Vec<serde_json::Value> = storage.get("shopfront:cart").unwrap().unwrap();
    assert_eq!(persisted.len(), 1);
}
