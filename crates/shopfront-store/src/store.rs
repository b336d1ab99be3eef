//! The session cart store.

use crate::config::StoreConfig;
use crate::notify::{Notice, NoticeSink, TracingSink};
use shopfront_commerce::{Cart, CartItem, Catalog, CommerceError, ProductId, StockTable};
use shopfront_data::{CatalogSource, FetchError, HttpCatalogSource};
use shopfront_storage::Storage;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Notice shown when a requested quantity cannot be fulfilled.
pub const OUT_OF_STOCK_NOTICE: &str = "Requested quantity out of stock";
/// Notice shown when adding a product fails.
pub const ADD_FAILED_NOTICE: &str = "Could not add product to cart";
/// Notice shown when removing a product fails.
pub const REMOVE_FAILED_NOTICE: &str = "Could not remove product from cart";
/// Notice shown when changing a product amount fails.
pub const UPDATE_FAILED_NOTICE: &str = "Could not update product amount";
/// Notice shown when the cart cannot be written to local storage.
pub const PERSIST_FAILED_NOTICE: &str = "Could not save cart";

/// Session state behind the store handle.
struct State {
    cart: Cart,
    catalog: Catalog,
    stock: StockTable,
}

struct Inner {
    state: Mutex<State>,
    source: Arc<dyn CatalogSource>,
    storage: Storage,
    storage_key: String,
    sink: Arc<dyn NoticeSink>,
}

/// The cart store a storefront UI talks to.
///
/// Holds the cart, a cached product catalog, and a cached stock table.
/// Handles are cheap to clone and share the same state, so every UI
/// component can keep one.
///
/// Operations never return errors and never panic: failures surface as
/// notices through the configured [`NoticeSink`]. After every mutation
/// the cart is written to local storage, and on construction the cart is
/// seeded back from there.
///
/// The catalog and stock caches start empty; [`CartStore::refresh`]
/// fills them from the remote source. Operations that run before the
/// first refresh resolves behave as if the catalog and stock were empty.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<Inner>,
}

/// Which consumer operation an error came from, for notice wording.
#[derive(Debug, Clone, Copy)]
enum Operation {
    Add,
    Remove,
    Update,
}

impl Operation {
    fn as_str(self) -> &'static str {
        match self {
            Operation::Add => "add_product",
            Operation::Remove => "remove_product",
            Operation::Update => "update_product_amount",
        }
    }

    fn failure_notice(self) -> &'static str {
        match self {
            Operation::Add => ADD_FAILED_NOTICE,
            Operation::Remove => REMOVE_FAILED_NOTICE,
            Operation::Update => UPDATE_FAILED_NOTICE,
        }
    }
}

impl CartStore {
    /// Create a store over a source and local storage, logging notices
    /// through `tracing`.
    pub fn new(source: Arc<dyn CatalogSource>, storage: Storage, config: StoreConfig) -> Self {
        Self::with_sink(source, storage, config, Arc::new(TracingSink))
    }

    /// Create a store that publishes notices to the given sink.
    pub fn with_sink(
        source: Arc<dyn CatalogSource>,
        storage: Storage,
        config: StoreConfig,
        sink: Arc<dyn NoticeSink>,
    ) -> Self {
        let cart = match storage.get::<Cart>(&config.storage_key) {
            Ok(Some(cart)) => {
                tracing::debug!(items = cart.unique_item_count(), "cart seeded from storage");
                cart
            }
            Ok(None) => Cart::new(),
            Err(err) => {
                tracing::warn!(error = %err, "could not load persisted cart, starting empty");
                Cart::new()
            }
        };

        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    cart,
                    catalog: Catalog::new(),
                    stock: StockTable::new(),
                }),
                source,
                storage,
                storage_key: config.storage_key,
                sink,
            }),
        }
    }

    /// Create a store fetching from the HTTP endpoints the configuration
    /// names.
    pub fn connect(storage: Storage, config: StoreConfig) -> Result<Self, FetchError> {
        let source = HttpCatalogSource::with_policy(&config.base_url, config.fetch_policy())?;
        Ok(Self::new(Arc::new(source), storage, config))
    }

    /// Fetch the product catalog and stock table and cache both.
    ///
    /// The two fetches run concurrently and are applied independently; a
    /// failed fetch leaves the corresponding cache as it was.
    pub async fn refresh(&self) {
        let source = Arc::clone(&self.inner.source);
        let (products, stock) = futures::join!(source.fetch_products(), source.fetch_stock());

        let mut state = self.state();
        match products {
            Ok(products) => {
                tracing::debug!(count = products.len(), "product catalog cached");
                state.catalog = Catalog::from(products);
            }
            Err(err) => tracing::warn!(error = %err, "could not fetch product catalog"),
        }
        match stock {
            Ok(stock) => {
                tracing::debug!(count = stock.len(), "stock table cached");
                state.stock = StockTable::from(stock);
            }
            Err(err) => tracing::warn!(error = %err, "could not fetch stock table"),
        }
    }

    /// Run [`CartStore::refresh`] on a background task, fire-and-forget.
    pub fn spawn_refresh(&self) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move { store.refresh().await })
    }

    /// Add one unit of a product to the cart.
    ///
    /// A product already in the cart has its amount incremented, but only
    /// while below the available stock. A product not yet in the cart is
    /// looked up in the cached catalog and inserted with amount one.
    pub fn add_product(&self, product_id: ProductId) {
        if let Err(err) = self.try_add(product_id) {
            self.report(Operation::Add, err);
        }
    }

    /// Remove a product from the cart.
    pub fn remove_product(&self, product_id: ProductId) {
        if let Err(err) = self.try_remove(product_id) {
            self.report(Operation::Remove, err);
        }
    }

    /// Overwrite the requested amount of a product already in the cart.
    ///
    /// Non-positive amounts are ignored; amounts above the available
    /// stock are rejected with a notice.
    pub fn update_product_amount(&self, product_id: ProductId, amount: i64) {
        if amount <= 0 {
            tracing::debug!(%product_id, amount, "ignoring non-positive amount");
            return;
        }
        if let Err(err) = self.try_update(product_id, amount) {
            self.report(Operation::Update, err);
        }
    }

    /// The current cart items, in insertion order.
    pub fn snapshot(&self) -> Vec<CartItem> {
        self.state().cart.items().to_vec()
    }

    /// Total item count (sum of amounts).
    pub fn item_count(&self) -> i64 {
        self.state().cart.item_count()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.state().cart.is_empty()
    }

    fn try_add(&self, product_id: ProductId) -> Result<(), CommerceError> {
        let mut state = self.state();

        if let Some(current) = state.cart.amount_of(product_id) {
            let requested = current + 1;
            let available = state.stock.available_for(product_id);
            if requested > available {
                return Err(CommerceError::OutOfStock {
                    product_id,
                    requested,
                    available,
                });
            }
            state.cart.increment(product_id)?;
        } else {
            let product = state
                .catalog
                .find(product_id)
                .cloned()
                .ok_or(CommerceError::ProductNotFound(product_id))?;
            state.cart.insert(product)?;
        }

        tracing::debug!(%product_id, "product added to cart");
        self.persist(&state.cart);
        Ok(())
    }

    fn try_remove(&self, product_id: ProductId) -> Result<(), CommerceError> {
        let mut state = self.state();
        state.cart.remove(product_id)?;

        tracing::debug!(%product_id, "product removed from cart");
        self.persist(&state.cart);
        Ok(())
    }

    fn try_update(&self, product_id: ProductId, amount: i64) -> Result<(), CommerceError> {
        let mut state = self.state();

        // Stock is checked before cart membership, so an unknown product
        // with an unfulfillable amount reads as out of stock.
        let available = state.stock.available_for(product_id);
        if amount > available {
            return Err(CommerceError::OutOfStock {
                product_id,
                requested: amount,
                available,
            });
        }
        state.cart.set_amount(product_id, amount)?;

        tracing::debug!(%product_id, amount, "product amount updated");
        self.persist(&state.cart);
        Ok(())
    }

    fn persist(&self, cart: &Cart) {
        if let Err(err) = self.inner.storage.set(&self.inner.storage_key, cart) {
            tracing::error!(error = %err, key = %self.inner.storage_key, "could not persist cart");
            self.inner.sink.publish(Notice::error(PERSIST_FAILED_NOTICE));
        }
    }

    fn report(&self, operation: Operation, err: CommerceError) {
        let message = match &err {
            CommerceError::OutOfStock { .. } | CommerceError::QuantityExceedsLimit(_, _) => {
                OUT_OF_STOCK_NOTICE
            }
            _ => operation.failure_notice(),
        };
        tracing::error!(operation = operation.as_str(), error = %err, "cart operation failed");
        self.inner.sink.publish(Notice::error(message));
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("CartStore")
            .field("items", &state.cart.unique_item_count())
            .field("catalog", &state.catalog.len())
            .field("stock", &state.stock.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ChannelSink;
    use async_trait::async_trait;
    use shopfront_commerce::{Product, StockLevel};
    use tokio::sync::mpsc::UnboundedReceiver;

    struct FixtureSource {
        products: Vec<Product>,
        stock: Vec<StockLevel>,
    }

    #[async_trait]
    impl CatalogSource for FixtureSource {
        async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
            Ok(self.products.clone())
        }

        async fn fetch_stock(&self) -> Result<Vec<StockLevel>, FetchError> {
            Ok(self.stock.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl CatalogSource for FailingSource {
        async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
            Err(FetchError::Connection("refused".to_string()))
        }

        async fn fetch_stock(&self) -> Result<Vec<StockLevel>, FetchError> {
            Err(FetchError::Connection("refused".to_string()))
        }
    }

    fn fixture_source() -> Arc<FixtureSource> {
        Arc::new(FixtureSource {
            products: vec![
                Product::new(1, "Sneaker", 179.9, "https://img.example/1.jpg"),
                Product::new(2, "Running Shoe", 139.9, "https://img.example/2.jpg"),
            ],
            stock: vec![StockLevel::new(1, 2), StockLevel::new(2, 0)],
        })
    }

    async fn store_with_fixture() -> (CartStore, UnboundedReceiver<Notice>, Storage) {
        let storage = Storage::in_memory();
        let (sink, rx) = ChannelSink::channel();
        let store = CartStore::with_sink(
            fixture_source(),
            storage.clone(),
            StoreConfig::default(),
            sink,
        );
        store.refresh().await;
        (store, rx, storage)
    }

    fn persisted_cart(storage: &Storage) -> Cart {
        storage
            .get::<Cart>("shopfront:cart")
            .unwrap()
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_add_new_product_inserts_with_amount_one() {
        let (store, mut rx, storage) = store_with_fixture().await;

        store.add_product(ProductId::new(1));

        let items = store.snapshot();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].amount, 1);
        assert_eq!(items[0].product.title, "Sneaker");
        assert_eq!(persisted_cart(&storage), Cart::from(items));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_add_existing_increments_below_stock() {
        let (store, mut rx, _storage) = store_with_fixture().await;

        store.add_product(ProductId::new(1));
        store.add_product(ProductId::new(1));

        assert_eq!(store.snapshot()[0].amount, 2);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_add_at_stock_limit_is_rejected() {
        let (store, mut rx, storage) = store_with_fixture().await;

        store.add_product(ProductId::new(1));
        store.add_product(ProductId::new(1));
        // Stock for product 1 is 2; the third add must fail.
        store.add_product(ProductId::new(1));

        assert_eq!(store.snapshot()[0].amount, 2);
        assert_eq!(persisted_cart(&storage).amount_of(ProductId::new(1)), Some(2));
        assert_eq!(rx.try_recv().unwrap().message, OUT_OF_STOCK_NOTICE);
    }

    #[tokio::test]
    async fn test_add_zero_stock_product_is_rejected_on_increment() {
        let (store, mut rx, _storage) = store_with_fixture().await;

        // The first add only consults the catalog; the stock check
        // applies on increment.
        store.add_product(ProductId::new(2));
        store.add_product(ProductId::new(2));

        assert_eq!(store.snapshot()[0].amount, 1);
        assert_eq!(rx.try_recv().unwrap().message, OUT_OF_STOCK_NOTICE);
    }

    #[tokio::test]
    async fn test_add_unknown_product_reports_failure() {
        let (store, mut rx, _storage) = store_with_fixture().await;

        store.add_product(ProductId::new(99));

        assert!(store.is_empty());
        assert_eq!(rx.try_recv().unwrap().message, ADD_FAILED_NOTICE);
    }

    #[tokio::test]
    async fn test_add_before_refresh_sees_empty_catalog() {
        let storage = Storage::in_memory();
        let (sink, mut rx) = ChannelSink::channel();
        let store =
            CartStore::with_sink(fixture_source(), storage, StoreConfig::default(), sink);

        store.add_product(ProductId::new(1));

        assert!(store.is_empty());
        assert_eq!(rx.try_recv().unwrap().message, ADD_FAILED_NOTICE);
    }

    #[tokio::test]
    async fn test_remove_product() {
        let (store, mut rx, storage) = store_with_fixture().await;

        store.add_product(ProductId::new(1));
        store.remove_product(ProductId::new(1));

        assert!(store.is_empty());
        assert!(persisted_cart(&storage).is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_remove_missing_product_reports_failure() {
        let (store, mut rx, _storage) = store_with_fixture().await;

        store.remove_product(ProductId::new(1));

        assert_eq!(rx.try_recv().unwrap().message, REMOVE_FAILED_NOTICE);
    }

    #[tokio::test]
    async fn test_update_amount() {
        let (store, mut rx, storage) = store_with_fixture().await;

        store.add_product(ProductId::new(1));
        store.update_product_amount(ProductId::new(1), 2);

        assert_eq!(store.snapshot()[0].amount, 2);
        assert_eq!(persisted_cart(&storage).amount_of(ProductId::new(1)), Some(2));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_update_non_positive_amount_is_a_no_op() {
        let (store, mut rx, _storage) = store_with_fixture().await;

        store.add_product(ProductId::new(1));
        store.update_product_amount(ProductId::new(1), 0);
        store.update_product_amount(ProductId::new(1), -4);

        assert_eq!(store.snapshot()[0].amount, 1);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_update_beyond_stock_is_rejected() {
        let (store, mut rx, _storage) = store_with_fixture().await;

        store.add_product(ProductId::new(1));
        store.update_product_amount(ProductId::new(1), 3);

        assert_eq!(store.snapshot()[0].amount, 1);
        assert_eq!(rx.try_recv().unwrap().message, OUT_OF_STOCK_NOTICE);
    }

    #[tokio::test]
    async fn test_update_missing_item_reports_failure() {
        let (store, mut rx, _storage) = store_with_fixture().await;

        store.update_product_amount(ProductId::new(1), 2);

        assert_eq!(rx.try_recv().unwrap().message, UPDATE_FAILED_NOTICE);
    }

    #[tokio::test]
    async fn test_seeds_cart_from_storage() {
        let (store, _rx, storage) = store_with_fixture().await;
        store.add_product(ProductId::new(1));

        let (sink, _rx2) = ChannelSink::channel();
        let reopened =
            CartStore::with_sink(fixture_source(), storage, StoreConfig::default(), sink);

        assert_eq!(reopened.snapshot(), store.snapshot());
    }

    #[tokio::test]
    async fn test_failed_refresh_leaves_caches_empty() {
        let storage = Storage::in_memory();
        let (sink, mut rx) = ChannelSink::channel();
        let store = CartStore::with_sink(
            Arc::new(FailingSource),
            storage,
            StoreConfig::default(),
            sink,
        );
        store.refresh().await;

        store.add_product(ProductId::new(1));
        assert!(store.is_empty());
        assert_eq!(rx.try_recv().unwrap().message, ADD_FAILED_NOTICE);
    }
}
