//! The cart store: in-memory state mirrored to a key-value medium.

use crate::cart::persistence::{self, Decoded};
use crate::cart::{reduce, CartAction, CartLine, CartState};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use vitrine_cache::{Cache, KeyValueStore, SessionId};

/// Storage key used when none is configured.
pub const DEFAULT_CART_KEY: &str = "vitrine-cart";

/// Cart store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Key the cart record is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Currency used for formatted totals.
    #[serde(default)]
    pub currency: Currency,
}

fn default_storage_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            currency: Currency::default(),
        }
    }
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&CartState)>;

/// Authoritative cart state for one client session.
///
/// Every mutation is applied in memory first, then the full line array is
/// written to storage, then subscribers are notified. A failed write is
/// logged and remembered but never undoes the mutation; the next mutation
/// writes the complete state again.
///
/// # Example
///
/// ```rust
/// use vitrine_cache::MemoryStore;
/// use vitrine_commerce::prelude::*;
///
/// let mut cart = CartStore::open(MemoryStore::new());
/// cart.add_item(Product::new("1", "Batom", 100.0), 1).unwrap();
/// cart.add_item(Product::new("2", "Rímel", 50.0), 2).unwrap();
/// assert_eq!(cart.total_items(), 3);
/// assert_eq!(cart.total_price(), 200.0);
/// ```
pub struct CartStore<S: KeyValueStore> {
    state: CartState,
    cache: Cache<S>,
    config: CartConfig,
    session: SessionId,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    last_persist_error: Option<String>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Open a store with the default configuration, restoring any saved cart.
    pub fn open(storage: S) -> Self {
        Self::open_with(storage, CartConfig::default())
    }

    /// Open a store, restoring any cart saved under `config.storage_key`.
    ///
    /// A missing, unreadable or malformed record yields an empty cart.
    pub fn open_with(storage: S, config: CartConfig) -> Self {
        let mut store = Self {
            state: CartState::new(),
            cache: Cache::new(storage),
            config,
            session: SessionId::generate(),
            listeners: Vec::new(),
            next_subscription: 0,
            last_persist_error: None,
        };
        let lines = store.read_persisted();
        store.state = reduce(
            CartState::new(),
            CartAction::LoadFromPersistence { lines },
            Utc::now(),
        );
        store
    }

    /// Re-read the saved record, replacing the in-memory cart.
    pub fn reload(&mut self) {
        let lines = self.read_persisted();
        self.state = reduce(
            std::mem::take(&mut self.state),
            CartAction::LoadFromPersistence { lines },
            Utc::now(),
        );
        self.notify();
    }

    fn read_persisted(&self) -> Vec<CartLine> {
        let key = self.config.storage_key.as_str();
        let bytes = match self.cache.get_raw(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::debug!(session = %self.session, key, "no saved cart");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(session = %self.session, key, error = %e, "cart storage unreadable, starting empty");
                return Vec::new();
            }
        };

        match persistence::decode(&bytes, Utc::now()) {
            Ok(Decoded { lines, skipped }) => {
                if skipped > 0 {
                    tracing::warn!(session = %self.session, key, skipped, "dropped malformed cart entries");
                }
                tracing::debug!(session = %self.session, key, lines = lines.len(), "restored cart");
                lines
            }
            Err(e) => {
                tracing::warn!(session = %self.session, key, error = %e, "saved cart is corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Apply an action, persist the result and notify subscribers.
    pub fn dispatch(&mut self, action: CartAction) {
        let name = action.name();
        let persist = !matches!(action, CartAction::LoadFromPersistence { .. });
        self.state = reduce(std::mem::take(&mut self.state), action, Utc::now());
        tracing::debug!(session = %self.session, action = name, lines = self.state.len(), "cart updated");
        if persist {
            self.persist();
        }
        self.notify();
    }

    fn persist(&mut self) {
        let key = self.config.storage_key.as_str();
        let result = persistence::encode(self.state.lines())
            .and_then(|bytes| self.cache.set_raw(key, &bytes).map_err(CommerceError::from));
        match result {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                tracing::warn!(session = %self.session, key, error = %e, "failed to save cart, keeping it in memory");
                self.last_persist_error = Some(e.to_string());
            }
        }
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }

    /// Add `quantity` units of `product`.
    ///
    /// An existing line keeps its position and its original product
    /// snapshot; only the quantity grows. Quantities below 1 are rejected
    /// and leave the cart untouched.
    pub fn add_item(&mut self, product: Product, quantity: i64) -> Result<(), CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        let quantity = u32::try_from(quantity).map_err(|_| CommerceError::Overflow)?;
        self.state
            .item_quantity(&product.id)
            .checked_add(quantity)
            .ok_or(CommerceError::Overflow)?;

        self.dispatch(CartAction::AddItem { product, quantity });
        Ok(())
    }

    /// Add a single unit of `product`.
    pub fn add_one(&mut self, product: Product) -> Result<(), CommerceError> {
        self.add_item(product, 1)
    }

    /// Remove the line for `product_id`, if any.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.dispatch(CartAction::RemoveItem {
            product_id: product_id.clone(),
        });
    }

    /// Replace the quantity of an existing line; `quantity <= 0` removes it.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        self.dispatch(CartAction::UpdateQuantity {
            product_id: product_id.clone(),
            quantity,
        });
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.dispatch(CartAction::ClearCart);
    }

    /// Register a listener called with the new state after every change.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() < before
    }

    /// Current state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        self.state.lines()
    }

    pub fn total_items(&self) -> u64 {
        self.state.total_items()
    }

    pub fn total_price(&self) -> f64 {
        self.state.total_price()
    }

    /// Total in the configured currency.
    pub fn total_money(&self) -> Result<Money, CommerceError> {
        self.state.total_money(self.config.currency)
    }

    pub fn item_quantity(&self, product_id: &ProductId) -> u32 {
        self.state.item_quantity(product_id)
    }

    pub fn is_in_cart(&self, product_id: &ProductId) -> bool {
        self.state.is_in_cart(product_id)
    }

    /// Store settings.
    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// Error from the most recent write, cleared by the next successful one.
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }
}

impl<S: KeyValueStore> std::fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("session", &self.session)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
