//! Shopping cart kept on the client.
//!
//! The cart is an ordered list of line items keyed by product ID. It is
//! persisted as JSON through a [`CartStorage`] under a storage key, so the
//! same cart can be restored across sessions.

use std::collections::HashMap;

use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storage key used when none is given.
pub const DEFAULT_STORAGE_KEY: &str = "cart-storage";

/// One product line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: Uuid,
    pub name: String,
    /// Unit price in the smallest currency unit.
    pub price: i64,
    pub quantity: u32,
    pub image: String,
}

/// Cart contents in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, product_id: Uuid) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    /// Add an item. If the product is already in the cart the quantities
    /// are summed and the existing line keeps its position.
    pub fn add_item(&mut self, item: CartItem) {
        match self.items.iter_mut().find(|i| i.product_id == item.product_id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
            None => self.items.push(item),
        }
    }

    /// Remove a product's line. Returns whether it was present.
    pub fn remove_item(&mut self, product_id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        self.items.len() != before
    }

    /// Set a product's quantity. Zero or less removes the line.
    pub fn update_quantity(&mut self, product_id: Uuid, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of price times quantity over all lines.
    pub fn total(&self) -> i64 {
        self.items
            .iter()
            .map(|i| i.price.saturating_mul(i64::from(i.quantity)))
            .fold(0, i64::saturating_add)
    }

    /// Sum of quantities over all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Persistence boundary for carts.
pub trait CartStorage: Send + Sync {
    /// Load the serialized cart stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Store a serialized cart under `key`.
    fn save(&self, key: &str, value: String) -> Result<()>;
}

/// Cart storage held in process memory.
#[derive(Default)]
pub struct MemoryCartStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCartStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryCartStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn save(&self, key: &str, value: String) -> Result<()> {
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }
}

/// A cart bound to a storage key that persists after every change.
pub struct CartStore<S: CartStorage> {
    storage: S,
    key: String,
    cart: Cart,
}

impl<S: CartStorage> CartStore<S> {
    /// Open the cart under [`DEFAULT_STORAGE_KEY`].
    pub fn open(storage: S) -> Result<Self> {
        Self::open_with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Open the cart under `key`, restoring any saved contents.
    pub fn open_with_key(storage: S, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let cart = match storage.load(&key)? {
            Some(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse saved cart '{key}'"))?,
            None => Cart::new(),
        };
        Ok(Self { storage, key, cart })
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn add_item(&mut self, item: CartItem) -> Result<()> {
        self.cart.add_item(item);
        self.persist()
    }

    pub fn remove_item(&mut self, product_id: Uuid) -> Result<()> {
        self.cart.remove_item(product_id);
        self.persist()
    }

    pub fn update_quantity(&mut self, product_id: Uuid, quantity: i64) -> Result<()> {
        self.cart.update_quantity(product_id, quantity);
        self.persist()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.cart.clear();
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.cart).context("failed to serialize cart")?;
        self.storage.save(&self.key, raw)
    }
}
