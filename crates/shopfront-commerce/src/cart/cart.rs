//! Cart and cart item types.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per cart item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A product in the cart together with its requested quantity.
///
/// Serializes flat (`{id, title, price, image, amount}`) so the persisted
/// cart array keeps the same shape as the catalog records it was built
/// from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// The product being purchased (denormalized catalog copy).
    #[serde(flatten)]
    pub product: Product,
    /// Requested quantity. Always >= 1 while the item is in the cart.
    pub amount: i64,
}

impl CartItem {
    /// Create a new cart item with quantity one.
    pub fn new(product: Product) -> Self {
        Self { product, amount: 1 }
    }

    /// The product ID of this item.
    pub fn id(&self) -> ProductId {
        self.product.id
    }
}

/// A shopping cart.
///
/// An ordered sequence of items, unique by product id, mutated only
/// through the methods below. All methods validate their inputs and
/// return `CommerceError` instead of panicking; stock validation lives
/// one layer up, where the stock table is cached.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a product as a new item with quantity one.
    ///
    /// Returns an error if the product is already in the cart; existing
    /// items are updated through [`Cart::increment`] or
    /// [`Cart::set_amount`].
    pub fn insert(&mut self, product: Product) -> Result<(), CommerceError> {
        if self.contains(product.id) {
            return Err(CommerceError::ItemAlreadyInCart(product.id));
        }
        self.items.push(CartItem::new(product));
        Ok(())
    }

    /// Increase an existing item's quantity by one.
    ///
    /// Returns the new quantity, or an error if the item is absent or the
    /// per-item cap would be exceeded.
    pub fn increment(&mut self, id: ProductId) -> Result<i64, CommerceError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id() == id)
            .ok_or(CommerceError::ItemNotInCart(id))?;

        let new_amount = item.amount + 1;
        if new_amount > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                new_amount,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        item.amount = new_amount;
        Ok(new_amount)
    }

    /// Overwrite an existing item's quantity.
    ///
    /// Returns an error if the quantity is not positive, exceeds the
    /// per-item cap, or the item is absent.
    pub fn set_amount(&mut self, id: ProductId, amount: i64) -> Result<(), CommerceError> {
        if amount <= 0 {
            return Err(CommerceError::InvalidQuantity(amount));
        }
        if amount > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                amount,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        let item = self
            .items
            .iter_mut()
            .find(|i| i.id() == id)
            .ok_or(CommerceError::ItemNotInCart(id))?;
        item.amount = amount;
        Ok(())
    }

    /// Remove an item from the cart, returning it.
    pub fn remove(&mut self, id: ProductId) -> Result<CartItem, CommerceError> {
        let position = self
            .items
            .iter()
            .position(|i| i.id() == id)
            .ok_or(CommerceError::ItemNotInCart(id))?;
        Ok(self.items.remove(position))
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get an item by product ID.
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id() == id)
    }

    /// Current quantity of a product, if it is in the cart.
    pub fn amount_of(&self, id: ProductId) -> Option<i64> {
        self.get(id).map(|i| i.amount)
    }

    /// Check whether a product is in the cart.
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.amount).sum()
    }

    /// Get number of unique items.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        Self { items }
    }
}
