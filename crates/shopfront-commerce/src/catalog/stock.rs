//! Stock tracking types.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Stock level for a product.
///
/// Read-only at this layer: the remote source owns the numbers, the cart
/// only validates requested quantities against them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StockLevel {
    /// Product this level belongs to.
    pub id: ProductId,
    /// Quantity available for purchase.
    pub amount: i64,
}

impl StockLevel {
    /// Create a new stock level.
    pub fn new(id: impl Into<ProductId>, amount: i64) -> Self {
        Self {
            id: id.into(),
            amount,
        }
    }

    /// Get available quantity.
    pub fn available(&self) -> i64 {
        self.amount.max(0)
    }

    /// Check if a specific quantity is available.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        self.available() >= quantity
    }

    /// Check if out of stock.
    pub fn is_out_of_stock(&self) -> bool {
        self.available() == 0
    }
}

/// The cached stock table.
///
/// Fetched once from the remote source alongside the catalog. A product
/// with no entry reads as zero available.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct StockTable {
    levels: Vec<StockLevel>,
}

impl StockTable {
    /// Create an empty stock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the stock level for a product.
    pub fn get(&self, id: ProductId) -> Option<&StockLevel> {
        self.levels.iter().find(|s| s.id == id)
    }

    /// Available quantity for a product; zero if the product is unknown.
    pub fn available_for(&self, id: ProductId) -> i64 {
        self.get(id).map(StockLevel::available).unwrap_or(0)
    }

    /// Check if a requested quantity can be fulfilled for a product.
    pub fn can_fulfill(&self, id: ProductId, quantity: i64) -> bool {
        self.available_for(id) >= quantity
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl From<Vec<StockLevel>> for StockTable {
    fn from(levels: Vec<StockLevel>) -> Self {
        Self { levels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_availability() {
        let stock = StockLevel::new(1, 3);
        assert!(stock.can_fulfill(3));
        assert!(!stock.can_fulfill(4));
        assert!(!stock.is_out_of_stock());
    }

    #[test]
    fn test_negative_amount_reads_as_zero() {
        let stock = StockLevel::new(1, -2);
        assert_eq!(stock.available(), 0);
        assert!(stock.is_out_of_stock());
    }

    #[test]
    fn test_table_lookup() {
        let table = StockTable::from(vec![StockLevel::new(1, 5), StockLevel::new(2, 0)]);
        assert_eq!(table.available_for(ProductId::new(1)), 5);
        assert_eq!(table.available_for(ProductId::new(2)), 0);
        assert!(table.can_fulfill(ProductId::new(1), 5));
        assert!(!table.can_fulfill(ProductId::new(2), 1));
    }

    #[test]
    fn test_unknown_product_reads_as_zero() {
        let table = StockTable::from(vec![StockLevel::new(1, 5)]);
        assert_eq!(table.available_for(ProductId::new(99)), 0);
        assert!(!table.can_fulfill(ProductId::new(99), 1));
    }
}
