/// Stock level classification
///
/// Splits an owner's inventory into the two restock-attention buckets the
/// dashboard and the low-stock endpoint surface: items that are completely
/// out of stock, and items that are running low against a threshold.
///
/// The buckets are disjoint. Zero quantity always means out of stock, never
/// low stock, regardless of the threshold in use.
///
/// # Example
///
/// ```
/// use stockroom_shared::stock::{classify, DEFAULT_LOW_STOCK_THRESHOLD};
///
/// let report = classify(&[], DEFAULT_LOW_STOCK_THRESHOLD);
/// assert!(report.low_stock.is_empty());
/// assert!(report.out_of_stock.is_empty());
/// ```
use serde::{Deserialize, Serialize};

use crate::models::item::{InventoryItem, ItemView};

/// Threshold used when the caller does not supply one
///
/// An item with a quantity at or below this (but above zero) counts as
/// low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// Inventory rows needing restock attention, bucketed by severity
///
/// Rows appear in at most one bucket. Within each bucket the input order
/// is preserved, so callers feeding rows sorted by name get sorted buckets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockReport {
    /// Items with a positive quantity at or below the threshold
    pub low_stock: Vec<ItemView>,

    /// Items with zero quantity
    pub out_of_stock: Vec<ItemView>,
}

/// Classifies inventory rows against a low-stock threshold
///
/// # Arguments
///
/// * `items` - Inventory rows, already scoped to one owner
/// * `threshold` - Inclusive upper bound for the low-stock bucket
///
/// # Returns
///
/// A [`StockReport`] with display-ready rows. Items with a quantity above
/// the threshold are healthy and appear in neither bucket.
pub fn classify(items: &[InventoryItem], threshold: i64) -> StockReport {
    let mut report = StockReport {
        low_stock: Vec::new(),
        out_of_stock: Vec::new(),
    };

    for item in items {
        if item.quantity == 0 {
            report.out_of_stock.push(ItemView::from(item));
        } else if item.quantity <= threshold {
            report.low_stock.push(ItemView::from(item));
        }
    }

    report
}
