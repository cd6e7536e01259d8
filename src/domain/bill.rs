use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{line_total, Customer, Paise, PaymentMode, Product, SaleId, SaleType};

pub type ReturnId = i64;

/// One product/quantity/price/subtotal tuple within a return. Immutable
/// once added to a ledger; corrections are made by removing and re-adding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product: Product,
    pub quantity: f64,
    pub price: Paise,
    pub total_price: Paise,
}

impl LineItem {
    /// Build a line item, computing the subtotal from quantity and price.
    pub fn new(product: Product, quantity: f64, price: Paise) -> Self {
        let total_price = line_total(quantity, price);
        Self {
            product,
            quantity,
            price,
            total_price,
        }
    }
}

/// The finalized payload for creating a return bill. Assembled only at
/// submission time, never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    pub sale_id: SaleId,
    pub customer: Customer,
    pub return_date: DateTime<Utc>,
    pub return_type: SaleType,
    pub payment_mode: PaymentMode,
    pub return_items: Vec<LineItem>,
    pub total_return_amount: Paise,
}

/// Acknowledgment from the submission collaborator: the server-issued
/// return id plus the record as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBill {
    pub return_id: ReturnId,
    pub bill: BillRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Unit;

    #[test]
    fn test_line_item_computes_subtotal() {
        let unit = Unit {
            unit_id: 1,
            unit_name: "kg".to_string(),
        };
        let product = Product::new(1, "P001", "Atta", unit);

        let item = LineItem::new(product, 2.5, 4000);
        assert_eq!(item.total_price, 10000);
    }
}
