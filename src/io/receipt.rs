use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::{format_paise, format_rupees, CreatedBill};

/// Store header printed on every receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreInfo {
    pub name: String,
    pub phone: String,
    pub gstin: String,
}

impl Default for StoreInfo {
    fn default() -> Self {
        Self {
            name: "Corner Store".to_string(),
            phone: String::new(),
            gstin: String::new(),
        }
    }
}

impl StoreInfo {
    /// Load the store header from a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read store info {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse store info {}", path.display()))
    }
}

/// Render a created return bill as a plain-text receipt.
pub fn render_receipt(created: &CreatedBill, info: &StoreInfo) -> String {
    let bill = &created.bill;
    let mut out = String::new();

    let _ = writeln!(out, "{}", info.name);
    if !info.phone.is_empty() || !info.gstin.is_empty() {
        let _ = writeln!(out, "Phone: {} | GSTIN: {}", info.phone, info.gstin);
    }
    let _ = writeln!(out, "{}", "=".repeat(46));
    let _ = writeln!(out, "Return Bill #{}", created.return_id);
    let _ = writeln!(out, "Sale: #{}", bill.sale_id);
    let _ = writeln!(
        out,
        "Customer: {} ({})",
        bill.customer.customer_name, bill.customer.mobile_number
    );
    let _ = writeln!(out, "Date: {}", bill.return_date.format("%Y-%m-%d"));
    let _ = writeln!(out, "Type: {} | Payment: {}", bill.return_type, bill.payment_mode);
    let _ = writeln!(out, "{}", "-".repeat(46));

    for item in &bill.return_items {
        let _ = writeln!(
            out,
            "{:<20} {:>6} x {:>8} {:>9}",
            item.product.product_name,
            item.quantity,
            format_paise(item.price),
            format_paise(item.total_price),
        );
    }

    let _ = writeln!(out, "{}", "-".repeat(46));
    let _ = writeln!(out, "Total: {}", format_rupees(bill.total_return_amount));
    out
}
