use super::{Catalog, LineItem, Paise, ProductId};

/// Total of a list of return items.
pub fn compute_total(items: &[LineItem]) -> Paise {
    items.iter().map(|item| item.total_price).sum()
}

/// The item currently being composed (product selection, quantity, price)
/// before it is committed to the ledger. Reset to empty after each
/// successful add.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftEntry {
    pub product_id: Option<ProductId>,
    pub quantity: f64,
    pub price: Paise,
}

impl DraftEntry {
    pub fn new(product_id: ProductId, quantity: f64, price: Paise) -> Self {
        Self {
            product_id: Some(product_id),
            quantity,
            price,
        }
    }
}

/// The in-memory collection of return line items and their running total.
/// Invariant: the total always equals the sum of the current items'
/// subtotals; it is recomputed on every add and remove.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    items: Vec<LineItem>,
    total: Paise,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn total(&self) -> Paise {
        self.total
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Commit a draft entry as a line item. Rejects an unset product, a
    /// non-positive quantity or price, and a product id the catalog does
    /// not know. On rejection the ledger is untouched.
    pub fn add_item(&mut self, draft: &DraftEntry, catalog: &Catalog) -> Result<(), LedgerError> {
        let product_id = draft.product_id.ok_or(LedgerError::MissingProduct)?;
        if draft.quantity <= 0.0 {
            return Err(LedgerError::InvalidQuantity(draft.quantity));
        }
        if draft.price <= 0 {
            return Err(LedgerError::InvalidPrice(draft.price));
        }
        let product = catalog
            .get(product_id)
            .ok_or(LedgerError::ProductNotFound(product_id))?;

        self.items
            .push(LineItem::new(product.clone(), draft.quantity, draft.price));
        self.total = compute_total(&self.items);
        Ok(())
    }

    /// Remove the item at the given position. Rejects out-of-bounds
    /// indexes without touching the ledger.
    pub fn remove_item(&mut self, index: usize) -> Result<LineItem, LedgerError> {
        if index >= self.items.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let removed = self.items.remove(index);
        self.total = compute_total(&self.items);
        Ok(removed)
    }

    /// Snapshot of the current items, for assembling a bill record.
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.items.clone()
    }

    /// Reset to the initial empty state.
    pub fn clear(&mut self) {
        self.items.clear();
        self.total = 0;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LedgerError {
    MissingProduct,
    InvalidQuantity(f64),
    InvalidPrice(Paise),
    ProductNotFound(ProductId),
    IndexOutOfRange { index: usize, len: usize },
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerError::MissingProduct => write!(f, "No product selected"),
            LedgerError::InvalidQuantity(q) => write!(f, "Quantity must be positive, got {}", q),
            LedgerError::InvalidPrice(p) => write!(f, "Price must be positive, got {} paise", p),
            LedgerError::ProductNotFound(id) => write!(f, "Product not found: {}", id),
            LedgerError::IndexOutOfRange { index, len } => {
                write!(f, "No item at position {} ({} items)", index, len)
            }
        }
    }
}

impl std::error::Error for LedgerError {}
