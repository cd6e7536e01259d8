use serde::{Deserialize, Serialize};

use super::Paise;

pub type ProductId = i64;
pub type UnitId = i64;

/// Measurement unit a product is sold in (kg, pcs, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub unit_id: UnitId,
    pub unit_name: String,
}

/// A catalog entry. Stock quantity is fractional because goods are sold
/// by weight as well as by piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: ProductId,
    pub product_code: String,
    pub product_name: String,
    pub unit: Unit,
    pub quantity: f64,
    pub buying_price: Paise,
    pub selling_price_retail: Paise,
    pub selling_price_wholesale: Paise,
}

impl Product {
    pub fn new(
        product_id: ProductId,
        product_code: impl Into<String>,
        product_name: impl Into<String>,
        unit: Unit,
    ) -> Self {
        Self {
            product_id,
            product_code: product_code.into(),
            product_name: product_name.into(),
            unit,
            quantity: 0.0,
            buying_price: 0,
            selling_price_retail: 0,
            selling_price_wholesale: 0,
        }
    }

    pub fn with_stock(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_prices(mut self, buying: Paise, retail: Paise, wholesale: Paise) -> Self {
        self.buying_price = buying;
        self.selling_price_retail = retail;
        self.selling_price_wholesale = wholesale;
        self
    }
}

/// Payload for creating or updating a product; the backend issues the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    pub product_name: String,
    pub product_code: String,
    pub unit: Unit,
    pub quantity: f64,
    pub buying_price: Paise,
    pub selling_price_retail: Paise,
    pub selling_price_wholesale: Paise,
}

/// The product catalog: an ordered product list keyed by id for lookup.
/// Ordering is the backend's insertion order; the next product code is
/// derived from the last entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.product_id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Code to assign to the next product, derived from the last entry.
    /// An empty catalog starts at "P001".
    pub fn next_code(&self) -> String {
        self.products
            .last()
            .map(|p| next_product_code(&p.product_code))
            .unwrap_or_else(|| "P001".to_string())
    }

    pub fn push(&mut self, product: Product) {
        self.products.push(product);
    }

    /// Replace the entry with the same id. Returns false if absent.
    pub fn replace(&mut self, product: Product) -> bool {
        match self
            .products
            .iter_mut()
            .find(|p| p.product_id == product.product_id)
        {
            Some(slot) => {
                *slot = product;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: ProductId) -> Option<Product> {
        let index = self.products.iter().position(|p| p.product_id == id)?;
        Some(self.products.remove(index))
    }
}

/// Increment a product code of the form prefix + trailing digits, keeping
/// the zero padding ("P009" -> "P010") and widening on overflow
/// ("P999" -> "P1000"). Codes with no trailing digits fall back to "P001".
pub fn next_product_code(last_code: &str) -> String {
    let prefix = last_code.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &last_code[prefix.len()..];
    if digits.is_empty() {
        return "P001".to_string();
    }
    match digits.parse::<u64>() {
        Ok(n) => format!("{}{:0width$}", prefix, n + 1, width = digits.len()),
        Err(_) => "P001".to_string(),
    }
}
