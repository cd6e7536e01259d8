// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use bottega::backend::{CatalogApi, CustomerApi, LocalStore, SaleApi};
use bottega::domain::{NewCustomer, PaymentMode, ProductData, SaleData, SaleType};
use chrono::{DateTime, NaiveDate, Utc};
use tempfile::TempDir;

/// Helper to create a test store backed by a temporary file
pub fn test_store() -> Result<(LocalStore, TempDir)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("store.json");
    let store = LocalStore::init(&path)?;
    Ok((store, temp_dir))
}

/// Helper to parse a date string into DateTime<Utc>
pub fn parse_date(date_str: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

/// Test fixture: standard store setup
pub struct SampleStore;

impl SampleStore {
    /// Seed units (kg, pcs), two products, one customer, and one sale.
    /// Ids are issued in order: products 1 and 2, customer 1, sale 1.
    pub async fn seed(store: &LocalStore) -> Result<()> {
        let kg = store.add_unit("kg")?;
        store.add_unit("pcs")?;

        store
            .create_product(&ProductData {
                product_name: "Atta".to_string(),
                product_code: "P001".to_string(),
                unit: kg.clone(),
                quantity: 100.0,
                buying_price: 3000,
                selling_price_retail: 5000,
                selling_price_wholesale: 4500,
            })
            .await?;
        store
            .create_product(&ProductData {
                product_name: "Besan".to_string(),
                product_code: "P002".to_string(),
                unit: kg,
                quantity: 50.0,
                buying_price: 2000,
                selling_price_retail: 3000,
                selling_price_wholesale: 2800,
            })
            .await?;

        let customer = store
            .create_customer(&NewCustomer::new("Ravi", "9876543210", "MG Road"))
            .await?;

        store
            .create_sale(&SaleData {
                customer_id: customer.customer_id,
                sale_date: parse_date("2024-01-10"),
                sale_type: SaleType::Retail,
                payment_mode: PaymentMode::Cash,
                gross_total: 25000,
            })
            .await?;

        Ok(())
    }
}
