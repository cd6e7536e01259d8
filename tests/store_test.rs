mod common;

use anyhow::Result;
use bottega::backend::{CatalogApi, CustomerApi, LocalStore, SaleApi, SubmissionApi};
use bottega::domain::{
    BillRecord, Customer, NewCustomer, PaymentMode, SaleData, SaleType,
};
use common::{parse_date, test_store, SampleStore};

#[tokio::test]
async fn test_store_round_trips_through_the_file() -> Result<()> {
    let (store, temp) = test_store()?;
    SampleStore::seed(&store).await?;
    drop(store);

    // A fresh handle on the same path sees everything
    let reopened = LocalStore::open(temp.path().join("store.json"))?;
    assert_eq!(reopened.list_products().await?.len(), 2);
    assert_eq!(reopened.list_units().await?.len(), 2);
    assert_eq!(reopened.list_customers().await?.len(), 1);
    assert_eq!(reopened.list_sales().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_init_refuses_existing_file() -> Result<()> {
    let (_store, temp) = test_store()?;
    let path = temp.path().join("store.json");

    assert!(LocalStore::init(&path).is_err());
    Ok(())
}

#[tokio::test]
async fn test_open_requires_existing_file() -> Result<()> {
    let temp = tempfile::TempDir::new()?;
    assert!(LocalStore::open(temp.path().join("missing.json")).is_err());
    Ok(())
}

#[tokio::test]
async fn test_ids_are_issued_in_sequence() -> Result<()> {
    let (store, _temp) = test_store()?;
    SampleStore::seed(&store).await?;

    let customer = store
        .create_customer(&NewCustomer::new("Meena", "9000000001", "Station Road"))
        .await?;
    assert_eq!(customer.customer_id, 2);

    let sale = store
        .create_sale(&SaleData {
            customer_id: customer.customer_id,
            sale_date: parse_date("2024-02-01"),
            sale_type: SaleType::Wholesale,
            payment_mode: PaymentMode::Online,
            gross_total: 100000,
        })
        .await?;
    assert_eq!(sale.sale_id, 2);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_unit_is_rejected() -> Result<()> {
    let (store, _temp) = test_store()?;
    store.add_unit("kg")?;
    assert!(store.add_unit("kg").is_err());
    Ok(())
}

#[tokio::test]
async fn test_sale_requires_known_customer() -> Result<()> {
    let (store, _temp) = test_store()?;

    let result = store
        .create_sale(&SaleData {
            customer_id: 42,
            sale_date: parse_date("2024-02-01"),
            sale_type: SaleType::Retail,
            payment_mode: PaymentMode::Cash,
            gross_total: 5000,
        })
        .await;
    assert!(result.is_err());

    Ok(())
}

#[tokio::test]
async fn test_return_requires_known_sale() -> Result<()> {
    let (store, _temp) = test_store()?;
    SampleStore::seed(&store).await?;

    let bill = BillRecord {
        sale_id: 42,
        customer: Customer {
            customer_id: 1,
            customer_name: "Ravi".to_string(),
            mobile_number: "9876543210".to_string(),
            address: "MG Road".to_string(),
        },
        return_date: parse_date("2024-01-15"),
        return_type: SaleType::Retail,
        payment_mode: PaymentMode::Cash,
        return_items: Vec::new(),
        total_return_amount: 0,
    };
    assert!(store.create_return(&bill).await.is_err());

    Ok(())
}
