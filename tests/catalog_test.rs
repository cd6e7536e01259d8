mod common;

use anyhow::Result;
use bottega::application::{AppError, CatalogDesk, ProductForm};
use common::{test_store, SampleStore};

#[tokio::test]
async fn test_create_product_assigns_next_code() -> Result<()> {
    let (store, _temp) = test_store()?;
    SampleStore::seed(&store).await?;
    let mut desk = CatalogDesk::load(&store).await?;

    assert_eq!(desk.next_code(), "P003");

    let form = ProductForm {
        product_name: Some("Ghee".to_string()),
        ..ProductForm::default()
    };
    let product = desk.create_product(&store, &form).await?;

    assert_eq!(product.product_code, "P003");
    assert_eq!(product.product_id, 3);
    // Unnamed unit falls back to the first registered one
    assert_eq!(product.unit.unit_name, "kg");
    assert_eq!(product.quantity, 0.0);
    assert_eq!(product.selling_price_retail, 0);

    // The next code follows on
    assert_eq!(desk.next_code(), "P004");

    Ok(())
}

#[tokio::test]
async fn test_create_product_with_explicit_fields() -> Result<()> {
    let (store, _temp) = test_store()?;
    SampleStore::seed(&store).await?;
    let mut desk = CatalogDesk::load(&store).await?;

    let form = ProductForm {
        product_name: Some("Biscuits".to_string()),
        product_code: Some("B100".to_string()),
        unit_name: Some("pcs".to_string()),
        quantity: Some(24.0),
        buying_price: Some(800),
        selling_price_retail: Some(1000),
        selling_price_wholesale: Some(900),
    };
    let product = desk.create_product(&store, &form).await?;

    assert_eq!(product.product_code, "B100");
    assert_eq!(product.unit.unit_name, "pcs");
    assert_eq!(product.selling_price_retail, 1000);

    // An explicit code feeds the sequence: B100 -> B101
    assert_eq!(desk.next_code(), "B101");

    Ok(())
}

#[tokio::test]
async fn test_create_product_defaults_name() -> Result<()> {
    let (store, _temp) = test_store()?;
    SampleStore::seed(&store).await?;
    let mut desk = CatalogDesk::load(&store).await?;

    let product = desk.create_product(&store, &ProductForm::default()).await?;
    assert_eq!(product.product_name, "Unnamed Product");

    Ok(())
}

#[tokio::test]
async fn test_unknown_unit_falls_back_to_first() -> Result<()> {
    let (store, _temp) = test_store()?;
    SampleStore::seed(&store).await?;
    let mut desk = CatalogDesk::load(&store).await?;

    let form = ProductForm {
        product_name: Some("Ghee".to_string()),
        unit_name: Some("litre".to_string()),
        ..ProductForm::default()
    };
    let product = desk.create_product(&store, &form).await?;
    assert_eq!(product.unit.unit_name, "kg");

    Ok(())
}

#[tokio::test]
async fn test_create_product_without_units() -> Result<()> {
    let (store, _temp) = test_store()?;
    let mut desk = CatalogDesk::load(&store).await?;

    assert_eq!(desk.next_code(), "P001");

    let form = ProductForm {
        product_name: Some("Ghee".to_string()),
        ..ProductForm::default()
    };
    assert!(matches!(
        desk.create_product(&store, &form).await,
        Err(AppError::NoUnits)
    ));

    Ok(())
}

#[tokio::test]
async fn test_update_keeps_unset_fields() -> Result<()> {
    let (store, _temp) = test_store()?;
    SampleStore::seed(&store).await?;
    let mut desk = CatalogDesk::load(&store).await?;

    let form = ProductForm {
        selling_price_retail: Some(5500),
        ..ProductForm::default()
    };
    let updated = desk.update_product(&store, 1, &form).await?;

    assert_eq!(updated.selling_price_retail, 5500);
    assert_eq!(updated.product_name, "Atta");
    assert_eq!(updated.product_code, "P001");
    assert_eq!(updated.quantity, 100.0);

    // The local catalog reflects the change too
    assert_eq!(desk.catalog().get(1).unwrap().selling_price_retail, 5500);

    Ok(())
}

#[tokio::test]
async fn test_update_unknown_product() -> Result<()> {
    let (store, _temp) = test_store()?;
    SampleStore::seed(&store).await?;
    let mut desk = CatalogDesk::load(&store).await?;

    assert!(matches!(
        desk.update_product(&store, 99, &ProductForm::default()).await,
        Err(AppError::ProductNotFound(99))
    ));

    Ok(())
}

#[tokio::test]
async fn test_delete_product() -> Result<()> {
    let (store, _temp) = test_store()?;
    SampleStore::seed(&store).await?;
    let mut desk = CatalogDesk::load(&store).await?;

    desk.delete_product(&store, 1).await?;
    assert!(desk.catalog().get(1).is_none());
    assert_eq!(desk.catalog().len(), 1);

    assert!(matches!(
        desk.delete_product(&store, 1).await,
        Err(AppError::ProductNotFound(1))
    ));

    Ok(())
}
