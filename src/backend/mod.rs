// Backend layer - the external collaborators the store logic talks to.
// The traits are the seam; `LocalStore` is the bundled JSON-file
// implementation for running without a remote backend.

pub mod local;

pub use local::LocalStore;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{
    BillRecord, CreatedBill, Customer, NewCustomer, Product, ProductData, ProductId, Sale,
    SaleData, Unit,
};

/// Catalog provider: the set of available products and units, plus
/// product maintenance operations.
#[async_trait]
pub trait CatalogApi {
    async fn list_products(&self) -> Result<Vec<Product>>;
    async fn list_units(&self) -> Result<Vec<Unit>>;
    async fn create_product(&self, data: &ProductData) -> Result<Product>;
    async fn update_product(&self, id: ProductId, data: &ProductData) -> Result<Product>;
    async fn delete_product(&self, id: ProductId) -> Result<()>;
}

/// Customer provider: existing customers and the create-new-customer
/// operation used during bill submission.
#[async_trait]
pub trait CustomerApi {
    async fn list_customers(&self) -> Result<Vec<Customer>>;
    async fn create_customer(&self, data: &NewCustomer) -> Result<Customer>;
}

/// Sale provider: sales eligible for return.
#[async_trait]
pub trait SaleApi {
    async fn list_sales(&self) -> Result<Vec<Sale>>;
    async fn create_sale(&self, data: &SaleData) -> Result<Sale>;
}

/// Submission collaborator: accepts a finalized bill record and returns
/// the created record with its server-issued id.
#[async_trait]
pub trait SubmissionApi {
    async fn create_return(&self, bill: &BillRecord) -> Result<CreatedBill>;
    async fn list_returns(&self) -> Result<Vec<CreatedBill>>;
}
