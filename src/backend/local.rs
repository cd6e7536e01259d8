use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{
    BillRecord, CreatedBill, Customer, NewCustomer, Product, ProductData, ProductId, Sale,
    SaleData, Unit, UnitId,
};

use super::{CatalogApi, CustomerApi, SaleApi, SubmissionApi};

/// On-disk layout of the local store file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreFile {
    pub version: String,
    pub units: Vec<Unit>,
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub sales: Vec<Sale>,
    pub returns: Vec<CreatedBill>,
}

/// JSON-file implementation of the backend collaborators, for running the
/// store without a remote API. Every operation loads the file, mutates,
/// and saves; identifiers are issued as max + 1.
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Create a new store file at the given path.
    pub fn init(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if path.exists() {
            bail!("Store file already exists: {}", path.display());
        }
        let store = Self { path };
        store.save(&mut StoreFile::default())?;
        Ok(store)
    }

    /// Open an existing store file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            bail!("No store file at {} (run `init` first)", path.display());
        }
        Ok(Self { path })
    }

    fn load(&self) -> Result<StoreFile> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read store file {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse store file {}", self.path.display()))
    }

    fn save(&self, file: &mut StoreFile) -> Result<()> {
        file.version = env!("CARGO_PKG_VERSION").to_string();
        let raw = serde_json::to_string_pretty(file)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write store file {}", self.path.display()))
    }

    /// Register a measurement unit. Units have no collaborator trait of
    /// their own; they are backend reference data.
    pub fn add_unit(&self, unit_name: &str) -> Result<Unit> {
        let mut file = self.load()?;
        if file.units.iter().any(|u| u.unit_name == unit_name) {
            bail!("Unit already exists: {}", unit_name);
        }
        let unit = Unit {
            unit_id: next_id(&file.units, |u| u.unit_id),
            unit_name: unit_name.to_string(),
        };
        file.units.push(unit.clone());
        self.save(&mut file)?;
        Ok(unit)
    }

    fn find_unit(file: &StoreFile, unit_id: UnitId) -> Result<Unit> {
        file.units
            .iter()
            .find(|u| u.unit_id == unit_id)
            .cloned()
            .with_context(|| format!("Unknown unit: {}", unit_id))
    }
}

fn next_id<T>(items: &[T], id: impl Fn(&T) -> i64) -> i64 {
    items.iter().map(id).max().unwrap_or(0) + 1
}

#[async_trait]
impl CatalogApi for LocalStore {
    async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.load()?.products)
    }

    async fn list_units(&self) -> Result<Vec<Unit>> {
        Ok(self.load()?.units)
    }

    async fn create_product(&self, data: &ProductData) -> Result<Product> {
        let mut file = self.load()?;
        let unit = Self::find_unit(&file, data.unit.unit_id)?;
        let product = Product {
            product_id: next_id(&file.products, |p| p.product_id),
            product_code: data.product_code.clone(),
            product_name: data.product_name.clone(),
            unit,
            quantity: data.quantity,
            buying_price: data.buying_price,
            selling_price_retail: data.selling_price_retail,
            selling_price_wholesale: data.selling_price_wholesale,
        };
        file.products.push(product.clone());
        self.save(&mut file)?;
        Ok(product)
    }

    async fn update_product(&self, id: ProductId, data: &ProductData) -> Result<Product> {
        let mut file = self.load()?;
        let unit = Self::find_unit(&file, data.unit.unit_id)?;
        let slot = file
            .products
            .iter_mut()
            .find(|p| p.product_id == id)
            .with_context(|| format!("Product not found: {}", id))?;
        slot.product_code = data.product_code.clone();
        slot.product_name = data.product_name.clone();
        slot.unit = unit;
        slot.quantity = data.quantity;
        slot.buying_price = data.buying_price;
        slot.selling_price_retail = data.selling_price_retail;
        slot.selling_price_wholesale = data.selling_price_wholesale;
        let updated = slot.clone();
        self.save(&mut file)?;
        Ok(updated)
    }

    async fn delete_product(&self, id: ProductId) -> Result<()> {
        let mut file = self.load()?;
        let before = file.products.len();
        file.products.retain(|p| p.product_id != id);
        if file.products.len() == before {
            bail!("Product not found: {}", id);
        }
        self.save(&mut file)
    }
}

#[async_trait]
impl CustomerApi for LocalStore {
    async fn list_customers(&self) -> Result<Vec<Customer>> {
        Ok(self.load()?.customers)
    }

    async fn create_customer(&self, data: &NewCustomer) -> Result<Customer> {
        if !data.is_complete() {
            bail!("New customer needs a name, mobile number and address");
        }
        let mut file = self.load()?;
        let customer = Customer {
            customer_id: next_id(&file.customers, |c| c.customer_id),
            customer_name: data.customer_name.clone(),
            mobile_number: data.mobile_number.clone(),
            address: data.address.clone(),
        };
        file.customers.push(customer.clone());
        self.save(&mut file)?;
        Ok(customer)
    }
}

#[async_trait]
impl SaleApi for LocalStore {
    async fn list_sales(&self) -> Result<Vec<Sale>> {
        Ok(self.load()?.sales)
    }

    async fn create_sale(&self, data: &SaleData) -> Result<Sale> {
        let mut file = self.load()?;
        if !file.customers.iter().any(|c| c.customer_id == data.customer_id) {
            bail!("Customer not found: {}", data.customer_id);
        }
        let sale = Sale {
            sale_id: next_id(&file.sales, |s| s.sale_id),
            customer_id: data.customer_id,
            sale_date: data.sale_date,
            sale_type: data.sale_type,
            payment_mode: data.payment_mode,
            gross_total: data.gross_total,
        };
        file.sales.push(sale.clone());
        self.save(&mut file)?;
        Ok(sale)
    }
}

#[async_trait]
impl SubmissionApi for LocalStore {
    async fn create_return(&self, bill: &BillRecord) -> Result<CreatedBill> {
        let mut file = self.load()?;
        if !file.sales.iter().any(|s| s.sale_id == bill.sale_id) {
            bail!("Sale not found: {}", bill.sale_id);
        }
        let created = CreatedBill {
            return_id: next_id(&file.returns, |r| r.return_id),
            bill: bill.clone(),
        };
        file.returns.push(created.clone());
        self.save(&mut file)?;
        Ok(created)
    }

    async fn list_returns(&self) -> Result<Vec<CreatedBill>> {
        Ok(self.load()?.returns)
    }
}
