use chrono::{DateTime, Utc};

use crate::backend::{CatalogApi, CustomerApi, SaleApi, SubmissionApi};
use crate::domain::{
    BillRecord, Catalog, CreatedBill, Customer, CustomerChoice, DraftEntry, Ledger, LineItem,
    Paise, PaymentMode, Product, ProductData, ProductId, Sale, SaleId, SaleType, Unit,
};

use super::AppError;

/// Already-fetched reference data the desks work against. Loaded once up
/// front so correctness does not depend on network timing.
#[derive(Debug, Clone, Default)]
pub struct StoreDirectory {
    pub catalog: Catalog,
    pub customers: Vec<Customer>,
    pub sales: Vec<Sale>,
}

impl StoreDirectory {
    pub fn new(catalog: Catalog, customers: Vec<Customer>, sales: Vec<Sale>) -> Self {
        Self {
            catalog,
            customers,
            sales,
        }
    }

    /// Fetch all reference data from the backend in one go.
    pub async fn load<A>(api: &A) -> Result<Self, AppError>
    where
        A: CatalogApi + CustomerApi + SaleApi,
    {
        Ok(Self {
            catalog: Catalog::new(api.list_products().await?),
            customers: api.list_customers().await?,
            sales: api.list_sales().await?,
        })
    }

    pub fn customer(&self, id: i64) -> Option<&Customer> {
        self.customers.iter().find(|c| c.customer_id == id)
    }

    pub fn sale(&self, id: SaleId) -> Option<&Sale> {
        self.sales.iter().find(|s| s.sale_id == id)
    }
}

/// The bill header being edited: everything on the return form except the
/// line items.
#[derive(Debug, Clone, Default)]
pub struct BillForm {
    pub sale_id: Option<SaleId>,
    pub customer: Option<CustomerChoice>,
    pub return_date: Option<DateTime<Utc>>,
    pub return_type: SaleType,
    pub payment_mode: PaymentMode,
}

/// A validated bill awaiting the user's confirmation. Display data only;
/// the record itself is assembled at confirm time from the live ledger.
#[derive(Debug, Clone)]
pub struct PendingBill {
    pub sale_id: SaleId,
    pub customer: CustomerChoice,
    pub return_date: DateTime<Utc>,
    pub return_type: SaleType,
    pub payment_mode: PaymentMode,
    pub item_count: usize,
    pub total: Paise,
}

#[derive(Debug, Clone)]
enum SubmitState {
    Editing,
    PendingConfirmation(PendingBill),
    InFlight,
}

/// The return-bill workflow: a ledger of line items, the draft entry and
/// bill form being edited, and the two-step confirm state machine.
///
/// States: Editing -> (request_submit valid) -> PendingConfirmation ->
/// (confirm_submit success) -> Editing reset, (confirm_submit failure or
/// cancel_submit) -> Editing unchanged. While a submission is outstanding
/// the desk is InFlight and rejects every other submit call; only one
/// bill record may be in flight at a time.
pub struct ReturnDesk {
    directory: StoreDirectory,
    ledger: Ledger,
    draft: DraftEntry,
    form: BillForm,
    state: SubmitState,
}

impl ReturnDesk {
    pub fn new(directory: StoreDirectory) -> Self {
        Self {
            directory,
            ledger: Ledger::new(),
            draft: DraftEntry::default(),
            form: BillForm::default(),
            state: SubmitState::Editing,
        }
    }

    pub fn directory(&self) -> &StoreDirectory {
        &self.directory
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn draft(&self) -> &DraftEntry {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut DraftEntry {
        &mut self.draft
    }

    pub fn form(&self) -> &BillForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BillForm {
        &mut self.form
    }

    pub fn pending(&self) -> Option<&PendingBill> {
        match &self.state {
            SubmitState::PendingConfirmation(pending) => Some(pending),
            _ => None,
        }
    }

    /// Commit the current draft entry to the ledger and reset the draft.
    /// On rejection the draft is kept for correction.
    pub fn add_item(&mut self) -> Result<(), AppError> {
        self.ledger.add_item(&self.draft, &self.directory.catalog)?;
        self.draft = DraftEntry::default();
        Ok(())
    }

    pub fn remove_item(&mut self, index: usize) -> Result<LineItem, AppError> {
        Ok(self.ledger.remove_item(index)?)
    }

    /// Validate the form and move to PendingConfirmation. Does not call
    /// any collaborator. The error names the first missing field.
    pub fn request_submit(&mut self) -> Result<PendingBill, AppError> {
        match self.state {
            SubmitState::Editing => {}
            SubmitState::PendingConfirmation(_) => return Err(AppError::AlreadyPending),
            SubmitState::InFlight => return Err(AppError::SubmissionInFlight),
        }

        let sale_id = self.form.sale_id.ok_or(AppError::MissingField("sale"))?;
        if self.directory.sale(sale_id).is_none() {
            return Err(AppError::SaleNotFound(sale_id));
        }

        let customer = self
            .form
            .customer
            .clone()
            .ok_or(AppError::MissingField("customer"))?;
        match &customer {
            CustomerChoice::Existing(id) => {
                if self.directory.customer(*id).is_none() {
                    return Err(AppError::CustomerNotFound(*id));
                }
            }
            CustomerChoice::New(data) => {
                if !data.is_complete() {
                    return Err(AppError::IncompleteNewCustomer);
                }
            }
        }

        if self.ledger.is_empty() {
            return Err(AppError::MissingField("items"));
        }

        let return_date = self
            .form
            .return_date
            .ok_or(AppError::MissingField("return date"))?;

        let pending = PendingBill {
            sale_id,
            customer,
            return_date,
            return_type: self.form.return_type,
            payment_mode: self.form.payment_mode,
            item_count: self.ledger.len(),
            total: self.ledger.total(),
        };
        self.state = SubmitState::PendingConfirmation(pending.clone());
        Ok(pending)
    }

    /// Hand the pending bill to the submission collaborator. A new
    /// customer is created through the customer collaborator first and
    /// embedded in the record. Success resets the ledger, draft and form;
    /// any collaborator failure returns to Editing with everything
    /// untouched.
    pub async fn confirm_submit<A>(&mut self, api: &A) -> Result<CreatedBill, AppError>
    where
        A: CustomerApi + SubmissionApi,
    {
        let pending = match std::mem::replace(&mut self.state, SubmitState::InFlight) {
            SubmitState::PendingConfirmation(pending) => pending,
            SubmitState::Editing => {
                self.state = SubmitState::Editing;
                return Err(AppError::NoPendingBill);
            }
            SubmitState::InFlight => return Err(AppError::SubmissionInFlight),
        };

        let customer = match &pending.customer {
            CustomerChoice::Existing(id) => match self.directory.customer(*id) {
                Some(customer) => customer.clone(),
                None => {
                    self.state = SubmitState::Editing;
                    return Err(AppError::CustomerNotFound(*id));
                }
            },
            CustomerChoice::New(data) => match api.create_customer(data).await {
                Ok(customer) => {
                    self.directory.customers.push(customer.clone());
                    customer
                }
                Err(err) => {
                    self.state = SubmitState::Editing;
                    return Err(AppError::Submission(err));
                }
            },
        };

        let bill = BillRecord {
            sale_id: pending.sale_id,
            customer,
            return_date: pending.return_date,
            return_type: pending.return_type,
            payment_mode: pending.payment_mode,
            return_items: self.ledger.snapshot(),
            total_return_amount: self.ledger.total(),
        };

        match api.create_return(&bill).await {
            Ok(created) => {
                self.ledger.clear();
                self.draft = DraftEntry::default();
                self.form = BillForm::default();
                self.state = SubmitState::Editing;
                Ok(created)
            }
            Err(err) => {
                self.state = SubmitState::Editing;
                Err(AppError::Submission(err))
            }
        }
    }

    /// Discard the pending bill and return to editing; the ledger keeps
    /// its items.
    pub fn cancel_submit(&mut self) -> Result<(), AppError> {
        match self.state {
            SubmitState::PendingConfirmation(_) => {
                self.state = SubmitState::Editing;
                Ok(())
            }
            SubmitState::Editing => Err(AppError::NoPendingBill),
            SubmitState::InFlight => Err(AppError::SubmissionInFlight),
        }
    }
}

/// The product form as filled in by the user; every field is optional
/// and falls back the way the manage-products screen does.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub product_name: Option<String>,
    pub product_code: Option<String>,
    pub unit_name: Option<String>,
    pub quantity: Option<f64>,
    pub buying_price: Option<Paise>,
    pub selling_price_retail: Option<Paise>,
    pub selling_price_wholesale: Option<Paise>,
}

/// Catalog maintenance against the catalog collaborator: product codes
/// are assigned automatically, units resolve by name with a first-unit
/// fallback, and absent numeric fields default to zero.
pub struct CatalogDesk {
    catalog: Catalog,
    units: Vec<Unit>,
}

impl CatalogDesk {
    pub fn new(catalog: Catalog, units: Vec<Unit>) -> Self {
        Self { catalog, units }
    }

    /// Fetch the catalog and unit list from the backend.
    pub async fn load<A: CatalogApi>(api: &A) -> Result<Self, AppError> {
        Ok(Self {
            catalog: Catalog::new(api.list_products().await?),
            units: api.list_units().await?,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Code the next created product will get unless one is given.
    pub fn next_code(&self) -> String {
        self.catalog.next_code()
    }

    fn resolve_unit(&self, unit_name: Option<&str>) -> Result<Unit, AppError> {
        unit_name
            .and_then(|name| self.units.iter().find(|u| u.unit_name == name))
            .or_else(|| self.units.first())
            .cloned()
            .ok_or(AppError::NoUnits)
    }

    fn resolve_create(&self, form: &ProductForm) -> Result<ProductData, AppError> {
        let unit = self.resolve_unit(form.unit_name.as_deref())?;
        Ok(ProductData {
            product_name: form
                .product_name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| "Unnamed Product".to_string()),
            product_code: form
                .product_code
                .clone()
                .filter(|code| !code.trim().is_empty())
                .unwrap_or_else(|| self.catalog.next_code()),
            unit,
            quantity: form.quantity.unwrap_or(0.0),
            buying_price: form.buying_price.unwrap_or(0),
            selling_price_retail: form.selling_price_retail.unwrap_or(0),
            selling_price_wholesale: form.selling_price_wholesale.unwrap_or(0),
        })
    }

    fn resolve_update(&self, form: &ProductForm, existing: &Product) -> Result<ProductData, AppError> {
        let unit = match form.unit_name.as_deref() {
            Some(name) => self.resolve_unit(Some(name))?,
            None => existing.unit.clone(),
        };
        Ok(ProductData {
            product_name: form
                .product_name
                .clone()
                .unwrap_or_else(|| existing.product_name.clone()),
            product_code: form
                .product_code
                .clone()
                .unwrap_or_else(|| existing.product_code.clone()),
            unit,
            quantity: form.quantity.unwrap_or(existing.quantity),
            buying_price: form.buying_price.unwrap_or(existing.buying_price),
            selling_price_retail: form
                .selling_price_retail
                .unwrap_or(existing.selling_price_retail),
            selling_price_wholesale: form
                .selling_price_wholesale
                .unwrap_or(existing.selling_price_wholesale),
        })
    }

    pub async fn create_product<A: CatalogApi>(
        &mut self,
        api: &A,
        form: &ProductForm,
    ) -> Result<Product, AppError> {
        let data = self.resolve_create(form)?;
        let product = api.create_product(&data).await?;
        self.catalog.push(product.clone());
        Ok(product)
    }

    /// Update an existing product. Fields left out of the form keep their
    /// current values, the way an edit form pre-fills them.
    pub async fn update_product<A: CatalogApi>(
        &mut self,
        api: &A,
        id: ProductId,
        form: &ProductForm,
    ) -> Result<Product, AppError> {
        let existing = self
            .catalog
            .get(id)
            .cloned()
            .ok_or(AppError::ProductNotFound(id))?;
        let data = self.resolve_update(form, &existing)?;
        let product = api.update_product(id, &data).await?;
        self.catalog.replace(product.clone());
        Ok(product)
    }

    pub async fn delete_product<A: CatalogApi>(
        &mut self,
        api: &A,
        id: ProductId,
    ) -> Result<(), AppError> {
        if self.catalog.get(id).is_none() {
            return Err(AppError::ProductNotFound(id));
        }
        api.delete_product(id).await?;
        self.catalog.remove(id);
        Ok(())
    }
}
