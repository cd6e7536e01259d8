use thiserror::Error;

use crate::domain::{CustomerId, LedgerError, ProductId, SaleId};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("New customer needs a name, mobile number and address")]
    IncompleteNewCustomer,

    #[error("Invalid return item: {0}")]
    Item(#[from] LedgerError),

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    #[error("Sale not found: {0}")]
    SaleNotFound(SaleId),

    #[error("No units available, add a unit first")]
    NoUnits,

    #[error("A bill is already awaiting confirmation")]
    AlreadyPending,

    #[error("No bill is awaiting confirmation")]
    NoPendingBill,

    #[error("A bill submission is already in flight")]
    SubmissionInFlight,

    #[error("Failed to create return bill: {0}")]
    Submission(anyhow::Error),

    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),
}
