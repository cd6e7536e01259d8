use serde::{Deserialize, Serialize};

pub type CustomerId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub mobile_number: String,
    pub address: String,
}

/// Data for a customer that does not exist yet. All three fields are
/// required before submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub customer_name: String,
    pub mobile_number: String,
    pub address: String,
}

impl NewCustomer {
    pub fn new(
        customer_name: impl Into<String>,
        mobile_number: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            mobile_number: mobile_number.into(),
            address: address.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.customer_name.trim().is_empty()
            && !self.mobile_number.trim().is_empty()
            && !self.address.trim().is_empty()
    }
}

/// The customer a bill is for: either an existing record or data for one
/// to be created at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CustomerChoice {
    Existing(CustomerId),
    New(NewCustomer),
}
