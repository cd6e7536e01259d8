use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CustomerId, Paise};

pub type SaleId = i64;

/// Retail vs wholesale pricing. Applies to both sales and return bills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleType {
    Retail,
    Wholesale,
}

impl SaleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleType::Retail => "Retail",
            SaleType::Wholesale => "Wholesale",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "retail" => Some(SaleType::Retail),
            "wholesale" => Some(SaleType::Wholesale),
            _ => None,
        }
    }
}

impl Default for SaleType {
    fn default() -> Self {
        SaleType::Retail
    }
}

impl std::fmt::Display for SaleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMode {
    Cash,
    Online,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Online => "Online",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cash" => Some(PaymentMode::Cash),
            "online" => Some(PaymentMode::Online),
            _ => None,
        }
    }
}

impl Default for PaymentMode {
    fn default() -> Self {
        PaymentMode::Cash
    }
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A completed sale, eligible for return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub sale_id: SaleId,
    pub customer_id: CustomerId,
    pub sale_date: DateTime<Utc>,
    pub sale_type: SaleType,
    pub payment_mode: PaymentMode,
    pub gross_total: Paise,
}

/// Payload for recording a sale; the backend issues the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleData {
    pub customer_id: CustomerId,
    pub sale_date: DateTime<Utc>,
    pub sale_type: SaleType,
    pub payment_mode: PaymentMode,
    pub gross_total: Paise,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_type_roundtrip() {
        for st in [SaleType::Retail, SaleType::Wholesale] {
            assert_eq!(SaleType::from_str(st.as_str()), Some(st));
        }
        assert_eq!(SaleType::from_str("WHOLESALE"), Some(SaleType::Wholesale));
        assert_eq!(SaleType::from_str("credit"), None);
    }

    #[test]
    fn test_payment_mode_roundtrip() {
        for pm in [PaymentMode::Cash, PaymentMode::Online] {
            assert_eq!(PaymentMode::from_str(pm.as_str()), Some(pm));
        }
        assert_eq!(PaymentMode::from_str("upi"), None);
    }
}
