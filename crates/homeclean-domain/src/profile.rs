//! Customer profile data referenced by the booking flow.

use serde::{Deserialize, Serialize};

use crate::common::*;

/// Saved service address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    pub id: String,
    pub label: String,
    pub line: String,
}

impl Address {
    pub fn new(id: impl Into<String>, label: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            line: line.into(),
        }
    }

    /// Free-text form stored on booking records.
    pub fn display_line(&self) -> String {
        format!("{} - {}", self.label, self.line)
    }
}

impl Identifiable for Address {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for Address {
    fn display_label(&self) -> String {
        self.display_line()
    }
}

/// Payment instrument offered at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentMethod {
    pub id: String,
    pub label: String,
}

impl PaymentMethod {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

impl Identifiable for PaymentMethod {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for PaymentMethod {
    fn name(&self) -> &str {
        &self.label
    }
}

/// Payment methods available to every customer.
pub fn default_payment_methods() -> Vec<PaymentMethod> {
    vec![
        PaymentMethod::new("upi", "UPI"),
        PaymentMethod::new("card", "Credit / Debit card"),
        PaymentMethod::new("cash", "Cash after service"),
        PaymentMethod::new("wallet", "Wallet"),
    ]
}

/// Addresses seeded into a fresh profile.
pub fn default_addresses() -> Vec<Address> {
    vec![
        Address::new("1", "Home", "12 MG Road, Indiranagar, Bengaluru"),
        Address::new("2", "Office", "4th Floor, Prestige Tower, Residency Road, Bengaluru"),
    ]
}
