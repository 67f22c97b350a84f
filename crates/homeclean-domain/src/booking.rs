//! Booking wizard working state and the persisted booking snapshot.

use std::{collections::BTreeSet, fmt};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Linear sequence of wizard screens. `Confirmation` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    Service,
    DateTime,
    Address,
    Payment,
    Confirmation,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Service,
        WizardStep::DateTime,
        WizardStep::Address,
        WizardStep::Payment,
        WizardStep::Confirmation,
    ];

    pub fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Service => Some(WizardStep::DateTime),
            WizardStep::DateTime => Some(WizardStep::Address),
            WizardStep::Address => Some(WizardStep::Payment),
            WizardStep::Payment => Some(WizardStep::Confirmation),
            WizardStep::Confirmation => None,
        }
    }

    pub fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::Service => None,
            WizardStep::DateTime => Some(WizardStep::Service),
            WizardStep::Address => Some(WizardStep::DateTime),
            WizardStep::Payment => Some(WizardStep::Address),
            WizardStep::Confirmation => Some(WizardStep::Payment),
        }
    }

    /// Zero-based position in the flow.
    pub fn index(self) -> usize {
        match self {
            WizardStep::Service => 0,
            WizardStep::DateTime => 1,
            WizardStep::Address => 2,
            WizardStep::Payment => 3,
            WizardStep::Confirmation => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Service => "Choose a service",
            WizardStep::DateTime => "Pick a date and time",
            WizardStep::Address => "Select an address",
            WizardStep::Payment => "Choose a payment method",
            WizardStep::Confirmation => "Finding your maid",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, WizardStep::Confirmation)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WizardStep::Service => "service",
            WizardStep::DateTime => "datetime",
            WizardStep::Address => "address",
            WizardStep::Payment => "payment",
            WizardStep::Confirmation => "confirmation",
        };
        f.write_str(label)
    }
}

/// In-memory selections collected by the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingSelection {
    pub service_id: Option<String>,
    /// Always a superset of the category's included option ids.
    pub selected_options: BTreeSet<String>,
    pub selected_frequency: Option<String>,
    pub selected_date: Option<NaiveDate>,
    pub selected_time: Option<String>,
    pub selected_address_id: Option<String>,
    pub selected_payment_method_id: Option<String>,
    /// Derived; recomputed on every mutation.
    pub total_price: u32,
}

impl BookingSelection {
    pub fn with_included<'a>(included: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            selected_options: included.into_iter().map(str::to_string).collect(),
            ..Self::default()
        }
    }

    pub fn is_option_selected(&self, id: &str) -> bool {
        self.selected_options.contains(id)
    }
}

/// Finalized booking as stored in the shared `bookings` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub service_type: String,
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    pub date: NaiveDate,
    pub time: String,
    pub price: u32,
    pub address: String,
}
