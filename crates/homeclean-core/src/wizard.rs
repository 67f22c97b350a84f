//! Linear booking wizard: service -> datetime -> address -> payment -> confirmation.
//!
//! Moving forward validates the current step; moving back never does. Every
//! selection survives back/forward navigation, and every mutation recomputes
//! the total price before returning.

use chrono::NaiveDate;
use homeclean_domain::{
    Address, BookingRecord, BookingSelection, CategoryCatalog, PaymentMethod, Route, WizardStep,
};
use thiserror::Error;
use tracing::debug;

use crate::{CatalogService, CoreError, PriceBreakdown, PriceCalculator};

/// Missing selection that blocks `advance()`. Always recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a service to continue.")]
    SelectService,
    #[error("Please select a date to continue.")]
    SelectDate,
    #[error("Please select a time slot to continue.")]
    SelectTime,
    #[error("Please select an address to continue.")]
    SelectAddress,
    #[error("Please select a payment method to continue.")]
    SelectPayment,
}

impl ValidationError {
    /// Stable identifier of the missing field.
    pub fn code(self) -> &'static str {
        match self {
            ValidationError::SelectService => "select-service",
            ValidationError::SelectDate => "select-date",
            ValidationError::SelectTime => "select-time",
            ValidationError::SelectAddress => "select-address",
            ValidationError::SelectPayment => "select-payment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Moved(WizardStep),
    /// Payment accepted; the wizard is now in `Confirmation`.
    Confirmed(BookingRecord),
    /// Already in `Confirmation`; nothing left to do.
    Terminal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetreatOutcome {
    Moved(WizardStep),
    /// Left the wizard from its first step.
    Exited(Route),
    /// The confirmation wait cannot be backed out of.
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// Included options stay selected.
    Locked,
}

pub struct BookingWizard {
    catalog: CategoryCatalog,
    addresses: Vec<Address>,
    payment_methods: Vec<PaymentMethod>,
    step: WizardStep,
    selection: BookingSelection,
}

impl BookingWizard {
    pub fn new(
        catalog: CategoryCatalog,
        addresses: Vec<Address>,
        payment_methods: Vec<PaymentMethod>,
    ) -> Self {
        let selection = BookingSelection::with_included(catalog.included_ids());
        let mut wizard = Self {
            catalog,
            addresses,
            payment_methods,
            step: WizardStep::Service,
            selection,
        };
        wizard.recompute();
        wizard
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn selection(&self) -> &BookingSelection {
        &self.selection
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn payment_methods(&self) -> &[PaymentMethod] {
        &self.payment_methods
    }

    pub fn total_price(&self) -> u32 {
        self.selection.total_price
    }

    pub fn price_breakdown(&self) -> PriceBreakdown {
        PriceCalculator::breakdown(&self.catalog, &self.selection)
    }

    pub fn select_service(&mut self, id: &str) -> Result<(), CoreError> {
        let tier = self
            .catalog
            .tier(id)
            .ok_or_else(|| CoreError::ServiceNotFound(id.to_string()))?;
        self.selection.service_id = Some(tier.id.clone());
        self.recompute();
        Ok(())
    }

    pub fn toggle_option(&mut self, id: &str) -> Result<ToggleOutcome, CoreError> {
        let option = self
            .catalog
            .option(id)
            .ok_or_else(|| CoreError::OptionNotFound(id.to_string()))?;
        if option.included {
            return Ok(ToggleOutcome::Locked);
        }
        let outcome = if self.selection.selected_options.remove(&option.id) {
            ToggleOutcome::Removed
        } else {
            self.selection.selected_options.insert(option.id.clone());
            ToggleOutcome::Added
        };
        self.recompute();
        Ok(outcome)
    }

    /// Selects a recurrence plan, or clears it with `None`.
    pub fn select_frequency(&mut self, id: Option<&str>) -> Result<(), CoreError> {
        self.selection.selected_frequency = match id {
            Some(id) => {
                let frequency = self
                    .catalog
                    .frequency(id)
                    .ok_or_else(|| CoreError::FrequencyNotFound(id.to_string()))?;
                Some(frequency.id.clone())
            }
            None => None,
        };
        self.recompute();
        Ok(())
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selection.selected_date = Some(date);
    }

    pub fn select_time(&mut self, slot: &str) -> Result<(), CoreError> {
        let canonical = CatalogService::time_slots()
            .iter()
            .find(|candidate| candidate.eq_ignore_ascii_case(slot.trim()))
            .ok_or_else(|| CoreError::TimeSlotNotFound(slot.to_string()))?;
        self.selection.selected_time = Some((*canonical).to_string());
        Ok(())
    }

    pub fn select_address(&mut self, id: &str) -> Result<(), CoreError> {
        let address = self
            .addresses
            .iter()
            .find(|address| address.id == id)
            .ok_or_else(|| CoreError::AddressNotFound(id.to_string()))?;
        self.selection.selected_address_id = Some(address.id.clone());
        Ok(())
    }

    pub fn select_payment_method(&mut self, id: &str) -> Result<(), CoreError> {
        let method = self
            .payment_methods
            .iter()
            .find(|method| method.id.eq_ignore_ascii_case(id.trim()))
            .ok_or_else(|| CoreError::PaymentMethodNotFound(id.to_string()))?;
        self.selection.selected_payment_method_id = Some(method.id.clone());
        Ok(())
    }

    /// Validates the current step and moves forward.
    ///
    /// On `Payment` a successful advance enters `Confirmation` and returns the
    /// booking snapshot to persist.
    pub fn advance(&mut self) -> Result<StepOutcome, ValidationError> {
        let current = self.step;
        match current {
            WizardStep::Service => self.require_service()?,
            WizardStep::DateTime => self.require_schedule()?,
            WizardStep::Address => self.require_address()?,
            WizardStep::Payment => {
                self.require_payment()?;
                let record = self.build_record()?;
                self.step = WizardStep::Confirmation;
                debug!(from = %current, "booking confirmed");
                return Ok(StepOutcome::Confirmed(record));
            }
            WizardStep::Confirmation => return Ok(StepOutcome::Terminal),
        }
        let Some(next) = current.next() else {
            return Ok(StepOutcome::Terminal);
        };
        self.step = next;
        debug!(from = %current, to = %next, "wizard advanced");
        Ok(StepOutcome::Moved(next))
    }

    /// Moves back one step without validation; leaves the wizard from `Service`.
    pub fn retreat(&mut self) -> RetreatOutcome {
        match self.step {
            WizardStep::Confirmation => RetreatOutcome::Locked,
            WizardStep::Service => RetreatOutcome::Exited(Route::Back),
            current => match current.previous() {
                Some(previous) => {
                    self.step = previous;
                    debug!(from = %current, to = %previous, "wizard retreated");
                    RetreatOutcome::Moved(previous)
                }
                None => RetreatOutcome::Exited(Route::Back),
            },
        }
    }

    /// Snapshot of the finished selection, re-checking every step in order.
    pub fn build_record(&self) -> Result<BookingRecord, ValidationError> {
        self.require_service()?;
        self.require_schedule()?;
        self.require_address()?;
        self.require_payment()?;

        let tier = self
            .selection
            .service_id
            .as_deref()
            .and_then(|id| self.catalog.tier(id))
            .ok_or(ValidationError::SelectService)?;
        let date = self
            .selection
            .selected_date
            .ok_or(ValidationError::SelectDate)?;
        let time = self
            .selection
            .selected_time
            .clone()
            .ok_or(ValidationError::SelectTime)?;
        let address = self
            .selection
            .selected_address_id
            .as_deref()
            .and_then(|id| self.addresses.iter().find(|address| address.id == id))
            .ok_or(ValidationError::SelectAddress)?;
        let options = self
            .catalog
            .options
            .iter()
            .filter(|option| self.selection.is_option_selected(&option.id))
            .map(|option| option.id.clone())
            .collect();

        Ok(BookingRecord {
            service_type: format!("{} ({})", self.catalog.name, tier.label),
            options,
            frequency: self.selection.selected_frequency.clone(),
            date,
            time,
            price: self.selection.total_price,
            address: address.display_line(),
        })
    }

    fn require_service(&self) -> Result<(), ValidationError> {
        match self.selection.service_id {
            Some(_) => Ok(()),
            None => Err(ValidationError::SelectService),
        }
    }

    fn require_schedule(&self) -> Result<(), ValidationError> {
        if self.selection.selected_date.is_none() {
            return Err(ValidationError::SelectDate);
        }
        if self.selection.selected_time.is_none() {
            return Err(ValidationError::SelectTime);
        }
        Ok(())
    }

    fn require_address(&self) -> Result<(), ValidationError> {
        match self.selection.selected_address_id {
            Some(_) => Ok(()),
            None => Err(ValidationError::SelectAddress),
        }
    }

    fn require_payment(&self) -> Result<(), ValidationError> {
        match self.selection.selected_payment_method_id {
            Some(_) => Ok(()),
            None => Err(ValidationError::SelectPayment),
        }
    }

    fn recompute(&mut self) {
        self.selection.total_price = PriceCalculator::for_selection(&self.catalog, &self.selection);
    }
}
