//! Drives a [`BookingWizard`] from terminal input.
//!
//! The runner renders each step, applies one [`WizardAction`] at a time, and
//! hands the finished booking to checkout. Input comes from a
//! [`WizardInteraction`]: stdin lines in script mode, dialoguer menus otherwise.

use std::fmt;

use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Select};
use homeclean_core::{
    complete_booking, BookingConfirmation, BookingRepository, BookingWizard,
    ConfirmationProgress, ConfirmationSimulator, CoreError, RetreatOutcome, Sleeper,
    StepOutcome, ToggleOutcome,
};
use homeclean_domain::{Displayable, Route, WizardStep};
use tracing::{debug, info};

use crate::cli::core::{CommandError, ScriptInput};
use crate::cli::io as cli_io;
use crate::cli::output::{self, rupees};

/// One user answer inside the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    Tier(String),
    Toggle(String),
    Frequency(Option<String>),
    Date(NaiveDate),
    Time(String),
    Address(String),
    Payment(String),
    Next,
    Back,
    Cancel,
}

impl WizardAction {
    /// Step the action belongs to; navigation works everywhere.
    pub fn step(&self) -> Option<WizardStep> {
        match self {
            WizardAction::Tier(_) | WizardAction::Toggle(_) | WizardAction::Frequency(_) => {
                Some(WizardStep::Service)
            }
            WizardAction::Date(_) | WizardAction::Time(_) => Some(WizardStep::DateTime),
            WizardAction::Address(_) => Some(WizardStep::Address),
            WizardAction::Payment(_) => Some(WizardStep::Payment),
            WizardAction::Next | WizardAction::Back | WizardAction::Cancel => None,
        }
    }

    fn keyword(&self) -> &'static str {
        match self {
            WizardAction::Tier(_) => "tier",
            WizardAction::Toggle(_) => "toggle",
            WizardAction::Frequency(_) => "frequency",
            WizardAction::Date(_) => "date",
            WizardAction::Time(_) => "time",
            WizardAction::Address(_) => "address",
            WizardAction::Payment(_) => "payment",
            WizardAction::Next => "next",
            WizardAction::Back => "back",
            WizardAction::Cancel => "cancel",
        }
    }
}

/// Usage line shown when a wizard answer cannot be parsed.
pub const WIZARD_USAGE: &str = "tier <id> | toggle <id> | frequency <id|none> | date YYYY-MM-DD | time <slot> | address <id> | payment <id> | next | back | cancel";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionParseError(String);

impl fmt::Display for ActionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parses a script line such as `time 09:00 AM` or `frequency none`.
pub fn parse_wizard_action(line: &str) -> Result<WizardAction, ActionParseError> {
    let tokens =
        shell_words::split(line).map_err(|err| ActionParseError(err.to_string()))?;
    let Some((keyword, rest)) = tokens.split_first() else {
        return Err(ActionParseError("empty answer".into()));
    };
    let argument = rest.join(" ");
    let require = |name: &str| -> Result<String, ActionParseError> {
        if argument.is_empty() {
            Err(ActionParseError(format!("`{name}` needs a value")))
        } else {
            Ok(argument.clone())
        }
    };

    match keyword.to_ascii_lowercase().as_str() {
        "tier" | "service" => Ok(WizardAction::Tier(require("tier")?)),
        "toggle" | "option" => Ok(WizardAction::Toggle(require("toggle")?)),
        "frequency" => {
            let value = require("frequency")?;
            if value.eq_ignore_ascii_case("none") {
                Ok(WizardAction::Frequency(None))
            } else {
                Ok(WizardAction::Frequency(Some(value)))
            }
        }
        "date" => {
            let value = require("date")?;
            NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                .map(WizardAction::Date)
                .map_err(|_| ActionParseError(format!("`{value}` is not a YYYY-MM-DD date")))
        }
        "time" => Ok(WizardAction::Time(require("time")?)),
        "address" => Ok(WizardAction::Address(require("address")?)),
        "payment" | "pay" => Ok(WizardAction::Payment(require("payment")?)),
        "next" | "continue" => Ok(WizardAction::Next),
        "back" => Ok(WizardAction::Back),
        "cancel" => Ok(WizardAction::Cancel),
        other => Err(ActionParseError(format!("unknown answer `{other}`"))),
    }
}

/// Source of wizard answers.
pub trait WizardInteraction {
    /// Next answer for the current step, or `None` when input has run out.
    fn next_action(&mut self, wizard: &BookingWizard) -> Result<Option<WizardAction>, CommandError>;
}

/// Reads answers from the queued script lines.
pub struct ScriptedInteraction<'a> {
    input: &'a mut ScriptInput,
}

impl<'a> ScriptedInteraction<'a> {
    pub fn new(input: &'a mut ScriptInput) -> Self {
        Self { input }
    }
}

impl WizardInteraction for ScriptedInteraction<'_> {
    fn next_action(&mut self, _wizard: &BookingWizard) -> Result<Option<WizardAction>, CommandError> {
        while let Some(line) = self.input.next_line() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match parse_wizard_action(trimmed) {
                Ok(action) => return Ok(Some(action)),
                Err(err) => {
                    cli_io::print_warning(err);
                    cli_io::print_hint(format!("Answers: {WIZARD_USAGE}"));
                }
            }
        }
        Ok(None)
    }
}

/// Arrow-key menus for each step.
pub struct MenuInteraction<'a> {
    theme: &'a ColorfulTheme,
    dates: Vec<NaiveDate>,
}

impl<'a> MenuInteraction<'a> {
    pub fn new(theme: &'a ColorfulTheme, dates: Vec<NaiveDate>) -> Self {
        Self { theme, dates }
    }

    fn entries(&self, wizard: &BookingWizard) -> Vec<(String, WizardAction)> {
        let selection = wizard.selection();
        let mut entries = Vec::new();
        match wizard.step() {
            WizardStep::Service => {
                let catalog = wizard.catalog();
                for tier in &catalog.tiers {
                    let chosen = selection.service_id.as_deref() == Some(tier.id.as_str());
                    entries.push((
                        format!("{} {}", radio(chosen), tier.display_label()),
                        WizardAction::Tier(tier.id.clone()),
                    ));
                }
                for option in &catalog.options {
                    entries.push((
                        format!(
                            "{} {}",
                            checkbox(selection.is_option_selected(&option.id)),
                            option.display_label()
                        ),
                        WizardAction::Toggle(option.id.clone()),
                    ));
                }
                for frequency in &catalog.frequencies {
                    let chosen =
                        selection.selected_frequency.as_deref() == Some(frequency.id.as_str());
                    entries.push((
                        format!("{} {}", radio(chosen), frequency.display_label()),
                        WizardAction::Frequency(Some(frequency.id.clone())),
                    ));
                }
                if selection.selected_frequency.is_some() {
                    entries.push(("Clear frequency".into(), WizardAction::Frequency(None)));
                }
            }
            WizardStep::DateTime => {
                for date in &self.dates {
                    let chosen = selection.selected_date == Some(*date);
                    entries.push((
                        format!("{} {}", radio(chosen), date.format("%a %d %b %Y")),
                        WizardAction::Date(*date),
                    ));
                }
                for slot in homeclean_core::CatalogService::time_slots() {
                    let chosen = selection.selected_time.as_deref() == Some(*slot);
                    entries.push((
                        format!("{} {}", radio(chosen), slot),
                        WizardAction::Time((*slot).to_string()),
                    ));
                }
            }
            WizardStep::Address => {
                for address in wizard.addresses() {
                    let chosen =
                        selection.selected_address_id.as_deref() == Some(address.id.as_str());
                    entries.push((
                        format!("{} {}", radio(chosen), address.display_line()),
                        WizardAction::Address(address.id.clone()),
                    ));
                }
            }
            WizardStep::Payment => {
                for method in wizard.payment_methods() {
                    let chosen = selection.selected_payment_method_id.as_deref()
                        == Some(method.id.as_str());
                    entries.push((
                        format!("{} {}", radio(chosen), method.label),
                        WizardAction::Payment(method.id.clone()),
                    ));
                }
            }
            WizardStep::Confirmation => return entries,
        }

        let forward = if wizard.step() == WizardStep::Payment {
            format!("Confirm booking ({})", rupees(wizard.total_price()))
        } else {
            format!("Continue ({})", rupees(wizard.total_price()))
        };
        entries.push((forward, WizardAction::Next));
        entries.push(("Back".into(), WizardAction::Back));
        entries.push(("Cancel booking".into(), WizardAction::Cancel));
        entries
    }
}

impl WizardInteraction for MenuInteraction<'_> {
    fn next_action(&mut self, wizard: &BookingWizard) -> Result<Option<WizardAction>, CommandError> {
        let entries = self.entries(wizard);
        if entries.is_empty() {
            return Ok(None);
        }
        let labels: Vec<&str> = entries.iter().map(|(label, _)| label.as_str()).collect();
        let default = entries
            .iter()
            .position(|(_, action)| *action == WizardAction::Next)
            .unwrap_or(0);
        let choice = Select::with_theme(self.theme)
            .with_prompt(wizard.step().title())
            .items(&labels)
            .default(default)
            .interact_opt()?;
        // ESC acts like `back`.
        Ok(Some(match choice {
            Some(index) => entries[index].1.clone(),
            None => WizardAction::Back,
        }))
    }
}

fn radio(chosen: bool) -> &'static str {
    if chosen {
        "(•)"
    } else {
        "( )"
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

#[derive(Debug)]
pub enum BookingFlowOutcome {
    Completed(BookingConfirmation),
    /// Left the wizard without booking; nothing was persisted.
    Cancelled(Route),
}

/// Runs one booking from the service step through the confirmation wait.
pub struct BookingFlow<'a> {
    repository: &'a BookingRepository,
    simulator: ConfirmationSimulator,
    bookable_dates: Option<Vec<NaiveDate>>,
}

impl<'a> BookingFlow<'a> {
    /// Accepts any date until [`BookingFlow::within`] narrows it.
    pub fn new(repository: &'a BookingRepository, simulator: ConfirmationSimulator) -> Self {
        Self {
            repository,
            simulator,
            bookable_dates: None,
        }
    }

    /// Restricts date answers to `dates`, usually the clock's booking window.
    pub fn within(mut self, dates: Vec<NaiveDate>) -> Self {
        self.bookable_dates = Some(dates);
        self
    }

    fn is_bookable(&self, date: NaiveDate) -> bool {
        self.bookable_dates
            .as_ref()
            .map_or(true, |dates| dates.contains(&date))
    }

    fn reject_date(&self, date: NaiveDate) {
        let window = self.bookable_dates.as_deref().unwrap_or_default();
        match (window.first(), window.last()) {
            (Some(first), Some(last)) => cli_io::print_warning(format!(
                "{date} cannot be booked; choose a date from {first} to {last}."
            )),
            _ => cli_io::print_warning(format!("{date} cannot be booked.")),
        }
    }

    pub fn run(
        &self,
        wizard: &mut BookingWizard,
        interaction: &mut dyn WizardInteraction,
        sleeper: &mut dyn Sleeper,
        observer: &mut dyn FnMut(ConfirmationProgress),
    ) -> Result<BookingFlowOutcome, CommandError> {
        info!(category = %wizard.catalog().key, "booking started");
        let mut rendered: Option<WizardStep> = None;
        loop {
            if rendered != Some(wizard.step()) {
                render_step(wizard);
                rendered = Some(wizard.step());
            }

            let Some(action) = interaction.next_action(wizard)? else {
                cli_io::print_warning("Input ended before the booking was confirmed.");
                return Ok(self.cancelled(Route::Back));
            };
            debug!(step = %wizard.step(), action = action.keyword(), "wizard answer");

            if let Some(step) = action.step() {
                if step != wizard.step() {
                    cli_io::print_warning(format!(
                        "`{}` belongs to the \"{}\" step; you are on \"{}\".",
                        action.keyword(),
                        step.title(),
                        wizard.step().title()
                    ));
                    continue;
                }
            }

            match action {
                WizardAction::Next => match wizard.advance() {
                    Ok(StepOutcome::Moved(step)) => debug!(step = %step, "moved forward"),
                    Ok(StepOutcome::Confirmed(record)) => {
                        render_step(wizard);
                        let confirmation = complete_booking(
                            self.repository,
                            record,
                            &self.simulator,
                            sleeper,
                            observer,
                        );
                        return Ok(BookingFlowOutcome::Completed(confirmation));
                    }
                    Ok(StepOutcome::Terminal) => {}
                    Err(err) => cli_io::print_warning(err),
                },
                WizardAction::Back => match wizard.retreat() {
                    RetreatOutcome::Moved(step) => debug!(step = %step, "moved back"),
                    RetreatOutcome::Exited(route) => return Ok(self.cancelled(route)),
                    RetreatOutcome::Locked => {
                        cli_io::print_warning("The booking is already being confirmed.")
                    }
                },
                WizardAction::Cancel => return Ok(self.cancelled(Route::Back)),
                WizardAction::Date(date) if !self.is_bookable(date) => self.reject_date(date),
                other => {
                    if let Err(err) = apply_selection(wizard, other) {
                        cli_io::print_warning(err);
                    }
                }
            }
        }
    }

    fn cancelled(&self, route: Route) -> BookingFlowOutcome {
        info!(route = %route, "booking abandoned");
        BookingFlowOutcome::Cancelled(route)
    }
}

fn apply_selection(wizard: &mut BookingWizard, action: WizardAction) -> Result<(), CoreError> {
    match action {
        WizardAction::Tier(id) => {
            wizard.select_service(&id)?;
            report_total(wizard);
        }
        WizardAction::Toggle(id) => {
            let label = wizard
                .catalog()
                .option(&id)
                .map(|option| option.label.clone())
                .unwrap_or_else(|| id.clone());
            match wizard.toggle_option(&id)? {
                ToggleOutcome::Added => cli_io::print_info(format!("Added {label}.")),
                ToggleOutcome::Removed => cli_io::print_info(format!("Removed {label}.")),
                ToggleOutcome::Locked => {
                    cli_io::print_warning(format!("{label} is included and cannot be removed."));
                    return Ok(());
                }
            }
            report_total(wizard);
        }
        WizardAction::Frequency(id) => {
            if id.is_some() && !wizard.catalog().supports_frequency() {
                cli_io::print_warning(format!(
                    "{} is booked one visit at a time.",
                    wizard.catalog().name
                ));
                return Ok(());
            }
            wizard.select_frequency(id.as_deref())?;
            report_total(wizard);
        }
        WizardAction::Date(date) => {
            wizard.select_date(date);
            cli_io::print_info(format!("Date: {}", date.format("%a %d %b %Y")));
        }
        WizardAction::Time(slot) => {
            wizard.select_time(&slot)?;
            if let Some(time) = &wizard.selection().selected_time {
                cli_io::print_info(format!("Time: {time}"));
            }
        }
        WizardAction::Address(id) => {
            wizard.select_address(&id)?;
            cli_io::print_info(format!("Address #{id} selected."));
        }
        WizardAction::Payment(id) => {
            wizard.select_payment_method(&id)?;
            if let Some(method) = wizard.selection().selected_payment_method_id.as_deref() {
                cli_io::print_info(format!("Paying with {method}."));
            }
        }
        WizardAction::Next | WizardAction::Back | WizardAction::Cancel => {}
    }
    Ok(())
}

fn report_total(wizard: &BookingWizard) {
    cli_io::print_info(format!("Total: {}", rupees(wizard.total_price())));
}

fn render_step(wizard: &BookingWizard) {
    let step = wizard.step();
    let selection = wizard.selection();
    if step == WizardStep::Confirmation {
        output::section(step.title());
        return;
    }
    output::section(format!(
        "Step {}/4: {}",
        step.index() + 1,
        step.title()
    ));

    match step {
        WizardStep::Service => {
            let catalog = wizard.catalog();
            cli_io::print_info(&catalog.name);
            let tiers: Vec<(String, String)> = catalog
                .tiers
                .iter()
                .map(|tier| (tier.id.clone(), tier.display_label()))
                .collect();
            output::two_column(&tiers);
            cli_io::print_info("Options:");
            let options: Vec<(String, String)> = catalog
                .options
                .iter()
                .map(|option| {
                    let mark = checkbox(selection.is_option_selected(&option.id));
                    (format!("{mark} {}", option.id), option.display_label())
                })
                .collect();
            output::two_column(&options);
            if catalog.supports_frequency() {
                cli_io::print_info("Frequency:");
                let frequencies: Vec<(String, String)> = catalog
                    .frequencies
                    .iter()
                    .map(|frequency| (frequency.id.clone(), frequency.display_label()))
                    .collect();
                output::two_column(&frequencies);
            }
        }
        WizardStep::DateTime => {
            cli_io::print_info(format!(
                "Time slots: {}",
                homeclean_core::CatalogService::time_slots().join(", ")
            ));
        }
        WizardStep::Address => {
            let addresses: Vec<(String, String)> = wizard
                .addresses()
                .iter()
                .map(|address| (address.id.clone(), address.display_line()))
                .collect();
            output::two_column(&addresses);
        }
        WizardStep::Payment => {
            let methods: Vec<(String, String)> = wizard
                .payment_methods()
                .iter()
                .map(|method| (method.id.clone(), method.label.clone()))
                .collect();
            output::two_column(&methods);
            let breakdown = wizard.price_breakdown();
            cli_io::print_info(format!("Base: {}", rupees(breakdown.base)));
            for (id, price) in &breakdown.addons {
                cli_io::print_info(format!("  + {id}: {}", rupees(*price)));
            }
            if let Some(multiplier) = breakdown.multiplier {
                cli_io::print_info(format!("  x {multiplier}"));
            }
        }
        WizardStep::Confirmation => {}
    }
    report_total(wizard);
}
