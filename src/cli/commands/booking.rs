use dialoguer::Select;
use homeclean_core::{
    BookingConfirmation, BookingWizard, CatalogService, ConfirmationProgress, ThreadSleeper,
};
use homeclean_domain::{default_payment_methods, Displayable};

use crate::cli::booking_flow::{
    BookingFlow, BookingFlowOutcome, MenuInteraction, ScriptedInteraction,
};
use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{self, rupees};
use crate::cli::progress::ProgressLine;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "book",
            "Book a cleaning visit",
            "book <category|/service/<category>>",
            cmd_book,
        ),
        CommandEntry::new(
            "bookings",
            "List saved bookings, newest first",
            "bookings",
            cmd_bookings,
        ),
    ]
}

fn cmd_book(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let target = match args.first() {
        Some(target) => target.to_string(),
        None => match pick_category(context)? {
            Some(key) => key,
            None => return Ok(()),
        },
    };
    let catalog = context.resolve_catalog(&target)?;
    let addresses = context.address_book().list()?;
    let mut wizard = BookingWizard::new(catalog, addresses, default_payment_methods());

    let dates = context.clock.booking_window();
    let repository = context.bookings();
    let flow = BookingFlow::new(&repository, context.simulator()).within(dates.clone());
    let mut sleeper = ThreadSleeper;
    let mut progress = ProgressLine::stdout(context.mode == CliMode::Interactive);
    let mut observer = |event: ConfirmationProgress| progress.observe(event);

    let outcome = match context.mode {
        CliMode::Script => {
            let mut interaction = ScriptedInteraction::new(&mut context.script);
            flow.run(&mut wizard, &mut interaction, &mut sleeper, &mut observer)?
        }
        CliMode::Interactive => {
            let mut interaction = MenuInteraction::new(&context.theme, dates);
            flow.run(&mut wizard, &mut interaction, &mut sleeper, &mut observer)?
        }
    };

    match outcome {
        BookingFlowOutcome::Completed(confirmation) => report_confirmation(&confirmation),
        BookingFlowOutcome::Cancelled(_) => io::print_info("Booking cancelled. Nothing was saved."),
    }
    Ok(())
}

fn pick_category(context: &ShellContext) -> Result<Option<String>, CommandError> {
    if context.mode != CliMode::Interactive {
        return Err(CommandError::InvalidArguments(
            "usage: book <category|/service/<category>>".into(),
        ));
    }
    let categories = CatalogService::categories();
    let labels: Vec<String> = categories
        .iter()
        .map(|catalog| catalog.display_label())
        .collect();
    let choice = Select::with_theme(&context.theme)
        .with_prompt("What would you like cleaned?")
        .items(&labels)
        .default(0)
        .interact_opt()?;
    Ok(choice.map(|index| categories[index].key.clone()))
}

fn report_confirmation(confirmation: &BookingConfirmation) {
    for notice in &confirmation.notices {
        io::print_warning(notice);
    }
    let record = &confirmation.record;
    let summary = format!(
        "{} on {} at {} for {}",
        record.service_type,
        record.date.format("%a %d %b %Y"),
        record.time,
        rupees(record.price)
    );
    if confirmation.stored {
        io::print_success(format!("Booking confirmed: {summary}."));
    } else {
        io::print_warning(format!(
            "Booking confirmed but not saved on this device: {summary}."
        ));
    }
}

fn cmd_bookings(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let load = context.bookings().load()?;
    if let Some(notice) = &load.recovered {
        io::print_warning(notice);
    }
    if load.records.is_empty() {
        io::print_info("No bookings yet. Use `book <category>` to schedule one.");
        return Ok(());
    }

    output::section("Your bookings");
    for (index, record) in load.records.iter().enumerate() {
        io::print_info(format!(
            "{}. {} | {} {} | {} | {}",
            index + 1,
            record.service_type,
            record.date,
            record.time,
            rupees(record.price),
            record.address
        ));
        if let Some(frequency) = &record.frequency {
            io::print_info(format!("   repeats: {frequency}"));
        }
        if !record.options.is_empty() {
            io::print_info(format!("   includes: {}", record.options.join(", ")));
        }
    }
    Ok(())
}
