use homeclean_core::CatalogService;
use homeclean_domain::{Displayable, ServiceOption};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{self, rupees};
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "categories",
            "List bookable cleaning services",
            "categories",
            cmd_categories,
        ),
        CommandEntry::new(
            "catalog",
            "Show tiers, options, and prices for a service",
            "catalog <category>",
            cmd_catalog,
        ),
    ]
}

fn cmd_categories(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Services");
    let rows: Vec<(String, String)> = CatalogService::categories()
        .iter()
        .map(|catalog| (catalog.key.clone(), catalog.display_label()))
        .collect();
    output::two_column(&rows);
    io::print_info("Use `book <category>` to start a booking.");
    Ok(())
}

fn cmd_catalog(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let key = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: catalog <category>".into()))?;
    let catalog = context.resolve_catalog(key)?;

    output::section(format!(
        "{} (from {})",
        catalog.name,
        rupees(catalog.starting_price())
    ));
    io::print_info("Tiers:");
    let tiers: Vec<(String, String)> = catalog
        .tiers
        .iter()
        .map(|tier| (tier.id.clone(), tier.display_label()))
        .collect();
    output::two_column(&tiers);

    let (included, addons): (Vec<&ServiceOption>, Vec<&ServiceOption>) =
        catalog.options.iter().partition(|option| option.included);
    io::print_info("Included:");
    output::two_column(&option_rows(&included));
    if !addons.is_empty() {
        io::print_info("Add-ons:");
        output::two_column(&option_rows(&addons));
    }
    if catalog.supports_frequency() {
        io::print_info("Frequency:");
        let frequencies: Vec<(String, String)> = catalog
            .frequencies
            .iter()
            .map(|frequency| (frequency.id.clone(), frequency.display_label()))
            .collect();
        output::two_column(&frequencies);
    }
    io::print_info(format!(
        "Time slots: {}",
        CatalogService::time_slots().join(", ")
    ));
    Ok(())
}

fn option_rows(options: &[&ServiceOption]) -> Vec<(String, String)> {
    options
        .iter()
        .map(|option| (option.id.clone(), option.display_label()))
        .collect()
}
