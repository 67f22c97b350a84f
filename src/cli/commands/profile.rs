use homeclean_domain::default_payment_methods;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "addresses",
            "List, add, or remove saved addresses",
            "addresses [add <label> <line> | remove <id>]",
            cmd_addresses,
        ),
        CommandEntry::new(
            "payments",
            "List accepted payment methods",
            "payments",
            cmd_payments,
        ),
    ]
}

fn cmd_addresses(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let book = context.address_book();
    match args.first().map(|sub| sub.to_ascii_lowercase()) {
        None => {}
        Some(sub) if sub == "list" => {}
        Some(sub) if sub == "add" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(
                    "usage: addresses add <label> <line>".into(),
                ));
            }
            let address = book.add(args[1], &args[2..].join(" "))?;
            io::print_success(format!(
                "Saved address #{}: {}",
                address.id,
                address.display_line()
            ));
            return Ok(());
        }
        Some(sub) if sub == "remove" => {
            let id = args.get(1).ok_or_else(|| {
                CommandError::InvalidArguments("usage: addresses remove <id>".into())
            })?;
            let removed = book.remove(id)?;
            io::print_success(format!("Removed address #{}: {}", removed.id, removed.label));
            return Ok(());
        }
        Some(other) => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown addresses action `{other}`; use add or remove"
            )))
        }
    }

    let addresses = book.list()?;
    output::section("Saved addresses");
    if addresses.is_empty() {
        io::print_info("No saved addresses. Use `addresses add <label> <line>`.");
        return Ok(());
    }
    let rows: Vec<(String, String)> = addresses
        .iter()
        .map(|address| (address.id.clone(), address.display_line()))
        .collect();
    output::two_column(&rows);
    Ok(())
}

fn cmd_payments(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Payment methods");
    let rows: Vec<(String, String)> = default_payment_methods()
        .into_iter()
        .map(|method| (method.id, method.label))
        .collect();
    output::two_column(&rows);
    Ok(())
}
