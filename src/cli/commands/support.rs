use homeclean_core::SupportRules;
use tracing::debug;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "support",
        "Ask the support assistant a question",
        "support <message>",
        cmd_support,
    )]
}

fn cmd_support(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: support <message>".into(),
        ));
    }
    let message = args.join(" ");
    debug!(chars = message.len(), "support message received");
    let reply = SupportRules::default().respond(&message);
    io::print_info(format!("Support: {reply}"));
    Ok(())
}
