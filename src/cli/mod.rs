pub mod booking_flow;
pub mod commands;
pub mod core;
pub mod help;
pub mod io;
pub mod output;
pub mod progress;
pub mod registry;
mod shell;
pub mod shell_context;
pub mod system_clock;

pub use shell::run_cli;
