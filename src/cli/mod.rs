pub mod commands;
pub mod context;
pub mod errors;
pub mod output;
pub mod registry;
mod shell;
pub mod table;

pub use shell::run_cli;
