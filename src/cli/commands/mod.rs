pub mod category;
pub mod config;
pub mod grid;
pub mod plan;
pub mod system;

use crate::cli::errors::CommandError;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(grid::definitions());
    commands.extend(category::definitions());
    commands.extend(plan::definitions());
    commands.extend(config::definitions());
    commands
}

pub fn registry() -> CommandRegistry {
    CommandRegistry::new(all_definitions())
}

/// Removes `flag` from `args`, reporting whether it was present.
pub(crate) fn take_flag<'a>(args: &[&'a str], flag: &str) -> (Vec<&'a str>, bool) {
    let mut found = false;
    let rest = args
        .iter()
        .copied()
        .filter(|arg| {
            let matches = arg.eq_ignore_ascii_case(flag);
            found |= matches;
            !matches
        })
        .collect();
    (rest, found)
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("Usage: {usage}"))
}
