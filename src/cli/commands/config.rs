use chrono::NaiveDate;

use crate::cli::commands::usage_error;
use crate::cli::context::ShellContext;
use crate::cli::errors::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::currency::CurrencyCode;

const CONFIG_USAGE: &str =
    "config [show|set <currency|separator|view|reference|history> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change saved preferences",
        CONFIG_USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => show_config(context),
        ["set", key, value @ ..] if !value.is_empty() => {
            set_config_value(context, key, value.join(" ").trim())
        }
        _ => Err(usage_error(CONFIG_USAGE)),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    let config = &context.config;
    output::section("Configuration");
    output::info(format!("  currency   : {}", config.currency.as_str()));
    output::info(format!("  separator  : '{}'", config.grouping_separator));
    output::info(format!("  view       : {}", config.default_view));
    output::info(format!(
        "  reference  : {}",
        config
            .reference_date
            .map(|date| date.to_string())
            .unwrap_or_else(|| "current month".into())
    ));
    output::info(format!("  history    : {}", config.history_limit));
    output::hint(format!("Stored at {}", context.config_manager.path().display()));
    Ok(())
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut config = context.config.clone();
    let mut next_start = false;
    match key.to_ascii_lowercase().as_str() {
        "currency" => config.currency = CurrencyCode::new(value),
        "separator" => {
            let mut chars = value.chars();
            config.grouping_separator = match (chars.next(), chars.next()) {
                (Some(separator), None) => separator,
                _ => {
                    return Err(CommandError::InvalidArguments(
                        "The separator must be a single character".into(),
                    ))
                }
            };
        }
        "view" => config.default_view = value.parse().map_err(CommandError::InvalidArguments)?,
        "reference" => {
            config.reference_date = if value.eq_ignore_ascii_case("today") {
                None
            } else {
                Some(NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
                    CommandError::InvalidArguments(format!(
                        "`{value}` is not a date in YYYY-MM-DD form"
                    ))
                })?)
            };
            next_start = true;
        }
        "history" => {
            config.history_limit = value
                .parse::<usize>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or_else(|| {
                    CommandError::InvalidArguments("History size must be a positive number".into())
                })?;
            next_start = true;
        }
        _ => return Err(usage_error(CONFIG_USAGE)),
    }

    context.config_manager.save(&config)?;
    context.money = config.money_format();
    if config.default_view != context.config.default_view {
        context.session.set_view_mode(config.default_view);
    }
    context.config = config;
    output::success(format!("Saved {key} = {value}."));
    if next_start {
        output::hint("Takes effect the next time the shell starts.");
    }
    Ok(())
}
