use crate::cli::commands::usage_error;
use crate::cli::context::ShellContext;
use crate::cli::errors::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::grid::Bucket;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "categories",
            "List categories by bucket",
            "categories",
            cmd_categories,
        ),
        CommandEntry::new(
            "add",
            "Add a category to a bucket",
            "add <income|future|living|present> <name>",
            cmd_add,
        ),
        CommandEntry::new(
            "rename",
            "Rename a category",
            "rename <category> <new name>",
            cmd_rename,
        ),
        CommandEntry::new("remove", "Remove a category", "remove <category>", cmd_remove),
        CommandEntry::new(
            "propagate",
            "Toggle forward-fill for a category",
            "propagate <category> <on|off>",
            cmd_propagate,
        ),
    ]
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    for bucket in Bucket::ALL {
        output::section(bucket);
        for category in context.session.registry().list_by_bucket(bucket) {
            let propagation = if context.session.propagation_enabled(&category.id) {
                "on"
            } else {
                "off"
            };
            output::info(format!(
                "  {:<20} id: {:<16} propagate: {}",
                category.display_name,
                category.id.as_str(),
                propagation
            ));
        }
    }
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "add <income|future|living|present> <name>";
    let Some((bucket, name)) = args.split_first() else {
        return Err(usage_error(usage));
    };
    let bucket: Bucket = bucket.parse().map_err(CommandError::InvalidArguments)?;
    let name = name.join(" ");
    let id = context
        .session
        .add_category(bucket, &name)
        .ok_or_else(|| usage_error(usage))?;
    output::success(format!("Added `{}` to {} (id {}).", name.trim(), bucket, id));
    Ok(())
}

fn cmd_rename(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "rename <category> <new name>";
    let Some((query, name)) = args.split_first() else {
        return Err(usage_error(usage));
    };
    let id = context.resolve_category(query)?;
    let name = name.join(" ");
    if !context.session.rename_category(&id, &name) {
        return Err(usage_error(usage));
    }
    output::success(format!("Renamed {} to `{}`.", id, name.trim()));
    Ok(())
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [query] = args else {
        return Err(usage_error("remove <category>"));
    };
    let id = context.resolve_category(query)?;
    if let Some(removed) = context.session.remove_category(&id) {
        output::success(format!("Removed `{}`.", removed.display_name));
    }
    Ok(())
}

fn cmd_propagate(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "propagate <category> <on|off>";
    let [query, state] = args else {
        return Err(usage_error(usage));
    };
    let enabled = match state.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => true,
        "off" | "false" | "no" => false,
        _ => return Err(usage_error(usage)),
    };
    let id = context.resolve_category(query)?;
    context.session.set_propagation(&id, enabled);
    output::success(format!(
        "Propagation for {} is now {}.",
        id,
        if enabled { "on" } else { "off" }
    ));
    Ok(())
}
