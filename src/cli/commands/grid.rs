use crate::cli::commands::{take_flag, usage_error};
use crate::cli::context::{CliMode, ShellContext};
use crate::cli::errors::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{render_grid, render_summary};
use crate::currency::format_money;
use crate::grid::ViewMode;
use crate::session::EditOutcome;

const SET_USAGE: &str = "set <category> <column> <amount> [--yes]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "view",
            "Show or switch the view mode",
            "view [monthly|quarterly|semestral|yearly|five-year]",
            cmd_view,
        ),
        CommandEntry::new("show", "Render the grid for the current view", "show", cmd_show),
        CommandEntry::new("set", "Enter an amount into a cell", SET_USAGE, cmd_set),
        CommandEntry::new(
            "summary",
            "Bucket totals and allocation shares for a column",
            "summary [column]",
            cmd_summary,
        ),
        CommandEntry::new("undo", "Revert the last change", "undo", cmd_undo),
        CommandEntry::new("redo", "Re-apply an undone change", "redo", cmd_redo),
        CommandEntry::new(
            "reset",
            "Clear every amount (undoable)",
            "reset [--yes]",
            cmd_reset,
        ),
    ]
}

fn cmd_view(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        output::info(format!("Current view: {}", context.session.view_mode()));
        return Ok(());
    };
    let mode: ViewMode = raw.parse().map_err(CommandError::InvalidArguments)?;
    context.session.set_view_mode(mode);
    output::success(format!(
        "Switched to the {} view ({} columns).",
        mode,
        context.session.columns().len()
    ));
    Ok(())
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section(format!("Plan ({} view)", context.session.view_mode()));
    println!("{}", render_grid(&context.session, &context.money));
    Ok(())
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (rest, assume_yes) = take_flag(args, "--yes");
    let [category, column, amount] = rest.as_slice() else {
        return Err(usage_error(SET_USAGE));
    };
    let id = context.resolve_category(category)?;
    let column = context.resolve_column(column)?;
    let name = context
        .session
        .registry()
        .get(&id)
        .map(|category| category.display_name.clone())
        .unwrap_or_else(|| id.to_string());

    let plan = match context.session.apply_edit(&id, &column, amount) {
        EditOutcome::Applied => {
            output::success(format!(
                "{} / {} set to {}.",
                name,
                column.label,
                format_money(context.session.cell_value(&id, &column), &context.money)
            ));
            return Ok(());
        }
        EditOutcome::NeedsConfirmation(plan) => plan,
    };

    output::info(plan.summary());
    if plan.discards_distribution() {
        output::warning("Different month values in this column will become one even split.");
    }
    if !assume_yes && !context.confirm("Apply this change?")? {
        output::warning("Edit abandoned.");
        if context.mode == CliMode::Script {
            output::hint("Append --yes to apply aggregate edits in scripts.");
        }
        return Ok(());
    }
    context.session.commit_edit(&plan);
    output::success(format!(
        "{} / {} set to {}.",
        name,
        column.label,
        format_money(context.session.cell_value(&id, &column), &context.money)
    ));
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let column = context.resolve_column(args.first().copied().unwrap_or("1"))?;
    output::section(format!("Summary for {}", column.label));
    println!("{}", render_summary(&context.session, &column, &context.money));
    Ok(())
}

fn cmd_undo(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.session.undo() {
        output::success("Undid the last change.");
    } else {
        output::warning("Nothing to undo.");
    }
    Ok(())
}

fn cmd_redo(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.session.redo() {
        output::success("Redid the change.");
    } else {
        output::warning("Nothing to redo.");
    }
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (_, assume_yes) = take_flag(args, "--yes");
    if !assume_yes && !context.confirm("Clear every amount in the plan?")? {
        output::warning("Reset abandoned.");
        return Ok(());
    }
    context.session.start_over();
    output::success("Plan cleared. Use `undo` to bring it back.");
    Ok(())
}
