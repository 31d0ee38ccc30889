use crate::cli::commands::usage_error;
use crate::cli::context::ShellContext;
use crate::cli::errors::CommandResult;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::storage::PlanStorage;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "save",
            "Save the first twelve months as a named plan",
            "save <name>",
            cmd_save,
        ),
        CommandEntry::new(
            "load",
            "Replace the grid with a saved plan",
            "load <name>",
            cmd_load,
        ),
        CommandEntry::new("plans", "List saved plans", "plans", cmd_plans),
    ]
}

fn cmd_save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(usage_error("save <name>"));
    }
    let name = args.join(" ");
    let rows = context.session.export_rows();
    let path = context.storage.save(&name, &rows)?;
    output::success(format!("Saved {} row(s) to {}.", rows.len(), path.display()));
    Ok(())
}

fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(usage_error("load <name>"));
    }
    let name = args.join(" ");
    let rows = context.storage.load(&name)?;
    let report = context.session.load_rows(&rows);
    output::success(format!("Loaded {} amount(s) from `{}`.", report.imported, name));
    if report.dropped() > 0 {
        output::warning(format!(
            "Skipped {} row(s): {} outside the editable window, {} with unknown categories.",
            report.dropped(),
            report.out_of_window,
            report.unmatched
        ));
    }
    Ok(())
}

fn cmd_plans(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let plans = context.storage.list()?;
    if plans.is_empty() {
        output::info("No saved plans yet.");
        output::hint(format!("Plans are kept in {}", context.storage.plans_dir().display()));
        return Ok(());
    }
    output::section("Saved plans");
    for plan in plans {
        output::info(format!("  {plan}"));
    }
    Ok(())
}
