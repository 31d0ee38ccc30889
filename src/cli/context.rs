use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;

use crate::{
    cli::{
        commands,
        errors::{CliError, CommandError},
        output,
        registry::CommandRegistry,
    },
    config::{app_data_dir, Config, ConfigManager},
    currency::MoneyFormat,
    grid::{CategoryId, CategoryRegistry, ColumnDef},
    session::BudgetSession,
    storage::JsonPlanStorage,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Everything a command handler can reach.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub session: BudgetSession,
    pub storage: JsonPlanStorage,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub money: MoneyFormat,
    pub theme: ColorfulTheme,
}

impl ShellContext {
    /// Reads configuration and plan storage from the application directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let storage = JsonPlanStorage::new(&app_data_dir())?;
        Ok(Self::from_parts(mode, config_manager, config, storage))
    }

    pub fn from_parts(
        mode: CliMode,
        config_manager: ConfigManager,
        config: Config,
        storage: JsonPlanStorage,
    ) -> Self {
        let mut session = BudgetSession::with_history_limit(
            config.reference_date_or_today(),
            CategoryRegistry::with_defaults(),
            config.history_limit,
        );
        session.set_view_mode(config.default_view);
        Self {
            mode,
            registry: commands::registry(),
            session,
            storage,
            config_manager,
            money: config.money_format(),
            config,
            theme: ColorfulTheme::default(),
        }
    }

    pub fn prompt(&self) -> String {
        format!("budget [{}]> ", self.session.view_mode())
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &input.to_ascii_lowercase()), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::hint(format!("Did you mean `{}`?", name));
            }
        }
    }

    /// Asks for a yes/no answer; script mode never confirms on its own.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(false);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(CommandError::from)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::UnknownCategory(query) => {
                output::error(format!("No category matches `{}`", query));
                output::hint("Use `categories` to list ids and names.");
            }
            other => output::error(other),
        }
        Ok(())
    }

    /// Accepts a category id or a case-insensitive display name.
    pub fn resolve_category(&self, query: &str) -> Result<CategoryId, CommandError> {
        self.session
            .find_category(query)
            .map(|category| category.id.clone())
            .ok_or_else(|| CommandError::UnknownCategory(query.to_string()))
    }

    /// 1-based column position in the current view.
    pub fn resolve_column(&self, raw: &str) -> Result<ColumnDef, CommandError> {
        let columns = self.session.columns();
        let count = columns.len();
        raw.parse::<usize>()
            .ok()
            .filter(|position| (1..=count).contains(position))
            .and_then(|position| columns.into_iter().nth(position - 1))
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "Column must be a number between 1 and {} in the {} view",
                    count,
                    self.session.view_mode()
                ))
            })
    }
}
