//! Command-line front end
//!
//! This module organizes commands into logical submodules:
//! - `dashboard`: Headline counters and recent activity
//! - `stores`: Store CRUD
//! - `categories`: Category CRUD
//! - `notes`: Note CRUD and filtered listing
//! - `reminders`: Reminder CRUD, toggle and filtered listing
//! - `contacts`: Contact CRUD and filtered listing
//! - `watch`: Interactive filtering driven from stdin
//! - `render`: Terminal views and notifier

pub mod categories;
pub mod contacts;
pub mod dashboard;
pub mod notes;
pub mod reminders;
pub mod render;
pub mod stores;
pub mod watch;

use crate::app::{self, AppContext};
use crate::config::ConsoleConfig;
use crate::services::notify::{LogNotifier, SharedNotifier};
use clap::{Parser, Subcommand};
use std::sync::Arc;

/// Storenotes - administrative console for stores, notes and reminders.
#[derive(Parser, Debug)]
#[command(name = "storenotes")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Backend base URL (defaults to $STORENOTES_API_URL, then localhost)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Only log outcome messages instead of printing them
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the dashboard
    Dashboard,

    /// Manage stores
    #[command(subcommand)]
    Stores(stores::StoresCommand),

    /// Manage categories
    #[command(subcommand)]
    Categories(categories::CategoriesCommand),

    /// Manage notes
    #[command(subcommand)]
    Notes(notes::NotesCommand),

    /// Manage reminders
    #[command(subcommand)]
    Reminders(reminders::RemindersCommand),

    /// Manage store contacts
    #[command(subcommand)]
    Contacts(contacts::ContactsCommand),

    /// Filter a list interactively, reading filter commands from stdin
    Watch {
        #[arg(value_enum)]
        target: watch::WatchTarget,
    },
}

impl Cli {
    pub fn config(&self) -> ConsoleConfig {
        ConsoleConfig::resolve(self.api_url.clone(), self.timeout)
    }

    fn notifier(&self) -> SharedNotifier {
        if self.quiet {
            Arc::new(LogNotifier)
        } else {
            Arc::new(render::TerminalNotifier)
        }
    }
}

/// Execute the parsed command line
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = cli.config();
    let ctx: AppContext = app::setup(&config, cli.notifier())?;

    match cli.command {
        Commands::Dashboard => dashboard::execute(&ctx).await,
        Commands::Stores(cmd) => stores::execute(&ctx, cmd).await,
        Commands::Categories(cmd) => categories::execute(&ctx, cmd).await,
        Commands::Notes(cmd) => notes::execute(&ctx, cmd).await,
        Commands::Reminders(cmd) => reminders::execute(&ctx, cmd).await,
        Commands::Contacts(cmd) => contacts::execute(&ctx, cmd).await,
        Commands::Watch { target } => watch::execute(&ctx, target).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::filters::ReminderStatusFilter;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_reach_config() {
        let cli = Cli::parse_from([
            "storenotes",
            "notes",
            "list",
            "--api-url",
            "http://backend:9000/api/",
            "--timeout",
            "3",
        ]);

        let config = cli.config();
        assert_eq!(config.base_url, "http://backend:9000/api");
        assert_eq!(config.timeout.as_secs(), 3);
    }

    #[test]
    fn test_reminder_list_flags_parse() {
        let cli = Cli::parse_from([
            "storenotes",
            "reminders",
            "list",
            "--status",
            "overdue",
            "--note",
            "4",
        ]);

        match cli.command {
            Commands::Reminders(reminders::RemindersCommand::List(args)) => {
                assert_eq!(args.status, ReminderStatusFilter::Overdue);
                assert_eq!(args.note.as_deref(), Some("4"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
