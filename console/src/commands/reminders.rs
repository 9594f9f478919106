//! Reminder commands
//!
//! CRUD operations, toggling and filtered listing for reminders.

use super::render::{self, RemindersTable};
use crate::app::{AppContext, Section};
use crate::services::filters::{IdSelector, ReminderFilters, ReminderStatusFilter};
use crate::services::{temporal, views, ReminderForm, RemindersService};
use crate::storage::entity_store::NOTE_NOT_FOUND;
use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum RemindersCommand {
    /// List reminders, earliest first
    List(ReminderListArgs),
    /// Reminders the backend reports as coming up
    Upcoming,
    /// Show one reminder
    Show { id: i64 },
    /// Create a reminder for a note, prefilled with the note title and one hour from now
    Create {
        /// Note id
        #[arg(long)]
        note: i64,
        #[command(flatten)]
        fields: ReminderArgs,
    },
    /// Update a reminder; omitted fields keep their current value
    Update {
        id: i64,
        #[command(flatten)]
        fields: ReminderArgs,
    },
    /// Switch a reminder between active and inactive
    Toggle { id: i64 },
    /// Delete a reminder
    Delete { id: i64 },
}

#[derive(Args, Debug, Default)]
pub struct ReminderListArgs {
    /// Case-insensitive text in title or description
    #[arg(long, default_value = "")]
    pub search: String,
    /// all, active, inactive, upcoming or overdue
    #[arg(long, default_value = "all")]
    pub status: ReminderStatusFilter,
    /// Note id
    #[arg(long)]
    pub note: Option<String>,
}

impl ReminderListArgs {
    pub fn filters(&self) -> ReminderFilters {
        ReminderFilters {
            search: self.search.clone(),
            status: self.status,
            note: self
                .note
                .as_deref()
                .map(IdSelector::from_input)
                .unwrap_or_default(),
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct ReminderArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Trigger time, YYYY-MM-DDTHH:MM
    #[arg(long)]
    pub at: Option<String>,
    /// Create or keep the reminder inactive
    #[arg(long)]
    pub inactive: bool,
}

impl ReminderArgs {
    pub fn apply(self, mut form: ReminderForm) -> ReminderForm {
        if let Some(title) = self.title {
            form.title = title;
        }
        if self.description.is_some() {
            form.description = self.description;
        }
        if self.at.is_some() {
            form.trigger_at = self.at;
        }
        if self.inactive {
            form.active = false;
        }
        form
    }
}

pub async fn execute(ctx: &AppContext, cmd: RemindersCommand) -> anyhow::Result<()> {
    let service = RemindersService::new(ctx.clone());

    match cmd {
        RemindersCommand::List(args) => {
            let filters = args.filters();
            ctx.load_section(Section::Reminders).await?;

            let now = temporal::now_local();
            let rows = {
                let entities = ctx.store.read().await;
                let visible = filters.apply(entities.reminders(), now);
                views::reminder_rows(visible, &entities, now)
            };
            views::show(&mut RemindersTable, &rows);
        }
        RemindersCommand::Upcoming => {
            ctx.load_section(Section::Reminders).await?;
            let mut upcoming = service.upcoming().await?;
            upcoming.sort_by(temporal::compare_by_trigger);

            let rows = {
                let entities = ctx.store.read().await;
                views::reminder_rows(upcoming, &entities, temporal::now_local())
            };
            views::show(&mut RemindersTable, &rows);
        }
        RemindersCommand::Show { id } => {
            ctx.load_section(Section::Reminders).await?;
            let reminder = service.get(id).await?;
            let entities = ctx.store.read().await;
            let note_title = reminder
                .note_id
                .and_then(|id| entities.note(id))
                .map(|n| n.title.as_str())
                .unwrap_or(NOTE_NOT_FOUND);
            render::reminder(&reminder, note_title);
        }
        RemindersCommand::Create { note, fields } => {
            ctx.load_section(Section::Reminders).await?;
            let form = fields.apply(service.form_for_note(note).await?);
            let reminder = service.create(form).await?;
            println!("{} {}", reminder.id, reminder.title);
        }
        RemindersCommand::Update { id, fields } => {
            let current = service.get(id).await?;
            let reminder = service
                .update(id, fields.apply(ReminderForm::from_reminder(&current)))
                .await?;
            println!("{} {}", reminder.id, reminder.title);
        }
        RemindersCommand::Toggle { id } => {
            service.toggle_active(id).await?;
        }
        RemindersCommand::Delete { id } => service.delete(id).await?,
    }

    Ok(())
}
