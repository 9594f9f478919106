//! Note commands
//!
//! CRUD operations, filtered listing and server-side queries for notes.

use super::render::{self, NotesTable};
use crate::app::{AppContext, Section};
use crate::gateway::{Note, NoteStatus};
use crate::services::filters::{parse_choice, IdSelector, NoteFilters};
use crate::services::{temporal, views, NoteForm, NotesService};
use anyhow::anyhow;
use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum NotesCommand {
    /// List notes, optionally filtered
    List(NoteListArgs),
    /// Show one note with its reminders
    Show { id: i64 },
    /// Create a note
    Create(NoteArgs),
    /// Update a note; omitted fields keep their current value
    Update {
        id: i64,
        #[command(flatten)]
        fields: NoteArgs,
    },
    /// Delete a note
    Delete { id: i64 },
}

#[derive(Args, Debug, Default)]
pub struct NoteListArgs {
    /// Case-insensitive text in title or body
    #[arg(long, default_value = "")]
    pub search: String,
    /// PENDENTE, EM_ANDAMENTO, CONCLUIDO or all
    #[arg(long, default_value = "all")]
    pub status: String,
    /// Category id or all
    #[arg(long, default_value = "all")]
    pub category: String,
    /// Store id or all
    #[arg(long, default_value = "all")]
    pub store: String,
    /// Ask the backend to filter instead of filtering locally
    #[arg(long)]
    pub server: bool,
}

impl NoteListArgs {
    pub fn filters(&self) -> anyhow::Result<NoteFilters> {
        Ok(NoteFilters {
            search: self.search.clone(),
            status: parse_choice::<NoteStatus>(&self.status).map_err(|e| anyhow!(e))?,
            category: IdSelector::from_input(&self.category),
            store: IdSelector::from_input(&self.store),
        })
    }
}

#[derive(Args, Debug, Default)]
pub struct NoteArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub body: Option<String>,
    #[arg(long)]
    pub status: Option<NoteStatus>,
    /// Note date, YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,
    /// Category id
    #[arg(long)]
    pub category: Option<i64>,
}

impl NoteArgs {
    pub fn apply(self, mut form: NoteForm) -> NoteForm {
        if let Some(title) = self.title {
            form.title = title;
        }
        if self.body.is_some() {
            form.body = self.body;
        }
        if self.status.is_some() {
            form.status = self.status;
        }
        if self.date.is_some() {
            form.note_date = self.date;
        }
        if self.category.is_some() {
            form.category_id = self.category;
        }
        form
    }
}

pub async fn execute(ctx: &AppContext, cmd: NotesCommand) -> anyhow::Result<()> {
    let service = NotesService::new(ctx.clone());

    match cmd {
        NotesCommand::List(args) => list(ctx, &service, args).await?,
        NotesCommand::Show { id } => {
            ctx.load_section(Section::Notes).await?;
            let note = service.get(id).await?;
            let reminders = service.reminders_for(id).await?;
            let context = ctx.store.read().await.note_context_label(&note);
            render::note(&note, &context, &reminders);
        }
        NotesCommand::Create(fields) => {
            let form = NoteForm {
                note_date: Some(temporal::now_local().date().to_string()),
                ..Default::default()
            };
            let note = service.create(fields.apply(form)).await?;
            println!("{} {}", note.id, note.title);
        }
        NotesCommand::Update { id, fields } => {
            let current = service.get(id).await?;
            let note = service
                .update(id, fields.apply(NoteForm::from_note(&current)))
                .await?;
            println!("{} {}", note.id, note.title);
        }
        NotesCommand::Delete { id } => service.delete(id).await?,
    }

    Ok(())
}

async fn list(ctx: &AppContext, service: &NotesService, args: NoteListArgs) -> anyhow::Result<()> {
    let filters = args.filters()?;
    tracing::debug!("Listing notes with {:?}", filters);
    ctx.load_section(Section::Notes).await?;

    let notes: Vec<Note> = if args.server {
        server_query(service, &filters).await?
    } else {
        let entities = ctx.store.read().await;
        filters.apply(entities.notes(), &entities)
    };

    let rows = {
        let entities = ctx.store.read().await;
        views::note_rows(notes, &entities)
    };
    views::show(&mut NotesTable, &rows);
    Ok(())
}

/// One backend query for the most specific filter given
async fn server_query(service: &NotesService, filters: &NoteFilters) -> anyhow::Result<Vec<Note>> {
    let notes = if !filters.search.is_empty() {
        service.search(&filters.search).await?
    } else if let Some(category_id) = filters.category.id() {
        service.by_category(category_id).await?
    } else if let Some(store_id) = filters.store.id() {
        service.by_store(store_id).await?
    } else if let Some(status) = filters.status {
        service.by_status(status).await?
    } else {
        return Err(anyhow!("--server needs --search, --category, --store or --status"));
    };
    Ok(notes)
}
