//! Reminders service
//!
//! Reminder lifecycle against the backend. The trigger time must lie in the
//! future when a form is submitted; toggling only flips the active flag and
//! keeps the stored trigger as is.

use crate::app::{AppContext, Section};
use crate::config::{MAX_REMINDER_DESCRIPTION_LEN, MAX_TITLE_LEN};
use crate::error::{AppError, Result, ValidationError};
use crate::gateway::{Note, Reminder, ReminderRequest};
use crate::services::notify::report;
use crate::services::{temporal, validation};
use chrono::NaiveDateTime;

/// Reminder form as entered
#[derive(Debug, Clone)]
pub struct ReminderForm {
    pub title: String,
    pub description: Option<String>,
    /// Date-time field value, `YYYY-MM-DDTHH:MM`
    pub trigger_at: Option<String>,
    pub active: bool,
    pub note_id: Option<i64>,
}

impl Default for ReminderForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            trigger_at: None,
            active: true,
            note_id: None,
        }
    }
}

impl ReminderForm {
    /// Prefilled form for a new reminder on `note`
    pub fn for_note(note: &Note, now: NaiveDateTime) -> Self {
        Self {
            title: format!("Lembrete: {}", note.title),
            trigger_at: Some(temporal::to_form_value(temporal::default_trigger(now))),
            note_id: Some(note.id),
            ..Default::default()
        }
    }

    pub fn from_reminder(reminder: &Reminder) -> Self {
        Self {
            title: reminder.title.clone(),
            description: reminder.description.clone(),
            trigger_at: temporal::trigger_time(reminder).map(temporal::to_form_value),
            active: reminder.active,
            note_id: reminder.note_id,
        }
    }

    pub fn validate(self, now: NaiveDateTime) -> Result<ReminderRequest> {
        let mut errors = ValidationError::new();
        let title = self.title.trim().to_string();
        let description = validation::optional(self.description);

        validation::require(&mut errors, "titulo", Some(title.as_str()));
        validation::max_len(&mut errors, "titulo", Some(title.as_str()), MAX_TITLE_LEN);
        validation::max_len(&mut errors, "descricao", description.as_deref(), MAX_REMINDER_DESCRIPTION_LEN);
        validation::require(&mut errors, "dataHoraLembrete", self.trigger_at.as_deref());

        let trigger_at = self.trigger_at.as_deref().and_then(temporal::parse_form_value);
        match trigger_at {
            Some(ts) => validation::in_future(&mut errors, "dataHoraLembrete", ts, now),
            None if self.trigger_at.as_deref().is_some_and(|t| !t.trim().is_empty()) => {
                errors.push("dataHoraLembrete", "Data/hora do lembrete inválida");
            }
            None => {}
        }
        if self.note_id.is_none() {
            errors.push("notaId", "O campo notaId é obrigatório");
        }
        errors.into_result()?;

        let (Some(trigger_at), Some(note_id)) = (trigger_at, self.note_id) else {
            return Err(AppError::Generic("Incomplete reminder form".to_string()));
        };

        Ok(ReminderRequest {
            title,
            description,
            trigger_at,
            active: self.active,
            note_id,
        })
    }
}

#[derive(Clone)]
pub struct RemindersService {
    ctx: AppContext,
    now: fn() -> NaiveDateTime,
}

impl RemindersService {
    pub fn new(ctx: AppContext) -> Self {
        Self::with_clock(ctx, temporal::now_local)
    }

    pub fn with_clock(ctx: AppContext, now: fn() -> NaiveDateTime) -> Self {
        Self { ctx, now }
    }

    /// Replace the reminders snapshot, fetching notes too when none are
    /// cached yet so note titles resolve
    pub async fn load(&self) -> Result<usize> {
        let needs_notes = self.ctx.store.read().await.notes().is_empty();
        let gateway = self.ctx.gateway.as_ref();

        let (reminders, notes) = tokio::try_join!(gateway.list_reminders(), async {
            if needs_notes {
                gateway.list_notes().await.map(Some)
            } else {
                Ok(None)
            }
        })?;

        let count = reminders.len();
        let mut entities = self.ctx.store.write().await;
        entities.replace_reminders(reminders);
        if let Some(notes) = notes {
            entities.replace_notes(notes);
        }
        Ok(count)
    }

    pub async fn get(&self, id: i64) -> Result<Reminder> {
        let result = self.ctx.gateway.get_reminder(id).await;
        if let Err(e) = &result {
            tracing::error!("Error loading reminder {}: {}", id, e);
            self.ctx.notifier.error("Erro ao carregar lembrete");
        }
        result
    }

    /// Reminders the backend considers coming up
    pub async fn upcoming(&self) -> Result<Vec<Reminder>> {
        let result = self.ctx.gateway.list_upcoming_reminders().await;
        if let Err(e) = &result {
            tracing::error!("Error loading upcoming reminders: {}", e);
            self.ctx.notifier.error("Erro ao carregar lembretes próximos");
        }
        result
    }

    pub async fn for_note(&self, note_id: i64) -> Result<Vec<Reminder>> {
        let result = self.ctx.gateway.list_reminders_by_note(note_id).await;
        if let Err(e) = &result {
            tracing::error!("Error loading reminders of note {}: {}", note_id, e);
            self.ctx.notifier.error(Section::Reminders.failure_message());
        }
        result
    }

    /// Prefilled form for a note from the snapshot
    pub async fn form_for_note(&self, note_id: i64) -> Result<ReminderForm> {
        let entities = self.ctx.store.read().await;
        let note = entities.note(note_id).ok_or(AppError::NotFound {
            entity: "Note",
            id: note_id,
        })?;
        Ok(ReminderForm::for_note(note, (self.now)()))
    }

    pub async fn create(&self, form: ReminderForm) -> Result<Reminder> {
        tracing::info!("Creating reminder: {}", form.title);

        let result = match form.validate((self.now)()) {
            Ok(req) => self.ctx.gateway.create_reminder(&req).await,
            Err(e) => Err(e),
        };
        let reminder = report(
            self.ctx.notifier.as_ref(),
            result,
            "Lembrete criado com sucesso!",
            "Erro ao salvar lembrete",
        )?;

        tracing::info!("Reminder created successfully: {}", reminder.id);
        self.refresh().await;
        Ok(reminder)
    }

    pub async fn update(&self, id: i64, form: ReminderForm) -> Result<Reminder> {
        tracing::info!("Updating reminder: {}", id);

        let result = match form.validate((self.now)()) {
            Ok(req) => self.ctx.gateway.update_reminder(id, &req).await,
            Err(e) => Err(e),
        };
        let reminder = report(
            self.ctx.notifier.as_ref(),
            result,
            "Lembrete atualizado com sucesso!",
            "Erro ao salvar lembrete",
        )?;

        self.refresh().await;
        Ok(reminder)
    }

    /// Flip the active flag of a stored reminder
    pub async fn toggle_active(&self, id: i64) -> Result<Reminder> {
        tracing::info!("Toggling reminder: {}", id);

        let result = self.send_toggle(id).await;
        match &result {
            Ok(reminder) if reminder.active => {
                self.ctx.notifier.success("Lembrete ativado com sucesso!")
            }
            Ok(_) => self.ctx.notifier.success("Lembrete desativado com sucesso!"),
            Err(e) => {
                tracing::error!("Error toggling reminder {}: {}", id, e);
                self.ctx.notifier.error("Erro ao alterar status do lembrete");
            }
        }
        let reminder = result?;

        self.refresh().await;
        Ok(reminder)
    }

    async fn send_toggle(&self, id: i64) -> Result<Reminder> {
        let current = self.ctx.gateway.get_reminder(id).await?;
        let trigger_at = temporal::trigger_time(&current)
            .ok_or_else(|| AppError::Generic(format!("Reminder {} has no usable trigger time", id)))?;
        let note_id = current
            .note_id
            .ok_or_else(|| AppError::Generic(format!("Reminder {} has no note", id)))?;

        let req = ReminderRequest {
            title: current.title,
            description: current.description,
            trigger_at,
            active: !current.active,
            note_id,
        };
        self.ctx.gateway.update_reminder(id, &req).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        tracing::info!("Deleting reminder: {}", id);

        let result = self.ctx.gateway.delete_reminder(id).await;
        report(
            self.ctx.notifier.as_ref(),
            result,
            "Lembrete excluído com sucesso!",
            "Erro ao excluir lembrete",
        )?;

        self.refresh().await;
        Ok(())
    }

    async fn refresh(&self) {
        if let Err(e) = self.load().await {
            tracing::error!("Error reloading reminders: {}", e);
            self.ctx.notifier.error(Section::Reminders.failure_message());
        }
    }
}
