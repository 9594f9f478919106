//! Notes service
//!
//! High-level business logic for notes operations.
//! The notes section needs stores and categories to resolve names, so a
//! load fetches all three together and applies nothing unless all succeed.

use crate::app::{AppContext, Section};
use crate::config::MAX_TITLE_LEN;
use crate::error::{AppError, Result, ValidationError};
use crate::gateway::{Note, NoteRequest, NoteStatus, Reminder};
use crate::services::notify::report;
use crate::services::{temporal, validation};
use crate::storage::EntityStore;

/// Note form as entered
#[derive(Debug, Clone, Default)]
pub struct NoteForm {
    pub title: String,
    pub body: Option<String>,
    /// Defaults to pending
    pub status: Option<NoteStatus>,
    pub note_date: Option<String>,
    pub category_id: Option<i64>,
}

impl NoteForm {
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            body: note.body.clone(),
            status: Some(note.status),
            note_date: note.note_date.clone(),
            category_id: note.category_id,
        }
    }

    pub fn validate(self) -> Result<NoteRequest> {
        let mut errors = ValidationError::new();
        let title = self.title.trim().to_string();

        validation::require(&mut errors, "titulo", Some(title.as_str()));
        validation::max_len(&mut errors, "titulo", Some(title.as_str()), MAX_TITLE_LEN);
        validation::require(&mut errors, "dataNota", self.note_date.as_deref());
        let note_date = self.note_date.as_deref().and_then(temporal::parse_timestamp);
        if self.note_date.as_deref().is_some_and(|d| !d.trim().is_empty()) && note_date.is_none() {
            errors.push("dataNota", "Data da nota inválida");
        }
        if self.category_id.is_none() {
            errors.push("categoriaId", "O campo categoriaId é obrigatório");
        }
        errors.into_result()?;

        let (Some(note_date), Some(category_id)) = (note_date, self.category_id) else {
            return Err(AppError::Generic("Incomplete note form".to_string()));
        };

        Ok(NoteRequest {
            title,
            note_date,
            body: validation::optional(self.body),
            status: self.status.unwrap_or(NoteStatus::Pending),
            category_id,
        })
    }
}

/// Service for managing notes
#[derive(Clone)]
pub struct NotesService {
    ctx: AppContext,
}

impl NotesService {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    /// Replace stores, categories and notes together
    pub async fn load(&self) -> Result<usize> {
        let gateway = self.ctx.gateway.as_ref();
        let (stores, categories, notes) = tokio::try_join!(
            gateway.list_stores(),
            gateway.list_categories(),
            gateway.list_notes(),
        )?;

        let count = notes.len();
        let mut entities = self.ctx.store.write().await;
        entities.replace_stores(stores);
        entities.replace_categories(categories);
        entities.replace_notes(notes);
        Ok(count)
    }

    /// Get a note by ID
    pub async fn get(&self, id: i64) -> Result<Note> {
        let result = self.ctx.gateway.get_note(id).await;
        if let Err(e) = &result {
            tracing::error!("Error loading note {}: {}", id, e);
            self.ctx.notifier.error("Erro ao carregar nota");
        }
        result
    }

    /// Server-side text search over title and body
    pub async fn search(&self, text: &str) -> Result<Vec<Note>> {
        let result = self.ctx.gateway.search_notes(text).await;
        if let Err(e) = &result {
            tracing::error!("Error searching notes for '{}': {}", text, e);
            self.ctx.notifier.error("Erro na pesquisa");
        }
        result
    }

    pub async fn by_status(&self, status: NoteStatus) -> Result<Vec<Note>> {
        let result = self.ctx.gateway.list_notes_by_status(status).await;
        if let Err(e) = &result {
            tracing::error!("Error filtering notes by {}: {}", status, e);
            self.ctx.notifier.error("Erro no filtro");
        }
        result
    }

    pub async fn by_category(&self, category_id: i64) -> Result<Vec<Note>> {
        let result = self.ctx.gateway.list_notes_by_category(category_id).await;
        if let Err(e) = &result {
            tracing::error!("Error loading notes of category {}: {}", category_id, e);
            self.ctx.notifier.error(Section::Notes.failure_message());
        }
        result
    }

    pub async fn by_store(&self, store_id: i64) -> Result<Vec<Note>> {
        let result = self.ctx.gateway.list_notes_by_store(store_id).await;
        if let Err(e) = &result {
            tracing::error!("Error loading notes of store {}: {}", store_id, e);
            self.ctx.notifier.error("Erro ao carregar notas da loja");
        }
        result
    }

    pub async fn reminders_for(&self, note_id: i64) -> Result<Vec<Reminder>> {
        let result = self.ctx.gateway.list_reminders_by_note(note_id).await;
        if let Err(e) = &result {
            tracing::error!("Error loading reminders of note {}: {}", note_id, e);
            self.ctx.notifier.error(Section::Reminders.failure_message());
        }
        result
    }

    /// Create a new note
    pub async fn create(&self, form: NoteForm) -> Result<Note> {
        tracing::info!("Creating new note: {}", form.title);

        let result = match form.validate() {
            Ok(req) => self.ctx.gateway.create_note(&req).await,
            Err(e) => Err(e),
        };
        let note = report(
            self.ctx.notifier.as_ref(),
            result,
            "Nota criada com sucesso!",
            "Erro ao salvar nota",
        )?;

        tracing::info!("Note created successfully: {}", note.id);
        self.refresh().await;
        Ok(note)
    }

    /// Update a note
    pub async fn update(&self, id: i64, form: NoteForm) -> Result<Note> {
        tracing::debug!("Updating note: {}", id);

        let result = match form.validate() {
            Ok(req) => self.ctx.gateway.update_note(id, &req).await,
            Err(e) => Err(e),
        };
        let note = report(
            self.ctx.notifier.as_ref(),
            result,
            "Nota atualizada com sucesso!",
            "Erro ao salvar nota",
        )?;

        tracing::debug!("Note updated successfully: {}", note.id);
        self.refresh().await;
        Ok(note)
    }

    /// Delete a note
    pub async fn delete(&self, id: i64) -> Result<()> {
        tracing::info!("Deleting note: {}", id);

        let result = self.ctx.gateway.delete_note(id).await;
        report(
            self.ctx.notifier.as_ref(),
            result,
            "Nota excluída com sucesso!",
            "Erro ao excluir nota",
        )?;

        tracing::info!("Note deleted successfully: {}", id);
        self.refresh().await;
        Ok(())
    }

    async fn refresh(&self) {
        if let Err(e) = self.load().await {
            tracing::error!("Error reloading notes: {}", e);
            self.ctx.notifier.error(Section::Notes.failure_message());
        }
    }
}

/// Picker entries for choosing a note, labelled with their store and category
pub fn note_options(entities: &EntityStore) -> Vec<(i64, String)> {
    entities
        .notes()
        .iter()
        .map(|n| (n.id, format!("{} ({})", n.title, entities.note_context_label(n))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::memory::MemoryGateway;
    use crate::services::notify::recording::RecordingNotifier;
    use crate::storage::entity_store::fixtures::*;
    use std::sync::Arc;

    fn create_test_service() -> (NotesService, Arc<MemoryGateway>, Arc<RecordingNotifier>) {
        let gateway = Arc::new(MemoryGateway::default());
        gateway.seed_stores(vec![store(1, "Centro")]);
        gateway.seed_categories(vec![category(10, "Estoque", 1)]);
        gateway.seed_notes(vec![
            note(100, "Contagem", NoteStatus::Pending, 10),
            note(101, "Vitrine", NoteStatus::Done, 10),
        ]);
        let notifier = Arc::new(RecordingNotifier::default());
        let ctx = AppContext::new(gateway.clone(), notifier.clone());
        (NotesService::new(ctx), gateway, notifier)
    }

    fn form(title: &str) -> NoteForm {
        NoteForm {
            title: title.to_string(),
            note_date: Some("2024-05-01".to_string()),
            category_id: Some(10),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_load_fills_all_three_snapshots() {
        let (service, _, _) = create_test_service();

        assert_eq!(service.load().await.unwrap(), 2);

        let entities = service.ctx.store.read().await;
        assert_eq!(entities.stores().len(), 1);
        assert_eq!(entities.categories().len(), 1);
        assert_eq!(
            note_options(&entities),
            vec![
                (100, "Contagem (Centro > Estoque)".to_string()),
                (101, "Vitrine (Centro > Estoque)".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_load_is_all_or_nothing() {
        let (service, gateway, _) = create_test_service();
        service.load().await.unwrap();

        gateway.seed_notes(vec![]);
        gateway.seed_stores(vec![]);
        gateway.fail_on("list_categories");

        assert!(service.load().await.is_err());
        let entities = service.ctx.store.read().await;
        assert_eq!(entities.stores().len(), 1);
        assert_eq!(entities.notes().len(), 2);
    }

    #[tokio::test]
    async fn test_create_defaults_to_pending_and_reloads() {
        let (service, _, notifier) = create_test_service();

        let created = service.create(form("Reposição")).await.unwrap();

        assert_eq!(created.status, NoteStatus::Pending);
        assert_eq!(service.ctx.store.read().await.notes().len(), 3);
        assert_eq!(notifier.successes(), vec!["Nota criada com sucesso!".to_string()]);
    }

    #[tokio::test]
    async fn test_invalid_note_is_rejected_locally() {
        let (service, gateway, _) = create_test_service();

        let err = service
            .create(NoteForm {
                title: "x".repeat(MAX_TITLE_LEN + 1),
                note_date: Some("ontem".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        match err {
            AppError::Validation(issues) => {
                assert!(issues.has("titulo"));
                assert!(issues.has("dataNota"));
                assert!(issues.has("categoriaId"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(gateway.call_count("create_note"), 0);
    }

    #[tokio::test]
    async fn test_update_keeps_fields_from_note() {
        let (service, _, _) = create_test_service();

        let mut edit = NoteForm::from_note(&note(100, "Contagem", NoteStatus::Pending, 10));
        edit.status = Some(NoteStatus::InProgress);
        let updated = service.update(100, edit).await.unwrap();

        assert_eq!(updated.title, "Contagem");
        assert_eq!(updated.status, NoteStatus::InProgress);
        assert_eq!(service.by_status(NoteStatus::InProgress).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_failure_notifies() {
        let (service, gateway, notifier) = create_test_service();
        assert_eq!(service.search("vitr").await.unwrap().len(), 1);

        gateway.fail_on("search_notes");
        assert!(service.search("vitr").await.is_err());
        assert_eq!(notifier.errors(), vec!["Erro na pesquisa".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_then_queries() {
        let (service, _, _) = create_test_service();

        service.delete(101).await.unwrap();

        assert_eq!(service.by_category(10).await.unwrap().len(), 1);
        assert_eq!(service.by_store(1).await.unwrap().len(), 1);
        assert!(service.reminders_for(100).await.unwrap().is_empty());
        assert!(service.get(101).await.is_err());
    }
}
