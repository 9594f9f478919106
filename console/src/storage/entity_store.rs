//! In-memory entity store
//!
//! Holds the last successfully fetched snapshot of each collection and the
//! current Store/Category/Note selection. Snapshots are replaced wholesale;
//! nothing here merges or patches records.

use crate::gateway::{Category, Contact, Note, Reminder, Store};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Entity store shared between the context owner and its components
pub type SharedStore = Arc<RwLock<EntityStore>>;

/// Placeholder shown when a note's store cannot be resolved
pub const STORE_NOT_FOUND: &str = "Loja não encontrada";
/// Placeholder shown when a note's category cannot be resolved
pub const CATEGORY_NOT_FOUND: &str = "Categoria não encontrada";
/// Placeholder shown when a reminder's note cannot be resolved
pub const NOTE_NOT_FOUND: &str = "Nota não encontrada";
/// Placeholder for a note whose store/category chain is broken
pub const CONTEXT_NOT_FOUND: &str = "Contexto não encontrado";

#[derive(Debug, Default, Clone)]
pub struct EntityStore {
    stores: Vec<Store>,
    categories: Vec<Category>,
    notes: Vec<Note>,
    reminders: Vec<Reminder>,
    contacts: Vec<Contact>,
    current_store: Option<i64>,
    current_category: Option<i64>,
    current_note: Option<i64>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an empty store for sharing
    pub fn shared() -> SharedStore {
        Arc::new(RwLock::new(Self::new()))
    }

    // ===== Snapshots =====

    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn replace_stores(&mut self, stores: Vec<Store>) {
        tracing::debug!("Replacing stores snapshot ({} records)", stores.len());
        self.stores = stores;
    }

    pub fn replace_categories(&mut self, categories: Vec<Category>) {
        tracing::debug!("Replacing categories snapshot ({} records)", categories.len());
        self.categories = categories;
    }

    pub fn replace_notes(&mut self, notes: Vec<Note>) {
        tracing::debug!("Replacing notes snapshot ({} records)", notes.len());
        self.notes = notes;
    }

    pub fn replace_reminders(&mut self, reminders: Vec<Reminder>) {
        tracing::debug!("Replacing reminders snapshot ({} records)", reminders.len());
        self.reminders = reminders;
    }

    pub fn replace_contacts(&mut self, contacts: Vec<Contact>) {
        tracing::debug!("Replacing contacts snapshot ({} records)", contacts.len());
        self.contacts = contacts;
    }

    // ===== Lookups =====

    pub fn store(&self, id: i64) -> Option<&Store> {
        self.stores.iter().find(|s| s.id == id)
    }

    pub fn category(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn note(&self, id: i64) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Category a note points at, if it is still known
    pub fn category_for_note(&self, note: &Note) -> Option<&Category> {
        note.category_id.and_then(|id| self.category(id))
    }

    /// Store reached through note -> category -> store
    pub fn store_for_note(&self, note: &Note) -> Option<&Store> {
        self.category_for_note(note)
            .and_then(|c| c.store_id)
            .and_then(|id| self.store(id))
    }

    /// `Store > Category` label for pickers, or a placeholder
    pub fn note_context_label(&self, note: &Note) -> String {
        match (self.store_for_note(note), self.category_for_note(note)) {
            (Some(store), Some(category)) => format!("{} > {}", store.name, category.name),
            _ => CONTEXT_NOT_FOUND.to_string(),
        }
    }

    // ===== Selection =====

    pub fn current_store(&self) -> Option<&Store> {
        self.current_store.and_then(|id| self.store(id))
    }

    pub fn current_category(&self) -> Option<&Category> {
        self.current_category.and_then(|id| self.category(id))
    }

    pub fn current_note(&self) -> Option<&Note> {
        self.current_note.and_then(|id| self.note(id))
    }

    pub fn select_store(&mut self, id: Option<i64>) {
        self.current_store = id;
    }

    pub fn select_category(&mut self, id: Option<i64>) {
        self.current_category = id;
    }

    pub fn select_note(&mut self, id: Option<i64>) {
        self.current_note = id;
    }
}
