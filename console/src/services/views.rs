//! View-facing rows and rendering capabilities
//!
//! Rows carry the cross-entity joins a list needs (names of owners, derived
//! status) so renderers never touch the entity store. Missing owners stay
//! `None` and render as a placeholder.

use crate::gateway::{Category, Note, Reminder};
use crate::services::temporal::{self, ReminderStatus};
use crate::storage::entity_store::{CATEGORY_NOT_FOUND, NOTE_NOT_FOUND, STORE_NOT_FOUND};
use crate::storage::EntityStore;
use chrono::NaiveDateTime;

/// A note joined with its category and store names
#[derive(Debug, Clone, PartialEq)]
pub struct NoteRow {
    pub note: Note,
    pub category_name: Option<String>,
    pub store_name: Option<String>,
}

impl NoteRow {
    pub fn category_label(&self) -> &str {
        self.category_name.as_deref().unwrap_or(CATEGORY_NOT_FOUND)
    }

    pub fn store_label(&self) -> &str {
        self.store_name.as_deref().unwrap_or(STORE_NOT_FOUND)
    }
}

/// A reminder joined with its note title and derived status
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderRow {
    pub reminder: Reminder,
    pub note_title: Option<String>,
    pub status: ReminderStatus,
}

impl ReminderRow {
    pub fn note_label(&self) -> &str {
        self.note_title.as_deref().unwrap_or(NOTE_NOT_FOUND)
    }
}

pub fn note_rows(notes: Vec<Note>, entities: &EntityStore) -> Vec<NoteRow> {
    notes
        .into_iter()
        .map(|note| NoteRow {
            category_name: entities.category_for_note(&note).map(|c| c.name.clone()),
            store_name: entities.store_for_note(&note).map(|s| s.name.clone()),
            note,
        })
        .collect()
}

pub fn reminder_rows(
    reminders: Vec<Reminder>,
    entities: &EntityStore,
    now: NaiveDateTime,
) -> Vec<ReminderRow> {
    reminders
        .into_iter()
        .map(|reminder| ReminderRow {
            note_title: reminder
                .note_id
                .and_then(|id| entities.note(id))
                .map(|n| n.title.clone()),
            status: temporal::classify(&reminder, now),
            reminder,
        })
        .collect()
}

/// Something that can show a list of rows
pub trait ListView<R>: Send {
    fn render(&mut self, rows: &[R]);

    /// Explicit "nothing found" state, distinct from a load failure
    fn render_empty(&mut self);
}

/// Notes list plus the category picker whose options depend on the store
pub trait NotesView: ListView<NoteRow> {
    fn show_category_options(&mut self, categories: &[Category]);
}

/// Dispatch to `render` or `render_empty`
pub fn show<R, V: ListView<R> + ?Sized>(view: &mut V, rows: &[R]) {
    if rows.is_empty() {
        view.render_empty();
    } else {
        view.render(rows);
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    /// View that keeps what it was asked to show
    pub struct RecordingView<R> {
        pub renders: Vec<(tokio::time::Instant, Vec<R>)>,
        pub empties: usize,
        pub category_options: Vec<Vec<i64>>,
    }

    impl<R> Default for RecordingView<R> {
        fn default() -> Self {
            Self {
                renders: Vec::new(),
                empties: 0,
                category_options: Vec::new(),
            }
        }
    }

    impl<R: Clone + Send> ListView<R> for RecordingView<R> {
        fn render(&mut self, rows: &[R]) {
            self.renders.push((tokio::time::Instant::now(), rows.to_vec()));
        }

        fn render_empty(&mut self) {
            self.empties += 1;
            self.renders.push((tokio::time::Instant::now(), Vec::new()));
        }
    }

    impl NotesView for RecordingView<NoteRow> {
        fn show_category_options(&mut self, categories: &[Category]) {
            self.category_options
                .push(categories.iter().map(|c| c.id).collect());
        }
    }
}
