//! Remote data gateway
//!
//! This module provides all backend access including:
//! - Wire model definitions
//! - The `DataGateway` trait every component talks to
//! - The reqwest-backed HTTP implementation

pub mod http;
pub mod models;

#[cfg(test)]
pub(crate) mod memory;

pub use http::HttpGateway;
pub use models::*;

use crate::error::Result;
use async_trait::async_trait;

/// Resource-oriented access to the backend.
///
/// Every call either returns parsed records or fails with an `AppError`;
/// nothing is retried and nothing touches the entity store.
#[async_trait]
pub trait DataGateway: Send + Sync {
    // ===== Stores =====
    async fn list_stores(&self) -> Result<Vec<Store>>;
    async fn get_store(&self, id: i64) -> Result<Store>;
    async fn create_store(&self, req: &StoreRequest) -> Result<Store>;
    async fn update_store(&self, id: i64, req: &StoreRequest) -> Result<Store>;
    async fn delete_store(&self, id: i64) -> Result<()>;

    // ===== Categories =====
    async fn list_categories(&self) -> Result<Vec<Category>>;
    async fn list_categories_by_store(&self, store_id: i64) -> Result<Vec<Category>>;
    async fn create_category(&self, req: &CategoryRequest) -> Result<Category>;
    async fn update_category(&self, id: i64, req: &CategoryRequest) -> Result<Category>;
    async fn delete_category(&self, id: i64) -> Result<()>;

    // ===== Notes =====
    async fn list_notes(&self) -> Result<Vec<Note>>;
    async fn get_note(&self, id: i64) -> Result<Note>;
    async fn list_notes_by_category(&self, category_id: i64) -> Result<Vec<Note>>;
    async fn list_notes_by_store(&self, store_id: i64) -> Result<Vec<Note>>;
    async fn list_notes_by_status(&self, status: NoteStatus) -> Result<Vec<Note>>;
    async fn search_notes(&self, text: &str) -> Result<Vec<Note>>;
    async fn create_note(&self, req: &NoteRequest) -> Result<Note>;
    async fn update_note(&self, id: i64, req: &NoteRequest) -> Result<Note>;
    async fn delete_note(&self, id: i64) -> Result<()>;

    // ===== Reminders =====
    async fn list_reminders(&self) -> Result<Vec<Reminder>>;
    async fn get_reminder(&self, id: i64) -> Result<Reminder>;
    async fn list_reminders_by_note(&self, note_id: i64) -> Result<Vec<Reminder>>;
    async fn list_upcoming_reminders(&self) -> Result<Vec<Reminder>>;
    async fn create_reminder(&self, req: &ReminderRequest) -> Result<Reminder>;
    async fn update_reminder(&self, id: i64, req: &ReminderRequest) -> Result<Reminder>;
    async fn delete_reminder(&self, id: i64) -> Result<()>;

    // ===== Contacts =====
    async fn list_contacts(&self) -> Result<Vec<Contact>>;
    async fn list_contacts_by_store(&self, store_id: i64) -> Result<Vec<Contact>>;
    async fn get_contact(&self, id: i64) -> Result<Contact>;
    async fn create_contact(&self, req: &ContactRequest) -> Result<Contact>;
    /// The contact id travels inside `req`.
    async fn update_contact(&self, req: &ContactRequest) -> Result<Contact>;
    async fn delete_contact(&self, id: i64) -> Result<()>;

    // ===== Dashboard =====
    async fn dashboard_summary(&self) -> Result<DashboardSummary>;
    async fn note_statistics(&self) -> Result<NoteStatistics>;
    async fn recent_activity(&self) -> Result<RecentActivity>;
}
