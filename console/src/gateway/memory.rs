//! In-memory gateway for unit tests
//!
//! Behaves like a tiny backend: ids are assigned on create, lists come back
//! in insertion order. Individual operations can be made to fail or to
//! respond late.

use super::models::*;
use super::DataGateway;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
struct Data {
    stores: Vec<Store>,
    categories: Vec<Category>,
    notes: Vec<Note>,
    reminders: Vec<Reminder>,
    contacts: Vec<Contact>,
    summary: DashboardSummary,
    statistics: NoteStatistics,
    activity: RecentActivity,
    next_id: i64,
}

impl Data {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        1000 + self.next_id
    }
}

#[derive(Default)]
pub struct MemoryGateway {
    data: Mutex<Data>,
    failing: Mutex<HashSet<&'static str>>,
    category_delays: Mutex<HashMap<i64, Duration>>,
    calls: Mutex<Vec<String>>,
}

impl MemoryGateway {
    pub fn seed_stores(&self, stores: Vec<Store>) {
        self.data.lock().unwrap().stores = stores;
    }

    pub fn seed_categories(&self, categories: Vec<Category>) {
        self.data.lock().unwrap().categories = categories;
    }

    pub fn seed_notes(&self, notes: Vec<Note>) {
        self.data.lock().unwrap().notes = notes;
    }

    pub fn seed_reminders(&self, reminders: Vec<Reminder>) {
        self.data.lock().unwrap().reminders = reminders;
    }

    pub fn seed_contacts(&self, contacts: Vec<Contact>) {
        self.data.lock().unwrap().contacts = contacts;
    }

    pub fn seed_dashboard(&self, summary: DashboardSummary, statistics: NoteStatistics) {
        let mut data = self.data.lock().unwrap();
        data.summary = summary;
        data.statistics = statistics;
    }

    /// Make every later call to `op` fail with a 500
    pub fn fail_on(&self, op: &'static str) {
        self.failing.lock().unwrap().insert(op);
    }

    /// Delay `list_categories_by_store` for one store
    pub fn delay_categories_for(&self, store_id: i64, delay: Duration) {
        self.category_delays.lock().unwrap().insert(store_id, delay);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls whose name starts with `op`
    pub fn call_count(&self, op: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(op))
            .count()
    }

    fn enter(&self, op: &'static str, detail: impl std::fmt::Display) -> Result<()> {
        self.calls.lock().unwrap().push(format!("{} {}", op, detail));
        if self.failing.lock().unwrap().contains(op) {
            return Err(AppError::Transport { status: 500 });
        }
        Ok(())
    }

    fn not_found(entity: &'static str, id: i64) -> AppError {
        tracing::debug!("{} {} missing in memory gateway", entity, id);
        AppError::Transport { status: 404 }
    }
}

fn store_from(id: i64, req: &StoreRequest) -> Store {
    Store {
        id,
        name: req.name.clone(),
        description: req.description.clone(),
        address: req.address.clone(),
        phone: req.phone.clone(),
        created_at: None,
        updated_at: None,
    }
}

fn category_from(id: i64, req: &CategoryRequest) -> Category {
    Category {
        id,
        name: req.name.clone(),
        description: req.description.clone(),
        store_id: Some(req.store_id),
        created_at: None,
        updated_at: None,
    }
}

fn note_from(id: i64, req: &NoteRequest) -> Note {
    Note {
        id,
        title: req.title.clone(),
        body: req.body.clone(),
        status: req.status,
        note_date: Some(req.note_date.format("%Y-%m-%dT%H:%M:%S").to_string()),
        category_id: Some(req.category_id),
        created_at: None,
        updated_at: None,
    }
}

fn reminder_from(id: i64, req: &ReminderRequest) -> Reminder {
    Reminder {
        id,
        title: req.title.clone(),
        description: req.description.clone(),
        trigger_at: Some(req.trigger_at.format("%Y-%m-%dT%H:%M:%S").to_string()),
        active: req.active,
        notified: false,
        note_id: Some(req.note_id),
        created_at: None,
        updated_at: None,
    }
}

fn contact_from(id: i64, req: &ContactRequest) -> Contact {
    Contact {
        id,
        name: req.name.clone(),
        registration_code: req.registration_code.clone(),
        role: req.role,
        phone: req.phone.clone(),
        email: req.email.clone(),
        notes: req.notes.clone(),
        store_id: Some(req.store.id),
        store: None,
    }
}

/// Replace the record with `id` in `list`, or report it missing
fn replace<T: Clone>(list: &mut [T], id: i64, get_id: impl Fn(&T) -> i64, value: T) -> Option<T> {
    let slot = list.iter_mut().find(|x| get_id(x) == id)?;
    *slot = value.clone();
    Some(value)
}

fn remove<T>(list: &mut Vec<T>, id: i64, get_id: impl Fn(&T) -> i64) -> bool {
    let before = list.len();
    list.retain(|x| get_id(x) != id);
    list.len() != before
}

#[async_trait]
impl DataGateway for MemoryGateway {
    async fn list_stores(&self) -> Result<Vec<Store>> {
        self.enter("list_stores", "")?;
        Ok(self.data.lock().unwrap().stores.clone())
    }

    async fn get_store(&self, id: i64) -> Result<Store> {
        self.enter("get_store", id)?;
        let data = self.data.lock().unwrap();
        data.stores
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("Store", id))
    }

    async fn create_store(&self, req: &StoreRequest) -> Result<Store> {
        self.enter("create_store", &req.name)?;
        let mut data = self.data.lock().unwrap();
        let store = store_from(data.next_id(), req);
        data.stores.push(store.clone());
        Ok(store)
    }

    async fn update_store(&self, id: i64, req: &StoreRequest) -> Result<Store> {
        self.enter("update_store", id)?;
        let mut data = self.data.lock().unwrap();
        replace(&mut data.stores, id, |s| s.id, store_from(id, req))
            .ok_or_else(|| Self::not_found("Store", id))
    }

    async fn delete_store(&self, id: i64) -> Result<()> {
        self.enter("delete_store", id)?;
        let mut data = self.data.lock().unwrap();
        if remove(&mut data.stores, id, |s| s.id) {
            Ok(())
        } else {
            Err(Self::not_found("Store", id))
        }
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.enter("list_categories", "")?;
        Ok(self.data.lock().unwrap().categories.clone())
    }

    async fn list_categories_by_store(&self, store_id: i64) -> Result<Vec<Category>> {
        self.enter("list_categories_by_store", store_id)?;
        let delay = self.category_delays.lock().unwrap().get(&store_id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let data = self.data.lock().unwrap();
        Ok(data
            .categories
            .iter()
            .filter(|c| c.store_id == Some(store_id))
            .cloned()
            .collect())
    }

    async fn create_category(&self, req: &CategoryRequest) -> Result<Category> {
        self.enter("create_category", &req.name)?;
        let mut data = self.data.lock().unwrap();
        let category = category_from(data.next_id(), req);
        data.categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(&self, id: i64, req: &CategoryRequest) -> Result<Category> {
        self.enter("update_category", id)?;
        let mut data = self.data.lock().unwrap();
        replace(&mut data.categories, id, |c| c.id, category_from(id, req))
            .ok_or_else(|| Self::not_found("Category", id))
    }

    async fn delete_category(&self, id: i64) -> Result<()> {
        self.enter("delete_category", id)?;
        let mut data = self.data.lock().unwrap();
        if remove(&mut data.categories, id, |c| c.id) {
            Ok(())
        } else {
            Err(Self::not_found("Category", id))
        }
    }

    async fn list_notes(&self) -> Result<Vec<Note>> {
        self.enter("list_notes", "")?;
        Ok(self.data.lock().unwrap().notes.clone())
    }

    async fn get_note(&self, id: i64) -> Result<Note> {
        self.enter("get_note", id)?;
        let data = self.data.lock().unwrap();
        data.notes
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("Note", id))
    }

    async fn list_notes_by_category(&self, category_id: i64) -> Result<Vec<Note>> {
        self.enter("list_notes_by_category", category_id)?;
        let data = self.data.lock().unwrap();
        Ok(data
            .notes
            .iter()
            .filter(|n| n.category_id == Some(category_id))
            .cloned()
            .collect())
    }

    async fn list_notes_by_store(&self, store_id: i64) -> Result<Vec<Note>> {
        self.enter("list_notes_by_store", store_id)?;
        let data = self.data.lock().unwrap();
        let category_ids: Vec<i64> = data
            .categories
            .iter()
            .filter(|c| c.store_id == Some(store_id))
            .map(|c| c.id)
            .collect();
        Ok(data
            .notes
            .iter()
            .filter(|n| n.category_id.is_some_and(|id| category_ids.contains(&id)))
            .cloned()
            .collect())
    }

    async fn list_notes_by_status(&self, status: NoteStatus) -> Result<Vec<Note>> {
        self.enter("list_notes_by_status", status)?;
        let data = self.data.lock().unwrap();
        Ok(data.notes.iter().filter(|n| n.status == status).cloned().collect())
    }

    async fn search_notes(&self, text: &str) -> Result<Vec<Note>> {
        self.enter("search_notes", text)?;
        let needle = text.to_lowercase();
        let data = self.data.lock().unwrap();
        Ok(data
            .notes
            .iter()
            .filter(|n| {
                n.title.to_lowercase().contains(&needle)
                    || n.body.as_deref().is_some_and(|b| b.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    async fn create_note(&self, req: &NoteRequest) -> Result<Note> {
        self.enter("create_note", &req.title)?;
        let mut data = self.data.lock().unwrap();
        let note = note_from(data.next_id(), req);
        data.notes.push(note.clone());
        Ok(note)
    }

    async fn update_note(&self, id: i64, req: &NoteRequest) -> Result<Note> {
        self.enter("update_note", id)?;
        let mut data = self.data.lock().unwrap();
        replace(&mut data.notes, id, |n| n.id, note_from(id, req))
            .ok_or_else(|| Self::not_found("Note", id))
    }

    async fn delete_note(&self, id: i64) -> Result<()> {
        self.enter("delete_note", id)?;
        let mut data = self.data.lock().unwrap();
        if remove(&mut data.notes, id, |n| n.id) {
            Ok(())
        } else {
            Err(Self::not_found("Note", id))
        }
    }

    async fn list_reminders(&self) -> Result<Vec<Reminder>> {
        self.enter("list_reminders", "")?;
        Ok(self.data.lock().unwrap().reminders.clone())
    }

    async fn get_reminder(&self, id: i64) -> Result<Reminder> {
        self.enter("get_reminder", id)?;
        let data = self.data.lock().unwrap();
        data.reminders
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("Reminder", id))
    }

    async fn list_reminders_by_note(&self, note_id: i64) -> Result<Vec<Reminder>> {
        self.enter("list_reminders_by_note", note_id)?;
        let data = self.data.lock().unwrap();
        Ok(data
            .reminders
            .iter()
            .filter(|r| r.note_id == Some(note_id))
            .cloned()
            .collect())
    }

    async fn list_upcoming_reminders(&self) -> Result<Vec<Reminder>> {
        self.enter("list_upcoming_reminders", "")?;
        let data = self.data.lock().unwrap();
        Ok(data.reminders.iter().filter(|r| r.active).cloned().collect())
    }

    async fn create_reminder(&self, req: &ReminderRequest) -> Result<Reminder> {
        self.enter("create_reminder", &req.title)?;
        let mut data = self.data.lock().unwrap();
        let reminder = reminder_from(data.next_id(), req);
        data.reminders.push(reminder.clone());
        Ok(reminder)
    }

    async fn update_reminder(&self, id: i64, req: &ReminderRequest) -> Result<Reminder> {
        self.enter("update_reminder", id)?;
        let mut data = self.data.lock().unwrap();
        replace(&mut data.reminders, id, |r| r.id, reminder_from(id, req))
            .ok_or_else(|| Self::not_found("Reminder", id))
    }

    async fn delete_reminder(&self, id: i64) -> Result<()> {
        self.enter("delete_reminder", id)?;
        let mut data = self.data.lock().unwrap();
        if remove(&mut data.reminders, id, |r| r.id) {
            Ok(())
        } else {
            Err(Self::not_found("Reminder", id))
        }
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>> {
        self.enter("list_contacts", "")?;
        Ok(self.data.lock().unwrap().contacts.clone())
    }

    async fn list_contacts_by_store(&self, store_id: i64) -> Result<Vec<Contact>> {
        self.enter("list_contacts_by_store", store_id)?;
        let data = self.data.lock().unwrap();
        Ok(data
            .contacts
            .iter()
            .filter(|c| c.owner_store_id() == Some(store_id))
            .cloned()
            .collect())
    }

    async fn get_contact(&self, id: i64) -> Result<Contact> {
        self.enter("get_contact", id)?;
        let data = self.data.lock().unwrap();
        data.contacts
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("Contact", id))
    }

    async fn create_contact(&self, req: &ContactRequest) -> Result<Contact> {
        self.enter("create_contact", &req.name)?;
        let mut data = self.data.lock().unwrap();
        let contact = contact_from(data.next_id(), req);
        data.contacts.push(contact.clone());
        Ok(contact)
    }

    async fn update_contact(&self, req: &ContactRequest) -> Result<Contact> {
        let id = req
            .id
            .ok_or_else(|| AppError::Generic("Contact id is required for update".to_string()))?;
        self.enter("update_contact", id)?;
        let mut data = self.data.lock().unwrap();
        replace(&mut data.contacts, id, |c| c.id, contact_from(id, req))
            .ok_or_else(|| Self::not_found("Contact", id))
    }

    async fn delete_contact(&self, id: i64) -> Result<()> {
        self.enter("delete_contact", id)?;
        let mut data = self.data.lock().unwrap();
        if remove(&mut data.contacts, id, |c| c.id) {
            Ok(())
        } else {
            Err(Self::not_found("Contact", id))
        }
    }

    async fn dashboard_summary(&self) -> Result<DashboardSummary> {
        self.enter("dashboard_summary", "")?;
        Ok(self.data.lock().unwrap().summary.clone())
    }

    async fn note_statistics(&self) -> Result<NoteStatistics> {
        self.enter("note_statistics", "")?;
        Ok(self.data.lock().unwrap().statistics.clone())
    }

    async fn recent_activity(&self) -> Result<RecentActivity> {
        self.enter("recent_activity", "")?;
        Ok(self.data.lock().unwrap().activity.clone())
    }
}
