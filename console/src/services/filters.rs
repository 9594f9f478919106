//! Filter engine
//!
//! Pure reduction of a collection plus filter state into the visible subset.
//! Active predicates are combined with AND and evaluated in order, stopping
//! at the first one that fails. Inputs are only borrowed, so running the same
//! filters twice over the same data always yields the same rows.

use crate::config::ALL_SENTINEL;
use crate::gateway::{Contact, Note, NoteStatus, Reminder, Role, Store};
use crate::services::temporal::{self, ReminderStatus};
use crate::storage::EntityStore;
use chrono::NaiveDateTime;
use std::str::FromStr;

/// A single filter condition over `T`
pub type Predicate<'a, T> = Box<dyn Fn(&T) -> bool + Send + Sync + 'a>;

/// Keep the items satisfying every predicate, preserving input order
pub fn apply_filters<T: Clone>(collection: &[T], predicates: &[Predicate<'_, T>]) -> Vec<T> {
    collection
        .iter()
        .filter(|item| predicates.iter().all(|p| p(item)))
        .cloned()
        .collect()
}

/// Case-insensitive substring match on a primary field, or on a secondary
/// field when one is present. An absent secondary never matches.
pub fn text_matches(needle: &str, primary: &str, secondary: Option<&str>) -> bool {
    let needle = needle.to_lowercase();
    primary.to_lowercase().contains(&needle)
        || secondary.is_some_and(|s| s.to_lowercase().contains(&needle))
}

fn is_all(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || raw.eq_ignore_ascii_case(ALL_SENTINEL)
}

/// Parse a selector value where empty or "all" disables the filter
pub fn parse_choice<T: FromStr>(raw: &str) -> std::result::Result<Option<T>, T::Err> {
    if is_all(raw) {
        Ok(None)
    } else {
        raw.parse().map(Some)
    }
}

/// Foreign-key selector as it arrives from an input control.
///
/// Values are kept as entered and compared numerically, so `"3"` and `"03"`
/// both select id 3.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdSelector(Option<String>);

impl IdSelector {
    /// Selector that matches everything
    pub fn all() -> Self {
        Self(None)
    }

    pub fn from_input(raw: &str) -> Self {
        if is_all(raw) {
            Self(None)
        } else {
            Self(Some(raw.trim().to_string()))
        }
    }

    pub fn is_all(&self) -> bool {
        self.0.is_none()
    }

    pub fn as_str(&self) -> &str {
        self.0.as_deref().unwrap_or("")
    }

    /// Selected id as an integer, when the input is numeric
    pub fn id(&self) -> Option<i64> {
        let raw = self.0.as_deref()?;
        raw.parse::<i64>().ok().or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i64)
        })
    }

    /// True when disabled, or when `id` equals the selected value
    pub fn matches(&self, id: Option<i64>) -> bool {
        let Some(raw) = self.0.as_deref() else {
            return true;
        };
        match id {
            Some(id) => self.id() == Some(id) || id.to_string() == raw,
            None => false,
        }
    }
}

impl From<i64> for IdSelector {
    fn from(id: i64) -> Self {
        Self(Some(id.to_string()))
    }
}

impl From<Option<i64>> for IdSelector {
    fn from(id: Option<i64>) -> Self {
        id.map(Self::from).unwrap_or_default()
    }
}

// ===== Notes =====

/// Filter state of the notes view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilters {
    pub search: String,
    pub status: Option<NoteStatus>,
    pub category: IdSelector,
    pub store: IdSelector,
}

impl NoteFilters {
    /// Active predicates; the store predicate joins through `entities`
    pub fn predicates<'a>(&'a self, entities: &'a EntityStore) -> Vec<Predicate<'a, Note>> {
        let mut predicates: Vec<Predicate<'a, Note>> = Vec::new();

        if !self.search.is_empty() {
            predicates.push(Box::new(move |n: &Note| {
                text_matches(&self.search, &n.title, n.body.as_deref())
            }));
        }

        if let Some(status) = self.status {
            predicates.push(Box::new(move |n: &Note| n.status == status));
        }

        if !self.category.is_all() {
            predicates.push(Box::new(move |n: &Note| self.category.matches(n.category_id)));
        }

        if !self.store.is_all() {
            predicates.push(Box::new(move |n: &Note| {
                entities
                    .category_for_note(n)
                    .is_some_and(|c| self.store.matches(c.store_id))
            }));
        }

        predicates
    }

    pub fn apply(&self, notes: &[Note], entities: &EntityStore) -> Vec<Note> {
        apply_filters(notes, &self.predicates(entities))
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

// ===== Reminders =====

/// Status selector of the reminders view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReminderStatusFilter {
    #[default]
    All,
    Active,
    Inactive,
    Upcoming,
    Overdue,
}

impl ReminderStatusFilter {
    /// Upcoming and overdue only ever match active reminders
    pub fn matches(self, reminder: &Reminder, now: NaiveDateTime) -> bool {
        match self {
            ReminderStatusFilter::All => true,
            ReminderStatusFilter::Active => reminder.active,
            ReminderStatusFilter::Inactive => !reminder.active,
            ReminderStatusFilter::Upcoming => {
                temporal::classify(reminder, now) == ReminderStatus::Upcoming
            }
            ReminderStatusFilter::Overdue => {
                temporal::classify(reminder, now) == ReminderStatus::Overdue
            }
        }
    }
}

impl FromStr for ReminderStatusFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(ReminderStatusFilter::All),
            "active" | "ativo" => Ok(ReminderStatusFilter::Active),
            "inactive" | "inativo" => Ok(ReminderStatusFilter::Inactive),
            "upcoming" | "proximo" | "próximo" => Ok(ReminderStatusFilter::Upcoming),
            "overdue" | "atrasado" => Ok(ReminderStatusFilter::Overdue),
            other => Err(format!("Unknown reminder status '{}'", other)),
        }
    }
}

/// Filter state of the reminders view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderFilters {
    pub search: String,
    pub status: ReminderStatusFilter,
    pub note: IdSelector,
}

impl ReminderFilters {
    pub fn predicates<'a>(&'a self, now: NaiveDateTime) -> Vec<Predicate<'a, Reminder>> {
        let mut predicates: Vec<Predicate<'a, Reminder>> = Vec::new();

        if !self.search.is_empty() {
            predicates.push(Box::new(move |r: &Reminder| {
                text_matches(&self.search, &r.title, r.description.as_deref())
            }));
        }

        if self.status != ReminderStatusFilter::All {
            let status = self.status;
            predicates.push(Box::new(move |r: &Reminder| status.matches(r, now)));
        }

        if !self.note.is_all() {
            predicates.push(Box::new(move |r: &Reminder| self.note.matches(r.note_id)));
        }

        predicates
    }

    /// Filtered reminders, earliest trigger first
    pub fn apply(&self, reminders: &[Reminder], now: NaiveDateTime) -> Vec<Reminder> {
        let mut visible = apply_filters(reminders, &self.predicates(now));
        visible.sort_by(temporal::compare_by_trigger);
        visible
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

// ===== Stores =====

/// Filter state of the stores list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreFilters {
    pub search: String,
}

impl StoreFilters {
    pub fn predicates(&self) -> Vec<Predicate<'_, Store>> {
        let mut predicates: Vec<Predicate<'_, Store>> = Vec::new();
        let needle = self.search.trim();

        if !needle.is_empty() {
            predicates.push(Box::new(move |s: &Store| {
                text_matches(needle, &s.name, s.address.as_deref())
                    || s.description
                        .as_deref()
                        .is_some_and(|d| text_matches(needle, d, None))
            }));
        }

        predicates
    }

    pub fn apply(&self, stores: &[Store]) -> Vec<Store> {
        apply_filters(stores, &self.predicates())
    }
}

// ===== Contacts =====

/// Filter state for contact listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilters {
    pub search: String,
    pub role: Option<Role>,
    pub store: IdSelector,
}

impl ContactFilters {
    pub fn predicates(&self) -> Vec<Predicate<'_, Contact>> {
        let mut predicates: Vec<Predicate<'_, Contact>> = Vec::new();

        if !self.search.is_empty() {
            predicates.push(Box::new(move |c: &Contact| {
                text_matches(&self.search, &c.name, Some(&c.registration_code))
            }));
        }

        if let Some(role) = self.role {
            predicates.push(Box::new(move |c: &Contact| c.role == role));
        }

        if !self.store.is_all() {
            predicates.push(Box::new(move |c: &Contact| self.store.matches(c.owner_store_id())));
        }

        predicates
    }

    /// Filtered contacts, ordered by name
    pub fn apply(&self, contacts: &[Contact]) -> Vec<Contact> {
        let mut visible = apply_filters(contacts, &self.predicates());
        visible.sort_by_key(|c| c.name.to_lowercase());
        visible
    }
}
