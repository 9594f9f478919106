//! Services module
//!
//! Business logic services that coordinate between front ends, the entity
//! store and the gateway.

pub mod categories;
pub mod contacts;
pub mod controller;
pub mod dashboard;
pub mod debounce;
pub mod filters;
pub mod notes;
pub mod notify;
pub mod reminders;
pub mod stores;
pub mod temporal;
pub mod validation;
pub mod views;

pub use categories::{CategoriesService, CategoryForm};
pub use contacts::{ContactForm, ContactsService};
pub use controller::{FilterController, FilterInput, NotesBinding, RemindersBinding};
pub use notes::{NoteForm, NotesService};
pub use reminders::{ReminderForm, RemindersService};
pub use stores::{StoreForm, StoresService};
