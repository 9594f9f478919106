//! Terminal output
//!
//! Plain-text tables and the notifier used by the command-line front end.

use crate::gateway::{Category, Contact, Note, Reminder, Store};
use crate::services::dashboard::DashboardSnapshot;
use crate::services::notify::{NoticeLevel, Notifier};
use crate::services::temporal;
use crate::services::views::{ListView, NoteRow, NotesView, ReminderRow};
use std::fmt::Display;

const RULE_WIDTH: usize = 72;

/// Print a section header and separator.
pub fn section(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "─".repeat(RULE_WIDTH));
}

/// Print a simple key/value line.
pub fn key_value(label: &str, value: impl Display) {
    println!("{label:<18} {value}");
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

/// Prints notices as they happen
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Success => println!("✓ {message}"),
            NoticeLevel::Error => {
                tracing::debug!("Notice: {}", message);
                eprintln!("✗ {message}");
            }
        }
    }
}

/// Notes list printed as a table
#[derive(Debug, Default)]
pub struct NotesTable;

impl ListView<NoteRow> for NotesTable {
    fn render(&mut self, rows: &[NoteRow]) {
        section(&format!("Notas ({})", rows.len()));
        println!(
            "{:>5}  {:<28} {:<13} {:<18} {:<16} {}",
            "ID", "Título", "Status", "Categoria", "Loja", "Data"
        );
        for row in rows {
            println!(
                "{:>5}  {:<28} {:<13} {:<18} {:<16} {}",
                row.note.id,
                row.note.title,
                row.note.status.label(),
                row.category_label(),
                row.store_label(),
                temporal::format_date(row.note.note_date.as_deref()),
            );
        }
    }

    fn render_empty(&mut self) {
        section("Notas");
        println!("Nenhuma nota encontrada");
    }
}

impl NotesView for NotesTable {
    fn show_category_options(&mut self, categories: &[Category]) {
        let options: Vec<String> = categories
            .iter()
            .map(|c| format!("{} {}", c.id, c.name))
            .collect();
        println!("Categorias: {}", options.join(", "));
    }
}

/// Reminders list printed as a table
#[derive(Debug, Default)]
pub struct RemindersTable;

impl ListView<ReminderRow> for RemindersTable {
    fn render(&mut self, rows: &[ReminderRow]) {
        section(&format!("Lembretes ({})", rows.len()));
        println!(
            "{:>5}  {:<28} {:<17} {:<9} {}",
            "ID", "Título", "Data/Hora", "Status", "Nota"
        );
        for row in rows {
            println!(
                "{:>5}  {:<28} {:<17} {:<9} {}",
                row.reminder.id,
                row.reminder.title,
                temporal::format_date_time(row.reminder.trigger_at.as_deref()),
                row.status.label(),
                row.note_label(),
            );
        }
    }

    fn render_empty(&mut self) {
        section("Lembretes");
        println!("Nenhum lembrete encontrado");
    }
}

pub fn stores(stores: &[Store]) {
    section(&format!("Lojas ({})", stores.len()));
    if stores.is_empty() {
        println!("Nenhuma loja cadastrada");
        return;
    }
    for store in stores {
        println!(
            "{:>5}  {:<24} {:<32} {}",
            store.id,
            store.name,
            or_dash(store.address.as_deref()),
            or_dash(store.phone.as_deref()),
        );
    }
}

pub fn store(store: &Store) {
    section(&store.name);
    key_value("ID", store.id);
    key_value("Descrição", or_dash(store.description.as_deref()));
    key_value("Endereço", or_dash(store.address.as_deref()));
    key_value("Telefone", or_dash(store.phone.as_deref()));
    key_value("Criada em", temporal::format_date_time(store.created_at.as_deref()));
    key_value("Atualizada em", temporal::format_date_time(store.updated_at.as_deref()));
}

pub fn categories(categories: &[Category], store_name: impl Fn(Option<i64>) -> String) {
    section(&format!("Categorias ({})", categories.len()));
    if categories.is_empty() {
        println!("Nenhuma categoria encontrada");
        return;
    }
    for category in categories {
        println!(
            "{:>5}  {:<24} {:<20} {}",
            category.id,
            category.name,
            store_name(category.store_id),
            or_dash(category.description.as_deref()),
        );
    }
}

pub fn note(note: &Note, context: &str, reminders: &[Reminder]) {
    section(&note.title);
    key_value("ID", note.id);
    key_value("Status", note.status.label());
    key_value("Data", temporal::format_date(note.note_date.as_deref()));
    key_value("Contexto", context);
    key_value("Anotações", or_dash(note.body.as_deref()));
    key_value("Lembretes", reminders.len());
    for reminder in reminders {
        println!(
            "  - {} ({})",
            reminder.title,
            temporal::format_date_time(reminder.trigger_at.as_deref())
        );
    }
}

pub fn reminder(reminder: &Reminder, note_title: &str) {
    section(&reminder.title);
    key_value("ID", reminder.id);
    key_value(
        "Data/Hora",
        temporal::format_date_time(reminder.trigger_at.as_deref()),
    );
    key_value("Status", temporal::classify(reminder, temporal::now_local()).label());
    key_value("Nota", note_title);
    key_value("Descrição", or_dash(reminder.description.as_deref()));
}

pub fn contacts(contacts: &[Contact]) {
    section(&format!("Funcionários ({})", contacts.len()));
    if contacts.is_empty() {
        println!("Nenhum funcionário encontrado");
        return;
    }
    for contact in contacts {
        println!(
            "{:>5}  {:<24} {:<9} {:<13} {}",
            contact.id,
            contact.name,
            contact.registration_code,
            contact.role.label(),
            or_dash(contact.email.as_deref()),
        );
    }
}

pub fn contact(contact: &Contact) {
    section(&contact.name);
    key_value("ID", contact.id);
    key_value("Matrícula", &contact.registration_code);
    key_value("Cargo", contact.role.label());
    key_value("Telefone", or_dash(contact.phone.as_deref()));
    key_value("E-mail", or_dash(contact.email.as_deref()));
    key_value("Observações", or_dash(contact.notes.as_deref()));
    if let Some(store_id) = contact.owner_store_id() {
        key_value("Loja", store_id);
    }
}

pub fn dashboard(snapshot: &DashboardSnapshot) {
    let summary = &snapshot.summary;
    section("Resumo");
    key_value("Lojas", summary.total_stores);
    key_value("Categorias", summary.total_categories);
    key_value("Notas pendentes", summary.pending_notes);
    key_value("Lembretes ativos", summary.active_reminders);
    key_value("Lembretes próximos", summary.upcoming_reminders);

    section("Notas por status");
    for (label, pct) in snapshot.status_percentages() {
        key_value(label, format!("{pct}%"));
    }
    key_value("Total", snapshot.statistics.total);

    section("Últimas notas");
    if snapshot.activity.latest_notes.is_empty() {
        println!("Nenhuma nota recente");
    }
    for note in &snapshot.activity.latest_notes {
        println!(
            "  {} [{}] {}",
            temporal::format_date(note.note_date.as_deref()),
            note.status.label(),
            note.title
        );
    }

    section("Próximos lembretes");
    if snapshot.activity.upcoming_reminders.is_empty() {
        println!("Nenhum lembrete próximo");
    }
    for reminder in &snapshot.activity.upcoming_reminders {
        println!(
            "  {} {}",
            temporal::format_date_time(reminder.trigger_at.as_deref()),
            reminder.title
        );
    }
}
