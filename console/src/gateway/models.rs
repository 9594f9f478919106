//! Wire models
//!
//! Rust structs mirroring the backend's JSON resources.
//! Field names follow the backend (`nome`, `lojaId`, ...) through serde renames.
//! Timestamps stay as the raw strings the backend sent; they are parsed
//! lazily by `services::temporal` so one malformed value never fails a list.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A retail location, root of the ownership hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "endereco", default)]
    pub address: Option<String>,
    #[serde(rename = "telefone", default)]
    pub phone: Option<String>,
    #[serde(rename = "dataCriacao", default)]
    pub created_at: Option<String>,
    #[serde(rename = "dataAtualizacao", default)]
    pub updated_at: Option<String>,
}

/// A grouping label scoped to one store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "lojaId", default)]
    pub store_id: Option<i64>,
    #[serde(rename = "dataCriacao", default)]
    pub created_at: Option<String>,
    #[serde(rename = "dataAtualizacao", default)]
    pub updated_at: Option<String>,
}

/// Workflow status of a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteStatus {
    #[serde(rename = "PENDENTE")]
    Pending,
    #[serde(rename = "EM_ANDAMENTO")]
    InProgress,
    #[serde(rename = "CONCLUIDO")]
    Done,
}

impl NoteStatus {
    pub const ALL: [NoteStatus; 3] = [NoteStatus::Pending, NoteStatus::InProgress, NoteStatus::Done];

    /// Backend enum constant, also used in `/notas/status/{status}`
    pub fn as_wire(self) -> &'static str {
        match self {
            NoteStatus::Pending => "PENDENTE",
            NoteStatus::InProgress => "EM_ANDAMENTO",
            NoteStatus::Done => "CONCLUIDO",
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            NoteStatus::Pending => "Pendente",
            NoteStatus::InProgress => "Em Andamento",
            NoteStatus::Done => "Concluído",
        }
    }
}

impl FromStr for NoteStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "PENDENTE" | "PENDING" => Ok(NoteStatus::Pending),
            "EM_ANDAMENTO" | "IN_PROGRESS" => Ok(NoteStatus::InProgress),
            "CONCLUIDO" | "DONE" => Ok(NoteStatus::Done),
            other => Err(format!("Unknown note status '{}'", other)),
        }
    }
}

impl fmt::Display for NoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// A dated text record belonging to a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "anotacoes", default)]
    pub body: Option<String>,
    pub status: NoteStatus,
    #[serde(rename = "dataNota", default)]
    pub note_date: Option<String>,
    #[serde(rename = "categoriaId", default)]
    pub category_id: Option<i64>,
    #[serde(rename = "dataCriacao", default)]
    pub created_at: Option<String>,
    #[serde(rename = "dataAtualizacao", default)]
    pub updated_at: Option<String>,
}

/// A future-dated alert attached to a note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "dataHoraLembrete", default)]
    pub trigger_at: Option<String>,
    #[serde(rename = "ativo", default)]
    pub active: bool,
    #[serde(rename = "notificado", default)]
    pub notified: bool,
    #[serde(rename = "notaId", default)]
    pub note_id: Option<i64>,
    #[serde(rename = "dataCriacao", default)]
    pub created_at: Option<String>,
    #[serde(rename = "dataAtualizacao", default)]
    pub updated_at: Option<String>,
}

/// Staff role of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "GERENTE")]
    Manager,
    #[serde(rename = "PROPRIETARIO")]
    Owner,
    #[serde(rename = "VENDEDOR")]
    Salesperson,
}

impl Role {
    pub fn as_wire(self) -> &'static str {
        match self {
            Role::Manager => "GERENTE",
            Role::Owner => "PROPRIETARIO",
            Role::Salesperson => "VENDEDOR",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Manager => "Gerente",
            Role::Owner => "Proprietário",
            Role::Salesperson => "Vendedor",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GERENTE" | "MANAGER" => Ok(Role::Manager),
            "PROPRIETARIO" | "OWNER" => Ok(Role::Owner),
            "VENDEDOR" | "SALESPERSON" => Ok(Role::Salesperson),
            other => Err(format!("Unknown role '{}'", other)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Reference to a store by id, as the contacts resource nests it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRef {
    pub id: i64,
}

/// A staff member record belonging to a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "matricula")]
    pub registration_code: String,
    #[serde(rename = "cargo")]
    pub role: Role,
    #[serde(rename = "telefone", default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "observacoes", default)]
    pub notes: Option<String>,
    #[serde(rename = "lojaId", default)]
    pub store_id: Option<i64>,
    #[serde(rename = "loja", default, skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreRef>,
}

impl Contact {
    /// Owning store id, whether sent flat or nested
    pub fn owner_store_id(&self) -> Option<i64> {
        self.store_id.or(self.store.map(|s| s.id))
    }
}

/// Create or update store request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreRequest {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "endereco", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "telefone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Create or update category request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryRequest {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "lojaId")]
    pub store_id: i64,
}

/// Create or update note request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteRequest {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "dataNota")]
    pub note_date: NaiveDateTime,
    #[serde(rename = "anotacoes", skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub status: NoteStatus,
    #[serde(rename = "categoriaId")]
    pub category_id: i64,
}

/// Create or update reminder request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderRequest {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "dataHoraLembrete")]
    pub trigger_at: NaiveDateTime,
    #[serde(rename = "ativo")]
    pub active: bool,
    #[serde(rename = "notaId")]
    pub note_id: i64,
}

/// Create or update contact request. Updates carry the id in the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "matricula")]
    pub registration_code: String,
    #[serde(rename = "cargo")]
    pub role: Role,
    #[serde(rename = "telefone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "observacoes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "loja")]
    pub store: StoreRef,
}

/// Headline counters for the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(rename = "totalLojas", default)]
    pub total_stores: i64,
    #[serde(rename = "totalCategorias", default)]
    pub total_categories: i64,
    #[serde(rename = "notasPendentes", default)]
    pub pending_notes: i64,
    #[serde(rename = "lembretesAtivos", default)]
    pub active_reminders: i64,
    #[serde(rename = "lembretesProximos", default)]
    pub upcoming_reminders: i64,
}

/// Note counts per status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteStatistics {
    #[serde(rename = "pendentes", default)]
    pub pending: i64,
    #[serde(rename = "emAndamento", default)]
    pub in_progress: i64,
    #[serde(rename = "concluidas", default)]
    pub done: i64,
    #[serde(default)]
    pub total: i64,
}

/// Latest notes and the reminders coming up next
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    #[serde(rename = "ultimasNotas", default)]
    pub latest_notes: Vec<Note>,
    #[serde(rename = "proximosLembretes", default)]
    pub upcoming_reminders: Vec<Reminder>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_note_from_backend_json() {
        let note: Note = serde_json::from_value(json!({
            "id": 4,
            "titulo": "Inventário",
            "anotacoes": null,
            "status": "EM_ANDAMENTO",
            "dataNota": "2024-05-01T00:00:00",
            "categoriaId": 2
        }))
        .unwrap();

        assert_eq!(note.status, NoteStatus::InProgress);
        assert_eq!(note.category_id, Some(2));
        assert!(note.body.is_none());
        assert!(note.created_at.is_none());
    }

    #[test]
    fn test_reminder_tolerates_missing_trigger() {
        let reminder: Reminder = serde_json::from_value(json!({
            "id": 1,
            "titulo": "Ligar fornecedor",
            "ativo": true
        }))
        .unwrap();

        assert!(reminder.trigger_at.is_none());
        assert!(!reminder.notified);
        assert!(reminder.note_id.is_none());
    }

    #[test]
    fn test_contact_request_nests_store() {
        let req = ContactRequest {
            id: None,
            name: "Ana".to_string(),
            registration_code: "T1234567".to_string(),
            role: Role::Manager,
            phone: None,
            email: Some("ana@loja.com".to_string()),
            notes: None,
            store: StoreRef { id: 3 },
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["loja"]["id"], 3);
        assert_eq!(value["cargo"], "GERENTE");
        assert!(value.get("id").is_none());
        assert!(value.get("telefone").is_none());
    }

    #[test]
    fn test_contact_store_id_from_nested_reference() {
        let contact: Contact = serde_json::from_value(json!({
            "id": 9,
            "nome": "Rui",
            "matricula": "T7654321",
            "cargo": "VENDEDOR",
            "loja": { "id": 5 }
        }))
        .unwrap();

        assert_eq!(contact.owner_store_id(), Some(5));
    }

    #[test]
    fn test_status_and_role_parse_both_vocabularies() {
        assert_eq!("pending".parse::<NoteStatus>().unwrap(), NoteStatus::Pending);
        assert_eq!("EM_ANDAMENTO".parse::<NoteStatus>().unwrap(), NoteStatus::InProgress);
        assert_eq!("in-progress".parse::<NoteStatus>().unwrap(), NoteStatus::InProgress);
        assert!("archived".parse::<NoteStatus>().is_err());

        assert_eq!("owner".parse::<Role>().unwrap(), Role::Owner);
        assert_eq!("GERENTE".parse::<Role>().unwrap(), Role::Manager);
    }

    #[test]
    fn test_activity_defaults_when_sections_missing() {
        let activity: RecentActivity = serde_json::from_value(json!({})).unwrap();
        assert!(activity.latest_notes.is_empty());
        assert!(activity.upcoming_reminders.is_empty());

        let summary: DashboardSummary =
            serde_json::from_value(json!({ "totalLojas": 3 })).unwrap();
        assert_eq!(summary.total_stores, 3);
        assert_eq!(summary.pending_notes, 0);
    }
}
