//! Application context and initialization
//!
//! This module owns the central application context: the shared entity
//! store, the gateway and the notifier. The top-level controller builds one
//! `AppContext` at startup and hands clones to every service.

use crate::config::ConsoleConfig;
use crate::error::Result;
use crate::gateway::{DataGateway, HttpGateway};
use crate::services::dashboard::{self, DashboardSnapshot};
use crate::services::notify::{Notifier, SharedNotifier};
use crate::services::{ContactsService, NotesService, RemindersService, StoresService};
use crate::storage::{EntityStore, SharedStore};
use std::sync::Arc;

/// Central application context holding shared collaborators
#[derive(Clone)]
pub struct AppContext {
    pub store: SharedStore,
    pub gateway: Arc<dyn DataGateway>,
    pub notifier: SharedNotifier,
}

impl AppContext {
    pub fn new(gateway: Arc<dyn DataGateway>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store: EntityStore::shared(),
            gateway,
            notifier,
        }
    }

    /// Load the data a section shows.
    ///
    /// Failures are logged and reported through the notifier, and the
    /// previous snapshots stay in place.
    pub async fn load_section(&self, section: Section) -> Result<SectionData> {
        tracing::info!("Loading section {:?}", section);

        let result = match section {
            Section::Dashboard => dashboard::load_dashboard(self.gateway.as_ref())
                .await
                .map(|snapshot| SectionData::Dashboard(Box::new(snapshot))),
            Section::Stores => StoresService::new(self.clone())
                .load()
                .await
                .map(SectionData::Stores),
            Section::Notes => NotesService::new(self.clone())
                .load()
                .await
                .map(SectionData::Notes),
            Section::Reminders => RemindersService::new(self.clone())
                .load()
                .await
                .map(SectionData::Reminders),
            Section::Contacts => ContactsService::new(self.clone())
                .load()
                .await
                .map(SectionData::Contacts),
        };

        if let Err(e) = &result {
            tracing::error!("Error loading {:?}: {}", section, e);
            self.notifier.error(section.failure_message());
        }

        result
    }
}

/// Top-level sections of the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Dashboard,
    Stores,
    Notes,
    Reminders,
    Contacts,
}

impl Section {
    pub fn failure_message(self) -> &'static str {
        match self {
            Section::Dashboard => "Erro ao carregar dashboard",
            Section::Stores => "Erro ao carregar lojas",
            Section::Notes => "Erro ao carregar notas",
            Section::Reminders => "Erro ao carregar lembretes",
            Section::Contacts => "Erro ao carregar contatos",
        }
    }
}

/// What a section load produced
#[derive(Debug, Clone)]
pub enum SectionData {
    Dashboard(Box<DashboardSnapshot>),
    /// Number of stores now in the snapshot
    Stores(usize),
    /// Number of notes now in the snapshot
    Notes(usize),
    /// Number of reminders now in the snapshot
    Reminders(usize),
    /// Number of contacts now in the snapshot
    Contacts(usize),
}

/// Application setup - called once on startup
pub fn setup(config: &ConsoleConfig, notifier: SharedNotifier) -> Result<AppContext> {
    tracing::info!("Initializing console against {}", config.base_url);

    let gateway = HttpGateway::new(config)?;
    let context = AppContext::new(Arc::new(gateway), notifier);

    tracing::info!("Console initialized successfully");

    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::memory::MemoryGateway;
    use crate::services::notify::recording::RecordingNotifier;
    use crate::services::notify::LogNotifier;
    use crate::storage::entity_store::fixtures::*;

    #[tokio::test]
    async fn test_failed_load_keeps_snapshot_and_notifies() {
        let gateway = Arc::new(MemoryGateway::default());
        gateway.seed_stores(vec![store(1, "Centro")]);
        let notifier = Arc::new(RecordingNotifier::default());
        let ctx = AppContext::new(gateway.clone(), notifier.clone());

        let loaded = ctx.load_section(Section::Stores).await.unwrap();
        assert!(matches!(loaded, SectionData::Stores(1)));

        gateway.fail_on("list_stores");
        assert!(ctx.load_section(Section::Stores).await.is_err());

        assert_eq!(ctx.store.read().await.stores().len(), 1);
        assert_eq!(notifier.errors(), vec!["Erro ao carregar lojas".to_string()]);
    }

    #[tokio::test]
    async fn test_every_section_loads() {
        let gateway = Arc::new(MemoryGateway::default());
        let ctx = AppContext::new(gateway, Arc::new(LogNotifier));

        for section in [
            Section::Dashboard,
            Section::Stores,
            Section::Notes,
            Section::Reminders,
            Section::Contacts,
        ] {
            assert!(ctx.load_section(section).await.is_ok(), "{:?}", section);
        }
    }

    #[test]
    fn test_setup_builds_http_context() {
        let config = ConsoleConfig::default();
        let ctx = setup(&config, Arc::new(LogNotifier)).unwrap();
        assert!(ctx.store.try_read().unwrap().stores().is_empty());
    }
}
