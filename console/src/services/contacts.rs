//! Contacts service
//!
//! Staff records per store. Registration codes are normalized to upper
//! case before the format check, so `t1234567` is stored as `T1234567`.

use crate::app::AppContext;
use crate::error::{AppError, Result, ValidationError};
use crate::gateway::{Contact, ContactRequest, Role, StoreRef};
use crate::services::filters::ContactFilters;
use crate::services::notify::report;
use crate::services::validation;

/// Contact form as entered
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub registration_code: String,
    pub role: Option<Role>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub store_id: Option<i64>,
}

impl ContactForm {
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            registration_code: contact.registration_code.clone(),
            role: Some(contact.role),
            phone: contact.phone.clone(),
            email: contact.email.clone(),
            notes: contact.notes.clone(),
            store_id: contact.owner_store_id(),
        }
    }

    /// Build the request body; `id` is set for updates
    pub fn validate(self, id: Option<i64>) -> Result<ContactRequest> {
        let mut errors = ValidationError::new();
        let name = self.name.trim().to_string();
        let email = validation::optional(self.email);

        validation::require(&mut errors, "nome", Some(name.as_str()));
        let registration_code = validation::registration_code(&mut errors, &self.registration_code);
        if self.role.is_none() {
            errors.push("cargo", "O campo cargo é obrigatório");
        }
        if email.as_deref().is_some_and(|e| !e.contains('@')) {
            errors.push("email", "E-mail inválido");
        }
        if self.store_id.is_none() {
            errors.push("lojaId", "O campo lojaId é obrigatório");
        }
        errors.into_result()?;

        let (Some(role), Some(store_id)) = (self.role, self.store_id) else {
            return Err(AppError::Generic("Incomplete contact form".to_string()));
        };

        Ok(ContactRequest {
            id,
            name,
            registration_code,
            role,
            phone: validation::optional(self.phone),
            email,
            notes: validation::optional(self.notes),
            store: StoreRef { id: store_id },
        })
    }
}

#[derive(Clone)]
pub struct ContactsService {
    ctx: AppContext,
}

impl ContactsService {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    /// Replace the contacts snapshot
    pub async fn load(&self) -> Result<usize> {
        let contacts = self.ctx.gateway.list_contacts().await?;
        let count = contacts.len();
        self.ctx.store.write().await.replace_contacts(contacts);
        Ok(count)
    }

    /// Snapshot contacts passing `filters`, ordered by name
    pub async fn filtered(&self, filters: &ContactFilters) -> Vec<Contact> {
        let entities = self.ctx.store.read().await;
        filters.apply(entities.contacts())
    }

    pub async fn by_store(&self, store_id: i64) -> Result<Vec<Contact>> {
        let result = self.ctx.gateway.list_contacts_by_store(store_id).await;
        if let Err(e) = &result {
            tracing::error!("Error loading contacts of store {}: {}", store_id, e);
            self.ctx.notifier.error("Erro ao carregar contatos da loja");
        }
        result
    }

    pub async fn get(&self, id: i64) -> Result<Contact> {
        let result = self.ctx.gateway.get_contact(id).await;
        if let Err(e) = &result {
            tracing::error!("Error loading contact {}: {}", id, e);
            self.ctx.notifier.error("Erro ao carregar dados do funcionário");
        }
        result
    }

    pub async fn create(&self, form: ContactForm) -> Result<Contact> {
        tracing::info!("Creating contact: {}", form.name);

        let result = match form.validate(None) {
            Ok(req) => self.ctx.gateway.create_contact(&req).await,
            Err(e) => Err(e),
        };
        let contact = report(
            self.ctx.notifier.as_ref(),
            result,
            "Funcionário adicionado com sucesso!",
            "Erro ao salvar funcionário",
        )?;

        self.refresh().await;
        Ok(contact)
    }

    pub async fn update(&self, id: i64, form: ContactForm) -> Result<Contact> {
        tracing::info!("Updating contact: {}", id);

        let result = match form.validate(Some(id)) {
            Ok(req) => self.ctx.gateway.update_contact(&req).await,
            Err(e) => Err(e),
        };
        let contact = report(
            self.ctx.notifier.as_ref(),
            result,
            "Funcionário atualizado com sucesso!",
            "Erro ao salvar funcionário",
        )?;

        self.refresh().await;
        Ok(contact)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        tracing::info!("Deleting contact: {}", id);

        let result = self.ctx.gateway.delete_contact(id).await;
        report(
            self.ctx.notifier.as_ref(),
            result,
            "Funcionário excluído com sucesso!",
            "Erro ao excluir funcionário",
        )?;

        self.refresh().await;
        Ok(())
    }

    async fn refresh(&self) {
        if let Err(e) = self.load().await {
            tracing::error!("Error reloading contacts: {}", e);
            self.ctx.notifier.error("Erro ao carregar contatos");
        }
    }
}
