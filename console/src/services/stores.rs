//! Stores service
//!
//! Store lifecycle against the backend. Every mutation is followed by a
//! reload of the stores snapshot; deleting a store does not touch the
//! local categories or notes, the next reload reflects whatever the
//! backend cascaded.

use crate::app::{AppContext, Section};
use crate::config::{
    MAX_STORE_ADDRESS_LEN, MAX_STORE_DESCRIPTION_LEN, MAX_STORE_NAME_LEN, MAX_STORE_PHONE_LEN,
};
use crate::error::{Result, ValidationError};
use crate::gateway::{Store, StoreRequest};
use crate::services::filters::StoreFilters;
use crate::services::notify::report;
use crate::services::validation;

/// Store form as entered
#[derive(Debug, Clone, Default)]
pub struct StoreForm {
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl StoreForm {
    pub fn from_store(store: &Store) -> Self {
        Self {
            name: store.name.clone(),
            description: store.description.clone(),
            address: store.address.clone(),
            phone: store.phone.clone(),
        }
    }

    pub fn validate(self) -> Result<StoreRequest> {
        let mut errors = ValidationError::new();
        let name = self.name.trim().to_string();
        let description = validation::optional(self.description);
        let address = validation::optional(self.address);
        let phone = validation::optional(self.phone);

        validation::require(&mut errors, "nome", Some(name.as_str()));
        validation::max_len(&mut errors, "nome", Some(name.as_str()), MAX_STORE_NAME_LEN);
        validation::max_len(&mut errors, "descricao", description.as_deref(), MAX_STORE_DESCRIPTION_LEN);
        validation::max_len(&mut errors, "endereco", address.as_deref(), MAX_STORE_ADDRESS_LEN);
        validation::max_len(&mut errors, "telefone", phone.as_deref(), MAX_STORE_PHONE_LEN);
        errors.into_result()?;

        Ok(StoreRequest {
            name,
            description,
            address,
            phone,
        })
    }
}

#[derive(Clone)]
pub struct StoresService {
    ctx: AppContext,
}

impl StoresService {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    /// Replace the stores snapshot
    pub async fn load(&self) -> Result<usize> {
        let stores = self.ctx.gateway.list_stores().await?;
        let count = stores.len();
        self.ctx.store.write().await.replace_stores(stores);
        Ok(count)
    }

    /// Snapshot stores passing `filters`
    pub async fn filtered(&self, filters: &StoreFilters) -> Vec<Store> {
        let entities = self.ctx.store.read().await;
        filters.apply(entities.stores())
    }

    pub async fn get(&self, id: i64) -> Result<Store> {
        let result = self.ctx.gateway.get_store(id).await;
        if let Err(e) = &result {
            tracing::error!("Error loading store {}: {}", id, e);
            self.ctx.notifier.error("Erro ao carregar loja");
        }
        result
    }

    pub async fn create(&self, form: StoreForm) -> Result<Store> {
        tracing::info!("Creating store: {}", form.name);

        let result = match form.validate() {
            Ok(req) => self.ctx.gateway.create_store(&req).await,
            Err(e) => Err(e),
        };
        let store = report(
            self.ctx.notifier.as_ref(),
            result,
            "Loja criada com sucesso!",
            "Erro ao salvar loja",
        )?;

        tracing::info!("Store created successfully: {}", store.id);
        self.refresh().await;
        Ok(store)
    }

    pub async fn update(&self, id: i64, form: StoreForm) -> Result<Store> {
        tracing::info!("Updating store: {}", id);

        let result = match form.validate() {
            Ok(req) => self.ctx.gateway.update_store(id, &req).await,
            Err(e) => Err(e),
        };
        let store = report(
            self.ctx.notifier.as_ref(),
            result,
            "Loja atualizada com sucesso!",
            "Erro ao salvar loja",
        )?;

        self.refresh().await;
        Ok(store)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        tracing::info!("Deleting store: {}", id);

        let result = self.ctx.gateway.delete_store(id).await;
        report(
            self.ctx.notifier.as_ref(),
            result,
            "Loja excluída com sucesso!",
            "Erro ao excluir loja",
        )?;

        self.refresh().await;
        Ok(())
    }

    async fn refresh(&self) {
        if let Err(e) = self.load().await {
            tracing::error!("Error reloading stores: {}", e);
            self.ctx.notifier.error(Section::Stores.failure_message());
        }
    }
}
