//! Categories service

use crate::app::AppContext;
use crate::config::{MAX_CATEGORY_DESCRIPTION_LEN, MAX_CATEGORY_NAME_LEN};
use crate::error::{Result, ValidationError};
use crate::gateway::{Category, CategoryRequest};
use crate::services::notify::report;
use crate::services::validation;

#[derive(Debug, Clone, Default)]
pub struct CategoryForm {
    pub name: String,
    pub description: Option<String>,
    pub store_id: Option<i64>,
}

impl CategoryForm {
    pub fn validate(self) -> Result<CategoryRequest> {
        let mut errors = ValidationError::new();
        let name = self.name.trim().to_string();
        let description = validation::optional(self.description);

        validation::require(&mut errors, "nome", Some(name.as_str()));
        validation::max_len(&mut errors, "nome", Some(name.as_str()), MAX_CATEGORY_NAME_LEN);
        validation::max_len(&mut errors, "descricao", description.as_deref(), MAX_CATEGORY_DESCRIPTION_LEN);
        if self.store_id.is_none() {
            errors.push("lojaId", "O campo lojaId é obrigatório");
        }
        errors.into_result()?;

        Ok(CategoryRequest {
            name,
            description,
            store_id: self.store_id.unwrap_or_default(),
        })
    }
}

#[derive(Clone)]
pub struct CategoriesService {
    ctx: AppContext,
}

impl CategoriesService {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    /// Replace the categories snapshot
    pub async fn load(&self) -> Result<usize> {
        let categories = self.ctx.gateway.list_categories().await?;
        let count = categories.len();
        self.ctx.store.write().await.replace_categories(categories);
        Ok(count)
    }

    /// Categories of one store, straight from the backend
    pub async fn for_store(&self, store_id: i64) -> Result<Vec<Category>> {
        let result = self.ctx.gateway.list_categories_by_store(store_id).await;
        if let Err(e) = &result {
            tracing::error!("Error loading categories for store {}: {}", store_id, e);
            self.ctx.notifier.error("Erro ao carregar categorias");
        }
        result
    }

    pub async fn create(&self, form: CategoryForm) -> Result<Category> {
        tracing::info!("Creating category: {}", form.name);

        let result = match form.validate() {
            Ok(req) => self.ctx.gateway.create_category(&req).await,
            Err(e) => Err(e),
        };
        let category = report(
            self.ctx.notifier.as_ref(),
            result,
            "Categoria criada com sucesso!",
            "Erro ao salvar categoria",
        )?;

        self.refresh().await;
        Ok(category)
    }

    pub async fn update(&self, id: i64, form: CategoryForm) -> Result<Category> {
        tracing::info!("Updating category: {}", id);

        let result = match form.validate() {
            Ok(req) => self.ctx.gateway.update_category(id, &req).await,
            Err(e) => Err(e),
        };
        let category = report(
            self.ctx.notifier.as_ref(),
            result,
            "Categoria atualizada com sucesso!",
            "Erro ao salvar categoria",
        )?;

        self.refresh().await;
        Ok(category)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        tracing::info!("Deleting category: {}", id);

        let result = self.ctx.gateway.delete_category(id).await;
        report(
            self.ctx.notifier.as_ref(),
            result,
            "Categoria excluída com sucesso!",
            "Erro ao excluir categoria",
        )?;

        self.refresh().await;
        Ok(())
    }

    async fn refresh(&self) {
        if let Err(e) = self.load().await {
            tracing::error!("Error reloading categories: {}", e);
            self.ctx.notifier.error("Erro ao carregar categorias");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::memory::MemoryGateway;
    use crate::services::notify::recording::RecordingNotifier;
    use crate::storage::entity_store::fixtures::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_category_requires_store() {
        let err = CategoryForm {
            name: "Estoque".to_string(),
            ..Default::default()
        }
        .validate()
        .unwrap_err();

        assert!(err.is_validation());
        assert!(err.to_string().contains("lojaId"));
    }

    #[tokio::test]
    async fn test_create_then_list_by_store() {
        let gateway = Arc::new(MemoryGateway::default());
        gateway.seed_categories(vec![category(10, "Estoque", 1)]);
        let ctx = AppContext::new(gateway, Arc::new(RecordingNotifier::default()));
        let service = CategoriesService::new(ctx.clone());

        let created = service
            .create(CategoryForm {
                name: "Caixa".to_string(),
                description: Some("Fechamento".to_string()),
                store_id: Some(1),
            })
            .await
            .unwrap();

        assert_eq!(created.store_id, Some(1));
        assert_eq!(ctx.store.read().await.categories().len(), 2);

        let names: Vec<String> = service
            .for_store(1)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Estoque", "Caixa"]);
        assert!(service.for_store(2).await.unwrap().is_empty());
    }
}
