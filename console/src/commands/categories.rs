//! Category commands

use super::render;
use crate::app::AppContext;
use crate::services::{CategoriesService, CategoryForm, StoresService};
use crate::storage::entity_store::STORE_NOT_FOUND;
use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum CategoriesCommand {
    /// List categories, optionally of one store
    List {
        #[arg(long)]
        store: Option<i64>,
    },
    /// Create a category
    Create(CategoryArgs),
    /// Update a category
    Update {
        id: i64,
        #[command(flatten)]
        fields: CategoryArgs,
    },
    /// Delete a category
    Delete { id: i64 },
}

#[derive(Args, Debug)]
pub struct CategoryArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
    /// Owning store id
    #[arg(long)]
    pub store: Option<i64>,
}

impl From<CategoryArgs> for CategoryForm {
    fn from(args: CategoryArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
            store_id: args.store,
        }
    }
}

pub async fn execute(ctx: &AppContext, cmd: CategoriesCommand) -> anyhow::Result<()> {
    let service = CategoriesService::new(ctx.clone());

    match cmd {
        CategoriesCommand::List { store } => {
            StoresService::new(ctx.clone()).load().await?;
            let categories = match store {
                Some(store_id) => service.for_store(store_id).await?,
                None => {
                    service.load().await?;
                    ctx.store.read().await.categories().to_vec()
                }
            };

            let entities = ctx.store.read().await;
            render::categories(&categories, |id| {
                id.and_then(|id| entities.store(id))
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| STORE_NOT_FOUND.to_string())
            });
        }
        CategoriesCommand::Create(fields) => {
            let category = service.create(fields.into()).await?;
            println!("{} {}", category.id, category.name);
        }
        CategoriesCommand::Update { id, fields } => {
            let category = service.update(id, fields.into()).await?;
            println!("{} {}", category.id, category.name);
        }
        CategoriesCommand::Delete { id } => service.delete(id).await?,
    }

    Ok(())
}
