//! Store commands
//!
//! CRUD operations for stores.

use super::render;
use crate::app::AppContext;
use crate::services::filters::StoreFilters;
use crate::services::{StoreForm, StoresService};
use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum StoresCommand {
    /// List stores
    List {
        /// Match name, address or description
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one store
    Show { id: i64 },
    /// Create a store
    Create(StoreArgs),
    /// Update a store; omitted fields keep their current value
    Update {
        id: i64,
        #[command(flatten)]
        fields: StoreArgs,
    },
    /// Delete a store
    Delete { id: i64 },
}

#[derive(Args, Debug, Default)]
pub struct StoreArgs {
    /// Store name
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

impl StoreArgs {
    /// Overlay the given flags on `form`
    pub fn apply(self, mut form: StoreForm) -> StoreForm {
        if let Some(name) = self.name {
            form.name = name;
        }
        if self.description.is_some() {
            form.description = self.description;
        }
        if self.address.is_some() {
            form.address = self.address;
        }
        if self.phone.is_some() {
            form.phone = self.phone;
        }
        form
    }
}

pub async fn execute(ctx: &AppContext, cmd: StoresCommand) -> anyhow::Result<()> {
    let service = StoresService::new(ctx.clone());

    match cmd {
        StoresCommand::List { search } => {
            service.load().await?;
            let filters = StoreFilters {
                search: search.unwrap_or_default(),
            };
            render::stores(&service.filtered(&filters).await);
        }
        StoresCommand::Show { id } => render::store(&service.get(id).await?),
        StoresCommand::Create(fields) => {
            let store = service.create(fields.apply(StoreForm::default())).await?;
            render::store(&store);
        }
        StoresCommand::Update { id, fields } => {
            let current = service.get(id).await?;
            let store = service
                .update(id, fields.apply(StoreForm::from_store(&current)))
                .await?;
            render::store(&store);
        }
        StoresCommand::Delete { id } => service.delete(id).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_list_search_flag_parses() {
        let cli = Cli::parse_from(["storenotes", "stores", "list", "--search", "centro"]);
        match cli.command {
            Commands::Stores(StoresCommand::List { search }) => {
                assert_eq!(search.as_deref(), Some("centro"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_update_flags_overlay_current_values() {
        let current = StoreForm {
            name: "Centro".to_string(),
            address: Some("Rua A".to_string()),
            phone: Some("1111".to_string()),
            ..Default::default()
        };

        let form = StoreArgs {
            phone: Some("2222".to_string()),
            ..Default::default()
        }
        .apply(current);

        assert_eq!(form.name, "Centro");
        assert_eq!(form.address.as_deref(), Some("Rua A"));
        assert_eq!(form.phone.as_deref(), Some("2222"));
    }
}
