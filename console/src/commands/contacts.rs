//! Contact commands
//!
//! Staff records per store, with filtering by name, registration code,
//! role and store.

use super::render;
use crate::app::{AppContext, Section};
use crate::gateway::Role;
use crate::services::filters::{parse_choice, ContactFilters, IdSelector};
use crate::services::{ContactForm, ContactsService};
use anyhow::anyhow;
use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum ContactsCommand {
    /// List contacts, ordered by name
    List(ContactListArgs),
    /// Show one contact
    Show { id: i64 },
    /// Add a contact to a store
    Create(ContactArgs),
    /// Update a contact; omitted fields keep their current value
    Update {
        id: i64,
        #[command(flatten)]
        fields: ContactArgs,
    },
    /// Delete a contact
    Delete { id: i64 },
}

#[derive(Args, Debug, Default)]
pub struct ContactListArgs {
    /// Text in the name or registration code
    #[arg(long, default_value = "")]
    pub search: String,
    /// GERENTE, PROPRIETARIO, VENDEDOR or all
    #[arg(long, default_value = "all")]
    pub role: String,
    /// Store id; asks the backend for that store's contacts only
    #[arg(long)]
    pub store: Option<i64>,
}

impl ContactListArgs {
    pub fn filters(&self) -> anyhow::Result<ContactFilters> {
        Ok(ContactFilters {
            search: self.search.clone(),
            role: parse_choice::<Role>(&self.role).map_err(|e| anyhow!(e))?,
            store: IdSelector::from(self.store),
        })
    }
}

#[derive(Args, Debug, Default)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: Option<String>,
    /// Registration code, T followed by 7 digits
    #[arg(long)]
    pub code: Option<String>,
    #[arg(long)]
    pub role: Option<Role>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    /// Owning store id
    #[arg(long)]
    pub store: Option<i64>,
}

impl ContactArgs {
    pub fn apply(self, mut form: ContactForm) -> ContactForm {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(code) = self.code {
            form.registration_code = code;
        }
        if self.role.is_some() {
            form.role = self.role;
        }
        if self.phone.is_some() {
            form.phone = self.phone;
        }
        if self.email.is_some() {
            form.email = self.email;
        }
        if self.notes.is_some() {
            form.notes = self.notes;
        }
        if self.store.is_some() {
            form.store_id = self.store;
        }
        form
    }
}

pub async fn execute(ctx: &AppContext, cmd: ContactsCommand) -> anyhow::Result<()> {
    let service = ContactsService::new(ctx.clone());

    match cmd {
        ContactsCommand::List(args) => {
            let filters = args.filters()?;
            let contacts = match args.store {
                Some(store_id) => filters.apply(&service.by_store(store_id).await?),
                None => {
                    ctx.load_section(Section::Contacts).await?;
                    service.filtered(&filters).await
                }
            };
            render::contacts(&contacts);
        }
        ContactsCommand::Show { id } => render::contact(&service.get(id).await?),
        ContactsCommand::Create(fields) => {
            let contact = service.create(fields.apply(ContactForm::default())).await?;
            render::contact(&contact);
        }
        ContactsCommand::Update { id, fields } => {
            let current = service.get(id).await?;
            let contact = service
                .update(id, fields.apply(ContactForm::from_contact(&current)))
                .await?;
            render::contact(&contact);
        }
        ContactsCommand::Delete { id } => service.delete(id).await?,
    }

    Ok(())
}
