//! HTTP gateway over reqwest
//!
//! JSON in, JSON out. A non-2xx status becomes `AppError::Transport` with the
//! status preserved; the error body is never parsed.

use super::models::*;
use super::DataGateway;
use crate::config::ConsoleConfig;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Gateway talking to the REST backend
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(config: &ConsoleConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("storenotes/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Reject non-2xx responses before touching the body
    fn check(path: &str, response: Response) -> Result<Response> {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("API error on {}: status {}", path, status);
            return Err(AppError::Transport {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!("GET {}", path);
        let response = self.client.get(self.url(path)).send().await?;
        Self::parse(Self::check(path, response)?).await
    }

    async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        tracing::debug!("GET {} {:?}", path, query);
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await?;
        Self::parse(Self::check(path, response)?).await
    }

    async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T> {
        tracing::debug!("{} {}", method, path);
        let response = self
            .client
            .request(method, self.url(path))
            .json(body)
            .send()
            .await?;
        Self::parse(Self::check(path, response)?).await
    }

    /// DELETE accepts any 2xx, with or without a body
    async fn delete(&self, path: &str) -> Result<()> {
        tracing::debug!("DELETE {}", path);
        let response = self.client.delete(self.url(path)).send().await?;
        Self::check(path, response)?;
        Ok(())
    }
}

#[async_trait]
impl DataGateway for HttpGateway {
    async fn list_stores(&self) -> Result<Vec<Store>> {
        self.get("/lojas").await
    }

    async fn get_store(&self, id: i64) -> Result<Store> {
        self.get(&format!("/lojas/{}", id)).await
    }

    async fn create_store(&self, req: &StoreRequest) -> Result<Store> {
        self.send(Method::POST, "/lojas", req).await
    }

    async fn update_store(&self, id: i64, req: &StoreRequest) -> Result<Store> {
        self.send(Method::PUT, &format!("/lojas/{}", id), req).await
    }

    async fn delete_store(&self, id: i64) -> Result<()> {
        self.delete(&format!("/lojas/{}", id)).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.get("/categorias").await
    }

    async fn list_categories_by_store(&self, store_id: i64) -> Result<Vec<Category>> {
        self.get(&format!("/categorias/loja/{}", store_id)).await
    }

    async fn create_category(&self, req: &CategoryRequest) -> Result<Category> {
        self.send(Method::POST, "/categorias", req).await
    }

    async fn update_category(&self, id: i64, req: &CategoryRequest) -> Result<Category> {
        self.send(Method::PUT, &format!("/categorias/{}", id), req).await
    }

    async fn delete_category(&self, id: i64) -> Result<()> {
        self.delete(&format!("/categorias/{}", id)).await
    }

    async fn list_notes(&self) -> Result<Vec<Note>> {
        self.get("/notas").await
    }

    async fn get_note(&self, id: i64) -> Result<Note> {
        self.get(&format!("/notas/{}", id)).await
    }

    async fn list_notes_by_category(&self, category_id: i64) -> Result<Vec<Note>> {
        self.get(&format!("/notas/categoria/{}", category_id)).await
    }

    async fn list_notes_by_store(&self, store_id: i64) -> Result<Vec<Note>> {
        self.get(&format!("/notas/loja/{}", store_id)).await
    }

    async fn list_notes_by_status(&self, status: NoteStatus) -> Result<Vec<Note>> {
        self.get(&format!("/notas/status/{}", status.as_wire())).await
    }

    async fn search_notes(&self, text: &str) -> Result<Vec<Note>> {
        self.get_with_query("/notas/buscar", &[("texto", text)]).await
    }

    async fn create_note(&self, req: &NoteRequest) -> Result<Note> {
        self.send(Method::POST, "/notas", req).await
    }

    async fn update_note(&self, id: i64, req: &NoteRequest) -> Result<Note> {
        self.send(Method::PUT, &format!("/notas/{}", id), req).await
    }

    async fn delete_note(&self, id: i64) -> Result<()> {
        self.delete(&format!("/notas/{}", id)).await
    }

    async fn list_reminders(&self) -> Result<Vec<Reminder>> {
        self.get("/lembretes").await
    }

    async fn get_reminder(&self, id: i64) -> Result<Reminder> {
        self.get(&format!("/lembretes/{}", id)).await
    }

    async fn list_reminders_by_note(&self, note_id: i64) -> Result<Vec<Reminder>> {
        self.get(&format!("/lembretes/nota/{}", note_id)).await
    }

    async fn list_upcoming_reminders(&self) -> Result<Vec<Reminder>> {
        self.get("/lembretes/proximos").await
    }

    async fn create_reminder(&self, req: &ReminderRequest) -> Result<Reminder> {
        self.send(Method::POST, "/lembretes", req).await
    }

    async fn update_reminder(&self, id: i64, req: &ReminderRequest) -> Result<Reminder> {
        self.send(Method::PUT, &format!("/lembretes/{}", id), req).await
    }

    async fn delete_reminder(&self, id: i64) -> Result<()> {
        self.delete(&format!("/lembretes/{}", id)).await
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>> {
        self.get("/contatos").await
    }

    async fn list_contacts_by_store(&self, store_id: i64) -> Result<Vec<Contact>> {
        self.get(&format!("/contatos/loja/{}", store_id)).await
    }

    async fn get_contact(&self, id: i64) -> Result<Contact> {
        self.get(&format!("/contatos/{}", id)).await
    }

    async fn create_contact(&self, req: &ContactRequest) -> Result<Contact> {
        self.send(Method::POST, "/contatos", req).await
    }

    async fn update_contact(&self, req: &ContactRequest) -> Result<Contact> {
        let id = req
            .id
            .ok_or_else(|| AppError::Generic("Contact id is required for update".to_string()))?;
        self.send(Method::PUT, &format!("/contatos/{}", id), req).await
    }

    async fn delete_contact(&self, id: i64) -> Result<()> {
        self.delete(&format!("/contatos/{}", id)).await
    }

    async fn dashboard_summary(&self) -> Result<DashboardSummary> {
        self.get("/dashboard/resumo").await
    }

    async fn note_statistics(&self) -> Result<NoteStatistics> {
        self.get("/dashboard/estatisticas/notas").await
    }

    async fn recent_activity(&self) -> Result<RecentActivity> {
        self.get("/dashboard/atividades-recentes").await
    }
}
