//! Reactive filter controller
//!
//! Turns filter inputs into re-renders of a list view. Free text is
//! debounced; selector changes apply at once. The controller loop handles
//! one input at a time, so filter state never needs a lock.

use crate::app::AppContext;
use crate::config::SEARCH_DEBOUNCE_MS;
use crate::error::Result;
use crate::gateway::{Category, NoteStatus};
use crate::services::debounce::{Debouncer, Settled};
use crate::services::filters::{IdSelector, NoteFilters, ReminderFilters, ReminderStatusFilter};
use crate::services::temporal;
use crate::services::views::{self, ListView, NotesView, ReminderRow};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::mpsc;

/// One user interaction with a filter bar
#[derive(Debug, Clone, PartialEq)]
pub enum FilterInput<S> {
    /// Current content of the search box
    Search(String),
    /// A selector changed
    Select(S),
    /// Reset every filter
    Clear,
}

/// Filter state plus the view it drives.
///
/// `Update` is whatever a background task sends back after `select`
/// started it, such as options fetched for a dependent selector.
#[async_trait]
pub trait FilterBinding: Send {
    type Selector: Send + 'static;
    type Update: Send + 'static;

    fn set_search(&mut self, text: String);

    async fn select(
        &mut self,
        selector: Self::Selector,
        updates: &mpsc::UnboundedSender<Self::Update>,
    );

    /// Returns true when the list needs a re-render
    async fn apply_update(&mut self, update: Self::Update) -> bool;

    /// Back to default filters
    fn clear(&mut self);

    async fn render(&mut self);
}

pub struct FilterController<B: FilterBinding> {
    binding: B,
    search: Debouncer<String>,
    searches: mpsc::UnboundedReceiver<Settled<String>>,
    updates_tx: mpsc::UnboundedSender<B::Update>,
    updates: mpsc::UnboundedReceiver<B::Update>,
}

impl<B: FilterBinding> FilterController<B> {
    pub fn new(binding: B) -> Self {
        Self::with_delay(binding, Duration::from_millis(SEARCH_DEBOUNCE_MS))
    }

    pub fn with_delay(binding: B, delay: Duration) -> Self {
        let (search, searches) = Debouncer::new(delay);
        let (updates_tx, updates) = mpsc::unbounded_channel();
        Self {
            binding,
            search,
            searches,
            updates_tx,
            updates,
        }
    }

    pub fn binding(&self) -> &B {
        &self.binding
    }

    pub async fn render(&mut self) {
        self.binding.render().await;
    }

    pub async fn handle(&mut self, input: FilterInput<B::Selector>) {
        match input {
            FilterInput::Search(text) => self.search.call(text),
            FilterInput::Select(selector) => {
                self.binding.select(selector, &self.updates_tx).await;
                self.binding.render().await;
            }
            FilterInput::Clear => {
                self.search.cancel();
                self.binding.clear();
                self.binding.render().await;
            }
        }
    }

    /// Process inputs until the sender is dropped, then hand the binding back
    pub async fn run(mut self, mut inputs: mpsc::Receiver<FilterInput<B::Selector>>) -> B {
        loop {
            tokio::select! {
                input = inputs.recv() => {
                    let Some(input) = input else {
                        tracing::debug!("Filter input closed");
                        break;
                    };
                    self.handle(input).await;
                }
                Some(settled) = self.searches.recv() => {
                    if let Some(text) = self.search.accept(settled) {
                        self.binding.set_search(text);
                        self.binding.render().await;
                    }
                }
                Some(update) = self.updates.recv() => {
                    if self.binding.apply_update(update).await {
                        self.binding.render().await;
                    }
                }
            }
        }

        self.search.cancel();
        self.binding
    }
}

// ===== Notes =====

#[derive(Debug, Clone, PartialEq)]
pub enum NoteSelector {
    Status(Option<NoteStatus>),
    Category(IdSelector),
    Store(IdSelector),
}

/// Categories fetched for one store selection
#[derive(Debug)]
pub struct CategoryOptions {
    generation: u64,
    result: Result<Vec<Category>>,
}

pub struct NotesBinding<V: NotesView> {
    ctx: AppContext,
    filters: NoteFilters,
    view: V,
    generation: u64,
}

impl<V: NotesView> NotesBinding<V> {
    pub fn new(ctx: AppContext, view: V) -> Self {
        Self {
            ctx,
            filters: NoteFilters::default(),
            view,
            generation: 0,
        }
    }

    pub fn filters(&self) -> &NoteFilters {
        &self.filters
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }
}

#[async_trait]
impl<V: NotesView + 'static> FilterBinding for NotesBinding<V> {
    type Selector = NoteSelector;
    type Update = CategoryOptions;

    fn set_search(&mut self, text: String) {
        self.filters.search = text;
    }

    async fn select(&mut self, selector: NoteSelector, updates: &mpsc::UnboundedSender<CategoryOptions>) {
        match selector {
            NoteSelector::Status(status) => self.filters.status = status,
            NoteSelector::Category(category) => {
                self.filters.category = category;
                let category_id = self.filters.category.id();
                self.ctx.store.write().await.select_category(category_id);
            }
            NoteSelector::Store(store) => {
                self.filters.store = store;
                self.filters.category = IdSelector::all();
                self.generation += 1;

                let store_id = self.filters.store.id();
                {
                    let mut entities = self.ctx.store.write().await;
                    entities.select_store(store_id);
                    entities.select_category(None);
                }

                match store_id {
                    Some(store_id) => {
                        let gateway = self.ctx.gateway.clone();
                        let tx = updates.clone();
                        let generation = self.generation;
                        tokio::spawn(async move {
                            let result = gateway.list_categories_by_store(store_id).await;
                            let _ = tx.send(CategoryOptions { generation, result });
                        });
                    }
                    None => {
                        let entities = self.ctx.store.read().await;
                        self.view.show_category_options(entities.categories());
                    }
                }
            }
        }
    }

    async fn apply_update(&mut self, update: CategoryOptions) -> bool {
        if update.generation != self.generation {
            tracing::debug!(
                "Discarding categories for generation {} (current {})",
                update.generation,
                self.generation
            );
            return false;
        }

        match update.result {
            Ok(categories) => self.view.show_category_options(&categories),
            Err(e) => {
                tracing::error!("Error loading categories for store: {}", e);
                self.ctx.notifier.error("Erro ao carregar categorias");
            }
        }
        false
    }

    fn clear(&mut self) {
        self.filters = NoteFilters::default();
    }

    async fn render(&mut self) {
        let entities = self.ctx.store.read().await;
        let visible = self.filters.apply(entities.notes(), &entities);
        tracing::debug!(
            "Notes filter kept {} of {}",
            visible.len(),
            entities.notes().len()
        );
        let rows = views::note_rows(visible, &entities);
        drop(entities);

        views::show(&mut self.view, &rows);
    }
}

// ===== Reminders =====

#[derive(Debug, Clone, PartialEq)]
pub enum ReminderSelector {
    Status(ReminderStatusFilter),
    Note(IdSelector),
}

pub struct RemindersBinding<V: ListView<ReminderRow>> {
    ctx: AppContext,
    filters: ReminderFilters,
    view: V,
    now: fn() -> NaiveDateTime,
}

impl<V: ListView<ReminderRow>> RemindersBinding<V> {
    pub fn new(ctx: AppContext, view: V) -> Self {
        Self::with_clock(ctx, view, temporal::now_local)
    }

    pub fn with_clock(ctx: AppContext, view: V, now: fn() -> NaiveDateTime) -> Self {
        Self {
            ctx,
            filters: ReminderFilters::default(),
            view,
            now,
        }
    }

    pub fn filters(&self) -> &ReminderFilters {
        &self.filters
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }
}

#[async_trait]
impl<V: ListView<ReminderRow> + 'static> FilterBinding for RemindersBinding<V> {
    type Selector = ReminderSelector;
    type Update = Infallible;

    fn set_search(&mut self, text: String) {
        self.filters.search = text;
    }

    async fn select(&mut self, selector: ReminderSelector, _updates: &mpsc::UnboundedSender<Infallible>) {
        match selector {
            ReminderSelector::Status(status) => self.filters.status = status,
            ReminderSelector::Note(note) => {
                self.filters.note = note;
                let note_id = self.filters.note.id();
                self.ctx.store.write().await.select_note(note_id);
            }
        }
    }

    async fn apply_update(&mut self, update: Infallible) -> bool {
        match update {}
    }

    fn clear(&mut self) {
        self.filters = ReminderFilters::default();
    }

    async fn render(&mut self) {
        let now = (self.now)();
        let entities = self.ctx.store.read().await;
        let visible = self.filters.apply(entities.reminders(), now);
        tracing::debug!(
            "Reminders filter kept {} of {}",
            visible.len(),
            entities.reminders().len()
        );
        let rows = views::reminder_rows(visible, &entities, now);
        drop(entities);

        views::show(&mut self.view, &rows);
    }
}
