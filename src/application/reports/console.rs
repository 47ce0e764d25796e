use super::{catalog::ReportCatalog, dispatcher::ActionDispatcher, mapper::ReportMapper};
use crate::domain::report::{
    action::{ActionOutcome, ModerationAction},
    category::{CategoryPage, ReportCategory},
    errors::ModerationError,
};
use crate::infrastructure::moderation_api::traits::ModerationBackend;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Surface consumed by the console front-end.
///
/// Tracks which category tab is active so actions without an explicit
/// category refresh the list the moderator is looking at.
pub struct ModerationConsole {
    catalog: Arc<ReportCatalog>,
    dispatcher: ActionDispatcher,
    active_category: RwLock<ReportCategory>,
    page_size: u32,
}

impl ModerationConsole {
    pub fn new(backend: Arc<dyn ModerationBackend>, mapper: ReportMapper, page_size: u32) -> Self {
        let catalog = Arc::new(ReportCatalog::new(backend.clone(), mapper, page_size));
        let dispatcher = ActionDispatcher::new(backend, catalog.clone());
        Self {
            catalog,
            dispatcher,
            active_category: RwLock::new(ReportCategory::default()),
            page_size,
        }
    }

    pub fn catalog(&self) -> &Arc<ReportCatalog> {
        &self.catalog
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub async fn active_category(&self) -> ReportCategory {
        *self.active_category.read().await
    }

    /// Switch to `category` and return the requested page, fetching only on
    /// a cache miss.
    pub async fn list_reports(
        &self,
        category: ReportCategory,
        page: u32,
        limit: Option<u32>,
    ) -> Result<CategoryPage, ModerationError> {
        *self.active_category.write().await = category;
        self.catalog
            .ensure_loaded(category, page, limit.unwrap_or(self.page_size))
            .await
    }

    /// Run an already-confirmed action. `category` defaults to the active tab.
    pub async fn perform_action(
        &self,
        action: ModerationAction,
        report_id: &str,
        category: Option<ReportCategory>,
    ) -> Result<ActionOutcome, ModerationError> {
        let category = match category {
            Some(category) => category,
            None => self.active_category().await,
        };
        self.dispatcher.dispatch(category, action, report_id).await
    }

    /// Leave the moderation view: all cached pages are discarded.
    pub async fn leave(&self) {
        self.catalog.reset().await;
        *self.active_category.write().await = ReportCategory::default();
    }
}
