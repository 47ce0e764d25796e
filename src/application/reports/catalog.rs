use super::cache::{CategoryCache, Claim, FetchOutcome, FetchTicket};
use super::mapper::ReportMapper;
use crate::domain::report::{
    category::{CacheKey, CategoryPage, ReportCategory},
    entity::Report,
    errors::ModerationError,
};
use crate::domain::shared::pagination::MAX_PAGE_SIZE;
use crate::infrastructure::moderation_api::traits::ModerationBackend;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

/// Fetch orchestrator and sole owner of the category cache.
///
/// The fetched-keys check and claim happen under one lock acquisition before
/// the request is awaited, so at most one fetch per `category:page` is ever
/// in flight. The lock is never held across a backend call.
pub struct ReportCatalog {
    backend: Arc<dyn ModerationBackend>,
    mapper: ReportMapper,
    cache: Mutex<CategoryCache>,
}

impl ReportCatalog {
    pub fn new(backend: Arc<dyn ModerationBackend>, mapper: ReportMapper, page_size: u32) -> Self {
        Self {
            backend,
            mapper,
            cache: Mutex::new(CategoryCache::new(page_size)),
        }
    }

    /// Select `page` of `category` and return that page.
    ///
    /// A key fetched earlier this session is served from its snapshot. A key
    /// another caller is already fetching is awaited rather than requested
    /// twice.
    pub async fn ensure_loaded(
        &self,
        category: ReportCategory,
        page: u32,
        limit: u32,
    ) -> Result<CategoryPage, ModerationError> {
        if page == 0 || limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(ModerationError::InvalidRequest(format!(
                "page must be at least 1 and limit between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        let key = CacheKey::new(category, page);
        loop {
            let claim = self.cache.lock().await.begin_fetch(category, page, limit);
            match claim {
                Claim::Fetch(ticket) => return self.run_fetch(ticket).await,
                Claim::Cached(snapshot) => {
                    debug!(key = %key, "Report cache HIT");
                    return Ok(snapshot);
                }
                Claim::Pending(rx) => {
                    debug!(key = %key, "Report fetch in flight, waiting");
                    if let Some(outcome) = wait_for_outcome(rx).await {
                        return outcome;
                    }
                    debug!(key = %key, "Report cache reset while waiting, retrying");
                }
            }
        }
    }

    /// Current page for `category`, or an empty page if nothing was loaded.
    pub async fn get_page(&self, category: ReportCategory) -> CategoryPage {
        self.cache.lock().await.page(category)
    }

    /// Report as currently displayed in `category`.
    pub async fn find_report(&self, category: ReportCategory, report_id: &str) -> Option<Report> {
        self.cache
            .lock()
            .await
            .page(category)
            .find(report_id)
            .cloned()
    }

    pub async fn is_fetched(&self, category: ReportCategory, page: u32) -> bool {
        self.cache
            .lock()
            .await
            .is_fetched(&CacheKey::new(category, page))
    }

    pub async fn current_page(&self, category: ReportCategory) -> Option<u32> {
        self.cache.lock().await.selected_page(category)
    }

    /// Drop the category's current page from the ledger and fetch it again.
    ///
    /// The page is whatever is selected when this runs. Does nothing if the
    /// category was never loaded.
    pub async fn invalidate_current(&self, category: ReportCategory) -> Result<(), ModerationError> {
        let ticket = self.cache.lock().await.invalidate_current(category);
        match ticket {
            Some(ticket) => {
                debug!(key = %ticket.key, "Report cache invalidated, refetching");
                self.run_fetch(ticket).await.map(|_| ())
            }
            None => {
                debug!(category = %category, "Nothing selected to invalidate");
                Ok(())
            }
        }
    }

    /// Discard every cached category, as when leaving the moderation view.
    pub async fn reset(&self) {
        self.cache.lock().await.clear();
        info!("Report cache cleared");
    }

    /// Fetch the ticket's key and return what the backend sent for it, even
    /// when a newer ticket or a reset means it is not cached.
    async fn run_fetch(&self, ticket: FetchTicket) -> Result<CategoryPage, ModerationError> {
        let key = ticket.key;
        info!(key = %key, limit = ticket.limit, "Fetching reported media");

        let result = self
            .backend
            .fetch_reported_media(key.category.media_type(), key.page, ticket.limit)
            .await;

        match result {
            Ok(envelope) => {
                let page = self
                    .mapper
                    .map_page(key.category, key.page, ticket.limit, envelope);
                let count = page.reports.len();
                if self.cache.lock().await.complete(ticket, page.clone()) {
                    debug!(key = %key, count, "Report page cached");
                } else {
                    debug!(key = %key, "Discarding superseded report page");
                }
                Ok(page)
            }
            Err(err) => {
                warn!(key = %key, error = %err, "Fetching reported media failed");
                self.cache.lock().await.fail(ticket, &err);
                Err(err)
            }
        }
    }
}

/// Wait for an in-flight fetch. `None` when the cache was reset first.
async fn wait_for_outcome(
    mut rx: watch::Receiver<Option<FetchOutcome>>,
) -> Option<FetchOutcome> {
    match rx.wait_for(Option::is_some).await {
        Ok(outcome) => (*outcome).clone(),
        Err(_) => None,
    }
}
