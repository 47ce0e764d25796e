//! Per-category report cache.
//!
//! Only [`super::catalog::ReportCatalog`] holds a `CategoryCache`; every method
//! is `pub(super)` so nothing outside the reports module can write to it.

use crate::domain::report::{
    category::{CacheKey, CategoryPage, ReportCategory},
    errors::ModerationError,
};
use std::collections::{HashMap, HashSet};
use tokio::sync::watch;

/// Result published to everyone waiting on an in-flight key.
pub(super) type FetchOutcome = Result<CategoryPage, ModerationError>;

/// Handle for one issued fetch. Only the latest ticket for a key may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct FetchTicket {
    pub(super) key: CacheKey,
    pub(super) limit: u32,
    generation: u64,
}

/// What a caller must do to obtain the page for a key.
#[derive(Debug)]
pub(super) enum Claim {
    /// Nobody is fetching the key: the caller issues the request.
    Fetch(FetchTicket),
    /// Snapshot from an earlier fetch.
    Cached(CategoryPage),
    /// Another caller is fetching the key. `None` on the channel means still
    /// running; a closed channel without a value means the cache was reset.
    Pending(watch::Receiver<Option<FetchOutcome>>),
}

#[derive(Debug, Clone, Copy)]
struct Selection {
    page: u32,
    limit: u32,
}

#[derive(Debug)]
struct InFlight {
    generation: u64,
    tx: watch::Sender<Option<FetchOutcome>>,
}

#[derive(Debug)]
pub(super) struct CategoryCache {
    page_size: u32,
    /// Page currently materialized for each category
    displayed: HashMap<ReportCategory, CategoryPage>,
    /// Last successful result per key, replayed when a fetched key is selected again
    snapshots: HashMap<CacheKey, CategoryPage>,
    /// Keys fetched or in flight during this session
    fetched: HashSet<CacheKey>,
    in_flight: HashMap<CacheKey, InFlight>,
    selected: HashMap<ReportCategory, Selection>,
    errors: HashMap<ReportCategory, String>,
    next_generation: u64,
}

impl CategoryCache {
    pub(super) fn new(page_size: u32) -> Self {
        Self {
            page_size,
            displayed: HashMap::new(),
            snapshots: HashMap::new(),
            fetched: HashSet::new(),
            in_flight: HashMap::new(),
            selected: HashMap::new(),
            errors: HashMap::new(),
            next_generation: 0,
        }
    }

    /// Make `page` the category's current page and claim the fetch for it.
    ///
    /// Only [`Claim::Fetch`] means a request must be issued; a fetched or
    /// in-flight key never starts a second one.
    pub(super) fn begin_fetch(&mut self, category: ReportCategory, page: u32, limit: u32) -> Claim {
        self.selected.insert(category, Selection { page, limit });
        let key = CacheKey::new(category, page);

        if let Some(flight) = self.in_flight.get(&key) {
            return Claim::Pending(flight.tx.subscribe());
        }
        if self.fetched.contains(&key) {
            if let Some(snapshot) = self.snapshots.get(&key) {
                self.displayed.insert(category, snapshot.clone());
                self.errors.remove(&category);
                return Claim::Cached(snapshot.clone());
            }
        }

        self.fetched.insert(key);
        Claim::Fetch(self.issue(key, limit))
    }

    /// Drop the category's current key and claim its refetch in one step.
    ///
    /// The page is read from the selection at call time. Returns `None` when
    /// nothing was ever selected for the category.
    pub(super) fn invalidate_current(&mut self, category: ReportCategory) -> Option<FetchTicket> {
        let selection = *self.selected.get(&category)?;
        let key = CacheKey::new(category, selection.page);

        self.snapshots.remove(&key);
        self.fetched.remove(&key);

        self.fetched.insert(key);
        Some(self.issue(key, selection.limit))
    }

    /// Store a fetched page. Stale tickets are ignored; a page that is no
    /// longer selected is kept as a snapshot but not displayed.
    pub(super) fn complete(&mut self, ticket: FetchTicket, page: CategoryPage) -> bool {
        if !self.is_latest(&ticket) {
            return false;
        }
        let key = ticket.key;
        if let Some(flight) = self.in_flight.remove(&key) {
            flight.tx.send_replace(Some(Ok(page.clone())));
        }
        self.snapshots.insert(key, page.clone());

        if self.selected_page(key.category) == Some(key.page) {
            self.displayed.insert(key.category, page);
            self.errors.remove(&key.category);
        }
        true
    }

    /// Record a failed fetch. The displayed page stays as it was and the key
    /// is released so the fetch can be retried.
    pub(super) fn fail(&mut self, ticket: FetchTicket, err: &ModerationError) {
        if !self.is_latest(&ticket) {
            return;
        }
        let key = ticket.key;
        if let Some(flight) = self.in_flight.remove(&key) {
            flight.tx.send_replace(Some(Err(err.clone())));
        }
        self.fetched.remove(&key);

        if self.selected_page(key.category) == Some(key.page) {
            self.errors.insert(key.category, err.user_message());
        }
    }

    pub(super) fn page(&self, category: ReportCategory) -> CategoryPage {
        let mut page = self
            .displayed
            .get(&category)
            .cloned()
            .unwrap_or_else(|| CategoryPage::empty(category, self.page_size));

        page.loading = self
            .selected_page(category)
            .map(|p| self.in_flight.contains_key(&CacheKey::new(category, p)))
            .unwrap_or(false);
        page.last_error = self.errors.get(&category).cloned();
        page
    }

    pub(super) fn is_fetched(&self, key: &CacheKey) -> bool {
        self.fetched.contains(key)
    }

    pub(super) fn selected_page(&self, category: ReportCategory) -> Option<u32> {
        self.selected.get(&category).map(|s| s.page)
    }

    /// Forget everything. Tickets issued before the reset can no longer write
    /// and their waiters see a closed channel.
    pub(super) fn clear(&mut self) {
        self.displayed.clear();
        self.snapshots.clear();
        self.fetched.clear();
        self.in_flight.clear();
        self.selected.clear();
        self.errors.clear();
    }

    /// A refetch of a key already in flight keeps its channel, so earlier
    /// waiters receive the newer result.
    fn issue(&mut self, key: CacheKey, limit: u32) -> FetchTicket {
        self.next_generation += 1;
        let generation = self.next_generation;
        match self.in_flight.get_mut(&key) {
            Some(flight) => flight.generation = generation,
            None => {
                let (tx, _) = watch::channel(None);
                self.in_flight.insert(key, InFlight { generation, tx });
            }
        }
        FetchTicket {
            key,
            limit,
            generation,
        }
    }

    fn is_latest(&self, ticket: &FetchTicket) -> bool {
        self.in_flight
            .get(&ticket.key)
            .is_some_and(|flight| flight.generation == ticket.generation)
    }
}
