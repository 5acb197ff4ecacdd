use crate::error::{FetchError, Result};
use crate::fetcher::NetworkFetcher;
use crate::models::{SearchRequest, SearchResult, API_BASE_URL};
use crate::order::StarOrder;
use crate::types::{RepositoryItem, SearchResponse};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Message published when a search completes with no matches.
pub const NOT_FOUND_MESSAGE: &str = "お探しのリポジトリは見つかりませんでした。";

/// Fire-and-forget notifications consumed by the presentation layer.
///
/// Every method defaults to a no-op so an implementor can subscribe to just
/// the subset it renders. The coordinator holds the handle without owning
/// the collaborator in any deeper sense.
pub trait SearchEvents: Send + Sync {
    fn loading_started(&self) {}
    fn loading_stopped(&self) {}
    fn results_updated(&self, _items: &[RepositoryItem]) {}
    fn empty_result(&self, _message: &str) {}
    fn error_occurred(&self, _message: &str) {}
    fn order_changed(&self, _order: StarOrder) {}
    fn display_reset(&self) {}
}

/// Where the coordinator currently is in its search lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Searching,
    Loaded,
    Empty,
    Failed,
}

// The generation counter and the published result live under one lock so
// they always change together.
struct CoordinatorState {
    phase: Phase,
    keyword: String,
    order: StarOrder,
    seq: u64,
    result: Option<SearchResult>,
}

struct Shared {
    fetcher: Arc<dyn NetworkFetcher>,
    events: Option<Arc<dyn SearchEvents>>,
    base_url: String,
    state: Mutex<CoordinatorState>,
}

/// Orchestrates keyword searches.
///
/// Each submission gets a fresh generation number; a completion whose number
/// is no longer current is discarded, so only the last-issued request's
/// outcome is ever observable, regardless of completion order.
#[derive(Clone)]
pub struct SearchCoordinator {
    shared: Arc<Shared>,
}

impl SearchCoordinator {
    pub fn new(
        fetcher: Arc<dyn NetworkFetcher>,
        events: Option<Arc<dyn SearchEvents>>,
    ) -> Self {
        Self::with_base_url(fetcher, events, API_BASE_URL)
    }

    pub fn with_base_url(
        fetcher: Arc<dyn NetworkFetcher>,
        events: Option<Arc<dyn SearchEvents>>,
        base_url: impl Into<String>,
    ) -> Self {
        SearchCoordinator {
            shared: Arc::new(Shared {
                fetcher,
                events,
                base_url: base_url.into(),
                state: Mutex::new(CoordinatorState {
                    phase: Phase::Idle,
                    keyword: String::new(),
                    order: StarOrder::Default,
                    seq: 0,
                    result: None,
                }),
            }),
        }
    }

    pub async fn phase(&self) -> Phase {
        self.shared.state.lock().await.phase
    }

    pub async fn order(&self) -> StarOrder {
        self.shared.state.lock().await.order
    }

    /// Items of the currently published result, empty outside `Loaded`.
    pub async fn items(&self) -> Vec<RepositoryItem> {
        let state = self.shared.state.lock().await;
        state
            .result
            .as_ref()
            .map(|result| result.items.clone())
            .unwrap_or_default()
    }

    pub async fn result(&self) -> Option<SearchResult> {
        self.shared.state.lock().await.result.clone()
    }

    /// Issues a search for `keyword` under `order`, superseding any search
    /// still in flight. An empty keyword is rejected silently.
    pub async fn submit(&self, keyword: &str, order: StarOrder) {
        if keyword.is_empty() {
            return;
        }

        let request = SearchRequest::new(keyword, order);
        let seq = {
            let mut state = self.shared.state.lock().await;
            state.seq += 1;
            state.phase = Phase::Searching;
            state.keyword = keyword.to_string();
            state.order = order;
            state.seq
        };
        info!(keyword, ?order, seq, "issuing repository search");
        self.emit(|events| events.loading_started());

        let outcome = self.execute(&request).await;
        self.publish(seq, request, outcome).await;
    }

    /// Switches the ordering. When a keyword is active the search re-runs
    /// under the new order, superseding any in-flight one; the toggle is not
    /// gated on loading state.
    pub async fn change_order(&self, order: StarOrder) {
        let keyword = {
            let mut state = self.shared.state.lock().await;
            state.order = order;
            state.keyword.clone()
        };
        self.emit(|events| events.order_changed(order));

        if !keyword.is_empty() {
            self.submit(&keyword, order).await;
        }
    }

    /// Resets to `Idle` without waiting on any outstanding fetch; its
    /// eventual completion is discarded by the generation check.
    pub async fn clear(&self) {
        {
            let mut state = self.shared.state.lock().await;
            state.seq += 1;
            state.phase = Phase::Idle;
            state.keyword.clear();
            state.result = None;
        }
        self.emit(|events| events.display_reset());
    }

    // ---- input-layer boundary ----

    /// Search-button activation. Ignored while a search is already loading;
    /// the order toggle deliberately bypasses this guard.
    pub async fn search_submitted(&self, keyword: &str) {
        let (phase, order) = {
            let state = self.shared.state.lock().await;
            (state.phase, state.order)
        };
        if phase == Phase::Searching {
            return;
        }
        self.submit(keyword, order).await;
    }

    /// Star-order button activation: advances the toggle cycle.
    pub async fn order_toggled(&self) {
        let next = self.shared.state.lock().await.order.next();
        self.change_order(next).await;
    }

    /// Search field emptied while typing.
    pub async fn search_text_cleared(&self) {
        self.clear().await;
    }

    async fn execute(&self, request: &SearchRequest) -> Result<Vec<RepositoryItem>> {
        let url = request.url_with_base(&self.shared.base_url)?;
        let body = self.shared.fetcher.fetch(&url).await?;
        let response: SearchResponse = serde_json::from_slice(&body)
            .map_err(|err| FetchError::DecodeError(err.to_string()))?;
        Ok(response.items)
    }

    async fn publish(
        &self,
        seq: u64,
        request: SearchRequest,
        outcome: Result<Vec<RepositoryItem>>,
    ) {
        {
            let mut state = self.shared.state.lock().await;
            if state.seq != seq {
                debug!(seq, current = state.seq, "discarding superseded search outcome");
                return;
            }
            match &outcome {
                Ok(items) if items.is_empty() => {
                    state.phase = Phase::Empty;
                    state.result = Some(SearchResult {
                        items: Vec::new(),
                        request: request.clone(),
                    });
                }
                Ok(items) => {
                    state.phase = Phase::Loaded;
                    state.result = Some(SearchResult {
                        items: items.clone(),
                        request: request.clone(),
                    });
                }
                Err(_) => {
                    state.phase = Phase::Failed;
                    state.result = None;
                }
            }
        }

        self.emit(|events| events.loading_stopped());
        match outcome {
            Ok(items) if items.is_empty() => {
                self.emit(|events| events.empty_result(NOT_FOUND_MESSAGE));
            }
            Ok(items) => {
                self.emit(|events| events.results_updated(&items));
            }
            Err(err) => {
                self.emit(|events| events.error_occurred(&err.to_string()));
            }
        }
    }

    fn emit(&self, notify: impl FnOnce(&dyn SearchEvents)) {
        if let Some(events) = &self.shared.events {
            notify(events.as_ref());
        }
    }
}
