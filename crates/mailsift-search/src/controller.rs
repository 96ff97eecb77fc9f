use crate::{FilterView, RaceGuard, SearchPhase, SearchView};
use mailsift_api::Backend;
use mailsift_core::{
    clamp_relevance, Debouncer, EmailDetail, EmailIdent, EmailRef, Filter, FilterCounts, PageInfo,
    SearchHit, SearchRequest, SharedSelection, Theme,
};
use mailsift_filter::{parse_filter_prompt, FilterStore, PROMPT_HELP};
use mailsift_session::{get_json, set_json, SessionStore, ORIGINAL_QUERY_KEY};
use std::sync::Arc;
use std::time::Duration;

const EMPTY_QUERY_MESSAGE: &str = "Introduce una consulta de búsqueda.";
const EMPTY_RESULTS_BANNER: &str = "No se encontraron correos relevantes";
const FEEDBACK_OK: &str = "Correo marcado como no relevante.";

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub results_per_page: u64,
    pub default_min_relevance: u8,
    pub debounce: Duration,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            results_per_page: 25,
            default_min_relevance: 10,
            debounce: Duration::from_millis(300),
        }
    }
}

/// The search view-controller.
///
/// Runs as a single UI task (`&mut self`), mirroring the browser event loop:
/// phases are `Idle → Searching → {Results | Empty | Failed}` and every
/// terminal phase is re-entered by a submit, a page change, or a filter
/// mutation. All state the next render needs is in the returned
/// [`SearchView`].
pub struct SearchController<B> {
    backend: Arc<B>,
    session: Arc<dyn SessionStore>,
    filters: FilterStore,
    selection: Arc<SharedSelection>,
    options: SearchOptions,

    query: String,
    min_relevance: u8,
    clear_cache: bool,
    page: u64,

    phase: SearchPhase,
    banner: Option<String>,
    rows: Vec<SearchHit>,
    total: u64,
    counts: FilterCounts,

    guard: RaceGuard,
    modal_guard: RaceGuard,
    row_debounce: Debouncer,
}

impl<B: Backend> SearchController<B> {
    pub fn new(
        backend: Arc<B>,
        session: Arc<dyn SessionStore>,
        selection: Arc<SharedSelection>,
        options: SearchOptions,
    ) -> Self {
        let filters = FilterStore::new(session.clone());
        let row_debounce = Debouncer::new(options.debounce);
        Self {
            backend,
            session,
            filters,
            selection,
            min_relevance: options.default_min_relevance,
            options,
            query: String::new(),
            clear_cache: false,
            page: 1,
            phase: SearchPhase::Idle,
            banner: None,
            rows: Vec::new(),
            total: 0,
            counts: FilterCounts::default(),
            guard: RaceGuard::new(),
            modal_guard: RaceGuard::new(),
            row_debounce,
        }
    }

    pub fn set_clear_cache(&mut self, on: bool) {
        self.clear_cache = on;
    }

    pub fn set_min_relevance(&mut self, value: i64) {
        self.min_relevance = clamp_relevance(value);
    }

    /// Submit a new query from the form. Resets to page 1 and applies the
    /// clear-cache heuristic before searching.
    pub async fn submit(&mut self, query: &str) -> Result<SearchView, String> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(EMPTY_QUERY_MESSAGE.to_string());
        }

        self.apply_clear_cache_rule(trimmed);
        self.query = trimmed.to_string();
        self.page = 1;
        Ok(self.run_search().await)
    }

    /// The remembered "original query" is a single slot: the last root query
    /// submitted without an effective clear. When clear-cache is set and the
    /// query changed, filters are wiped and the slot re-remembered.
    fn apply_clear_cache_rule(&mut self, query: &str) {
        let remembered: Option<String> = get_json(self.session.as_ref(), ORIGINAL_QUERY_KEY);
        match remembered {
            None => self.remember_original(query),
            Some(original) => {
                if self.clear_cache && original != query {
                    if let Err(err) = self.filters.reset_all() {
                        tracing::warn!(%err, "failed to reset filters on cache clear");
                    }
                    self.remember_original(query);
                }
            }
        }
    }

    fn remember_original(&self, query: &str) {
        if let Err(err) = set_json(self.session.as_ref(), ORIGINAL_QUERY_KEY, &query) {
            tracing::warn!(%err, "failed to persist original query");
        }
    }

    pub async fn next_page(&mut self) -> SearchView {
        if !self.page_info().has_next() {
            return self.view();
        }
        self.page += 1;
        self.run_search().await
    }

    pub async fn prev_page(&mut self) -> SearchView {
        if !self.page_info().has_prev() {
            return self.view();
        }
        self.page -= 1;
        self.run_search().await
    }

    /// Parse a natural-language filter prompt, store the filter, and
    /// re-search at the current page. An unparsable prompt is a local
    /// validation failure; no request is made.
    pub async fn add_filter_prompt(&mut self, prompt: &str) -> Result<SearchView, String> {
        let filter = parse_filter_prompt(prompt).ok_or_else(|| PROMPT_HELP.to_string())?;
        self.add_filter(filter).await
    }

    pub async fn add_filter(&mut self, filter: Filter) -> Result<SearchView, String> {
        self.filters.add(filter).map_err(|err| err.to_string())?;
        Ok(self.run_search().await)
    }

    pub async fn remove_filter(&mut self, index: usize) -> SearchView {
        match self.filters.remove(index) {
            Ok(Some(_)) => self.run_search().await,
            Ok(None) => self.view(),
            Err(err) => {
                tracing::warn!(%err, "failed to remove filter");
                self.view()
            }
        }
    }

    pub async fn reset_filters(&mut self) -> SearchView {
        if let Err(err) = self.filters.reset_all() {
            tracing::warn!(%err, "failed to reset filters");
            return self.view();
        }
        self.run_search().await
    }

    async fn run_search(&mut self) -> SearchView {
        self.phase = SearchPhase::Searching;
        self.banner = None;
        self.rows.clear();

        let request = SearchRequest {
            query: self.query.clone(),
            min_relevance: self.min_relevance,
            page: self.page,
            results_per_page: self.options.results_per_page,
            clear_cache: self.clear_cache,
            filters: self.filters.load(),
        };
        let ticket = self.guard.issue();
        let outcome = self.backend.search(&request).await;
        if !self.guard.commit(ticket) {
            tracing::debug!(ticket, "discarding stale search response");
            return self.view();
        }

        match outcome {
            Ok(response) => {
                self.counts = response.filter_counts;
                if response.results.is_empty() {
                    self.phase = SearchPhase::Empty;
                    self.banner = Some(EMPTY_RESULTS_BANNER.to_string());
                    self.total = 0;
                    self.selection.set_emails(Vec::new());
                } else {
                    self.phase = SearchPhase::Results;
                    self.total = response.total_results;
                    self.banner = Some(format!(
                        "Se encontraron {} correos relevantes",
                        response.total_results
                    ));
                    self.rows = response.results;
                    self.selection.set_emails(self.row_refs());
                }
            }
            Err(err) => {
                self.phase = SearchPhase::Failed;
                self.banner = Some(err.to_string());
                self.total = 0;
                self.counts = FilterCounts::default();
            }
        }
        self.view()
    }

    fn row_refs(&self) -> Vec<EmailRef> {
        self.rows
            .iter()
            .map(|hit| EmailRef {
                message_id: hit.message_id.clone(),
                index: hit.index.clone(),
                subject: hit.subject.clone(),
                from: hit.from.clone(),
                date: hit.date.clone(),
            })
            .collect()
    }

    fn page_info(&self) -> PageInfo {
        PageInfo::new(self.page, self.options.results_per_page, self.total)
    }

    pub fn view(&self) -> SearchView {
        let counts = &self.counts;
        let filters = self
            .filters
            .load()
            .into_iter()
            .map(|filter| FilterView {
                count: FilterStore::count_for(&filter, counts),
                action: filter.action,
                terms: filter.terms,
            })
            .collect();
        SearchView {
            phase: self.phase,
            banner: self.banner.clone(),
            rows: self.rows.clone(),
            page: self.page_info(),
            filters,
            theme_button_visible: self.phase == SearchPhase::Results,
        }
    }

    /// Per-row "mark not relevant": fire the feedback call and report the
    /// outcome as a user-facing alert string. No optimistic row removal.
    pub async fn mark_not_relevant(&mut self, message_id: &str) -> String {
        match self
            .backend
            .feedback(&self.query, message_id, false)
            .await
        {
            Ok(()) => FEEDBACK_OK.to_string(),
            Err(err) => format!("No se pudo enviar el feedback: {err}"),
        }
    }

    /// Fetch a single email for the detail modal. Rapid repeated clicks are
    /// debounced, and a stale response (an older click resolving after a
    /// newer one) is discarded as `Ok(None)`.
    pub async fn open_detail(
        &mut self,
        ident: &EmailIdent,
    ) -> Result<Option<EmailDetail>, String> {
        if !self.row_debounce.allow() {
            return Ok(None);
        }
        let ticket = self.modal_guard.issue();
        let outcome = self.backend.email_detail(ident).await;
        if !self.modal_guard.commit(ticket) {
            tracing::debug!(ticket, "discarding stale email detail");
            return Ok(None);
        }
        outcome.map(Some).map_err(|err| err.to_string())
    }

    /// On-demand list of the emails one stored filter matches. Never cached.
    pub async fn filter_matches(
        &mut self,
        index: usize,
        page: u64,
    ) -> Result<Option<Vec<SearchHit>>, String> {
        let Some(filter) = self.filters.load().into_iter().nth(index) else {
            return Err("Filtro desconocido.".to_string());
        };
        if !self.row_debounce.allow() {
            return Ok(None);
        }
        let ticket = self.modal_guard.issue();
        let outcome = self
            .backend
            .filter_emails(&self.query, &filter, page, self.options.results_per_page)
            .await;
        if !self.modal_guard.commit(ticket) {
            tracing::debug!(ticket, "discarding stale filter match list");
            return Ok(None);
        }
        outcome.map(Some).map_err(|err| err.to_string())
    }

    /// Bulk "mark this filter's matches as not relevant", with the affected
    /// count folded into the confirmation string.
    pub async fn filter_not_relevant(&mut self, index: usize) -> Result<String, String> {
        let Some(filter) = self.filters.load().into_iter().nth(index) else {
            return Err("Filtro desconocido.".to_string());
        };
        let outcome = self
            .backend
            .bulk_feedback(&self.query, &filter)
            .await
            .map_err(|err| err.to_string())?;
        Ok(format!(
            "Se marcaron {} correos como no relevantes.",
            outcome.affected_count
        ))
    }

    /// Theme analysis over the rows currently rendered.
    pub async fn analyze_visible(&mut self) -> Result<Vec<Theme>, String> {
        let ids: Vec<String> = self
            .rows
            .iter()
            .map(|hit| hit.ident().as_str().to_string())
            .collect();
        self.analyze(ids).await
    }

    /// Theme analysis over every email the query matches, not just the
    /// rendered page.
    pub async fn analyze_all_matching(&mut self) -> Result<Vec<Theme>, String> {
        if self.total <= self.rows.len() as u64 {
            return self.analyze_visible().await;
        }
        let request = SearchRequest {
            query: self.query.clone(),
            min_relevance: self.min_relevance,
            page: 1,
            results_per_page: self.total,
            clear_cache: false,
            filters: self.filters.load(),
        };
        let response = self
            .backend
            .search(&request)
            .await
            .map_err(|err| err.to_string())?;
        let ids = response
            .results
            .iter()
            .map(|hit| hit.ident().as_str().to_string())
            .collect();
        self.analyze(ids).await
    }

    async fn analyze(&mut self, ids: Vec<String>) -> Result<Vec<Theme>, String> {
        if ids.is_empty() {
            return Err("No hay correos para analizar.".to_string());
        }
        match self.backend.analyze_themes(&ids).await {
            Ok(themes) => {
                self.selection.set_themes(themes.clone());
                Ok(themes)
            }
            Err(err) => {
                self.selection.clear_themes();
                Err(err.to_string())
            }
        }
    }
}
