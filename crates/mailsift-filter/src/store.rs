use mailsift_core::{Filter, FilterCounts};
use mailsift_session::{get_json, set_json, SessionError, SessionStore, FILTERS_KEY};
use std::sync::Arc;

/// Ordered filter list persisted in the session store under [`FILTERS_KEY`].
///
/// The store only mutates and persists; triggering the follow-up search is
/// the owning controller's job.
#[derive(Clone)]
pub struct FilterStore {
    session: Arc<dyn SessionStore>,
}

impl FilterStore {
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self { session }
    }

    pub fn load(&self) -> Vec<Filter> {
        get_json(self.session.as_ref(), FILTERS_KEY).unwrap_or_default()
    }

    pub fn add(&self, filter: Filter) -> Result<Vec<Filter>, SessionError> {
        let mut filters = self.load();
        filters.push(filter);
        set_json(self.session.as_ref(), FILTERS_KEY, &filters)?;
        Ok(filters)
    }

    /// Remove by position. Out-of-range indexes are a no-op returning `None`.
    pub fn remove(&self, index: usize) -> Result<Option<Vec<Filter>>, SessionError> {
        let mut filters = self.load();
        if index >= filters.len() {
            return Ok(None);
        }
        filters.remove(index);
        set_json(self.session.as_ref(), FILTERS_KEY, &filters)?;
        Ok(Some(filters))
    }

    pub fn reset_all(&self) -> Result<(), SessionError> {
        set_json(self.session.as_ref(), FILTERS_KEY, &Vec::<Filter>::new())
    }

    /// Server-reported match count for one filter. A key miss reads as zero;
    /// it usually means the client and server disagree on normalization.
    pub fn count_for(filter: &Filter, counts: &FilterCounts) -> u64 {
        let key = filter.terms_key();
        match counts.for_action(filter.action).get(&key) {
            Some(count) => *count,
            None => {
                tracing::debug!(%key, "no server count for filter, defaulting to 0");
                0
            }
        }
    }
}
