use crate::AdminError;
use mailsift_api::Backend;
use mailsift_core::{DashboardMetrics, Debouncer};
use std::sync::Arc;
use std::time::Duration;

/// Metrics panel state. Refresh requests inside the debounce window are
/// answered from the last fetched snapshot instead of hitting the backend.
pub struct DashboardController<B> {
    backend: Arc<B>,
    debounce: Debouncer,
    last: Option<DashboardMetrics>,
}

impl<B: Backend> DashboardController<B> {
    pub fn new(backend: Arc<B>, debounce: Duration) -> Self {
        Self {
            backend,
            debounce: Debouncer::new(debounce),
            last: None,
        }
    }

    /// Returns `None` when debounced and no snapshot exists yet.
    pub async fn refresh(&mut self) -> Result<Option<DashboardMetrics>, AdminError> {
        if !self.debounce.allow() {
            return Ok(self.last.clone());
        }
        let metrics = self.backend.dashboard_metrics().await?;
        self.last = Some(metrics.clone());
        Ok(Some(metrics))
    }

    pub fn current(&self) -> Option<&DashboardMetrics> {
        self.last.as_ref()
    }
}
