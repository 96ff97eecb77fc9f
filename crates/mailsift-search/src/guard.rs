use std::sync::atomic::{AtomicU64, Ordering};

/// Stale-response guard. There is no cancellation of in-flight requests, so
/// a slow response can arrive after a newer one has rendered; every request
/// takes a ticket and only the newest ticket may commit its response.
#[derive(Debug, Default)]
pub struct RaceGuard {
    next: AtomicU64,
    rendered: AtomicU64,
}

impl RaceGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a monotonically increasing ticket before issuing a request.
    pub fn issue(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Returns `true` if the response for `ticket` is still current and may
    /// be rendered; `false` means a newer response already committed.
    pub fn commit(&self, ticket: u64) -> bool {
        let previous = self.rendered.fetch_max(ticket, Ordering::SeqCst);
        ticket >= previous
    }
}
