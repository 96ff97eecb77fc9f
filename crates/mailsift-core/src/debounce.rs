use std::time::{Duration, Instant};

/// Coalesces rapid repeated triggers (double-clicked rows, metric drill-downs)
/// into one request: the first call in a window passes, the rest are dropped.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    last: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Returns `true` if the caller should proceed with the action.
    pub fn allow(&mut self) -> bool {
        let now = Instant::now();
        match self.last {
            Some(previous) if now.duration_since(previous) < self.window => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forget the last trigger so the next call always passes.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_passes_second_is_coalesced() {
        let mut debouncer = Debouncer::new(Duration::from_secs(60));
        assert!(debouncer.allow());
        assert!(!debouncer.allow());
    }

    #[test]
    fn zero_window_never_coalesces() {
        let mut debouncer = Debouncer::new(Duration::ZERO);
        assert!(debouncer.allow());
        assert!(debouncer.allow());
    }

    #[test]
    fn reset_reopens_the_window() {
        let mut debouncer = Debouncer::new(Duration::from_secs(60));
        assert!(debouncer.allow());
        debouncer.reset();
        assert!(debouncer.allow());
    }
}
