use std::sync::atomic::{AtomicU64, Ordering};

/// Running counters for the worker loop. `poisoned` counts malformed
/// messages that were discarded; `failed` counts messages left on the
/// queue for redelivery.
#[derive(Debug, Default)]
pub struct ProcessingStats {
    received: AtomicU64,
    processed: AtomicU64,
    failed: AtomicU64,
    poisoned: AtomicU64,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_processed(&self) {
        self.processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_poisoned(&self) {
        self.poisoned.fetch_add(1, Ordering::Relaxed);
    }

    pub fn received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }

    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    pub fn poisoned(&self) -> u64 {
        self.poisoned.load(Ordering::Relaxed)
    }

    pub fn summary(&self) -> String {
        format!(
            "received={} processed={} failed={} poisoned={}",
            self.received(),
            self.processed(),
            self.failed(),
            self.poisoned()
        )
    }
}
