use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::collect::collector::CollectStats;
use crate::collect::options::CollectOptions;
use crate::screen::screen_model::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassTrigger {
    /// Direct call from the automation driver.
    Call,
    /// Debounced scroll/resize refresh.
    Refresh,
}

/// One line of the pass trace.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub pass: u64,
    pub trigger: PassTrigger,

    pub options: CollectOptions,
    pub stats: CollectStats,

    pub records: usize,
    pub fingerprint: Option<String>,
    pub top_index: Option<usize>,
}

impl TraceEvent {
    pub fn now(pass: u64, trigger: PassTrigger, options: &CollectOptions) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            pass,
            trigger,
            options: options.clone(),
            stats: CollectStats::default(),
            records: 0,
            fingerprint: None,
            top_index: None,
        }
    }

    pub fn with_stats(mut self, stats: &CollectStats) -> Self {
        self.stats = stats.clone();
        self
    }

    pub fn with_snapshot(mut self, snapshot: &Snapshot) -> Self {
        self.records = snapshot.len();
        self.fingerprint = Some(snapshot.fingerprint());
        self.top_index = snapshot.records.first().map(|r| r.index);
        self
    }
}
