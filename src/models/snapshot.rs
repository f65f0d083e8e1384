use chrono::{DateTime, Duration, Local};
use derive_getters::Getters;
use derive_new::new;

use super::{AssetKind, ValuationRow};

pub const DEFAULT_REFRESH_MINUTES: u32 = 15;

/// Rows produced by one valuation pass.
#[derive(Clone, Debug, Getters, new)]
pub struct Snapshot {
    rows: Vec<ValuationRow>,
    captured_at: DateTime<Local>,
}

impl Snapshot {
    /// Kinds present in the snapshot, in order of first appearance.
    pub fn kinds(&self) -> Vec<AssetKind> {
        let mut kinds = Vec::new();
        for row in &self.rows {
            if !kinds.contains(row.kind()) {
                kinds.push(*row.kind());
            }
        }
        kinds
    }
}

/// Holds the most recent snapshot and decides when it has gone stale.
#[derive(Clone, Debug)]
pub struct SnapshotCache {
    snapshot: Option<Snapshot>,
    refresh_interval: Duration,
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new(Duration::minutes(i64::from(DEFAULT_REFRESH_MINUTES)))
    }
}

impl SnapshotCache {
    pub fn new(refresh_interval: Duration) -> Self {
        Self {
            snapshot: None,
            refresh_interval,
        }
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    pub fn is_stale(&self, now: DateTime<Local>) -> bool {
        match &self.snapshot {
            Some(snapshot) => now - *snapshot.captured_at() > self.refresh_interval,
            None => true,
        }
    }

    pub fn store(&mut self, snapshot: Snapshot) {
        self.snapshot = Some(snapshot);
    }

    pub fn invalidate(&mut self) {
        self.snapshot = None;
    }
}
