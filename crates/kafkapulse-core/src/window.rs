//! Fixed-size rolling window of metric records.
//!
//! Oldest record first, newest last. Once initialized the length never
//! changes: every advance drops exactly the oldest record and appends exactly
//! one record derived from the newest.

use std::collections::VecDeque;

use serde::Serialize;

use crate::metric::MetricRecord;
use crate::simulator::MetricSimulator;
use crate::trend::ConnectionTrend;

/// Number of records shown on the dashboard.
pub const DEFAULT_WINDOW_SIZE: usize = 20;

/// Chronologically ordered, fixed-length history of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricWindow {
    records: VecDeque<MetricRecord>,
    /// 0 after initialization, +1 per advance.
    generation: u64,
}

impl MetricWindow {
    /// A window holding no records.
    pub fn empty() -> Self {
        Self {
            records: VecDeque::new(),
            generation: 0,
        }
    }

    /// Fill a window with `size` chained records.
    ///
    /// One seed record is generated from the baseline and discarded; it only
    /// serves as the predecessor of the first retained record. Keeping the
    /// extra call keeps the draw sequence identical for seeded runs.
    pub fn initialize(sim: &mut MetricSimulator, size: usize) -> Self {
        let mut last = sim.generate_next(None);
        let mut records = VecDeque::with_capacity(size);
        for _ in 0..size {
            last = sim.generate_next(Some(&last));
            records.push_back(last.clone());
        }
        log::debug!(
            "initialized window: {} records, last connections {}",
            records.len(),
            last.connections
        );
        Self {
            records,
            generation: 0,
        }
    }

    /// Build a window from existing records (oldest first).
    pub fn from_records(records: Vec<MetricRecord>) -> Self {
        Self {
            records: records.into(),
            generation: 0,
        }
    }

    /// The next window: oldest record removed, successor of the newest
    /// appended. `self` is left untouched.
    ///
    /// An empty window stays empty; only the generation moves.
    pub fn advance(&self, sim: &mut MetricSimulator) -> Self {
        let mut next = self.clone();
        next.advance_in_place(sim);
        next
    }

    /// In-place form of [`MetricWindow::advance`] for the single owner.
    pub fn advance_in_place(&mut self, sim: &mut MetricSimulator) {
        self.generation += 1;
        let Some(newest) = self.records.back() else {
            return;
        };
        let record = sim.generate_next(Some(newest));
        self.records.pop_front();
        self.records.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn records(&self) -> impl ExactSizeIterator<Item = &MetricRecord> + DoubleEndedIterator {
        self.records.iter()
    }

    pub fn to_vec(&self) -> Vec<MetricRecord> {
        self.records.iter().cloned().collect()
    }

    pub fn get(&self, idx: usize) -> Option<&MetricRecord> {
        self.records.get(idx)
    }

    pub fn oldest(&self) -> Option<&MetricRecord> {
        self.records.front()
    }

    pub fn latest(&self) -> Option<&MetricRecord> {
        self.records.back()
    }

    /// Second newest record, if any.
    pub fn previous(&self) -> Option<&MetricRecord> {
        let n = self.records.len();
        if n < 2 { None } else { self.records.get(n - 2) }
    }

    /// Trend of the two newest records.
    ///
    /// With one record it is compared to itself; with none both sides are
    /// zero. Either way the trend is 0%.
    pub fn trend(&self) -> ConnectionTrend {
        let current = self.latest().map_or(0, |r| r.connections);
        let previous = self.previous().map_or(current, |r| r.connections);
        ConnectionTrend::between(current, previous)
    }

    /// Connection counts, oldest first.
    pub fn connection_series(&self) -> Vec<u64> {
        self.records.iter().map(|r| r.connections).collect()
    }
}

impl Default for MetricWindow {
    fn default() -> Self {
        Self::empty()
    }
}
