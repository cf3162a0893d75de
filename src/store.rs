//! In-memory cache of the last fetched records and the charts derived from them.

use crate::models::{Charts, ChartsResponse, Record, RecordRow, RecordsResponse};
use crate::stats::build_charts;
use std::cmp::Reverse;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Ready,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    charts: Charts,
    state: LoadState,
    revision: u64,
}

impl RecordStore {
    /// Swaps in a freshly fetched list, newest first, and redraws the charts.
    pub fn replace(&mut self, mut records: Vec<Record>) {
        sort_newest_first(&mut records);
        self.charts = build_charts(&records);
        self.records = records;
        self.state = LoadState::Ready;
        self.revision = self.revision.wrapping_add(1);
    }

    /// Marks the last load as failed. Previously cached records are kept for export.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.state = LoadState::Failed(message.into());
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn rows(&self) -> Vec<RecordRow> {
        self.records.iter().map(RecordRow::from).collect()
    }

    pub fn records_response(&self) -> RecordsResponse {
        RecordsResponse {
            revision: self.revision,
            count: self.records.len(),
            records: self.rows(),
        }
    }

    pub fn charts_response(&self) -> ChartsResponse {
        ChartsResponse {
            revision: self.revision,
            activity: self.charts.activity.clone(),
            time: self.charts.time.clone(),
        }
    }
}

/// Stable sort, descending by parsed timestamp. Unparseable timestamps go last.
pub fn sort_newest_first(records: &mut [Record]) {
    records.sort_by_key(|record| Reverse(record.parsed_timestamp()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamped(location: &str, timestamp: &str) -> Record {
        Record {
            location: location.to_string(),
            timestamp: timestamp.to_string(),
            time: "30분".to_string(),
            activity: "산책".to_string(),
            ..Record::default()
        }
    }

    fn locations(store: &RecordStore) -> Vec<&str> {
        store
            .records()
            .iter()
            .map(|record| record.location.as_str())
            .collect()
    }

    #[test]
    fn replace_orders_newest_first() {
        let mut store = RecordStore::default();
        store.replace(vec![
            stamped("old", "2025-01-01T00:00:00Z"),
            stamped("newest", "2025-03-01T08:00:00+09:00"),
            stamped("middle", "2025-02-01 12:00:00"),
        ]);

        assert_eq!(locations(&store), vec!["newest", "middle", "old"]);
        assert_eq!(store.state(), &LoadState::Ready);
    }

    #[test]
    fn unparseable_timestamps_sort_last() {
        let mut store = RecordStore::default();
        store.replace(vec![
            stamped("broken", "not a date"),
            stamped("dated", "2025-01-01T00:00:00Z"),
            stamped("missing", ""),
        ]);

        assert_eq!(locations(&store), vec!["dated", "broken", "missing"]);
    }

    #[test]
    fn offset_less_iso_timestamps_sort_by_value() {
        let mut store = RecordStore::default();
        store.replace(vec![
            stamped("old", "2025-01-01T00:00:00Z"),
            stamped("newest_local", "2025-06-01T09:30:00"),
            stamped("newer_date_only", "2025-03-01"),
        ]);

        assert_eq!(
            locations(&store),
            vec!["newest_local", "newer_date_only", "old"]
        );
    }

    #[test]
    fn fractional_seconds_without_offset_are_parsed() {
        let mut store = RecordStore::default();
        store.replace(vec![
            stamped("plain", "2025-02-01T00:00:00.000Z"),
            stamped("fraction", "2025-02-01T00:00:00.500"),
        ]);

        assert_eq!(locations(&store), vec!["fraction", "plain"]);
    }

    #[test]
    fn replace_rebuilds_charts_and_bumps_revision() {
        let mut store = RecordStore::default();
        store.replace(vec![stamped("a", "2025-01-01T00:00:00Z")]);
        store.replace(vec![
            stamped("a", "2025-01-01T00:00:00Z"),
            stamped("b", "2025-01-02T00:00:00Z"),
        ]);

        let charts = store.charts_response();
        assert_eq!(charts.revision, 2);
        assert_eq!(charts.activity.bars.len(), 1);
        assert_eq!(charts.activity.bars[0].count, 2);
        assert_eq!(charts.time.slices.len(), 1);
    }

    #[test]
    fn failure_keeps_previous_records() {
        let mut store = RecordStore::default();
        store.replace(vec![stamped("kept", "2025-01-01T00:00:00Z")]);
        store.fail("boom");

        assert_eq!(store.state(), &LoadState::Failed("boom".to_string()));
        assert_eq!(store.records().len(), 1);
        assert_eq!(store.revision(), 1);
    }
}
