//! Correlation storage for in-flight spans.
//!
//! The store maps randomly generated correlation ids to the metadata of spans
//! that were opened with persistence and not yet closed. It is the only piece of
//! the engine with shared mutable state: a single mutex guards the map, and no
//! formatting, sink I/O, or stopwatch query ever happens inside the critical
//! section.

use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// Metadata held for one in-flight span between its open and its close.
///
/// A record exists in the store if and only if a matching open requested
/// persistence and the corresponding close has not yet consumed it.
#[derive(Debug)]
pub struct SpanRecord<W> {
    /// Operation name as given at open time.
    pub name: String,
    /// Free-form descriptive text, empty when not supplied.
    pub caption: String,
    /// Severity the open line was emitted at; replayed identically at close.
    pub debug_mode: bool,
    /// Present only when timing was requested at open time.
    pub stopwatch: Option<W>,
}

/// Thread-safe map from correlation id to in-flight span record.
///
/// Every successful lookup is also a removal, so a single exclusive lock is the
/// right primitive; there is no read-only access pattern to split out.
pub struct CorrelationStore<W> {
    spans: Mutex<HashMap<Uuid, SpanRecord<W>>>,
}

impl<W> CorrelationStore<W> {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self {
            spans: Mutex::new(HashMap::new()),
        }
    }

    /// Insert a record under a fresh random correlation id and return the id.
    ///
    /// The returned id is never nil.
    pub fn register(&self, record: SpanRecord<W>) -> Uuid {
        let mut spans = self.spans.lock().unwrap();
        let mut id = Uuid::new_v4();
        // Freshly generated v4 ids are effectively unique; regenerating on a
        // hit is a defensive check, not a retry strategy.
        while spans.contains_key(&id) {
            id = Uuid::new_v4();
        }
        spans.insert(id, record);
        id
    }

    /// Remove and return the record for `id`, if present.
    ///
    /// A nil id is rejected without touching the lock. At most one caller can
    /// observe the record for a given id; any later call sees `None`.
    pub fn take(&self, id: Uuid) -> Option<SpanRecord<W>> {
        if id.is_nil() {
            return None;
        }
        self.spans.lock().unwrap().remove(&id)
    }

    /// Number of spans currently open.
    pub fn len(&self) -> usize {
        self.spans.lock().unwrap().len()
    }

    /// Check whether no span is currently open.
    pub fn is_empty(&self) -> bool {
        self.spans.lock().unwrap().is_empty()
    }

    /// Snapshot of every still-open span as `(id, name)` pairs.
    ///
    /// Entries reported here at shutdown are spans that were opened with
    /// persistence but never closed.
    pub fn unmatched_spans(&self) -> Vec<(Uuid, String)> {
        let spans = self.spans.lock().unwrap();
        spans
            .iter()
            .map(|(id, record)| (*id, record.name.clone()))
            .collect()
    }
}

impl<W> Default for CorrelationStore<W> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stopwatch::WallclockStopwatch;

    fn record(name: &str) -> SpanRecord<WallclockStopwatch> {
        SpanRecord {
            name: name.to_string(),
            caption: String::new(),
            debug_mode: false,
            stopwatch: None,
        }
    }

    #[test]
    fn test_register_returns_non_nil_id() {
        let store = CorrelationStore::new();
        let id = store.register(record("Load"));
        assert!(!id.is_nil());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_take_consumes_the_record() {
        let store = CorrelationStore::new();
        let id = store.register(record("Load"));

        let taken = store.take(id);
        assert_eq!(taken.unwrap().name, "Load");
        assert!(store.is_empty());
    }

    #[test]
    fn test_take_is_at_most_once() {
        let store = CorrelationStore::new();
        let id = store.register(record("Load"));

        assert!(store.take(id).is_some());
        assert!(store.take(id).is_none());
    }

    #[test]
    fn test_nil_id_is_rejected() {
        let store: CorrelationStore<WallclockStopwatch> = CorrelationStore::new();
        assert!(store.take(Uuid::nil()).is_none());
    }

    #[test]
    fn test_unknown_id_returns_none() {
        let store: CorrelationStore<WallclockStopwatch> = CorrelationStore::new();
        assert!(store.take(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_unmatched_spans_snapshot() {
        let store = CorrelationStore::new();
        store.register(record("Load"));
        let kept = store.register(record("Store"));

        let open = store.unmatched_spans();
        assert_eq!(open.len(), 2);

        store.take(kept);
        let open = store.unmatched_spans();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].1, "Load");
    }
}
