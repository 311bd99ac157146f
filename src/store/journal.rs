//! Request/response journal.
//!
//! Holds the Request Store, the Response Store and the identifier counter
//! behind one mutex, so id assignment and every map write are linearized.
//! The lock is never held across an `.await`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::observability::metrics;
use crate::relay::types::{RelayId, RequestRecord, ResponseRecord};

#[derive(Default)]
struct JournalInner {
    last_id: RelayId,
    requests: HashMap<RelayId, RequestRecord>,
    responses: HashMap<RelayId, ResponseRecord>,
}

/// Append-only store of relay calls and their outcomes.
#[derive(Default)]
pub struct RelayJournal {
    inner: Mutex<JournalInner>,
}

/// One journal entry. `response` is `None` while the call is in flight or
/// when its execution failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalEntry {
    pub id: RelayId,
    pub request: RequestRecord,
    pub response: Option<ResponseRecord>,
}

/// Journal counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JournalStats {
    pub requests: usize,
    pub responses: usize,
    pub last_id: RelayId,
}

impl RelayJournal {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, JournalInner> {
        // Every write is a single insert, so a poisoned guard still holds consistent maps.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Assign the next identifier and store the request under it.
    pub fn record_request(&self, request: RequestRecord) -> RelayId {
        let mut inner = self.lock();
        inner.last_id += 1;
        let id = inner.last_id;
        inner.requests.insert(id, request);
        metrics::record_journal_size("requests", inner.requests.len());
        id
    }

    /// Store the outcome of call `id`.
    pub fn record_response(&self, id: RelayId, response: ResponseRecord) {
        let mut inner = self.lock();
        inner.responses.insert(id, response);
        metrics::record_journal_size("responses", inner.responses.len());
    }

    pub fn request(&self, id: RelayId) -> Option<RequestRecord> {
        self.lock().requests.get(&id).cloned()
    }

    pub fn response(&self, id: RelayId) -> Option<ResponseRecord> {
        self.lock().responses.get(&id).cloned()
    }

    /// The request stored under `id` together with its outcome, if any.
    pub fn entry(&self, id: RelayId) -> Option<JournalEntry> {
        let inner = self.lock();
        inner.requests.get(&id).map(|request| JournalEntry {
            id,
            request: request.clone(),
            response: inner.responses.get(&id).cloned(),
        })
    }

    /// All entries in identifier order.
    pub fn entries(&self) -> Vec<JournalEntry> {
        let inner = self.lock();
        let mut entries: Vec<JournalEntry> = inner
            .requests
            .iter()
            .map(|(id, request)| JournalEntry {
                id: *id,
                request: request.clone(),
                response: inner.responses.get(id).cloned(),
            })
            .collect();
        entries.sort_by_key(|e| e.id);
        entries
    }

    pub fn stats(&self) -> JournalStats {
        let inner = self.lock();
        JournalStats {
            requests: inner.requests.len(),
            responses: inner.responses.len(),
            last_id: inner.last_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashSet};
    use std::sync::Arc;

    fn request(url: &str) -> RequestRecord {
        RequestRecord {
            method: "GET".into(),
            url: url.into(),
            headers: BTreeMap::new(),
        }
    }

    fn response(id: RelayId) -> ResponseRecord {
        ResponseRecord {
            id,
            status: 200,
            headers: BTreeMap::new(),
            length: 0,
        }
    }

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let journal = RelayJournal::new();
        assert_eq!(journal.record_request(request("http://a/")), 1);
        assert_eq!(journal.record_request(request("http://b/")), 2);
        assert_eq!(journal.record_request(request("http://c/")), 3);
        assert_eq!(journal.request(2).unwrap().url, "http://b/");
    }

    #[test]
    fn test_entry_without_response() {
        let journal = RelayJournal::new();
        let failed = journal.record_request(request("not a url"));
        let ok = journal.record_request(request("http://a/"));
        journal.record_response(ok, response(ok));

        let entry = journal.entry(failed).unwrap();
        assert!(entry.response.is_none());
        assert_eq!(journal.entry(ok).unwrap().response, Some(response(ok)));
        assert!(journal.entry(99).is_none());

        assert_eq!(
            journal.stats(),
            JournalStats { requests: 2, responses: 1, last_id: 2 }
        );
    }

    #[test]
    fn test_entries_are_ordered() {
        let journal = RelayJournal::new();
        for i in 0..20 {
            journal.record_request(request(&format!("http://h{}/", i)));
        }
        let ids: Vec<_> = journal.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_concurrent_ids_are_unique_without_gaps() {
        let journal = Arc::new(RelayJournal::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let journal = journal.clone();
                std::thread::spawn(move || {
                    (0..250)
                        .map(|_| journal.record_request(request("http://a/")))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            let ids = handle.join().unwrap();
            // Each thread observes its own ids strictly increasing.
            assert!(ids.windows(2).all(|w| w[0] < w[1]));
            seen.extend(ids);
        }

        assert_eq!(seen.len(), 2000);
        assert_eq!(seen.iter().max(), Some(&2000));
        assert_eq!(journal.stats().requests, 2000);
    }
}
