//! Change feed backing the store's live queries.
//!
//! One watch channel carries full-table snapshots for the list query, and one
//! channel per subscribed id carries that record's state. The writer thread
//! publishes after every commit; subscribers read at their own pace and only
//! ever see whole snapshots, never partial writes.

use crate::record::{CaseRecord, RecordId};
use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::sync::watch;

pub(crate) struct ChangeFeed {
    /// Full-snapshot channel for the list query.
    list: watch::Sender<Vec<CaseRecord>>,
    /// Per-id channels, created on first subscription and pruned once the
    /// last receiver goes away.
    by_id: Mutex<HashMap<RecordId, watch::Sender<Option<CaseRecord>>>>,
}

impl ChangeFeed {
    /// Create a feed seeded with the current table snapshot.
    pub(crate) fn new(snapshot: Vec<CaseRecord>) -> Self {
        let (list, _) = watch::channel(snapshot);
        Self {
            list,
            by_id: Mutex::new(HashMap::new()),
        }
    }

    /// Subscribe to the full-table live query.
    pub(crate) fn watch_list(&self) -> watch::Receiver<Vec<CaseRecord>> {
        self.list.subscribe()
    }

    /// Subscribe to a single record's live query, seeded with its current
    /// state (`None` while absent).
    pub(crate) fn watch_record(&self, id: RecordId) -> watch::Receiver<Option<CaseRecord>> {
        let mut by_id = self.by_id.lock();
        if let Some(sender) = by_id.get(&id) {
            return sender.subscribe();
        }
        let current = self
            .list
            .borrow()
            .iter()
            .find(|record| record.id == id)
            .cloned();
        let (sender, receiver) = watch::channel(current);
        by_id.insert(id, sender);
        receiver
    }

    /// Publish a committed snapshot to all subscribers.
    ///
    /// Per-id channels only notify when the identified record actually
    /// changed; the list channel notifies on every commit.
    pub(crate) fn publish(&self, snapshot: Vec<CaseRecord>) {
        let mut by_id = self.by_id.lock();
        by_id.retain(|id, sender| {
            if sender.receiver_count() == 0 {
                return false;
            }
            let next = snapshot.iter().find(|record| record.id == *id).cloned();
            sender.send_if_modified(|current| {
                if *current == next {
                    return false;
                }
                *current = next;
                true
            });
            true
        });
        self.list.send_replace(snapshot);
    }
}
