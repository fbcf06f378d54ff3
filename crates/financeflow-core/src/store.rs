//! Client-side account list
//!
//! The store owns the ordered list of account references. All writes go
//! through `&self` methods on the single watch sender; readers either take a
//! [`AccountStore::snapshot`] or hold a receiver from
//! [`AccountStore::subscribe`] and see every later change.
//!
//! New accounts are applied as a local projection. The list is never
//! re-fetched; a successful lookup of the same id reconciles the entry.

use crate::types::{AccountRef, SyncState};
use chrono::{DateTime, Utc};
use tokio::sync::watch;

#[derive(Debug)]
pub struct AccountStore {
    tx: watch::Sender<Vec<AccountRef>>,
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<AccountRef>> {
        self.tx.subscribe()
    }

    /// Current list in insertion order
    pub fn snapshot(&self) -> Vec<AccountRef> {
        self.tx.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }

    /// Append a projected reference for an account the backend just created
    pub fn record_created(&self, account_id: u64, created_at: DateTime<Utc>) -> AccountRef {
        let account = AccountRef::projected(account_id, created_at);
        self.tx.send_modify(|accounts| accounts.push(account.clone()));
        log::debug!("Projected account {} into store", account_id);
        account
    }

    /// Mark projected entries for `account_id` as confirmed by the backend.
    /// Returns whether anything changed.
    pub fn confirm(&self, account_id: u64) -> bool {
        let changed = self.tx.send_if_modified(|accounts| {
            let mut changed = false;
            for account in accounts
                .iter_mut()
                .filter(|a| a.account_id == account_id && a.sync == SyncState::Projected)
            {
                account.sync = SyncState::Confirmed;
                changed = true;
            }
            changed
        });
        if changed {
            log::debug!("Confirmed account {} against backend", account_id);
        }
        changed
    }

    /// The last `limit` entries, oldest first
    pub fn recent(&self, limit: usize) -> Vec<AccountRef> {
        let accounts = self.tx.borrow();
        let skip = accounts.len().saturating_sub(limit);
        accounts[skip..].to_vec()
    }

    /// Account ids as selector candidates
    pub fn ids(&self) -> Vec<String> {
        self.tx.borrow().iter().map(|a| a.account_id.to_string()).collect()
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_insertion_order() {
        let store = AccountStore::new();
        assert!(store.is_empty());

        let now = Utc::now();
        store.record_created(300, now);
        store.record_created(100, now);
        store.record_created(200, now);

        let ids: Vec<u64> = store.snapshot().iter().map(|a| a.account_id).collect();
        assert_eq!(ids, vec![300, 100, 200]);
        assert_eq!(store.ids(), vec!["300", "100", "200"]);
        assert!(store.snapshot().iter().all(|a| a.sync == SyncState::Projected));
    }

    #[test]
    fn test_confirm_reconciles_projection() {
        let store = AccountStore::new();
        store.record_created(12345, Utc::now());
        store.record_created(777, Utc::now());

        assert!(store.confirm(12345));
        assert!(!store.confirm(12345));
        assert!(!store.confirm(999));

        let snapshot = store.snapshot();
        assert_eq!(snapshot[0].sync, SyncState::Confirmed);
        assert_eq!(snapshot[1].sync, SyncState::Projected);
    }

    #[test]
    fn test_recent_takes_newest_entries() {
        let store = AccountStore::new();
        for id in 1..=7 {
            store.record_created(id, Utc::now());
        }
        let recent: Vec<u64> = store.recent(5).iter().map(|a| a.account_id).collect();
        assert_eq!(recent, vec![3, 4, 5, 6, 7]);
        assert_eq!(store.recent(50).len(), 7);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = AccountStore::new();
        let mut rx = store.subscribe();

        store.record_created(12345, Utc::now());
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 1);

        // No-op confirmations do not wake subscribers.
        store.confirm(1);
        assert!(!rx.has_changed().unwrap());

        store.confirm(12345);
        assert!(rx.has_changed().unwrap());
    }
}
