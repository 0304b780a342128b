//! Sharded permission ledger
//!
//! Maps (operation, caller) pairs to their permission entries. Grant and
//! consume hold one shard write lock for their whole critical section, so
//! the two can never interleave partially on the same entry, while entries
//! whose keys land on different shards stay independently mutable.

use crate::admin::AdminAuthority;
use crate::entry::{AccessMode, PermissionEntry};
use crate::events::GrantEvent;
use parking_lot::RwLock;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use tokio::sync::broadcast;
use tracing::{debug, info};
use warrant_core::{Commitment, OperationKey, Principal, Result, WarrantError};

/// Lookup key: at most one entry exists per (operation, caller) pair.
type LedgerKey = (OperationKey, Principal);

const SHARD_COUNT: usize = 16;
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Shared mutable store of permission entries.
///
/// All calls are synchronous and bounded-time; nothing here blocks,
/// suspends, retries or times out. Failure is immediate and final for that
/// call, and a failed call leaves no side effects.
#[derive(Debug)]
pub struct PermissionLedger {
    shards: Vec<RwLock<HashMap<LedgerKey, PermissionEntry>>>,
    admin: AdminAuthority,
    events: broadcast::Sender<GrantEvent>,
}

impl PermissionLedger {
    /// Create a ledger whose grants are gated by `initial_admin`.
    pub fn new(initial_admin: Principal) -> Self {
        let shards = (0..SHARD_COUNT)
            .map(|_| RwLock::new(HashMap::new()))
            .collect();
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            shards,
            admin: AdminAuthority::new(initial_admin),
            events,
        }
    }

    /// The authority gating grants and admin transfer.
    pub fn admin(&self) -> &AdminAuthority {
        &self.admin
    }

    /// Subscribe to grant notifications.
    ///
    /// Receivers that fall behind the channel capacity observe a lag and
    /// miss events; delivery is never part of the consumption protocol.
    pub fn subscribe(&self) -> broadcast::Receiver<GrantEvent> {
        self.events.subscribe()
    }

    /// Install or replace the entry for (operation, caller).
    ///
    /// Admin-only. The previous entry, including any unconsumed supply, is
    /// discarded wholesale; consumption progress never carries over, even
    /// when `commitments` is identical to the previous grant. An empty list
    /// installs an entry that can never be consumed, which clears the pair.
    pub fn grant(
        &self,
        granted_by: &Principal,
        operation: OperationKey,
        caller: Principal,
        commitments: Vec<Commitment>,
        mode: AccessMode,
    ) -> Result<()> {
        if !self.admin.is_admin(granted_by) {
            return Err(WarrantError::unauthorized(granted_by.clone()));
        }

        let entry = PermissionEntry::new(commitments.clone(), mode);
        let key = (operation.clone(), caller.clone());
        self.shard(&key).write().insert(key, entry);

        info!(
            "granted {} commitment(s) on {operation} to {caller} ({mode:?})",
            commitments.len()
        );
        // send() only fails when nobody is subscribed, which is fine.
        let _ = self.events.send(GrantEvent {
            operation,
            caller,
            commitments,
            mode,
        });
        Ok(())
    }

    /// Match `presented` against the pair's entry and consume one unit.
    ///
    /// A pair that was never granted fails exactly like an exhausted one.
    /// Failed consumes never mutate state; each success spends exactly one
    /// unit of supply.
    pub fn consume(
        &self,
        operation: &OperationKey,
        caller: &Principal,
        presented: &Commitment,
    ) -> Result<()> {
        let key = (operation.clone(), caller.clone());
        let consumed = self
            .shard(&key)
            .write()
            .get_mut(&key)
            .is_some_and(|entry| entry.try_consume(presented));

        if consumed {
            debug!("consumed {presented:?} for {caller} on {operation}");
            Ok(())
        } else {
            debug!("rejected {presented:?} for {caller} on {operation}");
            Err(WarrantError::not_allowed(operation.clone(), caller.clone()))
        }
    }

    /// Snapshot of the sequence stored by the last grant, in grant order.
    ///
    /// Reflects what was granted, not remaining supply. Empty when the pair
    /// was never granted.
    pub fn allowed_inputs(&self, operation: &OperationKey, caller: &Principal) -> Vec<Commitment> {
        let key = (operation.clone(), caller.clone());
        self.shard(&key)
            .read()
            .get(&key)
            .map(|entry| entry.sequence().to_vec())
            .unwrap_or_default()
    }

    /// Enforcement mode of the pair's current entry, if one was granted.
    pub fn mode(&self, operation: &OperationKey, caller: &Principal) -> Option<AccessMode> {
        let key = (operation.clone(), caller.clone());
        self.shard(&key).read().get(&key).map(PermissionEntry::mode)
    }

    fn shard(&self, key: &LedgerKey) -> &RwLock<HashMap<LedgerKey, PermissionEntry>> {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        &self.shards[(hasher.finish() as usize) % SHARD_COUNT]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn ledger() -> PermissionLedger {
        PermissionLedger::new(Principal::new("admin"))
    }

    fn commitments(labels: &[&str]) -> Vec<Commitment> {
        labels
            .iter()
            .map(|label| Commitment::digest(label.as_bytes()))
            .collect()
    }

    #[test]
    fn non_admin_grant_is_rejected_and_leaves_entry_unchanged() {
        let ledger = ledger();
        let op = OperationKey::new("func()");
        let client = Principal::new("client1");
        let list = commitments(&["h1"]);

        ledger
            .grant(
                &Principal::new("admin"),
                op.clone(),
                client.clone(),
                list.clone(),
                AccessMode::Sequential,
            )
            .unwrap();

        let result = ledger.grant(
            &Principal::new("mallory"),
            op.clone(),
            client.clone(),
            commitments(&["other"]),
            AccessMode::Multiset,
        );

        assert_matches!(result, Err(WarrantError::Unauthorized { .. }));
        // The targeted entry still holds the original grant.
        assert_eq!(ledger.allowed_inputs(&op, &client), list);
        assert_eq!(ledger.mode(&op, &client), Some(AccessMode::Sequential));
    }

    #[test]
    fn consume_on_ungranted_pair_fails_not_allowed() {
        let ledger = ledger();
        let result = ledger.consume(
            &OperationKey::new("func()"),
            &Principal::new("client1"),
            &Commitment::digest(b"h1"),
        );
        assert_matches!(result, Err(WarrantError::NotAllowed { .. }));
    }

    #[test]
    fn empty_grant_clears_the_pair() {
        let ledger = ledger();
        let admin = Principal::new("admin");
        let op = OperationKey::new("func()");
        let client = Principal::new("client1");
        let list = commitments(&["h1"]);

        ledger
            .grant(
                &admin,
                op.clone(),
                client.clone(),
                list,
                AccessMode::Multiset,
            )
            .unwrap();
        ledger
            .grant(
                &admin,
                op.clone(),
                client.clone(),
                Vec::new(),
                AccessMode::Multiset,
            )
            .unwrap();

        let result = ledger.consume(&op, &client, &Commitment::digest(b"h1"));
        assert_matches!(result, Err(WarrantError::NotAllowed { .. }));
        assert!(ledger.allowed_inputs(&op, &client).is_empty());
    }

    #[test]
    fn inspection_views_track_the_last_grant() {
        let ledger = ledger();
        let admin = Principal::new("admin");
        let op = OperationKey::new("func()");
        let client = Principal::new("client1");

        assert_eq!(ledger.mode(&op, &client), None);
        assert!(ledger.allowed_inputs(&op, &client).is_empty());

        let first = commitments(&["h1", "h2"]);
        ledger
            .grant(
                &admin,
                op.clone(),
                client.clone(),
                first.clone(),
                AccessMode::Sequential,
            )
            .unwrap();
        assert_eq!(ledger.allowed_inputs(&op, &client), first);
        assert_eq!(ledger.mode(&op, &client), Some(AccessMode::Sequential));
        assert!(ledger.mode(&op, &client).unwrap().is_sequential());

        // Consumption does not change the stored snapshot.
        ledger.consume(&op, &client, &first[0]).unwrap();
        assert_eq!(ledger.allowed_inputs(&op, &client), first);

        let second = commitments(&["h3"]);
        ledger
            .grant(
                &admin,
                op.clone(),
                client.clone(),
                second.clone(),
                AccessMode::Multiset,
            )
            .unwrap();
        assert_eq!(ledger.allowed_inputs(&op, &client), second);
        assert_eq!(ledger.mode(&op, &client), Some(AccessMode::Multiset));
    }

    #[test]
    fn grant_after_admin_transfer_follows_the_new_admin() {
        let ledger = ledger();
        let old_admin = Principal::new("admin");
        let new_admin = Principal::new("component");
        let op = OperationKey::new("func()");
        let client = Principal::new("client1");

        ledger.admin().transfer(&old_admin, new_admin.clone()).unwrap();

        assert_matches!(
            ledger.grant(
                &old_admin,
                op.clone(),
                client.clone(),
                commitments(&["h1"]),
                AccessMode::Sequential,
            ),
            Err(WarrantError::Unauthorized { .. })
        );
        ledger
            .grant(
                &new_admin,
                op,
                client,
                commitments(&["h1"]),
                AccessMode::Sequential,
            )
            .unwrap();
    }
}
