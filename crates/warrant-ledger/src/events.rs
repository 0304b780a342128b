//! Grant notifications
//!
//! Every successful grant emits a [`GrantEvent`] describing the installed
//! entry. Observers subscribe through
//! [`PermissionLedger::subscribe`](crate::PermissionLedger::subscribe) and
//! filter on operation and caller themselves. Emission is best-effort: a
//! missing or lagging observer never affects ledger state.

use crate::entry::AccessMode;
use serde::{Deserialize, Serialize};
use warrant_core::{Commitment, OperationKey, Principal};

/// Notification emitted when a grant installs or replaces an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantEvent {
    /// Operation the entry guards.
    pub operation: OperationKey,
    /// Caller the entry was granted to.
    pub caller: Principal,
    /// Full commitment list as granted, in order.
    pub commitments: Vec<Commitment>,
    /// Enforcement mode of the new entry.
    pub mode: AccessMode,
}

impl GrantEvent {
    /// True when the event concerns the given operation and caller.
    pub fn concerns(&self, operation: &OperationKey, caller: &Principal) -> bool {
        self.operation == *operation && self.caller == *caller
    }
}
