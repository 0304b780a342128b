//! Thin enforcement facade over the permission ledger

use std::sync::Arc;
use tracing::debug;
use warrant_core::{Commitment, OperationKey, Principal, Result};
use warrant_ledger::PermissionLedger;

/// Enforcement surface for guarded operations.
///
/// Consumers derive `presented` from their real call arguments with a
/// stable, deterministic encoding (canonical serialization fed to
/// [`Commitment::digest`]), call [`authorize`](Self::authorize) before any
/// side effect, and abort the whole operation when it fails. A failed
/// authorization consumes nothing.
#[derive(Debug, Clone)]
pub struct PermissionGuard {
    ledger: Arc<PermissionLedger>,
}

impl PermissionGuard {
    /// Wrap a shared ledger.
    pub fn new(ledger: Arc<PermissionLedger>) -> Self {
        Self { ledger }
    }

    /// The ledger this guard enforces against.
    pub fn ledger(&self) -> &Arc<PermissionLedger> {
        &self.ledger
    }

    /// Authorize one guarded call.
    ///
    /// Delegates to [`PermissionLedger::consume`]: success means one unit
    /// of pre-approved supply was spent and the operation may proceed.
    /// The ledger's error comes back unchanged.
    pub fn authorize(
        &self,
        operation: &OperationKey,
        caller: &Principal,
        presented: &Commitment,
    ) -> Result<()> {
        let result = self.ledger.consume(operation, caller, presented);
        if result.is_err() {
            debug!("guard denied {caller} on {operation}");
        }
        result
    }
}
