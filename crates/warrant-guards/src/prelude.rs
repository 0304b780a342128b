//! Convenience re-exports for crates consuming the guard surface

pub use crate::guard::PermissionGuard;
pub use warrant_core::{Commitment, OperationKey, Principal, Result, WarrantError};
pub use warrant_ledger::{AccessMode, AdminAuthority, GrantEvent, PermissionLedger};
