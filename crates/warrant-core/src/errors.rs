//! Unified error type for warrant operations
//!
//! The whole system surfaces exactly two recoverable failures: an admin-only
//! entrypoint called by a non-admin, and a consume that found no usable
//! commitment. Nothing is swallowed or retried inside the core; every
//! failure is returned to the immediate caller.

use crate::identifiers::{OperationKey, Principal};
use serde::{Deserialize, Serialize};

/// Unified error type for all warrant operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum WarrantError {
    /// Caller of an admin-only entrypoint is not the current administrator.
    #[error("unauthorized: {principal} is not the current administrator")]
    Unauthorized {
        /// The principal that attempted the call.
        principal: Principal,
    },

    /// No usable commitment matched the presented digest.
    ///
    /// Covers a positional mismatch, an exhausted supply and a key that was
    /// never granted alike; callers cannot distinguish the three from this
    /// error.
    #[error("not allowed: no usable commitment for {caller} on {operation}")]
    NotAllowed {
        /// Operation the consume targeted.
        operation: OperationKey,
        /// Caller the consume was performed on behalf of.
        caller: Principal,
    },
}

impl WarrantError {
    /// Create an unauthorized error.
    pub fn unauthorized(principal: impl Into<Principal>) -> Self {
        Self::Unauthorized {
            principal: principal.into(),
        }
    }

    /// Create a not-allowed error.
    pub fn not_allowed(operation: impl Into<OperationKey>, caller: impl Into<Principal>) -> Self {
        Self::NotAllowed {
            operation: operation.into(),
            caller: caller.into(),
        }
    }
}

/// Standard Result type for warrant operations.
pub type Result<T> = std::result::Result<T, WarrantError>;
