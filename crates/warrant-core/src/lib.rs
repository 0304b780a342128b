//! # Warrant Core - Shared Value Types
//!
//! Leaf types for the warrant permission system: opaque argument
//! commitments, the principal and operation identifiers ledger keys are
//! built from, and the unified error type every workspace crate returns.
//!
//! Nothing in this crate holds state or takes locks; the ledger machinery
//! lives in `warrant-ledger` and the enforcement facade in `warrant-guards`.

pub mod commitment;
pub mod errors;
pub mod identifiers;

pub use commitment::{Commitment, COMMITMENT_LEN};
pub use errors::{Result, WarrantError};
pub use identifiers::{OperationKey, Principal};
