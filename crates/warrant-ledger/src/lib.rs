//! # Warrant Ledger - Permission Storage and Consumption
//!
//! The permission ledger and its consumption protocol. An administrator
//! pre-approves, per (operation, caller) pair, an ordered list of opaque
//! commitments; guarded calls then spend them one match at a time, either
//! in strict grant order ([`AccessMode::Sequential`]) or as an unordered
//! multiset bounded by per-value supply ([`AccessMode::Multiset`]).
//!
//! A new grant for a pair always replaces the previous entry wholesale:
//! unconsumed supply never carries over, even when the new list is
//! identical to the old one. Entries for distinct pairs are fully
//! independent.

pub mod admin;
pub mod entry;
pub mod events;
pub mod ledger;

pub use admin::AdminAuthority;
pub use entry::{AccessMode, PermissionEntry};
pub use events::GrantEvent;
pub use ledger::PermissionLedger;
