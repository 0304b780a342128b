//! Per-pair permission entry state machine
//!
//! Exactly one [`PermissionEntry`] exists per (operation, caller) pair at a
//! time. The granted sequence is immutable after install; consumption only
//! advances the cursor (sequential mode) or decrements per-commitment
//! supply (multiset mode). An exhausted entry behaves exactly like a
//! missing one from the consumer's point of view.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use warrant_core::Commitment;

/// Enforcement mode for a permission entry, fixed at grant time.
///
/// A later grant for the same pair may pick a different mode; the mode of
/// an installed entry never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessMode {
    /// Commitments must be consumed strictly in grant order.
    Sequential,
    /// Commitments may be consumed in any order, bounded by per-value
    /// supply counts.
    Multiset,
}

impl AccessMode {
    /// True when the mode enforces strict grant-order consumption.
    pub fn is_sequential(&self) -> bool {
        matches!(self, Self::Sequential)
    }
}

/// Consumption state for one (operation, caller) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionEntry {
    /// Commitments in grant order. Duplicates permitted. Never mutated
    /// after install.
    sequence: Vec<Commitment>,
    mode: AccessMode,
    /// Sequential mode: index of the next expected commitment.
    cursor: usize,
    /// Multiset mode: remaining uses per distinct commitment, counted once
    /// at grant time.
    remaining: HashMap<Commitment, u32>,
}

impl PermissionEntry {
    /// Build a fresh entry from a granted commitment list.
    pub fn new(commitments: Vec<Commitment>, mode: AccessMode) -> Self {
        let remaining = match mode {
            AccessMode::Sequential => HashMap::new(),
            AccessMode::Multiset => {
                let mut counts: HashMap<Commitment, u32> =
                    HashMap::with_capacity(commitments.len());
                for commitment in &commitments {
                    *counts.entry(*commitment).or_insert(0) += 1;
                }
                counts
            }
        };
        Self {
            sequence: commitments,
            mode,
            cursor: 0,
            remaining,
        }
    }

    /// The granted sequence as stored, in grant order.
    ///
    /// Reflects what the last grant installed, not remaining supply.
    pub fn sequence(&self) -> &[Commitment] {
        &self.sequence
    }

    /// Enforcement mode, fixed for this entry's lifetime.
    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    /// True once no further consume can succeed.
    pub fn is_exhausted(&self) -> bool {
        match self.mode {
            AccessMode::Sequential => self.cursor >= self.sequence.len(),
            AccessMode::Multiset => self.remaining.values().all(|&count| count == 0),
        }
    }

    /// Attempt to consume one unit matching `presented`.
    ///
    /// Returns `true` and spends exactly one unit on a match. Returns
    /// `false` and leaves the entry untouched otherwise: a sequential
    /// mismatch does not advance the cursor and never searches ahead.
    pub(crate) fn try_consume(&mut self, presented: &Commitment) -> bool {
        match self.mode {
            AccessMode::Sequential => {
                if self.cursor >= self.sequence.len() || self.sequence[self.cursor] != *presented {
                    return false;
                }
                self.cursor += 1;
                true
            }
            AccessMode::Multiset => match self.remaining.get_mut(presented) {
                Some(count) if *count > 0 => {
                    *count -= 1;
                    true
                }
                _ => false,
            },
        }
    }
}
