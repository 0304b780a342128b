//! Opaque argument commitments
//!
//! A commitment is the fixed-size digest of a guarded call's expected
//! arguments. The ledger only ever compares commitments for equality; it
//! never inspects or verifies a preimage.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of bytes in a commitment digest.
pub const COMMITMENT_LEN: usize = 32;

/// An opaque, fixed-size argument digest.
///
/// Produced by whoever knows the expected call arguments, normally by
/// hashing a canonical encoding of them (see [`Commitment::digest`]).
/// Inside the ledger a commitment behaves as a capability token: equality
/// comparison is the sole operation performed on it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment([u8; COMMITMENT_LEN]);

impl Commitment {
    /// Wrap an externally computed digest.
    pub const fn from_bytes(bytes: [u8; COMMITMENT_LEN]) -> Self {
        Self(bytes)
    }

    /// Digest a canonical argument encoding into a commitment.
    ///
    /// Convenience for producers; the ledger itself never computes digests.
    /// Callers are responsible for encoding their arguments with a stable,
    /// deterministic scheme before digesting.
    pub fn digest(encoded_args: &[u8]) -> Self {
        Self(*blake3::hash(encoded_args).as_bytes())
    }

    /// The raw digest bytes.
    pub const fn as_bytes(&self) -> &[u8; COMMITMENT_LEN] {
        &self.0
    }
}

impl From<[u8; COMMITMENT_LEN]> for Commitment {
    fn from(bytes: [u8; COMMITMENT_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({}..)", &hex::encode(self.0)[..8])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        let a = Commitment::digest(b"transfer(1, 0xdead)");
        let b = Commitment::digest(b"transfer(1, 0xdead)");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_encodings_produce_distinct_commitments() {
        let a = Commitment::digest(b"transfer(1, 0xdead)");
        let b = Commitment::digest(b"transfer(3, 0xdead)");
        assert_ne!(a, b);
    }

    #[test]
    fn display_renders_full_hex() {
        let c = Commitment::from_bytes([0xab; COMMITMENT_LEN]);
        let rendered = c.to_string();
        assert_eq!(rendered.len(), COMMITMENT_LEN * 2);
        assert!(rendered.chars().all(|ch| ch == 'a' || ch == 'b'));
    }

    #[test]
    fn serde_round_trips_as_byte_array() {
        let c = Commitment::digest(b"round trip");
        let json = serde_json::to_string(&c).unwrap();
        let back: Commitment = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
