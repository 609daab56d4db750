// osoc-select-core/src/hashing.rs
// ============================================================================
// Module: Selection Fingerprint Hashing
// Description: SHA-256 fingerprints for credentials and session tokens.
// Purpose: Keep plaintext secrets out of stores and audit output.
// Dependencies: sha2
// ============================================================================

//! ## Overview
//! Stored credentials and issued session tokens are never kept in plaintext;
//! stores and audit events hold lowercase-hex SHA-256 fingerprints instead.
//! Fingerprints are compared for equality only, never reversed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use sha2::Digest;
use sha2::Sha256;

// ============================================================================
// SECTION: Fingerprinting
// ============================================================================

/// Computes the lowercase hex SHA-256 fingerprint of the given bytes.
#[must_use]
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex_encode(&hasher.finalize())
}

/// Encodes bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write as _;
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::panic, reason = "Test-only panic-based assertions.")]

    use super::fingerprint;

    #[test]
    fn fingerprint_is_stable_and_hex() {
        let digest = fingerprint(b"correct horse battery staple");
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, fingerprint(b"correct horse battery staple"));
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn distinct_inputs_produce_distinct_fingerprints() {
        assert_ne!(fingerprint(b"alpha"), fingerprint(b"beta"));
    }
}
