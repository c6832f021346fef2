//! Content digest type and hashing helper.

use sha2::{Digest as _, Sha256};

/// A content digest is a SHA-256 hash represented as a lowercase hexadecimal
/// string. The reconciliation core treats digests as opaque: two digests are
/// the same content if and only if they are equal strings.
pub type Digest = String;

/// Compute the digest for the given content bytes.
///
/// Scanners use this when building file entries; tests use it to construct
/// realistic fixtures.
pub fn digest_of(content: &[u8]) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}
