use sha2::{Digest, Sha256};

/// Full hex SHA-256 digest of the input.
pub fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

/// First 12 hex characters of the SHA-256 digest, used for proof filenames.
/// Collision risk at validation-run scale is negligible and the name is not
/// a security boundary.
pub fn sha256_short(input: &str) -> String {
    let mut digest = sha256_hex(input);
    digest.truncate(12);
    digest
}
