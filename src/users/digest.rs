use sha2::{Digest, Sha512_256};

/// Hex-encoded SHA-512/256 digest of a plaintext password
pub fn password_digest(plaintext: &str) -> String {
    format!("{:x}", Sha512_256::digest(plaintext.as_bytes()))
}
