use sha2::{Digest, Sha256};

/// Hex SHA-256 of a session token. Only fingerprints are stored when a
/// session is revoked, never the bearer token itself.
pub fn session_fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_hex() {
        let a = session_fingerprint("header.payload.signature");
        let b = session_fingerprint("header.payload.signature");

        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn different_tokens_give_different_fingerprints() {
        assert_ne!(session_fingerprint("a"), session_fingerprint("b"));
    }
}
