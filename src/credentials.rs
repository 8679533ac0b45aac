use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Salted SHA-256 digest of a password, hex encoded.
pub fn digest_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Returns `(salt, digest)` for a new password.
pub fn new_credentials(password: &str) -> (String, String) {
    let salt = Uuid::new_v4().simple().to_string();
    let digest = digest_password(&salt, password);
    (salt, digest)
}

pub fn verify_password(salt: &str, digest: &str, password: &str) -> bool {
    digest_password(salt, password) == digest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_password_verifies() {
        let (salt, digest) = new_credentials("hunter2");
        assert!(verify_password(&salt, &digest, "hunter2"));
        assert!(!verify_password(&salt, &digest, "hunter3"));
    }

    #[test]
    fn salts_differ_between_users() {
        let (salt_a, digest_a) = new_credentials("same");
        let (salt_b, digest_b) = new_credentials("same");
        assert_ne!(salt_a, salt_b);
        assert_ne!(digest_a, digest_b);
        assert_eq!(digest_a.len(), 64);
    }
}
