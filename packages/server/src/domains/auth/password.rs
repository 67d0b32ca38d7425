use ingestion::SecretString;
use sha2::{Digest, Sha256};

/// The admin password, kept only as a SHA-256 digest.
#[derive(Clone)]
pub struct AdminPassword {
    digest: [u8; 32],
}

impl AdminPassword {
    pub fn new(password: &SecretString) -> Self {
        Self {
            digest: digest(password.expose()),
        }
    }

    pub fn verify(&self, candidate: &str) -> bool {
        let candidate = digest(candidate);
        // constant-time comparison
        self.digest
            .iter()
            .zip(candidate.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}
