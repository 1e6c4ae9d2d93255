//! API key generation
//!
//! Produces high-entropy, URL-safe API keys and allocates them against a
//! uniqueness check with a bounded number of attempts.

use std::future::Future;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;

use crate::domain::DomainError;

/// Entropy drawn per key, in bytes
const KEY_BYTES: usize = 48;

/// Attempts against the uniqueness check before giving up
///
/// Exhaustion implies a flawed entropy source or a saturated key space;
/// fatal, never user-retryable.
const MAX_ATTEMPTS: u32 = 10;

/// Generator for tenant API keys
#[derive(Debug, Clone)]
pub struct KeyGenerator {
    key_bytes: usize,
}

impl KeyGenerator {
    /// Create a new key generator
    pub fn new() -> Self {
        Self {
            key_bytes: KEY_BYTES,
        }
    }

    /// Set the number of random bytes per key
    pub fn with_key_bytes(mut self, bytes: usize) -> Self {
        self.key_bytes = bytes;
        self
    }

    /// Generate a single URL-safe key
    pub fn generate(&self) -> String {
        let mut random_bytes = vec![0u8; self.key_bytes];
        rand::thread_rng().fill_bytes(&mut random_bytes);

        URL_SAFE_NO_PAD.encode(&random_bytes)
    }

    /// Generate a key that passes the given uniqueness check
    ///
    /// `is_taken` is queried for each candidate; after [`MAX_ATTEMPTS`]
    /// collisions the allocation fails with `KeyGenerationExhausted` and
    /// nothing is persisted.
    pub async fn generate_unique<F, Fut>(&self, is_taken: F) -> Result<String, DomainError>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<bool, DomainError>>,
    {
        for _ in 0..MAX_ATTEMPTS {
            let candidate = self.generate();

            if !is_taken(candidate.clone()).await? {
                return Ok(candidate);
            }
        }

        Err(DomainError::KeyGenerationExhausted {
            attempts: MAX_ATTEMPTS,
        })
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}
