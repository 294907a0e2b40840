//! Shared-secret API key check applied before every operation.

use std::sync::Arc;

use message_core::AuthError;
use subtle::ConstantTimeEq;
use tracing::{debug, instrument, warn};

/// Configured secret for [`AccessGate`].
#[derive(Clone)]
pub struct AccessConfig {
    pub api_key: String,
}

impl AccessConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

impl std::fmt::Debug for AccessConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessConfig")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Validates a presented API key against the configured secret.
///
/// Stateless apart from the secret, which is held as bytes and compared in
/// constant time.
#[derive(Clone)]
pub struct AccessGate {
    expected: Arc<Vec<u8>>,
}

impl AccessGate {
    pub fn new(config: &AccessConfig) -> Self {
        Self {
            expected: Arc::new(config.api_key.as_bytes().to_vec()),
        }
    }

    /// `MissingCredential` when no key is presented, `InvalidCredential` when
    /// it differs from the secret (exact, case-sensitive), `Ok` otherwise.
    #[instrument(skip_all)]
    pub fn authorize(&self, presented: Option<&str>) -> Result<(), AuthError> {
        let Some(key) = presented else {
            warn!("Request without API key");
            return Err(AuthError::MissingCredential);
        };

        if !bool::from(key.as_bytes().ct_eq(self.expected.as_slice())) {
            warn!("Request with invalid API key");
            return Err(AuthError::InvalidCredential);
        }

        debug!("API key accepted");
        Ok(())
    }
}
