use std::sync::Arc;

use tracing::{info, warn};

use folio_codec::{Base64Obfuscator, Obfuscator};
use folio_db::KvStore;
use folio_types::models::MessagingCredentials;

use crate::error::{ValidationError, VaultError};
use crate::keys;

/// Holds the email-provider identifiers, obfuscated at rest.
pub struct CredentialVault {
    store: Arc<dyn KvStore>,
    codec: Box<dyn Obfuscator>,
}

impl CredentialVault {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self::with_codec(store, Box::new(Base64Obfuscator))
    }

    pub fn with_codec(store: Arc<dyn KvStore>, codec: Box<dyn Obfuscator>) -> Self {
        Self { store, codec }
    }

    /// Replace the stored credentials. The previous value is gone afterwards.
    pub fn save(&self, credentials: &MessagingCredentials) -> Result<(), VaultError> {
        if let Some(field) = credentials.missing_field() {
            return Err(ValidationError::MissingField(field).into());
        }

        let json = serde_json::to_vec(credentials).map_err(|e| VaultError::Storage(e.into()))?;
        let encoded = self.codec.encode(&json);
        self.store
            .set(keys::CREDENTIALS, encoded.as_bytes())
            .map_err(VaultError::Storage)?;

        info!("Messaging credentials updated");
        Ok(())
    }

    /// Stored credentials, or `None` if absent or unreadable.
    pub fn load(&self) -> Option<MessagingCredentials> {
        let raw = match self.store.get(keys::CREDENTIALS) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Could not read credentials: {:#}", e);
                return None;
            }
        };

        let Ok(text) = std::str::from_utf8(&raw) else {
            warn!("Stored credentials are not text");
            return None;
        };

        let decoded = match self.codec.decode(text) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to decode credentials: {:#}", e);
                return None;
            }
        };

        match serde_json::from_slice(&decoded) {
            Ok(credentials) => Some(credentials),
            Err(e) => {
                warn!("Failed to parse credentials: {}", e);
                None
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.load().is_some_and(|c| c.is_complete())
    }
}
