use tracing::{debug, info};

use super::credentials::{CredentialStore, UserRecord};
use super::error::AuthError;

/// Validates submitted login pairs against a `CredentialStore`.
#[derive(Debug, Clone)]
pub struct Authenticator {
    store: CredentialStore,
}

impl Authenticator {
    pub fn new(store: CredentialStore) -> Self {
        Self { store }
    }

    /// Check an identifier/secret pair.
    ///
    /// The identifier is trimmed; the secret is compared verbatim. Empty input
    /// is rejected before the table is consulted.
    pub fn authenticate(&self, identifier: &str, secret: &str) -> Result<UserRecord, AuthError> {
        let identifier = identifier.trim();
        if identifier.is_empty() || secret.is_empty() {
            debug!("Login rejected: missing fields");
            return Err(AuthError::MissingFields);
        }

        match self.store.find(identifier, secret) {
            Some(user) => {
                info!(user = %user.identifier, role = %user.role, "Login accepted");
                Ok(user.clone())
            }
            None => {
                info!(user = %identifier, "Login rejected: invalid credentials");
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}

impl Default for Authenticator {
    fn default() -> Self {
        Self::new(CredentialStore::builtin())
    }
}
