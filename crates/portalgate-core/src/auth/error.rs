use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Please enter both username and password")]
    MissingFields,

    /// Deliberately says nothing about which half of the pair was wrong.
    #[error("Invalid credentials. Please try again.")]
    InvalidCredentials,

    #[error("Duplicate user identifier in credential table: {0}")]
    DuplicateIdentifier(String),
}

impl AuthError {
    /// Whether the login form should simply be shown again
    pub fn is_reprompt(&self) -> bool {
        matches!(self, AuthError::MissingFields | AuthError::InvalidCredentials)
    }
}
