use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session expired - please log in again")]
    Expired,

    #[error("Stored session is unreadable: {0}")]
    StorageParse(String),
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::StorageParse(err.to_string())
    }
}
