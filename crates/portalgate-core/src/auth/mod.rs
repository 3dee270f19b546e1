//! Authentication module for validating logins against the credential table.
//!
//! This module provides:
//! - `CredentialStore`: the immutable table of known users
//! - `Authenticator`: checks a submitted identifier/secret pair
//!
//! Authentication is pure; creating the session is the caller's job.

pub mod authenticator;
pub mod credentials;
pub mod error;

pub use authenticator::Authenticator;
pub use credentials::{CredentialStore, Role, UserRecord};
pub use error::AuthError;
