use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::AuthError;

/// Role label carried by a user. Stored, never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Hr,
    Staff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Hr => "hr",
            Role::Staff => "staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub identifier: String,
    pub secret: String,
    pub display_name: String,
    pub role: Role,
}

impl UserRecord {
    pub fn new(identifier: &str, secret: &str, display_name: &str, role: Role) -> Self {
        Self {
            identifier: identifier.to_string(),
            secret: secret.to_string(),
            display_name: display_name.to_string(),
            role,
        }
    }
}

// Hand-written so the secret never lands in a log line.
impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .field("display_name", &self.display_name)
            .field("role", &self.role)
            .finish()
    }
}

/// Immutable table of known users, built once at startup.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    records: Vec<UserRecord>,
}

impl CredentialStore {
    /// Build a store from an injected table. Identifiers must be unique.
    pub fn new(records: Vec<UserRecord>) -> Result<Self, AuthError> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.identifier.as_str()) {
                return Err(AuthError::DuplicateIdentifier(record.identifier.clone()));
            }
        }
        Ok(Self { records })
    }

    /// The stock dashboard accounts
    pub fn builtin() -> Self {
        Self {
            records: vec![
                UserRecord::new("drdo-admin", "secure@123", "Admin User", Role::Admin),
                UserRecord::new("drdo-hr", "hr@2025", "HR Manager", Role::Hr),
                UserRecord::new("drdo-staff", "staff@drdo", "Staff Member", Role::Staff),
            ],
        }
    }

    /// Exact, case-sensitive match on both fields
    pub fn find(&self, identifier: &str, secret: &str) -> Option<&UserRecord> {
        self.records
            .iter()
            .find(|r| r.identifier == identifier && r.secret == secret)
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }
}
