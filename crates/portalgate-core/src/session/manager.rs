use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::clock::Clock;
use super::error::SessionError;
use super::storage::KeyValueStore;
use crate::auth::{Role, UserRecord};

/// Idle window after which a session is no longer valid (30 minutes).
pub const IDLE_TIMEOUT: Duration = Duration::from_millis(30 * 60 * 1000);

/// Storage keys. `lastActivity` holds epoch milliseconds as a decimal string.
const KEY_AUTHENTICATED: &str = "authenticated";
const KEY_USER: &str = "user";
const KEY_LAST_ACTIVITY: &str = "lastActivity";

/// The logged-in user as stored in the session: the record minus its secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub role: Role,
    #[serde(rename = "loginTime")]
    pub login_time: DateTime<Utc>,
}

impl SessionUser {
    pub fn from_record(record: &UserRecord, login_time: DateTime<Utc>) -> Self {
        Self {
            id: record.identifier.clone(),
            name: record.display_name.clone(),
            role: record.role,
            login_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub authenticated: bool,
    pub user: SessionUser,
    pub last_activity: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>, idle_timeout: Duration) -> bool {
        now - self.last_activity > to_delta(idle_timeout)
    }

    pub fn time_until_expiry(&self, now: DateTime<Utc>, idle_timeout: Duration) -> TimeDelta {
        self.last_activity
            .checked_add_signed(to_delta(idle_timeout))
            .map(|expiry| expiry - now)
            .unwrap_or(TimeDelta::MAX)
    }
}

/// Saturates instead of wrapping for windows too long to represent
fn to_delta(duration: Duration) -> TimeDelta {
    TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX)
}

/// Owns the current tab's session state.
///
/// Validity is always recomputed from the stored `lastActivity` timestamp, so
/// a session read back after a restart of the front end is judged correctly
/// even if no timer was ever armed for it.
pub struct SessionManager<S, C> {
    store: S,
    clock: C,
    idle_timeout: Duration,
}

impl<S: KeyValueStore, C: Clock> SessionManager<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            idle_timeout: IDLE_TIMEOUT,
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Start a session for `user`, replacing whatever was stored before
    pub fn create(&mut self, user: &UserRecord) -> Session {
        let now = self.clock.now();
        let session_user = SessionUser::from_record(user, now);

        // Serializing a plain struct of strings and a timestamp can't fail
        let user_json = serde_json::to_string(&session_user).unwrap_or_default();

        self.store.set(KEY_AUTHENTICATED, "true".to_string());
        self.store.set(KEY_USER, user_json);
        self.store
            .set(KEY_LAST_ACTIVITY, now.timestamp_millis().to_string());
        debug!(user = %session_user.id, "Session created");

        Session {
            authenticated: true,
            user: session_user,
            last_activity: now,
        }
    }

    /// Read the stored session, expired or not.
    ///
    /// Returns `Ok(None)` when nothing is stored and `StorageParse` when the
    /// stored fields are corrupt.
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        match self.store.get(KEY_AUTHENTICATED) {
            Some(flag) if flag == "true" => {}
            _ => return Ok(None),
        }

        let user_json = self
            .store
            .get(KEY_USER)
            .ok_or_else(|| SessionError::StorageParse("missing user record".to_string()))?;
        let user: SessionUser = serde_json::from_str(&user_json)?;

        let raw = self
            .store
            .get(KEY_LAST_ACTIVITY)
            .ok_or_else(|| SessionError::StorageParse("missing last activity".to_string()))?;
        let millis: i64 = raw
            .trim()
            .parse()
            .map_err(|_| SessionError::StorageParse(format!("bad last activity: {}", raw)))?;
        let last_activity = DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| SessionError::StorageParse(format!("last activity out of range: {}", millis)))?;

        Ok(Some(Session {
            authenticated: true,
            user,
            last_activity,
        }))
    }

    /// Stored session if it is present, readable and inside the idle window
    fn valid_session(&self) -> Option<Session> {
        match self.load() {
            Ok(Some(session)) if !session.is_expired_at(self.clock.now(), self.idle_timeout) => {
                Some(session)
            }
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable session state");
                None
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid_session().is_some()
    }

    /// Slide the idle window forward. Returns false (and changes nothing) when
    /// there is no valid session to extend.
    pub fn refresh(&mut self) -> bool {
        if !self.is_valid() {
            return false;
        }
        let now = self.clock.now_millis();
        self.store.set(KEY_LAST_ACTIVITY, now.to_string());
        true
    }

    /// Clear all session fields
    pub fn invalidate(&mut self) {
        self.store.clear();
        debug!("Session invalidated");
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.valid_session().map(|s| s.user)
    }

    /// Entry check for protected screens. Anything short of a valid session
    /// clears the stored state and reports `Expired`.
    pub fn check(&mut self) -> Result<SessionUser, SessionError> {
        match self.valid_session() {
            Some(session) => Ok(session.user),
            None => {
                self.invalidate();
                Err(SessionError::Expired)
            }
        }
    }

    pub fn time_until_expiry(&self) -> Option<TimeDelta> {
        self.valid_session()
            .map(|s| s.time_until_expiry(self.clock.now(), self.idle_timeout))
    }

    /// Get minutes remaining until expiry (for display)
    pub fn minutes_until_expiry(&self) -> i64 {
        self.time_until_expiry()
            .map(|d| d.num_minutes().max(0))
            .unwrap_or(0)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::CredentialStore;
    use crate::session::{ManualClock, MemoryStore};

    const IDLE_MS: u64 = 1_800_000;

    fn hr_manager() -> UserRecord {
        CredentialStore::builtin()
            .find("drdo-hr", "hr@2025")
            .cloned()
            .unwrap()
    }

    fn manager_at(start: i64) -> (SessionManager<MemoryStore, ManualClock>, ManualClock) {
        let clock = ManualClock::new(start);
        (SessionManager::new(MemoryStore::new(), clock.clone()), clock)
    }

    #[test]
    fn test_no_session_is_invalid() {
        let (manager, _) = manager_at(0);
        assert!(!manager.is_valid());
        assert!(manager.current_user().is_none());
        assert_eq!(manager.load().unwrap(), None);
    }

    #[test]
    fn test_create_stores_sanitized_user() {
        let (mut manager, _) = manager_at(1_760_000_000_000);
        let record = hr_manager();
        let session = manager.create(&record);

        assert!(manager.is_valid());
        let user = manager.current_user().unwrap();
        assert_eq!(user, session.user);
        assert_eq!(user.id, "drdo-hr");
        assert_eq!(user.name, "HR Manager");
        assert_eq!(user.role, Role::Hr);

        let stored = manager.store().get("user").unwrap();
        assert!(!stored.contains("hr@2025"));
        assert!(stored.contains("\"loginTime\""));
        assert_eq!(manager.store().get("authenticated").as_deref(), Some("true"));
        assert_eq!(
            manager.store().get("lastActivity").as_deref(),
            Some("1760000000000")
        );
    }

    #[test]
    fn test_create_overwrites_previous_session() {
        let (mut manager, _) = manager_at(0);
        manager.create(&hr_manager());
        let admin = CredentialStore::builtin()
            .find("drdo-admin", "secure@123")
            .cloned()
            .unwrap();
        manager.create(&admin);
        assert_eq!(manager.current_user().unwrap().id, "drdo-admin");
    }

    #[test]
    fn test_idle_window_boundaries() {
        let (mut manager, clock) = manager_at(0);
        manager.create(&hr_manager());

        clock.set(IDLE_MS as i64 - 1);
        assert!(manager.is_valid());

        clock.set(IDLE_MS as i64);
        assert!(manager.is_valid());

        clock.set(IDLE_MS as i64 + 1);
        assert!(!manager.is_valid());
        assert!(manager.current_user().is_none());
    }

    #[test]
    fn test_refresh_slides_the_window() {
        let (mut manager, clock) = manager_at(0);
        manager.create(&hr_manager());

        clock.set(IDLE_MS as i64 - 1);
        assert!(manager.refresh());

        clock.set(2 * IDLE_MS as i64 - 1);
        assert!(manager.is_valid());

        clock.set(2 * IDLE_MS as i64);
        assert!(!manager.is_valid());
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let (mut manager, clock) = manager_at(0);
        manager.create(&hr_manager());
        clock.set(10);
        for _ in 0..1000 {
            assert!(manager.refresh());
        }
        assert_eq!(manager.store().get("lastActivity").as_deref(), Some("10"));
    }

    #[test]
    fn test_refresh_does_not_revive_expired_session() {
        let (mut manager, clock) = manager_at(0);
        manager.create(&hr_manager());
        clock.set(IDLE_MS as i64 + 1);
        assert!(!manager.refresh());
        assert!(!manager.is_valid());
    }

    #[test]
    fn test_refresh_without_session_stores_nothing() {
        let (mut manager, _) = manager_at(0);
        assert!(!manager.refresh());
        assert!(manager.store().is_empty());
    }

    #[test]
    fn test_invalidate() {
        let (mut manager, _) = manager_at(0);
        manager.invalidate();
        assert!(!manager.is_valid());

        manager.create(&hr_manager());
        manager.invalidate();
        assert!(!manager.is_valid());
        assert!(manager.current_user().is_none());
        assert!(manager.store().is_empty());
    }

    #[test]
    fn test_corrupt_user_is_treated_as_no_session() {
        let (mut manager, _) = manager_at(0);
        manager.create(&hr_manager());
        manager.store_mut().set("user", "{not json".to_string());

        assert!(matches!(manager.load(), Err(SessionError::StorageParse(_))));
        assert!(!manager.is_valid());
        assert!(manager.current_user().is_none());
        assert_eq!(manager.check().unwrap_err(), SessionError::Expired);
        assert!(manager.store().is_empty());
    }

    #[test]
    fn test_corrupt_last_activity_is_treated_as_no_session() {
        let (mut manager, _) = manager_at(0);
        manager.create(&hr_manager());
        manager
            .store_mut()
            .set("lastActivity", "yesterday".to_string());
        assert!(matches!(manager.load(), Err(SessionError::StorageParse(_))));
        assert!(!manager.is_valid());
    }

    #[test]
    fn test_flag_other_than_true_is_no_session() {
        let (mut manager, _) = manager_at(0);
        manager.create(&hr_manager());
        manager
            .store_mut()
            .set("authenticated", "false".to_string());
        assert_eq!(manager.load().unwrap(), None);
        assert!(!manager.is_valid());
    }

    #[test]
    fn test_check_clears_expired_session() {
        let (mut manager, clock) = manager_at(0);
        manager.create(&hr_manager());
        assert_eq!(manager.check().unwrap().id, "drdo-hr");

        clock.set(IDLE_MS as i64 + 1);
        assert_eq!(manager.check().unwrap_err(), SessionError::Expired);
        assert!(manager.store().is_empty());
    }

    #[test]
    fn test_minutes_until_expiry() {
        let (mut manager, clock) = manager_at(0);
        assert_eq!(manager.minutes_until_expiry(), 0);

        manager.create(&hr_manager());
        assert_eq!(manager.minutes_until_expiry(), 30);

        clock.advance(Duration::from_secs(10 * 60));
        assert_eq!(manager.minutes_until_expiry(), 20);
    }

    #[test]
    fn test_custom_idle_timeout() {
        let clock = ManualClock::new(0);
        let mut manager = SessionManager::new(MemoryStore::new(), clock.clone())
            .with_idle_timeout(Duration::from_secs(60));
        manager.create(&hr_manager());
        clock.set(60_001);
        assert!(!manager.is_valid());
    }

    #[test]
    fn test_unrepresentable_idle_timeout_saturates() {
        let clock = ManualClock::new(1_760_000_000_000);
        let mut manager = SessionManager::new(MemoryStore::new(), clock.clone())
            .with_idle_timeout(Duration::MAX);
        manager.create(&hr_manager());
        assert!(manager.is_valid());

        clock.advance(Duration::from_secs(365 * 24 * 60 * 60));
        assert!(manager.is_valid());
        assert!(manager.minutes_until_expiry() > 0);
    }
}
