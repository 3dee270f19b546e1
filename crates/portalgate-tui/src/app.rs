//! Application state for the terminal front end.
//!
//! `App` owns the `Portal` and everything the screen needs between frames:
//! the login form, the selected section, the activity filter and the quick
//! tool selection. Input handling lives in `ui::input`, drawing in
//! `ui::render`.

use std::path::PathBuf;

use tokio::time::Instant;
use tracing::{debug, warn};

use portalgate_core::dashboard::{
    quick_tool_action, Section, ACTIVITY_FILTERS, MODULE_LOAD_DELAY, NAV_SECTIONS, QUICK_TOOLS,
};
use portalgate_core::{
    Authenticator, Config, MemoryStore, Portal, SessionManager, SessionUser, TimerId, TokioClock,
    TokioTimers,
};

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for username input.
const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Shown on the login overlay when a protected screen finds no valid session
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

pub type AppPortal = Portal<MemoryStore, TokioClock, TokioTimers>;

// ============================================================================
// State
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    LoggingIn,
    Normal,
    ShowingHelp,
    /// Result text of a quick tool, shown until the next key
    ShowingToolAction(String),
    ConfirmingLogout,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoginFocus {
    Username,
    Password,
    Button,
}

pub struct App {
    portal: AppPortal,
    config: Config,
    /// Where `last_username` is saved; `None` keeps the config in memory only
    config_path: Option<PathBuf>,
    pub state: AppState,

    // Login form
    pub login_username: String,
    pub login_password: String,
    pub login_focus: LoginFocus,
    pub show_password: bool,
    pub login_error: Option<String>,

    // Dashboard
    pub section_index: usize,
    pub filter_index: usize,
    pub tool_selection: usize,
    loading_until: Option<Instant>,
}

impl App {
    /// Must be called from inside the tokio runtime (the idle timer spawns tasks)
    pub fn new(config: Config, config_path: Option<PathBuf>, timers: TokioTimers) -> Self {
        let session = SessionManager::new(MemoryStore::new(), TokioClock::new())
            .with_idle_timeout(config.idle_timeout());
        let portal = Portal::new(Authenticator::default(), session, timers);
        let login_username = config.last_username.clone().unwrap_or_default();

        Self {
            portal,
            config,
            config_path,
            state: AppState::LoggingIn,
            login_username,
            login_password: String::new(),
            login_focus: LoginFocus::Username,
            show_password: false,
            login_error: None,
            section_index: 0,
            filter_index: 0,
            tool_selection: 0,
            loading_until: None,
        }
    }

    /// Show the first screen: the dashboard if a session is already stored,
    /// otherwise the login overlay
    pub fn start(&mut self) {
        if self.portal.resume().is_some() {
            self.enter_dashboard();
        } else {
            self.start_login();
        }
    }

    // =========================================================================
    // Login
    // =========================================================================

    pub fn start_login(&mut self) {
        self.state = AppState::LoggingIn;
        self.login_focus = if self.login_username.is_empty() {
            LoginFocus::Username
        } else {
            LoginFocus::Password
        };
        self.login_password.clear();
        self.show_password = false;
        self.login_error = None;
    }

    /// Back to the login overlay with a message explaining why
    fn redirect_to_login(&mut self, message: &str) {
        self.start_login();
        self.login_error = Some(message.to_string());
    }

    pub fn attempt_login(&mut self) {
        match self.portal.login(&self.login_username, &self.login_password) {
            Ok(user) => {
                self.login_username = user.id.clone();
                self.login_password.clear();
                self.show_password = false;
                self.login_error = None;
                self.remember_username(&user.id);
                self.enter_dashboard();
            }
            Err(e) => {
                if e.is_reprompt() {
                    self.login_password.clear();
                    self.login_focus = if self.login_username.trim().is_empty() {
                        LoginFocus::Username
                    } else {
                        LoginFocus::Password
                    };
                } else {
                    warn!(error = %e, "Login failed unexpectedly");
                }
                self.login_error = Some(e.to_string());
            }
        }
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    fn remember_username(&mut self, username: &str) {
        let Some(path) = &self.config_path else {
            return;
        };
        self.config.last_username = Some(username.to_string());
        if let Err(e) = self.config.save_to(path) {
            warn!("Failed to save config: {:#}", e);
        }
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Input on a protected screen. Confirms the session first; returns
    /// false when it was gone and the login overlay is showing instead.
    pub fn on_activity(&mut self) -> bool {
        if self.portal.check().is_err() {
            self.redirect_to_login(SESSION_EXPIRED_MESSAGE);
            return false;
        }
        self.portal.activity();
        true
    }

    /// Deliver a fired idle timer
    pub fn on_timer(&mut self, id: TimerId) {
        if let Some(notice) = self.portal.timer_fired(id) {
            self.redirect_to_login(notice.message());
        }
    }

    pub fn logout(&mut self) {
        self.portal.logout();
        self.start_login();
    }

    pub fn quit(&mut self) {
        self.portal.logout();
        self.state = AppState::Quitting;
    }

    pub fn is_session_valid(&self) -> bool {
        self.portal.is_valid()
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.portal.current_user()
    }

    pub fn minutes_until_expiry(&self) -> i64 {
        self.portal.session().minutes_until_expiry()
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    fn enter_dashboard(&mut self) {
        self.state = AppState::Normal;
        self.section_index = 0;
        self.filter_index = 0;
        self.tool_selection = 0;
        self.loading_until = None;
    }

    pub fn section(&self) -> Section {
        Section::parse(NAV_SECTIONS[self.section_index])
    }

    /// Switch sections. Module sections show a loading placeholder first.
    pub fn select_section(&mut self, index: usize) {
        if index >= NAV_SECTIONS.len() {
            return;
        }
        self.section_index = index;
        self.loading_until = match self.section() {
            Section::Dashboard => None,
            Section::Module(_) => Some(Instant::now() + MODULE_LOAD_DELAY),
        };
        debug!(section = NAV_SECTIONS[index], "Section selected");
    }

    pub fn next_section(&mut self) {
        self.select_section((self.section_index + 1) % NAV_SECTIONS.len());
    }

    pub fn prev_section(&mut self) {
        self.select_section((self.section_index + NAV_SECTIONS.len() - 1) % NAV_SECTIONS.len());
    }

    pub fn is_loading(&self) -> bool {
        self.loading_until
            .is_some_and(|until| Instant::now() < until)
    }

    pub fn activity_filter(&self) -> &'static str {
        ACTIVITY_FILTERS[self.filter_index]
    }

    pub fn cycle_filter(&mut self) {
        self.filter_index = (self.filter_index + 1) % ACTIVITY_FILTERS.len();
    }

    pub fn select_next_tool(&mut self) {
        self.tool_selection = (self.tool_selection + 1).min(QUICK_TOOLS.len() - 1);
    }

    pub fn select_prev_tool(&mut self) {
        self.tool_selection = self.tool_selection.saturating_sub(1);
    }

    pub fn run_selected_tool(&mut self) {
        let tool = QUICK_TOOLS[self.tool_selection];
        self.state = AppState::ShowingToolAction(quick_tool_action(tool));
    }
}

// ============================================================================
// Input Validation
// ============================================================================

fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a username character should be accepted
pub fn can_add_username_char(current_len: usize, c: char) -> bool {
    current_len < MAX_USERNAME_LENGTH && is_valid_input_char(c)
}

/// Check if a password character should be accepted
pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================
