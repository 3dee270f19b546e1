//! Keyboard and mouse input handling for the TUI.
//!
//! Every key on a protected screen counts as activity: the session is
//! confirmed first, and a lost session swallows the key and shows the login
//! overlay instead.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{can_add_password_char, can_add_username_char, App, AppState, LoginFocus};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    match app.state {
        AppState::LoggingIn => return handle_login_input(app, key),
        AppState::Quitting => return true,
        _ => {}
    }

    if !app.on_activity() {
        return false;
    }

    match app.state {
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
        }
        AppState::ShowingToolAction(_) => {
            // Any key dismisses
            app.state = AppState::Normal;
        }
        AppState::ConfirmingLogout => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.logout(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        },
        AppState::Normal => return handle_dashboard_input(app, key),
        AppState::LoggingIn | AppState::Quitting => {}
    }
    false
}

/// Mouse movement and clicks keep the session alive like keys do
pub fn handle_mouse(app: &mut App) {
    if !matches!(app.state, AppState::LoggingIn | AppState::Quitting) {
        app.on_activity();
    }
}

fn handle_dashboard_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            app.quit();
            return true;
        }
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char('l') => app.state = AppState::ConfirmingLogout,
        KeyCode::Char('f') => app.cycle_filter(),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.select_section(index);
        }
        KeyCode::Right | KeyCode::Tab => app.next_section(),
        KeyCode::Left | KeyCode::BackTab => app.prev_section(),
        KeyCode::Down if app.section().shows_quick_tools() => app.select_next_tool(),
        KeyCode::Up if app.section().shows_quick_tools() => app.select_prev_tool(),
        KeyCode::Enter if app.section().shows_quick_tools() => app.run_selected_tool(),
        _ => {}
    }
    false
}

fn handle_login_input(app: &mut App, key: KeyEvent) -> bool {
    // Ctrl+T shows or hides the password. AltGr arrives as Ctrl+Alt, so
    // those chars still fall through to the fields.
    if key.modifiers.contains(KeyModifiers::CONTROL) && !key.modifiers.contains(KeyModifiers::ALT) {
        if key.code == KeyCode::Char('t') {
            app.toggle_password_visibility();
        }
        return false;
    }

    match key.code {
        KeyCode::Esc => {
            // Quit if on login screen
            app.quit();
            return true;
        }
        KeyCode::Down | KeyCode::Tab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Password,
                LoginFocus::Password => LoginFocus::Button,
                LoginFocus::Button => LoginFocus::Username,
            };
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Button,
                LoginFocus::Password => LoginFocus::Username,
                LoginFocus::Button => LoginFocus::Password,
            };
        }
        KeyCode::Enter => match app.login_focus {
            LoginFocus::Username => app.login_focus = LoginFocus::Password,
            // Enter in the password field submits, like the button
            LoginFocus::Password | LoginFocus::Button => app.attempt_login(),
        },
        KeyCode::Backspace => match app.login_focus {
            LoginFocus::Username => {
                app.login_username.pop();
            }
            LoginFocus::Password => {
                app.login_password.pop();
            }
            LoginFocus::Button => {}
        },
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::Username => {
                if can_add_username_char(app.login_username.len(), c) {
                    app.login_username.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_password_char(app.login_password.len(), c) {
                    app.login_password.push(c);
                }
            }
            LoginFocus::Button => {}
        },
        _ => {}
    }
    false
}
