use chrono::{DateTime, Datelike, Local, Timelike};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use portalgate_core::dashboard::{
    activity_feed, filter_activities, module_content, ModuleCard, Section, NAV_SECTIONS,
    QUICK_TOOLS,
};
use portalgate_core::utils::{
    first_name, format_long_date, greeting_for_hour, title_case, truncate_string,
};
use portalgate_core::SessionUser;

use crate::app::{App, AppState, LoginFocus};

use super::styles;

/// Width of the login form fields
const FIELD_WIDTH: usize = 16;

/// Width of the text progress bar
const PROGRESS_BAR_WIDTH: usize = 20;

/// Longest activity line shown before truncating
const MAX_ACTIVITY_WIDTH: usize = 60;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Section tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    match &app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::ShowingToolAction(text) => render_tool_overlay(frame, text),
        AppState::ConfirmingLogout => render_logout_overlay(frame),
        AppState::LoggingIn => render_login_overlay(frame, app),
        AppState::Normal | AppState::Quitting => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Staff Portal";
    let header = app
        .current_user()
        .map(|user| header_text(&user, Local::now()))
        .unwrap_or_default();
    let help_hint = "[?] Help";

    let padding = (area.width as usize)
        .saturating_sub(title.len() + header.chars().count() + help_hint.len() + 4);

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(header, styles::highlight_style()),
        Span::raw("  "),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for (i, name) in NAV_SECTIONS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        let label = format!("[{}] {}", i + 1, title_case(name));
        if i == app.section_index && app.state != AppState::LoggingIn {
            spans.push(Span::styled(label, styles::tab_style(true)));
        } else {
            spans.push(Span::styled(label, styles::muted_style()));
        }
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    // Nothing protected is drawn without a session
    if app.state == AppState::LoggingIn || !app.is_session_valid() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "  Sign in to continue.",
            styles::muted_style(),
        )));
        frame.render_widget(paragraph, area);
        return;
    }

    if app.is_loading() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "  Loading module data...",
            styles::muted_style(),
        )));
        frame.render_widget(paragraph, area);
        return;
    }

    match app.section() {
        Section::Dashboard => render_dashboard(frame, app, area),
        Section::Module(name) => render_module(frame, &name, area),
    }
}

fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(20)])
        .split(area);

    // Quick tools
    let tool_lines: Vec<Line> = QUICK_TOOLS
        .iter()
        .enumerate()
        .map(|(i, tool)| {
            if i == app.tool_selection {
                Line::from(Span::styled(format!(" > {}", tool), styles::selected_style()))
            } else {
                Line::from(Span::styled(format!("   {}", tool), styles::list_item_style()))
            }
        })
        .collect();

    let tools = Paragraph::new(tool_lines).block(
        Block::default()
            .title(" Quick Tools ")
            .borders(Borders::ALL)
            .border_style(styles::border_style(true)),
    );
    frame.render_widget(tools, chunks[0]);

    // Recent activity
    let filter = app.activity_filter();
    let feed = activity_feed();
    let items = filter_activities(&feed, filter);
    let mut activity_lines: Vec<Line> = items
        .iter()
        .map(|item| {
            Line::from(vec![
                Span::styled(
                    format!(" {}", truncate_string(item.text, MAX_ACTIVITY_WIDTH)),
                    styles::list_item_style(),
                ),
                Span::styled(format!("  {}", item.when), styles::muted_style()),
            ])
        })
        .collect();
    if activity_lines.is_empty() {
        activity_lines.push(Line::from(Span::styled(
            " No matching activity",
            styles::muted_style(),
        )));
    }

    let activity = Paragraph::new(activity_lines).block(
        Block::default()
            .title(format!(" Recent Activity ({}) [f]ilter ", filter))
            .borders(Borders::ALL)
            .border_style(styles::border_style(false)),
    );
    frame.render_widget(activity, chunks[1]);
}

fn render_module(frame: &mut Frame, name: &str, area: Rect) {
    let mut lines = Vec::new();
    for (i, card) in module_content(name).iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.extend(card_lines(card));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(styles::border_style(false)),
    );
    frame.render_widget(paragraph, area);
}

fn card_lines(card: &ModuleCard) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!(" {}", card.title),
        styles::title_style(),
    ))];

    if let Some(description) = &card.description {
        lines.push(Line::from(format!(" {}", description)));
    }
    if let Some(percent) = card.progress_percent {
        lines.push(Line::from(Span::styled(
            format!(" {}", progress_bar(percent)),
            styles::success_style(),
        )));
    }
    if !card.stages.is_empty() {
        let mut spans = vec![Span::raw(" ")];
        for (i, stage) in card.stages.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" > ", styles::muted_style()));
            }
            if stage.active {
                spans.push(Span::styled(
                    format!("[{}]", stage.name),
                    styles::active_stage_style(),
                ));
            } else {
                spans.push(Span::styled(stage.name, styles::list_item_style()));
            }
        }
        lines.push(Line::from(spans));
    }
    if !card.stats.is_empty() {
        lines.push(Line::from(Span::styled(
            format!(" {}", card.stats.join(" | ")),
            styles::highlight_style(),
        )));
    }
    for feature in &card.features {
        lines.push(Line::from(format!("   * {}", feature)));
    }

    lines
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = match app.current_user() {
        Some(user) if app.state != AppState::LoggingIn => format!(
            " {} ({}) | idle logout in {} min ",
            user.name,
            user.role,
            app.minutes_until_expiry()
        ),
        _ => " Not signed in ".to_string(),
    };
    let right_text = " [l]ogout | [q]uit ";

    let padding_len = (area.width as usize)
        .saturating_sub(left_text.len())
        .saturating_sub(right_text.len());
    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 17, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let keys = [
        ("1-5", "Jump to section"),
        ("Tab/Left/Right", "Next or previous section"),
        ("Up/Down", "Select quick tool"),
        ("Enter", "Run quick tool"),
        ("f", "Cycle activity filter"),
        ("l", "Logout"),
        ("q", "Quit"),
        ("?", "Toggle this help"),
    ];

    let mut lines = vec![
        Line::from(Span::styled("  Keyboard Shortcuts", styles::title_style())),
        Line::from(""),
    ];
    for (key, desc) in keys {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<16}", key), styles::help_key_style()),
            Span::styled(desc, styles::help_desc_style()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  (c) {} Staff Portal", Local::now().year()),
        styles::muted_style(),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_tool_overlay(frame: &mut Frame, text: &str) {
    let area = centered_rect_fixed(60, 8, frame.area());

    frame.render_widget(Clear, area);

    let mut lines: Vec<Line> = text
        .lines()
        .map(|line| Line::from(format!(" {}", line)))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Press any key to close",
        styles::muted_style(),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    frame.render_widget(paragraph, area);
}

fn render_logout_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 7, frame.area());

    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to logout?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to logout, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_login_overlay(frame: &mut Frame, app: &App) {
    // Fixed size dialog; an error needs room for a wrapped line
    let height = if app.login_error.is_some() { 14 } else { 11 };
    let area = centered_rect_fixed(46, height, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled("  Staff Portal", styles::title_style())),
        Line::from(Span::styled("  Sign in to continue", styles::muted_style())),
        Line::from(""),
    ];

    // Username field
    let username_focused = app.login_focus == LoginFocus::Username;
    let username_style = if username_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let username_display = format!("{:<FIELD_WIDTH$}", app.login_username);
    let cursor = if username_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("      "),
        Span::styled("Username: [", styles::muted_style()),
        Span::styled(format!("{}{}", username_display, cursor), username_style),
        Span::styled("]", styles::muted_style()),
    ]));

    // Password field
    let password_focused = app.login_focus == LoginFocus::Password;
    let password_style = if password_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let password_display = password_field(&app.login_password, app.show_password);
    let cursor = if password_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("      "),
        Span::styled("Password: [", styles::muted_style()),
        Span::styled(format!("{}{}", password_display, cursor), password_style),
        Span::styled("]", styles::muted_style()),
    ]));

    let toggle_hint = if app.show_password {
        "hide password"
    } else {
        "show password"
    };
    lines.push(Line::from(vec![
        Span::raw("      "),
        Span::styled("[Ctrl+T]", styles::help_key_style()),
        Span::styled(format!(" {}", toggle_hint), styles::muted_style()),
    ]));

    // Login button
    let button_focused = app.login_focus == LoginFocus::Button;
    let button_style = if button_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    lines.push(Line::from(""));
    let label = if button_focused {
        " ▶ Login ◀ "
    } else {
        "   Login   "
    };
    lines.push(Line::from(vec![
        Span::raw("            ["),
        Span::styled(label, button_style),
        Span::raw("]"),
    ]));

    // Error message
    if let Some(ref error) = app.login_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            styles::error_style(),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    frame.render_widget(paragraph, area);
}

/// Password field contents: one `*` per char unless shown, padded to the
/// field width
fn password_field(password: &str, visible: bool) -> String {
    let shown: String = if visible {
        password.chars().take(FIELD_WIDTH).collect()
    } else {
        "*".repeat(password.chars().count().min(FIELD_WIDTH))
    };
    format!("{:<FIELD_WIDTH$}", shown)
}

fn header_text(user: &SessionUser, now: DateTime<Local>) -> String {
    format!(
        "{}, {} | {}",
        greeting_for_hour(now.hour()),
        first_name(&user.name),
        format_long_date(now.date_naive())
    )
}

fn progress_bar(percent: u8) -> String {
    let percent = percent.min(100) as usize;
    let filled = percent * PROGRESS_BAR_WIDTH / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled),
        percent
    )
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
