use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use thaitrip_core::catalog::EntityKind;

use crate::app::{App, AppState, LoginFocus, Tab};

use super::styles;
use super::tabs::{admin, advisor, catalog, contact, home};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::LoggingIn => render_login_overlay(frame, app),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        AppState::ConfirmingReset => render_reset_overlay(frame, app.admin_kind),
        _ => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  עפים רחוק · Afim Rahok";
    let mode = if app.demo_mode { "מצב הדגמה  " } else { "" };
    let help_hint = "[?] עזרה";
    let used = title.chars().count() + mode.chars().count() + help_hint.chars().count() + 4;

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat((area.width as usize).saturating_sub(used))),
        Span::styled(mode, styles::highlight_style()),
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
    for (i, tab) in Tab::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        let label = format!("[{}] {}", i + 1, tab.title());
        if *tab == app.current_tab {
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
    match app.current_tab {
        Tab::Home => home::render(frame, app, area),
        Tab::Packages => catalog::render_packages(frame, app, area),
        Tab::Hotels => catalog::render_hotels(frame, app, area),
        Tab::Destinations => catalog::render_destinations(frame, app, area),
        Tab::Advisor => advisor::render(frame, app, area),
        Tab::Contact => contact::render(frame, app, area),
        Tab::Admin => admin::render(frame, app, area),
    }
}

/// Where the current tab's data came from
fn source_text(app: &App) -> String {
    match app.current_tab {
        Tab::Packages => format!("מקור: {}", app.packages.source.label()),
        Tab::Hotels => format!("מקור: {}", app.hotels.source.label()),
        Tab::Destinations => match app.cache_age() {
            Some(age) => format!("מקור: {} · נשמר {}", app.destinations.source.label(), age),
            None => format!("מקור: {}", app.destinations.source.label()),
        },
        Tab::Admin => match app.admin.username() {
            Some(user) => format!("מחובר כ-{}", user),
            None => "לא מחובר".to_string(),
        },
        _ => String::new(),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = "[r]רענון | [q]יציאה";

    let left_text = match app.status_message {
        Some(ref msg) => format!(" {} ", msg),
        None => format!(" {} ", source_text(app)),
    };
    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.chars().count());

    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(56, 30, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  עפים רחוק · טיולים לתאילנד", styles::title_style())),
        Line::from(Span::styled(format!("  version {}", version), styles::muted_style())),
        Line::from(""),
        Line::from(Span::styled(" ניווט", styles::highlight_style())),
        help_line("1-7", "מעבר בין לשוניות"),
        help_line("Tab", "לשונית הבאה / הקודמת"),
        help_line("↑/↓", "מעבר ברשימה"),
        help_line("r", "טעינה מחדש"),
        help_line("q", "יציאה"),
        Line::from(""),
        Line::from(Span::styled(" חבילות", styles::highlight_style())),
        help_line("f  ←/→", "סינון לפי סוג טיול"),
        Line::from(""),
        Line::from(Span::styled(" יועץ / צור קשר", styles::highlight_style())),
        help_line("Enter", "כתיבת הודעה / עריכת הטופס"),
        help_line("Esc", "סיום עריכה"),
        Line::from(""),
        Line::from(Span::styled(" ניהול", styles::highlight_style())),
        help_line("p/h/d", "חבילות / מלונות / יעדים"),
        help_line("n", "הוספת פריט חדש"),
        help_line("x", "מחיקת הפריט הנבחר"),
        help_line("o  s", "עריכת סדר / שמירת סדר"),
        help_line("R", "איפוס לברירת מחדל"),
        help_line("L", "התנתקות"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       לחצו ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" או ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" לסגירה", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn render_login_overlay(frame: &mut Frame, app: &App) {
    let height = if app.login_error.is_some() { 11 } else { 9 };
    let area = centered_rect_fixed(46, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled("      כניסה לממשק הניהול", styles::title_style())),
        Line::from(""),
    ];

    let username_focused = app.login_focus == LoginFocus::Username;
    let cursor = if username_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled("שם משתמש: [", styles::muted_style()),
        Span::styled(
            format!("{:<16}{}", app.login_username, cursor),
            field_style(username_focused),
        ),
        Span::styled("]", styles::muted_style()),
    ]));

    let password_focused = app.login_focus == LoginFocus::Password;
    let masked = "*".repeat(app.login_password.chars().count().min(16));
    let cursor = if password_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled("סיסמה:    [", styles::muted_style()),
        Span::styled(format!("{:<16}{}", masked, cursor), field_style(password_focused)),
        Span::styled("]", styles::muted_style()),
    ]));

    lines.push(Line::from(""));
    let button_focused = app.login_focus == LoginFocus::Button;
    let button = if button_focused { " ▶ כניסה ◀ " } else { "   כניסה   " };
    lines.push(Line::from(vec![
        Span::raw("            ["),
        Span::styled(button, field_style(button_focused)),
        Span::raw("]"),
    ]));

    if let Some(ref error) = app.login_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!(" {}", error), styles::error_style())));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn field_style(focused: bool) -> Style {
    if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    }
}

/// Create a centered rectangle with fixed dimensions
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn confirm_lines(question: String) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(format!("   {}", question), styles::highlight_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("   לחצו ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" לאישור, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" לביטול", styles::muted_style()),
        ]),
    ]
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 7, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(confirm_lines("לצאת מהאפליקציה?".to_string())).block(block);
    frame.render_widget(paragraph, area);
}

fn render_reset_overlay(frame: &mut Frame, kind: EntityKind) {
    let area = centered_rect_fixed(52, 8, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = confirm_lines(format!("לאפס את כל ה{} לברירת המחדל?", kind.title()));
    lines.insert(
        2,
        Line::from(Span::styled("   כל השינויים בטבלה יימחקו.", styles::error_style())),
    );

    let block = Block::default()
        .title(" איפוס ")
        .title_style(styles::error_style())
        .borders(Borders::ALL)
        .border_style(styles::error_style());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
