use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use thaitrip_core::models::{ChatMessage, ChatRole};

use crate::app::{App, AppState};
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    render_transcript(frame, app, chunks[0]);
    render_input(frame, app, chunks[1]);
}

/// Rows a message takes once wrapped, plus the blank separator
fn wrapped_height(message: &ChatMessage, width: usize) -> usize {
    let label = message.role.prompt_label().chars().count() + 2;
    let chars = label + message.text.chars().count();
    chars.div_ceil(width.max(1)) + 1
}

fn render_transcript(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    for message in app.transcript.messages() {
        let is_user = message.role == ChatRole::User;
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}: ", message.role.prompt_label()),
                styles::speaker_style(is_user),
            ),
            Span::raw(message.text.clone()),
        ]));
        lines.push(Line::from(""));
    }
    if app.transcript.is_pending() {
        lines.push(Line::from(Span::styled("היועץ מקליד...", styles::muted_style())));
    }

    // Keep the newest message in view
    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;
    let total: usize = app
        .transcript
        .messages()
        .iter()
        .map(|m| wrapped_height(m, inner_width))
        .sum::<usize>()
        + usize::from(app.transcript.is_pending());
    let scroll = total.saturating_sub(inner_height).min(u16::MAX as usize) as u16;

    let block = Block::default()
        .title(" יועץ הטיולים ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let chatting = app.state == AppState::Chatting;

    let line = if chatting {
        Line::from(vec![
            Span::styled("> ", styles::highlight_style()),
            Span::styled(format!("{}▌", app.advisor_input), styles::input_style(true)),
        ])
    } else {
        Line::from(Span::styled(
            "לחצו Enter כדי לשאול את היועץ (לדוגמה: איפה הכי טוב לירח דבש?)",
            styles::muted_style(),
        ))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(chatting));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_height() {
        let message = ChatMessage::user("abcdefgh");
        // "לקוח: " is 6 chars, 14 total over width 10 is 2 rows plus a gap
        assert_eq!(wrapped_height(&message, 10), 3);
        assert_eq!(wrapped_height(&message, 0), 15);
    }
}
