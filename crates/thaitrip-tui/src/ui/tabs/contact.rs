use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppState, LeadStatus, LEAD_LABELS, LEAD_TYPE_FIELD};
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.state == AppState::EditingContact;
    let mut lines = vec![
        Line::from(Span::styled(
            " השאירו פרטים ונחזור אליכם עם הצעה מותאמת אישית",
            styles::list_item_style(),
        )),
        Line::from(""),
    ];

    for (i, label) in LEAD_LABELS.iter().enumerate() {
        let focused = editing && i == app.lead_field;
        let marker = if focused { "▶ " } else { "  " };
        let value = if i == LEAD_TYPE_FIELD {
            format!("◀ {} ▶", app.lead.traveller_type)
        } else {
            app.lead_text(i).unwrap_or_default().to_string()
        };
        let cursor = if focused && i != LEAD_TYPE_FIELD { "▌" } else { "" };
        let required = if i < 2 { " *" } else { "" };

        lines.push(Line::from(vec![
            Span::styled(marker, styles::highlight_style()),
            Span::styled(format!("{:<18}", format!("{}{}:", label, required)), styles::muted_style()),
            Span::styled(format!("{}{}", value, cursor), styles::input_style(focused)),
        ]));
    }

    lines.push(Line::from(""));
    if app.lead_sending {
        lines.push(Line::from(Span::styled(" שולח...", styles::muted_style())));
    } else if let Some(ref status) = app.lead_status {
        let style = match status {
            LeadStatus::Sent => styles::success_style(),
            LeadStatus::Failed(_) => styles::error_style(),
        };
        lines.push(Line::from(Span::styled(format!(" {}", status.text()), style)));
    }

    let hint = if editing {
        " ↑/↓ שדה · ←/→ סוג מטיילים · Enter שליחה · Esc סיום"
    } else {
        " Enter למילוי הטופס"
    };
    lines.push(Line::from(Span::styled(hint, styles::muted_style())));

    let block = Block::default()
        .title(" צור קשר ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(editing));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
