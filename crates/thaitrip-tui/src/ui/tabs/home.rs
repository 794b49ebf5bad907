use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use thaitrip_core::catalog::defaults::{CONTACT_EMAIL, CONTACT_PHONE, CONTACT_WHATSAPP, FAQS};

use crate::app::App;
use crate::ui::styles;

const INTRO: [&str; 3] = [
    "חופשה בתאילנד מתחילה כאן.",
    "חבילות מותאמות לזוגות, משפחות וצעירים, מלונות שבדקנו בעצמנו",
    "ויועץ טיולים חכם שזמין בכל שעה.",
];

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(6)])
        .split(area);

    render_intro(frame, chunks[0]);

    let faq_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    render_faq_list(frame, app, faq_chunks[0]);
    render_faq_answer(frame, app, faq_chunks[1]);
}

fn render_intro(frame: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = INTRO
        .iter()
        .map(|text| Line::from(Span::styled(format!(" {}", text), styles::list_item_style())))
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" טלפון: ", styles::highlight_style()),
        Span::raw(CONTACT_PHONE),
        Span::styled("   וואטסאפ: ", styles::highlight_style()),
        Span::raw(format!("https://wa.me/{}", CONTACT_WHATSAPP)),
    ]));
    lines.push(Line::from(vec![
        Span::styled(" אימייל: ", styles::highlight_style()),
        Span::raw(CONTACT_EMAIL),
    ]));

    let block = Block::default()
        .title(" עפים רחוק ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_faq_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = FAQS
        .iter()
        .enumerate()
        .map(|(i, faq)| {
            let style = if i == app.faq_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            ListItem::new(Line::from(faq.question)).style(style)
        })
        .collect();

    let block = Block::default()
        .title(" שאלות נפוצות ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let mut state = ListState::default();
    state.select(Some(app.faq_selection));

    frame.render_stateful_widget(List::new(items).block(block), area, &mut state);
}

fn render_faq_answer(frame: &mut Frame, app: &App, area: Rect) {
    let content = match FAQS.get(app.faq_selection) {
        Some(faq) => vec![
            Line::from(Span::styled(faq.question, styles::highlight_style())),
            Line::from(""),
            Line::from(faq.answer),
        ],
        None => vec![Line::from(Span::styled("בחרו שאלה מהרשימה", styles::muted_style()))],
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(content).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
