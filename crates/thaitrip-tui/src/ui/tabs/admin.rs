//! Admin tab: per-kind lists with reorder inputs, the create form and the
//! result banner.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use thaitrip_core::admin::{Editable, EntityForm};
use thaitrip_core::catalog::{CatalogEntity, EntityKind};
use thaitrip_core::models::{Destination, Hotel, Package};
use thaitrip_core::utils::truncate_string;

use crate::app::{App, AppState};
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if !app.admin.is_authenticated() {
        render_signed_out(frame, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Kind selector
            Constraint::Length(1), // Banner
            Constraint::Min(6),
        ])
        .split(area);

    render_kind_bar(frame, app, chunks[0]);
    render_banner(frame, app, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);

    match app.admin_kind {
        EntityKind::Package => render_kind::<Package>(frame, app, body[0], body[1]),
        EntityKind::Hotel => render_kind::<Hotel>(frame, app, body[0], body[1]),
        EntityKind::Destination => render_kind::<Destination>(frame, app, body[0], body[1]),
    }
}

fn render_signed_out(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("  ממשק הניהול זמין למנהלים בלבד.", styles::list_item_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("  לחצו ", styles::muted_style()),
            Span::styled("Enter", styles::help_key_style()),
            Span::styled(" להתחברות", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .title(" ניהול ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_kind_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for (key, kind) in [('p', EntityKind::Package), ('h', EntityKind::Hotel), ('d', EntityKind::Destination)] {
        let label = format!("[{}] {} ", key, kind.title());
        let style = if kind == app.admin_kind {
            styles::tab_style(true)
        } else {
            styles::muted_style()
        };
        spans.push(Span::styled(label, style));
    }
    if app.admin.loading {
        spans.push(Span::styled("  טוען...", styles::muted_style()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_banner(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref banner) = app.admin.banner else {
        return;
    };
    let style = if banner.is_error() {
        styles::error_style()
    } else {
        styles::success_style()
    };
    let line = Line::from(vec![
        Span::styled(format!(" {} ", banner.text()), style),
        Span::styled(" [Esc] סגירה", styles::muted_style()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_kind<E: Editable>(frame: &mut Frame, app: &App, list_area: Rect, form_area: Rect) {
    let slot = app.admin.kind::<E>();
    let items = slot.collection.items();

    let rows: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let order = item
                .sort_order()
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string());
            let mut spans = vec![
                Span::styled(format!("{:>4}  ", order), styles::muted_style()),
                Span::raw(truncate_string(item.display_name(), 28)),
            ];
            if let Some(pending) = slot.collection.pending_edit(item.id()) {
                spans.push(Span::styled(format!("  → {}", pending), styles::highlight_style()));
            }
            if slot.busy.contains(item.id()) {
                spans.push(Span::styled("  …", styles::muted_style()));
            }

            let style = if i == app.admin_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let mut title = format!(" {} ({}) ", E::KIND.title(), items.len());
    if slot.resetting {
        title.push_str("· מאפס... ");
    }

    let list_focused = !matches!(app.state, AppState::EditingForm);
    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(list_focused));

    let sort_editing = app.state == AppState::EditingSort;
    let (list_rect, input_rect) = if sort_editing {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(list_area);
        (split[0], Some(split[1]))
    } else {
        (list_area, None)
    };

    let mut state = ListState::default();
    state.select(Some(app.admin_selection));
    frame.render_stateful_widget(List::new(rows).block(block), list_rect, &mut state);

    if let Some(rect) = input_rect {
        let line = Line::from(vec![
            Span::styled(" סדר חדש: ", styles::muted_style()),
            Span::styled(format!("{}▌", app.sort_input), styles::input_style(true)),
            Span::styled("  Enter שמירה · Esc המשך", styles::muted_style()),
        ]);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styles::border_style(true));
        frame.render_widget(Paragraph::new(line).block(block), rect);
    }

    render_form::<E>(frame, app, form_area);
}

fn render_form<E: Editable>(frame: &mut Frame, app: &App, area: Rect) {
    let slot = app.admin.kind::<E>();
    let editing = app.state == AppState::EditingForm;

    let mut lines = Vec::new();
    for (i, label) in E::Form::LABELS.iter().enumerate() {
        let focused = editing && i == app.form_field;
        let is_selector = slot.form.text(i).is_none();
        let value = if is_selector {
            format!("◀ {} ▶", slot.form.display(i))
        } else {
            slot.form.display(i)
        };
        let cursor = if focused && !is_selector { "▌" } else { "" };

        lines.push(Line::from(Span::styled(
            format!("{}{}", if focused { "▶ " } else { "  " }, label),
            styles::muted_style(),
        )));
        lines.push(Line::from(Span::styled(
            format!("    {}{}", value, cursor),
            styles::input_style(focused),
        )));
    }

    lines.push(Line::from(""));
    if slot.creating {
        lines.push(Line::from(Span::styled("  שומר...", styles::muted_style())));
    }
    let hint = if editing {
        "  ↑/↓ שדה · Enter הוספה · Esc סיום"
    } else {
        "  [n] מילוי · [x] מחיקה · [o] סדר · [s] שמירת סדר · [R] איפוס"
    };
    lines.push(Line::from(Span::styled(hint, styles::muted_style())));

    let block = Block::default()
        .title(format!(" הוספת {} ", E::KIND.title()))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(editing));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
