//! Public catalog views: packages, hotels and destinations.
//!
//! Each view is a list on the left and the selected item on the right. A
//! fallback notice, when present, sits above the list.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use thaitrip_core::catalog::CatalogView;
use thaitrip_core::models::{Destination, Hotel, Package, TripFilter};
use thaitrip_core::utils::{format_list, format_price, format_stars, truncate_string};

use crate::app::App;
use crate::ui::styles;

const LIST_NAME_WIDTH: usize = 24;

/// Split off a one-line notice row when the view fell back
fn notice_split<E>(view: &CatalogView<E>, area: Rect) -> (Option<Rect>, Rect) {
    if view.notice.is_none() {
        return (None, area);
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);
    (Some(chunks[0]), chunks[1])
}

fn render_notice<E>(frame: &mut Frame, view: &CatalogView<E>, area: Option<Rect>) {
    if let (Some(area), Some(notice)) = (area, view.notice.as_deref()) {
        let line = Line::from(Span::styled(format!(" ⚠ {}", notice), styles::error_style()));
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn list_and_detail(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);
    (chunks[0], chunks[1])
}

fn render_list(
    frame: &mut Frame,
    area: Rect,
    title: String,
    rows: Vec<Line<'static>>,
    selection: usize,
) {
    let items: Vec<ListItem> = rows
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let style = if i == selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let mut state = ListState::default();
    state.select(Some(selection));

    frame.render_stateful_widget(List::new(items).block(block), area, &mut state);
}

fn render_detail(frame: &mut Frame, area: Rect, title: String, content: Vec<Line<'static>>) {
    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(content).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn empty_detail(text: &'static str) -> (String, Vec<Line<'static>>) {
    (
        " ".to_string(),
        vec![Line::from(Span::styled(text, styles::muted_style()))],
    )
}

fn field(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, styles::highlight_style()),
        Span::raw(value),
    ])
}

// ============================================================================
// Packages
// ============================================================================

pub fn render_packages(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(4)])
        .split(area);

    render_filter_bar(frame, app.package_filter, chunks[0]);

    let (notice_area, body) = notice_split(&app.packages, chunks[1]);
    render_notice(frame, &app.packages, notice_area);

    let (list_area, detail_area) = list_and_detail(body);
    let visible = app.visible_packages();

    let rows: Vec<Line<'static>> = if app.packages_loading && app.packages.items.is_empty() {
        vec![Line::from(Span::styled("טוען חבילות...", styles::muted_style()))]
    } else {
        visible
            .iter()
            .map(|p| {
                Line::from(vec![
                    Span::raw(format!("{:<24} ", truncate_string(&p.title, LIST_NAME_WIDTH))),
                    Span::styled(format!("${:.0}", p.price_start), styles::price_style()),
                ])
            })
            .collect()
    };
    let title = format!(" חבילות ({}) ", visible.len());
    render_list(frame, list_area, title, rows, app.package_selection);

    let (title, content) = match app.selected_package() {
        Some(package) => package_detail(package),
        None => empty_detail("אין חבילות בקטגוריה זו"),
    };
    render_detail(frame, detail_area, title, content);
}

fn render_filter_bar(frame: &mut Frame, current: TripFilter, area: Rect) {
    let mut spans = vec![Span::styled(" סינון: ", styles::muted_style())];
    for filter in TripFilter::ALL {
        let label = format!(" {} ", filter.label());
        if filter == current {
            spans.push(Span::styled(label, styles::tab_style(true)));
        } else {
            spans.push(Span::styled(label, styles::muted_style()));
        }
    }
    spans.push(Span::styled("  [f] החלפה", styles::muted_style()));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn package_detail(package: &Package) -> (String, Vec<Line<'static>>) {
    let mut lines = vec![
        Line::from(Span::styled(format_price(package.price_start), styles::price_style())),
        Line::from(""),
        Line::from(package.description.clone()),
        Line::from(""),
        field("משך: ", package.duration.clone()),
        field("מתאים ל: ", package.trip_type.label().to_string()),
        Line::from(""),
        Line::from(Span::styled("מה כלול", styles::title_style())),
    ];
    for highlight in &package.highlights {
        lines.push(Line::from(format!("  ✓ {}", highlight)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(package.image.clone(), styles::muted_style())));

    (format!(" {} ", package.title), lines)
}

// ============================================================================
// Hotels
// ============================================================================

pub fn render_hotels(frame: &mut Frame, app: &App, area: Rect) {
    let (notice_area, body) = notice_split(&app.hotels, area);
    render_notice(frame, &app.hotels, notice_area);

    let (list_area, detail_area) = list_and_detail(body);

    let rows: Vec<Line<'static>> = if app.hotels_loading && app.hotels.items.is_empty() {
        vec![Line::from(Span::styled("טוען מלונות...", styles::muted_style()))]
    } else {
        app.hotels
            .items
            .iter()
            .map(|h| {
                Line::from(vec![
                    Span::raw(format!("{:<24} ", truncate_string(&h.name, LIST_NAME_WIDTH))),
                    Span::styled(format_stars(h.stars), styles::highlight_style()),
                ])
            })
            .collect()
    };
    let title = format!(" מלונות ({}) ", app.hotels.items.len());
    render_list(frame, list_area, title, rows, app.hotel_selection);

    let (title, content) = match app.hotels.items.get(app.hotel_selection) {
        Some(hotel) => hotel_detail(hotel),
        None => empty_detail("אין מלונות להצגה"),
    };
    render_detail(frame, detail_area, title, content);
}

fn hotel_detail(hotel: &Hotel) -> (String, Vec<Line<'static>>) {
    let lines = vec![
        Line::from(Span::styled(format_stars(hotel.stars), styles::highlight_style())),
        Line::from(""),
        field("אזור: ", hotel.area.clone()),
        field("רמת מחיר: ", hotel.price_level.clone()),
        field("מאפיינים: ", format_list(&hotel.tags)),
        Line::from(""),
        Line::from(Span::styled(hotel.image.clone(), styles::muted_style())),
    ];
    (format!(" {} ", hotel.name), lines)
}

// ============================================================================
// Destinations
// ============================================================================

pub fn render_destinations(frame: &mut Frame, app: &App, area: Rect) {
    let (list_area, detail_area) = list_and_detail(area);

    let rows: Vec<Line<'static>> = app
        .destinations
        .items
        .iter()
        .map(|d| Line::from(truncate_string(&d.name, LIST_NAME_WIDTH)))
        .collect();
    let title = format!(" יעדים ({}) ", app.destinations.items.len());
    render_list(frame, list_area, title, rows, app.destination_selection);

    let (title, content) = match app.destinations.items.get(app.destination_selection) {
        Some(destination) => destination_detail(destination),
        None => empty_detail("אין יעדים להצגה"),
    };
    render_detail(frame, detail_area, title, content);
}

fn destination_detail(destination: &Destination) -> (String, Vec<Line<'static>>) {
    let lines = vec![
        Line::from(destination.description.clone()),
        Line::from(""),
        field("עונה מומלצת: ", destination.season.clone()),
        Line::from(""),
        Line::from(Span::styled(destination.image.clone(), styles::muted_style())),
    ];
    (format!(" {} ", destination.name), lines)
}
