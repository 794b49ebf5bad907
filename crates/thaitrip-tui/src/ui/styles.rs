//! Colors and text styles. Lagoon teal for chrome, mango for anything the
//! user can act on.

use ratatui::style::{Color, Modifier, Style};

const LAGOON: Color = Color::Rgb(0, 150, 160);
const PALM: Color = Color::Rgb(96, 176, 96);
const MANGO: Color = Color::Rgb(232, 140, 48);
const CHILI: Color = Color::Rgb(200, 64, 64);
const STONE: Color = Color::Rgb(128, 128, 128);
const DEEP_WATER: Color = Color::Rgb(32, 56, 64);
const NIGHT: Color = Color::Rgb(24, 36, 40);
const SAND: Color = Color::White;

fn fg(color: Color) -> Style {
    Style::default().fg(color)
}

fn bold(color: Color) -> Style {
    fg(color).add_modifier(Modifier::BOLD)
}

/// Pick between two styles on a focus/selection flag
fn either(flag: bool, on: Style, off: Style) -> Style {
    if flag {
        on
    } else {
        off
    }
}

// Chrome

pub fn title_style() -> Style {
    bold(LAGOON)
}

pub fn tab_style(selected: bool) -> Style {
    either(
        selected,
        bold(LAGOON).add_modifier(Modifier::UNDERLINED),
        fg(SAND),
    )
}

pub fn border_style(focused: bool) -> Style {
    either(focused, fg(LAGOON), fg(STONE))
}

pub fn status_bar_style() -> Style {
    fg(SAND).bg(NIGHT)
}

// Lists and text

pub fn selected_style() -> Style {
    Style::default().bg(DEEP_WATER).add_modifier(Modifier::BOLD)
}

pub fn list_item_style() -> Style {
    fg(SAND)
}

pub fn muted_style() -> Style {
    fg(STONE)
}

pub fn highlight_style() -> Style {
    fg(MANGO)
}

pub fn price_style() -> Style {
    bold(MANGO)
}

pub fn input_style(focused: bool) -> Style {
    either(focused, fg(MANGO), list_item_style())
}

// Feedback

pub fn success_style() -> Style {
    fg(PALM)
}

pub fn error_style() -> Style {
    fg(CHILI)
}

// Help overlay

pub fn help_key_style() -> Style {
    bold(MANGO)
}

pub fn help_desc_style() -> Style {
    fg(SAND)
}

/// Speaker label in the advisor transcript
pub fn speaker_style(is_user: bool) -> Style {
    either(is_user, bold(MANGO), bold(LAGOON))
}
