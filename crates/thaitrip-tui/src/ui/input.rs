//! Keyboard input handling for the TUI.
//!
//! Input is dispatched on the application state first (overlays and text
//! entry swallow keys), then on the current tab.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use thaitrip_core::catalog::defaults::FAQS;
use thaitrip_core::catalog::EntityKind;

use crate::app::{
    can_add_chat_char, can_add_login_char, can_add_text_char, step_selection, App, AppState,
    LoginFocus, Tab, LEAD_LABELS, LEAD_TYPE_FIELD,
};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.state {
        AppState::LoggingIn => {
            handle_login_input(app, key);
            return Ok(false);
        }
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
            return Ok(false);
        }
        AppState::ConfirmingQuit => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.state = AppState::Quitting;
                    return Ok(true);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.state = AppState::Normal;
                }
                _ => {}
            }
            return Ok(false);
        }
        AppState::ConfirmingReset => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    app.state = AppState::Normal;
                    app.admin_reset();
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.state = AppState::Normal;
                }
                _ => {}
            }
            return Ok(false);
        }
        AppState::EditingForm => {
            handle_form_input(app, key);
            return Ok(false);
        }
        AppState::EditingSort => {
            handle_sort_input(app, key);
            return Ok(false);
        }
        AppState::EditingContact => {
            handle_contact_input(app, key);
            return Ok(false);
        }
        AppState::Chatting => {
            handle_chat_input(app, key);
            return Ok(false);
        }
        AppState::Quitting => return Ok(true),
        AppState::Normal => {}
    }

    // Any key press clears a transient status message
    app.status_message = None;

    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
            return Ok(false);
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
            return Ok(false);
        }
        KeyCode::Char('r') => {
            app.refresh_catalog();
            if app.current_tab == Tab::Admin {
                app.admin_load();
            }
            return Ok(false);
        }
        KeyCode::Tab => {
            app.current_tab = app.current_tab.next();
            return Ok(false);
        }
        KeyCode::BackTab => {
            app.current_tab = app.current_tab.prev();
            return Ok(false);
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if let Some(tab) = Tab::from_digit(c) {
                app.current_tab = tab;
            }
            return Ok(false);
        }
        _ => {}
    }

    match app.current_tab {
        Tab::Home => handle_home_input(app, key),
        Tab::Packages => handle_packages_input(app, key),
        Tab::Hotels => {
            if let Some(delta) = vertical_delta(key.code) {
                app.hotel_selection = step_selection(app.hotel_selection, delta, app.hotels.items.len());
            }
        }
        Tab::Destinations => {
            if let Some(delta) = vertical_delta(key.code) {
                app.destination_selection =
                    step_selection(app.destination_selection, delta, app.destinations.items.len());
            }
        }
        Tab::Advisor => {
            if key.code == KeyCode::Enter {
                app.state = AppState::Chatting;
            }
        }
        Tab::Contact => {
            if key.code == KeyCode::Enter {
                app.state = AppState::EditingContact;
            }
        }
        Tab::Admin => handle_admin_input(app, key),
    }

    Ok(false)
}

fn vertical_delta(code: KeyCode) -> Option<isize> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(-1),
        KeyCode::Down | KeyCode::Char('j') => Some(1),
        _ => None,
    }
}

// ============================================================================
// Public Tabs
// ============================================================================

fn handle_home_input(app: &mut App, key: KeyEvent) {
    if let Some(delta) = vertical_delta(key.code) {
        app.faq_selection = step_selection(app.faq_selection, delta, FAQS.len());
    }
}

fn handle_packages_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('f') | KeyCode::Right => {
            app.set_package_filter(app.package_filter.next());
        }
        KeyCode::Left => {
            app.set_package_filter(app.package_filter.prev());
        }
        code => {
            if let Some(delta) = vertical_delta(code) {
                let len = app.visible_packages().len();
                app.package_selection = step_selection(app.package_selection, delta, len);
            }
        }
    }
}

fn handle_chat_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.state = AppState::Normal,
        KeyCode::Enter => app.send_advisor_message(),
        KeyCode::Backspace => {
            app.advisor_input.pop();
        }
        KeyCode::Char(c) => {
            if can_add_chat_char(app.advisor_input.chars().count(), c) {
                app.advisor_input.push(c);
            }
        }
        _ => {}
    }
}

fn handle_contact_input(app: &mut App, key: KeyEvent) {
    let field_count = LEAD_LABELS.len();
    match key.code {
        KeyCode::Esc => app.state = AppState::Normal,
        KeyCode::Down | KeyCode::Tab => {
            app.lead_field = (app.lead_field + 1) % field_count;
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.lead_field = (app.lead_field + field_count - 1) % field_count;
        }
        KeyCode::Left | KeyCode::Right if app.lead_field == LEAD_TYPE_FIELD => {
            app.lead.cycle_traveller_type();
        }
        KeyCode::Enter => app.submit_lead(),
        KeyCode::Backspace => {
            let field = app.lead_field;
            if let Some(text) = app.lead_text_mut(field) {
                text.pop();
            }
        }
        KeyCode::Char(c) => {
            let field = app.lead_field;
            if let Some(text) = app.lead_text_mut(field) {
                if can_add_text_char(text.chars().count(), c) {
                    text.push(c);
                }
            }
        }
        _ => {}
    }
}

// ============================================================================
// Admin
// ============================================================================

fn handle_admin_input(app: &mut App, key: KeyEvent) {
    if !app.admin.is_authenticated() {
        if key.code == KeyCode::Enter {
            app.start_login();
        }
        return;
    }

    match key.code {
        KeyCode::Char('p') => app.set_admin_kind(EntityKind::Package),
        KeyCode::Char('h') => app.set_admin_kind(EntityKind::Hotel),
        KeyCode::Char('d') => app.set_admin_kind(EntityKind::Destination),
        KeyCode::Char('n') => {
            app.form_field = 0;
            app.state = AppState::EditingForm;
        }
        KeyCode::Char('x') => app.admin_delete_selected(),
        KeyCode::Char('R') => app.state = AppState::ConfirmingReset,
        KeyCode::Char('o') => app.begin_sort_edit(),
        KeyCode::Char('s') => app.admin_save_order(),
        KeyCode::Char('L') => app.logout(),
        KeyCode::Esc => app.admin.dismiss_banner(),
        code => {
            if let Some(delta) = vertical_delta(code) {
                app.admin_selection = step_selection(app.admin_selection, delta, app.admin_len());
            }
        }
    }
}

fn handle_form_input(app: &mut App, key: KeyEvent) {
    let field_count = app.form_field_count();
    match key.code {
        KeyCode::Esc => app.state = AppState::Normal,
        KeyCode::Down | KeyCode::Tab => {
            app.form_field = (app.form_field + 1) % field_count;
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.form_field = (app.form_field + field_count - 1) % field_count;
        }
        KeyCode::Left | KeyCode::Right => app.form_cycle(),
        KeyCode::Enter => app.admin_create(),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char(c) => app.form_push_char(c),
        _ => {}
    }
}

fn handle_sort_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_sort_edit(),
        KeyCode::Enter => app.commit_sort_edit(),
        KeyCode::Backspace => {
            app.sort_input.pop();
            app.sync_sort_edit();
        }
        KeyCode::Char(c) => {
            if can_add_text_char(app.sort_input.chars().count(), c) {
                app.sort_input.push(c);
                app.sync_sort_edit();
            }
        }
        _ => {}
    }
}

// ============================================================================
// Login
// ============================================================================

fn handle_login_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Normal;
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
                if can_add_login_char(app.login_username.chars().count(), c) {
                    app.login_username.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_login_char(app.login_password.chars().count(), c) {
                    app.login_password.push(c);
                }
            }
            LoginFocus::Button => {}
        },
        _ => {}
    }
}
