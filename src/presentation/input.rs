use super::theme::brand_for_key;
use super::ui::help_line_count;
use crate::application::{App, AppMode, Screen};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        // The system dialog swallows every key until answered.
        if app.is_prompting() {
            Self::handle_permission_dialog(app, key);
            return;
        }

        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Detail => Self::handle_detail_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_permission_dialog(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.answer_permission_prompt(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.answer_permission_prompt(false);
            }
            _ => {}
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        app.status_message = None;

        match key {
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.show_help();
                return;
            }
            KeyCode::Char('t') => {
                app.cycle_appearance();
                return;
            }
            KeyCode::Char('o') => {
                app.open_settings();
                return;
            }
            _ => {}
        }

        match app.screen() {
            Screen::PermissionPrompt => {
                if matches!(key, KeyCode::Enter | KeyCode::Char('a')) {
                    app.request_permission();
                }
            }
            Screen::PermissionDenied | Screen::AcquiringLocation => {}
            Screen::ShopList => Self::handle_shop_list(app, key, modifiers),
        }
    }

    fn handle_shop_list(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if let KeyCode::Char(c) = key {
            if let Some(brand) = brand_for_key(c) {
                app.toggle_brand(brand);
                return;
            }
        }

        match key {
            KeyCode::Char('d') if !modifiers.contains(KeyModifiers::SHIFT) => {
                app.next_distance();
            }
            KeyCode::Char('D') | KeyCode::Char('d') => {
                app.previous_distance();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.select_previous();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.select_next();
            }
            KeyCode::Enter => {
                app.open_detail();
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                app.camera.zoom_in();
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                app.camera.zoom_out();
            }
            KeyCode::Char('c') => {
                let position = app.position();
                app.camera.on_user_location_changed(position);
            }
            _ => {}
        }
    }

    fn handle_detail_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => {
                app.close_detail();
            }
            KeyCode::Char('g') => {
                app.get_directions();
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.show_help();
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        let max_scroll = help_line_count().saturating_sub(1);
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll = (app.help_scroll + 1).min(max_scroll);
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll = (app.help_scroll + 5).min(max_scroll);
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}
