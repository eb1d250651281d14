use crate::application::{App, AppMode};
use crate::infrastructure::ExportRepository;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Editing => Self::handle_editing_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::ExportText | AppMode::ExportCsv | AppMode::ImportCsv => {
                Self::handle_filename_input_mode(app, key)
            }
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('t') => app.start_text_export(),
                KeyCode::Char('e') => app.start_csv_export(),
                KeyCode::Char('l') => app.start_csv_import(),
                _ => {}
            }
            return;
        }

        app.status_message = None;

        match key {
            KeyCode::Up | KeyCode::Char('k') => app.move_up(),
            KeyCode::Down | KeyCode::Char('j') => app.move_down(),
            KeyCode::Left | KeyCode::Char('h') => app.move_left(),
            KeyCode::Right | KeyCode::Char('l') => app.move_right(),
            KeyCode::Enter | KeyCode::F(2) => app.start_editing(),
            KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('x') => app.clear_selected(),
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
            }
            // 'q' is handled by the main loop
            _ => {}
        }
    }

    fn handle_editing_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.finish_editing(),
            KeyCode::Esc => app.cancel_editing(),
            _ => Self::handle_text_key(app, key),
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_filename_input_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                // A blank name means the user backed out.
                let Some(filename) = app.chosen_filename() else {
                    app.cancel_filename_input();
                    return;
                };
                match app.mode {
                    AppMode::ExportText => {
                        let result =
                            ExportRepository::export_text(&app.store, &filename, app.include_title);
                        app.set_export_result(result);
                    }
                    AppMode::ExportCsv => {
                        let result = ExportRepository::export_csv(&app.store, &filename);
                        app.set_export_result(result);
                    }
                    AppMode::ImportCsv => {
                        let result = ExportRepository::import_csv(app.store.layout(), &filename);
                        app.set_import_result(result);
                    }
                    _ => {}
                }
            }
            KeyCode::Esc => app.cancel_filename_input(),
            _ => Self::handle_text_key(app, key),
        }
    }

    fn handle_text_key(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Backspace => app.backspace(),
            KeyCode::Delete => app.delete(),
            KeyCode::Left => app.cursor_left(),
            KeyCode::Right => app.cursor_right(),
            KeyCode::Home => app.cursor_home(),
            KeyCode::End => app.cursor_end(),
            KeyCode::Char(c) => app.insert_char(c),
            _ => {}
        }
    }
}
