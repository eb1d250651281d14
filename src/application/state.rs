//! Application state for the terminal timetable editor.
//!
//! The grid contents live in a single [`GridStore`]; everything else here is
//! cursor, prompt and status-line state for the user interface.

use crate::domain::{Coordinate, GridStore, Palette, Projector, Rgb, TimetableResult};
use crate::infrastructure::TimetableConfig;

/// Represents the current mode of the application.
///
/// The mode decides how key presses are interpreted and which prompt the
/// status bar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Cursor movement and shortcuts
    Normal,
    /// Typing a subject for the selected cell
    Editing,
    /// Help screen is displayed
    Help,
    /// Prompting for a plain-text export filename
    ExportText,
    /// Prompting for a CSV export filename
    ExportCsv,
    /// Prompting for a CSV file to import
    ImportCsv,
}

/// Main application state: the timetable plus UI state.
#[derive(Debug)]
pub struct App {
    /// Subject assignments, the single source of truth for the grid
    pub store: GridStore,
    /// Subject colours
    pub palette: Palette,
    /// Whether text exports start with the title line
    pub include_title: bool,
    /// Selected day (column index)
    pub selected_day: usize,
    /// Selected time slot (row index)
    pub selected_slot: usize,
    /// Current application mode
    pub mode: AppMode,
    /// Subject being typed in editing mode
    pub input: String,
    /// Byte offset of the cursor in whichever buffer is being edited
    pub cursor_position: usize,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Filename being typed in an export or import prompt
    pub filename_input: String,
    /// Tab-separated preview of the timetable, refreshed after every change
    pub preview: String,
}

impl App {
    pub fn new(store: GridStore, palette: Palette, include_title: bool) -> Self {
        let preview = Projector::render_table(&store);
        Self {
            store,
            palette,
            include_title,
            selected_day: 0,
            selected_slot: 0,
            mode: AppMode::Normal,
            input: String::new(),
            cursor_position: 0,
            help_scroll: 0,
            status_message: None,
            filename_input: String::new(),
            preview,
        }
    }

    pub fn from_config(config: &TimetableConfig) -> TimetableResult<Self> {
        let store = GridStore::new(config.layout()?);
        Ok(Self::new(store, config.palette()?, config.include_title))
    }

    pub fn selected(&self) -> Coordinate {
        Coordinate::new(self.selected_day, self.selected_slot)
    }

    pub fn selected_day_name(&self) -> &str {
        self.store.layout().day_name(self.selected())
    }

    pub fn selected_slot_name(&self) -> &str {
        self.store.layout().slot_name(self.selected())
    }

    /// Display colour for a cell, or `None` when it is empty.
    pub fn cell_color(&self, coord: Coordinate) -> Option<Rgb> {
        self.store
            .get_at(coord)
            .map(|label| self.palette.resolve_color(label.as_str()))
    }

    pub fn move_up(&mut self) {
        self.selected_slot = self.selected_slot.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_slot + 1 < self.store.layout().slots().len() {
            self.selected_slot += 1;
        }
    }

    pub fn move_left(&mut self) {
        self.selected_day = self.selected_day.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.selected_day + 1 < self.store.layout().days().len() {
            self.selected_day += 1;
        }
    }

    /// Regenerates the preview from the store.
    pub fn refresh_preview(&mut self) {
        self.preview = Projector::render_table(&self.store);
    }

    /// Switches to editing mode, pre-filled with the selected cell's subject.
    pub fn start_editing(&mut self) {
        self.mode = AppMode::Editing;
        self.input = self
            .store
            .get_at(self.selected())
            .map(|label| label.to_string())
            .unwrap_or_default();
        self.cursor_position = self.input.len();
        self.status_message = None;
    }

    /// Stores the typed subject in the selected cell.
    ///
    /// A rejected subject keeps the editor open with the reason in the
    /// status bar, and the grid is not touched.
    pub fn finish_editing(&mut self) {
        let day = self.selected_day_name().to_string();
        let slot = self.selected_slot_name().to_string();
        match self.store.set(&day, &slot, &self.input) {
            Ok(()) => {
                self.refresh_preview();
                self.status_message = Some(format!("{} set for {day} {slot}", self.input.trim()));
                self.mode = AppMode::Normal;
                self.input.clear();
                self.cursor_position = 0;
            }
            Err(err) => {
                tracing::warn!(day = %day, slot = %slot, error = %err, "subject rejected");
                self.status_message = Some(format!("Input Error: {err}"));
            }
        }
    }

    /// Cancels editing and returns to normal mode without saving changes.
    pub fn cancel_editing(&mut self) {
        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Empties the selected cell.
    pub fn clear_selected(&mut self) {
        let coord = self.selected();
        match self.store.clear_at(coord) {
            Ok(Some(label)) => {
                self.refresh_preview();
                self.status_message = Some(format!(
                    "Removed {label} from {} {}",
                    self.selected_day_name(),
                    self.selected_slot_name()
                ));
            }
            Ok(None) => {}
            Err(err) => self.status_message = Some(format!("Input Error: {err}")),
        }
    }

    pub fn start_text_export(&mut self) {
        self.start_filename_prompt(AppMode::ExportText, "timetable.txt");
    }

    pub fn start_csv_export(&mut self) {
        self.start_filename_prompt(AppMode::ExportCsv, "timetable.csv");
    }

    pub fn start_csv_import(&mut self) {
        self.start_filename_prompt(AppMode::ImportCsv, "timetable.csv");
    }

    fn start_filename_prompt(&mut self, mode: AppMode, default: &str) {
        self.mode = mode;
        self.filename_input = default.to_string();
        self.cursor_position = self.filename_input.len();
        self.status_message = None;
    }

    /// Cancels filename input and returns to normal mode.
    pub fn cancel_filename_input(&mut self) {
        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// The filename typed at the prompt, or `None` if it was left blank.
    pub fn chosen_filename(&self) -> Option<String> {
        let name = self.filename_input.trim();
        (!name.is_empty()).then(|| name.to_string())
    }

    /// Processes the result of a text or CSV export.
    pub fn set_export_result(&mut self, result: TimetableResult<String>) {
        match result {
            Ok(filename) => {
                self.status_message = Some(format!("Exported to {filename}"));
            }
            Err(error) => {
                tracing::warn!(error = %error, "export failed");
                self.status_message = Some(format!("Export failed: {error}"));
            }
        }
        self.cancel_filename_input();
    }

    /// Processes the result of a CSV import, replacing the grid on success.
    pub fn set_import_result(&mut self, result: TimetableResult<GridStore>) {
        match result {
            Ok(store) => {
                self.store = store;
                self.selected_day = 0;
                self.selected_slot = 0;
                self.refresh_preview();
                self.status_message = Some(format!("Imported {} subjects", self.store.len()));
            }
            Err(error) => {
                tracing::warn!(error = %error, "import failed");
                self.status_message = Some(format!("Import failed: {error}"));
            }
        }
        self.cancel_filename_input();
    }

    fn buffer_mut(&mut self) -> &mut String {
        match self.mode {
            AppMode::Editing => &mut self.input,
            _ => &mut self.filename_input,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let pos = self.cursor_position;
        self.buffer_mut().insert(pos, c);
        self.cursor_position += c.len_utf8();
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) {
        let pos = self.cursor_position;
        let buffer = self.buffer_mut();
        if let Some(c) = buffer[..pos].chars().next_back() {
            let start = pos - c.len_utf8();
            buffer.remove(start);
            self.cursor_position = start;
        }
    }

    /// Deletes the character under the cursor.
    pub fn delete(&mut self) {
        let pos = self.cursor_position;
        let buffer = self.buffer_mut();
        if pos < buffer.len() {
            buffer.remove(pos);
        }
    }

    pub fn cursor_left(&mut self) {
        let pos = self.cursor_position;
        let buffer = self.buffer_mut();
        if let Some(c) = buffer[..pos].chars().next_back() {
            self.cursor_position = pos - c.len_utf8();
        }
    }

    pub fn cursor_right(&mut self) {
        let pos = self.cursor_position;
        let buffer = self.buffer_mut();
        if let Some(c) = buffer[pos..].chars().next() {
            self.cursor_position = pos + c.len_utf8();
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.buffer_mut().len();
    }
}
