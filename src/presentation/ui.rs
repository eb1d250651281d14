use crate::application::{App, AppMode};
use crate::domain::{Coordinate, Rgb, CORNER_LABEL};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

const PREVIEW_TAB_WIDTH: usize = 12;

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(app.store.layout().slots().len() as u16 + 3),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_grid(f, app, chunks[1]);
    render_preview(f, app, chunks[2]);
    render_status_bar(f, app, chunks[3]);

    if app.mode == AppMode::Help {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!(
        "weektable - Weekly Timetable | Cell: {} {}",
        app.selected_day_name(),
        app.selected_slot_name()
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn render_grid(f: &mut Frame, app: &App, area: Rect) {
    let layout = app.store.layout();
    let header_style = Style::default()
        .bg(Color::Rgb(0x2E, 0x40, 0x53))
        .fg(Color::Rgb(0xFD, 0xFE, 0xFE))
        .add_modifier(Modifier::BOLD);

    let mut headers = vec![Cell::from(CORNER_LABEL).style(header_style)];
    for (day, name) in layout.days().iter().enumerate() {
        let style = if day == app.selected_day {
            header_style.bg(Color::LightBlue).fg(Color::Black)
        } else {
            header_style
        };
        headers.push(Cell::from(name.as_str()).style(style));
    }
    let mut rows = vec![Row::new(headers).height(1)];

    for (slot, slot_name) in layout.slots().iter().enumerate() {
        let slot_style = if slot == app.selected_slot {
            header_style.bg(Color::LightBlue).fg(Color::Black)
        } else {
            header_style
        };
        let mut cells = vec![Cell::from(slot_name.as_str()).style(slot_style)];

        for day in 0..layout.days().len() {
            let coord = Coordinate::new(day, slot);
            let text = app
                .store
                .get_at(coord)
                .map(|label| label.as_str())
                .unwrap_or("");
            let mut style = match app.cell_color(coord) {
                Some(rgb) => Style::default().bg(to_color(rgb)).fg(Color::Black),
                None => Style::default(),
            };
            if coord == app.selected() {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }
            cells.push(Cell::from(text).style(style));
        }
        rows.push(Row::new(cells).height(1));
    }

    let slot_width = layout
        .slots()
        .iter()
        .map(|s| s.chars().count())
        .chain(std::iter::once(CORNER_LABEL.len()))
        .max()
        .unwrap_or(0) as u16
        + 1;
    let mut widths = vec![Constraint::Length(slot_width)];
    widths.extend(layout.days().iter().map(|_| Constraint::Fill(1)));

    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title("Timetable"))
        .column_spacing(1);
    f.render_widget(table, area);
}

fn render_preview(f: &mut Frame, app: &App, area: Rect) {
    let preview = Paragraph::new(expand_tabs(&app.preview, PREVIEW_TAB_WIDTH))
        .block(Block::default().borders(Borders::ALL).title("Exported Timetable Preview"))
        .style(Style::default().fg(Color::Gray));
    f.render_widget(preview, area);
}

/// Replaces tabs with spaces up to the next multiple of `width`. Terminal
/// widgets do not expand tabs themselves.
pub fn expand_tabs(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let mut column = 0;
        for c in line.chars() {
            if c == '\t' {
                let pad = width - column % width;
                out.extend(std::iter::repeat_n(' ', pad));
                column += pad;
            } else {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => match app.status_message {
            Some(ref status) => status.clone(),
            None => "Enter: edit | x: clear | Ctrl+T: export text | Ctrl+E: export CSV | Ctrl+L: import CSV | F1/?: help | q: quit".to_string(),
        },
        AppMode::Editing => match app.status_message {
            Some(ref status) => format!("Subject: {} ({status})", app.input),
            None => format!("Subject: {} (Enter to save, Esc to cancel)", app.input),
        },
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
        AppMode::ExportText => format!("Export text as: {} (Enter to export, Esc to cancel)", app.filename_input),
        AppMode::ExportCsv => format!("Export CSV as: {} (Enter to export, Esc to cancel)", app.filename_input),
        AppMode::ImportCsv => format!("Import CSV from: {} (Enter to import, Esc to cancel)", app.filename_input),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Editing if app.status_message.is_some() => Style::default().fg(Color::Red),
            AppMode::Editing => Style::default().fg(Color::Green),
            AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::ExportText | AppMode::ExportCsv => Style::default().fg(Color::Magenta),
            AppMode::ImportCsv => Style::default().fg(Color::Yellow),
        });
    f.render_widget(input, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("weektable Help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"WEEKTABLE - WEEKLY TIMETABLE MAKER

=== EDITING ===
Arrow keys      Move between cells (hjkl also work)
Enter/F2        Type a subject for the selected cell
Enter           (while typing) Save the subject
Esc             (while typing) Cancel
Delete/x        Clear the selected cell

Subjects are trimmed; a blank subject is rejected and the
cell keeps its previous value.

=== COLOURS ===
Known subjects (Math, Science, English, History, Computer by
default) get their own colour; any other subject is grey.
Colours can be changed in weektable.json.

=== FILES ===
Ctrl+T          Export the preview as a tab-separated text file
Ctrl+E          Export the timetable as a CSV file
Ctrl+L          Load a timetable from a CSV file exported earlier
                Leave the filename empty to cancel

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window

q               Quit (the timetable itself is not saved; export it first)"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tabs_aligns_columns() {
        assert_eq!(expand_tabs("a\tb", 4), "a   b");
        assert_eq!(expand_tabs("abcd\tb", 4), "abcd    b");
        assert_eq!(expand_tabs("x\ty\nlonger\tz", 8), "x       y\nlonger  z");
    }

    #[test]
    fn test_expand_tabs_without_tabs_is_identity() {
        assert_eq!(expand_tabs("plain\ntext", 8), "plain\ntext");
    }
}
