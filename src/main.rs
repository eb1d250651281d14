//! weektable - Weekly Timetable Maker
//!
//! Terminal front end for building a weekly timetable: pick a cell, type a
//! subject, watch the preview update, and export the result as text or CSV.
//! A `feedback` subcommand records course feedback in an append-only CSV log.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use weektable::application::{App, AppMode};
use weektable::domain::FeedbackEntry;
use weektable::infrastructure::{init_logging, FeedbackLog, TimetableConfig, DEFAULT_CONFIG_FILE};
use weektable::presentation::{render_ui, InputHandler};

#[derive(Parser, Debug)]
#[command(name = "weektable")]
#[command(about = "Weekly timetable maker with text and CSV export")]
#[command(version)]
struct Cli {
    /// Config file path (JSON)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// File that receives log output
    #[arg(long, default_value = "weektable.log")]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record or review course feedback
    Feedback {
        #[command(subcommand)]
        action: FeedbackCommand,
    },
}

#[derive(Subcommand, Debug)]
enum FeedbackCommand {
    /// Append one submission to the feedback log
    Submit {
        /// Teacher clarity, 1-5
        #[arg(long)]
        clarity: Option<u8>,
        /// Course content, 1-5
        #[arg(long)]
        content: Option<u8>,
        /// Was the pace appropriate? yes/no
        #[arg(long)]
        pace: Option<String>,
        /// Would you recommend the course? yes/no
        #[arg(long)]
        recommend: Option<String>,
        #[arg(long, default_value = "")]
        comments: String,
    },
    /// Print every submission in the log
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_file)
        .with_context(|| format!("Failed to open log file {}", cli.log_file.display()))?;

    let config = TimetableConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    match cli.command {
        Some(Command::Feedback { action }) => run_feedback(&config, action),
        None => run_timetable(&config),
    }
}

fn run_feedback(config: &TimetableConfig, action: FeedbackCommand) -> Result<()> {
    let log = FeedbackLog::new(&config.feedback_log);
    match action {
        FeedbackCommand::Submit {
            clarity,
            content,
            pace,
            recommend,
            comments,
        } => {
            let entry = FeedbackEntry::from_form(
                Local::now().naive_local(),
                clarity.unwrap_or(0),
                content.unwrap_or(0),
                pace.as_deref(),
                recommend.as_deref(),
                &comments,
            )
            .context("Incomplete form")?;
            log.append(&entry)
                .with_context(|| format!("Failed to write {}", log.path().display()))?;
            println!("Your feedback has been submitted successfully.");
        }
        FeedbackCommand::Show => {
            let preview = log
                .render_preview()
                .with_context(|| format!("Failed to read {}", log.path().display()))?;
            println!("{preview}");
        }
    }
    Ok(())
}

fn run_timetable(config: &TimetableConfig) -> Result<()> {
    let mut app = App::from_config(config).context("Invalid timetable configuration")?;
    tracing::info!(
        days = app.store.layout().days().len(),
        slots = app.store.layout().slots().len(),
        "starting timetable editor"
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res.context("Terminal error")
}

/// Draws the UI and dispatches key presses until the user quits with 'q'
/// in normal mode.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if app.mode == AppMode::Normal => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
