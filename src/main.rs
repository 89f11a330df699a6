// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};

mod app;
mod data;
mod events;
mod scheduler;
mod source;
mod ui;

use app::{App, View};
use data::HealthThresholds;
use source::{DailyLogSource, FileLogSource, LogSource};

#[derive(Parser, Debug)]
#[command(name = "sysmon-viewer")]
#[command(about = "Live terminal dashboard for system-monitor telemetry logs")]
struct Args {
    /// Directory holding the sampler's daily log files
    #[arg(short = 'd', long, default_value = "logs", conflicts_with = "file")]
    log_dir: PathBuf,

    /// Load a specific log file instead of tailing today's
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Refresh interval in milliseconds
    #[arg(short, long, default_value = "2000")]
    refresh: u64,

    /// Start with auto-refresh paused
    #[arg(long)]
    paused: bool,

    /// App CPU % warning threshold (30s rolling average)
    #[arg(long, default_value = "30.0")]
    cpu_warn: f64,

    /// App CPU % high threshold
    #[arg(long, default_value = "50.0")]
    cpu_high: f64,

    /// App memory % warning threshold
    #[arg(long, default_value = "40.0")]
    mem_warn: f64,

    /// App memory % high threshold
    #[arg(long, default_value = "60.0")]
    mem_high: f64,

    /// Rolling health window in seconds
    #[arg(long, default_value = "30")]
    window_secs: i64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing()?;

    let thresholds = HealthThresholds {
        cpu_warning: args.cpu_warn,
        cpu_high: args.cpu_high,
        mem_warning: args.mem_warn,
        mem_high: args.mem_high,
        window: chrono::Duration::seconds(args.window_secs),
    };

    let (source, user_file): (Box<dyn LogSource>, bool) = match args.file {
        Some(ref path) => (Box::new(FileLogSource::new(path)), true),
        None => (Box::new(DailyLogSource::new(&args.log_dir)), false),
    };

    run_tui(
        source,
        thresholds,
        Duration::from_millis(args.refresh.max(1)),
        user_file,
        args.paused,
    )
}

/// Route diagnostics to a side file so the TUI screen stays clean.
/// Active only when RUST_LOG is set.
fn init_tracing() -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let file = std::fs::File::create("sysmon-viewer.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Run the TUI with the given log source
fn run_tui(
    source: Box<dyn LogSource>,
    thresholds: HealthThresholds,
    refresh_interval: Duration,
    user_file: bool,
    paused: bool,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Create app and load initial data
    let mut app = App::new(source, thresholds, user_file);
    app.reload();
    if paused {
        // Keep the configured period around for a later Space toggle
        app.scheduler = scheduler::RefreshScheduler::new(refresh_interval);
    } else {
        app.start_auto_refresh(refresh_interval, Instant::now());
    }

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(0, area.height / 2 - 2, area.width, 5);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            // Render header with current load and health
            ui::common::render_header(frame, app, chunks[0]);

            // Render tabs
            ui::common::render_tabs(frame, app, chunks[1]);

            // Render current view
            match app.current_view {
                View::Overview => ui::overview::render(frame, app, chunks[2]),
                View::Charts => ui::charts::render(frame, app, chunks[2]),
                View::Processes => ui::processes::render(frame, app, chunks[2]),
            }

            // Render status bar
            ui::common::render_status_bar(frame, app, chunks[3]);

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Scheduled ingestion; overlapping ticks are dropped by the
        // scheduler's guard
        app.on_tick(Instant::now());
    }

    Ok(())
}
