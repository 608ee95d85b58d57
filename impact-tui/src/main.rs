use std::fs::OpenOptions;
use std::io::{self, stdout};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use impact_report::{DashboardConfig, DEFAULT_CONFIG_FILE};
use impact_tui::{input, ui, AppState};

fn main() -> Result<()> {
    let config = DashboardConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))
        .with_context(|| format!("failed to load {DEFAULT_CONFIG_FILE}"))?;
    init_tracing(&config)?;

    // A dataset that fails to load is fatal; report it on the normal screen.
    let dataset = match config.dataset_cache().get_or_load() {
        Ok(ds) => ds,
        Err(e) => {
            error!(error = %e, "dataset load failed");
            return Err(e).context("cannot start dashboard");
        }
    };
    info!(
        rows = dataset.len(),
        entities = dataset.entities().len(),
        "dashboard starting"
    );

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut app = AppState::new(dataset, &config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("dashboard closed");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 3. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

/// Logs go to `config.log_file`; the terminal belongs to the UI.
fn init_tracing(config: &DashboardConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("failed to open log file {}", config.log_file.display()))?;
    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("invalid log_level '{}'", config.log_level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .init();
    Ok(())
}
