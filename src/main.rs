#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]

use std::error::Error;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cx_navigator::simulation::{Navigator, NavigatorConfig};
use cx_navigator::ui::{
    field::compute_arena_grid,
    render::{draw_ui, hud_line},
    NeuralPanels,
};

#[derive(Parser, Debug)]
#[command(name = "cx_navigator")]
#[command(about = "Central complex navigation: compass, path integration and vector memory", long_about = None)]
struct Cli {
    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// JSON configuration file (missing fields take defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Milliseconds between ticks in the terminal viewer
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,

    /// Run without the terminal viewer
    #[arg(long)]
    headless: bool,

    /// Ticks to simulate in headless mode
    #[arg(long, default_value_t = 3000)]
    steps: u64,

    /// Write logs to this file (the viewer owns the terminal)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_tracing(log_file: Option<&PathBuf>, headless: bool) -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| e as Box<dyn Error>)?;
        }
        None if headless => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .try_init()
                .map_err(|e| e as Box<dyn Error>)?;
        }
        // Logging to the terminal would corrupt the viewer
        None => {}
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref(), cli.headless)?;

    let mut config = match &cli.config {
        Some(path) => NavigatorConfig::from_json_file(path)?,
        None => NavigatorConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    let mut nav = Navigator::new(config)?;

    if cli.headless {
        run_headless(&mut nav, cli.steps);
        return Ok(());
    }

    // Setup Terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut nav, Duration::from_millis(cli.tick_ms));

    // Restore Terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_headless(nav: &mut Navigator, steps: u64) {
    info!(steps, "starting headless run");
    nav.run(steps);

    let (x, y) = nav.position();
    info!(
        time = nav.elapsed(),
        mode = nav.mode().label(),
        x,
        y,
        sites = nav.sites().len(),
        strengths = ?nav.memory_strengths(),
        covered_cells = nav.coverage().map_or(0, |c| c.covered_cells()),
        "headless run finished"
    );
    if let Some(last) = nav.metrics().last() {
        info!(
            distance_to_nest = last.distance_to_nest,
            distance_to_latest_site = last.distance_to_latest_site,
            "final distances"
        );
    }
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    nav: &mut Navigator,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        // 1. Update
        if last_tick.elapsed() >= tick_rate {
            nav.step();
            last_tick = Instant::now();
        }

        // 2. Render
        terminal.draw(|f| {
            let area = f.area();
            let rows = area.height.saturating_sub(1) as usize; // -1 for HUD
            let cols = area.width.saturating_sub(36) as usize; // side panels

            let grid = compute_arena_grid(nav, rows, cols);
            let panels = NeuralPanels::from_navigator(nav);
            draw_ui(f, grid, &hud_line(nav), &panels);
        })?;

        // 3. Input
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.code == KeyCode::Char('q') {
                    return Ok(());
                }
            }
        }
    }
}
