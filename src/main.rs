mod app;
mod ui;

use app::App;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ember_exchange::{logging, Config};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::error;

/// Frame interval for the reveal animation
const TICK_RATE: Duration = Duration::from_millis(33);

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("ember {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Ember Exchange - open lootboxes, mint and trade stoves\n");
                println!("Usage: ember [--version | --help]\n");
                println!("Environment:");
                println!("  EMBER_DATA_DIR          Ledger and history directory");
                println!("  EMBER_PLAYER_ID         Player to act as (default 1)");
                println!("  EMBER_STARTING_BALANCE  Coins for new players (default 1000)");
                println!("  EMBER_LIST_PRICE        Price used by [L] (default 100)");
                println!("  EMBER_SEED              Fixed seed for draws");
                println!("  EMBER_LOG               Log level (default info)");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown command: {}", other);
                eprintln!("Run 'ember --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let config = Config::load();
    logging::init_file(&config.data_dir, config.log_level)?;
    config.log_warnings();

    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = app.save() {
        error!(error = %e, "Failed to save ledger");
        eprintln!("Failed to save ledger: {}", e);
    }

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::draw_ui(f, app))?;

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press {
                    match key_event.code {
                        KeyCode::Char(' ') | KeyCode::Enter => app.open_lootbox(),
                        KeyCode::Char('l') | KeyCode::Char('L') => app.list_newest(),
                        KeyCode::Char('c') | KeyCode::Char('C') => app.cancel_cheapest(),
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => break,
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.tick();
            last_tick = Instant::now();
        }

        app.autosave_if_due(Instant::now());
    }

    Ok(())
}
