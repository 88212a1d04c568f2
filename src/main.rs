//! bucket-flash - three-bucket adaptive flashcards in the terminal
//!
//! Cards start in Learning, climb through Reviewing to Mastered on "got it",
//! and fall back to Learning on "not yet". The session ends once every card
//! is mastered.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::{info, warn};

use bucket_flash::config::{Config, LoadedConfig};
use bucket_flash::content::{self, CardFilter, ContentFile, QuizResults};
use bucket_flash::logging;
use bucket_flash::ui::App;
use bucket_flash::Deck;

// ══════════════════════════════════════════════════════════════════════════
// CLI Arguments
// ══════════════════════════════════════════════════════════════════════════

#[derive(Parser, Debug)]
#[command(name = "flash")]
#[command(author, version, about = "Three-bucket adaptive flashcard TUI", long_about = None)]
struct Args {
    /// Content file to study (.json or .csv); defaults to the bundled Edo Japan deck
    #[arg(short, long)]
    deck: Option<PathBuf>,

    /// Quiz results file; study only the questions you missed
    #[arg(short, long)]
    review: Option<PathBuf>,

    /// Only study cards in this category
    #[arg(short, long)]
    category: Option<String>,

    /// Only study cards of this difficulty
    #[arg(long)]
    difficulty: Option<String>,

    /// Seed the shuffle and card selection
    #[arg(long)]
    seed: Option<u64>,

    /// List categories with card counts and exit
    #[arg(long)]
    categories: bool,

    /// Log filter (overrides the config file; RUST_LOG overrides both)
    #[arg(long)]
    log_level: Option<String>,
}

// ══════════════════════════════════════════════════════════════════════════
// Main Entry Point
// ══════════════════════════════════════════════════════════════════════════

fn main() -> Result<()> {
    let args = Args::parse();

    // Load config
    let LoadedConfig {
        config,
        save_path,
        error: config_error,
    } = Config::load_for_session(Config::default_path());
    let log_level = args.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    let _log_guard = logging::init_tracing(&log_level);

    if let Some(err) = config_error {
        warn!(error = %format!("{:#}", err), "using default config, changes will not be saved");
        eprintln!("Warning: {:#}; using defaults", err);
    }

    // Determine content source
    let file = match args.deck.as_ref().or(config.content.as_ref()) {
        Some(path) => ContentFile::load(path)?,
        None => ContentFile::bundled()?,
    };

    if args.categories {
        for (name, count) in content::categories(&file.cards) {
            println!("{:<24} {:>3} cards", name, count);
        }
        return Ok(());
    }

    let title = file.title().to_string();
    let filter = CardFilter {
        category: args.category,
        difficulty: args.difficulty,
    };
    let full_deck = Deck::new(filter.apply(file.cards))?;

    let review_deck = match args.review {
        Some(path) => {
            let deck = QuizResults::load(&path)?.review_deck()?;
            if deck.is_none() {
                println!("✓ No missed questions to review, studying all cards");
            }
            deck
        }
        None => None,
    };

    info!(
        title = %title,
        cards = full_deck.len(),
        review = review_deck.as_ref().map(Deck::len),
        "starting study session"
    );

    let app = App::new(config, save_path, title, full_deck, review_deck, args.seed);
    run_tui(app)
}

fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        warn!(%err, "exiting with error");
        eprintln!("Error: {}", err);
        return Err(err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| app.render(frame))?;
        app.handle_events()?;
    }
    Ok(())
}
