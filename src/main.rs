use std::fs::File;
use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};

use invaders::EngineConfig;
use invaders::app::App;
use invaders::audio::AudioManager;

/// Space invaders in the terminal.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Seed for enemy fire and pickup drops (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between simulation ticks
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,

    /// Where log output goes; the terminal is taken by the game
    #[arg(long, default_value = "invaders.log")]
    log_file: PathBuf,

    /// Disable sound
    #[arg(long)]
    mute: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let log_file = File::create(&args.log_file)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    info!("Keyboard enhancement supported: {supports_keyboard_enhancement}");

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Release events are needed for held keys; push after entering the alternate screen
    if supports_keyboard_enhancement {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(
        EngineConfig::default(),
        seed,
        Duration::from_millis(args.tick_ms),
        AudioManager::new(args.mute),
    );
    let result = app.run(&mut terminal);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    if supports_keyboard_enhancement {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    terminal.show_cursor()?;

    result
}
