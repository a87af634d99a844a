use std::io::{self, stdout, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use crossbeam_channel::{Receiver, TryRecvError};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};

use folio::app::{self, LogicThread};
use folio::config::Config;
use folio::interpreter::Interpreter;
use folio::matrix::MatrixRain;
use folio::opener::SystemOpener;
use folio::portfolio::Portfolio;
use folio::render::RenderState;
use folio::store::{FileSessionStore, SessionStore, HAS_BOOTED};
use folio::{flog, ui, Result};

const FRAME_DURATION: Duration = Duration::from_micros(16_666); // 60fps

/// folio - an interactive terminal portfolio
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version, about, long_about = None)]
#[command(
    after_help = "ENVIRONMENT:\n    FOLIO_DEBUG=1        Enable debug logging (alternative to --debug)\n    FOLIO_SESSION_ID=ID  Scope the boot-once flag to ID instead of the parent shell"
)]
pub struct Cli {
    /// Enable debug logging (writes to ~/.folio/folio.log)
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Initial theme (default, hacker, solarized, light, matrix)
    #[arg(long)]
    pub theme: Option<String>,

    /// Seed for fortunes and meltdown noise
    #[arg(long)]
    pub seed: Option<u64>,

    /// Play the full boot log even if this shell has booted before
    #[arg(long)]
    pub full_boot: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run one command without the TUI and print its output
    Exec {
        /// The command line, e.g. `project fers`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },

    /// Write a default config to ~/.folio/folio.toml
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Forget that this shell session has already booted
    ForgetBoot,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    folio::log::init(cli.debug);

    match cli.command {
        Some(Command::Exec { words }) => return run_exec(&words.join(" "), cli.seed),
        Some(Command::InitConfig { force }) => return run_init_config(force),
        Some(Command::ForgetBoot) => return run_forget_boot(),
        None => {}
    }

    if cli.debug {
        flog!("folio starting (debug mode enabled)");
    } else {
        flog!("folio starting");
    }

    let mut config = Config::load()?;
    if cli.theme.is_some() {
        config.theme = cli.theme;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.full_boot {
        config.always_full_boot = true;
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    let (state_tx, state_rx) = crossbeam_channel::bounded::<RenderState>(1);

    let shutdown_clone = shutdown.clone();
    let logic_handle =
        thread::spawn(move || LogicThread::run(config, state_tx, shutdown_clone));

    let mut terminal = setup_terminal()?;
    let result = render_loop(&mut terminal, state_rx, &shutdown);

    shutdown.store(true, Ordering::SeqCst);
    let logic_result = logic_handle.join();
    restore_terminal(&mut terminal)?;

    if let Ok(Err(e)) = logic_result {
        return Err(e);
    }
    result
}

/// Headless: interpret one line against the embedded or configured content.
fn run_exec(line: &str, seed: Option<u64>) -> Result<()> {
    let config = Config::load()?;
    let portfolio = Arc::new(Portfolio::load(config.content_path().as_deref())?);
    let interpreter = Interpreter::new(portfolio, Arc::new(SystemOpener));

    let mut rng = match seed.or(config.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let response = app::exec_line(&interpreter, line, &mut rng, &app::export_dir())?;
    flog!("exec {:?} -> {:?}", line, response.action);

    if let Some(output) = &response.output {
        if response.is_error() {
            eprintln!("{}", output.to_plain());
        } else {
            println!("{}", output.to_plain());
        }
    }
    if response.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

fn run_init_config(force: bool) -> Result<()> {
    let path = Config::config_path()?;
    if path.exists() && !force {
        println!("Config already exists at {}", path.display());
        println!("Use 'folio init-config --force' to overwrite it.");
        return Ok(());
    }
    let config = Config {
        theme: Some("default".to_string()),
        ..Config::default()
    };
    config.save_to(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn run_forget_boot() -> Result<()> {
    let mut store = FileSessionStore::for_current_session()?;
    store.remove(HAS_BOOTED)?;
    println!("Boot flag cleared ({})", store.path().display());
    Ok(())
}

fn render_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state_rx: Receiver<RenderState>,
    shutdown: &AtomicBool,
) -> Result<()> {
    let mut state = RenderState::default();
    let mut last_version: u64 = 0;
    let mut last_frame = Instant::now();
    let mut dirty = true;

    let size = terminal.size()?;
    let mut rain = MatrixRain::new(size.width, size.height, rand::random());

    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        match state_rx.try_recv() {
            Ok(s) => {
                dirty = dirty || s.version != last_version;
                state = s;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => break,
        }

        if last_frame.elapsed() < FRAME_DURATION {
            thread::sleep(Duration::from_micros(500));
            continue;
        }
        last_frame = Instant::now();

        if dirty || state.is_animated() {
            terminal.draw(|f| ui::draw(f, &state, &mut rain))?;
            last_version = state.version;
            dirty = false;
        }
    }
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal.show_cursor()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(disable_raw_mode()?)
}
