use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;
use crossterm::event::{self, Event};
use rand::Rng;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::boot;
use crate::config::Config;
use crate::interpreter::{CommandResponse, InterpretOptions, Interpreter};
use crate::opener::{Opener, SystemOpener};
use crate::portfolio::Portfolio;
use crate::render::RenderState;
use crate::resume;
use crate::scheduler::{Scheduler, TokioScheduler};
use crate::store::{self, FileSessionStore, SessionStore};
use crate::tea::{self, update, Command, Message, Model, ModelOptions};
use crate::terminal::{Body, LineKind, ResumeState};
use crate::{flog, flog_debug, flog_error, flog_warn, Result};

const MAX_BG_MESSAGES: usize = 50;

/// Build the session model from config and the shell session's boot flag.
pub fn build_model(
    config: &Config,
    store: &dyn SessionStore,
    opener: Arc<dyn Opener>,
) -> Result<Model> {
    let portfolio = Arc::new(Portfolio::load(config.content_path().as_deref())?);

    let theme = match config.theme.as_deref() {
        Some(name) if portfolio.has_theme(name) => name.to_string(),
        Some(name) => {
            flog_warn!("Unknown theme '{}' in config, using default", name);
            "default".to_string()
        }
        None => "default".to_string(),
    };

    let fast_boot = !config.always_full_boot && store::has_booted(store);
    let boot_log = if fast_boot {
        Vec::new()
    } else {
        boot::full_log()?
    };
    flog_debug!(
        "build_model theme={} fast_boot={} seed={:?}",
        theme,
        fast_boot,
        config.seed
    );

    Ok(Model::new(
        Interpreter::new(portfolio, opener),
        ModelOptions {
            theme,
            seed: config.seed,
            fast_boot,
            boot_log,
        },
    ))
}

/// Everything a command may touch outside the model.
pub struct Effects<'a> {
    pub scheduler: &'a mut dyn Scheduler,
    pub store: &'a mut dyn SessionStore,
    pub msg_tx: &'a mpsc::UnboundedSender<Message>,
    pub export_dir: &'a Path,
}

/// Run `update` and execute the resulting commands. Returns true on quit.
pub fn dispatch(model: &mut Model, msg: Message, fx: &mut Effects<'_>) -> bool {
    let mut quit = false;
    for cmd in update(model, msg) {
        quit |= execute_command(model, cmd, fx);
    }
    quit
}

/// Execute one command. Must be called inside a tokio runtime.
pub fn execute_command(model: &Model, cmd: Command, fx: &mut Effects<'_>) -> bool {
    match cmd {
        Command::Schedule { timer, after } => fx.scheduler.schedule(timer, after),

        Command::Cancel(group) => fx.scheduler.cancel(group),

        Command::CancelAll => fx.scheduler.cancel_all(),

        Command::MarkBooted => {
            flog_debug!("Command::MarkBooted");
            if let Err(e) = store::mark_booted(fx.store) {
                flog_warn!("Failed to persist boot flag: {}", e);
            }
        }

        Command::LoadResume { id } => {
            flog_debug!("Command::LoadResume id={}", id);
            let portfolio = model.interpreter.portfolio().clone();
            let dir = fx.export_dir.to_path_buf();
            let tx = fx.msg_tx.clone();
            tokio::spawn(async move {
                let state = match resume::export(portfolio, dir).await {
                    Ok(path) => ResumeState::Ready(path),
                    Err(e) => {
                        flog_error!("Resume export failed: {}", e);
                        ResumeState::Failed(e.to_string())
                    }
                };
                let _ = tx.send(Message::ResumeLoaded(id, state));
            });
        }

        Command::Quit => {
            flog_debug!("Command::Quit");
            return true;
        }
    }

    false
}

/// Interpret one line outside the TUI. A résumé handle is exported
/// before returning so the caller always gets a settled response.
pub fn exec_line<R: Rng + ?Sized>(
    interpreter: &Interpreter,
    line: &str,
    rng: &mut R,
    export_dir: &Path,
) -> Result<CommandResponse> {
    let mut response = interpreter.interpret(line, InterpretOptions::default(), rng);
    if response.output != Some(Body::Resume(ResumeState::Loading)) {
        return Ok(response);
    }

    let portfolio = interpreter.portfolio().clone();
    let export = resume::export(portfolio, export_dir.to_path_buf());
    let state = match Runtime::new()?.block_on(export) {
        Ok(path) => ResumeState::Ready(path),
        Err(e) => {
            flog_error!("Resume export failed: {}", e);
            response.kind = Some(LineKind::Error);
            ResumeState::Failed(e.to_string())
        }
    };
    response.output = Some(Body::Resume(state));
    Ok(response)
}

pub struct LogicThread;

impl LogicThread {
    pub fn run(config: Config, state_tx: Sender<RenderState>, shutdown: Arc<AtomicBool>) -> Result<()> {
        Runtime::new()?.block_on(Self::run_async(config, state_tx, shutdown))
    }

    async fn run_async(
        config: Config,
        state_tx: Sender<RenderState>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<()> {
        let mut store = FileSessionStore::for_current_session()?;
        flog_debug!("Session store at {}", store.path().display());

        let mut model = build_model(&config, &store, Arc::new(SystemOpener))?;
        let export_dir = export_dir();

        let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<Message>();
        let mut scheduler = TokioScheduler::new(msg_tx.clone());
        let mut fx = Effects {
            scheduler: &mut scheduler,
            store: &mut store,
            msg_tx: &msg_tx,
            export_dir: &export_dir,
        };

        for cmd in tea::start(&mut model) {
            execute_command(&model, cmd, &mut fx);
        }
        send_state(&state_tx, &mut model);

        'outer: loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            // Keyboard input (priority)
            while event::poll(Duration::ZERO)? {
                let msg = match event::read()? {
                    Event::Key(key) => Message::Key(key),
                    Event::Resize(w, h) => Message::Resize(w, h),
                    _ => continue,
                };
                if dispatch(&mut model, msg, &mut fx) {
                    break 'outer;
                }
                send_state(&state_tx, &mut model);
            }

            // Timers and background completions (bounded)
            for _ in 0..MAX_BG_MESSAGES {
                let Ok(msg) = msg_rx.try_recv() else { break };
                if dispatch(&mut model, msg, &mut fx) {
                    break 'outer;
                }
            }

            send_state(&state_tx, &mut model);
            tokio::time::sleep(Duration::from_micros(500)).await;
        }

        flog!("Logic thread stopping");
        shutdown.store(true, Ordering::Relaxed);
        fx.scheduler.cancel_all();
        Ok(())
    }
}

pub fn export_dir() -> PathBuf {
    Config::export_dir().unwrap_or_else(|e| {
        flog_warn!("{}; exporting to the temp dir", e);
        std::env::temp_dir().join("folio-export")
    })
}

fn send_state(state_tx: &Sender<RenderState>, model: &mut Model) {
    if model.dirty {
        let _ = state_tx.try_send(model.snapshot());
        model.dirty = false;
    }
}
