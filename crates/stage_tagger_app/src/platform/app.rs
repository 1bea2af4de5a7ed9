use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use stage_tagger_core::{update, AppState, Msg};
use stage_tagger_engine::EngineHandle;
use tagger_logging::{tagger_debug, tagger_info, tagger_warn};

use super::config::AppConfig;
use super::console::{self, Command};
use super::effects::EffectRunner;

/// How long the loop waits for input before checking the engine again.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    tagger_logging::initialize(
        config.logging.destination,
        config.log_level()?,
        &config.logging.file,
    );
    tagger_info!("Starting stage tagger");

    let engine =
        EngineHandle::new(config.suggest_settings()).context("starting suggestion engine")?;
    let mut session = Session::new(EffectRunner::new(engine));

    // Background reader so engine results keep flowing while stdin blocks.
    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    tagger_warn!("Failed to read stdin: {}", err);
                    break;
                }
            }
        }
    });

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Type `help` for commands.")?;
    session.render(&mut out)?;

    let mut input_open = true;
    loop {
        if input_open {
            match line_rx.recv_timeout(POLL_INTERVAL) {
                Ok(line) => {
                    if session.handle_line(&line, &mut out)? == Flow::Quit {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => input_open = false,
            }
        } else if session.has_pending_suggestions() {
            // Input is exhausted; let in-flight suggestions land before exiting.
            if let Some(msg) = session.runner.wait(POLL_INTERVAL) {
                session.dispatch(msg);
            }
        } else {
            break;
        }

        for msg in session.runner.poll() {
            session.dispatch(msg);
        }
        if session.state.consume_dirty() {
            session.render(&mut out)?;
        }
    }

    tagger_info!("Stage tagger exiting");
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Session {
    state: AppState,
    runner: EffectRunner,
    /// Row to mark as focused on the next render.
    pending_focus: Option<usize>,
}

impl Session {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
            pending_focus: None,
        }
    }

    fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        match console::parse_command(line, &self.state.view()) {
            Ok(None) => {}
            Ok(Some(Command::Dispatch(msg))) => self.dispatch(msg),
            Ok(Some(Command::Show)) => self.render(out)?,
            Ok(Some(Command::Help)) => writeln!(out, "{}", console::HELP)?,
            Ok(Some(Command::Quit)) => return Ok(Flow::Quit),
            Err(err) => writeln!(out, "error: {err}")?,
        }
        Ok(Flow::Continue)
    }

    fn dispatch(&mut self, msg: Msg) {
        tagger_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        if let Some(index) = self.runner.run(effects) {
            self.pending_focus = Some(index);
        }
    }

    fn has_pending_suggestions(&self) -> bool {
        self.state.entries().iter().any(|entry| entry.loading)
    }

    fn render(&mut self, out: &mut impl Write) -> io::Result<()> {
        let text = console::render(&self.state.view(), self.pending_focus.take());
        write!(out, "{text}")?;
        out.flush()
    }
}
