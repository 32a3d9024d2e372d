use std::{
    io,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::{Context, Result, anyhow};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use tracing::{debug, info};

use super::keymap::{KeyAction, map_key};
use super::render::render;
use crate::app::AdminApp;
use crate::domains::nav::Route;

/// Path of a key script to replay instead of reading the terminal.
pub const SCRIPT_ENV: &str = "BYT_ADMIN_TUI_SCRIPT";

const IDLE_TICK: Duration = Duration::from_millis(50);

/// Source of key/input events so tests can drive the TUI without a real tty.
///
/// `next` is called with a zero timeout from the async loop and must not
/// block; the loop does the waiting.
pub trait EventSource {
    fn next(&mut self, timeout: Duration) -> Result<Option<Event>>;
    fn is_scripted(&self) -> bool {
        false
    }
}

#[derive(Debug)]
pub struct CrosstermEventSource;

impl EventSource for CrosstermEventSource {
    fn next(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }
}

/// Scripted event source driven by a line-oriented DSL:
///   enter|esc|tab|backtab|up|down|backspace|ctrl-<c>|type:<text>|<c>
/// Lines beginning with # are ignored. Blank lines are skipped.
/// Running out of events is an error so a bad script cannot hang.
#[derive(Debug)]
pub struct ScriptEventSource {
    events: Vec<Event>,
    cursor: usize,
    exhausted_at: Option<Instant>,
}

impl ScriptEventSource {
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).context("read scripted TUI input")?;
        Self::from_script(&contents)
    }

    pub fn from_script(script: &str) -> Result<Self> {
        let mut events = Vec::new();
        for (idx, raw) in script.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut push_key = |code: KeyCode, modifiers: KeyModifiers| {
                events.push(Event::Key(KeyEvent::new(code, modifiers)));
            };

            match line {
                "enter" => push_key(KeyCode::Enter, KeyModifiers::NONE),
                "esc" => push_key(KeyCode::Esc, KeyModifiers::NONE),
                "tab" => push_key(KeyCode::Tab, KeyModifiers::NONE),
                "backtab" => push_key(KeyCode::BackTab, KeyModifiers::SHIFT),
                "up" => push_key(KeyCode::Up, KeyModifiers::NONE),
                "down" => push_key(KeyCode::Down, KeyModifiers::NONE),
                "backspace" => push_key(KeyCode::Backspace, KeyModifiers::NONE),
                _ => {
                    if let Some(rest) = line.strip_prefix("type:") {
                        for ch in rest.chars() {
                            push_key(KeyCode::Char(ch), KeyModifiers::NONE);
                        }
                    } else if let Some(rest) = line.strip_prefix("ctrl-")
                        && let Some(ch) = single_char(rest)
                    {
                        push_key(KeyCode::Char(ch), KeyModifiers::CONTROL);
                    } else if let Some(ch) = single_char(line) {
                        push_key(KeyCode::Char(ch), KeyModifiers::NONE);
                    } else {
                        return Err(anyhow!(
                            "unrecognized TUI script token at line {}: {}",
                            idx + 1,
                            line
                        ));
                    }
                }
            }
        }

        Ok(Self {
            events,
            cursor: 0,
            exhausted_at: None,
        })
    }

    pub fn remaining(&self) -> usize {
        self.events.len() - self.cursor
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

impl EventSource for ScriptEventSource {
    fn next(&mut self, _timeout: Duration) -> Result<Option<Event>> {
        if self.cursor >= self.events.len() {
            match self.exhausted_at {
                Some(at) => {
                    if at.elapsed() > Duration::from_secs(1) {
                        return Err(anyhow!(
                            "scripted TUI input exhausted before the page was left"
                        ));
                    }
                }
                None => self.exhausted_at = Some(Instant::now()),
            }
            return Ok(None);
        }

        let ev = self.events[self.cursor].clone();
        self.cursor += 1;
        Ok(Some(ev))
    }

    fn is_scripted(&self) -> bool {
        true
    }
}

/// How the TUI session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiExit {
    Quit,
    /// The operator navigated away from the users page.
    Navigated(Route),
}

pub fn event_source_from_env() -> Result<Box<dyn EventSource>> {
    if let Ok(path) = std::env::var(SCRIPT_ENV) {
        info!("Replaying TUI script from {}", path);
        Ok(Box::new(ScriptEventSource::from_path(&PathBuf::from(path))?))
    } else {
        Ok(Box::new(CrosstermEventSource))
    }
}

/// Run the users page on the real terminal until the operator quits or
/// leaves the page.
pub async fn run_tui(app: &mut AdminApp) -> Result<TuiExit> {
    let mut source = event_source_from_env()?;
    let scripted = source.is_scripted();

    let mut stdout = io::stdout();
    if !scripted {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app, &mut *source).await;

    if !scripted {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    }
    result
}

pub async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AdminApp,
    source: &mut dyn EventSource,
) -> Result<TuiExit> {
    app.init().await;

    loop {
        terminal.draw(|f| render(f, app.state(), app.cart_items()))?;

        if !app.is_on_users_page() {
            return Ok(TuiExit::Navigated(app.state().route));
        }

        let Some(ev) = source.next(Duration::ZERO)? else {
            tokio::time::sleep(IDLE_TICK).await;
            continue;
        };
        let Event::Key(key) = ev else {
            // Resize and friends are redrawn on the next pass.
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match map_key(key, app.state()) {
            KeyAction::Quit => return Ok(TuiExit::Quit),
            KeyAction::Dispatch(message) => app.dispatch(message).await,
            KeyAction::Ignore => debug!("Ignored key {:?}", key.code),
        }
    }
}
