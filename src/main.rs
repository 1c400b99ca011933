//! Terminal front end and entry point.
//!
//! A thin line-oriented shell around the library: every input line is parsed
//! into a [`Command`], applied through [`handle_command`], and the returned
//! [`Action`]s are executed here. A separate painter task redraws the frame
//! whenever the controller's revision or the active view changes.
//!
//! ```text
//! stdin ──lines──▶ Command ──▶ handle_command ──▶ Actions ──▶ spawned loads
//!                                    │                              │
//!                                 ViewMode                      ChangeFeed
//!                                    └────────────▶ painter ◀───────┘
//! ```
//!
//! # Configuration
//!
//! 1. `--config <path>`, or `$XDG_CONFIG_HOME/character-finder/config.toml`
//!    when it exists, else defaults
//! 2. `CHARACTER_FINDER_<KEY>` environment variables override single keys,
//!    e.g. `CHARACTER_FINDER_DEBOUNCE_MS=300`
//!
//! The frame width comes from `COLUMNS` (default 80).

use character_finder::app::{handle_command, Action, Command, StateController, ViewMode};
use character_finder::infrastructure::config_file_from_env;
use character_finder::observability::init_tracing;
use character_finder::{initialize, ui, Config, FinderError, Result, Theme};
use std::collections::BTreeMap;
use std::io::{IsTerminal, Write};
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tracing::Instrument;

const USAGE: &str = "usage: character-finder [--config <path>]";
const ENV_PREFIX: &str = "CHARACTER_FINDER_";
const DEFAULT_COLS: usize = 80;
const CLEAR_SCREEN: &str = "\u{001b}[2J\u{001b}[H";

#[tokio::main]
async fn main() -> ExitCode {
    let config = match load_config() {
        Ok(Some(config)) => config,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("character-finder: {e}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = init_tracing(&config) {
        tracing::info!(trace_file = %path.display(), "character-finder starting");
    }

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "character-finder stopped");
            eprintln!("character-finder: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Builds the effective config. `Ok(None)` means `--help` was requested.
fn load_config() -> Result<Option<Config>> {
    let mut explicit = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| FinderError::Config("--config needs a path".to_string()))?;
                explicit = Some(path);
            }
            "--help" | "-h" => return Ok(None),
            other => return Err(FinderError::Config(format!("unknown argument {other:?}"))),
        }
    }

    let base = match explicit {
        Some(path) => Config::from_file(path)?,
        None => match config_file_from_env() {
            Some(path) if path.is_file() => Config::from_file(path)?,
            _ => Config::default(),
        },
    };

    Ok(Some(base.merged_with(&env_overrides())))
}

fn env_overrides() -> BTreeMap<String, String> {
    std::env::vars()
        .filter_map(|(key, value)| {
            key.strip_prefix(ENV_PREFIX)
                .map(|name| (name.to_ascii_lowercase(), value))
        })
        .collect()
}

fn terminal_cols() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&cols| cols > 0)
        .unwrap_or(DEFAULT_COLS)
}

async fn run(config: &Config) -> Result<()> {
    let controller = initialize(config)?;
    let theme = config.load_theme();

    let (view_tx, view_rx) = watch::channel(ViewMode::default());
    let (notice_tx, notice_rx) = mpsc::unbounded_channel();
    let painter = tokio::spawn(paint_frames(
        controller.clone(),
        view_rx,
        notice_rx,
        theme,
        terminal_cols(),
    ));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                tracing::debug!(error = %e, "rejected input");
                notice_tx.send(e.to_string()).ok();
                continue;
            }
        };

        let mut view = *view_tx.borrow();
        let (render, actions) = handle_command(&controller, &mut view, &command);
        if render {
            view_tx.send_replace(view);
        }
        if !execute(&controller, actions, &notice_tx) {
            break;
        }
    }

    drop(view_tx);
    drop(notice_tx);
    painter
        .await
        .map_err(|e| FinderError::Io(std::io::Error::other(e)))?;

    tracing::info!("character-finder exiting");
    Ok(())
}

/// Runs `actions` in order. Returns `false` once [`Action::Quit`] is seen.
fn execute(controller: &StateController, actions: Vec<Action>, notices: &mpsc::UnboundedSender<String>) -> bool {
    for action in actions {
        match action {
            Action::LoadFavorites => {
                let controller = controller.clone();
                let span = tracing::debug_span!("load_favorites");
                tokio::spawn(async move { controller.load_favorites().await }.instrument(span));
            }
            Action::LoadCharacter(id) => {
                let controller = controller.clone();
                let span = tracing::debug_span!("load_character", id = id);
                tokio::spawn(async move { controller.load_character(id).await }.instrument(span));
            }
            Action::Notify(text) => {
                notices.send(text).ok();
            }
            Action::Quit => return false,
        }
    }
    true
}

/// Redraws on every revision or view change and prints notices under the
/// current frame. Ends when the input loop drops the view sender.
async fn paint_frames(
    controller: StateController,
    mut view_rx: watch::Receiver<ViewMode>,
    mut notices: mpsc::UnboundedReceiver<String>,
    theme: Theme,
    cols: usize,
) {
    let mut revisions = controller.subscribe();
    let clear = std::io::stdout().is_terminal();

    let view = *view_rx.borrow_and_update();
    paint(&controller, &view, &theme, cols, clear);

    loop {
        tokio::select! {
            changed = revisions.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            changed = view_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            Some(text) = notices.recv() => {
                print_line(&text);
                continue;
            }
        }

        let view = *view_rx.borrow_and_update();
        paint(&controller, &view, &theme, cols, clear);
    }
}

fn paint(controller: &StateController, view: &ViewMode, theme: &Theme, cols: usize, clear: bool) {
    let frame = ui::render(&controller.snapshot(), view, theme, cols);
    let mut out = std::io::stdout().lock();
    let prefix = if clear { CLEAR_SCREEN } else { "" };
    let written = writeln!(out, "{prefix}{frame}").and_then(|()| out.flush());
    if let Err(e) = written {
        tracing::debug!(error = %e, "failed to write frame");
    }
}

fn print_line(text: &str) {
    let mut out = std::io::stdout().lock();
    if let Err(e) = writeln!(out, "{text}").and_then(|()| out.flush()) {
        tracing::debug!(error = %e, "failed to write notice");
    }
}
