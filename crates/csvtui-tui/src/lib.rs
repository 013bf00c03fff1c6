// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod keymap;
mod render;
mod theme;

pub use keymap::{KeyBinding, Keymap, KeymapError, default_keys};
pub use render::{legend_text, prompt_error, prompt_lines, status_text};
pub use theme::{Theme, ThemeError, TypeColors, default_color_hex, default_type_colors};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use csvtui_app::{Action, Effect, Session, Table, TerminalSize};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File operations the event loop needs. Implemented over the CSV store by
/// the binary and by an in-memory double in tests.
pub trait GridRuntime {
    fn source_label(&self) -> String;
    fn save_original(&mut self, table: &Table) -> Result<()>;
    /// Returns where the file actually landed.
    fn save_filtered(&mut self, name: &Path, table: &Table) -> Result<PathBuf>;
    fn write_backup(&mut self, table: &Table) -> Result<()>;
}

/// Outcome of carrying out one batch of effects.
#[derive(Debug, Default)]
pub struct EffectReport {
    pub quit: bool,
    pub failures: Vec<anyhow::Error>,
}

pub fn run_app<R: GridRuntime>(
    session: &mut Session,
    runtime: &mut R,
    keymap: &Keymap,
    theme: &Theme,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    let source_label = runtime.source_label();

    let mut result = Ok(());
    match terminal.size() {
        Ok(size) => {
            session.dispatch(Action::Resize(TerminalSize::new(size.width, size.height)));
        }
        Err(error) => tracing::warn!(%error, "could not read terminal size"),
    }

    let mut failures = Vec::new();
    loop {
        if let Err(error) = terminal.draw(|frame| {
            render::render(frame, session, keymap, theme, &source_label);
        }) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if !has_event {
            continue;
        }

        let report = match event::read().context("read event") {
            Ok(Event::Key(key)) => handle_key_event(session, runtime, keymap, key),
            Ok(Event::Resize(width, height)) => {
                let effects = session.dispatch(Action::Resize(TerminalSize::new(width, height)));
                apply_effects(session, runtime, effects)
            }
            Ok(_) => continue,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        failures.extend(report.failures);
        if report.quit {
            break;
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result?;
    match failures.into_iter().next() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

pub fn handle_key_event<R: GridRuntime>(
    session: &mut Session,
    runtime: &mut R,
    keymap: &Keymap,
    key: KeyEvent,
) -> EffectReport {
    if key.kind != KeyEventKind::Press {
        return EffectReport::default();
    }
    let Some(action) = keymap.resolve(session.mode().kind(), &key) else {
        return EffectReport::default();
    };
    let effects = session.dispatch(action);
    apply_effects(session, runtime, effects)
}

/// Carries out the effects that touch files. A failed save is recorded in the
/// report and does not stop a pending quit.
pub fn apply_effects<R: GridRuntime>(
    session: &mut Session,
    runtime: &mut R,
    effects: Vec<Effect>,
) -> EffectReport {
    let mut report = EffectReport::default();
    for effect in effects {
        match effect {
            Effect::ModeChanged(mode) => tracing::debug!(mode = mode.as_str(), "mode changed"),
            Effect::CursorMoved(cursor) => {
                tracing::trace!(row = cursor.row, col = cursor.col, "cursor moved");
            }
            Effect::CellEdited {
                row,
                col,
                persisted,
            } => {
                tracing::debug!(row, col, persisted, "cell edited");
                if persisted
                    && let Err(error) = runtime.write_backup(session.grid().master())
                {
                    tracing::warn!(error = %format!("{error:#}"), "backup failed");
                }
            }
            Effect::FilterApplied { query, rows } => {
                tracing::info!(%query, rows, "filter applied");
            }
            Effect::FiltersReset => tracing::info!("filters reset"),
            Effect::SearchCompleted { matches } => tracing::info!(matches, "search performed"),
            Effect::HelpToggled(visible) => tracing::debug!(visible, "help toggled"),
            Effect::SaveOriginal => match runtime.save_original(session.grid().master()) {
                Ok(()) => {
                    session.mark_saved();
                    tracing::info!(source = %runtime.source_label(), "saved changes");
                }
                Err(error) => {
                    tracing::error!(error = %format!("{error:#}"), "save failed");
                    report.failures.push(error);
                }
            },
            Effect::SaveFiltered(name) => {
                match runtime.save_filtered(&name, session.grid().active()) {
                    Ok(path) => tracing::info!(path = %path.display(), "saved filtered rows"),
                    Err(error) => {
                        tracing::error!(error = %format!("{error:#}"), "filtered save failed");
                        report.failures.push(error);
                    }
                }
            }
            Effect::Quit => report.quit = true,
        }
    }
    report
}
