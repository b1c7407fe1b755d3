pub mod events;
pub mod form;
pub mod keys;
pub mod screen;
pub mod state;
pub mod theme;
pub mod ui;

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyEventKind};
use log::{error, info};
use ratatui::DefaultTerminal;

use crate::domain::email::LabelMap;
use crate::error::ClientError;
use crate::provider::MailProvider;
use crate::terminal::state::AppState;

pub fn run_tui(provider: &dyn MailProvider, labels: LabelMap, trash_label: &str) -> Result<()> {
    color_eyre::install().map_err(|e| anyhow!("failed to install error hooks: {e}"))?;

    let mut state = AppState::new(labels, trash_label);
    state.refresh(provider);
    info!("inbox loaded with {} messages", state.inbox.len());

    let terminal = ratatui::init();
    let result = run(terminal, &mut state, provider);
    ratatui::restore();

    result
}

fn run(
    mut terminal: DefaultTerminal,
    state: &mut AppState,
    provider: &dyn MailProvider,
) -> Result<()> {
    while !state.should_quit {
        terminal.draw(|f| ui::render(f, state))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Err(e) = events::handle_key(key, state, provider) {
                report_defect(state, e);
            }
        }
    }
    Ok(())
}

/// Broken preconditions are bugs: fatal in debug builds, logged otherwise.
fn report_defect(state: &mut AppState, e: ClientError) {
    error!("{e}");
    if cfg!(debug_assertions) {
        ratatui::restore();
        panic!("{e}");
    }
    state.set_error(e.to_string());
}
