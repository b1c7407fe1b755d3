use crossterm::event::KeyEvent;

use crate::error::ClientError;
use crate::provider::MailProvider;
use crate::terminal::form::FormAction;
use crate::terminal::keys::{Action, action_for};
use crate::terminal::state::AppState;

const BODY_PAGE: i32 = 10;

/// Handle one key press to completion. Errors returned here are broken
/// preconditions; everything recoverable is already reflected in `state`.
pub fn handle_key(
    key: KeyEvent,
    state: &mut AppState,
    provider: &dyn MailProvider,
) -> Result<(), ClientError> {
    match action_for(state.screen, key) {
        Some(action) => dispatch(action, state, provider),
        None => Ok(()),
    }
}

pub fn dispatch(
    action: Action,
    state: &mut AppState,
    provider: &dyn MailProvider,
) -> Result<(), ClientError> {
    if state.screen.is_form() {
        return dispatch_form(action, state, provider);
    }

    match action {
        Action::Quit => state.should_quit = true,
        Action::Refresh => {
            if state.refresh(provider) {
                state.status = None;
            }
        }
        Action::Delete => state.delete_selected(provider),
        Action::Compose => state.open_compose()?,
        Action::Reply => {
            if state.can_reply() {
                state.open_reply(provider)?;
            } else {
                state.set_error("Open a message before replying");
            }
        }
        Action::Open => state.open_highlighted(provider)?,
        Action::Up => state.move_selection(-1),
        Action::Down => state.move_selection(1),
        Action::ScrollUp => state.scroll_body(-BODY_PAGE),
        Action::ScrollDown => state.scroll_body(BODY_PAGE),
        _ => {}
    }
    Ok(())
}

fn dispatch_form(
    action: Action,
    state: &mut AppState,
    provider: &dyn MailProvider,
) -> Result<(), ClientError> {
    match action {
        Action::Quit => state.should_quit = true,
        Action::Send => state.send(provider)?,
        Action::Cancel => state.cancel(),
        Action::NextField => state.form.focus_next(),
        Action::PrevField => state.form.focus_prev(),
        Action::Input(c) => state.form.input(c),
        Action::Backspace => state.form.backspace(),
        Action::Activate => match state.form.activate() {
            FormAction::Submit => state.send(provider)?,
            FormAction::Escape => state.cancel(),
            FormAction::None => {}
        },
        // List actions do nothing here.
        _ => {}
    }
    Ok(())
}
