use log::{info, warn};
use ratatui::widgets::TableState;

use crate::domain::email::{LabelMap, MessageId};
use crate::error::{ClientError, ProviderError};
use crate::mail::body::{ReadMode, fetch_body};
use crate::mail::compose::{PendingDraft, send_new, send_reply};
use crate::mail::sync::{Inbox, synchronize};
use crate::provider::MailProvider;
use crate::terminal::form::Form;
use crate::terminal::screen::Screen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

pub struct AppState {
    pub screen: Screen,

    pub inbox: Inbox,
    pub table_state: TableState,

    /// The message open for reading or replying.
    pub selected: Option<MessageId>,
    pub body: String,
    pub body_scroll: u16,

    pub form: Form,
    /// Draft created by a send that failed, reused if the form is resent as is.
    pub pending_draft: Option<PendingDraft>,
    /// Original message shown under the reply form.
    pub reply_preview: String,

    pub status: Option<Status>,
    pub should_quit: bool,

    labels: LabelMap,
    trash_label: String,
}

impl AppState {
    pub fn new(labels: LabelMap, trash_label: impl Into<String>) -> Self {
        Self {
            screen: Screen::List,
            inbox: Inbox::default(),
            table_state: TableState::default(),
            selected: None,
            body: String::new(),
            body_scroll: 0,
            form: Form::default(),
            pending_draft: None,
            reply_preview: String::new(),
            status: None,
            should_quit: false,
            labels,
            trash_label: trash_label.into(),
        }
    }

    pub fn set_info(&mut self, msg: impl Into<String>) {
        self.status = Some(Status::Info(msg.into()));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status = Some(Status::Error(msg.into()));
    }

    pub fn can_reply(&self) -> bool {
        self.screen == Screen::List && self.selected.is_some()
    }

    /// Re-fetch the inbox. On failure the previous rows stay on screen.
    pub fn refresh(&mut self, provider: &dyn MailProvider) -> bool {
        match synchronize(provider) {
            Ok(inbox) => {
                self.replace_inbox(inbox);
                true
            }
            Err(e) => {
                warn!("inbox refresh failed: {e}");
                self.set_error(format!("Refresh failed: {e}"));
                false
            }
        }
    }

    fn replace_inbox(&mut self, inbox: Inbox) {
        let cursor = self
            .selected
            .as_ref()
            .and_then(|id| inbox.position(id))
            .or(self.table_state.selected());
        self.inbox = inbox;
        let cursor = match cursor {
            _ if self.inbox.is_empty() => None,
            Some(i) => Some(i.min(self.inbox.len() - 1)),
            None => Some(0),
        };
        self.table_state.select(cursor);
    }

    pub fn move_selection(&mut self, delta: i32) {
        if self.inbox.is_empty() {
            self.table_state.select(None);
            return;
        }
        let cur = self.table_state.selected().unwrap_or(0) as i32;
        let len = self.inbox.len() as i32;
        let next = (cur + delta).clamp(0, len - 1) as usize;
        self.table_state.select(Some(next));
    }

    pub fn scroll_body(&mut self, delta: i32) {
        if delta < 0 {
            self.body_scroll = self.body_scroll.saturating_sub(delta.unsigned_abs() as u16);
        } else {
            self.body_scroll = self.body_scroll.saturating_add(delta as u16);
        }
    }

    pub fn open_highlighted(&mut self, provider: &dyn MailProvider) -> Result<(), ClientError> {
        match self.table_state.selected() {
            Some(index) if !self.inbox.is_empty() => self.open_row(provider, index),
            _ => Ok(()),
        }
    }

    /// Open row `index`: select its message, show the body, mark it read and
    /// resync the list. Provider failures are reported and followed by a
    /// resync; only an out-of-range index is returned as an error.
    pub fn open_row(
        &mut self,
        provider: &dyn MailProvider,
        index: usize,
    ) -> Result<(), ClientError> {
        let id = self.inbox.id_at(index)?.clone();
        self.selected = Some(id.clone());
        self.body_scroll = 0;

        match fetch_body(provider, &id, ReadMode::MarkRead) {
            Ok(body) => {
                self.body = body.text;
                self.status = None;
            }
            Err(e) => {
                warn!("could not open message {id}: {e}");
                self.body.clear();
                self.set_error(format!("Could not load message: {e}"));
            }
        }

        self.refresh(provider);
        Ok(())
    }

    /// Move the open message to the trash label. Failures are swallowed; the
    /// list is resynced exactly once either way.
    pub fn delete_selected(&mut self, provider: &dyn MailProvider) {
        match self.trash_selected(provider) {
            Ok(id) => {
                info!("moved message {id} to {}", self.trash_label);
                self.selected = None;
                self.body.clear();
                self.body_scroll = 0;
                self.set_info("Message moved to trash");
            }
            Err(e) => {
                warn!("delete failed: {e}");
                self.set_error(format!("Delete failed: {e}"));
            }
        }
        self.refresh(provider);
    }

    fn trash_selected(&self, provider: &dyn MailProvider) -> Result<MessageId, ClientError> {
        let id = self
            .selected
            .clone()
            .ok_or_else(|| ClientError::Validation("no message open".into()))?;
        let label_id = self
            .labels
            .id_for(&self.trash_label)
            .ok_or_else(|| ProviderError::MissingLabel(self.trash_label.clone()))?;
        provider.add_label(&id, label_id)?;
        Ok(id)
    }

    pub fn open_compose(&mut self) -> Result<(), ClientError> {
        self.screen = self.screen.open(Screen::Compose)?;
        self.form.clear();
        self.reply_preview.clear();
        self.status = None;
        Ok(())
    }

    /// Open the reply form for the selected message, prefilled from it.
    pub fn open_reply(&mut self, provider: &dyn MailProvider) -> Result<(), ClientError> {
        let Some(id) = self.selected.clone() else {
            return Err(ClientError::Precondition(
                "reply requested with no message selected".into(),
            ));
        };
        let next = self.screen.open(Screen::Reply)?;

        let body = match fetch_body(provider, &id, ReadMode::Peek) {
            Ok(b) => b,
            Err(e) => {
                warn!("could not load message {id} for reply: {e}");
                self.set_error(format!("Could not load message: {e}"));
                return Ok(());
            }
        };

        self.form.clear();
        self.form.fields.to = body
            .message
            .from
            .first()
            .map(|p| p.email.clone())
            .unwrap_or_default();
        self.form.fields.subject = format!("Re: {}", body.message.subject);
        self.reply_preview = body.text;
        self.status = None;
        self.screen = next;
        Ok(())
    }

    /// Send the current form. Validation and provider failures stay on the
    /// form with a message; only broken preconditions are returned.
    pub fn send(&mut self, provider: &dyn MailProvider) -> Result<(), ClientError> {
        let result = match self.screen {
            Screen::Compose => send_new(provider, &self.form.fields, &mut self.pending_draft),
            Screen::Reply => send_reply(
                provider,
                &self.form.fields,
                self.selected.as_ref(),
                &mut self.pending_draft,
            ),
            Screen::List => return Ok(()),
        };

        match result {
            Ok(()) => {
                if self.screen == Screen::Reply {
                    self.selected = None;
                    self.body.clear();
                }
                self.leave_form();
                self.set_info("Message sent");
            }
            Err(ClientError::Validation(msg)) => self.set_error(msg),
            Err(e) if e.is_precondition() => return Err(e),
            Err(e) => {
                warn!("send failed: {e}");
                self.set_error(format!("Send failed: {e}"));
            }
        }
        Ok(())
    }

    pub fn cancel(&mut self) {
        if self.screen.is_form() {
            self.leave_form();
            self.status = None;
        }
    }

    fn leave_form(&mut self) {
        if let Some(d) = self.pending_draft.take() {
            warn!("draft {} left unsent on the provider", d.handle.id);
        }
        self.form.clear();
        self.reply_preview.clear();
        self.screen = self.screen.back();
    }
}
