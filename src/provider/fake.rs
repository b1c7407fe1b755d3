//! In-memory provider that records every call, for tests.

use std::cell::{Cell, RefCell};

use crate::domain::email::{DraftHandle, DraftRequest, Label, Message, MessageId, Participant};
use crate::error::ProviderError;
use crate::provider::{MailProvider, ProviderResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(usize),
    Get(MessageId),
    MarkRead(MessageId),
    AddLabel(MessageId, String),
    CreateDraft(DraftRequest),
    SendDraft(String),
    ListLabels,
}

#[derive(Default)]
pub struct FakeProvider {
    pub messages: RefCell<Vec<Message>>,
    pub labels: Vec<Label>,
    pub calls: RefCell<Vec<Call>>,

    pub fail_list: Cell<bool>,
    pub fail_get: Cell<bool>,
    pub fail_mark_read: Cell<bool>,
    pub fail_add_label: Cell<bool>,
    pub fail_send: Cell<bool>,
}

pub fn failure() -> ProviderError {
    ProviderError::Status {
        status: 503,
        message: "unavailable".into(),
    }
}

pub fn message(id: &str, subject: &str, unread: bool) -> Message {
    Message {
        id: id.into(),
        date: 1_700_000_000,
        subject: subject.into(),
        from: vec![Participant {
            name: "Ann".into(),
            email: "ann@example.com".into(),
        }],
        unread,
        body: format!("<p>Body of {subject}</p>"),
        labels: vec![],
    }
}

impl FakeProvider {
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            messages: RefCell::new(messages),
            labels: vec![Label {
                id: "label-trash".into(),
                name: "trash".into(),
                display_name: "Trash".into(),
            }],
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn list_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::List(_)))
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl MailProvider for FakeProvider {
    fn list_inbox_messages(&self, limit: usize) -> ProviderResult<Vec<Message>> {
        self.record(Call::List(limit));
        if self.fail_list.get() {
            return Err(failure());
        }
        Ok(self.messages.borrow().iter().take(limit).cloned().collect())
    }

    fn get_message(&self, id: &MessageId) -> ProviderResult<Message> {
        self.record(Call::Get(id.clone()));
        if self.fail_get.get() {
            return Err(failure());
        }
        self.messages
            .borrow()
            .iter()
            .find(|m| &m.id == id)
            .cloned()
            .ok_or(ProviderError::Status {
                status: 404,
                message: format!("no message {id}"),
            })
    }

    fn mark_read(&self, id: &MessageId) -> ProviderResult<()> {
        self.record(Call::MarkRead(id.clone()));
        if self.fail_mark_read.get() {
            return Err(failure());
        }
        if let Some(m) = self.messages.borrow_mut().iter_mut().find(|m| &m.id == id) {
            m.unread = false;
        }
        Ok(())
    }

    fn add_label(&self, id: &MessageId, label_id: &str) -> ProviderResult<()> {
        self.record(Call::AddLabel(id.clone(), label_id.to_string()));
        if self.fail_add_label.get() {
            return Err(failure());
        }
        // Trashed messages leave the inbox.
        self.messages.borrow_mut().retain(|m| &m.id != id);
        Ok(())
    }

    fn create_draft(&self, draft: &DraftRequest) -> ProviderResult<DraftHandle> {
        self.record(Call::CreateDraft(draft.clone()));
        Ok(DraftHandle {
            id: "draft-1".into(),
            version: 0,
        })
    }

    fn send_draft(&self, handle: &DraftHandle) -> ProviderResult<()> {
        self.record(Call::SendDraft(handle.id.clone()));
        if self.fail_send.get() {
            return Err(failure());
        }
        Ok(())
    }

    fn list_labels(&self) -> ProviderResult<Vec<Label>> {
        self.record(Call::ListLabels);
        Ok(self.labels.clone())
    }
}
