use chrono::{Local, TimeZone};

use crate::domain::email::{DisplayRow, Message, MessageId, Participant};
use crate::error::ClientError;
use crate::provider::MailProvider;

/// Number of inbox messages shown.
pub const PAGE_SIZE: usize = 5;
pub const SUBJECT_MAX_CHARS: usize = 50;
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Result of one synchronization: rows and their message ids, in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inbox {
    pub rows: Vec<DisplayRow>,
    pub ids: Vec<MessageId>,
}

impl Inbox {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn id_at(&self, index: usize) -> Result<&MessageId, ClientError> {
        self.ids.get(index).ok_or_else(|| {
            ClientError::Precondition(format!(
                "row {index} out of range ({} rows)",
                self.ids.len()
            ))
        })
    }

    pub fn position(&self, id: &MessageId) -> Option<usize> {
        self.ids.iter().position(|x| x == id)
    }
}

/// Fetch the most recent inbox messages and project them into table rows.
///
/// Provider order is kept. The returned `Inbox` is complete; callers swap it
/// in whole.
pub fn synchronize(provider: &dyn MailProvider) -> Result<Inbox, ClientError> {
    let messages = provider.list_inbox_messages(PAGE_SIZE)?;
    Ok(build_inbox(&messages))
}

pub fn build_inbox(messages: &[Message]) -> Inbox {
    let mut inbox = Inbox {
        rows: Vec::with_capacity(messages.len()),
        ids: Vec::with_capacity(messages.len()),
    };
    for m in messages {
        inbox.rows.push(display_row(m));
        inbox.ids.push(m.id.clone());
    }
    inbox
}

pub fn display_row(m: &Message) -> DisplayRow {
    DisplayRow {
        date: format_date(m.date, &Local),
        subject: truncate_subject(&m.subject),
        from: sender_label(&m.from),
        unread: m.unread,
    }
}

pub fn format_date<Tz>(epoch_secs: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    tz.timestamp_opt(epoch_secs, 0)
        .earliest()
        .map(|dt| dt.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

pub fn truncate_subject(subject: &str) -> String {
    subject.chars().take(SUBJECT_MAX_CHARS).collect()
}

/// `"<name> / <address>"` of the first sender; empty when there is none.
pub fn sender_label(from: &[Participant]) -> String {
    from.first()
        .map(|p| format!("{} / {}", p.name, p.email))
        .unwrap_or_default()
}
