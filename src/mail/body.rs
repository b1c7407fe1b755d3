use log::warn;

use crate::domain::email::{Message, MessageId};
use crate::error::ClientError;
use crate::mail::text::extract_text;
use crate::provider::MailProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Opening a message from the list: mark it read afterwards.
    MarkRead,
    /// Previewing an already-open message (reply screen): no side effects.
    Peek,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyText {
    pub message: Message,
    pub text: String,
    /// False when mark-read was requested and the provider refused it.
    pub marked_read: bool,
}

/// Fetch a message and extract its body as wrapped plain text.
///
/// A failing mark-read is logged and reported through `marked_read`; it never
/// fails the call.
pub fn fetch_body(
    provider: &dyn MailProvider,
    id: &MessageId,
    mode: ReadMode,
) -> Result<BodyText, ClientError> {
    let message = provider.get_message(id)?;
    let text = extract_text(&message.body);

    let marked_read = match mode {
        ReadMode::Peek => false,
        ReadMode::MarkRead => match provider.mark_read(id) {
            Ok(()) => true,
            Err(e) => {
                warn!("could not mark message {id} as read: {e}");
                false
            }
        },
    };

    Ok(BodyText {
        message,
        text,
        marked_read,
    })
}
