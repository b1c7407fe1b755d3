pub mod nylas;

#[cfg(test)]
pub mod fake;

use crate::domain::email::{DraftHandle, DraftRequest, Label, Message, MessageId};
use crate::error::ProviderError;

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Remote mail account operations. Every call blocks until the provider answers.
pub trait MailProvider {
    fn list_inbox_messages(&self, limit: usize) -> ProviderResult<Vec<Message>>;
    fn get_message(&self, id: &MessageId) -> ProviderResult<Message>;
    fn mark_read(&self, id: &MessageId) -> ProviderResult<()>;
    fn add_label(&self, id: &MessageId, label_id: &str) -> ProviderResult<()>;

    fn create_draft(&self, draft: &DraftRequest) -> ProviderResult<DraftHandle>;
    fn send_draft(&self, handle: &DraftHandle) -> ProviderResult<()>;

    fn list_labels(&self) -> ProviderResult<Vec<Label>>;
}
