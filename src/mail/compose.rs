use log::{info, warn};

use crate::domain::email::{DraftHandle, DraftRequest, MessageId, Participant};
use crate::error::ClientError;
use crate::provider::MailProvider;

pub const BODY_SEGMENTS: usize = 4;

/// Raw values of the compose/reply form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftFields {
    pub to: String,
    pub subject: String,
    pub body: [String; BODY_SEGMENTS],
}

impl DraftFields {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Split a `;`-separated address list. Blank entries are dropped; an empty
/// result is a validation error.
pub fn parse_recipients(raw: &str) -> Result<Vec<Participant>, ClientError> {
    let to: Vec<Participant> = raw
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Participant::address)
        .collect();
    if to.is_empty() {
        return Err(ClientError::Validation(
            "Enter at least one recipient address".into(),
        ));
    }
    Ok(to)
}

pub fn build_draft(
    fields: &DraftFields,
    reply_to: Option<MessageId>,
) -> Result<DraftRequest, ClientError> {
    Ok(DraftRequest {
        to: parse_recipients(&fields.to)?,
        subject: fields.subject.clone(),
        body: fields.body.join("\n"),
        reply_to_message_id: reply_to,
    })
}

/// A draft the provider accepted but did not send. Retrying the same request
/// sends this draft instead of creating another one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDraft {
    pub request: DraftRequest,
    pub handle: DraftHandle,
}

pub fn send_new(
    provider: &dyn MailProvider,
    fields: &DraftFields,
    pending: &mut Option<PendingDraft>,
) -> Result<(), ClientError> {
    let draft = build_draft(fields, None)?;
    submit(provider, draft, pending)
}

/// Reply to `selected`. Without a selected message nothing is sent.
pub fn send_reply(
    provider: &dyn MailProvider,
    fields: &DraftFields,
    selected: Option<&MessageId>,
    pending: &mut Option<PendingDraft>,
) -> Result<(), ClientError> {
    let Some(id) = selected else {
        return Err(ClientError::Precondition(
            "reply sent with no message selected".into(),
        ));
    };
    let draft = build_draft(fields, Some(id.clone()))?;
    submit(provider, draft, pending)
}

fn submit(
    provider: &dyn MailProvider,
    draft: DraftRequest,
    pending: &mut Option<PendingDraft>,
) -> Result<(), ClientError> {
    let handle = match pending.take() {
        Some(p) if p.request == draft => {
            info!("retrying unsent draft {}", p.handle.id);
            p.handle
        }
        stale => {
            if let Some(p) = stale {
                warn!("draft {} was edited and is left unsent on the provider", p.handle.id);
            }
            provider.create_draft(&draft)?
        }
    };

    if let Err(e) = provider.send_draft(&handle) {
        warn!("draft {} created but not sent: {e}", handle.id);
        *pending = Some(PendingDraft {
            request: draft,
            handle,
        });
        return Err(e.into());
    }

    info!(
        "sent message to {} recipient(s){}",
        draft.to.len(),
        if draft.reply_to_message_id.is_some() {
            " (reply)"
        } else {
            ""
        }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::fake::{Call, FakeProvider};

    fn fields(to: &str) -> DraftFields {
        DraftFields {
            to: to.into(),
            subject: "Subject".into(),
            body: [
                "one".into(),
                String::new(),
                "three".into(),
                String::new(),
            ],
        }
    }

    #[test]
    fn splits_two_recipients() {
        let to = parse_recipients("a@x.com;b@y.com").unwrap();
        assert_eq!(
            to,
            vec![Participant::address("a@x.com"), Participant::address("b@y.com")]
        );
        assert!(to.iter().all(|p| p.name.is_empty()));
    }

    #[test]
    fn trims_and_drops_blank_entries() {
        let to = parse_recipients(" a@x.com ; ;b@y.com; ").unwrap();
        assert_eq!(to.len(), 2);
        assert_eq!(to[0].email, "a@x.com");
        assert_eq!(to[1].email, "b@y.com");
    }

    #[test]
    fn empty_recipients_rejected_without_provider_call() {
        let p = FakeProvider::default();
        for raw in ["", "  ", ";;"] {
            let err = send_new(&p, &fields(raw), &mut None).unwrap_err();
            assert!(matches!(err, ClientError::Validation(_)));
        }
        assert!(p.calls().is_empty());
    }

    #[test]
    fn body_keeps_blank_segments_in_order() {
        let draft = build_draft(&fields("a@x.com"), None).unwrap();
        assert_eq!(draft.body, "one\n\nthree\n");
        assert_eq!(draft.subject, "Subject");
    }

    #[test]
    fn new_message_is_created_then_sent() {
        let p = FakeProvider::default();
        send_new(&p, &fields("a@x.com"), &mut None).unwrap();
        let calls = p.calls();
        assert_eq!(calls.len(), 2);
        let Call::CreateDraft(draft) = &calls[0] else {
            panic!("expected draft creation, got {:?}", calls[0]);
        };
        assert_eq!(draft.reply_to_message_id, None);
        assert_eq!(calls[1], Call::SendDraft("draft-1".into()));
    }

    #[test]
    fn reply_targets_selected_message() {
        let p = FakeProvider::default();
        let id = "m7".to_string();
        send_reply(&p, &fields("a@x.com"), Some(&id), &mut None).unwrap();
        let calls = p.calls();
        let Call::CreateDraft(draft) = &calls[0] else {
            panic!("expected draft creation");
        };
        assert_eq!(draft.reply_to_message_id.as_deref(), Some("m7"));
    }

    #[test]
    fn reply_without_selection_never_reaches_provider() {
        let p = FakeProvider::default();
        let err = send_reply(&p, &fields("a@x.com"), None, &mut None).unwrap_err();
        assert!(err.is_precondition());
        assert!(p.calls().is_empty());
    }

    #[test]
    fn send_failure_is_reported() {
        let p = FakeProvider::default();
        p.fail_send.set(true);
        let mut pending = None;
        let err = send_new(&p, &fields("a@x.com"), &mut pending).unwrap_err();
        assert!(matches!(err, ClientError::Provider(_)));
        assert_eq!(pending.map(|d| d.handle.id).as_deref(), Some("draft-1"));
    }

    #[test]
    fn retry_after_failed_send_reuses_draft() {
        let p = FakeProvider::default();
        p.fail_send.set(true);
        let mut pending = None;
        send_new(&p, &fields("a@x.com"), &mut pending).unwrap_err();

        p.fail_send.set(false);
        send_new(&p, &fields("a@x.com"), &mut pending).unwrap();
        assert!(pending.is_none());
        assert_eq!(p.count(|c| matches!(c, Call::CreateDraft(_))), 1);
        assert_eq!(p.count(|c| matches!(c, Call::SendDraft(_))), 2);
    }

    #[test]
    fn edited_form_creates_fresh_draft() {
        let p = FakeProvider::default();
        p.fail_send.set(true);
        let mut pending = None;
        send_new(&p, &fields("a@x.com"), &mut pending).unwrap_err();

        p.fail_send.set(false);
        send_new(&p, &fields("b@y.com"), &mut pending).unwrap();
        assert_eq!(p.count(|c| matches!(c, Call::CreateDraft(_))), 2);
    }
}
