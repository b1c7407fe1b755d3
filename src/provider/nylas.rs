use log::debug;
use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::config::Credentials;
use crate::domain::email::{DraftHandle, DraftRequest, Label, Message, MessageId};
use crate::error::ProviderError;
use crate::provider::{MailProvider, ProviderResult};

pub const DEFAULT_API_URL: &str = "https://api.nylas.com";

/// Blocking client for the Nylas v2 REST API.
pub struct NylasClient {
    http: Client,
    base: Url,
    access_token: String,
}

impl NylasClient {
    pub fn new(api_url: &str, creds: &Credentials) -> anyhow::Result<Self> {
        let base = Url::parse(api_url)
            .map_err(|e| anyhow::anyhow!("invalid api_url '{api_url}': {e}"))?;
        let http = Client::builder()
            .user_agent(concat!("term_mail/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base,
            access_token: creds.access_token.clone(),
        })
    }

    fn url(&self, segments: &[&str]) -> ProviderResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::Status {
                status: 0,
                message: format!("api url {} cannot be a base", self.base),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn send(&self, req: RequestBuilder) -> ProviderResult<Response> {
        let resp = req.bearer_auth(&self.access_token).send()?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp.text().unwrap_or_default();
        Err(ProviderError::Status {
            status: status.as_u16(),
            message: error_message(&message),
        })
    }

    fn json<T: DeserializeOwned>(&self, req: RequestBuilder) -> ProviderResult<T> {
        let text = self.send(req)?.text()?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Pull the `message` field out of a provider error body when there is one.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

/// Current label ids plus `label_id`, or `None` when it is already present.
fn merged_label_ids<'a>(current: &'a Message, label_id: &'a str) -> Option<Vec<&'a str>> {
    let mut ids: Vec<&str> = current.labels.iter().map(|l| l.id.as_str()).collect();
    if ids.contains(&label_id) {
        return None;
    }
    ids.push(label_id);
    Some(ids)
}

impl MailProvider for NylasClient {
    fn list_inbox_messages(&self, limit: usize) -> ProviderResult<Vec<Message>> {
        let url = self.url(&["messages"])?;
        debug!("GET {url} in=inbox limit={limit}");
        let limit = limit.to_string();
        self.json(
            self.http
                .get(url)
                .query(&[("in", "inbox"), ("limit", limit.as_str())]),
        )
    }

    fn get_message(&self, id: &MessageId) -> ProviderResult<Message> {
        let url = self.url(&["messages", id.as_str()])?;
        debug!("GET {url}");
        self.json(self.http.get(url))
    }

    fn mark_read(&self, id: &MessageId) -> ProviderResult<()> {
        let url = self.url(&["messages", id.as_str()])?;
        debug!("PUT {url} unread=false");
        self.send(self.http.put(url).json(&json!({ "unread": false })))?;
        Ok(())
    }

    fn add_label(&self, id: &MessageId, label_id: &str) -> ProviderResult<()> {
        // The API replaces the whole label set, so merge with the current one.
        let current = self.get_message(id)?;
        let Some(label_ids) = merged_label_ids(&current, label_id) else {
            debug!("message {id} already has label {label_id}");
            return Ok(());
        };

        let url = self.url(&["messages", id.as_str()])?;
        debug!("PUT {url} label_ids={label_ids:?}");
        self.send(self.http.put(url).json(&json!({ "label_ids": label_ids })))?;
        Ok(())
    }

    fn create_draft(&self, draft: &DraftRequest) -> ProviderResult<DraftHandle> {
        let url = self.url(&["drafts"])?;
        debug!("POST {url} to={} recipients", draft.to.len());
        self.json(self.http.post(url).json(draft))
    }

    fn send_draft(&self, handle: &DraftHandle) -> ProviderResult<()> {
        let url = self.url(&["send"])?;
        debug!("POST {url} draft_id={}", handle.id);
        self.send(self.http.post(url).json(&json!({
            "draft_id": handle.id,
            "version": handle.version,
        })))?;
        Ok(())
    }

    fn list_labels(&self) -> ProviderResult<Vec<Label>> {
        let url = self.url(&["labels"])?;
        debug!("GET {url}");
        self.json(self.http.get(url))
    }
}
