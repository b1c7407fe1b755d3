use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub type MessageId = String;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Participant {
    /// Address-only participant; the provider fills in the display name.
    pub fn address(email: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
}

/// A message as returned by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Message {
    pub id: MessageId,
    #[serde(default)]
    pub date: i64,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub from: Vec<Participant>,
    #[serde(default)]
    pub unread: bool,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub labels: Vec<Label>,
}

/// One line of the inbox table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub date: String,
    pub subject: String,
    pub from: String,
    pub unread: bool,
}

/// Outgoing message assembled from the compose/reply form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftRequest {
    pub to: Vec<Participant>,
    pub subject: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<MessageId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DraftHandle {
    pub id: String,
    #[serde(default)]
    pub version: u64,
}

/// Label name to provider label id, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct LabelMap {
    by_name: HashMap<String, String>,
}

impl LabelMap {
    pub fn from_labels(labels: &[Label]) -> Self {
        let by_name = labels
            .iter()
            .filter(|l| !l.name.is_empty())
            .map(|l| (l.name.clone(), l.id.clone()))
            .collect();
        Self { by_name }
    }

    pub fn id_for(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Entries sorted by name.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut out: Vec<_> = self
            .by_name
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        out.sort_unstable();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_decodes_with_missing_fields() {
        let json = r#"{"id":"m1","subject":"Hi","from":[{"name":"Ann","email":"ann@x.com"}]}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, "m1");
        assert_eq!(msg.date, 0);
        assert!(!msg.unread);
        assert!(msg.body.is_empty());
        assert_eq!(msg.from[0].email, "ann@x.com");
    }

    #[test]
    fn draft_omits_absent_reply_target() {
        let draft = DraftRequest {
            to: vec![Participant::address("a@x.com")],
            subject: "s".into(),
            body: "b".into(),
            reply_to_message_id: None,
        };
        let v = serde_json::to_value(&draft).unwrap();
        assert!(v.get("reply_to_message_id").is_none());
        assert_eq!(v["to"][0]["name"], "");
        assert_eq!(v["to"][0]["email"], "a@x.com");
    }

    #[test]
    fn label_map_looks_up_by_name() {
        let labels = vec![
            Label {
                id: "L1".into(),
                name: "trash".into(),
                display_name: "Trash".into(),
            },
            Label {
                id: "L2".into(),
                name: String::new(),
                display_name: "Custom".into(),
            },
        ];
        let map = LabelMap::from_labels(&labels);
        assert_eq!(map.id_for("trash"), Some("L1"));
        assert_eq!(map.len(), 1);
        assert_eq!(map.id_for("inbox"), None);
    }
}
