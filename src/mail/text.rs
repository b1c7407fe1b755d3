use scraper::{Html, Node};
use unicode_width::UnicodeWidthStr;

/// Column width of the body pane.
pub const BODY_WIDTH: usize = 75;

// Elements whose text is never shown.
const HIDDEN_TAGS: &[&str] = &["style", "script"];

/// Turn a raw message body (HTML or plain text) into text wrapped at `BODY_WIDTH`.
pub fn extract_text(raw: &str) -> String {
    let text = if looks_like_html(raw) {
        html_to_text(raw)
    } else {
        raw.to_string()
    };
    wrap_words(&text, BODY_WIDTH)
}

pub fn looks_like_html(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.windows(2).any(|w| {
        w[0] == b'<' && (w[1].is_ascii_alphabetic() || w[1] == b'/' || w[1] == b'!')
    }) && s.contains('>')
}

/// Visible text nodes in document order, each trimmed, joined by single spaces.
fn html_to_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    doc.tree
        .root()
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) => {
                let hidden = node.ancestors().any(|a| {
                    a.value()
                        .as_element()
                        .is_some_and(|e| HIDDEN_TAGS.contains(&e.name()))
                });
                (!hidden).then(|| text.trim())
            }
            _ => None,
        })
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Greedy word wrap. Words are never split; a word wider than `width`
/// gets a line to itself.
pub fn wrap_words(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in text.split_whitespace() {
        let w = word.width();
        if !line.is_empty() && line_width + 1 + w > width {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }
        if !line.is_empty() {
            line.push(' ');
            line_width += 1;
        }
        line.push_str(word);
        line_width += w;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines.join("\n")
}
