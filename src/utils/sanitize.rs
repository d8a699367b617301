//! Utilities for sanitizing diagnostic text.
//!
//! Every message that leaves the crate goes through [`Redactor::clean`]:
//! credentials are replaced, control characters removed, and the result
//! truncated to `MAX_ERROR_MESSAGE_LENGTH`.

use scraper::Html;

use crate::config::{Credentials, MAX_ERROR_MESSAGE_LENGTH};

const REDACTED: &str = "[REDACTED]";

/// Sanitizes an error message by removing control characters.
///
/// Newline, tab and carriage return are kept; other characters below 0x20
/// are dropped.
pub fn sanitize_error_message(message: &str) -> String {
    message
        .chars()
        .filter(|c| {
            let code = *c as u32;
            code >= 0x20 || code == 0x09 || code == 0x0A || code == 0x0D
        })
        .collect()
}

/// Sanitizes and truncates an error message to `MAX_ERROR_MESSAGE_LENGTH` characters.
pub fn sanitize_and_truncate_error_message(message: &str) -> String {
    let sanitized = sanitize_error_message(message);
    let length = sanitized.chars().count();

    if length > MAX_ERROR_MESSAGE_LENGTH {
        let keep = MAX_ERROR_MESSAGE_LENGTH.saturating_sub(50);
        let truncated: String = sanitized.chars().take(keep).collect();
        format!(
            "{}... (truncated, original length: {} chars)",
            truncated, length
        )
    } else {
        sanitized
    }
}

/// Truncates long text for display, appending `...` when cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        text.chars().take(max_chars).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

/// Visible text of an HTML page, whitespace-collapsed and cut to `max_chars`.
///
/// Used to quote the portal's answer in debug diagnostics. Markup, scripts
/// and styles are dropped so the excerpt shows what a user would read.
pub fn page_excerpt(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);
    let text = document
        .root_element()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let parent_is_code = node
                .parent()
                .and_then(|p| p.value().as_element())
                .map(|e| matches!(e.name(), "script" | "style" | "noscript"))
                .unwrap_or(false);
            (!parent_is_code).then(|| String::from(&**text))
        })
        .collect::<Vec<_>>()
        .join(" ");
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_text(&collapsed, max_chars)
}

/// Scrubs credential values out of diagnostic text.
///
/// Besides the literal values it also replaces their form-encoded and
/// HTML-escaped spellings, which is how a portal page would echo them back.
#[derive(Clone, Default)]
pub struct Redactor {
    secrets: Vec<String>,
}

impl Redactor {
    /// Redactor for the email and password of an account.
    pub fn for_credentials(credentials: &Credentials) -> Self {
        let mut secrets = Vec::new();
        for value in [&credentials.email, &credentials.password] {
            if value.is_empty() {
                continue;
            }
            secrets.push(value.clone());
            secrets.push(url::form_urlencoded::byte_serialize(value.as_bytes()).collect());
            secrets.push(html_escape(value));
            // Page text reaches excerpts with its whitespace collapsed
            let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
            if !collapsed.is_empty() {
                secrets.push(collapsed);
            }
        }
        // Longest first so a secret containing another is replaced whole
        secrets.sort_by_key(|s| std::cmp::Reverse(s.len()));
        secrets.dedup();
        Self { secrets }
    }

    /// Replaces every known secret in `text`.
    pub fn redact(&self, text: &str) -> String {
        let mut out = text.to_string();
        for secret in &self.secrets {
            if out.contains(secret.as_str()) {
                out = out.replace(secret.as_str(), REDACTED);
            }
        }
        out
    }

    /// Redacts, sanitizes and truncates a message for a result record.
    pub fn clean(&self, text: &str) -> String {
        sanitize_and_truncate_error_message(&self.redact(text))
    }
}

impl std::fmt::Debug for Redactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Redactor")
            .field("secrets", &self.secrets.len())
            .finish()
    }
}

fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
