//! Request sender.
//!
//! Turns a saved draft into a sent request. The draft page is loaded first
//! for a fresh anti-forgery token; success is a redirect to the public
//! `/request/...` page.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::Serialize;
use url::Url;

use crate::error_handling::{FoiError, FormParseError};
use crate::form::TOKEN_FIELD;
use crate::interface::InterfaceKind;
use crate::session::{Page, Session};
use crate::utils::parse_selector_unsafe;

static SEND_FORM_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("form[action*='/send']", "send form"));
static HIDDEN_INPUT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("input[type='hidden'][name]", "hidden inputs"));
static TOKEN_INPUT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    parse_selector_unsafe("input[name='authenticity_token']", "authenticity token")
});
static CSRF_META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("meta[name='csrf-token']", "csrf meta tag"));

/// Path segment of a public request page.
const PUBLIC_REQUEST_SEGMENT: &str = "/request/";

/// Outcome of one send attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_url: Option<String>,
    /// Id or slug of the public request page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendResult {
    fn sent(url: &Url) -> Self {
        Self {
            success: true,
            request_url: Some(url.to_string()),
            request_id: request_id_from(url),
            error: None,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            request_url: None,
            request_id: None,
            error: Some(error.into()),
        }
    }
}

/// Sends draft `draft_id` through the workflow of `kind`.
///
/// Never fails; see `SendResult::error`. `debug` adds the portal's answer to
/// the error text.
pub async fn send(
    session: &Session,
    draft_id: &str,
    kind: InterfaceKind,
    debug: bool,
) -> SendResult {
    let draft_id = draft_id.trim();
    if draft_id.is_empty() {
        return SendResult::failed("Draft id is required");
    }

    match send_draft(session, draft_id, kind, debug).await {
        Ok(url) => {
            log::info!("Sent draft {} as {}", draft_id, url);
            SendResult::sent(&url)
        }
        Err(e) => {
            let message = session.describe_error(&e);
            log::warn!("Sending draft {} failed: {}", draft_id, message);
            SendResult::failed(message)
        }
    }
}

async fn send_draft(
    session: &Session,
    draft_id: &str,
    kind: InterfaceKind,
    debug: bool,
) -> Result<Url, FoiError> {
    let profile = kind.profile();
    let draft_url = session.url(&profile.draft_page_path(draft_id))?;
    let draft_page = session.follow_redirects(session.get(&draft_url).await?).await?;
    if !draft_page.is_success() {
        return Err(FoiError::Submission(session.diagnostic_with(
            "Draft page not available",
            &draft_page,
            debug,
        )));
    }

    let fields = send_fields(kind, &draft_page.document())?;
    let send_url = session.url(&profile.send_path(draft_id))?;
    log::debug!("Sending draft {} via {}", draft_id, send_url);
    let response = session
        .post_form(&send_url, &draft_page.url, &fields)
        .await?;

    if let Some(target) = response.location.as_ref().filter(|_| response.is_redirect()) {
        if target.path().contains(PUBLIC_REQUEST_SEGMENT) {
            return Ok(target.clone());
        }
        return Err(FoiError::Submission(session.diagnostic_with(
            "Send was not redirected to a public request page",
            &response,
            debug,
        )));
    }
    Err(FoiError::Submission(rejection(session, &response, debug)))
}

/// Hidden fields of the draft's send form, a fresh token, and the
/// interface's confirmation fields.
fn send_fields(kind: InterfaceKind, document: &Html) -> Result<Vec<(String, String)>, FoiError> {
    let mut fields: Vec<(String, String)> = document
        .select(&SEND_FORM_SELECTOR)
        .next()
        .map(|form| {
            form.select(&HIDDEN_INPUT_SELECTOR)
                .filter_map(|input| {
                    let name = input.value().attr("name")?;
                    let value = input.value().attr("value").unwrap_or_default();
                    Some((name.to_string(), value.to_string()))
                })
                .filter(|(name, _)| name != TOKEN_FIELD)
                .collect()
        })
        .unwrap_or_default();

    let token = document
        .select(&SEND_FORM_SELECTOR)
        .flat_map(|form| form.select(&TOKEN_INPUT_SELECTOR).collect::<Vec<_>>())
        .chain(document.select(&TOKEN_INPUT_SELECTOR))
        .filter_map(|e| e.value().attr("value"))
        .find(|v| !v.is_empty())
        .or_else(|| {
            document
                .select(&CSRF_META_SELECTOR)
                .filter_map(|e| e.value().attr("content"))
                .find(|v| !v.is_empty())
        })
        .ok_or(FormParseError::MissingToken)?;
    fields.push((TOKEN_FIELD.to_string(), token.to_string()));

    for (name, value) in kind.profile().send_fields {
        fields.retain(|(n, _)| n != name);
        fields.push(((*name).to_string(), (*value).to_string()));
    }
    Ok(fields)
}

fn rejection(session: &Session, page: &Page, debug: bool) -> String {
    let messages = page.error_messages();
    if messages.is_empty() {
        session.diagnostic_with("Failed to send request", page, debug)
    } else {
        let summary = format!("Portal rejected the send: {}", messages.join("; "));
        session.diagnostic_with(&summary, page, debug)
    }
}

/// Segment after `/request/` in a public request URL.
fn request_id_from(url: &Url) -> Option<String> {
    let path = url.path();
    let start = path.find(PUBLIC_REQUEST_SEGMENT)? + PUBLIC_REQUEST_SEGMENT.len();
    path[start..]
        .split('/')
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
