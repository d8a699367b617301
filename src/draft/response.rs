//! Interpretation of the portal's answer to a draft submission.
//!
//! The two interfaces answer differently: premium usually re-renders a
//! preview page (200) that links to the new draft, while standard redirects
//! to the request page. Both shapes end up as a draft id and URL here.

use std::sync::LazyLock;

use scraper::Selector;
use url::Url;

use crate::error_handling::FoiError;
use crate::interface::InterfaceKind;
use crate::session::{Page, Session, SIGN_IN_PATH};
use crate::utils::parse_selector_unsafe;

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("a[href], form[action]", "draft links"));
static DRAFT_ID_INPUT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("input[name='draft_id']", "draft id input"));

/// Page text shown once a draft exists.
const SUCCESS_TEXT_MARKERS: &[&str] = &[
    "draft has been saved",
    "Your draft",
    "Preview your request",
    "Send request",
];

/// A draft the portal acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CreatedDraft {
    pub id: String,
    pub url: Url,
}

/// Reads the draft id out of the answer to the draft POST.
///
/// Redirect answers are followed once their target does not already name a
/// draft; the landing page is then read like a direct 200 answer.
pub(crate) async fn interpret(
    session: &Session,
    kind: InterfaceKind,
    response: Page,
    debug: bool,
) -> Result<CreatedDraft, FoiError> {
    let profile = kind.profile();
    if let Some(target) = response.location.as_ref().filter(|_| response.is_redirect()) {
        if let Some(id) = profile.draft_id_in(target.as_str()) {
            return Ok(CreatedDraft {
                id,
                url: target.clone(),
            });
        }
        if target.path().ends_with(SIGN_IN_PATH) {
            return Err(FoiError::Submission(session.diagnostic_with(
                "Draft submission was sent back to the sign-in page",
                &response,
                debug,
            )));
        }
    }

    let landing = session.follow_redirects(response).await?;
    read_page(session, kind, &landing, debug)
}

/// Reads a non-redirect answer.
fn read_page(
    session: &Session,
    kind: InterfaceKind,
    page: &Page,
    debug: bool,
) -> Result<CreatedDraft, FoiError> {
    if !page.is_success() {
        return Err(FoiError::Submission(session.diagnostic_with(
            "Draft submission failed",
            page,
            debug,
        )));
    }

    let messages = page.error_messages();
    if !messages.is_empty() {
        let summary = format!("Portal rejected the draft: {}", messages.join("; "));
        return Err(FoiError::Submission(
            session.diagnostic_with(&summary, page, debug),
        ));
    }

    match draft_id_on_page(kind, page) {
        Some(id) => {
            let url = session.url(&kind.profile().draft_page_path(&id))?;
            Ok(CreatedDraft { id, url })
        }
        None => Err(FoiError::Submission(session.diagnostic_with(
            "Could not find a draft id in the response",
            page,
            debug,
        ))),
    }
}

/// Draft id from the page URL, a link or form on the page, or a `draft_id`
/// input. Links only count when the page also looks like a saved draft, so
/// a re-rendered creation form with unrelated links is not mistaken for one.
fn draft_id_on_page(kind: InterfaceKind, page: &Page) -> Option<String> {
    let profile = kind.profile();
    if let Some(id) = profile.draft_id_in(page.url.as_str()) {
        return Some(id);
    }

    let document = page.document();
    let from_input = document
        .select(&DRAFT_ID_INPUT_SELECTOR)
        .filter_map(|e| e.value().attr("value"))
        .map(str::trim)
        .find(|v| !v.is_empty() && v.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string);
    if from_input.is_some() {
        return from_input;
    }

    if !SUCCESS_TEXT_MARKERS.iter().any(|m| page.body.contains(m)) {
        return None;
    }
    document
        .select(&LINK_SELECTOR)
        .filter_map(|e| e.value().attr("href").or_else(|| e.value().attr("action")))
        .find_map(|link| profile.draft_id_in(link))
}
