//! A fetched portal page.

use std::sync::LazyLock;

use reqwest::StatusCode;
use scraper::{Html, Selector};
use url::Url;

use crate::utils::{page_excerpt, parse_selector_unsafe, Redactor};

static ERROR_ITEM_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    parse_selector_unsafe(
        "#errorExplanation li, .errorExplanation li, .form_error, .flash-error, .flash-message--error",
        "validation messages",
    )
});
static ERROR_BLOCK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    parse_selector_unsafe("#errorExplanation, .errorExplanation", "validation block")
});

/// Response to one portal request, with the body already read.
///
/// Redirects are not followed automatically, so a 3xx answer is kept as is
/// and its target is exposed through [`Page::location`].
#[derive(Debug, Clone)]
pub struct Page {
    /// URL that was requested
    pub url: Url,
    /// HTTP status of the response
    pub status: StatusCode,
    /// Redirect target resolved against `url`, for 3xx responses
    pub location: Option<Url>,
    /// Response body
    pub body: String,
}

impl Page {
    pub(crate) async fn from_response(
        url: Url,
        response: reqwest::Response,
    ) -> Result<Self, reqwest::Error> {
        let status = response.status();
        let location = if status.is_redirection() {
            response
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|loc| url.join(loc).ok())
        } else {
            None
        };
        if status.is_redirection() && location.is_none() {
            log::warn!(
                "Redirect status {} for {} but no usable Location header",
                status,
                url
            );
        }
        let body = response.text().await?;
        Ok(Self {
            url,
            status,
            location,
            body,
        })
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// True for a 3xx answer that names a target.
    pub fn is_redirect(&self) -> bool {
        self.status.is_redirection() && self.location.is_some()
    }

    /// Parses the body as an HTML document.
    pub fn document(&self) -> Html {
        Html::parse_document(&self.body)
    }

    /// Validation or flash error messages the portal rendered into the page.
    ///
    /// Empty when the page shows no recognisable error block.
    pub fn error_messages(&self) -> Vec<String> {
        let document = self.document();
        let mut messages: Vec<String> = Vec::new();
        for element in document.select(&ERROR_ITEM_SELECTOR) {
            let text = collapse(element.text());
            if !text.is_empty() && !messages.contains(&text) {
                messages.push(text);
            }
        }
        if messages.is_empty() {
            messages.extend(
                document
                    .select(&ERROR_BLOCK_SELECTOR)
                    .map(|e| collapse(e.text()))
                    .filter(|t| !t.is_empty())
                    .take(1),
            );
        }
        messages
    }

    /// Visible text of the body, cut to `max_chars`.
    ///
    /// Secrets are removed from the raw body before whitespace is collapsed
    /// and the text cut, so neither step can break a match.
    pub fn excerpt(&self, redactor: &Redactor, max_chars: usize) -> String {
        page_excerpt(&redactor.redact(&self.body), max_chars)
    }
}

fn collapse<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> Page {
        Page {
            url: Url::parse("https://www.asktheeu.org/en/new").unwrap(),
            status: StatusCode::OK,
            location: None,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_error_messages_from_list() {
        let p = page(
            r#"<div id="errorExplanation" class="errorExplanation"><ul>
            <li>Please enter a summary of your request</li>
            <li>Please   enter your letter</li></ul></div>"#,
        );
        assert_eq!(
            p.error_messages(),
            vec![
                "Please enter a summary of your request".to_string(),
                "Please enter your letter".to_string()
            ]
        );
    }

    #[test]
    fn test_error_messages_block_without_items() {
        let p = page(r#"<div id="errorExplanation"><p>Something went wrong</p></div>"#);
        assert_eq!(p.error_messages(), vec!["Something went wrong".to_string()]);
    }

    #[test]
    fn test_no_error_messages() {
        assert!(page("<h1>Your draft</h1>").error_messages().is_empty());
    }

    #[test]
    fn test_redirect_needs_location() {
        let mut p = page("");
        p.status = StatusCode::FOUND;
        assert!(!p.is_redirect());
        p.location = Some(Url::parse("https://www.asktheeu.org/en/request/1").unwrap());
        assert!(p.is_redirect());
    }
}
