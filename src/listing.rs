//! Listing of the signed-in user's requests (premium dashboard).

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use url::Url;

use crate::error_handling::FoiError;
use crate::session::Session;
use crate::utils::parse_selector_unsafe;

/// Dashboard list of the user's requests.
pub const REQUEST_LIST_PATH: &str = "/en/alaveteli_pro/info_requests";

const UNKNOWN_STATUS: &str = "Unknown";

static REQUEST_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("div.request-list__request", "request list"));
static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("a.request-list__request__title", "request title"));
static STATUS_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    parse_selector_unsafe("span.request-list__request__status", "request status")
});
static TIME_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("time", "request date"));
static NEXT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("a[rel='next']", "next page link"));
static PREV_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("a[rel='prev']", "previous page link"));

/// One row of the request list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestSummary {
    /// Last path segment of the request link
    pub id: Option<String>,
    pub title: String,
    pub url: Option<String>,
    pub status: String,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: u32,
    pub next_page: Option<u32>,
    pub prev_page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestPage {
    pub requests: Vec<RequestSummary>,
    pub pagination: Pagination,
}

/// Fetches page `page` (1-based) of the user's requests.
///
/// # Errors
///
/// - `FoiError::UnexpectedStatus` when the list does not answer 200
/// - `FoiError::Network` on transport failure
pub async fn list_requests(session: &Session, page: u32) -> Result<RequestPage, FoiError> {
    let page = page.max(1);
    let mut url = session.url(REQUEST_LIST_PATH)?;
    url.query_pairs_mut().append_pair("page", &page.to_string());

    let response = session.get(&url).await?;
    if response.status != reqwest::StatusCode::OK {
        return Err(FoiError::UnexpectedStatus {
            url: url.to_string(),
            status: response.status.as_u16(),
        });
    }
    let listing = parse_request_list(&response.document(), &response.url, page);
    log::info!(
        "Listed {} requests on page {}",
        listing.requests.len(),
        page
    );
    Ok(listing)
}

/// Parses a request-list page fetched from `page_url`.
pub fn parse_request_list(document: &Html, page_url: &Url, page: u32) -> RequestPage {
    let requests = document
        .select(&REQUEST_SELECTOR)
        .filter_map(|item| summary(item, page_url))
        .collect();
    let has_next = document.select(&NEXT_SELECTOR).next().is_some();
    let has_prev = document.select(&PREV_SELECTOR).next().is_some();
    RequestPage {
        requests,
        pagination: Pagination {
            current_page: page,
            next_page: page.checked_add(1).filter(|_| has_next),
            prev_page: (has_prev && page > 1).then(|| page - 1),
        },
    }
}

fn summary(item: ElementRef<'_>, page_url: &Url) -> Option<RequestSummary> {
    let link = item.select(&TITLE_SELECTOR).next()?;
    let href = link.value().attr("href");
    let id = href
        .and_then(|h| h.split(['?', '#']).next())
        .and_then(|h| h.trim_end_matches('/').rsplit('/').next())
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    Some(RequestSummary {
        id,
        title: text_of(link),
        url: href
            .and_then(|h| page_url.join(h).ok())
            .map(|u| u.to_string()),
        status: item
            .select(&STATUS_SELECTOR)
            .next()
            .map(text_of)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
        date: item
            .select(&TIME_SELECTOR)
            .next()
            .map(text_of)
            .filter(|s| !s.is_empty()),
    })
}

fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_PAGE: &str = r#"<html><body>
      <div class="request-list">
        <div class="request-list__request">
          <a class="request-list__request__title" href="/en/alaveteli_pro/info_requests/minutes_2024">
            Minutes of the   board
          </a>
          <span class="request-list__request__status">Awaiting response</span>
          <time datetime="2025-01-02">2 January 2025</time>
        </div>
        <div class="request-list__request">
          <a class="request-list__request__title" href="/en/request/77/">Budget</a>
        </div>
        <div class="request-list__request"><p>No link</p></div>
      </div>
      <a rel="prev" href="?page=1">Previous</a>
      <a rel="next" href="?page=3">Next</a>
    </body></html>"#;

    fn base() -> Url {
        Url::parse("https://www.asktheeu.org/en/alaveteli_pro/info_requests?page=2").unwrap()
    }

    #[test]
    fn test_parse_request_list() {
        let listing = parse_request_list(&Html::parse_document(LIST_PAGE), &base(), 2);
        assert_eq!(listing.requests.len(), 2);

        let first = &listing.requests[0];
        assert_eq!(first.id.as_deref(), Some("minutes_2024"));
        assert_eq!(first.title, "Minutes of the board");
        assert_eq!(
            first.url.as_deref(),
            Some("https://www.asktheeu.org/en/alaveteli_pro/info_requests/minutes_2024")
        );
        assert_eq!(first.status, "Awaiting response");
        assert_eq!(first.date.as_deref(), Some("2 January 2025"));

        let second = &listing.requests[1];
        assert_eq!(second.id.as_deref(), Some("77"));
        assert_eq!(second.status, "Unknown");
        assert!(second.date.is_none());
    }

    #[test]
    fn test_pagination() {
        let listing = parse_request_list(&Html::parse_document(LIST_PAGE), &base(), 2);
        assert_eq!(
            listing.pagination,
            Pagination {
                current_page: 2,
                next_page: Some(3),
                prev_page: Some(1),
            }
        );
    }

    #[test]
    fn test_no_previous_page_on_first_page() {
        let listing = parse_request_list(&Html::parse_document(LIST_PAGE), &base(), 1);
        assert_eq!(listing.pagination.prev_page, None);
        assert_eq!(listing.pagination.next_page, Some(2));
    }

    #[test]
    fn test_empty_list() {
        let listing = parse_request_list(&Html::parse_document("<p>None yet</p>"), &base(), 1);
        assert!(listing.requests.is_empty());
        assert_eq!(listing.pagination.next_page, None);
    }

    #[test]
    fn test_last_possible_page_has_no_next() {
        let listing = parse_request_list(&Html::parse_document(LIST_PAGE), &base(), u32::MAX);
        assert_eq!(listing.pagination.next_page, None);
        assert_eq!(listing.pagination.prev_page, Some(u32::MAX - 1));
    }
}
