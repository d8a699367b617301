//! Browser-like request headers.
//!
//! The portal is a Rails application behind the usual bot filtering. Sending
//! the headers a browser sends on navigation keeps us on the same code path
//! as an interactive user, and Rails' forgery protection checks `Origin` on
//! form posts.

use reqwest::header::{self, HeaderName};
use url::Url;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";

pub(crate) struct PortalHeaders;

impl PortalHeaders {
    /// Headers for a top-level page navigation (GET).
    pub(crate) fn navigation(builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header(header::ACCEPT, ACCEPT_HTML)
            .header(header::ACCEPT_LANGUAGE, "en-GB,en-US;q=0.9,en;q=0.8")
            .header(header::CACHE_CONTROL, "no-cache")
            .header(header::PRAGMA, "no-cache")
            .header(HeaderName::from_static("sec-fetch-dest"), "document")
            .header(HeaderName::from_static("sec-fetch-mode"), "navigate")
            .header(HeaderName::from_static("sec-fetch-site"), "same-origin")
            .header(HeaderName::from_static("sec-fetch-user"), "?1")
            .header(header::UPGRADE_INSECURE_REQUESTS, "1")
    }

    /// Headers for submitting a form that was loaded from `referer`.
    pub(crate) fn form_submission(
        builder: reqwest::RequestBuilder,
        referer: &Url,
    ) -> reqwest::RequestBuilder {
        Self::navigation(builder)
            .header(header::ORIGIN, referer.origin().ascii_serialization())
            .header(header::REFERER, referer.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_submission_sets_origin_and_referer() {
        let referer = Url::parse("https://www.asktheeu.org/en/new?x=1").unwrap();
        let request = PortalHeaders::form_submission(
            reqwest::Client::new().post("https://www.asktheeu.org/en/new"),
            &referer,
        )
        .build()
        .unwrap();
        let headers = request.headers();
        assert_eq!(headers[header::ORIGIN], "https://www.asktheeu.org");
        assert_eq!(
            headers[header::REFERER],
            "https://www.asktheeu.org/en/new?x=1"
        );
        assert_eq!(headers["sec-fetch-mode"], "navigate");
    }
}
