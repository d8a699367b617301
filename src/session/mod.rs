//! Session manager.
//!
//! A [`Session`] owns the HTTP client and its cookie jar. It is created by a
//! successful [`Session::login`] and lent (`&Session`) to every later step, so
//! all requests of a flow share the authenticated cookies.

mod page;
mod redirects;
mod request;

use std::sync::Arc;
use std::sync::LazyLock;

use reqwest::cookie::{CookieStore, Jar};
use scraper::{Html, Selector};
use url::Url;

use crate::config::{Config, MAX_EXCERPT_CHARS};
use crate::error_handling::{network_error, ConfigError, FoiError, InitializationError};
use crate::initialization::init_client;
use crate::utils::{parse_selector_unsafe, parse_selectors, Redactor};

pub use page::Page;
pub(crate) use request::PortalHeaders;

/// Sign-in page and form target.
pub const SIGN_IN_PATH: &str = "/profile/sign_in";

static SIGNIN_TOKEN_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("input#signin_token", "sign-in token"));
static AUTHENTICITY_TOKEN_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    parse_selector_unsafe("input[name='authenticity_token']", "authenticity token")
});
static CSRF_META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("meta[name='csrf-token']", "csrf meta tag"));
static LOGIN_PASSWORD_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    parse_selector_unsafe("input[name='user_signin[password]']", "sign-in form")
});
static SIGN_OUT_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    parse_selectors(
        &["a[href*='sign_out']", "a[href*='logout']", "a[href*='alaveteli_pro/dashboard']"],
        "sign-out link",
    )
});

/// Page text that only appears for a signed-in user.
const SIGNED_IN_TEXT_MARKERS: &[&str] = &["Sign out", "Your profile"];

/// Authenticated connection to the portal.
pub struct Session {
    client: reqwest::Client,
    jar: Arc<Jar>,
    base_url: Url,
    redactor: Redactor,
    debug: bool,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url.as_str())
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Signs in to the portal.
    ///
    /// 1. GET the sign-in page and pick up its anti-forgery token(s)
    /// 2. POST the credentials with the token(s)
    /// 3. Follow the redirect and check the landing page looks signed in
    ///
    /// With `debug` set, failure messages quote the portal's answer (with the
    /// credentials redacted). It does not change the flow.
    ///
    /// # Errors
    ///
    /// - `FoiError::Config` if the base URL is invalid
    /// - `FoiError::Auth` if the token is missing or the login is rejected
    /// - `FoiError::Network` on timeout or connection failure
    pub async fn login(config: &Config, debug: bool) -> Result<Self, FoiError> {
        let session = Self::new(config, debug)?;
        session.sign_in(config).await?;
        Ok(session)
    }

    fn new(config: &Config, debug: bool) -> Result<Self, FoiError> {
        config.validate().map_err(|e| ConfigError::Invalid {
            field: e.field,
            message: e.message,
        })?;
        let base_url = config.parsed_base_url()?;
        let jar = Arc::new(Jar::default());
        let client = init_client(config, Arc::clone(&jar)).map_err(InitializationError::from)?;
        Ok(Self {
            client,
            jar,
            base_url,
            redactor: Redactor::for_credentials(&config.credentials),
            debug,
        })
    }

    async fn sign_in(&self, config: &Config) -> Result<(), FoiError> {
        let sign_in_url = self.url(SIGN_IN_PATH)?;
        log::debug!("Fetching sign-in page: {}", sign_in_url);
        let page = self.get(&sign_in_url).await?;
        if !page.is_success() {
            return Err(FoiError::Auth(
                self.diagnostic("Sign-in page unavailable", &page),
            ));
        }

        let tokens = LoginTokens::from_document(&page.document());
        if tokens.is_empty() {
            return Err(FoiError::Auth(self.diagnostic(
                "Anti-forgery token not found on sign-in page",
                &page,
            )));
        }

        let fields = vec![
            ("utf8".to_string(), "✓".to_string()),
            (
                "authenticity_token".to_string(),
                tokens.authenticity.unwrap_or_default(),
            ),
            (
                "user_signin[email]".to_string(),
                config.credentials.email.clone(),
            ),
            (
                "user_signin[password]".to_string(),
                config.credentials.password.clone(),
            ),
            ("token".to_string(), tokens.signin.unwrap_or_default()),
            ("modal".to_string(), String::new()),
            ("commit".to_string(), "Sign in".to_string()),
        ];

        log::debug!("Submitting sign-in form to {}", sign_in_url);
        let response = self.post_form(&sign_in_url, &sign_in_url, &fields).await?;
        let redirected_away = response
            .location
            .as_ref()
            .is_some_and(|target| target.path() != sign_in_url.path());
        let landing = self.follow_redirects(response).await?;

        if !landing.is_success() {
            return Err(FoiError::Auth(
                self.diagnostic("Unexpected answer after sign-in", &landing),
            ));
        }

        let document = landing.document();
        if !is_signed_in(&document, &landing.body, redirected_away) {
            return Err(FoiError::Auth(
                self.diagnostic("Credentials rejected by the portal", &landing),
            ));
        }

        log::info!("Signed in to {}", self.base_url);
        Ok(())
    }

    /// Portal root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether diagnostics should quote response context.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Resolves a portal path against the base URL.
    pub fn url(&self, path: &str) -> Result<Url, FoiError> {
        self.base_url.join(path).map_err(|e| FoiError::Network {
            kind: crate::error_handling::NetworkErrorKind::Builder,
            url: path.to_string(),
            message: e.to_string(),
        })
    }

    /// `Cookie` header the session would send to `url`, if any.
    pub fn cookie_header(&self, url: &Url) -> Option<String> {
        self.jar
            .cookies(url)
            .and_then(|v| v.to_str().ok().map(str::to_string))
    }

    /// GETs a page through the session.
    pub async fn get(&self, url: &Url) -> Result<Page, FoiError> {
        let response = PortalHeaders::navigation(self.client.get(url.clone()))
            .send()
            .await
            .map_err(|e| network_error(url.as_str(), e))?;
        let page = Page::from_response(url.clone(), response)
            .await
            .map_err(|e| network_error(url.as_str(), e))?;
        log::debug!("GET {} -> {}", url, page.status);
        Ok(page)
    }

    /// POSTs url-encoded form fields through the session.
    pub async fn post_form(
        &self,
        url: &Url,
        referer: &Url,
        fields: &[(String, String)],
    ) -> Result<Page, FoiError> {
        let response = PortalHeaders::form_submission(self.client.post(url.clone()), referer)
            .form(fields)
            .send()
            .await
            .map_err(|e| network_error(url.as_str(), e))?;
        let page = Page::from_response(url.clone(), response)
            .await
            .map_err(|e| network_error(url.as_str(), e))?;
        log::debug!("POST {} -> {}", url, page.status);
        Ok(page)
    }

    /// Failure text for a page that did not have the expected outcome.
    ///
    /// Always names the status code. In debug mode it also quotes the
    /// redirect target and an excerpt of the page. The result is redacted.
    pub fn diagnostic(&self, summary: &str, page: &Page) -> String {
        self.diagnostic_with(summary, page, self.debug)
    }

    /// [`Session::diagnostic`] with the verbosity chosen by the caller.
    pub fn diagnostic_with(&self, summary: &str, page: &Page, debug: bool) -> String {
        let mut message = format!("{}. Status code: {}", summary, page.status.as_u16());
        if debug {
            message.push_str(&format!(". URL: {}", page.url));
            if let Some(location) = &page.location {
                message.push_str(&format!(". Redirected to: {}", location));
            }
            let excerpt = page.excerpt(&self.redactor, MAX_EXCERPT_CHARS);
            if !excerpt.is_empty() {
                message.push_str(&format!(". Page excerpt: {}", excerpt));
            }
        }
        self.redactor.clean(&message)
    }

    /// Redacted text for an error raised inside a flow.
    pub fn describe_error(&self, error: &FoiError) -> String {
        self.redactor.clean(&error.to_string())
    }
}

/// Tokens the sign-in form must echo back.
#[derive(Debug, Default, PartialEq, Eq)]
struct LoginTokens {
    authenticity: Option<String>,
    signin: Option<String>,
}

impl LoginTokens {
    fn from_document(document: &Html) -> Self {
        let signin = document
            .select(&SIGNIN_TOKEN_SELECTOR)
            .next()
            .map(|e| e.value().attr("value").unwrap_or_default().to_string());
        let authenticity = document
            .select(&AUTHENTICITY_TOKEN_SELECTOR)
            .filter_map(|e| e.value().attr("value"))
            .find(|v| !v.is_empty())
            .or_else(|| {
                document
                    .select(&CSRF_META_SELECTOR)
                    .filter_map(|e| e.value().attr("content"))
                    .find(|v| !v.is_empty())
            })
            .map(str::to_string);
        Self {
            authenticity,
            signin,
        }
    }

    fn is_empty(&self) -> bool {
        self.authenticity.is_none() && self.signin.is_none()
    }
}

/// Decides whether the page after login belongs to a signed-in user.
///
/// The sign-in form must be gone, and either a sign-out marker is present or
/// the POST redirected away from the sign-in page.
fn is_signed_in(document: &Html, body: &str, redirected_away: bool) -> bool {
    if document.select(&LOGIN_PASSWORD_SELECTOR).next().is_some() {
        return false;
    }
    let has_marker = SIGN_OUT_SELECTORS
        .iter()
        .any(|s| document.select(s).next().is_some())
        || SIGNED_IN_TEXT_MARKERS.iter().any(|m| body.contains(m));
    has_marker || redirected_away
}
