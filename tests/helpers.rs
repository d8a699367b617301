// Shared stub portal for integration tests.
//
// Mounts wiremock responses that imitate the pages of an Alaveteli portal:
// sign-in, both request-creation interfaces, draft pages and send actions.

#![allow(dead_code)] // Each test file uses a different subset

use std::sync::atomic::{AtomicUsize, Ordering};

use asktheeu_client::{login, Config, Credentials, Session};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const EMAIL: &str = "tester@example.org";
pub const PASSWORD: &str = "s3cr3t-pa55word";
/// Form-encoded spelling of `EMAIL` as it appears in a POST body.
pub const EMAIL_ENCODED: &str = "tester%40example.org";
pub const SESSION_COOKIE: &str = "_asktheeu_session=stub-session-1";

pub const PREMIUM_NEW: &str = "/en/alaveteli_pro/info_requests/new";
pub const PREMIUM_DRAFTS: &str = "/en/alaveteli_pro/draft_info_requests";
pub const STANDARD_NEW: &str = "/en/new";

pub const SIGN_IN_PAGE: &str = r#"<html><head><meta name="csrf-token" content="login-token"></head><body>
<form id="signin_form" action="/profile/sign_in" method="post">
  <input type="hidden" name="authenticity_token" value="login-token">
  <input type="hidden" id="signin_token" name="token" value="">
  <input type="email" name="user_signin[email]">
  <input type="password" name="user_signin[password]">
  <input type="submit" name="commit" value="Sign in">
</form></body></html>"#;

pub const SIGNED_IN_PAGE: &str = r#"<html><body>
<nav><a href="/en/profile/sign_out">Sign out</a></nav>
<h1>Your requests</h1></body></html>"#;

pub const PREMIUM_NEW_PAGE: &str = r#"<html><head><meta name="csrf-token" content="abc123"></head><body>
<form id="new_draft_info_request" class="new_info_request" action="/en/alaveteli_pro/draft_info_requests" method="post">
  <input type="hidden" name="utf8" value="✓">
  <input type="hidden" name="authenticity_token" value="abc123">
  <input type="hidden" name="info_request[public_body_id]" value="">
  <input type="text" name="info_request[title]">
  <textarea name="outgoing_message[body]"></textarea>
  <select name="embargo[embargo_duration]">
    <option value="">Publish immediately</option>
    <option value="3_months">3 months</option>
    <option value="6_months">6 months</option>
    <option value="12_months">12 months</option>
  </select>
</form></body></html>"#;

pub const STANDARD_NEW_PAGE: &str = r#"<html><body>
<form id="write_form" action="/en/new" method="post">
  <input type="hidden" name="authenticity_token" value="std-token">
  <input type="hidden" name="info_request[public_body_id]" value="">
  <input type="text" name="info_request[title]">
  <textarea name="outgoing_message[body]"></textarea>
</form></body></html>"#;

pub fn config_for(server: &MockServer) -> Config {
    Config {
        base_url: server.uri(),
        timeout_seconds: 5,
        user_agent: "asktheeu_client_test/1.0".to_string(),
        ..Config::new(Credentials::new(EMAIL, PASSWORD))
    }
}

pub fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(body)
}

pub fn redirect(location: &str) -> ResponseTemplate {
    ResponseTemplate::new(302).insert_header("location", location)
}

/// Sign-in page, a POST that accepts only `EMAIL`/`PASSWORD`, and the page
/// the portal lands on afterwards.
pub async fn mount_login(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/profile/sign_in"))
        .respond_with(html(SIGN_IN_PAGE))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/profile/sign_in"))
        .and(body_string_contains(EMAIL_ENCODED))
        .and(body_string_contains(PASSWORD))
        .and(body_string_contains("authenticity_token=login-token"))
        .respond_with(
            redirect("/en/user/tester")
                .insert_header("set-cookie", format!("{}; path=/; HttpOnly", SESSION_COOKIE)),
        )
        .mount(server)
        .await;

    // Anything else is a rejected login: the form is shown again
    Mock::given(method("POST"))
        .and(path("/profile/sign_in"))
        .respond_with(html(SIGN_IN_PAGE))
        .with_priority(10)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/en/user/tester"))
        .respond_with(html(SIGNED_IN_PAGE))
        .mount(server)
        .await;
}

pub async fn mount_premium_page(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(PREMIUM_NEW))
        .respond_with(html(PREMIUM_NEW_PAGE))
        .mount(server)
        .await;
}

pub async fn mount_standard_page(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(STANDARD_NEW))
        .respond_with(html(STANDARD_NEW_PAGE))
        .mount(server)
        .await;
}

/// Starts a stub portal with the login flow mounted and signs in.
pub async fn signed_in() -> (MockServer, Session) {
    let server = MockServer::start().await;
    mount_login(&server).await;
    let session = login(&config_for(&server), false)
        .await
        .expect("stub login should succeed");
    (server, session)
}

/// Answers every draft POST with a redirect to a new draft id.
pub struct NewDraftEachTime {
    next_id: AtomicUsize,
}

impl NewDraftEachTime {
    pub fn starting_at(id: usize) -> Self {
        Self {
            next_id: AtomicUsize::new(id),
        }
    }
}

impl Respond for NewDraftEachTime {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        redirect(&format!("/en/drafts/{}/edit", id))
    }
}
