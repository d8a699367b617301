// Form extractor tests.

use super::*;
use crate::error_handling::FormParseError;
use crate::interface::InterfaceKind;

const PREMIUM_PAGE: &str = r#"<html><head><meta name="csrf-token" content="meta-token"></head><body>
<form id="new_draft_info_request" class="new_info_request" action="/en/alaveteli_pro/draft_info_requests" method="post">
  <input type="hidden" name="utf8" value="✓">
  <input type="hidden" name="authenticity_token" value="abc123">
  <input type="hidden" name="draft_info_request[public_body_id]" value="">
  <input type="text" name="draft_info_request[title]">
  <textarea name="draft_info_request[body]"></textarea>
  <select name="draft_info_request[embargo_duration]">
    <option value="3_months">3 months</option>
  </select>
</form></body></html>"#;

const STANDARD_PAGE: &str = r#"<html><body>
<form id="write_form" action="/en/new" method="post">
  <input type="hidden" name="authenticity_token" value="std-token">
  <input type="hidden" name="submitted_new_request" value="1">
  <input type="text" name="info_request[title]">
  <textarea name="outgoing_message[body]"></textarea>
</form></body></html>"#;

#[test]
fn test_premium_form_hidden_fields() {
    let form = extract_form(PREMIUM_PAGE, InterfaceKind::Premium).unwrap();
    assert_eq!(form.kind, InterfaceKind::Premium);
    assert_eq!(form.action, "/en/alaveteli_pro/draft_info_requests");
    assert_eq!(form.hidden.len(), 3);
    assert_eq!(form.hidden["utf8"], "✓");
    assert_eq!(form.token(), "abc123");
    assert_eq!(form.hidden["draft_info_request[public_body_id]"], "");
}

#[test]
fn test_premium_field_names_matched_by_suffix() {
    let form = extract_form(PREMIUM_PAGE, InterfaceKind::Premium).unwrap();
    assert_eq!(form.title_field, "draft_info_request[title]");
    assert_eq!(form.body_field, "draft_info_request[body]");
    assert_eq!(form.public_body_field, "draft_info_request[public_body_id]");
    assert_eq!(
        form.embargo_field.as_deref(),
        Some("draft_info_request[embargo_duration]")
    );
}

#[test]
fn test_standard_form() {
    let form = extract_form(STANDARD_PAGE, InterfaceKind::Standard).unwrap();
    assert_eq!(form.token(), "std-token");
    assert_eq!(form.title_field, "info_request[title]");
    assert_eq!(form.body_field, "outgoing_message[body]");
    // Not in the markup, so the interface default is used
    assert_eq!(form.public_body_field, "info_request[public_body_id]");
    assert!(form.embargo_field.is_none());
}

#[test]
fn test_wrong_interface_finds_no_form() {
    assert_eq!(
        extract_form(STANDARD_PAGE, InterfaceKind::Premium),
        Err(FormParseError::FormNotFound)
    );
}

#[test]
fn test_missing_token_fails() {
    let html = PREMIUM_PAGE
        .replace(r#"<input type="hidden" name="authenticity_token" value="abc123">"#, "")
        .replace(r#"<meta name="csrf-token" content="meta-token">"#, "");
    assert_eq!(
        extract_form(&html, InterfaceKind::Premium),
        Err(FormParseError::MissingToken)
    );
}

#[test]
fn test_meta_token_fallback() {
    let html = PREMIUM_PAGE.replace(
        r#"<input type="hidden" name="authenticity_token" value="abc123">"#,
        "",
    );
    let form = extract_form(&html, InterfaceKind::Premium).unwrap();
    assert_eq!(form.token(), "meta-token");
}

#[test]
fn test_missing_body_field_fails() {
    let html = STANDARD_PAGE.replace(r#"<textarea name="outgoing_message[body]"></textarea>"#, "");
    assert_eq!(
        extract_form(&html, InterfaceKind::Standard),
        Err(FormParseError::MissingField { field: "body" })
    );
}

#[test]
fn test_missing_action_uses_default_path() {
    let html = r#"<form id="write_form"><input type="hidden" name="authenticity_token" value="t">
        <input name="info_request[title]"><textarea name="outgoing_message[body]"></textarea></form>"#;
    let form = extract_form(html, InterfaceKind::Standard).unwrap();
    assert_eq!(form.action, "/en/new");
}

#[test]
fn test_selector_fallback_by_action() {
    let html = r#"<form action="/en/alaveteli_pro/draft_info_requests/new" method="post">
        <input type="hidden" name="authenticity_token" value="t">
        <input name="info_request[title]"><textarea name="outgoing_message[body]"></textarea></form>"#;
    let form = extract_form(html, InterfaceKind::Premium).unwrap();
    assert_eq!(form.token(), "t");
}
