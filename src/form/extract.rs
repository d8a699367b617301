//! Request-creation form extraction.
//!
//! Finds the creation form of an interface, copies its hidden inputs and
//! names the visible fields the composer has to fill in.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::error_handling::FormParseError;
use crate::interface::InterfaceKind;
use crate::utils::{parse_selector_unsafe, parse_selectors};

/// Rails anti-forgery field.
pub const TOKEN_FIELD: &str = "authenticity_token";

static PREMIUM_FORM_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    parse_selectors(
        InterfaceKind::Premium.profile().form_selectors,
        "premium request form",
    )
});
static STANDARD_FORM_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    parse_selectors(
        InterfaceKind::Standard.profile().form_selectors,
        "standard request form",
    )
});
static HIDDEN_INPUT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("input[type='hidden'][name]", "hidden inputs"));
static NAMED_CONTROL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    parse_selector_unsafe(
        "input[name], textarea[name], select[name]",
        "form controls",
    )
});
static CSRF_META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("meta[name='csrf-token']", "csrf meta tag"));

/// What the composer needs to know about a creation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    pub kind: InterfaceKind,
    /// Raw `action` attribute, or the interface's default submit path
    pub action: String,
    /// Hidden inputs, verbatim; always contains `authenticity_token`
    pub hidden: BTreeMap<String, String>,
    pub title_field: String,
    pub body_field: String,
    pub public_body_field: String,
    pub embargo_field: Option<String>,
}

impl FormFields {
    /// Anti-forgery token echoed on submission.
    pub fn token(&self) -> &str {
        self.hidden.get(TOKEN_FIELD).map(String::as_str).unwrap_or_default()
    }
}

/// Extracts the creation form of `kind` from `html`.
///
/// Field names are taken from the markup when present: an exact match on
/// the interface's field name wins, otherwise any control whose name ends
/// in the same `[suffix]`. The public body and embargo fields fall back to
/// the interface defaults since the portal often injects them with script.
///
/// # Errors
///
/// - `FormNotFound` if no interface selector matches
/// - `MissingToken` if neither the form nor a `csrf-token` meta tag carries
///   an anti-forgery token
/// - `MissingField` if the title or body control cannot be identified
pub fn extract_form(html: &str, kind: InterfaceKind) -> Result<FormFields, FormParseError> {
    let document = Html::parse_document(html);
    let profile = kind.profile();
    let selectors: &[Selector] = match kind {
        InterfaceKind::Premium => PREMIUM_FORM_SELECTORS.as_slice(),
        InterfaceKind::Standard => STANDARD_FORM_SELECTORS.as_slice(),
    };

    let form = selectors
        .iter()
        .find_map(|s| document.select(s).next())
        .ok_or(FormParseError::FormNotFound)?;

    let mut hidden: BTreeMap<String, String> = form
        .select(&HIDDEN_INPUT_SELECTOR)
        .filter_map(|input| {
            let name = input.value().attr("name")?;
            let value = input.value().attr("value").unwrap_or_default();
            Some((name.to_string(), value.to_string()))
        })
        .collect();

    let has_token = hidden.get(TOKEN_FIELD).is_some_and(|v| !v.is_empty());
    if !has_token {
        let meta_token = document
            .select(&CSRF_META_SELECTOR)
            .filter_map(|e| e.value().attr("content"))
            .find(|v| !v.is_empty())
            .ok_or(FormParseError::MissingToken)?;
        log::debug!("Form has no token input, using csrf-token meta tag");
        hidden.insert(TOKEN_FIELD.to_string(), meta_token.to_string());
    }

    let names = control_names(form);
    let title_field = match_field(&names, profile.title_field)
        .ok_or(FormParseError::MissingField { field: "title" })?;
    let body_field = match_field(&names, profile.body_field)
        .ok_or(FormParseError::MissingField { field: "body" })?;
    let public_body_field = match_field(&names, profile.public_body_field)
        .unwrap_or_else(|| profile.public_body_field.to_string());
    let embargo_field = profile
        .embargo_field
        .map(|default| match_field(&names, default).unwrap_or_else(|| default.to_string()));

    let action = form
        .value()
        .attr("action")
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or(profile.default_submit_path)
        .to_string();

    Ok(FormFields {
        kind,
        action,
        hidden,
        title_field,
        body_field,
        public_body_field,
        embargo_field,
    })
}

fn control_names(form: ElementRef<'_>) -> Vec<&str> {
    form.select(&NAMED_CONTROL_SELECTOR)
        .filter_map(|e| e.value().attr("name"))
        .collect()
}

/// Exact name first, then any name ending in the same bracketed suffix.
fn match_field(names: &[&str], expected: &str) -> Option<String> {
    if names.contains(&expected) {
        return Some(expected.to_string());
    }
    let suffix = expected.rfind('[').map(|i| &expected[i..])?;
    names
        .iter()
        .find(|n| n.ends_with(suffix))
        .map(|n| n.to_string())
}
