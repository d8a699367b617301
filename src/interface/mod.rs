//! Request-creation interfaces of the portal.
//!
//! The portal offers two workflows for writing a request: the subscription
//! "pro" workflow and the public one. Everything that differs between them
//! (paths, form selectors, field names, how a draft id shows up in a URL)
//! lives in one [`InterfaceProfile`] per [`InterfaceKind`].

mod probe;

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

pub use probe::{probe, probe_page};

/// Which request workflow produced (or should handle) a draft.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InterfaceKind {
    Premium,
    Standard,
}

impl InterfaceKind {
    /// Probe order: premium is always tried first.
    pub const PREFERENCE: [InterfaceKind; 2] = [InterfaceKind::Premium, InterfaceKind::Standard];

    pub fn from_is_pro(is_pro: bool) -> Self {
        if is_pro {
            InterfaceKind::Premium
        } else {
            InterfaceKind::Standard
        }
    }

    pub fn is_pro(self) -> bool {
        self == InterfaceKind::Premium
    }

    pub fn profile(self) -> &'static InterfaceProfile {
        match self {
            InterfaceKind::Premium => &PREMIUM,
            InterfaceKind::Standard => &STANDARD,
        }
    }
}

/// Interface-specific constants.
#[derive(Debug)]
pub struct InterfaceProfile {
    pub kind: InterfaceKind,
    /// Request-creation page, also used to probe availability
    pub new_request_path: &'static str,
    /// Selectors for the creation form, most specific first
    pub form_selectors: &'static [&'static str],
    /// Where the form posts when it has no usable `action`
    pub default_submit_path: &'static str,
    pub title_field: &'static str,
    pub body_field: &'static str,
    pub public_body_field: &'static str,
    /// Embargo selector, premium only
    pub embargo_field: Option<&'static str>,
    /// Fixed fields that select the "create draft" behaviour of the form
    pub draft_fields: &'static [(&'static str, &'static str)],
    /// Draft page holding a fresh token for sending; `{id}` is replaced
    pub draft_page_template: &'static str,
    /// Send action; `{id}` is replaced
    pub send_template: &'static str,
    pub send_fields: &'static [(&'static str, &'static str)],
    /// Redirect targets that mean "this workflow is not open to you"
    pub paywall_markers: &'static [&'static str],
    draft_id_pattern: &'static str,
}

impl InterfaceProfile {
    pub fn draft_page_path(&self, draft_id: &str) -> String {
        self.draft_page_template.replace("{id}", draft_id)
    }

    pub fn send_path(&self, draft_id: &str) -> String {
        self.send_template.replace("{id}", draft_id)
    }

    /// Compiled draft-id pattern; group 1 is the numeric id.
    pub fn draft_id_regex(&self) -> &'static Regex {
        match self.kind {
            InterfaceKind::Premium => &PREMIUM_DRAFT_ID,
            InterfaceKind::Standard => &STANDARD_DRAFT_ID,
        }
    }

    /// Numeric draft id contained in a URL or href, if any.
    pub fn draft_id_in(&self, text: &str) -> Option<String> {
        self.draft_id_regex()
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn is_paywall_redirect(&self, target: &str) -> bool {
        self.paywall_markers.iter().any(|m| target.contains(m))
    }
}

static PREMIUM: InterfaceProfile = InterfaceProfile {
    kind: InterfaceKind::Premium,
    new_request_path: "/en/alaveteli_pro/info_requests/new",
    form_selectors: &[
        "form#new_draft_info_request",
        "form[action*='draft_info_requests']",
        "form.new_info_request",
    ],
    default_submit_path: "/en/alaveteli_pro/draft_info_requests",
    title_field: "info_request[title]",
    body_field: "outgoing_message[body]",
    public_body_field: "info_request[public_body_id]",
    embargo_field: Some("embargo[embargo_duration]"),
    draft_fields: &[("utf8", "✓"), ("preview", "true")],
    draft_page_template: "/en/alaveteli_pro/info_requests/{id}",
    send_template: "/en/alaveteli_pro/info_requests/{id}/send",
    send_fields: &[("utf8", "✓"), ("commit", "Send request")],
    paywall_markers: &["/pro", "plans", "upgrade", "sign_in"],
    draft_id_pattern: r"(?:/drafts/|/draft_info_requests/|/alaveteli_pro/info_requests/|[?&]draft_id=)(\d+)",
};

static STANDARD: InterfaceProfile = InterfaceProfile {
    kind: InterfaceKind::Standard,
    new_request_path: "/en/new",
    form_selectors: &["form#write_form", "form[action$='/new']"],
    default_submit_path: "/en/new",
    title_field: "info_request[title]",
    body_field: "outgoing_message[body]",
    public_body_field: "info_request[public_body_id]",
    embargo_field: None,
    draft_fields: &[("utf8", "✓"), ("submitted_new_request", "1"), ("preview", "0")],
    draft_page_template: "/en/request/{id}",
    send_template: "/en/request/{id}/send",
    send_fields: &[("utf8", "✓"), ("commit", "Send request")],
    paywall_markers: &[],
    draft_id_pattern: r"(?:/request/|/drafts/)(\d+)",
};

static PREMIUM_DRAFT_ID: LazyLock<Regex> = LazyLock::new(|| compile(PREMIUM.draft_id_pattern));
static STANDARD_DRAFT_ID: LazyLock<Regex> = LazyLock::new(|| compile(STANDARD.draft_id_pattern));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile draft id pattern '{}': {}. This is a programming error.",
            pattern, e
        )
    })
}
