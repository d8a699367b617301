//! Draft input and result records.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::interface::InterfaceKind;

/// How long a premium request stays private after it is sent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
pub enum EmbargoDuration {
    #[strum(to_string = "3_months", serialize = "3")]
    #[serde(rename = "3_months")]
    ThreeMonths,
    #[strum(to_string = "6_months", serialize = "6")]
    #[serde(rename = "6_months")]
    SixMonths,
    #[strum(to_string = "12_months", serialize = "12")]
    #[serde(rename = "12_months")]
    TwelveMonths,
}

impl EmbargoDuration {
    /// Value of the portal's embargo selector.
    pub fn form_value(self) -> &'static str {
        match self {
            EmbargoDuration::ThreeMonths => "3_months",
            EmbargoDuration::SixMonths => "6_months",
            EmbargoDuration::TwelveMonths => "12_months",
        }
    }
}

/// A request to be saved as a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftRequest {
    /// Numeric portal id of the institution
    pub public_body_id: String,
    pub title: String,
    pub body_text: String,
    /// Premium only; ignored by the standard interface
    pub embargo: Option<EmbargoDuration>,
}

impl DraftRequest {
    pub fn new(
        public_body_id: impl Into<String>,
        title: impl Into<String>,
        body_text: impl Into<String>,
    ) -> Self {
        Self {
            public_body_id: public_body_id.into(),
            title: title.into(),
            body_text: body_text.into(),
            embargo: None,
        }
    }

    pub fn with_embargo(mut self, embargo: EmbargoDuration) -> Self {
        self.embargo = Some(embargo);
        self
    }
}

/// Outcome of one draft attempt.
///
/// A successful result always carries `draft_id` and `interface_used`; a
/// failed one never carries a `draft_id`. Only the constructors below build
/// it, which keeps that true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface_used: Option<InterfaceKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DraftResult {
    pub(crate) fn created(kind: InterfaceKind, draft_id: String, draft_url: String) -> Self {
        Self {
            success: true,
            draft_id: Some(draft_id),
            draft_url: Some(draft_url),
            interface_used: Some(kind),
            error: None,
        }
    }

    pub(crate) fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            draft_id: None,
            draft_url: None,
            interface_used: None,
            error: Some(error.into()),
        }
    }
}
