//! Interface prober.
//!
//! Premium is checked first and loses on any failure: a non-success status,
//! a redirect to an upgrade or sign-in page, or a transport error. Standard
//! is the fallback and must answer with a success status.

use super::InterfaceKind;
use crate::error_handling::FoiError;
use crate::session::{Page, Session};

/// Picks the request-creation interface available to `session`.
///
/// # Errors
///
/// Returns `FoiError::InterfaceUnavailable` when neither interface answers,
/// with the reason each check failed.
pub async fn probe(session: &Session) -> Result<InterfaceKind, FoiError> {
    probe_page(session, session.debug())
        .await
        .map(|(kind, _)| kind)
}

/// Like [`probe`], but also hands back the creation page that was fetched so
/// the caller can read its form without a second request. `debug` controls
/// the verbosity of the failure reasons.
pub async fn probe_page(
    session: &Session,
    debug: bool,
) -> Result<(InterfaceKind, Page), FoiError> {
    let mut reasons = Vec::with_capacity(InterfaceKind::PREFERENCE.len());
    for kind in InterfaceKind::PREFERENCE {
        match check(session, kind, debug).await {
            Ok(page) => {
                log::info!("Using {} interface", kind);
                return Ok((kind, page));
            }
            Err(reason) => {
                log::info!("{} interface unavailable: {}", kind, reason);
                reasons.push(reason);
            }
        }
    }
    let mut reasons = reasons.into_iter();
    Err(FoiError::InterfaceUnavailable {
        premium: reasons.next().unwrap_or_default(),
        standard: reasons.next().unwrap_or_default(),
    })
}

/// Fetches the creation page of one interface; `Err` holds the reason it is
/// unusable.
async fn check(session: &Session, kind: InterfaceKind, debug: bool) -> Result<Page, String> {
    let profile = kind.profile();
    let url = session
        .url(profile.new_request_path)
        .map_err(|e| session.describe_error(&e))?;
    log::debug!("Probing {} interface at {}", kind, url);

    let first = session
        .get(&url)
        .await
        .map_err(|e| session.describe_error(&e))?;

    if let Some(target) = first.location.as_ref().filter(|_| first.is_redirect()) {
        if profile.is_paywall_redirect(target.path()) {
            return Err(session.diagnostic_with(
                "Redirected to an upgrade or sign-in page",
                &first,
                debug,
            ));
        }
    }

    let page = session
        .follow_redirects(first)
        .await
        .map_err(|e| session.describe_error(&e))?;

    if !page.is_success() {
        return Err(session.diagnostic_with("Creation page not available", &page, debug));
    }
    if page.url.as_str() != url.as_str() && profile.is_paywall_redirect(page.url.path()) {
        return Err(session.diagnostic_with(
            "Landed on an upgrade or sign-in page",
            &page,
            debug,
        ));
    }
    Ok(page)
}
