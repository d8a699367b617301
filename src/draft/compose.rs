//! Draft composer.

use std::collections::BTreeMap;

use url::Url;

use super::response::{interpret, CreatedDraft};
use super::{DraftRequest, DraftResult};
use crate::error_handling::FoiError;
use crate::form::{extract_form, FormFields};
use crate::interface::{probe_page, InterfaceKind};
use crate::session::{Page, Session};

/// Creates a draft request through the best available interface.
///
/// Never fails: probing, parsing, transport and portal errors all end up in
/// `DraftResult::error`. `debug` adds the portal's answer to that text.
pub async fn create_draft(session: &Session, request: &DraftRequest, debug: bool) -> DraftResult {
    if request.title.trim().is_empty() || request.body_text.trim().is_empty() {
        return DraftResult::failed("Title and body are required");
    }

    let (kind, creation_page) = match probe_page(session, debug).await {
        Ok(found) => found,
        Err(e) => {
            log::warn!("No usable interface for a new draft");
            return DraftResult::failed(session.describe_error(&e));
        }
    };

    match submit(session, kind, &creation_page, request, debug).await {
        Ok(CreatedDraft { id, url }) => {
            log::info!("Created draft {} via {} interface", id, kind);
            DraftResult::created(kind, id, url.to_string())
        }
        Err(e) => {
            let message = session.describe_error(&e);
            log::warn!("Draft creation via {} interface failed: {}", kind, message);
            DraftResult::failed(message)
        }
    }
}

async fn submit(
    session: &Session,
    kind: InterfaceKind,
    creation_page: &Page,
    request: &DraftRequest,
    debug: bool,
) -> Result<CreatedDraft, FoiError> {
    let form = extract_form(&creation_page.body, kind)?;
    let target = submit_url(session, creation_page, &form)?;
    let fields = populate(&form, request);

    log::debug!("Submitting {} draft form to {}", kind, target);
    let response = session
        .post_form(&target, &creation_page.url, &fields)
        .await?;
    interpret(session, kind, response, debug).await
}

/// Form `action` resolved against the page it was read from.
fn submit_url(session: &Session, page: &Page, form: &FormFields) -> Result<Url, FoiError> {
    match page.url.join(&form.action) {
        Ok(url) => Ok(url),
        Err(e) => {
            log::debug!("Unusable form action '{}': {}", form.action, e);
            session.url(form.kind.profile().default_submit_path)
        }
    }
}

/// Hidden inputs, then the interface's fixed fields, then the request.
/// Later entries win on duplicate names.
fn populate(form: &FormFields, request: &DraftRequest) -> Vec<(String, String)> {
    let profile = form.kind.profile();
    let mut fields: BTreeMap<String, String> = form.hidden.clone();
    for (name, value) in profile.draft_fields {
        fields.insert((*name).to_string(), (*value).to_string());
    }
    fields.insert(
        form.public_body_field.clone(),
        request.public_body_id.trim().to_string(),
    );
    fields.insert(form.title_field.clone(), request.title.clone());
    fields.insert(form.body_field.clone(), request.body_text.clone());

    match &form.embargo_field {
        Some(name) => {
            let value = request.embargo.map(|e| e.form_value()).unwrap_or_default();
            fields.insert(name.clone(), value.to_string());
        }
        None if request.embargo.is_some() => {
            log::warn!("Embargo is only available on the premium interface; ignoring it");
        }
        None => {}
    }
    fields.into_iter().collect()
}
