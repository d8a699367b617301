//! asktheeu_client library: drafting and sending FOI requests on AskTheEU.org
//!
//! The crate drives the web interface of an Alaveteli portal the way a signed-in
//! user would: sign in, pick the request workflow the account can use
//! (Alaveteli Pro first, the public one as fallback), fill in the request
//! form, and send the resulting draft.
//!
//! # Example
//!
//! ```no_run
//! use asktheeu_client::{create_draft_request, login, send_request, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let session = login(&config, false).await?;
//!
//! let draft = create_draft_request(&session, "576", "Meeting minutes", "Dear Sir/Madam, ...", false).await;
//! if let (true, Some(id), Some(kind)) = (draft.success, &draft.draft_id, draft.interface_used) {
//!     let sent = send_request(&session, id, kind.is_pro()).await;
//!     println!("sent: {:?}", sent.request_url);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! The API is async and needs a Tokio runtime. Calls within a flow are made
//! one after another; nothing runs in parallel.

pub mod cli;
pub mod config;
pub mod directory;
pub mod draft;
pub mod error_handling;
pub mod form;
pub mod initialization;
pub mod interface;
pub mod listing;
pub mod send;
pub mod session;
mod utils;

// Re-export public API
pub use config::{Config, Credentials, LogFormat, LogLevel};
pub use directory::{PublicBody, PublicBodyDirectory};
pub use draft::{DraftRequest, DraftResult, EmbargoDuration};
pub use error_handling::{FoiError, FormParseError};
pub use form::{extract_form, FormFields};
pub use interface::{probe, InterfaceKind};
pub use listing::{list_requests, RequestPage, RequestSummary};
pub use send::SendResult;
pub use session::Session;

/// Signs in with the credentials in `config`.
///
/// `debug` makes later failure messages of this session quote the portal's
/// answers (credentials are always redacted).
///
/// # Errors
///
/// `FoiError::Auth` when the portal rejects the login or the landing page
/// does not look signed in; `FoiError::Network` on timeout.
pub async fn login(config: &Config, debug: bool) -> Result<Session, FoiError> {
    Session::login(config, debug).await
}

/// Creates a draft request addressed to public body `public_body_id`.
///
/// Never fails; inspect `DraftResult::success` and `DraftResult::error`.
pub async fn create_draft_request(
    session: &Session,
    public_body_id: &str,
    title: &str,
    body: &str,
    debug: bool,
) -> DraftResult {
    let request = DraftRequest::new(public_body_id, title, body);
    draft::create_draft(session, &request, debug || session.debug()).await
}

/// [`create_draft_request`] for a prepared [`DraftRequest`] (with embargo).
pub async fn create_draft_request_with(
    session: &Session,
    request: &DraftRequest,
    debug: bool,
) -> DraftResult {
    draft::create_draft(session, request, debug || session.debug()).await
}

/// Sends draft `draft_id`; `is_pro` selects the premium workflow and should
/// follow the draft's `interface_used`.
///
/// Never fails; inspect `SendResult::success` and `SendResult::error`.
pub async fn send_request(session: &Session, draft_id: &str, is_pro: bool) -> SendResult {
    send::send(
        session,
        draft_id,
        InterfaceKind::from_is_pro(is_pro),
        session.debug(),
    )
    .await
}
