//! Manual redirect following.
//!
//! The client never follows redirects on its own. Login needs the page the
//! portal lands on after a successful POST, so the chain is walked here with
//! plain GETs through the session (and its cookie jar).

use super::{Page, Session};
use crate::config::MAX_REDIRECT_HOPS;
use crate::error_handling::FoiError;

impl Session {
    /// Follows `page`'s redirect chain up to `MAX_REDIRECT_HOPS` hops.
    ///
    /// Returns the first non-redirect page, or the last page fetched when the
    /// hop limit is reached.
    ///
    /// # Errors
    ///
    /// Returns `FoiError::Network` if one of the GETs fails.
    pub async fn follow_redirects(&self, page: Page) -> Result<Page, FoiError> {
        let mut current = page;
        let mut hops = 0;
        while let Some(target) = current.location.clone().filter(|_| current.is_redirect()) {
            if hops == MAX_REDIRECT_HOPS {
                log::warn!(
                    "Stopped following redirects after {} hops at {}",
                    MAX_REDIRECT_HOPS,
                    current.url
                );
                break;
            }
            log::debug!("Following redirect {} -> {}", current.url, target);
            current = self.get(&target).await?;
            hops += 1;
        }
        Ok(current)
    }
}
