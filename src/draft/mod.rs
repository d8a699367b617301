//! Draft composer.
//!
//! Probes for an interface, fills in its creation form and reads the draft id
//! out of the portal's answer. The result record replaces errors for every
//! ordinary failure.

mod compose;
mod response;
mod types;

pub use compose::create_draft;
pub use types::{DraftRequest, DraftResult, EmbargoDuration};
