//! Form extractor.
//!
//! Portal markup changes are expected to surface here, and only here, as a
//! [`FormParseError`](crate::error_handling::FormParseError).

mod extract;

pub use extract::{extract_form, FormFields, TOKEN_FIELD};
