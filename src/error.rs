//! Parser error types.

use thiserror::Error;

/// The parser exceeded its configured recursion depth.
///
/// This is the only condition that surfaces as a hard parse error; every
/// other kind of malformed input is absorbed by the driver and demoted to
/// plain text (see [`crate::wikitext`]).
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("recursion limit ({limit}) exceeded at byte offset {offset}")]
pub struct RecursionLimitError {
    /// The configured limit that was hit.
    pub limit: u32,
    /// The byte offset into the original input where the limit was hit.
    pub offset: usize,
}

/// A parse error.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("{kind}")]
pub struct Error {
    kind: RecursionLimitError,
    /// The unconsumed tail of the input, starting at the offending
    /// position.
    pub remainder: String,
}

impl Error {
    pub(crate) fn recursion_limit(limit: u32, offset: usize, remainder: &str) -> Self {
        Self {
            kind: RecursionLimitError { limit, offset },
            remainder: remainder.to_string(),
        }
    }

    /// The recursion limit details that caused this error.
    #[must_use]
    pub fn kind(&self) -> &RecursionLimitError {
        &self.kind
    }
}
