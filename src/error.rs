//! Error type for typewriter operations.

use thiserror::Error;

/// Errors reported by typewriter construction and control operations.
///
/// Construction itself never fails loudly: an unresolved target produces an
/// inert instance and a diagnostic. These variants surface through the
/// `try_*` entry points and through [`Typewriter::update_texts`].
///
/// [`Typewriter::update_texts`]: crate::Typewriter::update_texts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypewriterError {
    /// The lookup key did not match any element
    #[error("element not found: {0}")]
    TargetNotFound(String),
    /// A text list with no entries was supplied
    #[error("text list must contain at least one entry")]
    EmptyTexts,
    /// The host surface could not be used
    #[error("surface error: {0}")]
    Surface(String),
    /// An options object or document could not be read
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}
