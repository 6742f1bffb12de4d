//! Error type for phyllo.
//!
//! ## Rust Lesson #20: Error Handling
//!
//! Rust uses `Result<T, E>` instead of exceptions. `thiserror` derives the
//! `Display` and `std::error::Error` impls from the `#[error(...)]` strings,
//! which saves writing the `match self { ... }` block by hand.

use thiserror::Error;

/// Errors raised at the edges of the library.
///
/// Point generation and scheduling cannot fail once [`crate::Params`] has
/// been validated; only parameter checking and document writing report
/// errors.
#[derive(Debug, Error)]
pub enum PhylloError {
    /// A parameter is outside the range the generator accepts.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    /// Writing the SVG document failed.
    #[error("SVG write error: {0}")]
    Svg(String),
}

impl PhylloError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        PhylloError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
