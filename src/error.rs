//! Error type for urlkit.
//!
//! Provides [`Error`] with two query methods matching the two ways this
//! crate can fail: [`is_invalid_url()`](Error::is_invalid_url) for anything
//! rejected while parsing or validating input, and
//! [`is_incomplete_url()`](Error::is_incomplete_url) for a value that cannot
//! be rendered in the requested form.

use std::fmt;

/// The error type for urlkit operations.
///
/// Errors carry a `kind` classification that powers the
/// `is_invalid_url()` / `is_incomplete_url()` query methods, plus a
/// `detail` string embedding the offending input for caller diagnostics.
///
/// All failures are synchronous and atomic: an operation that returns an
/// `Error` has not mutated the [`Url`](crate::Url) it was called on.
#[derive(Clone)]
pub struct Error {
    kind: ErrorKind,
    detail: String,
}

/// Classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorKind {
    /// The input is not a syntactically valid URL, authority, host, or port.
    InvalidUrl,
    /// The value is missing a component required for the requested output
    /// form (an absolute URL needs a host).
    IncompleteUrl,
}

impl Error {
    /// Returns `true` if this error was produced by parsing or validation:
    /// an unsplittable URL, a malformed authority, a host that fails
    /// validation, or an out-of-range port.
    pub fn is_invalid_url(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidUrl)
    }

    /// Returns `true` if this error was produced by
    /// [`Url::build_absolute`](crate::Url::build_absolute) on a value with
    /// no host set.
    pub fn is_incomplete_url(&self) -> bool {
        matches!(self.kind, ErrorKind::IncompleteUrl)
    }

    /// The human-readable failure detail, including the offending input.
    pub fn detail(&self) -> &str {
        &self.detail
    }

    // -- Internal constructors --

    /// Create an invalid-URL error.
    pub(crate) fn invalid_url(detail: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidUrl,
            detail: detail.into(),
        }
    }

    /// Create an incomplete-URL error.
    pub(crate) fn incomplete_url(detail: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::IncompleteUrl,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Error {
    /// A kind-based prefix, then the failure detail.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::InvalidUrl => f.write_str("invalid URL")?,
            ErrorKind::IncompleteUrl => f.write_str("incomplete URL")?,
        }
        if !self.detail.is_empty() {
            write!(f, ": {}", self.detail)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("detail", &self.detail)
            .finish()
    }
}

impl std::error::Error for Error {}

// Ensure Error is Send + Sync (required for use in multi-threaded callers).
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
};
