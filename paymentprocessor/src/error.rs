//! The payment-processor failure type.
//!
//! [`PaymentProcessorError`] signals that an operation against a payment
//! processor failed. It carries an optional human-readable message and an
//! optional underlying cause, and offers three construction forms:
//!
//! - [`PaymentProcessorError::new`] - message only
//! - [`PaymentProcessorError::from_cause`] - cause only
//! - [`PaymentProcessorError::with_cause`] - message and cause
//!
//! The value is immutable once built. Its [`Display`](fmt::Display) output is
//! the *effective message*: the explicit message when one was given, otherwise
//! the cause's own `Display` text. The cause itself is reachable through
//! [`std::error::Error::source`] for diagnostic chaining.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use crate::chain::{Chain, ChainedError, Report};
use crate::record::ErrorRecord;

/// A boxed error that can cross thread and task boundaries.
///
/// This is the type of the cause slot in [`PaymentProcessorError`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result alias for payment-processor operations.
pub type Result<T, E = PaymentProcessorError> = std::result::Result<T, E>;

/// A payment-processor operation failed.
///
/// Every constructor takes at least a message or a cause, so a value built
/// through the public API always has something to describe it.
///
/// # Example
///
/// ```rust
/// use paymentprocessor::PaymentProcessorError;
///
/// let err = PaymentProcessorError::new("insufficient funds");
/// assert_eq!(err.to_string(), "insufficient funds");
/// assert!(err.cause().is_none());
/// ```
#[derive(Debug)]
pub struct PaymentProcessorError {
    /// Explicit human-readable description.
    message: Option<String>,
    /// The failure that triggered this one.
    cause: Option<BoxError>,
}

impl PaymentProcessorError {
    /// Creates an error from a message only.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            cause: None,
        }
    }

    /// Creates an error that wraps an underlying cause.
    ///
    /// The effective message is the cause's own `Display` text. An already
    /// boxed [`BoxError`] is stored as-is, without boxing it again.
    #[must_use]
    pub fn from_cause(cause: impl Into<BoxError>) -> Self {
        Self {
            message: None,
            cause: Some(cause.into()),
        }
    }

    /// Creates an error with an explicit message and an underlying cause.
    #[must_use]
    pub fn with_cause(message: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        Self {
            message: Some(message.into()),
            cause: Some(cause.into()),
        }
    }

    /// Returns the explicit message, if one was given at construction.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the message to show for this error.
    ///
    /// This is the explicit message when present. For a cause-only error it
    /// falls back to the cause's `Display` output, so no information is lost
    /// when the error is described.
    #[must_use]
    pub fn effective_message(&self) -> Cow<'_, str> {
        match (&self.message, &self.cause) {
            (Some(message), _) => Cow::Borrowed(message),
            (None, Some(cause)) => Cow::Owned(cause.to_string()),
            (None, None) => Cow::Borrowed(""),
        }
    }

    /// Returns the wrapped cause exactly as it was given.
    ///
    /// Call `downcast_ref` on the result to get back the concrete error type.
    #[must_use]
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Returns `true` if this error wraps an underlying cause.
    #[must_use]
    pub const fn has_cause(&self) -> bool {
        self.cause.is_some()
    }

    /// Consumes the error and returns the original boxed cause.
    #[must_use]
    pub fn into_cause(self) -> Option<BoxError> {
        self.cause
    }

    /// Consumes the error and returns its message and cause.
    #[must_use]
    pub fn into_parts(self) -> (Option<String>, Option<BoxError>) {
        (self.message, self.cause)
    }

    /// Iterates over this error followed by every error in its source chain.
    #[must_use]
    pub fn chain(&self) -> Chain<'_> {
        Chain::new(self)
    }

    /// Returns a [`Display`](fmt::Display) wrapper rendering the full cause chain.
    #[must_use]
    pub fn report(&self) -> Report<'_> {
        Report::new(self)
    }

    /// Snapshots this error and its cause chain for logging.
    #[must_use]
    pub fn to_record(&self) -> ErrorRecord {
        ErrorRecord::capture(self)
    }
}

impl fmt::Display for PaymentProcessorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.message, &self.cause) {
            (Some(message), _) => f.write_str(message),
            (None, Some(cause)) => fmt::Display::fmt(cause, f),
            (None, None) => Ok(()),
        }
    }
}

impl StdError for PaymentProcessorError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        let cause: &(dyn StdError + 'static) = self.cause.as_deref()?;
        Some(cause)
    }
}

impl ChainedError for PaymentProcessorError {
    fn effective_message(&self) -> Cow<'_, str> {
        Self::effective_message(self)
    }
}

impl From<BoxError> for PaymentProcessorError {
    fn from(cause: BoxError) -> Self {
        Self::from_cause(cause)
    }
}

impl From<String> for PaymentProcessorError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for PaymentProcessorError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Extension methods that turn any error into a [`PaymentProcessorError`] at
/// the payment boundary.
///
/// # Example
///
/// ```rust
/// use paymentprocessor::ResultExt;
///
/// fn parse_amount(raw: &str) -> paymentprocessor::Result<u64> {
///     raw.parse::<u64>().payment_context("gateway returned a bad amount")
/// }
///
/// let err = parse_amount("12.x").unwrap_err();
/// assert_eq!(err.message(), Some("gateway returned a bad amount"));
/// assert!(err.has_cause());
/// ```
pub trait ResultExt<T> {
    /// Wraps the error with the given message.
    ///
    /// # Errors
    ///
    /// Returns a [`PaymentProcessorError`] carrying `message` and the original
    /// error as its cause.
    fn payment_context(self, message: impl Into<String>) -> Result<T>;

    /// Wraps the error with a message computed only on the error path.
    ///
    /// # Errors
    ///
    /// Returns a [`PaymentProcessorError`] carrying the computed message and
    /// the original error as its cause.
    fn with_payment_context<M, F>(self, message: F) -> Result<T>
    where
        M: Into<String>,
        F: FnOnce() -> M;

    /// Wraps the error without a message of its own.
    ///
    /// # Errors
    ///
    /// Returns a cause-only [`PaymentProcessorError`].
    fn into_payment_error(self) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn payment_context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|err| PaymentProcessorError::with_cause(message, err))
    }

    fn with_payment_context<M, F>(self, message: F) -> Result<T>
    where
        M: Into<String>,
        F: FnOnce() -> M,
    {
        self.map_err(|err| PaymentProcessorError::with_cause(message(), err))
    }

    fn into_payment_error(self) -> Result<T> {
        self.map_err(PaymentProcessorError::from_cause)
    }
}
