//! Log records for payment-processor failures.
//!
//! An [`ErrorRecord`] is a plain snapshot of an error and the text of every
//! cause in its chain. It renders to a single JSON line suitable for a log
//! sink and parses back from one:
//!
//! ```json
//! {"message":"charge failed","causes":["network timeout after 3000ms"]}
//! ```
//!
//! A parsed record can be turned back into a [`PaymentProcessorError`]. The
//! concrete cause types are gone at that point; each cause is restored as a
//! [`RecordedCause`] carrying its original text.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chain::{Chain, ChainedError};
use crate::error::PaymentProcessorError;

/// Errors that can occur while reading an [`ErrorRecord`] back from a log line.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RecordError {
    /// The line is not a valid JSON error record.
    #[error("Malformed error record: {0}")]
    Json(#[from] serde_json::Error),
}

/// A serializable snapshot of an error and its cause chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// The `Display` text of the outermost error.
    pub message: String,
    /// The `Display` text of each cause, outermost first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,
}

impl ErrorRecord {
    /// Snapshots `error` and every error in its source chain.
    #[must_use]
    pub fn capture(error: &(dyn StdError + 'static)) -> Self {
        let mut chain = Chain::new(error).map(ToString::to_string);
        let message = chain.next().unwrap_or_default();
        Self {
            message,
            causes: chain.collect(),
        }
    }

    /// Renders the record as a single JSON line.
    #[must_use]
    pub fn to_log_line(&self) -> String {
        self.to_string()
    }

    /// Parses a record from a JSON log line.
    ///
    /// The `message` key is required; an empty message is accepted as-is.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Json`] if the line is not a valid record.
    pub fn parse(line: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(line.trim())?)
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&line)
    }
}

impl FromStr for ErrorRecord {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<ErrorRecord> for PaymentProcessorError {
    /// Rebuilds an error from a record.
    ///
    /// When the record's message is the text of its first cause, the original
    /// error had no message of its own and is restored as cause-only.
    fn from(record: ErrorRecord) -> Self {
        let ErrorRecord { message, causes } = record;
        let cause_only = causes.first().is_some_and(|first| *first == message);
        match RecordedCause::from_texts(causes) {
            Some(cause) if cause_only => Self::from_cause(cause),
            Some(cause) => Self::with_cause(message, cause),
            None => Self::new(message),
        }
    }
}

/// A cause restored from an [`ErrorRecord`].
///
/// Only the text of the original error survives. Nested causes are kept as a
/// chain so [`Chain`] and [`Report`](crate::chain::Report) still walk them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCause {
    text: String,
    cause: Option<Box<RecordedCause>>,
}

impl RecordedCause {
    /// Creates a cause with the given text and no further cause.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cause: None,
        }
    }

    /// Builds a chain from cause texts, outermost first.
    fn from_texts(texts: Vec<String>) -> Option<Self> {
        texts.into_iter().rev().fold(None, |inner, text| {
            Some(Self {
                text,
                cause: inner.map(Box::new),
            })
        })
    }

    /// Returns the recorded text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for RecordedCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl StdError for RecordedCause {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        let cause: &(dyn StdError + 'static) = self.cause.as_deref()?;
        Some(cause)
    }
}

impl ChainedError for RecordedCause {
    fn effective_message(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }
}
