//! Cause-chain utilities.
//!
//! - [`ChainedError`] - An error that can describe itself and name its cause
//! - [`Chain`] - Iterator over an error and its `source()` chain
//! - [`Report`] - One-line (or multi-line with `{:#}`) rendering of a whole chain
//! - [`find_in_chain`] - Locates a [`PaymentProcessorError`] hidden inside
//!   another error

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::iter::FusedIterator;

use crate::error::PaymentProcessorError;

/// An error that can describe itself and point at the error that caused it.
///
/// Implemented by [`PaymentProcessorError`] and
/// [`RecordedCause`](crate::record::RecordedCause). Other error kinds can
/// implement it to be handled uniformly alongside them.
pub trait ChainedError: StdError {
    /// The message to show for this error.
    fn effective_message(&self) -> Cow<'_, str>;

    /// The error that caused this one, if any.
    ///
    /// Defaults to [`StdError::source`].
    fn wrapped_cause(&self) -> Option<&(dyn StdError + 'static)> {
        self.source()
    }
}

/// Iterator over an error followed by each error in its source chain.
///
/// Yields the starting error first, then follows `source()` until it returns
/// `None`.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn StdError + 'static)>,
}

impl<'a> Chain<'a> {
    /// Creates a chain starting at `head`.
    #[must_use]
    pub const fn new(head: &'a (dyn StdError + 'static)) -> Self {
        Self { next: Some(head) }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn StdError + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

impl FusedIterator for Chain<'_> {}

/// Returns the first [`PaymentProcessorError`] in the chain starting at `error`,
/// including `error` itself.
///
/// # Example
///
/// ```rust
/// use std::error::Error;
/// use paymentprocessor::{PaymentProcessorError, find_in_chain};
///
/// let erased: Box<dyn Error + Send + Sync> =
///     Box::new(PaymentProcessorError::new("card declined"));
///
/// let found = find_in_chain(&*erased).unwrap();
/// assert_eq!(found.message(), Some("card declined"));
/// ```
#[must_use]
pub fn find_in_chain<'a>(
    error: &'a (dyn StdError + 'static),
) -> Option<&'a PaymentProcessorError> {
    Chain::new(error).find_map(|link| link.downcast_ref::<PaymentProcessorError>())
}

/// Renders an error together with its whole cause chain.
///
/// The default form joins the links with `": "`. The alternate form (`{:#}`)
/// puts each cause on its own `Caused by:` line. A link whose text repeats the
/// previous one is skipped, so a cause-only [`PaymentProcessorError`] does not
/// print its cause twice.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    error: &'a (dyn StdError + 'static),
}

impl<'a> Report<'a> {
    /// Creates a report for `error`.
    #[must_use]
    pub const fn new(error: &'a (dyn StdError + 'static)) -> Self {
        Self { error }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut previous: Option<String> = None;
        for link in Chain::new(self.error) {
            let text = link.to_string();
            match &previous {
                Some(prev) if *prev == text => continue,
                Some(_) if f.alternate() => write!(f, "\nCaused by: {text}")?,
                Some(_) => write!(f, ": {text}")?,
                None => f.write_str(&text)?,
            }
            previous = Some(text);
        }
        Ok(())
    }
}
