#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Typed failure signal for payment-processor operations.
//!
//! This crate provides [`PaymentProcessorError`], the error returned when an
//! operation against a payment processor fails, together with the plumbing
//! needed to propagate, inspect and log it. It does not talk to any gateway
//! itself; it only defines the shape of the failure.
//!
//! # Overview
//!
//! A [`PaymentProcessorError`] carries an optional message and an optional
//! underlying cause. It is immutable, `Send + Sync + 'static`, and plugs into
//! `?` propagation through [`Result`] and [`ResultExt`].
//!
//! ```rust
//! use paymentprocessor::{PaymentProcessorError, ResultExt};
//!
//! fn authorize(amount: &str) -> paymentprocessor::Result<u64> {
//!     let cents = amount.parse::<u64>().payment_context("invalid authorization amount")?;
//!     if cents > 10_000 {
//!         return Err(PaymentProcessorError::new("insufficient funds"));
//!     }
//!     Ok(cents)
//! }
//!
//! assert_eq!(authorize("500").unwrap(), 500);
//! assert_eq!(authorize("50000").unwrap_err().to_string(), "insufficient funds");
//! assert!(authorize("5.00").unwrap_err().has_cause());
//! ```
//!
//! # Modules
//!
//! - [`error`] - The error type, its constructors and [`ResultExt`]
//! - [`chain`] - Cause-chain iteration, lookup and reporting
//! - [`record`] - JSON log records that round-trip through a log line
//! - `telemetry` - `tracing` events for failures (feature-gated)
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables structured logging of failures via `tracing`

pub mod chain;
pub mod error;
pub mod record;
#[cfg(feature = "telemetry")]
pub mod telemetry;

pub use chain::{Chain, ChainedError, Report, find_in_chain};
pub use error::{BoxError, PaymentProcessorError, Result, ResultExt};
pub use record::{ErrorRecord, RecordError, RecordedCause};
