//! Structured logging of payment-processor failures.
//!
//! Available with the `telemetry` feature. Events go through [`tracing`]; the
//! crate never installs a subscriber, so nothing is emitted unless the
//! application sets one up.

use crate::error::{PaymentProcessorError, Result};

/// Emits an `ERROR` event describing `error` and its cause chain.
///
/// The event carries the effective message as `error.message` and the text of
/// every cause, outermost first, as `error.causes`.
pub fn log_failure(error: &PaymentProcessorError) {
    let causes: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    tracing::event!(
        target: "paymentprocessor",
        tracing::Level::ERROR,
        error.message = %error.effective_message(),
        error.causes = ?causes,
        "payment processor operation failed"
    );
}

/// Logs the error of a failed result with [`log_failure`] and passes the
/// result through unchanged.
///
/// # Errors
///
/// Returns the input error as-is.
pub fn log_on_failure<T>(result: Result<T>) -> Result<T> {
    result.inspect_err(log_failure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Buffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Buffer {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let buffer = Buffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        buffer.contents()
    }

    #[test]
    fn test_log_failure_includes_message_and_causes() {
        let err = PaymentProcessorError::with_cause(
            "charge declined",
            io::Error::new(io::ErrorKind::TimedOut, "connection timed out"),
        );
        let output = capture(|| log_failure(&err));
        assert!(output.contains("ERROR"));
        assert!(output.contains("payment processor operation failed"));
        assert!(output.contains("charge declined"));
        assert!(output.contains("connection timed out"));
    }

    #[test]
    fn test_log_failure_records_fields() {
        let err = PaymentProcessorError::with_cause(
            "payout rejected",
            io::Error::new(io::ErrorKind::TimedOut, "ledger unavailable"),
        );
        let output = capture(|| log_failure(&err));
        assert!(output.contains("paymentprocessor"));
        assert!(output.contains("error.message=payout rejected"));
        assert!(output.contains(r#"error.causes=["ledger unavailable"]"#));
    }

    #[test]
    fn test_log_on_failure_passes_through() {
        let output = capture(|| {
            let ok = log_on_failure(Ok::<_, PaymentProcessorError>(3));
            assert_eq!(ok.unwrap(), 3);
        });
        assert!(output.is_empty());

        let output = capture(|| {
            let err = log_on_failure::<()>(Err(PaymentProcessorError::new("insufficient funds")));
            assert_eq!(err.unwrap_err().message(), Some("insufficient funds"));
        });
        assert!(output.contains("insufficient funds"));
    }

    #[test]
    fn test_log_failure_without_subscriber() {
        log_failure(&PaymentProcessorError::new("refund rejected"));
    }
}
