//! Error types for the reporting side of the inspector.

use std::sync::Arc;
use std::time::Duration;

/// Boxed error returned by tracked plugin code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Shared, immutable cause of a reported failure.
///
/// The same cause is handed to the asynchronous report and to the
/// [`ReportedError`] returned to the caller, so it lives behind an `Arc`.
pub type Cause = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Converts a boxed error into a shareable [`Cause`] without re-wrapping it,
/// so `downcast_ref` on the cause still finds the original type.
pub fn into_cause(error: BoxError) -> Cause {
    Arc::from(error)
}

/// Failure that has already been sent to the reporter.
///
/// Callers receiving this error must not report it again. The original cause
/// is kept for diagnostics and is exposed through [`std::error::Error::source`].
#[derive(Debug, Clone)]
pub struct ReportedError {
    cause: Cause,
}

impl ReportedError {
    /// Wraps a cause that has been reported.
    pub fn new(cause: Cause) -> Self {
        Self { cause }
    }

    /// The original failure.
    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    /// Unwraps into the original failure.
    pub fn into_cause(self) -> Cause {
        self.cause
    }
}

impl std::fmt::Display for ReportedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "already reported: {}", self.cause)
    }
}

// Hand out the cause itself rather than the `Arc`, so callers can downcast it.
impl std::error::Error for ReportedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.cause)
    }
}

/// Errors raised while delivering a report.
///
/// These never change the outcome of the tracked operation; they only reach
/// the `on_error` handlers.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DeliveryError {
    /// The delivery backend rejected or failed to send the report
    #[error("delivery failed: {0}")]
    Failed(String),
    /// Delivery did not finish within the configured timeout
    #[error("delivery timed out after {0:?}")]
    TimedOut(Duration),
    /// The delivery task panicked or was cancelled by the runtime
    #[error("delivery aborted: {0}")]
    Aborted(String),
}

/// Errors raised while building a [`crate::Reporter`].
#[derive(Debug, thiserror::Error)]
pub enum ReporterError {
    /// No runtime handle was given and the builder ran outside a tokio runtime
    #[error("no tokio runtime available for report delivery")]
    NoRuntime,
}

/// A panic raised by plugin code, turned into an ordinary error value.
#[derive(Debug, Clone, thiserror::Error)]
#[error("plugin panicked: {message}")]
pub struct PanicError {
    message: String,
}

impl PanicError {
    /// Builds an error from a panic payload caught with `catch_unwind`.
    pub fn from_payload(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };

        Self { message }
    }

    /// Panic message, or a placeholder when the payload was not a string.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that can occur while loading or storing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for [`crate::InspectorConfig`]
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized
    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
