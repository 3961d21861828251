//! # Inspector Reporting
//!
//! Reporting side of the plugin inspector. When tracked plugin code fails,
//! the failure is turned into a [`Report`] and handed to a [`ReportSink`].
//! The caller then receives a [`ReportedError`], which tells it the failure
//! has already been reported and must not be reported again.
//!
//! ## Components
//!
//! - [`ReportSink`] - what the lifecycle tracker submits reports to
//! - [`Reporter`] - asynchronous sink running deliveries on a tokio runtime
//! - [`ReportHandler`] - before/success/error callbacks around each report
//! - [`ReportDelivery`] - backend that sends a report somewhere
//! - [`InspectorConfig`] - TOML configuration for reporting and logging
//!
//! ## Usage
//!
//! ```rust,no_run
//! use inspector_report::*;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = InspectorConfig::load_from_file("inspector.toml").await?;
//!
//! let reporter = Reporter::builder()
//!     .settings(config.reporter.clone())
//!     .environment(ReportEnvironment::new("economy", "2.1.0"))
//!     .handler(ReportHandler::logging(config.reporter.tag.clone()))
//!     .build()?;
//!
//! reporter
//!     .submit("Error occurred during plugin enable", into_cause("boom".into()))
//!     .wait()
//!     .await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod reporter;
pub mod utils;

pub use config::{InspectorConfig, LoggingSettings, ReporterSettings};
pub use error::{
    into_cause, BoxError, Cause, ConfigError, DeliveryError, PanicError, ReportedError,
    ReporterError,
};
pub use logging::setup_logging;
pub use report::{Report, ReportEnvironment};
pub use reporter::{
    LogDelivery, ReportDelivery, ReportHandler, ReportSink, ReportTask, Reporter, ReporterBuilder,
};
