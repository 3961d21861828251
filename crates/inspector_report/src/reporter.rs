//! # Asynchronous Reporter
//!
//! The reporter accepts a message and the failure that caused it, runs the
//! delivery on a tokio runtime and notifies registered [`ReportHandler`]s:
//!
//! 1. `before_report` fires synchronously on the submitting thread
//! 2. delivery runs on the runtime, optionally bounded by a timeout
//! 3. `on_success` or `on_error` fires from the delivery task
//!
//! Submitting returns a [`ReportTask`]. Callers running synchronous plugin
//! code join it to block until the delivery has finished, whatever its
//! outcome.

use crate::config::ReporterSettings;
use crate::error::{Cause, DeliveryError, PanicError, ReporterError};
use crate::report::{Report, ReportEnvironment};
use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, error, warn};

// ============================================================================
// Sink Interface
// ============================================================================

/// Anything that can accept failure reports.
///
/// The lifecycle tracker only depends on this trait: it submits a report and
/// joins the returned task. How and where reports are delivered is up to the
/// implementation.
pub trait ReportSink: Send + Sync {
    /// Starts reporting `cause` with the given message.
    fn submit(&self, message: &str, cause: Cause) -> ReportTask;
}

impl<S: ReportSink + ?Sized> ReportSink for Arc<S> {
    fn submit(&self, message: &str, cause: Cause) -> ReportTask {
        (**self).submit(message, cause)
    }
}

/// Handle to an in-flight report.
///
/// The task carries no result: success and failure are observed through the
/// handlers. There is no cancellation, a task always runs to completion.
#[must_use = "a report task does nothing useful unless joined or awaited"]
pub struct ReportTask {
    inner: BoxFuture<'static, ()>,
}

impl ReportTask {
    /// Wraps a future that completes when the report is done.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            inner: future.boxed(),
        }
    }

    /// A task that has already completed.
    pub fn ready() -> Self {
        Self::new(futures::future::ready(()))
    }

    /// Blocks the current thread until the report has finished.
    ///
    /// Must not be called from inside an async task running on the same
    /// runtime that performs the delivery; use [`ReportTask::wait`] there.
    /// On a current-thread runtime the delivery can then never be polled and
    /// this call never returns.
    pub fn join(self) {
        futures::executor::block_on(self.inner)
    }

    /// Waits for the report to finish without blocking the thread.
    pub async fn wait(self) {
        self.inner.await
    }
}

impl std::fmt::Debug for ReportTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportTask").finish_non_exhaustive()
    }
}

// ============================================================================
// Delivery Backend
// ============================================================================

/// Backend that actually sends a report somewhere.
#[async_trait]
pub trait ReportDelivery: Send + Sync + 'static {
    /// Delivers one report together with the environment it came from.
    async fn deliver(
        &self,
        report: &Report,
        environment: &ReportEnvironment,
    ) -> Result<(), DeliveryError>;
}

/// Delivery that writes the rendered report to the log.
///
/// Used when no other backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDelivery;

#[async_trait]
impl ReportDelivery for LogDelivery {
    async fn deliver(
        &self,
        report: &Report,
        environment: &ReportEnvironment,
    ) -> Result<(), DeliveryError> {
        warn!(target: "inspector::report", "{}", report.render(environment));
        Ok(())
    }
}

// ============================================================================
// Handlers
// ============================================================================

type ReportCallback = Arc<dyn Fn(&str, &Cause) + Send + Sync>;
type ErrorCallback = Arc<dyn Fn(&DeliveryError) + Send + Sync>;

/// Set of callbacks fired around each report.
///
/// Every callback is optional. Handlers are configured once, by whoever owns
/// the reporter, before the reporter is shared.
#[derive(Clone, Default)]
pub struct ReportHandler {
    before_report: Option<ReportCallback>,
    on_success: Option<ReportCallback>,
    on_error: Option<ErrorCallback>,
}

impl ReportHandler {
    /// Creates a handler with no callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Called synchronously before delivery starts.
    pub fn before_report<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str, &Cause) + Send + Sync + 'static,
    {
        self.before_report = Some(Arc::new(callback));
        self
    }

    /// Called when the report was delivered.
    pub fn on_success<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str, &Cause) + Send + Sync + 'static,
    {
        self.on_success = Some(Arc::new(callback));
        self
    }

    /// Called when delivery itself failed.
    pub fn on_error<F>(mut self, callback: F) -> Self
    where
        F: Fn(&DeliveryError) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(callback));
        self
    }

    /// Handler that logs every stage of a report, prefixed with `tag`.
    pub fn logging(tag: impl Into<String>) -> Self {
        let tag: String = tag.into();
        let tag: Arc<str> = Arc::from(tag);
        let before_tag = tag.clone();
        let success_tag = tag.clone();
        let error_tag = tag;

        Self::new()
            .before_report(move |message, _| {
                warn!("{} {}", before_tag, message);
            })
            .on_success(move |_, _| {
                warn!("{} Error was reported to author!", success_tag);
            })
            .on_error(move |err| {
                error!("{} Error on report: {}", error_tag, err);
            })
    }

    fn fire_before(&self, message: &str, cause: &Cause) {
        if let Some(callback) = &self.before_report {
            guarded("before_report", || callback(message, cause));
        }
    }

    fn fire_success(&self, message: &str, cause: &Cause) {
        if let Some(callback) = &self.on_success {
            guarded("on_success", || callback(message, cause));
        }
    }

    fn fire_error(&self, err: &DeliveryError) {
        if let Some(callback) = &self.on_error {
            guarded("on_error", || callback(err));
        }
    }
}

/// Runs one handler callback; a panic is logged and does not reach the
/// remaining handlers or the submitting thread.
fn guarded<F: FnOnce()>(stage: &str, callback: F) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(callback)) {
        let panic = PanicError::from_payload(payload);
        error!("❌ Report handler panicked in {}: {}", stage, panic.message());
    }
}

impl std::fmt::Debug for ReportHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportHandler")
            .field("before_report", &self.before_report.is_some())
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

// ============================================================================
// Reporter
// ============================================================================

/// Reporter that delivers reports asynchronously on a tokio runtime.
///
/// Cloning is cheap; clones share the delivery backend and handlers.
#[derive(Clone)]
pub struct Reporter {
    inner: Arc<ReporterInner>,
}

struct ReporterInner {
    delivery: Arc<dyn ReportDelivery>,
    handlers: Vec<ReportHandler>,
    environment: ReportEnvironment,
    settings: ReporterSettings,
    runtime: Handle,
}

impl Reporter {
    /// Starts building a reporter.
    pub fn builder() -> ReporterBuilder {
        ReporterBuilder::default()
    }

    /// Environment sent along with every report.
    pub fn environment(&self) -> &ReportEnvironment {
        &self.inner.environment
    }

    /// Settings this reporter was built with.
    pub fn settings(&self) -> &ReporterSettings {
        &self.inner.settings
    }

    /// Reports a failure and returns the in-flight delivery.
    pub fn report(&self, message: impl Into<String>, cause: Cause) -> ReportTask {
        let report = Report::new(message, cause);

        for handler in &self.inner.handlers {
            handler.fire_before(report.message(), report.cause());
        }

        if !self.inner.settings.enabled {
            debug!("Reporting disabled, dropping report: {}", report.message());
            return ReportTask::ready();
        }

        let inner = self.inner.clone();
        let delivery = self.inner.runtime.spawn(async move {
            let outcome = inner.deliver(&report).await;
            match outcome {
                Ok(()) => {
                    for handler in &inner.handlers {
                        handler.fire_success(report.message(), report.cause());
                    }
                }
                Err(err) => {
                    for handler in &inner.handlers {
                        handler.fire_error(&err);
                    }
                }
            }
        });

        ReportTask::new(async move {
            if let Err(err) = delivery.await {
                error!("❌ Report task did not complete: {}", err);
            }
        })
    }
}

impl ReporterInner {
    async fn deliver(&self, report: &Report) -> Result<(), DeliveryError> {
        let send = AssertUnwindSafe(self.delivery.deliver(report, &self.environment))
            .catch_unwind()
            .map(|result| {
                result.unwrap_or_else(|payload| {
                    let panic = PanicError::from_payload(payload);
                    Err(DeliveryError::Aborted(panic.message().to_string()))
                })
            });

        match self.settings.timeout() {
            Some(limit) => tokio::time::timeout(limit, send)
                .await
                .unwrap_or(Err(DeliveryError::TimedOut(limit))),
            None => send.await,
        }
    }
}

impl ReportSink for Reporter {
    fn submit(&self, message: &str, cause: Cause) -> ReportTask {
        self.report(message, cause)
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("handlers", &self.inner.handlers)
            .field("environment", &self.inner.environment)
            .field("settings", &self.inner.settings)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Reporter`].
#[derive(Default)]
pub struct ReporterBuilder {
    delivery: Option<Arc<dyn ReportDelivery>>,
    handlers: Vec<ReportHandler>,
    environment: ReportEnvironment,
    settings: ReporterSettings,
    runtime: Option<Handle>,
}

impl ReporterBuilder {
    /// Sets the delivery backend. Defaults to [`LogDelivery`].
    pub fn delivery<D: ReportDelivery>(mut self, delivery: D) -> Self {
        self.delivery = Some(Arc::new(delivery));
        self
    }

    /// Adds a handler. Handlers fire in the order they were added.
    pub fn handler(mut self, handler: ReportHandler) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Sets the environment sent with every report.
    pub fn environment(mut self, environment: ReportEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Applies reporter settings from configuration.
    pub fn settings(mut self, settings: ReporterSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Runtime used to run deliveries. Defaults to the current runtime.
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Builds the reporter.
    ///
    /// Fails when no runtime was given and the caller is not inside one.
    pub fn build(self) -> Result<Reporter, ReporterError> {
        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current().map_err(|_| ReporterError::NoRuntime)?,
        };

        Ok(Reporter {
            inner: Arc::new(ReporterInner {
                delivery: self.delivery.unwrap_or_else(|| Arc::new(LogDelivery)),
                handlers: self.handlers,
                environment: self.environment,
                settings: self.settings,
                runtime,
            }),
        })
    }
}
