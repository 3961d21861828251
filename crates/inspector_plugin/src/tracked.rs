//! # Tracked Plugins
//!
//! [`TrackedPlugin`] owns exactly one plugin and sits between it and the
//! host. Every lifecycle call is forwarded to the plugin; when the plugin
//! fails, either by returning an error or by panicking, the tracker:
//!
//! 1. submits a report with the operation's message to its [`ReportSink`]
//! 2. blocks until that report has finished, successfully or not
//! 3. returns a [`ReportedError`] carrying the original failure
//!
//! The raw failure never reaches the host, so the host can tell failures
//! that were already reported from anything else, and keep running. A sink
//! that panics while reporting is logged and the caller still gets its
//! [`ReportedError`].
//!
//! Because step 2 blocks the calling thread, tracked operations must not run
//! as async tasks on the runtime the reporter delivers on. On a
//! current-thread runtime the report could never be delivered and the call
//! would hang forever; use `spawn_blocking` or a dedicated thread.
//!
//! Host resources reached through the tracker (data file, text resources,
//! raw command lookup) are plain delegations and are never tracked.

use crate::details::{EventCatalog, EventDetails, InspectableEvent};
use crate::host::{ChunkGenerator, Command, CommandSender, PluginCommand, PluginHolder, PluginHost};
use crate::lifecycle::{HostPlugin, PluginLifecycle};
use inspector_report::{into_cause, BoxError, Cause, PanicError, ReportSink, ReportedError};
use std::fmt;
use std::io::Read;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;

/// Report messages, one per tracked operation.
pub mod messages {
    pub const LOAD: &str = "Error occurred during plugin load";
    pub const ENABLE: &str = "Error occurred during plugin enable";
    pub const DISABLE: &str = "Error occurred during plugin disable";
    pub const COMMAND: &str = "Error occurred during command execution";
    pub const TAB_COMPLETE: &str = "Error occurred during tab completion";
    pub const WORLD_GENERATOR: &str = "Error occurred while resolving default world generator";
    pub const GET_COMMAND: &str = "Error occurred while resolving plugin command";
    pub const EVENT: &str = "Error occurred while handling event";
}

/// A plugin whose failures are reported before the host sees them.
pub struct TrackedPlugin<P: PluginLifecycle> {
    plugin: P,
    holder: PluginHolder,
    sink: Arc<dyn ReportSink>,
    catalog: Arc<EventCatalog>,
}

/// Builder for [`TrackedPlugin`].
pub struct TrackedPluginBuilder<P> {
    host: Arc<dyn PluginHost>,
    sink: Arc<dyn ReportSink>,
    catalog: Option<Arc<EventCatalog>>,
    _plugin: PhantomData<fn() -> P>,
}

impl<P: PluginLifecycle> TrackedPluginBuilder<P> {
    /// Catalog used to describe events in event handler reports.
    pub fn catalog(mut self, catalog: Arc<EventCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Creates the plugin and the tracker around it.
    pub fn build<F>(self, create: F) -> TrackedPlugin<P>
    where
        F: FnOnce(PluginHolder) -> P,
    {
        match self.try_build(|holder| Ok::<P, std::convert::Infallible>(create(holder))) {
            Ok(tracked) => tracked,
            Err(never) => match never {},
        }
    }

    /// Creates the plugin and the tracker around it.
    ///
    /// A failure to create the plugin is returned unchanged and not reported:
    /// without a plugin there is no lifecycle to track.
    pub fn try_build<F, E>(self, create: F) -> Result<TrackedPlugin<P>, E>
    where
        F: FnOnce(PluginHolder) -> Result<P, E>,
    {
        let holder = PluginHolder::new(self.host);
        let plugin = create(holder.clone())?;

        Ok(TrackedPlugin {
            plugin,
            holder,
            sink: self.sink,
            catalog: self.catalog.unwrap_or_default(),
        })
    }
}

impl<P: PluginLifecycle> TrackedPlugin<P> {
    /// Starts building a tracker for a plugin running in `host`, reporting to `sink`.
    pub fn builder(host: Arc<dyn PluginHost>, sink: Arc<dyn ReportSink>) -> TrackedPluginBuilder<P> {
        TrackedPluginBuilder {
            host,
            sink,
            catalog: None,
            _plugin: PhantomData,
        }
    }

    /// The tracked plugin.
    pub fn plugin(&self) -> &P {
        &self.plugin
    }

    /// Handle to the host resources, as given to the plugin.
    pub fn holder(&self) -> &PluginHolder {
        &self.holder
    }

    pub fn data_file(&self) -> PathBuf {
        self.holder.data_file()
    }

    pub fn text_resource(&self, name: &str) -> Option<Box<dyn Read + Send>> {
        self.holder.text_resource(name)
    }

    /// The host's command lookup, bypassing the plugin.
    pub fn raw_command(&self, name: &str) -> Option<PluginCommand> {
        self.holder.command(name)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.holder.set_enabled(enabled)
    }

    /// Runs one of the plugin's event handlers.
    ///
    /// On failure the report message includes the event's hierarchy and
    /// fields as described by the tracker's catalog.
    pub fn track_event<E, F>(&self, event: &E, handler: F) -> Result<(), ReportedError>
    where
        E: InspectableEvent,
        F: FnOnce(&P, &E) -> Result<(), BoxError>,
    {
        catch_failure(|| handler(&self.plugin, event)).map_err(|cause| {
            let details = EventDetails::for_event(&self.catalog, event);
            self.report(&format!("{}\n{}", messages::EVENT, details), cause)
        })
    }

    /// Runs `operation` against the plugin, reporting any failure with `message`.
    pub fn track<T, F>(&self, message: &str, operation: F) -> Result<T, ReportedError>
    where
        F: FnOnce(&P) -> Result<T, BoxError>,
    {
        catch_failure(|| operation(&self.plugin)).map_err(|cause| self.report(message, cause))
    }

    fn report(&self, message: &str, cause: Cause) -> ReportedError {
        let submitted = panic::catch_unwind(AssertUnwindSafe(|| {
            self.sink.submit(message, cause.clone()).join()
        }));

        if let Err(payload) = submitted {
            let panic = PanicError::from_payload(payload);
            error!(
                "❌ Reporting failed for plugin {}: {}",
                self.plugin.name(),
                panic.message()
            );
        }

        ReportedError::new(cause)
    }
}

/// Runs `operation`, turning both errors and panics into a [`Cause`].
fn catch_failure<T, F>(operation: F) -> Result<T, Cause>
where
    F: FnOnce() -> Result<T, BoxError>,
{
    match panic::catch_unwind(AssertUnwindSafe(operation)) {
        Ok(result) => result.map_err(into_cause),
        Err(payload) => Err(Arc::new(PanicError::from_payload(payload)) as Cause),
    }
}

impl<P: PluginLifecycle> HostPlugin for TrackedPlugin<P> {
    fn on_load(&self) -> Result<(), ReportedError> {
        self.track(messages::LOAD, |plugin| plugin.on_load())
    }

    fn on_enable(&self) -> Result<(), ReportedError> {
        self.track(messages::ENABLE, |plugin| plugin.on_enable())
    }

    fn on_disable(&self) -> Result<(), ReportedError> {
        self.track(messages::DISABLE, |plugin| plugin.on_disable())
    }

    fn on_command(
        &self,
        sender: &dyn CommandSender,
        command: &Command,
        label: &str,
        args: &[String],
    ) -> Result<bool, ReportedError> {
        self.track(messages::COMMAND, |plugin| {
            plugin.on_command(sender, command, label, args)
        })
    }

    fn on_tab_complete(
        &self,
        sender: &dyn CommandSender,
        command: &Command,
        alias: &str,
        args: &[String],
    ) -> Result<Option<Vec<String>>, ReportedError> {
        self.track(messages::TAB_COMPLETE, |plugin| {
            plugin.on_tab_complete(sender, command, alias, args)
        })
    }

    fn default_world_generator(
        &self,
        world_name: &str,
        id: Option<&str>,
    ) -> Result<Option<Arc<dyn ChunkGenerator>>, ReportedError> {
        self.track(messages::WORLD_GENERATOR, |plugin| {
            plugin.default_world_generator(world_name, id)
        })
    }

    fn get_command(&self, name: &str) -> Result<Option<PluginCommand>, ReportedError> {
        self.track(messages::GET_COMMAND, |plugin| plugin.get_command(name))
    }
}

impl<P: PluginLifecycle> fmt::Display for TrackedPlugin<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [Tracked]", self.plugin.name())
    }
}

impl<P: PluginLifecycle> fmt::Debug for TrackedPlugin<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedPlugin")
            .field("plugin", &self.plugin.name())
            .field("holder", &self.holder)
            .finish_non_exhaustive()
    }
}
