//! # Plugin Lifecycle Interfaces
//!
//! Two sides of the same set of callbacks:
//!
//! - [`PluginLifecycle`] is what a plugin implements. Its methods may fail
//!   (or panic); failures are the tracker's concern, not the plugin's.
//! - [`HostPlugin`] is what the host calls. Every failure surfacing through it
//!   is a [`ReportedError`], already sent to the reporter.
//!
//! All methods take `&self`: the host may run a command on one thread while
//! another runs a scheduled task, so plugins keep their mutable state behind
//! their own locks.

use crate::host::{ChunkGenerator, Command, CommandSender, PluginCommand};
use inspector_report::{BoxError, ReportedError};
use std::sync::Arc;

/// Lifecycle callbacks of a tracked plugin.
///
/// Every method has a default that does nothing, so a plugin only overrides
/// the hooks it cares about.
///
/// # Examples
///
/// ```rust
/// use inspector_plugin::{BoxError, PluginHolder, PluginLifecycle};
///
/// struct EconomyPlugin {
///     holder: PluginHolder,
/// }
///
/// impl PluginLifecycle for EconomyPlugin {
///     fn name(&self) -> &str { "economy" }
///
///     fn on_enable(&self) -> Result<(), BoxError> {
///         let _config = self.holder.text_resource("config.toml")
///             .ok_or("config.toml is missing from the plugin archive")?;
///         Ok(())
///     }
/// }
/// ```
pub trait PluginLifecycle: Send + Sync + 'static {
    /// Name used in logs and in the tracker's display form.
    fn name(&self) -> &str;

    /// Called once after the plugin has been created.
    fn on_load(&self) -> Result<(), BoxError> {
        Ok(())
    }

    /// Called when the plugin is enabled.
    fn on_enable(&self) -> Result<(), BoxError> {
        Ok(())
    }

    /// Called when the plugin is disabled.
    fn on_disable(&self) -> Result<(), BoxError> {
        Ok(())
    }

    /// Executes a command. Returns whether the command was valid.
    fn on_command(
        &self,
        _sender: &dyn CommandSender,
        _command: &Command,
        _label: &str,
        _args: &[String],
    ) -> Result<bool, BoxError> {
        Ok(false)
    }

    /// Suggests completions for a partially typed command.
    ///
    /// `None` lets the host fall back to its default completion.
    fn on_tab_complete(
        &self,
        _sender: &dyn CommandSender,
        _command: &Command,
        _alias: &str,
        _args: &[String],
    ) -> Result<Option<Vec<String>>, BoxError> {
        Ok(None)
    }

    /// Provides a generator for a default world.
    fn default_world_generator(
        &self,
        _world_name: &str,
        _id: Option<&str>,
    ) -> Result<Option<Arc<dyn ChunkGenerator>>, BoxError> {
        Ok(None)
    }

    /// Resolves one of the plugin's commands.
    ///
    /// Plugins usually answer with [`crate::PluginHolder::command`].
    fn get_command(&self, _name: &str) -> Result<Option<PluginCommand>, BoxError> {
        Ok(None)
    }
}

/// Callback surface the host drives.
///
/// Implemented by [`crate::TrackedPlugin`]; a host can keep any number of
/// tracked plugins as `Box<dyn HostPlugin>`.
///
/// A failing call blocks until its report is delivered. Call these methods
/// from plain threads or through `tokio::task::spawn_blocking`, never from
/// an async task on the runtime the reporter delivers on: on a
/// current-thread runtime that call hangs forever.
pub trait HostPlugin: Send + Sync {
    fn on_load(&self) -> Result<(), ReportedError>;

    fn on_enable(&self) -> Result<(), ReportedError>;

    fn on_disable(&self) -> Result<(), ReportedError>;

    fn on_command(
        &self,
        sender: &dyn CommandSender,
        command: &Command,
        label: &str,
        args: &[String],
    ) -> Result<bool, ReportedError>;

    fn on_tab_complete(
        &self,
        sender: &dyn CommandSender,
        command: &Command,
        alias: &str,
        args: &[String],
    ) -> Result<Option<Vec<String>>, ReportedError>;

    fn default_world_generator(
        &self,
        world_name: &str,
        id: Option<&str>,
    ) -> Result<Option<Arc<dyn ChunkGenerator>>, ReportedError>;

    fn get_command(&self, name: &str) -> Result<Option<PluginCommand>, ReportedError>;
}
