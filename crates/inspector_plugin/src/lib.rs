//! # Inspector Plugin Binding
//!
//! Wraps a host plugin so that every failure in its lifecycle callbacks is
//! reported before the host ever sees it, and describes host events in a
//! readable form for those reports.
//!
//! ## Key Features
//!
//! - **Tracked lifecycle**: [`TrackedPlugin`] forwards load, enable, disable,
//!   command, tab completion, world generator and command lookup calls, and
//!   reports any error or panic with a per-operation message
//! - **Already-reported errors**: the host only ever receives a
//!   [`ReportedError`], so it can tell reported failures apart
//! - **Event introspection**: [`details`] walks an event's type hierarchy and
//!   collects the fields registered for each level
//!
//! ## Usage
//!
//! ```rust,no_run
//! use inspector_plugin::*;
//! use inspector_report::{ReportEnvironment, ReportHandler, Reporter};
//! use std::io::Read;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! struct Server;
//!
//! impl PluginHost for Server {
//!     fn data_file(&self) -> PathBuf { PathBuf::from("plugins/economy.so") }
//!     fn text_resource(&self, _: &str) -> Option<Box<dyn Read + Send>> { None }
//!     fn raw_command(&self, _: &str) -> Option<PluginCommand> { None }
//!     fn set_enabled(&self, _: bool) {}
//!     fn is_enabled(&self) -> bool { true }
//! }
//!
//! struct EconomyPlugin;
//!
//! impl PluginLifecycle for EconomyPlugin {
//!     fn name(&self) -> &str { "economy" }
//!
//!     fn on_enable(&self) -> Result<(), BoxError> {
//!         Err("bank database unreachable".into())
//!     }
//! }
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let reporter = Reporter::builder()
//!     .runtime(runtime.handle().clone())
//!     .environment(ReportEnvironment::new("economy", "2.1.0"))
//!     .handler(ReportHandler::logging("[Inspector]"))
//!     .build()
//!     .unwrap();
//!
//! let tracked = TrackedPlugin::builder(Arc::new(Server), Arc::new(reporter))
//!     .build(|_holder| EconomyPlugin);
//!
//! // The failure has been reported by the time the host sees it.
//! let err = tracked.on_enable().unwrap_err();
//! assert_eq!(err.cause().to_string(), "bank database unreachable");
//! ```

pub mod details;
pub mod host;
pub mod lifecycle;
pub mod tracked;

pub use host::{ChunkGenerator, Command, CommandSender, PluginCommand, PluginHolder, PluginHost};
pub use inspector_report::{BoxError, Cause, ReportSink, ReportedError};
pub use lifecycle::{HostPlugin, PluginLifecycle};
pub use tracked::{messages, TrackedPlugin, TrackedPluginBuilder};
