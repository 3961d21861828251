//! Report requests and the environment attached to them.

use crate::error::Cause;
use crate::utils::current_timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::Write as _;

/// An immutable request to report a failure.
///
/// A report has no identity beyond its submission: the reporter never hands
/// it back, and its outcome is only visible through the report handlers.
#[derive(Debug, Clone)]
pub struct Report {
    message: String,
    cause: Cause,
    timestamp: u64,
}

impl Report {
    /// Creates a report stamped with the current time.
    pub fn new(message: impl Into<String>, cause: Cause) -> Self {
        Self {
            message: message.into(),
            cause,
            timestamp: current_timestamp(),
        }
    }

    /// Human-readable description of what went wrong.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The failure being reported.
    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    /// Submission time in milliseconds since the Unix epoch.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Renders the full report text: message, cause chain and environment.
    pub fn render(&self, environment: &ReportEnvironment) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.message);
        let _ = writeln!(out, "Caused by: {}", self.cause);

        let mut source = self.cause.source();
        while let Some(err) = source {
            let _ = writeln!(out, "Caused by: {err}");
            source = err.source();
        }

        let fields = environment.fields();
        if !fields.is_empty() {
            let _ = writeln!(out, "Environment:");
            for (name, value) in fields {
                let _ = writeln!(out, "  {name}: {value}");
            }
        }

        out
    }

    /// Structured form of the report, for backends that post JSON.
    pub fn to_json(&self, environment: &ReportEnvironment) -> serde_json::Value {
        let mut causes = vec![self.cause.to_string()];
        let mut source = self.cause.source();
        while let Some(err) = source {
            causes.push(err.to_string());
            source = err.source();
        }

        serde_json::json!({
            "message": self.message,
            "timestamp": self.timestamp,
            "causes": causes,
            "environment": environment,
        })
    }
}

/// Description of where a report comes from.
///
/// Every report sent by a [`crate::Reporter`] is delivered together with its
/// environment, so the receiving side knows which plugin and host failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEnvironment {
    /// Name of the tracked plugin
    pub plugin_name: String,
    /// Version of the tracked plugin
    pub plugin_version: String,
    /// Name of the host server software
    pub host_name: String,
    /// Version of the host server software
    pub host_version: String,
    /// Any additional details, rendered in key order
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl ReportEnvironment {
    /// Creates an environment for the given plugin.
    pub fn new(plugin_name: impl Into<String>, plugin_version: impl Into<String>) -> Self {
        Self {
            plugin_name: plugin_name.into(),
            plugin_version: plugin_version.into(),
            ..Self::default()
        }
    }

    /// Sets the host name and version.
    pub fn with_host(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.host_name = name.into();
        self.host_version = version.into();
        self
    }

    /// Adds a free-form field.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Non-empty fields as ordered `(name, value)` pairs.
    pub fn fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::new();

        if !self.plugin_name.is_empty() {
            let plugin = if self.plugin_version.is_empty() {
                self.plugin_name.clone()
            } else {
                format!("{} v{}", self.plugin_name, self.plugin_version)
            };
            fields.push(("Plugin".to_string(), plugin));
        }

        if !self.host_name.is_empty() {
            let host = if self.host_version.is_empty() {
                self.host_name.clone()
            } else {
                format!("{} v{}", self.host_name, self.host_version)
            };
            fields.push(("Host".to_string(), host));
        }

        fields.extend(self.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        fields
    }
}
