//! # Host Collaborators
//!
//! Types the plugin host hands to plugins: command senders, commands, world
//! generators, and the host-owned resources a plugin may reach through its
//! [`PluginHolder`]. The inspector never implements the host; it only passes
//! these values through to the tracked plugin.

use std::fmt::Debug;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

/// Someone who can run commands: a player, the console, a command block.
pub trait CommandSender: Send + Sync {
    /// Display name of the sender.
    fn name(&self) -> &str;

    /// Sends a chat/console message back to the sender.
    fn send_message(&self, message: &str);
}

/// A command as registered with the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    /// Primary command name, without the leading slash
    pub name: String,
    /// Short description shown in help output
    pub description: String,
    /// Usage hint
    pub usage: String,
    /// Alternative names the command answers to
    pub aliases: Vec<String>,
}

impl Command {
    /// Creates a command with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds aliases.
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Whether `label` is the name or one of the aliases.
    pub fn matches(&self, label: &str) -> bool {
        self.name.eq_ignore_ascii_case(label)
            || self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(label))
    }
}

/// A command owned by a plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginCommand {
    command: Command,
    owner: String,
}

impl PluginCommand {
    /// Creates a command owned by the plugin named `owner`.
    pub fn new(command: Command, owner: impl Into<String>) -> Self {
        Self {
            command,
            owner: owner.into(),
        }
    }

    /// The underlying command.
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Name of the owning plugin.
    pub fn owner(&self) -> &str {
        &self.owner
    }
}

/// World generator a plugin may provide for the host's default worlds.
pub trait ChunkGenerator: Send + Sync + Debug {
    /// Name of the generator, for logs.
    fn name(&self) -> &str;
}

/// Resources the host provides to a plugin.
///
/// These are plain host lookups. Calls through them are never tracked.
pub trait PluginHost: Send + Sync {
    /// The plugin's archive or library file.
    fn data_file(&self) -> PathBuf;

    /// Opens a text resource bundled with the plugin.
    fn text_resource(&self, name: &str) -> Option<Box<dyn Read + Send>>;

    /// Looks up a command declared by the plugin, without consulting the plugin.
    fn raw_command(&self, name: &str) -> Option<PluginCommand>;

    /// Marks the plugin enabled or disabled in the host.
    fn set_enabled(&self, enabled: bool);

    /// Whether the host considers the plugin enabled.
    fn is_enabled(&self) -> bool;
}

/// A tracked plugin's handle back to the host resources of its tracker.
///
/// Handed to the plugin when the tracker creates it.
#[derive(Clone)]
pub struct PluginHolder {
    host: Arc<dyn PluginHost>,
}

impl PluginHolder {
    pub(crate) fn new(host: Arc<dyn PluginHost>) -> Self {
        Self { host }
    }

    pub fn data_file(&self) -> PathBuf {
        self.host.data_file()
    }

    pub fn text_resource(&self, name: &str) -> Option<Box<dyn Read + Send>> {
        self.host.text_resource(name)
    }

    /// The host's own command lookup, for plugins that don't override commands.
    pub fn command(&self, name: &str) -> Option<PluginCommand> {
        self.host.raw_command(name)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.host.set_enabled(enabled)
    }

    pub fn is_enabled(&self) -> bool {
        self.host.is_enabled()
    }
}

impl Debug for PluginHolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginHolder")
            .field("data_file", &self.host.data_file())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_matches_name_and_aliases() {
        let command = Command::new("balance").with_aliases(["bal", "money"]);

        assert!(command.matches("balance"));
        assert!(command.matches("BAL"));
        assert!(command.matches("money"));
        assert!(!command.matches("pay"));
    }

    #[test]
    fn test_plugin_command_owner() {
        let command = PluginCommand::new(Command::new("balance"), "economy");

        assert_eq!(command.owner(), "economy");
        assert_eq!(command.command().name, "balance");
    }
}
