use serde::{Deserialize, Serialize};

use crate::CommandSchema;

/// A named bundle of command schemas with optional default-command dispatch.
///
/// This is the unit a nested parse runs against: the leading argv token
/// selects one of the member schemas, or the configured default command
/// takes over when the token matches nothing.
///
/// # Examples
///
/// ```
/// use declarg_core::*;
///
/// let set = CommandSet::new("articles")
///     .with_description("Article management tool")
///     .with_command(
///         CommandSchema::new("search")
///             .with_arg(ArgSpec::positional("query", 0, ValueKind::Str)),
///     )
///     .with_command(CommandSchema::new("list"))
///     .with_default_command("search");
///
/// assert_eq!(set.command_count(), 2);
/// assert!(set.find_command("search").is_some());
/// assert_eq!(set.default_command.as_deref(), Some("search"));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandSet {
    /// Program name shown in top-level help.
    pub name: String,
    /// One-line description shown in top-level help.
    pub description: Option<String>,
    /// Member command schemas, in declared order.
    pub commands: Vec<CommandSchema>,
    /// Command assumed when the leading token matches no member. Must name
    /// one of `commands`.
    pub default_command: Option<String>,
}

impl CommandSet {
    /// Creates an empty set with the given program name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Adds a member command.
    pub fn with_command(mut self, command: CommandSchema) -> Self {
        self.commands.push(command);
        self
    }

    /// Configures the default command.
    pub fn with_default_command(mut self, name: &str) -> Self {
        self.default_command = Some(name.to_string());
        self
    }

    /// Finds a member command by name.
    pub fn find_command(&self, name: &str) -> Option<&CommandSchema> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Returns the schema the default command names, if configured.
    pub fn default_schema(&self) -> Option<&CommandSchema> {
        self.default_command
            .as_deref()
            .and_then(|name| self.find_command(name))
    }

    /// Returns the number of member commands.
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }
}
