//! Name → command lookup table.

use super::Command;
use core::fmt;
use heapless::FnvIndexMap;

/// Maximum number of registered commands (must be a power of two).
pub const MAX_COMMANDS: usize = 16;

/// Errors returned by [`Registry::register`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RegistryError {
    /// A command with the same name is already registered.
    Duplicate,
    /// The name is empty or contains whitespace.
    InvalidName,
    /// The registry already holds [`MAX_COMMANDS`] commands.
    Full,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            RegistryError::Duplicate => "command already registered",
            RegistryError::InvalidName => "invalid command name",
            RegistryError::Full => "command registry is full",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RegistryError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            RegistryError::Duplicate => defmt::write!(f, "Duplicate"),
            RegistryError::InvalidName => defmt::write!(f, "InvalidName"),
            RegistryError::Full => defmt::write!(f, "Full"),
        }
    }
}

/// The set of commands a session can run.
///
/// Built once at startup and read-only afterwards. Iteration follows
/// registration order, which is also the order `HELP` lists commands in.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    commands: FnvIndexMap<&'static str, Command, MAX_COMMANDS>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            commands: FnvIndexMap::new(),
        }
    }

    /// Register a command under its own name.
    pub fn register(&mut self, command: Command) -> Result<(), RegistryError> {
        if command.name.is_empty() || command.name.contains(char::is_whitespace) {
            return Err(RegistryError::InvalidName);
        }
        if self.commands.contains_key(command.name) {
            return Err(RegistryError::Duplicate);
        }
        self.commands
            .insert(command.name, command)
            .map_err(|_| RegistryError::Full)?;
        Ok(())
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no command is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// The command token of a submitted line: everything before the first space.
///
/// An empty line yields an empty name, which never resolves.
pub fn command_name(line: &str) -> &str {
    line.split(' ').next().unwrap_or("")
}
