//! Command descriptors and the context handlers run in.

use super::{Platform, Registry, Surface};
use crate::settings::{SettingsError, SettingsStore};
use core::fmt;

/// Everything a command handler may touch while it runs.
pub struct Context<'a> {
    /// Screen to write output to.
    pub surface: &'a mut dyn Surface,
    /// Persisted settings.
    pub settings: &'a mut dyn SettingsStore,
    /// Host services (beep, clock).
    pub platform: &'a mut dyn Platform,
    /// The registry the command was resolved from, for listing or chaining.
    pub registry: &'a Registry,
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("registry", self.registry)
            .finish_non_exhaustive()
    }
}

/// Function signature for command handlers.
///
/// Handlers receive the full submitted line, command name included, so they
/// can do their own argument splitting.
///
/// # Examples
///
/// ```rust
/// use termsite::terminal::{CommandFn, Context};
///
/// let echo: CommandFn = |ctx: &mut Context<'_>, line: &str| {
///     let rest = line.split_once(' ').map(|(_, rest)| rest).unwrap_or("");
///     ctx.surface.append(rest);
///     Ok(())
/// };
/// ```
pub type CommandFn = fn(ctx: &mut Context<'_>, line: &str) -> Result<(), CommandError>;

/// Command structure containing metadata and handler function.
///
/// Commands are registered once when the [`Registry`] is built and never
/// change afterwards.
#[derive(Clone, Copy)]
pub struct Command {
    /// The command name as typed by the user. Uppercase by convention;
    /// matching is case-sensitive.
    pub name: &'static str,

    /// A brief description shown by `HELP`.
    pub description: &'static str,

    /// Usage line shown by `HELP`, if the command takes arguments.
    pub usage: Option<&'static str>,

    /// Hidden commands run normally but are left out of `HELP`.
    pub hidden: bool,

    /// The function that implements the command logic.
    pub handler: CommandFn,
}

impl Command {
    /// Run the handler.
    pub fn run(&self, ctx: &mut Context<'_>, line: &str) -> Result<(), CommandError> {
        (self.handler)(ctx, line)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("usage", &self.usage)
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}

/// User-facing command failures.
///
/// These never abort the session. The dispatch loop prints them inline and
/// waits for the next line.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CommandError {
    /// The sub-action is not one of the accepted tokens.
    InvalidArgument {
        /// Tokens the command accepts.
        accepted: &'static [&'static str],
    },
    /// A required free-text argument was empty.
    MissingInput,
    /// The argument could not be decoded.
    MalformedInput,
    /// A setting could not be saved.
    Settings(SettingsError),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::InvalidArgument { accepted } => {
                f.write_str("Invalid arg, please use ")?;
                for (i, token) in accepted.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" and ")?;
                    }
                    f.write_str(token)?;
                }
                f.write_str(" only")
            }
            CommandError::MissingInput => f.write_str("Missing input"),
            CommandError::MalformedInput => f.write_str("Invalid base64 input"),
            CommandError::Settings(e) => write!(f, "Unable to save setting: {}", e),
        }
    }
}

impl From<SettingsError> for CommandError {
    fn from(e: SettingsError) -> Self {
        CommandError::Settings(e)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CommandError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            CommandError::InvalidArgument { .. } => defmt::write!(f, "InvalidArgument"),
            CommandError::MissingInput => defmt::write!(f, "MissingInput"),
            CommandError::MalformedInput => defmt::write!(f, "MalformedInput"),
            CommandError::Settings(e) => defmt::write!(f, "Settings({})", e),
        }
    }
}
