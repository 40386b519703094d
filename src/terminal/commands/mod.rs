//! Built-in terminal commands.

use super::{Command, Registry};
use alloc::format;
use alloc::string::String;
use log::warn;

pub mod audio;
pub mod base64;
pub mod cls;
pub mod help;
pub mod info;

/// Indent used for the detail lines under a command name.
pub const DETAIL_INDENT: u32 = 40;

/// Spacer line between output blocks.
pub const SPACER: &str = r#"<div style="display: block; height: 20px;"></div>"#;

/// Built-in commands in the order `HELP` lists them.
pub const BUILTINS: &[Command] = &[
    help::COMMAND,
    info::COMMAND,
    cls::COMMAND,
    audio::COMMAND,
    base64::COMMAND,
];

/// Format one output line, optionally indented. `None` gives a spacer.
///
/// ```rust
/// use termsite::terminal::commands::template;
///
/// assert_eq!(template(Some("HELP"), 0), r#"<div style="">HELP</div>"#);
/// assert_eq!(
///     template(Some("Usage: HELP"), 40),
///     r#"<div style="padding-left: 40px">Usage: HELP</div>"#
/// );
/// ```
pub fn template(data: Option<&str>, indent: u32) -> String {
    match data {
        None => String::from(SPACER),
        Some(data) if indent > 0 => {
            format!(r#"<div style="padding-left: {}px">{}</div>"#, indent, data)
        }
        Some(data) => format!(r#"<div style="">{}</div>"#, data),
    }
}

/// A registry holding every built-in command.
pub fn builtin_registry() -> Registry {
    let mut registry = Registry::new();
    for command in BUILTINS {
        if let Err(e) = registry.register(*command) {
            warn!("skipping built-in {}: {}", command.name, e);
        }
    }
    registry
}
