//! `HELP`: list every visible command.

use super::{DETAIL_INDENT, template};
use crate::terminal::{Command, CommandError, Context};
use alloc::format;
use alloc::vec::Vec;

/// Descriptor for `HELP`.
pub const COMMAND: Command = Command {
    name: "HELP",
    description: "List all command, usage and its description",
    usage: None,
    hidden: false,
    handler: run,
};

fn run(ctx: &mut Context<'_>, _line: &str) -> Result<(), CommandError> {
    let mut lines = Vec::new();
    lines.push(template(Some("Available commands:"), 0));
    lines.push(template(None, 0));

    for command in ctx.registry.iter().filter(|c| !c.hidden) {
        lines.push(template(Some(command.name), 0));
        lines.push(template(
            Some(&format!("Description: {}", command.description)),
            DETAIL_INDENT,
        ));
        if let Some(usage) = command.usage {
            lines.push(template(Some(&format!("Usage: {}", usage)), DETAIL_INDENT));
        }
        lines.push(template(None, 0));
    }

    ctx.surface.append(&lines.join("\n"));
    Ok(())
}
