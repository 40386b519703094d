//! `CLS`: clear the screen.

use crate::terminal::{Command, CommandError, Context};

/// Descriptor for `CLS`.
pub const COMMAND: Command = Command {
    name: "CLS",
    description: "Clear the terminal screen",
    usage: None,
    hidden: false,
    handler: run,
};

fn run(ctx: &mut Context<'_>, _line: &str) -> Result<(), CommandError> {
    ctx.surface.replace("");
    Ok(())
}
