//! `AUDIO`: switch the key-press beep on or off.

use crate::settings::{BEEP_KEY, Toggle};
use crate::terminal::{Command, CommandError, Context};

/// Descriptor for `AUDIO`.
pub const COMMAND: Command = Command {
    name: "AUDIO",
    description: "Enable or disable audio",
    usage: Some("AUDIO [ENABLE or DISABLE]"),
    hidden: false,
    handler: run,
};

const ACCEPTED: &[&str] = &["ENABLE", "DISABLE"];

fn run(ctx: &mut Context<'_>, line: &str) -> Result<(), CommandError> {
    match line.split(' ').nth(1) {
        Some("ENABLE") => {
            ctx.settings.set_toggle(BEEP_KEY, Toggle::Yes)?;
            ctx.platform.beep();
            Ok(())
        }
        Some("DISABLE") => {
            ctx.settings.set_toggle(BEEP_KEY, Toggle::No)?;
            Ok(())
        }
        _ => Err(CommandError::InvalidArgument { accepted: ACCEPTED }),
    }
}
