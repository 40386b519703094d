//! `BASE64`: encode or decode text.

use crate::terminal::{Command, CommandError, Context, escape_html};
use alloc::format;
use alloc::string::String;
use base64ct::{Base64, Base64Unpadded, Encoding};

/// Descriptor for `BASE64`.
pub const COMMAND: Command = Command {
    name: "BASE64",
    description: "Encode or decode string",
    usage: Some("BASE64 [ENCODE or DECODE] [string]"),
    hidden: false,
    handler: run,
};

const ACCEPTED: &[&str] = &["ENCODE", "DECODE"];

/// Standard Base64 of the UTF-8 bytes of `text`.
pub fn encode(text: &str) -> String {
    Base64::encode_string(text.as_bytes())
}

/// Decode standard Base64 into text. Invalid UTF-8 is replaced, not rejected.
///
/// Padding is optional, so `aGk` and `aGk=` both decode to `hi`.
pub fn decode(encoded: &str) -> Result<String, CommandError> {
    let bytes = if encoded.len() % 4 == 0 {
        Base64::decode_vec(encoded)
    } else {
        Base64Unpadded::decode_vec(encoded)
    }
    .map_err(|_| CommandError::MalformedInput)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn run(ctx: &mut Context<'_>, line: &str) -> Result<(), CommandError> {
    let mut parts = line.splitn(3, ' ');
    let _name = parts.next();
    let action = parts.next().unwrap_or("");
    let input = parts.next().unwrap_or("");

    if !ACCEPTED.iter().any(|accepted| *accepted == action) {
        return Err(CommandError::InvalidArgument { accepted: ACCEPTED });
    }
    if input.is_empty() {
        return Err(CommandError::MissingInput);
    }

    let output = match action {
        "ENCODE" => encode(input),
        _ => decode(input)?,
    };
    ctx.surface
        .append(&format!("<div>{}</div>", escape_html(&output)));
    Ok(())
}
