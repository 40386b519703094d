//! `INFO`: profile card with live "online for" and experience durations.

use crate::terminal::{Command, CommandError, Context};
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

/// Descriptor for `INFO`.
pub const COMMAND: Command = Command {
    name: "INFO",
    description: "My current information",
    usage: None,
    hidden: false,
    handler: run,
};

/// Epoch of the "Online" duration, in Unix milliseconds.
pub const ONLINE_SINCE_MS: u64 = 1_210_872_600_000;
/// Epoch of the "Years of Experience" duration, in Unix milliseconds.
pub const EXPERIENCE_SINCE_MS: u64 = 1_588_294_800_000;

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;
const DAYS_PER_YEAR: u64 = 365;

const ART: &[&str] = &[
    r"             .^.          .~.              ",
    r"            ^G^7?7!^..^!7?7^B.             ",
    r"           .G.Y7775&57777!?J:B.            ",
    r"          .#J57:J7Y#57777J.Y?^G            ",
    r"      .^!7J?G#JB:!Y#5777!:B.5!?&J!^:       ",
    r"   .5777?77777BPB5Y#57!^Y?:G~&G5J?7!!P.    ",
    r"    B:^B.!J7!77JG7^.     5YP&??J~.B:~P     ",
    r"    .B.Y7^B 5Y.           BJYB #!JP^B      ",
    r"     :B.P~!5.G.            GBY&J#PP#.      ",
    r"     .#PP#J&YBG            .G.5!~P.B:      ",
    r"     B^PJ!# BYJB           .Y5 B^7Y.B.     ",
    r"    P~:B.~J??&PY5     .^7GJ77!7J!.B^:B     ",
    r"   .P!!7?J5G&~G:?Y^!75#Y5BPB77777?7775.    ",
    r"      :^!J&?!5.B:!7775#Y!:BJ#G?J7!^.       ",
    r"           G^?Y.J77775#Y7J:75J#.           ",
    r"           .B:J?!77775&5777Y.G.            ",
    r"            .B^7?7!^..^!7?7^G^             ",
    r"             .~.          .^.              ",
];

const PROJECTS: &[(&str, &str)] = &[
    ("LunaticSea Ecosystem", "https://github.com/LunaticSea"),
    ("ByteBlaze", "https://github.com/RainyXeon/ByteBlaze"),
    ("Rainlink", "https://github.com/RainyXeon/Rainlink"),
    ("Cylane", "https://github.com/RainyXeon/Cylane"),
];

const CONTACTS: &[(&str, &str)] = &[
    ("Github", "https://github.com/RainyXeon"),
    ("Discord (rainyxeon)", "https://discord.com/users/898728768791789628"),
    ("Email", "mailto:xeondev@xeondex.onmicrossoft.com"),
    ("X (Twitter)", "https://x.com/RainyXeon"),
];

/// Human-readable elapsed time, largest unit first.
///
/// Zero units are skipped, seconds keep one (floored) decimal, and anything
/// under a second is shown in milliseconds.
///
/// ```rust
/// use termsite::terminal::commands::info::format_elapsed;
///
/// assert_eq!(format_elapsed(0), "0ms");
/// assert_eq!(format_elapsed(1_337_000_000), "15d 11h 23m 20s");
/// assert_eq!(format_elapsed(90_450), "1m 30.4s");
/// ```
pub fn format_elapsed(ms: u64) -> String {
    if ms < MS_PER_SECOND {
        return format!("{}ms", ms);
    }

    let total_days = ms / MS_PER_DAY;
    let units = [
        (total_days / DAYS_PER_YEAR, "y"),
        (total_days % DAYS_PER_YEAR, "d"),
        ((ms / MS_PER_HOUR) % 24, "h"),
        ((ms / MS_PER_MINUTE) % 60, "m"),
    ];

    let mut out = String::new();
    for (value, suffix) in units.iter().filter(|(value, _)| *value > 0) {
        let _ = write!(out, "{}{} ", value, suffix);
    }

    let seconds = (ms / MS_PER_SECOND) % 60;
    let tenths = (ms % MS_PER_SECOND) / 100;
    match (seconds, tenths) {
        (0, 0) => {}
        (s, 0) => {
            let _ = write!(out, "{}s", s);
        }
        (s, t) => {
            let _ = write!(out, "{}.{}s", s, t);
        }
    }

    String::from(out.trim_end())
}

fn links(items: &[(&str, &str)]) -> String {
    items
        .iter()
        .map(|(label, href)| {
            if href.starts_with("mailto:") {
                format!(r#"<a href="{}">{}</a>"#, href, label)
            } else {
                format!(r#"<a href="{}" target="_blank">{}</a>"#, href, label)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn run(ctx: &mut Context<'_>, _line: &str) -> Result<(), CommandError> {
    let now = ctx.platform.now_millis();

    let details = [
        String::from("RainyXeon (Arisu: Rain)"),
        String::from("----------------------------------------------------------------"),
        String::from("Description: A full stack developer from Vietnam"),
        format!("Online: {}", format_elapsed(now.saturating_sub(ONLINE_SINCE_MS))),
        String::from("Language (Senior): JavaScript, TypeScript, Lua"),
        String::from("Language (Amateur): C#, C++, C, Java"),
        String::from("Database: MongoDB, MySQL, PostgreSQL, Redis"),
        String::from("Framework: ExpressJS, ReactJS, NestJS"),
        format!("Projects: {}", links(PROJECTS)),
        String::from("Best at: Backend, Frontend, DevOps and A bit of Mobile App"),
        format!(
            "Years of Experience: {}",
            format_elapsed(now.saturating_sub(EXPERIENCE_SINCE_MS))
        ),
        format!("Contacts: {}", links(CONTACTS)),
        String::from("You can call me:"),
        String::from(" - rainy"),
        String::from(" - ArisuRain"),
        String::from(" - Chuvoso"),
        String::from(" - Ame-san"),
    ];

    let mut card = String::from("<pre>\n");
    for (i, art) in ART.iter().enumerate() {
        let detail = details.get(i).map(String::as_str).unwrap_or("");
        let _ = writeln!(card, "{}| {}", art, detail);
    }
    card.push_str("</pre>");

    ctx.surface.append(&card);
    Ok(())
}
