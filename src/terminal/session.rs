//! The dispatch loop.
//!
//! A [`Session`] owns everything that changes while the terminal runs: the
//! command history, its recall cursor and the idle counter. Each key event
//! is handled to completion before the next one is accepted.
//!
//! Per submitted line:
//!
//! 1. Beep, unless audio has been disabled
//! 2. Echo the line under the prompt
//! 3. Store non-empty lines in history, count empty ones
//! 4. Either run the command or, on the tenth empty line, replace the
//!    screen with the idle payload
//! 5. Re-arm the input and reset the recall cursor

use super::commands::{SPACER, builtin_registry};
use super::registry::command_name;
use super::{Context, Effects, History, Platform, Registry, Surface, escape_html};
use crate::settings::{BEEP_KEY, SettingsStore, Toggle};
use crate::terminal::CommandError;
use alloc::format;
use alloc::string::String;
use base64ct::{Base64, Encoding};
use log::{debug, warn};

/// Empty submissions that trigger the idle payload.
pub const EMPTY_THRESHOLD: u32 = 10;

/// Default idle payload: Base64 of UTF-16LE encoded HTML.
pub const IDLE_PAYLOAD: &str = "PABwAHIAZQA+AAoAIAAgACAALgAtAC4ACgAgACAAKABvACAAbwApACAAIAAgAFQAZQBuACAAZQBtAHAAdAB5ACAAbABpAG4AZQBzACAAaQBuACAAYQAgAHIAbwB3AC4ACgAgACAAfAAgAE8AIAB8ACAAIAAgAE4AbwB0AGgAaQBuAGcAIAB0AG8AIAByAHUAbgAsACAAcwBvACAAdABoAGUAIAB0AGUAcgBtAGkAbgBhAGwAIAB0AG8AbwBrACAAYQAgAG4AYQBwAC4ACgAgACAAJwB+AH4AfgAnACAAIAAgAFQAeQBwAGUAIABIAEUATABQACAAdABvACAAdwBhAGsAZQAgAGkAdAAgAHUAcAAuAAoAPAAvAHAAcgBlAD4A";

/// Session configuration.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Prompt shown before the input.
    pub prompt: &'static str,
    /// Placeholder text of an empty input.
    pub placeholder: &'static str,
    /// Empty submissions before the idle payload; `0` disables it.
    pub empty_threshold: u32,
    /// Base64 of the UTF-16LE HTML shown when the threshold is hit.
    pub idle_payload: &'static str,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prompt: r"C:\>",
            placeholder: "Use 'HELP' to see more command!",
            empty_threshold: EMPTY_THRESHOLD,
            idle_payload: IDLE_PAYLOAD,
        }
    }
}

/// Key events the input control forwards.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Key<'a> {
    /// Enter with the current input text.
    Enter(&'a str),
    /// Recall the previous history line.
    ArrowUp,
    /// Recall the next history line.
    ArrowDown,
    /// Anything else; handled by the input control itself.
    Other,
}

/// What the host should do after a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyResponse<'s> {
    /// Put this text into the input control.
    Recall(&'s str),
    /// The line was submitted.
    Submitted(Outcome),
    /// Nothing to do.
    Ignored,
}

/// Result of one submitted line.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Outcome {
    /// The named command ran successfully.
    Executed(&'static str),
    /// The named command refused its arguments; the message is on screen.
    Rejected(&'static str, CommandError),
    /// No command by that name.
    NotRecognized,
    /// The idle threshold was hit and the screen replaced.
    Idle,
}

/// One running terminal.
#[derive(Debug)]
pub struct Session<D: Surface, S: SettingsStore, P: Platform> {
    registry: Registry,
    history: History,
    empty_count: u32,
    config: SessionConfig,
    effects: Effects,
    surface: D,
    settings: S,
    platform: P,
}

impl<D: Surface, S: SettingsStore, P: Platform> Session<D, S, P> {
    /// A session with the built-in commands and default configuration.
    pub fn new(surface: D, settings: S, platform: P) -> Self {
        Self::with_registry(
            builtin_registry(),
            SessionConfig::default(),
            surface,
            settings,
            platform,
        )
    }

    /// A session with a custom registry and configuration.
    ///
    /// Reads the effects setting and arms the first input.
    pub fn with_registry(
        registry: Registry,
        config: SessionConfig,
        mut surface: D,
        mut settings: S,
        platform: P,
    ) -> Self {
        let effects = Effects::load(&mut settings);
        surface.rearm_input(config.prompt, config.placeholder);
        Self {
            registry,
            history: History::new(),
            empty_count: 0,
            config,
            effects,
            surface,
            settings,
            platform,
        }
    }

    /// Handle one key event from the input control.
    pub fn handle_key(&mut self, key: Key<'_>) -> KeyResponse<'_> {
        match key {
            Key::Enter(line) => KeyResponse::Submitted(self.submit(line)),
            Key::ArrowUp => KeyResponse::Recall(self.history.recall_previous()),
            Key::ArrowDown => KeyResponse::Recall(self.history.recall_next()),
            Key::Other => KeyResponse::Ignored,
        }
    }

    /// Submit one line.
    pub fn submit(&mut self, line: &str) -> Outcome {
        debug!("submit {:?}", line);

        self.feedback();
        self.surface.append(&format!(
            r#"<div style="display: flex; align-items: center;"><div style="margin-right: 10px;">{}</div><div class="cmd_input">{}</div></div>"#,
            escape_html(self.config.prompt),
            escape_html(line)
        ));

        self.history.push(line);
        if line.is_empty() {
            self.empty_count += 1;
        }

        let threshold = self.config.empty_threshold;
        let outcome = if threshold > 0 && self.empty_count >= threshold {
            self.empty_count = 0;
            let payload = decode_payload(self.config.idle_payload);
            self.surface.replace(&payload);
            Outcome::Idle
        } else {
            self.dispatch(line)
        };

        self.surface
            .rearm_input(self.config.prompt, self.config.placeholder);
        self.history.reset_cursor();
        outcome
    }

    fn dispatch(&mut self, line: &str) -> Outcome {
        let name = command_name(line);
        let Some(command) = self.registry.lookup(name).copied() else {
            self.surface.append(&format!(
                "<div>'{}' is not recognized as an internal or external command,</div>\n<div>operable program or batch file.</div>\n{}",
                escape_html(name),
                SPACER
            ));
            return Outcome::NotRecognized;
        };

        let mut ctx = Context {
            surface: &mut self.surface,
            settings: &mut self.settings,
            platform: &mut self.platform,
            registry: &self.registry,
        };
        match command.run(&mut ctx, line) {
            Ok(()) => Outcome::Executed(command.name),
            Err(e) => {
                debug!("{} rejected: {}", command.name, e);
                ctx.surface.append(&format!("<div>{}</div>", e));
                Outcome::Rejected(command.name, e)
            }
        }
    }

    fn feedback(&mut self) {
        let stored = self
            .settings
            .get(BEEP_KEY)
            .filter(|value| !value.is_empty())
            .map(Toggle::parse);
        match stored {
            None => {
                self.platform.beep();
                if let Err(e) = self.settings.set_toggle(BEEP_KEY, Toggle::Yes) {
                    warn!("could not store default beep setting: {}", e);
                }
            }
            Some(Some(Toggle::Yes)) => self.platform.beep(),
            Some(_) => {}
        }
    }

    /// The screen.
    pub fn surface(&self) -> &D {
        &self.surface
    }

    /// The settings store.
    pub fn settings(&self) -> &S {
        &self.settings
    }

    /// Host services.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Registered commands.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Submitted lines.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Empty submissions since the last idle payload.
    pub fn empty_count(&self) -> u32 {
        self.empty_count
    }

    /// Effects setting read at startup.
    pub fn effects(&self) -> Effects {
        self.effects
    }

    /// Active configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Take the session apart.
    pub fn into_parts(self) -> (D, S, P) {
        (self.surface, self.settings, self.platform)
    }
}

/// Decode a Base64 UTF-16LE payload. Unpaired surrogates become U+FFFD.
pub fn decode_payload(encoded: &str) -> String {
    let bytes = match Base64::decode_vec(encoded) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("idle payload is not valid base64: {:?}", e);
            return String::new();
        }
    };
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
    char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}
