//! Simulated command terminal.
//!
//! The terminal is a small command shell that renders HTML fragments. It
//! never talks to a DOM directly. Output goes to a [`Surface`], audio and
//! time come from a [`Platform`], and settings live in a
//! [`SettingsStore`](crate::settings::SettingsStore). A browser host, a
//! console driver, and the tests all plug in at those seams.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Key Events    │───▶│    Session      │───▶│    Registry     │
//! │ Enter/Up/Down   │    │ (dispatch loop) │    │ name → Command  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!                                 │                       │
//!                                 ▼                       ▼
//!                        ┌─────────────────┐    ┌─────────────────┐
//!                        │  History +      │    │   Surface       │
//!                        │  Idle Counter   │    │   (HTML sink)   │
//!                        └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use termsite::settings::MemorySettings;
//! use termsite::terminal::{BufferSurface, Outcome, Platform, Session};
//!
//! struct Silent;
//! impl Platform for Silent {
//!     fn beep(&mut self) {}
//!     fn now_millis(&self) -> u64 { 0 }
//! }
//!
//! let mut session = Session::new(BufferSurface::new(), MemorySettings::new(), Silent);
//! let outcome = session.submit("BASE64 ENCODE hello world");
//!
//! assert_eq!(outcome, Outcome::Executed("BASE64"));
//! assert!(session.surface().contents().contains("aGVsbG8gd29ybGQ="));
//! ```

use alloc::string::String;

pub mod command;
pub mod commands;
pub mod effects;
pub mod history;
pub mod registry;
pub mod session;

pub use command::{Command, CommandError, CommandFn, Context};
pub use commands::builtin_registry;
pub use effects::{Effects, Theme};
pub use history::History;
pub use registry::{Registry, RegistryError};
pub use session::{EMPTY_THRESHOLD, Key, KeyResponse, Outcome, Session, SessionConfig};

/// Destination for terminal output.
///
/// The terminal only ever appends to or fully replaces the screen.
pub trait Surface {
    /// Append an HTML fragment to the screen.
    fn append(&mut self, html: &str);

    /// Replace the whole screen with an HTML fragment.
    fn replace(&mut self, html: &str);

    /// Re-create the input control after a submission.
    ///
    /// Hosts without a separate input widget can ignore this.
    fn rearm_input(&mut self, prompt: &str, placeholder: &str) {
        let _ = (prompt, placeholder);
    }
}

/// Host services the terminal needs besides output.
pub trait Platform {
    /// Play the key-press beep.
    fn beep(&mut self);

    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// A [`Surface`] that keeps the screen in memory.
#[derive(Debug, Default, Clone)]
pub struct BufferSurface {
    content: String,
    rearms: usize,
}

impl BufferSurface {
    /// Create an empty screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current screen contents.
    pub fn contents(&self) -> &str {
        &self.content
    }

    /// How many times the input control has been armed.
    pub fn rearms(&self) -> usize {
        self.rearms
    }
}

impl Surface for BufferSurface {
    fn append(&mut self, html: &str) {
        self.content.push_str(html);
    }

    fn replace(&mut self, html: &str) {
        self.content.clear();
        self.content.push_str(html);
    }

    fn rearm_input(&mut self, _prompt: &str, _placeholder: &str) {
        self.rearms += 1;
    }
}

/// Escape user text before it is placed into HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(feature = "std")]
pub use self::std_platform::StdPlatform;

#[cfg(feature = "std")]
mod std_platform {
    use super::Platform;
    use std::io::Write;
    use std::time::{SystemTime, UNIX_EPOCH};

    /// [`Platform`] for console hosts: the beep is the terminal bell.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct StdPlatform;

    impl Platform for StdPlatform {
        fn beep(&mut self) {
            let mut out = std::io::stdout();
            // Best effort
            let _ = out.write_all(b"\x07").and_then(|()| out.flush());
        }

        fn now_millis(&self) -> u64 {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        }
    }
}
