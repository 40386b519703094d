//! # termsite - portfolio terminal
//!
//! A headless implementation of the simulated command prompt that sits on a
//! personal portfolio page, plus the orchestration half of the site's build
//! script.
//!
//! ## Features
//!
//! ### Terminal
//! - **Command registry**: fixed table of named commands with help metadata
//! - **Dispatch loop**: line submission, history recall, idle easter egg
//! - **Built-in commands**: `HELP`, `INFO`, `CLS`, `AUDIO`, `BASE64`
//!
//! ### Settings
//! - Key-value settings with an in-memory store and a persisted store that
//!   writes a checksummed JSON record onto any [`storage::Storage`] device
//!
//! ### Build pipeline (`std`)
//! - Clean, compile each entry through an opaque build tool, validate output
//! - Best-effort VCS metadata and verbosity-aware logging
//!
//! ## Usage
//!
//! ```rust
//! use termsite::settings::MemorySettings;
//! use termsite::terminal::{BufferSurface, Key, KeyResponse, Platform, Session};
//!
//! struct Host;
//! impl Platform for Host {
//!     fn beep(&mut self) {}
//!     fn now_millis(&self) -> u64 { 1_700_000_000_000 }
//! }
//!
//! let mut session = Session::new(BufferSurface::new(), MemorySettings::new(), Host);
//! session.handle_key(Key::Enter("HELP"));
//!
//! match session.handle_key(Key::ArrowUp) {
//!     KeyResponse::Recall(line) => assert_eq!(line, "HELP"),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```
//!
//! ## Optional Features
//!
//! - `std` (default): file-backed storage, console platform, build pipeline,
//!   and the `termsite` binary
//! - `defmt`: `defmt::Format` for the error types

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

extern crate alloc;

/// Byte-addressed storage devices used to persist settings.
pub mod storage;

/// Process-wide key-value settings.
pub mod settings;

/// The simulated command terminal.
///
/// Command registry, dispatch loop, history and built-in commands.
pub mod terminal;

/// Static-site build orchestration.
#[cfg(feature = "std")]
pub mod build;
