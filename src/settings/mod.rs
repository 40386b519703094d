//! Process-wide terminal settings.
//!
//! Settings are plain string key-value pairs. The terminal only ever stores
//! two of them, both as `"yes"`/`"no"` toggles:
//!
//! | Key                      | Meaning                                 |
//! |--------------------------|-----------------------------------------|
//! | [`BEEP_KEY`]             | play a beep on every submitted line     |
//! | [`EFFECTS_KEY`]          | CRT glow and colour effects on screen   |
//!
//! There are no transactional guarantees. The last write wins, and a reader
//! always sees its own writes.
//!
//! ```rust
//! use termsite::settings::{MemorySettings, SettingsStore, Toggle, BEEP_KEY};
//!
//! let mut settings = MemorySettings::new();
//! assert_eq!(settings.toggle(BEEP_KEY), None);
//!
//! settings.set_toggle(BEEP_KEY, Toggle::No).unwrap();
//! assert_eq!(settings.get(BEEP_KEY), Some("no"));
//! ```

use core::fmt;
use heapless::{FnvIndexMap, String};

mod persistent;

pub use persistent::{HEADER_LEN, MAX_RECORD_LEN, PersistentSettings};

/// Key of the audio beep setting.
pub const BEEP_KEY: &str = "/settings/audio/beep";
/// Key of the visual effects setting.
pub const EFFECTS_KEY: &str = "/settings/effects";

/// Maximum length of a settings key.
pub const MAX_KEY_LEN: usize = 32;
/// Maximum length of a settings value.
pub const MAX_VALUE_LEN: usize = 16;
/// Maximum number of stored entries (must be a power of two).
pub const MAX_ENTRIES: usize = 8;

/// Errors returned by settings stores.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SettingsError {
    /// Key is empty or longer than [`MAX_KEY_LEN`].
    InvalidKey,
    /// Value is longer than [`MAX_VALUE_LEN`].
    ValueTooLong,
    /// Key or value contains a quote, backslash or control character.
    InvalidText,
    /// No room for another entry.
    Full,
    /// The record could not be serialized.
    Encode,
    /// The backing storage rejected the write.
    Storage,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SettingsError::InvalidKey => "invalid settings key",
            SettingsError::ValueTooLong => "settings value too long",
            SettingsError::InvalidText => "settings text contains reserved characters",
            SettingsError::Full => "settings store is full",
            SettingsError::Encode => "settings record could not be encoded",
            SettingsError::Storage => "settings storage write failed",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SettingsError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            SettingsError::InvalidKey => defmt::write!(f, "InvalidKey"),
            SettingsError::ValueTooLong => defmt::write!(f, "ValueTooLong"),
            SettingsError::InvalidText => defmt::write!(f, "InvalidText"),
            SettingsError::Full => defmt::write!(f, "Full"),
            SettingsError::Encode => defmt::write!(f, "Encode"),
            SettingsError::Storage => defmt::write!(f, "Storage"),
        }
    }
}

/// A `"yes"`/`"no"` setting value.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Toggle {
    /// Stored as `"yes"`.
    Yes,
    /// Stored as `"no"`.
    No,
}

impl Toggle {
    /// Parse a stored value. Anything other than `"yes"`/`"no"` is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "yes" => Some(Toggle::Yes),
            "no" => Some(Toggle::No),
            _ => None,
        }
    }

    /// The stored representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Toggle::Yes => "yes",
            Toggle::No => "no",
        }
    }
}

impl From<bool> for Toggle {
    fn from(enabled: bool) -> Self {
        if enabled { Toggle::Yes } else { Toggle::No }
    }
}

/// A key-value settings store.
///
/// Implementations decide where values live; callers only see strings.
pub trait SettingsStore {
    /// Current value for `key`, if any.
    fn get(&self, key: &str) -> Option<&str>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError>;

    /// Read `key` as a [`Toggle`].
    fn toggle(&self, key: &str) -> Option<Toggle> {
        self.get(key).and_then(Toggle::parse)
    }

    /// Store a [`Toggle`] under `key`.
    fn set_toggle(&mut self, key: &str, value: Toggle) -> Result<(), SettingsError> {
        self.set(key, value.as_str())
    }
}

fn check_text(text: &str) -> Result<(), SettingsError> {
    if text.chars().any(|c| c == '"' || c == '\\' || c.is_control()) {
        return Err(SettingsError::InvalidText);
    }
    Ok(())
}

/// In-memory settings store with bounded capacity.
#[derive(Debug, Default, Clone)]
pub struct MemorySettings {
    entries: FnvIndexMap<String<MAX_KEY_LEN>, String<MAX_VALUE_LEN>, MAX_ENTRIES>,
}

impl MemorySettings {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: FnvIndexMap::new(),
        }
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.as_str())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey);
        }
        check_text(key)?;
        check_text(value)?;

        let value: String<MAX_VALUE_LEN> =
            String::try_from(value).map_err(|_| SettingsError::ValueTooLong)?;

        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| k.as_str() == key) {
            *slot = value;
            return Ok(());
        }

        let key: String<MAX_KEY_LEN> =
            String::try_from(key).map_err(|_| SettingsError::InvalidKey)?;
        self.entries
            .insert(key, value)
            .map_err(|_| SettingsError::Full)?;
        Ok(())
    }
}
