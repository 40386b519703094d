//! Settings persisted onto a [`Storage`] device.
//!
//! Record layout:
//!
//! ```text
//! offset 0   u32 LE   payload length
//! offset 4   u32 LE   CRC-32 of payload
//! offset 8   ...      {"entries":[{"key":"..","value":".."},..]}
//! ```
//!
//! An erased header (`0xFFFFFFFF` length) is an empty store. A record that
//! fails its checksum or does not parse is discarded with a warning.

use super::{MAX_ENTRIES, MAX_KEY_LEN, MAX_VALUE_LEN, MemorySettings, SettingsError, SettingsStore};
use crate::storage::Storage;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Size of the record header in bytes.
pub const HEADER_LEN: usize = 8;
/// Maximum size of the JSON payload in bytes.
///
/// Large enough for [`MAX_ENTRIES`] entries at full key and value length.
/// Stored text never needs JSON escaping, so each entry is its text plus
/// `{"key":"","value":""}` and a separator.
pub const MAX_RECORD_LEN: usize =
    RECORD_FRAME_LEN + MAX_ENTRIES * (MAX_KEY_LEN + MAX_VALUE_LEN + ENTRY_FRAME_LEN + 1);

// `{"entries":[` and `]}`
const RECORD_FRAME_LEN: usize = 14;
// `{"key":"` `","value":"` `"}`
const ENTRY_FRAME_LEN: usize = 21;

const ERASED_LEN: u32 = u32::MAX;

#[derive(Debug, Serialize, Deserialize)]
struct Entry<'a> {
    key: &'a str,
    value: &'a str,
}

#[derive(Debug, Serialize, Deserialize)]
struct Record<'a> {
    #[serde(borrow)]
    entries: heapless::Vec<Entry<'a>, MAX_ENTRIES>,
}

/// A settings store that writes through to a storage device.
///
/// Reads are served from an in-memory cache filled by [`open`](Self::open).
/// Every [`set`](SettingsStore::set) rewrites the whole record.
///
/// ```rust
/// use termsite::settings::{PersistentSettings, SettingsStore, EFFECTS_KEY};
/// use termsite::storage::RamStorage;
///
/// let mut settings = PersistentSettings::open(RamStorage::<1024>::new());
/// settings.set(EFFECTS_KEY, "no").unwrap();
///
/// let reopened = PersistentSettings::open(settings.into_storage());
/// assert_eq!(reopened.get(EFFECTS_KEY), Some("no"));
/// ```
#[derive(Debug)]
pub struct PersistentSettings<S: Storage> {
    storage: S,
    cache: MemorySettings,
}

impl<S: Storage> PersistentSettings<S> {
    /// Load the record stored on `storage`.
    ///
    /// Loading is best effort: an unreadable or corrupt record yields an
    /// empty store and the next write replaces it.
    pub fn open(mut storage: S) -> Self {
        let cache = load(&mut storage).unwrap_or_default();
        debug!("loaded {} persisted setting(s)", cache.len());
        Self { storage, cache }
    }

    /// Give back the underlying device.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn flush(&mut self) -> Result<(), SettingsError> {
        let mut entries = heapless::Vec::<Entry<'_>, MAX_ENTRIES>::new();
        for (key, value) in self.cache.iter() {
            entries
                .push(Entry { key, value })
                .map_err(|_| SettingsError::Full)?;
        }

        let mut buf = [0u8; MAX_RECORD_LEN];
        let len = serde_json_core::to_slice(&Record { entries }, &mut buf)
            .map_err(|_| SettingsError::Encode)?;
        let payload = &buf[..len];

        if HEADER_LEN + len > self.storage.capacity() {
            return Err(SettingsError::Storage);
        }

        let mut header = [0u8; HEADER_LEN];
        header[..4].copy_from_slice(&(len as u32).to_le_bytes());
        header[4..].copy_from_slice(&crc32fast::hash(payload).to_le_bytes());

        self.storage
            .write(HEADER_LEN as u32, payload)
            .and_then(|()| self.storage.write(0, &header))
            .map_err(|e| {
                warn!("settings write failed: {:?}", e);
                SettingsError::Storage
            })
    }
}

impl<S: Storage> SettingsStore for PersistentSettings<S> {
    fn get(&self, key: &str) -> Option<&str> {
        self.cache.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.cache.set(key, value)?;
        self.flush()
    }
}

fn load<S: Storage>(storage: &mut S) -> Option<MemorySettings> {
    let mut header = [0u8; HEADER_LEN];
    if let Err(e) = storage.read(0, &mut header) {
        warn!("settings header unreadable: {:?}", e);
        return None;
    }

    let len = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
    let crc = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);

    if len == ERASED_LEN {
        return None;
    }
    let len = len as usize;
    if len > MAX_RECORD_LEN || HEADER_LEN + len > storage.capacity() {
        warn!("settings record length {} out of range, discarding", len);
        return None;
    }

    let mut buf = [0u8; MAX_RECORD_LEN];
    let payload = &mut buf[..len];
    if let Err(e) = storage.read(HEADER_LEN as u32, payload) {
        warn!("settings record unreadable: {:?}", e);
        return None;
    }

    if crc32fast::hash(payload) != crc {
        warn!("settings record checksum mismatch, discarding");
        return None;
    }

    let record = match serde_json_core::from_slice::<Record<'_>>(payload) {
        Ok((record, _)) => record,
        Err(_) => {
            warn!("settings record malformed, discarding");
            return None;
        }
    };

    let mut cache = MemorySettings::new();
    for entry in record.entries.iter() {
        if let Err(e) = cache.set(entry.key, entry.value) {
            warn!("skipping persisted setting {}: {}", entry.key, e);
        }
    }
    Some(cache)
}
