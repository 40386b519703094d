//! # Byte-addressed storage for persisted terminal state
//!
//! The terminal keeps its settings (audio beep, visual effects) across
//! sessions. Rather than tie the settings store to one backend, it writes a
//! small record through the traits in this module, so the same code runs on
//! a RAM buffer in tests, on a file on a desktop, or on whatever a host page
//! maps onto local storage.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Settings Store │───▶│  Storage Traits │───▶│  RAM / File     │
//! │  (JSON record)  │    │  read / write   │    │  Backends       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Core Traits
//!
//! - [`ReadStorage`]: Read data from storage
//! - [`Storage`]: Read and write operations
//!
//! # Backends
//!
//! - [`RamStorage`]: fixed-capacity in-memory device, erased to `0xFF`
//! - [`FileStorage`]: file-backed device (requires the `std` feature)
//!
//! # Usage Examples
//!
//! ```rust
//! use termsite::storage::{RamStorage, ReadStorage, Storage};
//!
//! let mut storage = RamStorage::<64>::new();
//! storage.write(4, b"yes").unwrap();
//!
//! let mut buf = [0u8; 3];
//! storage.read(4, &mut buf).unwrap();
//! assert_eq!(&buf, b"yes");
//! ```

#![deny(unsafe_code)]

/// Common error types for storage operations
pub mod error;

use error::Error;

/// Value of a byte that has never been written.
pub const ERASED_BYTE: u8 = 0xFF;

/// Trait for reading data from storage devices.
///
/// This is the fundamental trait for all readable storage devices. It provides
/// a simple interface for reading data at specific offsets without requiring
/// write capabilities.
///
/// # Examples
///
/// ```rust,no_run
/// use termsite::storage::ReadStorage;
///
/// fn read_header<S: ReadStorage>(storage: &mut S) -> Result<u32, S::Error> {
///     let mut len = [0u8; 4];
///     storage.read(0, &mut len)?;
///     Ok(u32::from_le_bytes(len))
/// }
/// ```
pub trait ReadStorage {
    /// Associated error type for read operations
    type Error: core::fmt::Debug;

    /// Read data from the storage device.
    ///
    /// Reads data from the specified offset into the provided buffer.
    /// The entire buffer will be filled unless an error occurs.
    ///
    /// # Errors
    ///
    /// - `OutOfBounds` if offset + buffer length exceeds device capacity
    /// - `ReadError` if the backend read fails
    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error>;

    /// Get the total capacity of the storage device in bytes.
    fn capacity(&self) -> usize;
}

/// Trait for storage devices that support both read and write operations.
///
/// This trait extends [`ReadStorage`] to include write capabilities.
pub trait Storage: ReadStorage {
    /// Write data to the storage device at the given offset.
    ///
    /// # Errors
    ///
    /// - `OutOfBounds` if offset + data length exceeds device capacity
    /// - `WriteError` if the backend write fails
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error>;
}

fn check_bounds(offset: u32, len: usize, capacity: usize) -> Result<usize, Error> {
    let start = offset as usize;
    match start.checked_add(len) {
        Some(end) if end <= capacity => Ok(start),
        _ => Err(Error::OutOfBounds),
    }
}

/// A fixed-capacity RAM device.
///
/// Starts fully erased. Useful as a scratch backend and for tests.
#[derive(Debug, Clone)]
pub struct RamStorage<const N: usize> {
    memory: [u8; N],
}

impl<const N: usize> RamStorage<N> {
    /// Create an erased device.
    pub fn new() -> Self {
        Self {
            memory: [ERASED_BYTE; N],
        }
    }

    /// Raw view of the device contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.memory
    }
}

impl<const N: usize> Default for RamStorage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ReadStorage for RamStorage<N> {
    type Error = Error;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let start = check_bounds(offset, bytes.len(), N)?;
        bytes.copy_from_slice(&self.memory[start..start + bytes.len()]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Storage for RamStorage<N> {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        let start = check_bounds(offset, bytes.len(), N)?;
        self.memory[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }
}

#[cfg(feature = "std")]
pub use file::FileStorage;

#[cfg(feature = "std")]
mod file {
    use super::{ERASED_BYTE, ReadStorage, Storage, check_bounds, error::Error};
    use std::fs::{File, OpenOptions};
    use std::io::{Read, Seek, SeekFrom, Write};
    use std::path::Path;

    /// A storage device backed by a regular file.
    ///
    /// The file grows on demand up to `capacity` bytes. Bytes past the
    /// current end of file read as erased, and a write past the end fills
    /// the gap with [`ERASED_BYTE`].
    #[derive(Debug)]
    pub struct FileStorage {
        file: File,
        capacity: usize,
    }

    impl FileStorage {
        /// Open (or create) the file at `path`.
        pub fn open(path: impl AsRef<Path>, capacity: usize) -> Result<Self, Error> {
            let file = OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(false)
                .open(path)
                .map_err(|_| Error::NotInitialized)?;
            Ok(Self { file, capacity })
        }
    }

    impl ReadStorage for FileStorage {
        type Error = Error;

        fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
            check_bounds(offset, bytes.len(), self.capacity)?;
            bytes.fill(ERASED_BYTE);
            self.file
                .seek(SeekFrom::Start(u64::from(offset)))
                .map_err(|_| Error::ReadError)?;

            let mut filled = 0;
            while filled < bytes.len() {
                match self.file.read(&mut bytes[filled..]) {
                    Ok(0) => break,
                    Ok(n) => filled += n,
                    Err(_) => return Err(Error::ReadError),
                }
            }
            Ok(())
        }

        fn capacity(&self) -> usize {
            self.capacity
        }
    }

    impl Storage for FileStorage {
        fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
            check_bounds(offset, bytes.len(), self.capacity)?;
            let offset = u64::from(offset);
            let len = self
                .file
                .metadata()
                .map_err(|_| Error::WriteError)?
                .len();

            if len < offset {
                // Gap must read back as erased, not as zeros
                let gap = usize::try_from(offset - len).map_err(|_| Error::WriteError)?;
                self.file
                    .seek(SeekFrom::Start(len))
                    .map_err(|_| Error::WriteError)?;
                self.file
                    .write_all(&vec![ERASED_BYTE; gap])
                    .map_err(|_| Error::WriteError)?;
            } else {
                self.file
                    .seek(SeekFrom::Start(offset))
                    .map_err(|_| Error::WriteError)?;
            }
            self.file.write_all(bytes).map_err(|_| Error::WriteError)?;
            self.file.flush().map_err(|_| Error::WriteError)
        }
    }
}
