//! Settings persistence.
//!
//! All user settings are stored as one fixed-layout blob under
//! [`SETTINGS_KEY`]. The blob is a `#[repr(C)]` plain-old-data struct cast to
//! and from bytes with `bytemuck`, so its layout is part of the storage format:
//!
//! ```text
//! offset  size  field
//! 0       4     background color  (u32, 0xRRGGBB, native endian)
//! 4       4     particle color
//! 8       4     time color
//! 12      4     date color
//! 16      1     hour_24
//! 17      1     show_am_pm
//! 18      1     lunar_month
//! 19      1     date_prefix
//! 20      1     formal_digits
//! 21      1     date_position  (0 = below, 1 = above)
//! 22      1     show_date
//! 23      1     show_month
//! ```
//!
//! A blob of any other length is treated as foreign and discarded. Unknown
//! enum bytes fall back to their default.

use bytemuck::{Pod, Zeroable};
use heapless::{LinearMap, Vec};
use thiserror::Error;

use crate::colors::ColorSettings;
use crate::config::{DatePosition, DisplayModeFlags};

/// Storage key of the settings blob.
pub const SETTINGS_KEY: u32 = 1;

/// Size of the settings blob in bytes.
pub const STORED_SETTINGS_LEN: usize = core::mem::size_of::<StoredSettings>();

const _: () = assert!(STORED_SETTINGS_LEN == 24);

// =============================================================================
// Errors
// =============================================================================

/// Failure reported by a [`SettingsStore`] backend.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum StoreError {
    #[error("no value stored under key {0}")]
    NotFound(u32),
    #[error("value of {len} bytes exceeds the {max}-byte limit")]
    ValueTooLarge { len: usize, max: usize },
    #[error("read buffer of {len} bytes too small for {needed}")]
    BufferTooSmall { len: usize, needed: usize },
    #[error("store is full")]
    Full,
    #[error("backend I/O failed")]
    Io,
}

/// Failure loading or saving settings.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum SettingsError {
    #[error("stored settings are {found} bytes, expected {expected}")]
    SizeMismatch { expected: usize, found: usize },
    #[error("settings blob of {len} bytes exceeds store limit of {max}")]
    TooLarge { len: usize, max: usize },
    #[error(transparent)]
    Store(#[from] StoreError),
}

// =============================================================================
// Store Abstraction
// =============================================================================

/// Key/value persistent storage provided by the host.
pub trait SettingsStore {
    /// Largest value the store accepts, in bytes.
    fn max_value_len(&self) -> usize;

    /// Length of the value stored under `key`, if any.
    fn stored_len(
        &self,
        key: u32,
    ) -> Option<usize>;

    /// Copy the value under `key` into `buf`, returning the number of bytes read.
    fn read(
        &self,
        key: u32,
        buf: &mut [u8],
    ) -> Result<usize, StoreError>;

    /// Replace the value under `key`.
    fn write(
        &mut self,
        key: u32,
        bytes: &[u8],
    ) -> Result<(), StoreError>;
}

/// Per-value capacity of [`MemoryStore`].
pub const MEMORY_VALUE_CAPACITY: usize = 64;

/// Number of keys a [`MemoryStore`] can hold.
pub const MEMORY_KEY_CAPACITY: usize = 4;

/// In-memory store, for tests and for hosts without persistence.
pub struct MemoryStore {
    values: LinearMap<u32, Vec<u8, MEMORY_VALUE_CAPACITY>, MEMORY_KEY_CAPACITY>,
    max_value_len: usize,
}

impl MemoryStore {
    pub const fn new() -> Self { Self::with_max_value_len(MEMORY_VALUE_CAPACITY) }

    /// Create a store that rejects values longer than `max_value_len`.
    ///
    /// The limit is capped at [`MEMORY_VALUE_CAPACITY`].
    pub const fn with_max_value_len(max_value_len: usize) -> Self {
        Self {
            values: LinearMap::new(),
            max_value_len: if max_value_len < MEMORY_VALUE_CAPACITY {
                max_value_len
            } else {
                MEMORY_VALUE_CAPACITY
            },
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self { Self::new() }
}

impl SettingsStore for MemoryStore {
    fn max_value_len(&self) -> usize { self.max_value_len }

    fn stored_len(
        &self,
        key: u32,
    ) -> Option<usize> {
        self.values.get(&key).map(|value| value.len())
    }

    fn read(
        &self,
        key: u32,
        buf: &mut [u8],
    ) -> Result<usize, StoreError> {
        let value = self.values.get(&key).ok_or(StoreError::NotFound(key))?;
        let len = buf.len();
        let dst = buf.get_mut(..value.len()).ok_or(StoreError::BufferTooSmall {
            len,
            needed: value.len(),
        })?;
        dst.copy_from_slice(value);
        Ok(value.len())
    }

    fn write(
        &mut self,
        key: u32,
        bytes: &[u8],
    ) -> Result<(), StoreError> {
        if bytes.len() > self.max_value_len {
            return Err(StoreError::ValueTooLarge {
                len: bytes.len(),
                max: self.max_value_len,
            });
        }
        let value = Vec::from_slice(bytes).map_err(|_| StoreError::ValueTooLarge {
            len: bytes.len(),
            max: MEMORY_VALUE_CAPACITY,
        })?;
        self.values.insert(key, value).map_err(|_| StoreError::Full)?;
        Ok(())
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Everything the user can configure.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Settings {
    pub flags: DisplayModeFlags,
    pub colors: ColorSettings,
}

/// On-storage representation of [`Settings`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Pod, Zeroable)]
#[repr(C)]
pub struct StoredSettings {
    pub background_color: u32,
    pub particle_color: u32,
    pub time_color: u32,
    pub date_color: u32,
    pub hour_24: u8,
    pub show_am_pm: u8,
    pub lunar_month: u8,
    pub date_prefix: u8,
    pub formal_digits: u8,
    pub date_position: u8,
    pub show_date: u8,
    pub show_month: u8,
}

impl From<&Settings> for StoredSettings {
    fn from(settings: &Settings) -> Self {
        let flags = &settings.flags;
        let colors = &settings.colors;
        Self {
            background_color: colors.background,
            particle_color: colors.particle,
            time_color: colors.time,
            date_color: colors.date,
            hour_24: u8::from(flags.hour_24),
            show_am_pm: u8::from(flags.show_am_pm),
            lunar_month: u8::from(flags.lunar_month),
            date_prefix: u8::from(flags.date_prefix),
            formal_digits: u8::from(flags.formal_digits),
            date_position: flags.date_position as u8,
            show_date: u8::from(flags.show_date),
            show_month: u8::from(flags.show_month),
        }
    }
}

impl From<&StoredSettings> for Settings {
    fn from(stored: &StoredSettings) -> Self {
        Self {
            flags: DisplayModeFlags {
                hour_24: stored.hour_24 != 0,
                show_am_pm: stored.show_am_pm != 0,
                lunar_month: stored.lunar_month != 0,
                date_prefix: stored.date_prefix != 0,
                formal_digits: stored.formal_digits != 0,
                date_position: DatePosition::from_u8(stored.date_position),
                show_date: stored.show_date != 0,
                show_month: stored.show_month != 0,
            },
            colors: ColorSettings {
                background: stored.background_color,
                particle: stored.particle_color,
                time: stored.time_color,
                date: stored.date_color,
            },
        }
    }
}

impl Settings {
    /// Load settings from `store`.
    ///
    /// An empty store yields the defaults. A blob of the wrong size is an error;
    /// callers fall back to the defaults.
    pub fn load<S: SettingsStore + ?Sized>(store: &S) -> Result<Self, SettingsError> {
        let Some(found) = store.stored_len(SETTINGS_KEY) else {
            return Ok(Self::default());
        };
        if found != STORED_SETTINGS_LEN {
            return Err(SettingsError::SizeMismatch {
                expected: STORED_SETTINGS_LEN,
                found,
            });
        }

        let mut stored = StoredSettings::zeroed();
        let read = store.read(SETTINGS_KEY, bytemuck::bytes_of_mut(&mut stored))?;
        if read != STORED_SETTINGS_LEN {
            return Err(SettingsError::SizeMismatch {
                expected: STORED_SETTINGS_LEN,
                found: read,
            });
        }
        Ok(Self::from(&stored))
    }

    /// Persist settings to `store`. The previous value is kept on failure.
    pub fn save<S: SettingsStore + ?Sized>(
        &self,
        store: &mut S,
    ) -> Result<(), SettingsError> {
        let max = store.max_value_len();
        if STORED_SETTINGS_LEN > max {
            return Err(SettingsError::TooLarge {
                len: STORED_SETTINGS_LEN,
                max,
            });
        }
        let stored = StoredSettings::from(self);
        store.write(SETTINGS_KEY, bytemuck::bytes_of(&stored))?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn custom() -> Settings {
        Settings {
            flags: DisplayModeFlags {
                hour_24: false,
                show_am_pm: true,
                lunar_month: true,
                date_prefix: false,
                formal_digits: true,
                date_position: DatePosition::Above,
                show_date: true,
                show_month: false,
            },
            colors: ColorSettings {
                background: 0x00_00AA,
                particle: 0xFF_AA00,
                time: 0xFF_FFFF,
                date: 0x55_5555,
            },
        }
    }

    #[test]
    fn test_blob_is_24_bytes() {
        let stored = StoredSettings::from(&Settings::default());
        assert_eq!(bytemuck::bytes_of(&stored).len(), 24);
    }

    #[test]
    fn test_empty_store_loads_defaults() {
        let store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Ok(Settings::default()));
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let settings = custom();
        settings.save(&mut store).unwrap();
        assert_eq!(store.stored_len(SETTINGS_KEY), Some(STORED_SETTINGS_LEN));
        assert_eq!(Settings::load(&store), Ok(settings));
    }

    #[test]
    fn test_size_mismatch_is_rejected() {
        let mut store = MemoryStore::new();
        store.write(SETTINGS_KEY, &[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(
            Settings::load(&store),
            Err(SettingsError::SizeMismatch { expected: 24, found: 5 })
        );
    }

    #[test]
    fn test_oversize_save_aborts_and_keeps_previous() {
        let mut store = MemoryStore::with_max_value_len(16);
        store.write(SETTINGS_KEY, &[9; 16]).unwrap();
        assert_eq!(
            custom().save(&mut store),
            Err(SettingsError::TooLarge { len: 24, max: 16 })
        );
        let mut buf = [0u8; 16];
        assert_eq!(store.read(SETTINGS_KEY, &mut buf), Ok(16));
        assert_eq!(buf, [9; 16], "previous value must survive a failed save");
    }

    #[test]
    fn test_unknown_enum_byte_decodes_to_default() {
        let mut stored = StoredSettings::from(&custom());
        stored.date_position = 7;
        let mut store = MemoryStore::new();
        store.write(SETTINGS_KEY, bytemuck::bytes_of(&stored)).unwrap();
        let loaded = Settings::load(&store).unwrap();
        assert_eq!(loaded.flags.date_position, DatePosition::Below);
        assert!(loaded.flags.formal_digits);
    }

    #[test]
    fn test_memory_store_read_buffer_too_small() {
        let mut store = MemoryStore::new();
        store.write(7, &[1; 8]).unwrap();
        let mut buf = [0u8; 4];
        assert_eq!(
            store.read(7, &mut buf),
            Err(StoreError::BufferTooSmall { len: 4, needed: 8 })
        );
        assert_eq!(store.read(8, &mut buf), Err(StoreError::NotFound(8)));
    }

    #[test]
    fn test_memory_store_read_into_larger_buffer() {
        let mut store = MemoryStore::new();
        store.write(7, &[1, 2, 3]).unwrap();
        let mut buf = [0u8; 8];
        assert_eq!(store.read(7, &mut buf), Ok(3));
        assert_eq!(buf, [1, 2, 3, 0, 0, 0, 0, 0], "only the stored bytes are written");
    }
}
