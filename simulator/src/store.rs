//! File-backed settings store.
//!
//! Each key is one file `key-<n>.bin` in the store directory. Writes go to a
//! temporary file first and are renamed into place, so an interrupted write
//! leaves the previous value intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use klk_common::settings::{SettingsStore, StoreError};

/// Largest value accepted, matching the limit of typical watch key/value stores.
pub const MAX_VALUE_LEN: usize = 256;

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path { &self.dir }

    fn path(
        &self,
        key: u32,
    ) -> PathBuf {
        self.dir.join(format!("key-{key}.bin"))
    }
}

impl SettingsStore for FileStore {
    fn max_value_len(&self) -> usize { MAX_VALUE_LEN }

    fn stored_len(
        &self,
        key: u32,
    ) -> Option<usize> {
        let meta = fs::metadata(self.path(key)).ok()?;
        meta.is_file().then(|| meta.len() as usize)
    }

    fn read(
        &self,
        key: u32,
        buf: &mut [u8],
    ) -> Result<usize, StoreError> {
        let bytes = fs::read(self.path(key)).map_err(|err| match err.kind() {
            ErrorKind::NotFound => StoreError::NotFound(key),
            _ => StoreError::Io,
        })?;
        let len = buf.len();
        let dst = buf.get_mut(..bytes.len()).ok_or(StoreError::BufferTooSmall {
            len,
            needed: bytes.len(),
        })?;
        dst.copy_from_slice(&bytes);
        Ok(bytes.len())
    }

    fn write(
        &mut self,
        key: u32,
        bytes: &[u8],
    ) -> Result<(), StoreError> {
        if bytes.len() > MAX_VALUE_LEN {
            return Err(StoreError::ValueTooLarge {
                len: bytes.len(),
                max: MAX_VALUE_LEN,
            });
        }
        let path = self.path(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, bytes).map_err(|_| StoreError::Io)?;
        fs::rename(&tmp, &path).map_err(|_| StoreError::Io)
    }
}
