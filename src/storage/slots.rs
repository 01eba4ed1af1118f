//! Named key-value slots.
//!
//! Each slot holds one complete serialized value and is overwritten as a
//! whole on every write.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

/// A store of named text slots.
pub trait KeyValueStore {
    /// Reads the slot `key`.
    ///
    /// Returns `Ok(None)` if the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot exists but cannot be read.
    fn read(&self, key: &str) -> io::Result<Option<String>>;

    /// Replaces the content of slot `key` with `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be written.
    fn write(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// Slots stored as `<key>.json` files in a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSlots {
    dir: PathBuf,
}

impl FileSlots {
    /// Opens the slot directory. It is created on the first write.
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// The file backing slot `key`.
    #[must_use]
    pub fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// The directory holding the slots.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl KeyValueStore for FileSlots {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        let path = self.path(key);
        match fs::read_to_string(&path) {
            Ok(content) => {
                tracing::debug!("Read slot '{key}' from {}", path.display());
                Ok(Some(content))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;

        // stage beside the target, then replace it in one rename
        let path = self.path(key);
        let staging = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&staging, value)?;
        fs::rename(&staging, &path)?;

        tracing::debug!("Wrote slot '{key}' to {}", path.display());
        Ok(())
    }
}

/// Slots held in memory, for tests and embedding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySlots {
    slots: HashMap<String, String>,
}

impl MemorySlots {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with `key` already holding `value`.
    #[must_use]
    pub fn with(key: &str, value: &str) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.to_string(), value.to_string());
        Self { slots }
    }

    /// The raw content of slot `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemorySlots {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_slot_reads_as_none() {
        let tmp = tempfile::tempdir().unwrap();
        let slots = FileSlots::new(tmp.path().join("never-created"));

        assert_eq!(slots.read("anything").unwrap(), None);
    }

    #[test]
    fn file_slot_write_creates_directory_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let mut slots = FileSlots::new(tmp.path().join("data"));

        slots.write("entries", "[1]").unwrap();
        slots.write("entries", "[2]").unwrap();

        assert_eq!(slots.read("entries").unwrap().as_deref(), Some("[2]"));
        assert_eq!(
            fs::read_to_string(tmp.path().join("data").join("entries.json")).unwrap(),
            "[2]"
        );
        // no staging file is left behind
        assert_eq!(fs::read_dir(slots.dir()).unwrap().count(), 1);
    }

    #[test]
    fn memory_slots_round_trip() {
        let mut slots = MemorySlots::new();
        assert_eq!(slots.read("k").unwrap(), None);

        slots.write("k", "v").unwrap();
        assert_eq!(slots.get("k"), Some("v"));
        assert_eq!(slots.read("k").unwrap().as_deref(), Some("v"));
    }
}
