//! The on-disk layout of a weight log.
//!
//! Everything lives in a `.gatofit` directory under the data root:
//!
//! ```text
//! <root>/.gatofit/
//!     config.toml
//!     weight_entries.json
//!     latest_assessment.json
//! ```

use std::path::{Path, PathBuf};

use crate::{
    domain::Config,
    storage::{EntryStore, FileSlots},
};

/// Name of the directory holding the log, relative to the data root.
pub const DATA_DIR_NAME: &str = ".gatofit";

/// A weight log rooted at a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// Opens the log under `root`. Nothing is read or created yet.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The data root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `.gatofit` directory.
    #[must_use]
    pub fn dir(&self) -> PathBuf {
        self.root.join(DATA_DIR_NAME)
    }

    /// Path of the configuration file.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.dir().join("config.toml")
    }

    /// Whether `init` has been run here.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.dir().is_dir()
    }

    /// The slot store for this log.
    #[must_use]
    pub fn slots(&self) -> FileSlots {
        FileSlots::new(self.dir())
    }

    /// Loads the configuration, falling back to the defaults if the file is
    /// missing or broken.
    #[must_use]
    pub fn config(&self) -> Config {
        Config::load_or_default(&self.config_path()).unwrap_or_else(|e| {
            tracing::warn!("{e}; using default configuration");
            Config::default()
        })
    }

    /// Loads the record collection.
    #[must_use]
    pub fn entries(&self) -> EntryStore<FileSlots> {
        EntryStore::load(self.slots())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::KeyValueStore;

    #[test]
    fn layout_is_under_hidden_directory() {
        let data = DataDir::new(PathBuf::from("/pets/miau"));

        assert_eq!(data.dir(), PathBuf::from("/pets/miau/.gatofit"));
        assert_eq!(
            data.config_path(),
            PathBuf::from("/pets/miau/.gatofit/config.toml")
        );
        assert_eq!(
            data.slots().path("weight_entries"),
            PathBuf::from("/pets/miau/.gatofit/weight_entries.json")
        );
    }

    #[test]
    fn broken_config_falls_back_to_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let data = DataDir::new(tmp.path().to_path_buf());
        std::fs::create_dir_all(data.dir()).unwrap();
        std::fs::write(data.config_path(), "this is not toml =").unwrap();

        assert_eq!(data.config(), Config::default());
    }

    #[test]
    fn entries_start_empty_and_create_the_directory_on_write() {
        let tmp = tempfile::tempdir().unwrap();
        let data = DataDir::new(tmp.path().to_path_buf());

        assert!(!data.is_initialized());
        assert!(data.entries().is_empty());

        data.slots().write("weight_entries", "[]").unwrap();
        assert!(data.is_initialized());
    }
}
