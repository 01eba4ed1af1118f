pub mod data_dir;
mod entry_store;
pub mod latest;
mod slots;

pub use data_dir::DataDir;
pub use entry_store::{EntryStore, StoreError, ENTRIES_SLOT};
pub use latest::{load_latest, save_latest, ASSESSMENT_SLOT};
pub use slots::{FileSlots, KeyValueStore, MemorySlots};
