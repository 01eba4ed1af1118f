//! The authoritative collection of weight records.
//!
//! The [`EntryStore`] keeps the records in insertion order, which carries no
//! meaning; chronological views are derived with
//! [`normalize`](crate::domain::normalize). Every mutation rewrites the whole
//! collection to its slot.

use std::io;

use tracing::instrument;

use crate::{
    domain::{NewRecord, RecordId, WeightRecord},
    storage::KeyValueStore,
};

/// Name of the slot the collection is persisted in.
pub const ENTRIES_SLOT: &str = "weight_entries";

/// The error returned when the collection cannot be persisted.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The collection could not be serialized.
    #[error("failed to serialize weight records")]
    Serialize(#[from] serde_json::Error),

    /// The slot could not be written.
    #[error("failed to write slot 'weight_entries'")]
    Write(#[from] io::Error),
}

/// A persisted, unordered collection of [`WeightRecord`]s.
#[derive(Debug)]
pub struct EntryStore<S> {
    slots: S,
    records: Vec<WeightRecord>,
}

impl<S: KeyValueStore> EntryStore<S> {
    /// Loads the collection from `slots`.
    ///
    /// This never fails. A missing slot is an empty collection, and so is a
    /// slot that cannot be read or parsed; the latter is logged.
    #[instrument(level = "debug", skip(slots))]
    pub fn load(slots: S) -> Self {
        let records = match slots.read(ENTRIES_SLOT) {
            Ok(Some(content)) => parse_records(&content),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read weight records, starting empty: {e}");
                Vec::new()
            }
        };

        tracing::debug!("Loaded {} weight records", records.len());
        Self { slots, records }
    }

    /// All records, in no particular order.
    #[must_use]
    pub fn all(&self) -> &[WeightRecord] {
        &self.records
    }

    /// The number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finds a record by identifier.
    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&WeightRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    /// Stores a new record under a freshly assigned identifier.
    ///
    /// Returns the identifier. Callers that don't need it can ignore it.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted, in which case
    /// the record is not added.
    #[instrument(level = "debug", skip(self))]
    pub fn add(&mut self, record: NewRecord) -> Result<RecordId, StoreError> {
        let id = self.fresh_id();
        self.records.push(record.with_id(id.clone()));

        if let Err(e) = self.persist() {
            self.records.pop();
            return Err(e);
        }

        tracing::info!("Added weight record {id}");
        Ok(id)
    }

    /// Removes the record with identifier `id`.
    ///
    /// Returns `false` without touching storage if there is no such record.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted, in which case
    /// the record is kept.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, id: &RecordId) -> Result<bool, StoreError> {
        let Some(position) = self.records.iter().position(|record| &record.id == id) else {
            tracing::debug!("No weight record {id} to remove");
            return Ok(false);
        };

        let removed = self.records.remove(position);

        if let Err(e) = self.persist() {
            self.records.insert(position, removed);
            return Err(e);
        }

        tracing::info!("Removed weight record {id}");
        Ok(true)
    }

    /// The slot store backing the collection.
    #[must_use]
    pub const fn slots(&self) -> &S {
        &self.slots
    }

    fn fresh_id(&self) -> RecordId {
        // ids loaded from storage can be anything, so check rather than trust
        loop {
            let id = RecordId::generate();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&self.records)?;
        self.slots.write(ENTRIES_SLOT, &content)?;
        Ok(())
    }
}

fn parse_records(content: &str) -> Vec<WeightRecord> {
    let records: Vec<WeightRecord> = match serde_json::from_str(content) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!("Stored weight records are unreadable, starting empty: {e}");
            return Vec::new();
        }
    };

    // a hand-edited file could repeat an id; the first one wins
    let mut seen = std::collections::HashSet::new();
    records
        .into_iter()
        .filter(|record| {
            let fresh = seen.insert(record.id.clone());
            if !fresh {
                tracing::warn!("Ignoring duplicate weight record id {}", record.id);
            }
            fresh
        })
        .collect()
}
