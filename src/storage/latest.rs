//! Single-slot storage for the most recent advisor assessment.
//!
//! There is no history: whichever assessment completed last overwrites the
//! slot, regardless of when it was requested.

use crate::{domain::LatestAssessment, storage::KeyValueStore};

/// Name of the slot the latest assessment is persisted in.
pub const ASSESSMENT_SLOT: &str = "latest_assessment";

/// Reads the latest assessment.
///
/// Returns `None` if there is none yet, or if the slot is unreadable.
pub fn load_latest(slots: &impl KeyValueStore) -> Option<LatestAssessment> {
    let content = match slots.read(ASSESSMENT_SLOT) {
        Ok(content) => content?,
        Err(e) => {
            tracing::warn!("Failed to read the latest assessment: {e}");
            return None;
        }
    };

    serde_json::from_str(&content)
        .inspect_err(|e| tracing::warn!("Ignoring unreadable assessment: {e}"))
        .ok()
}

/// Replaces the latest assessment.
///
/// # Errors
///
/// Returns an error if the slot cannot be written.
pub fn save_latest(
    slots: &mut impl KeyValueStore,
    latest: &LatestAssessment,
) -> std::io::Result<()> {
    let content = serde_json::to_string_pretty(latest)?;
    slots.write(ASSESSMENT_SLOT, &content)
}
