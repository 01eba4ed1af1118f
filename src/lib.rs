//! Pet Weight Tracking
//!
//! Weight records are kept as JSON in a `.gatofit` directory. Ordered views,
//! summary figures and time-window projections are derived from the stored
//! collection on demand, and a text model can be asked for an assessment of
//! the recent trend.

pub mod advisor;
pub use advisor::{Advisor, TextGenerator};

pub mod domain;
pub use domain::{
    compute_metrics, normalize, project, Assessment, Config, Metrics, NewRecord, RecordId,
    TimeWindow, Weight, WeightRecord,
};

/// Filesystem storage for records, configuration and assessments.
pub mod storage;
pub use storage::{DataDir, EntryStore};
