//! Domain models for weight tracking.
//!
//! This module contains the record type, the derivation layer that turns an
//! unordered collection into ordered views and summary figures, and the
//! configuration.

mod assessment;
pub use assessment::{Assessment, LatestAssessment, Status};

mod config;
pub use config::Config;

/// Summary figures derived from an ordered series.
pub mod metrics;
pub use metrics::{compute_metrics, Direction, Metrics, Trend, WeightRange};

mod record;
pub use record::{InvalidWeight, NewRecord, RecordId, Weight, WeightRecord};

mod series;
pub use series::normalize;

mod window;
pub use window::{project, ParseWindowError, TimeWindow};
