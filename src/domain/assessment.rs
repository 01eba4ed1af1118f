use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The advisor's overall verdict on a weight history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Stable, nothing to worry about.
    Healthy,
    /// Rapid gain or loss that deserves attention.
    Warning,
    /// No verdict could be reached.
    Unknown,
}

impl Status {
    /// Every status value, in the order the advisor schema lists them.
    pub const VARIANTS: [Self; 3] = [Self::Healthy, Self::Warning, Self::Unknown];

    /// The wire and display name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Warning => "warning",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A natural-language assessment of a weight trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    /// Overall verdict.
    pub status: Status,
    /// A short observation about the trend.
    pub message: String,
    /// A short piece of advice.
    pub recommendation: String,
}

impl Assessment {
    /// The reply given when there are too few records to say anything.
    #[must_use]
    pub fn insufficient_data() -> Self {
        Self {
            status: Status::Unknown,
            message: "Not enough data to analyse.".to_string(),
            recommendation: "Add at least two weight records to receive insights.".to_string(),
        }
    }

    /// The reply given when the advisor could not be reached or answered
    /// with something unusable.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            status: Status::Unknown,
            message: "The data could not be analysed right now.".to_string(),
            recommendation: "Check your connection or try again later.".to_string(),
        }
    }
}

/// The most recent completed assessment, as kept in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestAssessment {
    /// The assessment itself.
    #[serde(flatten)]
    pub assessment: Assessment,
    /// When the assessment completed.
    pub analyzed_at: DateTime<Utc>,
    /// How many records were stored when the assessment was requested.
    pub record_count: usize,
}

impl LatestAssessment {
    /// Whether records have been added or removed since the assessment.
    #[must_use]
    pub const fn is_stale(&self, record_count: usize) -> bool {
        self.record_count != record_count
    }
}
