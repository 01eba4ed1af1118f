//! Summary figures derived from an ordered series.
//!
//! Nothing here is stored. Metrics are recomputed from the ordered view every
//! time they are needed.

use serde::Serialize;

use super::{RecordId, WeightRecord};

/// Padding, in kilograms, added either side of the observed range when
/// scaling a chart.
pub const DISPLAY_PADDING_KG: f64 = 0.5;

/// Direction of change between two consecutive measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The weight went up.
    Increase,
    /// The weight went down.
    Decrease,
    /// The weight is exactly the same.
    Unchanged,
}

impl Direction {
    /// Classifies a signed difference.
    ///
    /// Equality is exact; there is no tolerance for floating point noise.
    #[must_use]
    pub fn of(delta: f64) -> Self {
        if delta > 0.0 {
            Self::Increase
        } else if delta < 0.0 {
            Self::Decrease
        } else {
            Self::Unchanged
        }
    }

    /// A single-character marker for terminal output.
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Increase => "▲",
            Self::Decrease => "▼",
            Self::Unchanged => "–",
        }
    }
}

/// The change from a record's chronological predecessor to the record itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    /// The record the trend belongs to.
    pub id: RecordId,
    /// `weight - previous weight`, in kilograms.
    pub delta: f64,
    /// Classification of `delta`.
    pub direction: Direction,
}

impl Trend {
    /// The size of the change, ignoring direction.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.delta.abs()
    }
}

/// Lowest and highest weight in a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightRange {
    /// Smallest weight, in kilograms.
    pub min: f64,
    /// Largest weight, in kilograms.
    pub max: f64,
}

impl WeightRange {
    /// Computes the range over `records`, or `None` if there are none.
    #[must_use]
    pub fn of(records: &[&WeightRecord]) -> Option<Self> {
        let mut weights = records.iter().map(|r| r.kg());
        let first = weights.next()?;
        Some(weights.fold(Self { min: first, max: first }, |range, w| Self {
            min: range.min.min(w),
            max: range.max.max(w),
        }))
    }

    /// The axis bounds for plotting this range.
    ///
    /// The range is widened by [`DISPLAY_PADDING_KG`] each side, and the lower
    /// bound never drops below zero.
    #[must_use]
    pub fn display_domain(self) -> (f64, f64) {
        (
            (self.min - DISPLAY_PADDING_KG).max(0.0),
            self.max + DISPLAY_PADDING_KG,
        )
    }
}

/// Derived figures for an ordered series.
///
/// `None` is the "no data" sentinel for the value fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    /// Weight of the latest record.
    pub current: Option<f64>,
    /// Weight of the earliest record.
    pub starting: Option<f64>,
    /// `current - starting`, or zero when there is no data.
    pub net_change: f64,
    /// One entry per record except the earliest, in series order.
    pub trends: Vec<Trend>,
    /// Lowest and highest weight in the series.
    pub range: Option<WeightRange>,
}

impl Metrics {
    /// Looks up the trend for a record, if it has a predecessor.
    #[must_use]
    pub fn trend_for(&self, id: &RecordId) -> Option<&Trend> {
        self.trends.iter().find(|trend| &trend.id == id)
    }
}

/// Computes [`Metrics`] for a series already ordered by date.
#[must_use]
pub fn compute_metrics(ordered: &[&WeightRecord]) -> Metrics {
    let (Some(first), Some(last)) = (ordered.first(), ordered.last()) else {
        return Metrics {
            current: None,
            starting: None,
            net_change: 0.0,
            trends: Vec::new(),
            range: None,
        };
    };

    let trends = ordered
        .windows(2)
        .map(|pair| {
            let delta = pair[1].kg() - pair[0].kg();
            Trend {
                id: pair[1].id.clone(),
                delta,
                direction: Direction::of(delta),
            }
        })
        .collect();

    Metrics {
        current: Some(last.kg()),
        starting: Some(first.kg()),
        net_change: last.kg() - first.kg(),
        trends,
        range: WeightRange::of(ordered),
    }
}
