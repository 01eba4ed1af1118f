use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, unique identifier of a [`WeightRecord`].
///
/// Fresh identifiers are random UUIDs, but identifiers read back from storage
/// are accepted as-is, whatever their shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generates a new, never-before-seen identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A weight in kilograms.
///
/// [`Weight::new`] rejects non-positive and non-finite values. Deserialization
/// does not re-check, so values read from storage are taken at face value.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(f64);

impl Weight {
    /// Validates and wraps a weight in kilograms.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidWeight`] if the value is zero, negative, NaN or
    /// infinite.
    pub fn new(kg: f64) -> Result<Self, InvalidWeight> {
        if kg.is_finite() && kg > 0.0 {
            Ok(Self(kg))
        } else {
            Err(InvalidWeight(kg.to_string()))
        }
    }

    /// The weight in kilograms.
    #[must_use]
    pub const fn kg(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} kg", self.0)
    }
}

impl FromStr for Weight {
    type Err = InvalidWeight;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed
            .strip_suffix("kg")
            .map_or(trimmed, str::trim_end);
        let kg: f64 = decimal_point(trimmed)
            .ok_or_else(|| InvalidWeight(s.to_string()))?
            .parse()
            .map_err(|_| InvalidWeight(s.to_string()))?;
        Self::new(kg)
    }
}

/// Accepts a single decimal comma, as typed on many keyboards, and rewrites
/// it to a point.
///
/// Input with more than one separator, or a comma followed by exactly three
/// digits, reads like digit grouping and is rejected.
fn decimal_point(input: &str) -> Option<String> {
    if input.matches([',', '.']).count() > 1 {
        return None;
    }
    match input.split_once(',') {
        None => Some(input.to_string()),
        Some((_, fraction)) if fraction.len() == 3 => None,
        Some((whole, fraction)) => Some(format!("{whole}.{fraction}")),
    }
}

/// The error returned when a weight is missing, unparsable or not positive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid weight '{0}': enter a positive number of kilograms")]
pub struct InvalidWeight(String);

/// A single weight measurement.
///
/// Records are immutable once created; they are only ever added or removed
/// as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightRecord {
    /// Stable identifier, unique within the collection.
    pub id: RecordId,
    /// The calendar day the measurement was taken.
    pub date: NaiveDate,
    /// The measured weight.
    pub weight: Weight,
    /// Free-text annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl WeightRecord {
    /// The weight in kilograms.
    #[must_use]
    pub const fn kg(&self) -> f64 {
        self.weight.kg()
    }
}

/// A record as submitted by the user, before an identifier is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    date: NaiveDate,
    weight: Weight,
    note: Option<String>,
}

impl NewRecord {
    /// Creates a new record submission.
    ///
    /// Notes are trimmed, and a blank note is treated as no note at all.
    #[must_use]
    pub fn new(date: NaiveDate, weight: Weight, note: Option<String>) -> Self {
        let note = note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        Self { date, weight, note }
    }

    /// Assigns an identifier, producing a storable record.
    #[must_use]
    pub fn with_id(self, id: RecordId) -> WeightRecord {
        WeightRecord {
            id,
            date: self.date,
            weight: self.weight,
            note: self.note,
        }
    }

    /// The date of the submission.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("4.2", 4.2; "plain decimal")]
    #[test_case(" 4.2 ", 4.2; "surrounding whitespace")]
    #[test_case("4,2", 4.2; "decimal comma")]
    #[test_case("4,25", 4.25; "two digit decimal comma")]
    #[test_case("4.200", 4.2; "three decimals after a point")]
    #[test_case("4.2kg", 4.2; "unit suffix")]
    #[test_case("4.2 kg", 4.2; "spaced unit suffix")]
    #[test_case("5", 5.0; "integer")]
    fn weight_parses(input: &str, expected: f64) {
        let weight: Weight = input.parse().unwrap();
        assert!((weight.kg() - expected).abs() < f64::EPSILON);
    }

    #[test_case("0"; "zero")]
    #[test_case("-1.5"; "negative")]
    #[test_case(""; "empty")]
    #[test_case("heavy"; "not a number")]
    #[test_case("NaN"; "nan")]
    #[test_case("inf"; "infinite")]
    #[test_case("4,200"; "thousands grouping")]
    #[test_case("1,234.5"; "grouping with decimal point")]
    #[test_case("4,2,1"; "two commas")]
    #[test_case("4.2.1"; "two points")]
    fn weight_rejects(input: &str) {
        assert!(input.parse::<Weight>().is_err());
    }

    #[test]
    fn invalid_weight_message_mentions_input() {
        let error = Weight::new(-2.0).unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid weight '-2': enter a positive number of kilograms"
        );
    }

    #[test]
    fn blank_note_is_dropped() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let weight = Weight::new(4.0).unwrap();

        let record = NewRecord::new(date, weight, Some("   ".to_string())).with_id("a".into());
        assert_eq!(record.note, None);

        let record =
            NewRecord::new(date, weight, Some("  after vet  ".to_string())).with_id("b".into());
        assert_eq!(record.note.as_deref(), Some("after vet"));
    }

    #[test]
    fn generated_ids_are_distinct() {
        let a = RecordId::generate();
        let b = RecordId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
    }

    #[test]
    fn serializes_to_storage_shape() {
        let record = WeightRecord {
            id: "abc123xyz".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            weight: Weight::new(4.25).unwrap(),
            note: None,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "abc123xyz", "date": "2024-01-15", "weight": 4.25})
        );
    }

    #[test]
    fn stored_weights_are_not_revalidated() {
        let record: WeightRecord =
            serde_json::from_str(r#"{"id":"x","date":"2024-01-15","weight":0}"#).unwrap();
        assert!(record.kg().abs() < f64::EPSILON);
        assert_eq!(record.note, None);
    }
}
