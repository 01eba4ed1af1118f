use std::{fmt, str::FromStr};

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::WeightRecord;

/// A named, relative span of time used to narrow the series for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeWindow {
    /// The last month.
    #[serde(rename = "1M")]
    OneMonth,
    /// The last three months.
    #[serde(rename = "3M")]
    ThreeMonths,
    /// The last six months.
    #[serde(rename = "6M")]
    SixMonths,
    /// The last year.
    #[serde(rename = "1Y")]
    OneYear,
    /// Everything.
    #[default]
    #[serde(rename = "ALL")]
    All,
}

impl TimeWindow {
    /// Every window, shortest first.
    pub const VARIANTS: [Self; 5] = [
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::OneYear,
        Self::All,
    ];

    /// The calendar span of the window, or `None` for [`TimeWindow::All`].
    #[must_use]
    pub const fn months(self) -> Option<Months> {
        match self {
            Self::OneMonth => Some(Months::new(1)),
            Self::ThreeMonths => Some(Months::new(3)),
            Self::SixMonths => Some(Months::new(6)),
            Self::OneYear => Some(Months::new(12)),
            Self::All => None,
        }
    }

    /// The date records must be strictly after to fall inside the window.
    ///
    /// Subtraction is calendar-aware: a day that does not exist in the target
    /// month clamps to that month's last day, so one month before 31 March is
    /// the last day of February. Returns `None` for [`TimeWindow::All`], and
    /// also when the cutoff would precede the earliest representable date, in
    /// which case nothing is excluded.
    #[must_use]
    pub fn cutoff(self, today: NaiveDate) -> Option<NaiveDate> {
        self.months()
            .and_then(|months| today.checked_sub_months(months))
    }

    /// The short label used on the command line and in storage.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OneMonth => "1M",
            Self::ThreeMonths => "3M",
            Self::SixMonths => "6M",
            Self::OneYear => "1Y",
            Self::All => "ALL",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeWindow {
    type Err = ParseWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::VARIANTS
            .into_iter()
            .find(|window| window.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseWindowError(s.to_string()))
    }
}

/// The error returned when parsing an unknown window label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown time window '{0}' (expected one of 1M, 3M, 6M, 1Y, ALL)")]
pub struct ParseWindowError(String);

/// Narrows an ordered series to the records inside `window`, counted back
/// from `today`.
///
/// Order is preserved and the input is left untouched.
#[must_use]
pub fn project<'a>(
    ordered: &[&'a WeightRecord],
    window: TimeWindow,
    today: NaiveDate,
) -> Vec<&'a WeightRecord> {
    match window.cutoff(today) {
        None => ordered.to_vec(),
        Some(cutoff) => ordered
            .iter()
            .copied()
            .filter(|record| record.date > cutoff)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::domain::{normalize, Weight};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn record(id: &str, day: &str) -> WeightRecord {
        WeightRecord {
            id: id.into(),
            date: date(day),
            weight: Weight::new(4.0).unwrap(),
            note: None,
        }
    }

    fn ids(records: &[&WeightRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.to_string()).collect()
    }

    fn history() -> Vec<WeightRecord> {
        vec![
            record("two-years", "2022-06-15"),
            record("year-edge", "2023-06-15"),
            record("in-year", "2023-06-16"),
            record("seven-months", "2023-11-15"),
            record("five-months", "2024-01-15"),
            record("two-months", "2024-04-15"),
            record("month-edge", "2024-05-15"),
            record("in-month", "2024-05-16"),
            record("today", "2024-06-15"),
        ]
    }

    #[test_case(TimeWindow::OneMonth, &["in-month", "today"]; "one month")]
    #[test_case(TimeWindow::ThreeMonths, &["two-months", "month-edge", "in-month", "today"]; "three months")]
    #[test_case(TimeWindow::SixMonths, &["five-months", "two-months", "month-edge", "in-month", "today"]; "six months")]
    #[test_case(TimeWindow::OneYear, &["in-year", "seven-months", "five-months", "two-months", "month-edge", "in-month", "today"]; "one year")]
    fn windows_exclude_the_cutoff_day(window: TimeWindow, expected: &[&str]) {
        let records = history();
        let ordered = normalize(&records);

        let projected = project(&ordered, window, date("2024-06-15"));

        assert_eq!(ids(&projected), expected);
    }

    #[test]
    fn projection_matches_cutoff_predicate_exactly() {
        let records = history();
        let ordered = normalize(&records);
        let today = date("2024-06-15");

        for window in TimeWindow::VARIANTS {
            let projected = project(&ordered, window, today);
            let expected: Vec<_> = match window.cutoff(today) {
                Some(cutoff) => ordered
                    .iter()
                    .copied()
                    .filter(|r| r.date > cutoff)
                    .collect(),
                None => ordered.clone(),
            };
            assert_eq!(ids(&projected), ids(&expected), "window {window}");
        }
    }

    #[test]
    fn all_is_identity() {
        let records = history();
        let ordered = normalize(&records);

        for today in [date("1999-01-01"), date("2024-06-15"), date("2100-12-31")] {
            let projected = project(&ordered, TimeWindow::All, today);
            assert_eq!(projected, ordered);
        }
    }

    #[test]
    fn empty_series_stays_empty() {
        for window in TimeWindow::VARIANTS {
            assert!(project(&[], window, date("2024-06-15")).is_empty());
        }
    }

    #[test]
    fn future_records_are_kept() {
        let records = [record("tomorrow", "2024-06-16")];
        let ordered = normalize(&records);
        let projected = project(&ordered, TimeWindow::OneMonth, date("2024-06-15"));
        assert_eq!(ids(&projected), ["tomorrow"]);
    }

    #[test_case("2024-03-31", TimeWindow::OneMonth, "2024-02-29"; "leap february clamp")]
    #[test_case("2023-03-31", TimeWindow::OneMonth, "2023-02-28"; "common february clamp")]
    #[test_case("2024-08-31", TimeWindow::SixMonths, "2024-02-29"; "six months clamp")]
    #[test_case("2024-02-29", TimeWindow::OneYear, "2023-02-28"; "leap day minus a year")]
    #[test_case("2024-05-31", TimeWindow::ThreeMonths, "2024-02-29"; "three months clamp")]
    fn cutoff_uses_calendar_arithmetic(today: &str, window: TimeWindow, expected: &str) {
        assert_eq!(window.cutoff(date(today)), Some(date(expected)));
    }

    #[test]
    fn all_has_no_cutoff() {
        assert_eq!(TimeWindow::All.cutoff(date("2024-06-15")), None);
    }

    #[test_case("1m", TimeWindow::OneMonth; "lowercase")]
    #[test_case("3M", TimeWindow::ThreeMonths; "three")]
    #[test_case("6M", TimeWindow::SixMonths; "six")]
    #[test_case("1y", TimeWindow::OneYear; "year")]
    #[test_case("all", TimeWindow::All; "all")]
    fn parses_labels(input: &str, expected: TimeWindow) {
        assert_eq!(input.parse::<TimeWindow>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_label() {
        let error = "2W".parse::<TimeWindow>().unwrap_err();
        assert_eq!(
            error.to_string(),
            "unknown time window '2W' (expected one of 1M, 3M, 6M, 1Y, ALL)"
        );
    }
}
