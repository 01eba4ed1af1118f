//! Chronological ordering of the record collection.

use super::WeightRecord;

/// Orders records ascending by date.
///
/// Records sharing a date keep their relative input order, so repeated calls on
/// the same collection always give the same sequence. The input is untouched.
pub fn normalize<'a, I>(records: I) -> Vec<&'a WeightRecord>
where
    I: IntoIterator<Item = &'a WeightRecord>,
{
    let mut ordered: Vec<_> = records.into_iter().collect();
    // stable: ties stay in insertion order
    ordered.sort_by_key(|record| record.date);
    ordered
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::Weight;

    fn record(id: &str, date: &str, kg: f64) -> WeightRecord {
        WeightRecord {
            id: id.into(),
            date: date.parse::<NaiveDate>().unwrap(),
            weight: Weight::new(kg).unwrap(),
            note: None,
        }
    }

    fn ids(ordered: &[&WeightRecord]) -> Vec<String> {
        ordered.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn sorts_ascending_by_date() {
        let records = vec![
            record("c", "2024-03-01", 4.4),
            record("a", "2023-12-24", 4.0),
            record("b", "2024-01-10", 4.2),
        ];

        let ordered = normalize(&records);

        assert_eq!(ordered.len(), records.len());
        assert_eq!(ids(&ordered), ["a", "b", "c"]);
        assert!(ordered.windows(2).all(|pair| pair[0].date <= pair[1].date));
    }

    #[test]
    fn same_date_keeps_insertion_order() {
        let records = vec![
            record("late", "2024-05-02", 4.1),
            record("first", "2024-05-01", 4.0),
            record("second", "2024-05-01", 4.3),
        ];

        let once = normalize(&records);
        let again = normalize(&records);

        assert_eq!(ids(&once), ["first", "second", "late"]);
        assert_eq!(ids(&once), ids(&again));
    }

    #[test]
    fn normalizing_twice_changes_nothing() {
        let records = vec![
            record("b", "2024-02-01", 4.0),
            record("a", "2024-01-01", 4.0),
            record("c", "2024-02-01", 4.1),
        ];

        let once = normalize(&records);
        let twice = normalize(once.iter().copied());

        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn empty_collection() {
        let records: Vec<WeightRecord> = Vec::new();
        assert!(normalize(&records).is_empty());
    }
}
