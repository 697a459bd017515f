use crate::model::Record;
use indexmap::IndexMap;

/// Records keyed by `rca`, kept in the order each key was first seen.
///
/// Inserting a record whose `rca` is already present replaces the stored
/// record wholesale (last write wins); the key keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: IndexMap<String, Record>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. Returns the record that was replaced, if any.
    pub fn insert(&mut self, record: Record) -> Option<Record> {
        self.records.insert(record.rca.clone(), record)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_vec(self) -> Vec<Record> {
        self.records.into_values().collect()
    }
}

impl Extend<Record> for RecordSet {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut set = RecordSet::new();
        set.extend(iter);
        set
    }
}

/// Collapse records sharing an `rca`, keeping the last occurrence of each.
pub fn dedupe(records: impl IntoIterator<Item = Record>) -> Vec<Record> {
    records.into_iter().collect::<RecordSet>().into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn record(rca: &str, name: &str, mix: u64) -> Record {
        Record {
            rca: rca.into(),
            name: name.into(),
            cli_posit: 0,
            mix,
            sales: Decimal::ZERO,
        }
    }

    #[test]
    fn test_empty() {
        assert!(dedupe(Vec::new()).is_empty());
    }

    #[test]
    fn test_last_write_wins_in_first_seen_order() {
        let out = dedupe(vec![
            record("1", "A", 1),
            record("2", "B", 2),
            record("1", "A2", 3),
            record("3", "C", 4),
            record("2", "B2", 5),
        ]);
        let keys: Vec<&str> = out.iter().map(|r| r.rca.as_str()).collect();
        assert_eq!(keys, vec!["1", "2", "3"]);
        assert_eq!(out[0], record("1", "A2", 3));
        assert_eq!(out[1], record("2", "B2", 5));
        assert_eq!(out[2], record("3", "C", 4));
    }

    #[test]
    fn test_insert_returns_replaced() {
        let mut set = RecordSet::new();
        assert!(set.insert(record("7", "X", 1)).is_none());
        let old = set.insert(record("7", "Y", 2)).unwrap();
        assert_eq!(old.name, "X");
        assert_eq!(set.len(), 1);
        assert_eq!(set.into_vec()[0].name, "Y");
    }

    #[test]
    fn test_replaced_key_keeps_first_position() {
        let mut set = RecordSet::new();
        set.insert(record("5", "E", 1));
        set.insert(record("6", "F", 2));
        set.insert(record("5", "E2", 3));
        assert!(!set.is_empty());
        let out = set.into_vec();
        assert_eq!(out[0], record("5", "E2", 3));
        assert_eq!(out[1].rca, "6");
    }

    #[test]
    fn test_empty_key_is_a_key() {
        let out = dedupe(vec![record("", "A", 1), record("", "B", 2)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "B");
    }
}
