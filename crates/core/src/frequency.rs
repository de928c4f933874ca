//! Label frequency tables (tags, categories, title words).

use std::collections::HashMap;

/// Occurrence counts per label, remembering first-seen order.
///
/// Every occurrence counts: a label repeated within one record is counted
/// once per repetition.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    /// `(label, count)` in first-seen order.
    entries: Vec<(String, usize)>,
    positions: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a sequence of label sequences (one per record).
    pub fn from_sequences<I, S>(sequences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        let mut table = Self::new();
        for sequence in sequences {
            for label in sequence {
                table.add(label.as_ref());
            }
        }
        table
    }

    /// Record one occurrence of `label`.
    pub fn add(&mut self, label: &str) {
        match self.positions.get(label) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.positions.insert(label.to_string(), self.entries.len());
                self.entries.push((label.to_string(), 1));
            }
        }
    }

    /// Occurrences of `label` (0 when never seen).
    pub fn count(&self, label: &str) -> usize {
        self.positions
            .get(label)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total_occurrences(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// The `n` most frequent labels by descending count; ties keep
    /// first-seen order.
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut sorted: Vec<(&str, usize)> = self
            .entries
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
            .collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(n);
        sorted
    }

    /// Labels of [`most_common`](Self::most_common), without counts.
    pub fn top_labels(&self, n: usize) -> Vec<&str> {
        self.most_common(n).into_iter().map(|(l, _)| l).collect()
    }
}

/// `count / record_count * 100`; 0 when there are no records.
///
/// The denominator is the number of records, not the number of label
/// occurrences.
pub fn percentage_of_records(count: usize, record_count: usize) -> f64 {
    if record_count == 0 {
        0.0
    } else {
        count as f64 / record_count as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_every_occurrence() {
        let table = FrequencyTable::from_sequences(vec![
            vec!["rust", "rust", "async"],
            vec!["rust"],
            vec![],
        ]);
        assert_eq!(table.count("rust"), 3);
        assert_eq!(table.count("async"), 1);
        assert_eq!(table.count("missing"), 0);
        assert_eq!(table.total_occurrences(), 4);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn most_common_breaks_ties_by_first_seen() {
        let table = FrequencyTable::from_sequences(vec![
            vec!["b", "a"],
            vec!["c", "a", "b"],
            vec!["d"],
        ]);
        assert_eq!(
            table.most_common(10),
            vec![("b", 2), ("a", 2), ("c", 1), ("d", 1)]
        );
        assert_eq!(table.top_labels(2), vec!["b", "a"]);
    }

    #[test]
    fn most_common_on_empty_table() {
        let table = FrequencyTable::new();
        assert!(table.is_empty());
        assert!(table.most_common(5).is_empty());
    }

    #[test]
    fn percentage_uses_record_count() {
        // 3 occurrences across 2 records: 150% of records.
        assert_eq!(percentage_of_records(3, 2), 150.0);
        assert_eq!(percentage_of_records(1, 4), 25.0);
        assert_eq!(percentage_of_records(1, 0), 0.0);
    }

    #[test]
    fn accepts_owned_strings() {
        let tags = vec![vec!["x".to_string()], vec!["x".to_string()]];
        let table = FrequencyTable::from_sequences(&tags);
        assert_eq!(table.count("x"), 2);
    }
}
