use std::collections::HashMap;

use serde::Serialize;

use crate::{model::Minutes, permutation::Outcome};

/// Occurrences of each refined duration across all enumerated orderings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<Minutes, usize>,
    total: usize,
}

/// One row of a [`FrequencyTable`], as persisted to JSON.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub duration: Minutes,
    pub count: usize,
}

impl FrequencyTable {
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        Self::from_durations(outcomes.iter().map(|o| o.duration))
    }

    pub fn from_durations(durations: impl IntoIterator<Item = Minutes>) -> Self {
        let durations = durations.into_iter();
        let mut table = Self {
            counts: HashMap::with_capacity(durations.size_hint().0),
            total: 0,
        };
        for duration in durations {
            *table.counts.entry(duration).or_default() += 1;
            table.total += 1;
        }
        log::debug!(
            "histogram: distinct={} total={}",
            table.counts.len(),
            table.total
        );
        table
    }

    pub fn count(&self, duration: Minutes) -> usize {
        self.counts.get(&duration).copied().unwrap_or(0)
    }

    /// Sum of all counts, i.e. the number of outcomes aggregated.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Unordered `(duration, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Minutes, usize)> + '_ {
        self.counts.iter().map(|(&d, &c)| (d, c))
    }

    /// Buckets ordered by ascending duration.
    pub fn buckets(&self) -> Vec<Bucket> {
        let mut buckets: Vec<Bucket> = self
            .iter()
            .map(|(duration, count)| Bucket { duration, count })
            .collect();
        buckets.sort_unstable_by_key(|b| b.duration);
        buckets
    }

    pub fn min(&self) -> Option<Minutes> {
        self.counts.keys().min().copied()
    }

    pub fn max(&self) -> Option<Minutes> {
        self.counts.keys().max().copied()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{Bucket, FrequencyTable};
    use crate::permutation::Outcome;

    #[test]
    fn counts_each_distinct_duration_once() {
        let table = FrequencyTable::from_durations([90, 75, 90, 120, 75, 90]);
        let pairs: HashSet<(u64, usize)> = table.iter().collect();
        assert_eq!(pairs, HashSet::from([(75, 2), (90, 3), (120, 1)]));
        assert_eq!(table.total(), 6);
        assert_eq!(table.distinct(), 3);
        assert_eq!(table.count(60), 0);
    }

    #[test]
    fn counts_sum_to_the_number_of_outcomes() {
        let outcomes: Vec<Outcome> = (0..24)
            .map(|permutation| Outcome {
                permutation,
                duration: (permutation as u64 % 5) * 10,
            })
            .collect();
        let table = FrequencyTable::from_outcomes(&outcomes);
        assert_eq!(table.iter().map(|(_, c)| c).sum::<usize>(), 24);
        assert_eq!(table.total(), 24);
    }

    #[test]
    fn buckets_are_sorted_by_duration() {
        let table = FrequencyTable::from_durations([300, 100, 200, 100]);
        assert_eq!(
            table.buckets(),
            vec![
                Bucket { duration: 100, count: 2 },
                Bucket { duration: 200, count: 1 },
                Bucket { duration: 300, count: 1 },
            ]
        );
        assert_eq!(table.min(), Some(100));
        assert_eq!(table.max(), Some(300));
    }

    #[test]
    fn empty_input_gives_an_empty_table() {
        let table = FrequencyTable::from_durations(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.min(), None);
    }
}
