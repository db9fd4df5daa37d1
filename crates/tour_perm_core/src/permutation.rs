//! Duplicate-free enumeration of every interior ordering.
//!
//! Orderings come out in plain-change order: each one differs from the
//! previous by a single transposition, so the interior buffer is mutated in
//! place and no ordering is ever materialised twice.

use crate::{
    Error, Result,
    model::{Minutes, StopId},
    tour::Tour,
};

/// Largest interior accepted by default; `10!` is already 3.6M refinements.
pub const DEFAULT_MAX_INTERIOR: usize = 10;
const SLOW_RUN_PERMUTATIONS: usize = 100_000;

/// Refined duration recorded for one enumerated ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub permutation: usize,
    pub duration: Minutes,
}

/// `m!`, or `None` when it does not fit `usize`.
pub fn permutation_count(m: usize) -> Option<usize> {
    (2..=m).try_fold(1usize, |acc, k| acc.checked_mul(k))
}

#[derive(Clone, Copy, Debug)]
pub struct PermutationEngine {
    max_interior: usize,
}

impl Default for PermutationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_INTERIOR)
    }
}

impl PermutationEngine {
    pub fn new(max_interior: usize) -> Self {
        Self { max_interior }
    }

    /// Number of orderings for `m` interior stops, or a capacity error when
    /// `m` is past the configured limit.
    pub fn check_capacity(&self, m: usize) -> Result<usize> {
        if m > self.max_interior {
            return Err(Error::capacity(format!(
                "{m} interior stops exceed the limit of {} ({m}! orderings)",
                self.max_interior
            )));
        }
        permutation_count(m)
            .ok_or_else(|| Error::capacity(format!("{m}! orderings overflow usize")))
    }

    /// Calls `visit(index, ordering)` once per ordering of `interior`,
    /// starting with the identity. Returns how many orderings were visited.
    pub fn for_each<F>(&self, interior: &[StopId], mut visit: F) -> Result<usize>
    where
        F: FnMut(usize, &[StopId]) -> Result<()>,
    {
        let m = interior.len();
        self.check_capacity(m)?;

        let mut order = interior.to_vec();
        let mut visited = 0;
        visit(visited, &order)?;
        visited += 1;

        if m < 2 {
            return Ok(visited);
        }

        // control[s] counts the swaps already made at depth s
        let mut control = vec![0usize; m - 1];
        let mut cursor = Some(m - 2);

        while let Some(s) = cursor {
            if control[s] < m - s - 1 {
                control[s] += 1;
                if (m - s) % 2 == 1 {
                    order.swap(s, m - 1);
                } else {
                    order.swap(s, m - control[s]);
                }
                visit(visited, &order)?;
                visited += 1;
                cursor = Some(m - 2);
            } else {
                control[s] = 0;
                cursor = s.checked_sub(1);
            }
        }

        Ok(visited)
    }

    /// Builds a fresh anchored tour for every ordering, hands it to
    /// `evaluate` and records the returned duration.
    pub fn collect_outcomes<F>(
        &self,
        anchor: StopId,
        interior: &[StopId],
        mut evaluate: F,
    ) -> Result<Vec<Outcome>>
    where
        F: FnMut(&Tour) -> Result<Minutes>,
    {
        let m = interior.len();
        let count = self.check_capacity(m)?;
        if count > SLOW_RUN_PERMUTATIONS {
            log::warn!("enumerate: interior={m} permutations={count} may take a long time");
        } else {
            log::info!("enumerate: interior={m} permutations={count}");
        }

        let mut outcomes = Vec::new();
        outcomes.try_reserve_exact(count).map_err(|e| {
            Error::allocation(format!("outcome buffer for {count} permutations: {e}"))
        })?;

        let visited = self.for_each(interior, |permutation, ordering| {
            let tour = Tour::with_interior(anchor, ordering);
            let duration = evaluate(&tour)?;
            log::trace!("enumerate: permutation={permutation} tour=[{tour}] duration={duration}");
            outcomes.push(Outcome {
                permutation,
                duration,
            });
            Ok(())
        })?;

        debug_assert_eq!(visited, count);
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{PermutationEngine, permutation_count};
    use crate::{Error, model::StopId};

    fn orderings(m: usize) -> Vec<Vec<StopId>> {
        let interior: Vec<StopId> = (1..=m).collect();
        let mut seen = Vec::new();
        let visited = PermutationEngine::default()
            .for_each(&interior, |_, ordering| {
                seen.push(ordering.to_vec());
                Ok(())
            })
            .expect("enumerate");
        assert_eq!(visited, seen.len());
        seen
    }

    #[test]
    fn emits_m_factorial_distinct_orderings() {
        for m in 0..=6 {
            let seen = orderings(m);
            let expected = permutation_count(m).expect("small factorial");
            assert_eq!(seen.len(), expected, "m={m}");

            let distinct: HashSet<_> = seen.iter().cloned().collect();
            assert_eq!(distinct.len(), expected, "duplicate ordering for m={m}");

            for ordering in &seen {
                let mut sorted = ordering.clone();
                sorted.sort_unstable();
                assert_eq!(sorted, (1..=m).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn first_ordering_is_the_identity() {
        let seen = orderings(4);
        assert_eq!(seen[0], vec![1, 2, 3, 4]);
    }

    #[test]
    fn consecutive_orderings_differ_by_one_transposition() {
        let seen = orderings(5);
        for pair in seen.windows(2) {
            let moved = pair[0]
                .iter()
                .zip(&pair[1])
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(moved, 2, "{:?} -> {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn degenerate_interiors_yield_one_ordering() {
        assert_eq!(orderings(0), vec![Vec::<StopId>::new()]);
        assert_eq!(orderings(1), vec![vec![1]]);
    }

    #[test]
    fn permutation_count_matches_factorial() {
        assert_eq!(permutation_count(0), Some(1));
        assert_eq!(permutation_count(1), Some(1));
        assert_eq!(permutation_count(5), Some(120));
        assert_eq!(permutation_count(10), Some(3_628_800));
        assert_eq!(permutation_count(200), None);
    }

    #[test]
    fn interiors_past_the_limit_are_refused_before_enumerating() {
        let engine = PermutationEngine::new(3);
        let mut calls = 0;
        let err = engine
            .for_each(&[1, 2, 3, 4], |_, _| {
                calls += 1;
                Ok(())
            })
            .expect_err("4 > 3");
        assert!(matches!(err, Error::Capacity(_)));
        assert_eq!(calls, 0);
    }

    #[test]
    fn collect_outcomes_builds_anchored_tours_and_indexes_them() {
        let outcomes = PermutationEngine::default()
            .collect_outcomes(9, &[1, 2, 3], |tour| {
                assert_eq!(tour.stops()[0], 9);
                assert_eq!(tour.stops()[4], 9);
                Ok(tour.interior()[0] as u64)
            })
            .expect("outcomes");
        assert_eq!(outcomes.len(), 6);
        for (idx, outcome) in outcomes.iter().enumerate() {
            assert_eq!(outcome.permutation, idx);
        }
        let firsts: Vec<u64> = outcomes.iter().map(|o| o.duration).collect();
        assert_eq!(firsts.iter().filter(|&&d| d == 1).count(), 2);
        assert_eq!(firsts.iter().filter(|&&d| d == 3).count(), 2);
    }

    #[test]
    fn collect_outcomes_stops_at_the_first_evaluation_error() {
        let mut calls = 0;
        let err = PermutationEngine::default()
            .collect_outcomes(0, &[1, 2, 3], |_| {
                calls += 1;
                if calls == 3 {
                    Err(Error::bounds("lookup failed"))
                } else {
                    Ok(1)
                }
            })
            .expect_err("third evaluation fails");
        assert!(matches!(err, Error::Bounds(_)));
        assert_eq!(calls, 3);
    }
}
