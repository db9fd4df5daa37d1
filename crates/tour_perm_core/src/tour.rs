use std::fmt;

use rand::{Rng, seq::SliceRandom};

use crate::{
    Result, cost,
    model::{Minutes, StopId, matrix::TravelMatrix, stops::StopList},
};

/// Anchor-fixed visiting order. Position `0` and `len - 1` hold the anchor;
/// only the interior is ever rearranged.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tour {
    stops: Vec<StopId>,
}

impl Tour {
    pub fn from_stop_list(stops: &StopList) -> Self {
        Self {
            stops: stops.as_slice().to_vec(),
        }
    }

    /// Fresh tour `anchor, interior.., anchor`.
    pub fn with_interior(anchor: StopId, interior: &[StopId]) -> Self {
        let mut stops = Vec::with_capacity(interior.len() + 2);
        stops.push(anchor);
        stops.extend_from_slice(interior);
        stops.push(anchor);
        Self { stops }
    }

    pub fn stops(&self) -> &[StopId] {
        &self.stops
    }

    pub fn interior(&self) -> &[StopId] {
        &self.stops[1..self.stops.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn cost(&self, matrix: &TravelMatrix) -> Result<Minutes> {
        cost::tour_cost(&self.stops, matrix)
    }

    /// Writes this tour into `out` with positions `a..=b` reversed. The
    /// order of `a` and `b` does not matter.
    pub fn flip_into(&self, a: usize, b: usize, out: &mut Tour) {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        out.stops.clear();
        out.stops.extend_from_slice(&self.stops);
        out.stops[lo..=hi].reverse();
    }

    /// Overwrites this tour with `other` without reallocating.
    pub fn copy_from(&mut self, other: &Tour) {
        self.stops.clear();
        self.stops.extend_from_slice(&other.stops);
    }

    /// Uniformly reorders the interior, leaving both anchor slots in place.
    pub fn shuffle_interior<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let n = self.stops.len();
        if n > 3 {
            self.stops[1..n - 1].shuffle(rng);
        }
    }

    pub fn leg_metrics(&self, matrix: &TravelMatrix) -> Result<LegMetrics> {
        let legs = self.stops.len().saturating_sub(1);
        if legs == 0 {
            log::debug!("legs: n < 2 so there's nothing to report");
            return Ok(LegMetrics::default());
        }

        let mut total = 0;
        let mut longest = 0;
        for leg in self.stops.windows(2) {
            let travel = matrix.travel(leg[0], leg[1])?;
            total = cost::add_minutes(total, travel)?;
            longest = longest.max(travel);
        }
        let average = total as f64 / legs as f64;

        log::debug!("legs: n={legs} total_min={total} longest_min={longest} avg_min={average:.1}");

        Ok(LegMetrics {
            legs,
            total,
            longest,
            average,
        })
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.stops.iter().map(ToString::to_string).collect();
        write!(f, "{}", ids.join(" -> "))
    }
}

/// Walking-leg summary of a tour.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LegMetrics {
    pub legs: usize,
    pub total: Minutes,
    pub longest: Minutes,
    pub average: f64,
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::Tour;
    use crate::model::{grid::Grid, matrix::TravelMatrix, stops::StopList};

    #[test]
    fn with_interior_wraps_the_anchor_around() {
        let tour = Tour::with_interior(37, &[7, 15, 20]);
        assert_eq!(tour.stops(), &[37, 7, 15, 20, 37]);
        assert_eq!(tour.interior(), &[7, 15, 20]);
        assert_eq!(tour.to_string(), "37 -> 7 -> 15 -> 20 -> 37");
    }

    #[test]
    fn flip_reverses_inclusive_segment_in_either_order() {
        let tour = Tour::with_interior(0, &[4, 56, 34, 26, 87]);
        let mut forward = Tour::with_interior(0, &[]);
        let mut backward = Tour::with_interior(0, &[]);
        tour.flip_into(2, 4, &mut forward);
        tour.flip_into(4, 2, &mut backward);
        assert_eq!(forward.stops(), &[0, 4, 26, 34, 56, 87, 0]);
        assert_eq!(forward, backward);
        assert_eq!(tour.stops(), &[0, 4, 56, 34, 26, 87, 0]);
    }

    #[test]
    fn shuffle_keeps_anchors_and_the_same_stops() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut tour = Tour::with_interior(9, &[1, 2, 3, 4, 5, 6]);
        for _ in 0..20 {
            tour.shuffle_interior(&mut rng);
            assert_eq!(tour.stops()[0], 9);
            assert_eq!(tour.stops()[7], 9);
            let mut interior = tour.interior().to_vec();
            interior.sort_unstable();
            assert_eq!(interior, vec![1, 2, 3, 4, 5, 6]);
        }
    }

    #[test]
    fn leg_metrics_summarise_walking_legs() {
        let matrix = TravelMatrix::new(
            Grid::from_rows(vec![vec![0, 2, 6], vec![2, 0, 4], vec![6, 4, 0]], "m").expect("grid"),
        )
        .expect("matrix");
        let tour = Tour::from_stop_list(&StopList::new(vec![0, 1, 2, 0]).expect("stops"));
        let metrics = tour.leg_metrics(&matrix).expect("metrics");
        assert_eq!(metrics.legs, 3);
        assert_eq!(metrics.total, 12);
        assert_eq!(metrics.longest, 6);
        assert!((metrics.average - 4.0).abs() < 1e-9);
        assert_eq!(tour.cost(&matrix).expect("cost"), 12);
    }
}
