//! Bounded local search over a single tour.
//!
//! Historically called "lin", but this is not Lin-Kernighan: there are no
//! sequential edge-exchange chains. Each iteration reverses one random
//! interior segment (a 2-opt move). An improving move updates the best tour,
//! and the working tour restarts from a shuffled copy of the best one. The
//! loop always runs the full budget.

use rand::Rng;

use crate::{
    Result, cost,
    model::{Minutes, StopId, context::RouteContext, matrix::TravelMatrix},
    tour::Tour,
};

/// Iteration budget used when none is configured.
pub const DEFAULT_MAX_ITERATIONS: usize = 1_000;

/// Randomised segment-reversal search with a fixed budget.
#[derive(Clone, Copy, Debug)]
pub struct LocalSearch {
    max_iterations: usize,
}

/// Result of [`LocalSearch::refine`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Refined {
    pub tour: Tour,
    pub cost: Minutes,
    pub start_cost: Minutes,
    /// Candidate moves that beat the working tour.
    pub gains: usize,
}

impl Default for LocalSearch {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITERATIONS)
    }
}

impl LocalSearch {
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    /// Never returns a cost above the cost of `tour`.
    pub fn refine<R: Rng + ?Sized>(
        &self,
        tour: &Tour,
        matrix: &TravelMatrix,
        rng: &mut R,
    ) -> Result<Refined> {
        // Also proves every stop id is inside the matrix; moves only permute them.
        let start_cost = tour.cost(matrix)?;
        let mut best = tour.clone();
        let mut best_cost = start_cost;
        let mut gains = 0;

        if tour.interior().len() < 2 || self.max_iterations == 0 {
            return Ok(Refined {
                tour: best,
                cost: best_cost,
                start_cost,
                gains,
            });
        }

        let mut current = tour.clone();
        let mut current_cost = start_cost;
        let mut candidate = tour.clone();

        for _ in 0..self.max_iterations {
            let (p1, p2) = draw_move(rng, current.len());
            current.flip_into(p1, p2, &mut candidate);
            let candidate_cost = candidate.cost(matrix)?;

            if candidate_cost >= current_cost {
                continue;
            }

            gains += 1;
            if candidate_cost < best_cost {
                best.copy_from(&candidate);
                best_cost = candidate_cost;
            }
            current.copy_from(&best);
            current.shuffle_interior(rng);
            current_cost = current.cost(matrix)?;
        }

        log::trace!("refine: start_cost={start_cost} best_cost={best_cost} gains={gains}");

        Ok(Refined {
            tour: best,
            cost: best_cost,
            start_cost,
            gains,
        })
    }
}

/// Two distinct interior positions of a tour of length `len`, drawn
/// uniformly from `1..=len - 2`. Needs at least two interior positions.
pub fn draw_move<R: Rng + ?Sized>(rng: &mut R, len: usize) -> (usize, usize) {
    debug_assert!(len >= 4, "need two interior positions, tour length is {len}");
    let last_interior = len - 2;
    let p1 = rng.gen_range(1..=last_interior);
    let mut p2 = p1;
    while p2 == p1 {
        p2 = rng.gen_range(1..=last_interior);
    }
    (p1, p2)
}

/// Arrival, service start and service end at one stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StopVisit {
    pub stop: StopId,
    pub arrival: Minutes,
    pub mount: Minutes,
    pub dismount: Minutes,
}

/// Timed walk of a tour from leaving the anchor to returning to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timeline {
    pub start: Minutes,
    pub visits: Vec<StopVisit>,
    pub end: Minutes,
}

impl Timeline {
    /// Walks `tour` once: travel to each interior stop, queue for the
    /// interpolated wait of the segment the arrival falls in, then ride.
    pub fn walk(tour: &Tour, ctx: &RouteContext<'_>) -> Result<Self> {
        let stops = tour.stops();
        let mut visits = Vec::with_capacity(tour.interior().len());
        let mut off_time = ctx.start;

        for leg in stops.windows(2).take(stops.len().saturating_sub(2)) {
            let (prev, stop) = (leg[0], leg[1]);
            let dense = ctx.key.dense_index(stop)?;
            let arrival = cost::add_minutes(off_time, ctx.matrix.travel(prev, stop)?)?;
            let segment = cost::time_segment(ctx.start, arrival, ctx.segment_length)?;
            let mount =
                cost::add_minutes(arrival, cost::interpolated_wait(ctx.waits, dense, segment)?)?;
            let dismount = cost::add_minutes(mount, ctx.service.get(dense)?)?;
            visits.push(StopVisit {
                stop,
                arrival,
                mount,
                dismount,
            });
            off_time = dismount;
        }

        let end = match stops {
            [.., last_interior, anchor] => {
                cost::add_minutes(off_time, ctx.matrix.travel(*last_interior, *anchor)?)?
            }
            _ => off_time,
        };

        Ok(Self {
            start: ctx.start,
            visits,
            end,
        })
    }

    pub fn duration(&self) -> Minutes {
        self.end - self.start
    }
}
