use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    Result,
    histogram::FrequencyTable,
    model::{Minutes, context::RouteContext, stops::StopList},
    permutation::{Outcome, PermutationEngine},
    refine::{LocalSearch, Refined, Timeline},
    tour::Tour,
};

/// Refined tour of a single stop list together with its timed walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Itinerary {
    pub refined: Refined,
    pub timeline: Timeline,
}

impl Itinerary {
    pub fn tour(&self) -> &Tour {
        &self.refined.tour
    }

    pub fn duration(&self) -> Minutes {
        self.timeline.duration()
    }
}

/// The single generator shared by every refinement of a run. `None` seeds it
/// from OS entropy.
pub fn shared_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            log::debug!("rng: seed={seed}");
            StdRng::seed_from_u64(seed)
        }
        None => {
            log::debug!("rng: seed=entropy");
            StdRng::from_entropy()
        }
    }
}

/// Refines `tour` and walks the best order found. The returned duration
/// includes travel, queueing and service time.
pub fn evaluate_tour<R: Rng + ?Sized>(
    tour: &Tour,
    ctx: &RouteContext<'_>,
    search: &LocalSearch,
    rng: &mut R,
) -> Result<Itinerary> {
    let refined = search.refine(tour, ctx.matrix, rng)?;
    let timeline = Timeline::walk(&refined.tour, ctx)?;
    Ok(Itinerary { refined, timeline })
}

/// Refines every interior ordering of `stops` and returns one outcome per
/// ordering, in enumeration order.
pub fn enumerate_outcomes<R: Rng + ?Sized>(
    stops: &StopList,
    ctx: &RouteContext<'_>,
    max_iterations: usize,
    engine: &PermutationEngine,
    rng: &mut R,
) -> Result<Vec<Outcome>> {
    engine.check_capacity(stops.interior().len())?;
    ctx.key.check_covers(stops)?;
    Tour::from_stop_list(stops).cost(ctx.matrix)?;

    let search = LocalSearch::new(max_iterations);
    engine.collect_outcomes(stops.anchor(), stops.interior(), |tour| {
        Ok(evaluate_tour(tour, ctx, &search, &mut *rng)?.duration())
    })
}

/// Enumerates, refines and aggregates the refined durations of every
/// interior ordering of `stops`.
pub fn enumerate_and_aggregate<R: Rng + ?Sized>(
    stops: &StopList,
    ctx: &RouteContext<'_>,
    max_iterations: usize,
    engine: &PermutationEngine,
    rng: &mut R,
) -> Result<FrequencyTable> {
    let outcomes = enumerate_outcomes(stops, ctx, max_iterations, engine, rng)?;
    let table = FrequencyTable::from_outcomes(&outcomes);
    log::info!(
        "histogram: permutations={} distinct={} min={} max={}",
        table.total(),
        table.distinct(),
        table.min().unwrap_or_default(),
        table.max().unwrap_or_default()
    );
    Ok(table)
}

/// Refines the stop list as given and reports the detailed itinerary.
pub fn refine_single_tour<R: Rng + ?Sized>(
    stops: &StopList,
    ctx: &RouteContext<'_>,
    max_iterations: usize,
    rng: &mut R,
) -> Result<Itinerary> {
    ctx.key.check_covers(stops)?;
    let itinerary = evaluate_tour(
        &Tour::from_stop_list(stops),
        ctx,
        &LocalSearch::new(max_iterations),
        rng,
    )?;
    let legs = itinerary.tour().leg_metrics(ctx.matrix)?;
    log::info!(
        "itinerary: start_cost={} walking_cost={} gains={} longest_leg={} duration={}",
        itinerary.refined.start_cost,
        itinerary.refined.cost,
        itinerary.refined.gains,
        legs.longest,
        itinerary.duration()
    );
    Ok(itinerary)
}
