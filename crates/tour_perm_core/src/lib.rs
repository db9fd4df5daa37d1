//! Exhaustive evaluation of theme-park tours: every interior ordering of a
//! fixed stop list is refined with randomized segment reversal, timed
//! against queue and ride durations, and tallied into a duration histogram.

mod cost;
mod error;
mod histogram;
mod io;
pub mod logging;
mod model;
mod permutation;
mod refine;
mod runner;
mod tour;

pub(crate) use io::options;

pub use cost::clock_string;
pub use error::{Error, Result};
pub use histogram::{Bucket, FrequencyTable};
pub use io::input::UseCase;
pub use io::options::{LogFormat, LogLevel, RunMode, RunOptions};
pub use io::output;
pub use model::{Minutes, StopId, context::RouteContext, matrix::TravelMatrix};
pub use permutation::{Outcome, PermutationEngine};
pub use refine::{LocalSearch, Refined, StopVisit, Timeline};
pub use runner::{
    Itinerary, enumerate_and_aggregate, enumerate_outcomes, evaluate_tour, refine_single_tour,
    shared_rng,
};
pub use tour::Tour;
