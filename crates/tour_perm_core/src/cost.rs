//! Pure cost functions: walking cost of a tour, time-segment bucketing and
//! interpolated queue waits.

use crate::{
    Error, Result,
    model::{
        Minutes, StopId,
        matrix::{TravelMatrix, WaitTable},
    },
};

const MINUTES_PER_HOUR: Minutes = 60;
const MINUTES_PER_DAY: Minutes = 24 * MINUTES_PER_HOUR;
const NOON_HOUR: Minutes = 12;

/// `a + b`, or a bounds error when the sum leaves the minute range.
pub fn add_minutes(a: Minutes, b: Minutes) -> Result<Minutes> {
    a.checked_add(b)
        .ok_or_else(|| Error::bounds(format!("{a} + {b} minutes overflows")))
}

/// Sum of consecutive travel times along `tour`.
pub fn tour_cost(tour: &[StopId], matrix: &TravelMatrix) -> Result<Minutes> {
    let mut total = 0;
    for leg in tour.windows(2) {
        total = add_minutes(total, matrix.travel(leg[0], leg[1])?)?;
    }
    Ok(total)
}

/// Number of whole segments elapsed between `start` and `current`.
pub fn time_segment(start: Minutes, current: Minutes, segment_length: Minutes) -> Result<usize> {
    if segment_length == 0 {
        return Err(Error::configuration("segment length must be > 0"));
    }
    let elapsed = current.checked_sub(start).ok_or_else(|| {
        Error::bounds(format!("time {current} is before the start time {start}"))
    })?;
    usize::try_from(elapsed / segment_length)
        .map_err(|_| Error::bounds(format!("segment for time {current} does not fit usize")))
}

/// Integer mean of the samples at `segment` and `segment + 1`, so a stop
/// visited between two samples gets their midpoint.
pub fn interpolated_wait(table: &WaitTable, dense: usize, segment: usize) -> Result<Minutes> {
    let next = segment.checked_add(1).ok_or_else(|| {
        Error::bounds(format!("segment {segment} has no successor"))
    })?;
    if next >= table.segments() {
        return Err(Error::bounds(format!(
            "wait lookup needs segment {next} but the table has {} segments",
            table.segments()
        )));
    }
    let a = table.sample(dense, segment)?;
    let b = table.sample(dense, next)?;
    Ok(add_minutes(a, b)? / 2)
}

/// `hh:mm AM|PM` for a minute offset since midnight. Offsets past one day
/// wrap around.
pub fn clock_string(minutes_since_midnight: Minutes) -> String {
    let minutes = minutes_since_midnight % MINUTES_PER_DAY;
    let mut hours = minutes / MINUTES_PER_HOUR;
    let mins = minutes % MINUTES_PER_HOUR;

    let meridiem = if hours >= NOON_HOUR { "PM" } else { "AM" };
    if hours > NOON_HOUR {
        hours -= NOON_HOUR;
    } else if hours == 0 {
        hours = NOON_HOUR;
    }

    format!("{hours:02}:{mins:02} {meridiem}")
}
