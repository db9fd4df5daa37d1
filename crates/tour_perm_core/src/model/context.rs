use crate::{
    Error, Result,
    model::{
        Minutes,
        matrix::{TravelMatrix, WaitTable},
        stops::{ServiceDurations, StopKey},
    },
};

/// Read-only inputs every evaluation borrows: travel times, queue samples,
/// service durations and the clock parameters.
#[derive(Clone, Copy, Debug)]
pub struct RouteContext<'a> {
    pub matrix: &'a TravelMatrix,
    pub waits: &'a WaitTable,
    pub service: &'a ServiceDurations,
    pub key: &'a StopKey,
    pub start: Minutes,
    pub segment_length: Minutes,
}

impl<'a> RouteContext<'a> {
    pub fn new(
        matrix: &'a TravelMatrix,
        waits: &'a WaitTable,
        service: &'a ServiceDurations,
        key: &'a StopKey,
        start: Minutes,
        segment_length: Minutes,
    ) -> Result<Self> {
        if segment_length == 0 {
            return Err(Error::configuration("segment length must be > 0"));
        }
        if waits.stops() < key.len() {
            return Err(Error::invalid_input(format!(
                "wait table has {} rows, attraction key has {} entries",
                waits.stops(),
                key.len()
            )));
        }
        if service.len() < key.len() {
            return Err(Error::invalid_input(format!(
                "{} service durations for {} attractions",
                service.len(),
                key.len()
            )));
        }
        Ok(Self {
            matrix,
            waits,
            service,
            key,
            start,
            segment_length,
        })
    }
}
