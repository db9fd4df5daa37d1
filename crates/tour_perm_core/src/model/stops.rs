use std::{collections::HashMap, fmt};

use crate::{
    Error, Result,
    model::{Minutes, StopId},
};

/// Closed route: first and last entries are the same anchor stop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StopList {
    stops: Vec<StopId>,
}

impl StopList {
    pub fn new(stops: Vec<StopId>) -> Result<Self> {
        if stops.len() < 2 {
            return Err(Error::configuration(format!(
                "stop list needs at least 2 entries, got {}",
                stops.len()
            )));
        }
        let (first, last) = (stops[0], stops[stops.len() - 1]);
        if first != last {
            return Err(Error::configuration(format!(
                "stop list must start and end at the same anchor, got {first} and {last}"
            )));
        }
        Ok(Self { stops })
    }

    pub fn anchor(&self) -> StopId {
        self.stops[0]
    }

    pub fn interior(&self) -> &[StopId] {
        &self.stops[1..self.stops.len() - 1]
    }

    pub fn as_slice(&self) -> &[StopId] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

impl fmt::Display for StopList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.stops.iter().map(ToString::to_string).collect();
        write!(f, "{}", ids.join(" "))
    }
}

/// Maps sparse stop ids to the dense row index shared by the distance,
/// wait and ride tables. The first occurrence of an id wins.
#[derive(Clone, Debug, Default)]
pub struct StopKey {
    order: Vec<StopId>,
    dense: HashMap<StopId, usize>,
}

impl StopKey {
    pub fn new(order: Vec<StopId>) -> Self {
        let mut dense = HashMap::with_capacity(order.len());
        for (idx, &id) in order.iter().enumerate() {
            dense.entry(id).or_insert(idx);
        }
        Self { order, dense }
    }

    pub fn dense_index(&self, id: StopId) -> Result<usize> {
        self.dense
            .get(&id)
            .copied()
            .ok_or_else(|| Error::configuration(format!("stop {id} is not in the attraction key")))
    }

    pub fn ids(&self) -> &[StopId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn max_id(&self) -> Option<StopId> {
        self.order.iter().copied().max()
    }

    /// Every stop of the route must resolve, otherwise the timeline walk
    /// would fail halfway through a run.
    pub fn check_covers(&self, stops: &StopList) -> Result<()> {
        for &id in stops.as_slice() {
            self.dense_index(id)?;
        }
        Ok(())
    }
}

/// Fixed time spent at each stop once mounted, by dense index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceDurations(Vec<Minutes>);

impl ServiceDurations {
    pub fn new(durations: Vec<Minutes>) -> Self {
        Self(durations)
    }

    pub fn get(&self, dense: usize) -> Result<Minutes> {
        self.0.get(dense).copied().ok_or_else(|| {
            Error::bounds(format!(
                "service duration index {dense} >= {} entries",
                self.0.len()
            ))
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
