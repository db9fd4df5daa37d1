use crate::{
    Error, Result,
    model::{Minutes, StopId, grid::Grid, stops::StopKey},
};

/// Dense walking-time matrix indexed directly by stop id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TravelMatrix {
    grid: Grid<Minutes>,
}

impl TravelMatrix {
    pub fn new(grid: Grid<Minutes>) -> Result<Self> {
        if grid.rows() != grid.cols() {
            return Err(Error::invalid_input(format!(
                "travel matrix must be square, got {}x{}",
                grid.rows(),
                grid.cols()
            )));
        }
        Ok(Self { grid })
    }

    /// Spreads a `k x k` distance table, given in key order, over a square
    /// matrix of side `max_id + 1`. Cells for ids outside the key stay 0.
    pub fn from_key(key: &StopKey, distances: &Grid<Minutes>) -> Result<Self> {
        let k = key.len();
        if distances.rows() != k || distances.cols() != k {
            return Err(Error::invalid_input(format!(
                "distance matrix is {}x{}, attraction key has {k} entries",
                distances.rows(),
                distances.cols()
            )));
        }
        let side = key.max_id().map_or(0, |max| max + 1);

        let mut grid = Grid::filled(side, side)?;
        for (i, &from) in key.ids().iter().enumerate() {
            for (j, &to) in key.ids().iter().enumerate() {
                grid.set(from, to, distances.get(i, j)?)?;
            }
        }
        log::debug!("matrix: key={k} side={side}");
        Ok(Self { grid })
    }

    pub fn travel(&self, from: StopId, to: StopId) -> Result<Minutes> {
        self.grid.get(from, to)
    }

    pub fn side(&self) -> usize {
        self.grid.rows()
    }

    pub fn grid(&self) -> &Grid<Minutes> {
        &self.grid
    }
}

/// Average queue time per stop (dense index) and time segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaitTable {
    grid: Grid<Minutes>,
}

impl WaitTable {
    pub fn new(grid: Grid<Minutes>) -> Self {
        Self { grid }
    }

    /// All-zero table, for runs where queues are ignored.
    pub fn zeroed(stops: usize, segments: usize) -> Result<Self> {
        Ok(Self {
            grid: Grid::filled(stops, segments)?,
        })
    }

    pub fn sample(&self, dense: usize, segment: usize) -> Result<Minutes> {
        self.grid.get(dense, segment)
    }

    pub fn stops(&self) -> usize {
        self.grid.rows()
    }

    pub fn segments(&self) -> usize {
        self.grid.cols()
    }
}
