use std::{fs, path::Path};

use serde::Deserialize;
use tour_perm_derive::KvDisplay;

use crate::{
    Error, Result,
    model::{
        Minutes, StopId,
        grid::Grid,
        matrix::{TravelMatrix, WaitTable},
        stops::{ServiceDurations, StopKey, StopList},
    },
};

/// Everything a run needs, loaded from a use-case JSON document.
#[derive(Clone, Debug, KvDisplay)]
pub struct UseCase {
    #[kv(fmt = "len")]
    pub key: StopKey,
    pub stops: StopList,
    #[kv(skip)]
    pub distances: Grid<Minutes>,
    #[kv(skip)]
    pub waits: WaitTable,
    #[kv(fmt = "len")]
    pub service: ServiceDurations,
    pub start: Minutes,
    pub segment_length: Minutes,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawUseCase {
    attractions_to_include: Vec<String>,
    #[serde(rename = "Evaluate535Only", alias = "StopList")]
    stop_list: Vec<StopId>,
    distance_matrix: Vec<Vec<Minutes>>,
    wait_matrix: Vec<Vec<Minutes>>,
    ride_matrix: Vec<Minutes>,
    start: Minutes,
    timeslice_length: Minutes,
}

impl UseCase {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            Error::invalid_input(format!("failed to read use case {}: {e}", path.display()))
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let raw: RawUseCase = serde_json::from_str(text)?;

        let ids = raw
            .attractions_to_include
            .iter()
            .map(|label| parse_stop_label(label))
            .collect::<Result<Vec<_>>>()?;
        let key = StopKey::new(ids);
        let stops = StopList::new(raw.stop_list)?;
        key.check_covers(&stops)?;

        let distances = Grid::from_rows(raw.distance_matrix, "DistanceMatrix")?;
        let waits = WaitTable::new(Grid::from_rows(raw.wait_matrix, "WaitMatrix")?);
        if waits.stops() != key.len() {
            return Err(Error::invalid_input(format!(
                "WaitMatrix has {} rows, AttractionsToInclude has {} entries",
                waits.stops(),
                key.len()
            )));
        }
        if raw.ride_matrix.len() != key.len() {
            return Err(Error::invalid_input(format!(
                "RideMatrix has {} entries, AttractionsToInclude has {}",
                raw.ride_matrix.len(),
                key.len()
            )));
        }
        if raw.timeslice_length == 0 {
            return Err(Error::configuration("TimesliceLength must be > 0"));
        }

        Ok(Self {
            key,
            stops,
            distances,
            waits,
            service: ServiceDurations::new(raw.ride_matrix),
            start: raw.start,
            segment_length: raw.timeslice_length,
        })
    }

    pub fn with_segment_length(mut self, segment_length: Option<Minutes>) -> Self {
        if let Some(segment_length) = segment_length {
            self.segment_length = segment_length;
        }
        self
    }

    /// Dense, id-indexed travel matrix built from the key-ordered distances.
    pub fn travel_matrix(&self) -> Result<TravelMatrix> {
        TravelMatrix::from_key(&self.key, &self.distances)
    }
}

/// `"HS37"` -> `37`. Bare numbers are accepted as well.
pub fn parse_stop_label(label: &str) -> Result<StopId> {
    let digits = label.trim().trim_start_matches(|c: char| c.is_ascii_alphabetic());
    digits
        .parse()
        .map_err(|_| Error::invalid_input(format!("stop label {label:?} has no numeric id")))
}

#[cfg(test)]
mod tests {
    use super::{UseCase, parse_stop_label};
    use crate::Error;

    const SAMPLE: &str = r#"{
        "AttractionsToInclude": ["HS37", "HS104", "HS07", "HS37"],
        "Evaluate535Only": [37, 104, 7, 37],
        "DistanceMatrix": [[0, 5, 9, 0], [5, 0, 4, 5], [9, 4, 0, 9], [0, 5, 9, 0]],
        "WaitMatrix": [[0, 0, 0], [10, 20, 30], [6, 6, 6], [0, 0, 0]],
        "RideMatrix": [0, 4, 7, 0],
        "Start": 540,
        "TimesliceLength": 15
    }"#;

    #[test]
    fn parse_stop_label_strips_the_prefix() {
        assert_eq!(parse_stop_label("HS37").expect("label"), 37);
        assert_eq!(parse_stop_label("HS07").expect("label"), 7);
        assert_eq!(parse_stop_label("112").expect("label"), 112);
        assert!(matches!(parse_stop_label("HS"), Err(Error::InvalidInput(_))));
        assert!(parse_stop_label("HS1x").is_err());
    }

    #[test]
    fn from_json_reads_the_sample_use_case() {
        let use_case = UseCase::from_json(SAMPLE).expect("use case");
        assert_eq!(use_case.key.ids(), &[37, 104, 7, 37]);
        assert_eq!(use_case.stops.interior(), &[104, 7]);
        assert_eq!(use_case.start, 540);
        assert_eq!(use_case.segment_length, 15);
        assert_eq!(use_case.waits.segments(), 3);
        assert_eq!(use_case.service.get(2).expect("ride"), 7);

        let matrix = use_case.travel_matrix().expect("matrix");
        assert_eq!(matrix.side(), 105);
        assert_eq!(matrix.travel(37, 104).expect("37->104"), 5);
        assert_eq!(matrix.travel(104, 7).expect("104->7"), 4);
        assert_eq!(matrix.travel(7, 37).expect("7->37"), 9);
    }

    #[test]
    fn from_json_rejects_stops_missing_from_the_key() {
        let text = SAMPLE.replace("[37, 104, 7, 37]", "[37, 104, 8, 37]");
        let err = UseCase::from_json(&text).expect_err("stop 8 is unknown");
        assert!(err.to_string().contains("stop 8 is not in the attraction key"));
    }

    #[test]
    fn from_json_rejects_mismatched_ride_matrix() {
        let text = SAMPLE.replace("[0, 4, 7, 0]", "[0, 4, 7]");
        let err = UseCase::from_json(&text).expect_err("ride matrix too short");
        assert!(err.to_string().contains("RideMatrix has 3 entries"));
    }

    #[test]
    fn from_json_rejects_open_stop_lists_and_bad_json() {
        let text = SAMPLE.replace("[37, 104, 7, 37]", "[37, 104, 7]");
        assert!(matches!(UseCase::from_json(&text), Err(Error::Configuration(_))));
        assert!(matches!(UseCase::from_json("{"), Err(Error::Json(_))));
    }

    #[test]
    fn segment_length_override_replaces_the_use_case_value() {
        let use_case = UseCase::from_json(SAMPLE).expect("use case");
        assert_eq!(use_case.clone().with_segment_length(None).segment_length, 15);
        assert_eq!(use_case.with_segment_length(Some(30)).segment_length, 30);
    }

    #[test]
    fn display_summarises_without_the_matrices() {
        let text = UseCase::from_json(SAMPLE).expect("use case").to_string();
        assert!(text.contains("37 104 7 37"));
        assert!(!text.contains("distances"));
        assert!(text.contains("segment_length = 15"));
    }
}
