//! Text reports and JSON artifacts written at the end of a run.

use std::{fs, path::Path};

use serde::Serialize;

use crate::{
    Result,
    cost::clock_string,
    histogram::FrequencyTable,
    model::{Minutes, StopId, matrix::TravelMatrix},
    runner::Itinerary,
};

const MINUTES_PER_HOUR: f64 = 60.0;

#[derive(Debug, Serialize)]
struct VisitRecord {
    stop: StopId,
    arrival: Minutes,
    mount: Minutes,
    dismount: Minutes,
    arrival_clock: String,
    mount_clock: String,
    dismount_clock: String,
}

#[derive(Debug, Serialize)]
struct ItineraryRecord<'a> {
    tour: &'a [StopId],
    start_cost: Minutes,
    walking_cost: Minutes,
    gains: usize,
    start: Minutes,
    end: Minutes,
    duration: Minutes,
    visits: Vec<VisitRecord>,
}

impl<'a> From<&'a Itinerary> for ItineraryRecord<'a> {
    fn from(itinerary: &'a Itinerary) -> Self {
        let timeline = &itinerary.timeline;
        Self {
            tour: itinerary.tour().stops(),
            start_cost: itinerary.refined.start_cost,
            walking_cost: itinerary.refined.cost,
            gains: itinerary.refined.gains,
            start: timeline.start,
            end: timeline.end,
            duration: timeline.duration(),
            visits: timeline
                .visits
                .iter()
                .map(|visit| VisitRecord {
                    stop: visit.stop,
                    arrival: visit.arrival,
                    mount: visit.mount,
                    dismount: visit.dismount,
                    arrival_clock: clock_string(visit.arrival),
                    mount_clock: clock_string(visit.mount),
                    dismount_clock: clock_string(visit.dismount),
                })
                .collect(),
        }
    }
}

/// One `Total Time | Count` line per distinct duration, ascending, then a
/// summary line.
pub fn render_histogram(table: &FrequencyTable) -> String {
    let mut lines: Vec<String> = table
        .buckets()
        .iter()
        .map(|bucket| format!("Total Time: {} | Count: {}", bucket.duration, bucket.count))
        .collect();
    lines.push(format!(
        "Permutations: {}  min={} max={}",
        table.total(),
        table.min().unwrap_or_default(),
        table.max().unwrap_or_default()
    ));
    report(lines)
}

pub fn render_itinerary(itinerary: &Itinerary) -> String {
    let timeline = &itinerary.timeline;
    let duration = timeline.duration();

    let mut lines = vec![
        format!("Tour: {}", itinerary.tour()),
        format!(
            "Walking: {} min (from {} min, {} improvements)",
            itinerary.refined.cost, itinerary.refined.start_cost, itinerary.refined.gains
        ),
        format!("Start: {}", clock_string(timeline.start)),
    ];
    lines.extend(timeline.visits.iter().map(|visit| {
        format!(
            "  {:>4}  arrive {}  mount {}  dismount {}",
            visit.stop,
            clock_string(visit.arrival),
            clock_string(visit.mount),
            clock_string(visit.dismount)
        )
    }));
    lines.push(format!("End: {}", clock_string(timeline.end)));
    lines.push(format!(
        "Total Time: {duration} min ({:.2} h)",
        duration as f64 / MINUTES_PER_HOUR
    ));
    report(lines)
}

fn report(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn histogram_json(table: &FrequencyTable) -> Result<String> {
    Ok(serde_json::to_string_pretty(&table.buckets())?)
}

pub fn itinerary_json(itinerary: &Itinerary) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ItineraryRecord::from(
        itinerary,
    ))?)
}

/// `{"DistanceMatrix": [...]}` with one matrix row per line.
pub fn matrix_json(matrix: &TravelMatrix) -> Result<String> {
    let mut out = String::from("{\"DistanceMatrix\": [\n");
    let side = matrix.side();
    for (i, row) in matrix.grid().iter_rows().enumerate() {
        out.push_str(&serde_json::to_string(row)?);
        out.push_str(if i + 1 < side { ",\n" } else { "\n" });
    }
    out.push_str("]}\n");
    Ok(out)
}

/// Writes the report to `path`, or to stdout when no path is set.
pub fn write_report(path: Option<&Path>, report: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, report)?;
            log::info!("output: report={}", path.display());
        }
        None => print!("{report}"),
    }
    Ok(())
}

pub fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)?;
    log::info!("output: artifact={} bytes={}", path.display(), contents.len());
    Ok(())
}
