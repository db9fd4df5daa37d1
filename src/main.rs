use std::time::Instant;

use log::{debug, info};

use tour_perm_core::{
    PermutationEngine, Result, RouteContext, RunMode, RunOptions, UseCase,
    enumerate_and_aggregate, logging, output, refine_single_tour, shared_rng,
};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = RunOptions::from_args()?;
    logging::init_logger(&options)?;
    let use_case = UseCase::from_path(options.input_path())?
        .with_segment_length(options.segment_length_override());

    info!("input: {use_case}");
    info!("options: {options}");

    let matrix = use_case.travel_matrix()?;
    debug!("matrix: side={}\n{}", matrix.side(), matrix.grid());
    if let Some(path) = options.matrix_output_path() {
        output::write_artifact(path, &output::matrix_json(&matrix)?)?;
    }

    let ctx = RouteContext::new(
        &matrix,
        &use_case.waits,
        &use_case.service,
        &use_case.key,
        use_case.start,
        use_case.segment_length,
    )?;
    let mut rng = shared_rng(options.fixed_seed());

    let report = match options.mode {
        RunMode::Histogram => {
            let engine = PermutationEngine::new(options.max_interior);
            let table = enumerate_and_aggregate(
                &use_case.stops,
                &ctx,
                options.max_iterations,
                &engine,
                &mut rng,
            )?;
            if let Some(path) = options.results_json_path() {
                output::write_artifact(path, &output::histogram_json(&table)?)?;
            }
            output::render_histogram(&table)
        }
        RunMode::Itinerary => {
            let itinerary =
                refine_single_tour(&use_case.stops, &ctx, options.max_iterations, &mut rng)?;
            if let Some(path) = options.results_json_path() {
                output::write_artifact(path, &output::itinerary_json(&itinerary)?)?;
            }
            output::render_itinerary(&itinerary)
        }
    };

    output::write_report(options.output_path(), &report)?;

    info!(
        "output: stops={} time={:.2}s",
        use_case.stops.len(),
        now.elapsed().as_secs_f32()
    );

    Ok(())
}
