use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::Args;
use comfy_table::Table;
use courier_dispatch::{
    json::types::load_instance,
    problem::dispatch_problem::DispatchProblem,
    solver::{
        dispatch_params::{DEFAULT_DAY_START, DispatchParams, Threads},
        dispatcher::{DispatchOutcome, Dispatcher},
    },
};
use courier_network::{graph::TimeDependentGraph, loader::load_time_dependent_graph};
use jiff::civil::{Date, Time};
use tracing::{info, warn};

use crate::parsers;

#[derive(Args)]
pub struct DispatchArgs {
    /// Instance JSON file
    #[arg(short, long)]
    instance: PathBuf,

    /// Arc file, .csv or .json
    #[arg(short, long, env = "COURIER_ARCS")]
    arcs: PathBuf,

    /// Day instance times refer to (default: first day of the arcs)
    #[arg(long, env = "COURIER_SERVICE_DAY", value_parser = parsers::parse_day)]
    day: Option<Date>,

    /// Time every vehicle starts at
    #[arg(long, value_parser = parsers::parse_time, default_value_t = DEFAULT_DAY_START)]
    day_start: Time,

    /// Threads used to score vehicles
    #[arg(short, long, default_value_t = 1)]
    threads: usize,

    /// Output file for the assignment, printed to stdout when missing
    #[arg(short, long)]
    out: Option<PathBuf>,
}

pub fn run(args: DispatchArgs) -> Result<(), anyhow::Error> {
    let graph = Arc::new(load_time_dependent_graph(&args.arcs)?);
    let params = DispatchParams {
        day_start: args.day_start,
        scoring_threads: Threads::from(Some(args.threads)),
    };

    let (problem, outcome) = dispatch_instance(&args.instance, graph, args.day, params)?;

    print_summary(&problem, &outcome);

    let json = serde_json::to_string_pretty(&outcome.assignment)?;
    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&out, json)?;
            info!("Assignment written to {}", out.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

pub fn dispatch_instance(
    instance: &Path,
    graph: Arc<TimeDependentGraph>,
    day: Option<Date>,
    params: DispatchParams,
) -> Result<(Arc<DispatchProblem>, DispatchOutcome), anyhow::Error> {
    let problem = Arc::new(load_instance(instance)?.build_problem(graph, day)?);
    info!(
        "Dispatching {} requests with {} vehicles on {}",
        problem.requests().len(),
        problem.vehicles().len(),
        problem.service_day()
    );

    let outcome = Dispatcher::new(Arc::clone(&problem), params)?.run();

    Ok((problem, outcome))
}

pub fn print_summary(problem: &DispatchProblem, outcome: &DispatchOutcome) {
    let mut table = Table::new();
    table.set_header(vec!["Vehicle", "Requests", "Seats left", "Location", "Free at"]);

    for (index, vehicle) in problem.vehicles().iter().enumerate() {
        let state = &outcome.final_states[index];
        let requests = outcome
            .assignment
            .records_by_name(vehicle.name())
            .map_or(0, <[_]>::len);

        table.add_row(vec![
            vehicle.name().to_owned(),
            requests.to_string(),
            state.capacity().to_string(),
            state.location().to_string(),
            state.time().time().to_string(),
        ]);
    }

    println!("{table}");

    if !outcome.unassigned.is_empty() {
        let names: Vec<&str> = outcome
            .unassigned
            .iter()
            .map(|&request_idx| problem.request(request_idx).name())
            .collect();
        warn!("Unassigned requests: {}", names.join(", "));
    }
}
