use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::Args;
use courier_dispatch::solver::dispatch_params::{DispatchParams, Threads};
use courier_network::loader::load_time_dependent_graph;
use indicatif::{ProgressBar, ProgressStyle};
use jiff::civil::Date;
use tracing::{error, info};

use crate::{dispatch::dispatch_instance, file_utils::read_folder, parsers};

const ASSIGNMENT_SUFFIX: &str = ".assignment.json";

#[derive(Args)]
pub struct DispatchDatasetArgs {
    /// Instance file or folder of instance files
    #[arg(short, long)]
    dataset: PathBuf,

    /// Arc file shared by every instance
    #[arg(short, long, env = "COURIER_ARCS")]
    arcs: PathBuf,

    #[arg(long, env = "COURIER_SERVICE_DAY", value_parser = parsers::parse_day)]
    day: Option<Date>,

    #[arg(short, long, default_value_t = 1)]
    threads: usize,

    /// Output folder for the .assignment.json files
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: DispatchDatasetArgs) -> Result<(), anyhow::Error> {
    info!("Dispatching dataset {:?}", args.dataset);
    let paths = dataset_instances(&args.dataset)?;

    let graph = Arc::new(load_time_dependent_graph(&args.arcs)?);

    if let Some(output) = &args.output {
        std::fs::create_dir_all(output)?;
    }

    let bar = ProgressBar::new(paths.len() as u64);
    bar.set_style(ProgressStyle::default_bar().template("[{bar:40}] {pos}/{len} {msg}")?);

    let mut failures = 0;
    for path in &paths {
        bar.set_message(path.display().to_string());

        let params = DispatchParams {
            scoring_threads: Threads::from(Some(args.threads)),
            ..DispatchParams::default()
        };

        match dispatch_instance(path, Arc::clone(&graph), args.day, params) {
            Ok((problem, outcome)) => {
                info!(
                    "{}: {}/{} requests assigned",
                    path.display(),
                    outcome.assignment.total_assigned(),
                    problem.requests().len()
                );

                if let Some(output) = &args.output {
                    let stem = path
                        .file_stem()
                        .map_or_else(|| "instance".into(), |stem| stem.to_string_lossy());
                    let out = output.join(format!("{stem}{ASSIGNMENT_SUFFIX}"));
                    std::fs::write(out, serde_json::to_string_pretty(&outcome.assignment)?)?;
                }
            }
            Err(err) => {
                failures += 1;
                error!("{}: {err:#}", path.display());
            }
        }

        bar.inc(1);
    }

    bar.finish_and_clear();
    info!(
        "Dispatched {} instances, {} failed",
        paths.len() - failures,
        failures
    );

    Ok(())
}

/// Instance files of a dataset, leaving out assignments written by a previous run.
fn dataset_instances(dataset: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    if dataset.is_file() {
        return Ok(vec![dataset.to_path_buf()]);
    }

    let mut paths = read_folder(dataset, "json")?;
    paths.retain(|path| {
        !path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with(ASSIGNMENT_SUFFIX))
    });

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn test_dataset_instances_skip_assignments() {
        let dataset = env::current_dir().unwrap().join("tests/fixtures/dataset");

        assert_eq!(
            dataset_instances(&dataset).unwrap(),
            vec![dataset.join("morning.json")]
        );
        assert_eq!(
            dataset_instances(&dataset.join("morning.json")).unwrap(),
            vec![dataset.join("morning.json")]
        );
    }
}
