use std::{fs::File, io::BufReader, io::Read, path::Path};

use serde::Deserialize;
use tracing::{info, instrument};

use crate::{arc::ArcRecord, error::NetworkError, graph::TimeDependentGraph};

#[derive(Deserialize)]
struct JsonArcFile {
    arcs: Vec<ArcRecord>,
}

/// Reads arcs from a CSV file with a `From,To,Day,Time,Duration` header.
pub fn read_csv_arc_records<R: Read>(reader: R) -> Result<Vec<ArcRecord>, NetworkError> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    reader
        .into_deserialize::<ArcRecord>()
        .map(|row| row.map_err(NetworkError::from))
        .collect()
}

/// Reads arcs from a JSON document shaped as `{"arcs": [...]}`.
pub fn read_json_arc_records<R: Read>(reader: R) -> Result<Vec<ArcRecord>, NetworkError> {
    let file: JsonArcFile = serde_json::from_reader(reader)?;
    Ok(file.arcs)
}

/// Reads arc records, picking the format from the file extension.
#[instrument(skip_all, level = "debug")]
pub fn read_arc_records<P: AsRef<Path>>(path: P) -> Result<Vec<ArcRecord>, NetworkError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase);

    let reader = || -> Result<BufReader<File>, NetworkError> {
        Ok(BufReader::new(File::open(path)?))
    };

    match extension.as_deref() {
        Some("csv") => read_csv_arc_records(reader()?),
        Some("json") => read_json_arc_records(reader()?),
        _ => Err(NetworkError::UnsupportedFormat(path.to_path_buf())),
    }
}

#[instrument(skip_all, level = "debug")]
pub fn load_time_dependent_graph<P: AsRef<Path>>(
    path: P,
) -> Result<TimeDependentGraph, NetworkError> {
    let records = read_arc_records(&path)?;
    let graph = TimeDependentGraph::from_records(&records)?;

    info!(
        "Loaded {} arcs over {} nodes from {}",
        graph.arc_count(),
        graph.node_count(),
        path.as_ref().display()
    );

    Ok(graph)
}
