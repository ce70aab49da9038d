use std::path::PathBuf;

use thiserror::Error;

use crate::node::Node;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Malformed duration \"{value}\", expected \"<minutes> minutes\"")]
    MalformedDuration { value: String },
    #[error("Invalid day \"{value}\" on arc {origin} -> {destination}, expected YYYY-MM-DD")]
    InvalidDay {
        origin: String,
        destination: String,
        value: String,
    },
    #[error("Invalid time \"{value}\" on arc {origin} -> {destination}, expected HH:MM:SS")]
    InvalidTime {
        origin: String,
        destination: String,
        value: String,
    },
    #[error("Arc {origin} -> {destination} has no {field}")]
    MissingDeparture {
        origin: String,
        destination: String,
        field: &'static str,
    },
    #[error("Unsupported arc file {0}, expected a .csv or .json file")]
    UnsupportedFormat(PathBuf),
    #[error("Failed to read arc file")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse CSV arc file")]
    Csv(#[from] csv::Error),
    #[error("Failed to parse JSON arc file")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    #[error("No path from {origin} to {destination}")]
    PathNotFound { origin: Node, destination: Node },
}
