use jiff::civil::{DateTime, Time};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstanceError {
    #[error("{entity} is missing its {field}")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },
    #[error("Vehicle name \"{0}\" is used more than once")]
    DuplicateVehicle(String),
    #[error("Request name \"{0}\" is used more than once")]
    DuplicateRequest(String),
    #[error("Request \"{request}\" has an empty time window: earliest {earliest} is after latest {latest}")]
    InvalidTimeWindow {
        request: String,
        earliest: DateTime,
        latest: DateTime,
    },
    #[error("Failed to read instance file")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse instance file")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Failed to build the scoring thread pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("The network needs at least two connected cities to generate requests")]
    NotEnoughCities,
    #[error("Invalid {field} range [{min}, {max}]")]
    InvalidRange {
        field: &'static str,
        min: u32,
        max: u32,
    },
    #[error("EarliestDepartureTimeRange {earliest} is after LatestArrivalTime {latest}")]
    DepartureAfterArrival { earliest: Time, latest: Time },
    #[error("MaxTransfers must list at least one value")]
    EmptyMaxTransfers,
    #[error("Failed to read generator parameters")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse generator parameters")]
    Json(#[from] serde_json::Error),
}
