use std::{fs::File, io::BufReader, path::Path};

use jiff::civil::Time;
use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;

/// Parameters file, the actual parameters are nested under `Parameters`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct GeneratorParamsFile {
    pub parameters: GeneratorParams,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct GeneratorParams {
    pub vehicles: VehicleGeneratorParams,
    pub requests: RequestGeneratorParams,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct VehicleGeneratorParams {
    /// Inclusive.
    pub capacity_range: [u32; 2],
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct RequestGeneratorParams {
    pub latest_arrival_time: Time,
    /// Earliest departure of every request. Pre-departures are drawn after it.
    pub earliest_departure_time_range: Time,
    pub max_transfers: Vec<u32>,
    /// Inclusive.
    pub party_size_range: [u32; 2],
}

impl GeneratorParams {
    pub fn validate(&self) -> Result<(), GeneratorError> {
        check_range("CapacityRange", self.vehicles.capacity_range)?;
        check_range("PartySizeRange", self.requests.party_size_range)?;

        if self.requests.max_transfers.is_empty() {
            return Err(GeneratorError::EmptyMaxTransfers);
        }

        let earliest = self.requests.earliest_departure_time_range;
        let latest = self.requests.latest_arrival_time;
        if earliest > latest {
            return Err(GeneratorError::DepartureAfterArrival { earliest, latest });
        }

        Ok(())
    }
}

fn check_range(field: &'static str, [min, max]: [u32; 2]) -> Result<(), GeneratorError> {
    if min > max {
        return Err(GeneratorError::InvalidRange { field, min, max });
    }
    Ok(())
}

pub fn load_generator_params<P: AsRef<Path>>(path: P) -> Result<GeneratorParams, GeneratorError> {
    let file = File::open(path)?;
    let params: GeneratorParamsFile = serde_json::from_reader(BufReader::new(file))?;
    params.parameters.validate()?;
    Ok(params.parameters)
}
