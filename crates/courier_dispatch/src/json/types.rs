use std::{fs::File, io::BufReader, path::Path, sync::Arc};

use courier_network::{graph::TimeDependentGraph, node::Node};
use jiff::civil::{Date, Time};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    error::InstanceError,
    problem::{
        dispatch_problem::{DispatchProblem, DispatchProblemBuilder, resolve_service_day},
        request::{Request, RequestBuilder},
        vehicle::{Vehicle, VehicleBuilder},
    },
};

/// Instance file: a fleet and the requests to dispatch. Times are wall-clock `HH:MM:SS` on
/// the service day.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "PascalCase", rename = "Instance")]
pub struct JsonInstance {
    pub vehicles: Vec<JsonVehicle>,
    pub requests: Vec<JsonRequest>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "PascalCase", rename = "Vehicle")]
pub struct JsonVehicle {
    pub name: String,
    pub capacity: u32,
    pub origin: String,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "PascalCase", rename = "Request")]
pub struct JsonRequest {
    pub name: String,
    #[schemars(with = "String")]
    pub earliest: Time,
    #[schemars(with = "String")]
    pub pre_departure: Time,
    #[schemars(with = "String")]
    pub pre_arrival: Time,
    #[schemars(with = "String")]
    pub latest: Time,
    pub max_transfer: u32,
    pub party_size: u32,
    pub origin: String,
    pub destination: String,
}

impl JsonVehicle {
    fn to_vehicle(&self) -> Result<Vehicle, InstanceError> {
        let mut builder = VehicleBuilder::default();
        builder
            .set_name(self.name.clone())
            .set_capacity(self.capacity)
            .set_origin(Node::from(self.origin.as_str()));
        builder.build()
    }
}

impl JsonRequest {
    fn to_request(&self, service_day: Date) -> Result<Request, InstanceError> {
        let mut builder = RequestBuilder::default();
        builder
            .set_name(self.name.clone())
            .set_origin(Node::from(self.origin.as_str()))
            .set_destination(Node::from(self.destination.as_str()))
            .set_time_window(
                service_day.to_datetime(self.earliest),
                service_day.to_datetime(self.latest),
            )
            .set_pre_departure(service_day.to_datetime(self.pre_departure))
            .set_pre_arrival(service_day.to_datetime(self.pre_arrival))
            .set_party_size(self.party_size)
            .set_max_transfer(self.max_transfer);
        builder.build()
    }
}

impl JsonInstance {
    pub fn from_json(json: &str) -> Result<Self, InstanceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Anchors instance times to `service_day`, or to the graph's first day when `None`.
    pub fn build_problem(
        &self,
        graph: Arc<TimeDependentGraph>,
        service_day: Option<Date>,
    ) -> Result<DispatchProblem, InstanceError> {
        let service_day = resolve_service_day(service_day, &graph);

        let vehicles = self
            .vehicles
            .iter()
            .map(JsonVehicle::to_vehicle)
            .collect::<Result<Vec<_>, _>>()?;
        let requests = self
            .requests
            .iter()
            .map(|request| request.to_request(service_day))
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = DispatchProblemBuilder::default();
        builder
            .set_graph(graph)
            .set_vehicles(vehicles)
            .set_requests(requests)
            .set_service_day(service_day);
        builder.build()
    }
}

#[instrument(skip_all, level = "debug", fields(path = %path.as_ref().display()))]
pub fn load_instance<P: AsRef<Path>>(path: P) -> Result<JsonInstance, InstanceError> {
    let file = File::open(path.as_ref())?;
    let instance: JsonInstance = serde_json::from_reader(BufReader::new(file))?;

    info!(
        vehicles = instance.vehicles.len(),
        requests = instance.requests.len(),
        "Loaded instance"
    );

    Ok(instance)
}
