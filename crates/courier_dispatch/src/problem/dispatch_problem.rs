use std::sync::Arc;

use courier_network::graph::TimeDependentGraph;
use fxhash::FxHashSet;
use jiff::civil::{Date, date};

use crate::{
    error::InstanceError,
    problem::{
        request::{Request, RequestIdx},
        vehicle::{Vehicle, VehicleIdx},
    },
};

/// Day used when neither the caller nor the graph provides one.
pub const FALLBACK_SERVICE_DAY: Date = date(1970, 1, 1);

/// Picks the calendar day instance times are anchored to.
pub fn resolve_service_day(explicit: Option<Date>, graph: &TimeDependentGraph) -> Date {
    explicit
        .or_else(|| graph.first_day())
        .unwrap_or(FALLBACK_SERVICE_DAY)
}

pub struct DispatchProblem {
    graph: Arc<TimeDependentGraph>,
    vehicles: Vec<Vehicle>,
    requests: Vec<Request>,
    service_day: Date,
}

impl DispatchProblem {
    pub fn graph(&self) -> &TimeDependentGraph {
        &self.graph
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, vehicle_idx: VehicleIdx) -> &Vehicle {
        &self.vehicles[vehicle_idx]
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn request(&self, request_idx: RequestIdx) -> &Request {
        &self.requests[request_idx]
    }

    pub fn service_day(&self) -> Date {
        self.service_day
    }

    /// Request indices in dispatch order: ascending pre-departure, input order on ties.
    pub fn requests_by_pre_departure(&self) -> Vec<RequestIdx> {
        let mut order: Vec<RequestIdx> = RequestIdx::range(self.requests.len()).collect();
        order.sort_by_key(|&request_idx| self.requests[request_idx].pre_departure());
        order
    }
}

#[derive(Default)]
pub struct DispatchProblemBuilder {
    graph: Option<Arc<TimeDependentGraph>>,
    vehicles: Vec<Vehicle>,
    requests: Vec<Request>,
    service_day: Option<Date>,
}

impl DispatchProblemBuilder {
    pub fn set_graph(&mut self, graph: Arc<TimeDependentGraph>) -> &mut DispatchProblemBuilder {
        self.graph = Some(graph);
        self
    }

    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> &mut DispatchProblemBuilder {
        self.vehicles.push(vehicle);
        self
    }

    pub fn set_vehicles(&mut self, vehicles: Vec<Vehicle>) -> &mut DispatchProblemBuilder {
        self.vehicles = vehicles;
        self
    }

    pub fn add_request(&mut self, request: Request) -> &mut DispatchProblemBuilder {
        self.requests.push(request);
        self
    }

    pub fn set_requests(&mut self, requests: Vec<Request>) -> &mut DispatchProblemBuilder {
        self.requests = requests;
        self
    }

    pub fn set_service_day(&mut self, service_day: Date) -> &mut DispatchProblemBuilder {
        self.service_day = Some(service_day);
        self
    }

    pub fn build(self) -> Result<DispatchProblem, InstanceError> {
        let graph = self.graph.ok_or(InstanceError::MissingField {
            entity: "DispatchProblem",
            field: "graph",
        })?;

        let mut vehicle_names = FxHashSet::default();
        for vehicle in &self.vehicles {
            if !vehicle_names.insert(vehicle.name()) {
                return Err(InstanceError::DuplicateVehicle(vehicle.name().to_owned()));
            }
        }

        let mut request_names = FxHashSet::default();
        for request in &self.requests {
            if !request_names.insert(request.name()) {
                return Err(InstanceError::DuplicateRequest(request.name().to_owned()));
            }
        }

        let service_day = resolve_service_day(self.service_day, &graph);

        Ok(DispatchProblem {
            graph,
            vehicles: self.vehicles,
            requests: self.requests,
            service_day,
        })
    }
}
