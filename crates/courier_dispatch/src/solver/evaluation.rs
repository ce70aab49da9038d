use courier_network::{
    error::RoutingError, graph::TimeDependentGraph, node::Node, routing::routing_path::RoutingPath,
};
use jiff::{SignedDuration, civil::DateTime};
use thiserror::Error;

use crate::{
    problem::{request::Request, vehicle::VehicleIdx},
    solver::{score::Score, vehicle_state::VehicleState},
};

/// Reason a vehicle cannot take a request in its current state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Infeasibility {
    #[error("pickup at {arrival} is outside [{earliest}, {latest}]")]
    TimeWindow {
        arrival: DateTime,
        earliest: DateTime,
        latest: DateTime,
    },
    #[error("{available} seats left, party of {required}")]
    Capacity { available: u32, required: u32 },
    #[error(transparent)]
    PathNotFound(#[from] RoutingError),
}

/// A feasible match between a vehicle and a request, priced against one vehicle state.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    vehicle: VehicleIdx,
    departure: DateTime,
    pickup_travel: SignedDuration,
    pickup_arrival: DateTime,
    path: RoutingPath,
    score: Score,
}

impl Evaluation {
    pub fn vehicle(&self) -> VehicleIdx {
        self.vehicle
    }

    /// Vehicle time the evaluation was made at.
    pub fn departure(&self) -> DateTime {
        self.departure
    }

    pub fn pickup_travel(&self) -> SignedDuration {
        self.pickup_travel
    }

    pub fn pickup_arrival(&self) -> DateTime {
        self.pickup_arrival
    }

    pub fn path(&self) -> &RoutingPath {
        &self.path
    }

    pub fn route_duration(&self) -> SignedDuration {
        self.path.duration()
    }

    /// Saturates at [`DateTime::MAX`].
    pub fn dropoff_time(&self) -> DateTime {
        self.pickup_arrival.saturating_add(self.path.duration())
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub(crate) fn into_path(self) -> RoutingPath {
        self.path
    }
}

/// Capacity and time window checks for a pickup at `pickup_arrival`.
pub fn check_feasibility(
    state: &VehicleState,
    request: &Request,
    pickup_arrival: DateTime,
) -> Result<(), Infeasibility> {
    if !request.time_window().is_satisfied(pickup_arrival) {
        return Err(Infeasibility::TimeWindow {
            arrival: pickup_arrival,
            earliest: request.earliest(),
            latest: request.latest(),
        });
    }

    if !state.can_carry(request.party_size()) {
        return Err(Infeasibility::Capacity {
            available: state.capacity(),
            required: request.party_size(),
        });
    }

    Ok(())
}

/// Prices `request` for a vehicle in `state`. Has no side effect.
pub fn evaluate(
    graph: &TimeDependentGraph,
    vehicle: VehicleIdx,
    state: &VehicleState,
    request: &Request,
) -> Result<Evaluation, Infeasibility> {
    let departure = state.time();
    let pickup_travel = graph.lookup(state.location(), request.origin(), departure);
    // Past the calendar, the arrival sits at `DateTime::MAX` and fails the time window.
    let pickup_arrival = departure.saturating_add(pickup_travel);

    check_feasibility(state, request, pickup_arrival)?;

    let path = graph.shortest_path(request.origin(), request.destination(), pickup_arrival)?;
    let score = Score::of(
        request.time_window().slack(pickup_arrival),
        path.duration(),
        pickup_travel,
    );

    Ok(Evaluation {
        vehicle,
        departure,
        pickup_travel,
        pickup_arrival,
        path,
        score,
    })
}

/// Nodes appended to a vehicle's route log for the approach to `pickup`.
///
/// A vehicle with no path to the pickup cannot take the request, even though the pickup time
/// itself is priced with the missing-arc penalty.
pub fn approach_nodes(
    graph: &TimeDependentGraph,
    state: &VehicleState,
    pickup: &Node,
) -> Result<Vec<Node>, RoutingError> {
    graph
        .shortest_path(state.location(), pickup, state.time())
        .map(RoutingPath::into_nodes)
}
