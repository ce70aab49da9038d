use courier_network::node::Node;
use jiff::civil::DateTime;
use serde::Serialize;

use crate::problem::{request::Request, vehicle::Vehicle};

/// Mutable side of a vehicle during a dispatch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleState {
    capacity: u32,
    location: Node,
    time: DateTime,
}

impl VehicleState {
    pub fn new(capacity: u32, location: Node, time: DateTime) -> Self {
        VehicleState {
            capacity,
            location,
            time,
        }
    }

    /// State of a vehicle waiting at its origin at `day_start`.
    pub fn initial(vehicle: &Vehicle, day_start: DateTime) -> Self {
        VehicleState::new(vehicle.capacity(), vehicle.origin().clone(), day_start)
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn location(&self) -> &Node {
        &self.location
    }

    pub fn time(&self) -> DateTime {
        self.time
    }

    pub fn can_carry(&self, party_size: u32) -> bool {
        self.capacity >= party_size
    }

    /// Vehicles whose clock is already past the request's latest time are not considered.
    pub fn is_available_for(&self, request: &Request) -> bool {
        self.time <= request.latest()
    }

    /// Seats are never given back once a party has been dropped off.
    pub(crate) fn serve(&mut self, party_size: u32, destination: Node, dropoff: DateTime) {
        self.capacity -= party_size;
        self.location = destination;
        self.time = dropoff;
    }
}
