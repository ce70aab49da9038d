use courier_network::{define_index_newtype, node::Node};
use serde::Serialize;

use crate::error::InstanceError;

define_index_newtype!(VehicleIdx, Vehicle);

/// A vehicle as described by the instance. Its state during a run lives in
/// [`VehicleState`](crate::solver::vehicle_state::VehicleState).
#[derive(Serialize, Debug, Clone)]
pub struct Vehicle {
    name: String,
    capacity: u32,
    origin: Node,
}

impl Vehicle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Seats available when the run starts.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn origin(&self) -> &Node {
        &self.origin
    }
}

#[derive(Default)]
pub struct VehicleBuilder {
    name: Option<String>,
    capacity: Option<u32>,
    origin: Option<Node>,
}

impl VehicleBuilder {
    pub fn set_name(&mut self, name: String) -> &mut VehicleBuilder {
        self.name = Some(name);
        self
    }

    pub fn set_capacity(&mut self, capacity: u32) -> &mut VehicleBuilder {
        self.capacity = Some(capacity);
        self
    }

    pub fn set_origin(&mut self, origin: Node) -> &mut VehicleBuilder {
        self.origin = Some(origin);
        self
    }

    pub fn build(self) -> Result<Vehicle, InstanceError> {
        Ok(Vehicle {
            name: self.name.ok_or(InstanceError::MissingField {
                entity: "Vehicle",
                field: "name",
            })?,
            capacity: self.capacity.unwrap_or(0),
            origin: self.origin.ok_or(InstanceError::MissingField {
                entity: "Vehicle",
                field: "origin",
            })?,
        })
    }
}
