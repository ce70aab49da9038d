use courier_network::node::Node;
use serde::{Serialize, ser::SerializeMap};

use crate::problem::{
    dispatch_problem::DispatchProblem,
    request::RequestIdx,
    vehicle::VehicleIdx,
};

/// One committed request, as written to the assignment output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssignmentRecord {
    pub request: String,
    pub path: Vec<Node>,
    pub pickup: Node,
    pub dropoff: Node,
}

/// Records per vehicle, in commit order.
///
/// Serializes as `{vehicleName: [records]}` in vehicle order, skipping vehicles without records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    vehicle_names: Vec<String>,
    records: Vec<Vec<AssignmentRecord>>,
    assigned: Vec<(VehicleIdx, RequestIdx)>,
}

impl Assignment {
    pub fn new(problem: &DispatchProblem) -> Self {
        Assignment {
            vehicle_names: problem
                .vehicles()
                .iter()
                .map(|vehicle| vehicle.name().to_owned())
                .collect(),
            records: vec![Vec::new(); problem.vehicles().len()],
            assigned: Vec::new(),
        }
    }

    pub(crate) fn push(
        &mut self,
        vehicle: VehicleIdx,
        request: RequestIdx,
        record: AssignmentRecord,
    ) {
        self.records[vehicle.get()].push(record);
        self.assigned.push((vehicle, request));
    }

    pub fn records(&self, vehicle: VehicleIdx) -> &[AssignmentRecord] {
        &self.records[vehicle.get()]
    }

    pub fn records_by_name(&self, vehicle_name: &str) -> Option<&[AssignmentRecord]> {
        self.vehicle_names
            .iter()
            .position(|name| name == vehicle_name)
            .map(|position| self.records[position].as_slice())
    }

    /// Commits in the order they happened.
    pub fn assigned(&self) -> &[(VehicleIdx, RequestIdx)] {
        &self.assigned
    }

    pub fn vehicle_of(&self, request: RequestIdx) -> Option<VehicleIdx> {
        self.assigned
            .iter()
            .find(|&&(_, assigned)| assigned == request)
            .map(|&(vehicle, _)| vehicle)
    }

    pub fn total_assigned(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[AssignmentRecord])> {
        self.vehicle_names
            .iter()
            .zip(&self.records)
            .filter(|(_, records)| !records.is_empty())
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }
}

impl Serialize for Assignment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        for (name, records) in self.iter() {
            map.serialize_entry(name, records)?;
        }
        map.end()
    }
}
