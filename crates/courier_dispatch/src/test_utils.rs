use std::sync::Arc;

use courier_network::{
    arc::TravelArc,
    graph::{TimeDependentGraph, TimeDependentGraphBuilder},
    node::Node,
};
use jiff::{
    SignedDuration,
    civil::{Date, DateTime, date},
};

use crate::problem::{
    dispatch_problem::{DispatchProblem, DispatchProblemBuilder},
    request::{Request, RequestBuilder},
    vehicle::{Vehicle, VehicleBuilder},
};

pub const TEST_DAY: Date = date(2024, 5, 6);

pub fn at(hour: i8, minute: i8) -> DateTime {
    TEST_DAY.at(hour, minute, 0, 0)
}

/// Directed edges around Turin, in minutes. Nothing leaves Pinerolo.
pub const TURIN_EDGES: &[(&str, &str, i64)] = &[
    ("Settimo", "Collegno", 25),
    ("Settimo", "Grugliasco", 40),
    ("Collegno", "Grugliasco", 10),
    ("Grugliasco", "Orbassano", 15),
    ("Collegno", "Orbassano", 35),
    ("Orbassano", "Pinerolo", 30),
    ("Nichelino", "Orbassano", 20),
    ("Nichelino", "Grugliasco", 30),
];

/// Same durations for every departure minute between 07:00 and 11:00.
pub fn turin_graph() -> TimeDependentGraph {
    let mut builder = TimeDependentGraphBuilder::default();
    let start = at(7, 0);

    for minute in 0..240 {
        let departure = start + SignedDuration::from_mins(minute);
        for &(from, to, minutes) in TURIN_EDGES {
            builder.add_arc(TravelArc::new(
                Node::from(from),
                Node::from(to),
                departure,
                SignedDuration::from_mins(minutes),
            ));
        }
    }

    builder.build()
}

pub fn vehicle(name: &str, capacity: u32, origin: &str) -> Vehicle {
    let mut builder = VehicleBuilder::default();
    builder
        .set_name(name.to_owned())
        .set_capacity(capacity)
        .set_origin(origin.into());
    builder.build().unwrap()
}

/// `pre_departure`, `earliest` and `latest` are (hour, minute) on [`TEST_DAY`].
pub fn request_builder(
    name: &str,
    origin: &str,
    destination: &str,
    pre_departure: (i8, i8),
    earliest: (i8, i8),
    latest: (i8, i8),
) -> RequestBuilder {
    let mut builder = RequestBuilder::default();
    builder
        .set_name(name.to_owned())
        .set_origin(origin.into())
        .set_destination(destination.into())
        .set_time_window(at(earliest.0, earliest.1), at(latest.0, latest.1))
        .set_pre_departure(at(pre_departure.0, pre_departure.1))
        .set_party_size(1);
    builder
}

pub fn request(
    name: &str,
    origin: &str,
    destination: &str,
    pre_departure: (i8, i8),
    earliest: (i8, i8),
    latest: (i8, i8),
) -> Request {
    request_builder(name, origin, destination, pre_departure, earliest, latest)
        .build()
        .unwrap()
}

pub fn turin_problem(vehicles: Vec<Vehicle>, requests: Vec<Request>) -> DispatchProblem {
    let mut builder = DispatchProblemBuilder::default();
    builder
        .set_graph(Arc::new(turin_graph()))
        .set_vehicles(vehicles)
        .set_requests(requests)
        .set_service_day(TEST_DAY);
    builder.build().unwrap()
}
