use jiff::{
    SignedDuration,
    civil::{Date, DateTime, date},
};

use crate::{
    arc::TravelArc,
    graph::{TimeDependentGraph, TimeDependentGraphBuilder},
    node::Node,
};

pub const TEST_DAY: Date = date(2024, 5, 6);

pub fn at(hour: i8, minute: i8) -> DateTime {
    TEST_DAY.at(hour, minute, 0, 0)
}

pub fn travel_arc(from: &str, to: &str, departure: DateTime, minutes: i64) -> TravelArc {
    TravelArc::new(
        Node::from(from),
        Node::from(to),
        departure,
        SignedDuration::from_mins(minutes),
    )
}

pub fn create_graph(arcs: Vec<TravelArc>) -> TimeDependentGraph {
    let mut builder = TimeDependentGraphBuilder::default();
    for arc in arcs {
        builder.add_arc(arc);
    }
    builder.build()
}

/// Every edge gets the same duration for each minute between 07:00 and 11:00.
pub fn create_time_invariant_graph(edges: &[(&str, &str, i64)]) -> TimeDependentGraph {
    let mut builder = TimeDependentGraphBuilder::default();
    let start = at(7, 0);

    for minute in 0..240 {
        let departure = start + SignedDuration::from_mins(minute);
        for &(from, to, minutes) in edges {
            builder.add_arc(travel_arc(from, to, departure, minutes));
        }
    }

    builder.build()
}
