use std::sync::Arc;

use courier_dispatch::{
    generator::{
        generator_params::{GeneratorParams, RequestGeneratorParams, VehicleGeneratorParams},
        instance_generator::InstanceGenerator,
    },
    json::types::{JsonInstance, JsonRequest, load_instance},
    problem::{dispatch_problem::DispatchProblem, request::RequestIdx, vehicle::VehicleIdx},
    solver::{
        dispatch_params::{DispatchParams, Threads},
        dispatcher::{DispatchOutcome, Dispatcher},
    },
};
use courier_network::{
    arc::ArcRecord, graph::TimeDependentGraph, loader::read_arc_records, node::Node,
    routing::static_network::StaticNetwork,
};
use jiff::civil::{date, time};
use rand::{SeedableRng, rngs::SmallRng};

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

/// Fixed durations around Turin for every minute from 07:00 to 11:00. Nothing leaves Pinerolo
/// and nothing reaches Settimo.
fn turin_arcs() -> Vec<ArcRecord> {
    read_arc_records(fixture_path("turin_arcs.csv")).unwrap()
}

fn turin_graph() -> Arc<TimeDependentGraph> {
    Arc::new(TimeDependentGraph::from_records(&turin_arcs()).unwrap())
}

fn fixture_instance() -> JsonInstance {
    load_instance(fixture_path("turin_instance.json")).unwrap()
}

fn dispatch(problem: DispatchProblem) -> (Arc<DispatchProblem>, DispatchOutcome) {
    let problem = Arc::new(problem);
    let outcome = Dispatcher::new(Arc::clone(&problem), DispatchParams::default())
        .unwrap()
        .run();
    (problem, outcome)
}

fn request_idx(problem: &DispatchProblem, name: &str) -> RequestIdx {
    RequestIdx::new(
        problem
            .requests()
            .iter()
            .position(|request| request.name() == name)
            .unwrap(),
    )
}

#[test]
fn test_two_vehicles_three_requests() {
    let problem = fixture_instance()
        .build_problem(turin_graph(), None)
        .unwrap();
    let (problem, outcome) = dispatch(problem);

    // R_2 goes first (08:21): Nichelino is 30 minutes from Grugliasco, Settimo 40.
    // R_0 then goes to V_0, V_1 being stuck in Pinerolo. R_1 scores best on V_0, priced with the
    // missing Orbassano -> Grugliasco arc, but V_0 has no path there and the commit is rejected.
    let r1 = request_idx(&problem, "R_1");
    assert_eq!(
        outcome.assignment.vehicle_of(request_idx(&problem, "R_2")),
        Some(VehicleIdx::new(1))
    );
    assert_eq!(
        outcome.assignment.vehicle_of(request_idx(&problem, "R_0")),
        Some(VehicleIdx::new(0))
    );
    assert_eq!(outcome.assignment.vehicle_of(r1), None);
    assert_eq!(outcome.unassigned, vec![r1]);

    let v0 = &outcome.final_states[0];
    assert_eq!(v0.capacity(), 4);
    assert_eq!(v0.location(), &Node::from("Orbassano"));
    assert_eq!(v0.time(), date(2024, 5, 6).at(8, 50, 0, 0));
    assert_eq!(outcome.final_states[1].capacity(), 4);
    assert_eq!(
        outcome.final_states[1].time(),
        date(2024, 5, 6).at(9, 15, 0, 0)
    );

    let json = serde_json::to_value(&outcome.assignment).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "V_0": [
                {
                    "Request": "R_0",
                    "Path": ["Collegno", "Grugliasco", "Orbassano"],
                    "Pickup": "Collegno",
                    "Dropoff": "Orbassano"
                }
            ],
            "V_1": [
                {
                    "Request": "R_2",
                    "Path": ["Grugliasco", "Orbassano", "Pinerolo"],
                    "Pickup": "Grugliasco",
                    "Dropoff": "Pinerolo"
                }
            ]
        })
    );

    let route = |index: usize| -> Vec<&str> {
        outcome.route_logs[index]
            .nodes()
            .iter()
            .map(Node::name)
            .collect()
    };
    assert_eq!(route(0), vec!["Settimo", "Collegno", "Orbassano"]);
    assert_eq!(route(1), vec!["Nichelino", "Grugliasco", "Pinerolo"]);
}

#[test]
fn test_stranded_vehicle_never_commits() {
    let mut instance = fixture_instance();
    instance.vehicles.truncate(1);
    instance.vehicles[0].origin = "Pinerolo".to_owned();
    let problem = instance.build_problem(turin_graph(), None).unwrap();

    let (problem, outcome) = dispatch(problem);

    // Every pickup is priced with the one-hour penalty and fits the windows, but Pinerolo has
    // no path anywhere.
    assert!(outcome.assignment.is_empty());
    assert_eq!(
        outcome.unassigned,
        problem.requests_by_pre_departure()
    );
    assert_eq!(outcome.final_states[0].capacity(), 5);
    assert_eq!(
        outcome.final_states[0].time(),
        date(2024, 5, 6).at(8, 0, 0, 0)
    );
    assert!(outcome.route_logs[0].is_empty());
}

#[test]
fn test_oversize_party_is_never_assigned() {
    let mut instance = fixture_instance();
    instance.requests[0].party_size = 6;
    let problem = instance.build_problem(turin_graph(), None).unwrap();

    let (problem, outcome) = dispatch(problem);

    let oversize = request_idx(&problem, "R_0");
    assert_eq!(outcome.assignment.vehicle_of(oversize), None);
    assert_eq!(outcome.unassigned, vec![oversize]);
}

#[test]
fn test_unreachable_destination_is_never_committed() {
    let mut instance = fixture_instance();
    instance.requests.push(JsonRequest {
        name: "R_3".to_owned(),
        earliest: time(8, 0, 0, 0),
        pre_departure: time(8, 0, 0, 0),
        pre_arrival: time(9, 0, 0, 0),
        latest: time(10, 0, 0, 0),
        max_transfer: 0,
        party_size: 1,
        origin: "Orbassano".to_owned(),
        destination: "Settimo".to_owned(),
    });
    let problem = instance.build_problem(turin_graph(), None).unwrap();

    let (problem, outcome) = dispatch(problem);

    let unreachable = request_idx(&problem, "R_3");
    assert_eq!(outcome.assignment.vehicle_of(unreachable), None);
    assert_eq!(
        outcome.unassigned,
        vec![unreachable, request_idx(&problem, "R_1")]
    );
    assert_eq!(outcome.assignment.total_assigned(), 2);
}

#[test]
fn test_generated_instance_invariants() {
    let network = StaticNetwork::from_records(&turin_arcs()).unwrap();
    let params = GeneratorParams {
        vehicles: VehicleGeneratorParams {
            capacity_range: [2, 5],
        },
        requests: RequestGeneratorParams {
            latest_arrival_time: time(10, 30, 0, 0),
            earliest_departure_time_range: time(8, 0, 0, 0),
            max_transfers: vec![0, 1, 2],
            party_size_range: [1, 3],
        },
    };
    let instance = InstanceGenerator::new(&network, &params)
        .unwrap()
        .generate(3, 20, &mut SmallRng::seed_from_u64(2024))
        .unwrap();

    let graph = turin_graph();
    let problem = Arc::new(instance.build_problem(Arc::clone(&graph), None).unwrap());
    let outcome = Dispatcher::new(
        Arc::clone(&problem),
        DispatchParams {
            scoring_threads: Threads::Multi(2),
            ..DispatchParams::default()
        },
    )
    .unwrap()
    .run();

    // Every request is either assigned exactly once or reported unassigned.
    let mut seen = vec![0; problem.requests().len()];
    for &(_, request_idx) in outcome.assignment.assigned() {
        seen[request_idx.get()] += 1;
    }
    for &request_idx in &outcome.unassigned {
        seen[request_idx.get()] += 1;
    }
    assert!(seen.iter().all(|&count| count == 1));

    // Replaying each vehicle's commits gives pickups inside their windows and the final state.
    for (index, vehicle) in problem.vehicles().iter().enumerate() {
        let vehicle_idx = VehicleIdx::new(index);
        let mut location = vehicle.origin().clone();
        let mut now = problem.service_day().at(8, 0, 0, 0);
        let mut capacity = vehicle.capacity();

        for &(_, request_idx) in outcome
            .assignment
            .assigned()
            .iter()
            .filter(|&&(assigned, _)| assigned == vehicle_idx)
        {
            let request = problem.request(request_idx);
            let pickup = now + graph.lookup(&location, request.origin(), now);
            assert!(request.earliest() <= pickup && pickup <= request.latest());

            capacity -= request.party_size();
            let path = graph
                .shortest_path(request.origin(), request.destination(), pickup)
                .unwrap();
            now = pickup + path.duration();
            location = request.destination().clone();
        }

        let state = &outcome.final_states[index];
        assert_eq!(state.capacity(), capacity);
        assert_eq!(state.time(), now);
        assert_eq!(state.location(), &location);
    }
}
