use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::DispatchError,
    problem::{dispatch_problem::DispatchProblem, request::RequestIdx, vehicle::VehicleIdx},
    solver::{
        assignment::{Assignment, AssignmentRecord},
        dispatch_params::DispatchParams,
        evaluation::{Evaluation, Infeasibility, approach_nodes, check_feasibility, evaluate},
        route_log::RouteLog,
        score::Score,
        vehicle_state::VehicleState,
    },
    timer_debug,
};

/// Result of a dispatch run.
#[derive(Debug)]
pub struct DispatchOutcome {
    pub assignment: Assignment,
    /// Requests that no vehicle could take, in dispatch order.
    pub unassigned: Vec<RequestIdx>,
    pub route_logs: Vec<RouteLog>,
    pub final_states: Vec<VehicleState>,
}

/// Greedy one-pass dispatcher.
///
/// Requests are handled by ascending pre-departure. For each of them every available vehicle is
/// scored against its current state and the best one is committed right away, before the next
/// request is looked at.
pub struct Dispatcher {
    problem: Arc<DispatchProblem>,
    params: DispatchParams,
    thread_pool: Option<rayon::ThreadPool>,
    states: Vec<VehicleState>,
    route_logs: Vec<RouteLog>,
}

impl Dispatcher {
    pub fn new(problem: Arc<DispatchProblem>, params: DispatchParams) -> Result<Self, DispatchError> {
        let thread_pool = if params.scoring_threads.is_parallel() {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(params.scoring_threads.number_of_threads())
                    .build()?,
            )
        } else {
            None
        };

        let day_start = problem.service_day().to_datetime(params.day_start);
        let states = problem
            .vehicles()
            .iter()
            .map(|vehicle| VehicleState::initial(vehicle, day_start))
            .collect();
        let route_logs = vec![RouteLog::default(); problem.vehicles().len()];

        Ok(Dispatcher {
            problem,
            params,
            thread_pool,
            states,
            route_logs,
        })
    }

    pub fn params(&self) -> &DispatchParams {
        &self.params
    }

    #[instrument(skip_all, level = "debug")]
    pub fn run(mut self) -> DispatchOutcome {
        let problem = Arc::clone(&self.problem);
        let mut assignment = Assignment::new(&problem);
        let mut unassigned = Vec::new();

        timer_debug!("Dispatch run", {
            for request_idx in problem.requests_by_pre_departure() {
                let request = problem.request(request_idx);

                let Some(best) = self.select_best(request_idx) else {
                    warn!(request = request.name(), "No vehicle can serve the request");
                    unassigned.push(request_idx);
                    continue;
                };

                let vehicle_name = problem.vehicle(best.vehicle()).name();
                let score = best.score();
                match self.commit(request_idx, best, &mut assignment) {
                    Ok(()) => info!(
                        request = request.name(),
                        vehicle = vehicle_name,
                        %score,
                        "Request assigned"
                    ),
                    Err(reason) => {
                        warn!(
                            request = request.name(),
                            vehicle = vehicle_name,
                            %reason,
                            "Commit rejected, request left unassigned"
                        );
                        unassigned.push(request_idx);
                    }
                }
            }
        });

        info!(
            assigned = assignment.total_assigned(),
            unassigned = unassigned.len(),
            "Dispatch finished"
        );

        DispatchOutcome {
            assignment,
            unassigned,
            route_logs: self.route_logs,
            final_states: self.states,
        }
    }

    /// Scores every vehicle for the request, in vehicle order.
    fn score_vehicles(&self, request_idx: RequestIdx) -> Vec<Option<Evaluation>> {
        let problem = &self.problem;
        let request = problem.request(request_idx);
        let graph = problem.graph();

        let score_vehicle = |(index, state): (usize, &VehicleState)| -> Option<Evaluation> {
            let vehicle_idx = VehicleIdx::new(index);
            let vehicle = problem.vehicle(vehicle_idx);

            if !state.is_available_for(request) {
                debug!(
                    request = request.name(),
                    vehicle = vehicle.name(),
                    time = %state.time(),
                    "Vehicle busy past the latest pickup"
                );
                return None;
            }

            match evaluate(graph, vehicle_idx, state, request) {
                Ok(evaluation) => {
                    debug!(
                        request = request.name(),
                        vehicle = vehicle.name(),
                        score = %evaluation.score(),
                        "Vehicle scored"
                    );
                    Some(evaluation)
                }
                Err(reason) => {
                    debug!(
                        request = request.name(),
                        vehicle = vehicle.name(),
                        %reason,
                        "Vehicle infeasible"
                    );
                    None
                }
            }
        };

        match &self.thread_pool {
            Some(thread_pool) => thread_pool.install(|| {
                self.states
                    .par_iter()
                    .enumerate()
                    .map(&score_vehicle)
                    .collect()
            }),
            None => self.states.iter().enumerate().map(&score_vehicle).collect(),
        }
    }

    /// Highest score wins, the first vehicle in input order on ties.
    fn select_best(&self, request_idx: RequestIdx) -> Option<Evaluation> {
        let mut best_score = Score::MIN;
        let mut best = None;

        for evaluation in self.score_vehicles(request_idx).into_iter().flatten() {
            if evaluation.score().is_better_than(&best_score) {
                best_score = evaluation.score();
                best = Some(evaluation);
            }
        }

        best
    }

    fn commit(
        &mut self,
        request_idx: RequestIdx,
        evaluation: Evaluation,
        assignment: &mut Assignment,
    ) -> Result<(), Infeasibility> {
        let problem = Arc::clone(&self.problem);
        let request = problem.request(request_idx);
        let vehicle_idx = evaluation.vehicle();
        let state = &self.states[vehicle_idx.get()];

        debug_assert_eq!(state.time(), evaluation.departure());
        check_feasibility(state, request, evaluation.pickup_arrival())?;
        let approach = approach_nodes(problem.graph(), state, request.origin())?;

        let route_log = &mut self.route_logs[vehicle_idx.get()];
        route_log.extend(approach);
        route_log.push_unique(request.destination());

        let dropoff_time = evaluation.dropoff_time();
        self.states[vehicle_idx.get()].serve(
            request.party_size(),
            request.destination().clone(),
            dropoff_time,
        );

        assignment.push(
            vehicle_idx,
            request_idx,
            AssignmentRecord {
                request: request.name().to_owned(),
                path: evaluation.into_path().into_nodes(),
                pickup: request.origin().clone(),
                dropoff: request.destination().clone(),
            },
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;

    use super::*;
    use crate::{
        solver::dispatch_params::Threads,
        test_utils::{at, request, request_builder, turin_problem, vehicle},
    };
    use courier_network::node::Node;

    fn run(problem: DispatchProblem) -> DispatchOutcome {
        Dispatcher::new(Arc::new(problem), DispatchParams::default())
            .unwrap()
            .run()
    }

    #[test]
    fn test_single_request_goes_to_closest_vehicle() {
        let problem = turin_problem(
            vec![vehicle("V_0", 5, "Settimo"), vehicle("V_1", 5, "Grugliasco")],
            vec![request("R_0", "Collegno", "Orbassano", (8, 30), (8, 0), (10, 0))],
        );

        let outcome = run(problem);

        // Settimo reaches Collegno in 25 minutes, Grugliasco has no arc to Collegno (one hour).
        assert_eq!(
            outcome.assignment.vehicle_of(RequestIdx::new(0)),
            Some(VehicleIdx::new(0))
        );
        assert!(outcome.unassigned.is_empty());

        let state = &outcome.final_states[0];
        assert_eq!(state.capacity(), 4);
        assert_eq!(state.location(), &Node::from("Orbassano"));
        assert_eq!(state.time(), at(8, 50));

        assert_eq!(
            outcome.route_logs[0].nodes(),
            &[
                Node::from("Settimo"),
                "Collegno".into(),
                "Orbassano".into()
            ]
        );
        assert!(outcome.route_logs[1].is_empty());
    }

    #[test]
    fn test_commit_rejected_without_approach_path() {
        // Pinerolo has no outgoing arc: the penalty keeps the pickup in the window, but the
        // vehicle cannot actually reach Collegno.
        let problem = turin_problem(
            vec![vehicle("V_0", 5, "Pinerolo")],
            vec![request("R_0", "Collegno", "Orbassano", (8, 30), (8, 0), (10, 0))],
        );

        let outcome = run(problem);

        assert!(outcome.assignment.is_empty());
        assert_eq!(outcome.unassigned, vec![RequestIdx::new(0)]);

        let state = &outcome.final_states[0];
        assert_eq!(state.capacity(), 5);
        assert_eq!(state.location(), &Node::from("Pinerolo"));
        assert_eq!(state.time(), at(8, 0));
        assert!(outcome.route_logs[0].is_empty());
    }

    #[test]
    fn test_ties_go_to_first_vehicle() {
        let problem = turin_problem(
            vec![vehicle("V_0", 5, "Settimo"), vehicle("V_1", 5, "Settimo")],
            vec![request("R_0", "Collegno", "Orbassano", (8, 30), (8, 0), (10, 0))],
        );

        let outcome = run(problem);

        assert_eq!(
            outcome.assignment.vehicle_of(RequestIdx::new(0)),
            Some(VehicleIdx::new(0))
        );
    }

    #[test]
    fn test_vehicle_past_latest_is_skipped() {
        // The first request keeps V_0 busy until 08:50, past the second request's latest time.
        let mut late = request_builder("R_1", "Orbassano", "Pinerolo", (8, 40), (8, 0), (8, 45));
        late.set_party_size(1);
        let problem = turin_problem(
            vec![vehicle("V_0", 5, "Settimo")],
            vec![
                request("R_0", "Collegno", "Orbassano", (8, 30), (8, 0), (10, 0)),
                late.build().unwrap(),
            ],
        );

        let outcome = run(problem);

        assert_eq!(outcome.unassigned, vec![RequestIdx::new(1)]);
        assert_eq!(outcome.final_states[0].time(), at(8, 50));
    }

    #[test]
    fn test_parallel_scoring_matches_sequential() {
        let vehicles = || {
            vec![
                vehicle("V_0", 5, "Settimo"),
                vehicle("V_1", 5, "Nichelino"),
                vehicle("V_2", 2, "Settimo"),
                vehicle("V_3", 5, "Collegno"),
            ]
        };
        let requests = || {
            vec![
                request("R_0", "Collegno", "Orbassano", (8, 47), (8, 0), (10, 0)),
                request("R_1", "Grugliasco", "Orbassano", (8, 56), (8, 0), (10, 0)),
                request("R_2", "Grugliasco", "Pinerolo", (8, 21), (8, 0), (10, 0)),
                request("R_3", "Settimo", "Orbassano", (8, 5), (8, 0), (9, 0)),
            ]
        };

        let sequential = run(turin_problem(vehicles(), requests()));
        let parallel = Dispatcher::new(
            Arc::new(turin_problem(vehicles(), requests())),
            DispatchParams {
                scoring_threads: Threads::Multi(4),
                ..DispatchParams::default()
            },
        )
        .unwrap()
        .run();

        assert_eq!(sequential.assignment, parallel.assignment);
        assert_eq!(sequential.unassigned, parallel.unassigned);
        assert_eq!(sequential.final_states, parallel.final_states);
        assert_eq!(sequential.route_logs, parallel.route_logs);
    }

    #[test]
    fn test_day_start_param() {
        let problem = turin_problem(
            vec![vehicle("V_0", 5, "Settimo")],
            vec![request("R_0", "Collegno", "Orbassano", (8, 30), (8, 0), (10, 0))],
        );

        let outcome = Dispatcher::new(
            Arc::new(problem),
            DispatchParams {
                day_start: jiff::civil::time(9, 0, 0, 0),
                ..DispatchParams::default()
            },
        )
        .unwrap()
        .run();

        assert_eq!(
            outcome.final_states[0].time(),
            at(9, 0) + SignedDuration::from_mins(50)
        );
    }
}
