use std::collections::BinaryHeap;

use fxhash::FxHashMap;
use jiff::{SignedDuration, civil::DateTime};

use crate::{
    error::RoutingError,
    graph::TimeDependentGraph,
    node::NodeIdx,
    routing::{heap_item::HeapItem, routing_path::RoutingPath},
};

/// How far the search clock advances each time a node is popped from the queue.
pub const SEARCH_CLOCK_STEP: SignedDuration = SignedDuration::from_mins(1);

/// Clock used to weight arcs during a search.
///
/// It is shared by the whole frontier: it starts at the departure time and advances by
/// [`SEARCH_CLOCK_STEP`] on every pop, independently of the arrival time at the popped node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedClock {
    now: DateTime,
    step: SignedDuration,
}

impl SimulatedClock {
    pub fn new(departure: DateTime) -> Self {
        SimulatedClock {
            now: departure,
            step: SEARCH_CLOCK_STEP,
        }
    }

    pub fn now(&self) -> DateTime {
        self.now
    }

    pub fn tick(&mut self) {
        self.now = self.now.saturating_add(self.step);
    }
}

struct NodeLabel {
    distance: SignedDuration,
    parent: Option<NodeIdx>,
}

/// Label-setting search over a [`TimeDependentGraph`].
///
/// Entries are not marked settled: a node pushed several times is expanded on every pop with
/// the distance it was pushed with, and each of those pops advances the clock.
pub struct TimeDependentDijkstra<'a> {
    graph: &'a TimeDependentGraph,
    heap: BinaryHeap<HeapItem<'a>>,
    labels: FxHashMap<NodeIdx, NodeLabel>,
}

impl<'a> TimeDependentDijkstra<'a> {
    pub fn new(graph: &'a TimeDependentGraph) -> Self {
        TimeDependentDijkstra {
            graph,
            heap: BinaryHeap::with_capacity(64),
            labels: FxHashMap::default(),
        }
    }

    fn push(&mut self, node: NodeIdx, distance: SignedDuration, parent: Option<NodeIdx>) {
        let graph = self.graph;
        self.labels.insert(node, NodeLabel { distance, parent });
        self.heap.push(HeapItem {
            distance,
            name: graph.node(node).name(),
            node,
        });
    }

    pub fn calc_path(
        &mut self,
        start: NodeIdx,
        end: NodeIdx,
        clock: &mut SimulatedClock,
    ) -> Result<RoutingPath, RoutingError> {
        self.heap.clear();
        self.labels.clear();

        self.push(start, SignedDuration::ZERO, None);

        let mut reached = false;

        while let Some(HeapItem { distance, node, .. }) = self.heap.pop() {
            if node == end {
                reached = true;
                break;
            }

            let graph = self.graph;
            for &next in graph.neighbours(node) {
                let travel = graph.lookup_idx(node, next, clock.now());
                let candidate = distance.saturating_add(travel);

                if self
                    .labels
                    .get(&next)
                    .is_none_or(|label| candidate < label.distance)
                {
                    self.push(next, candidate, Some(node));
                }
            }

            clock.tick();
        }

        if !reached {
            return Err(RoutingError::PathNotFound {
                origin: self.graph.node(start).clone(),
                destination: self.graph.node(end).clone(),
            });
        }

        Ok(self.build_path(end))
    }

    fn build_path(&self, end: NodeIdx) -> RoutingPath {
        let mut nodes = Vec::with_capacity(16);
        let mut current = Some(end);

        while let Some(node) = current {
            nodes.push(self.graph.node(node).clone());
            current = self.labels.get(&node).and_then(|label| label.parent);
        }

        nodes.reverse();

        let duration = self
            .labels
            .get(&end)
            .map_or(SignedDuration::ZERO, |label| label.distance);

        RoutingPath::new(nodes, duration)
    }
}
