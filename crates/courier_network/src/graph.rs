use fxhash::{FxHashMap, FxHashSet};
use jiff::{
    SignedDuration,
    civil::{Date, DateTime},
};
use tracing::{debug, warn};

use crate::{
    arc::{ArcRecord, TravelArc},
    error::{NetworkError, RoutingError},
    node::{Node, NodeIdx},
    routing::{
        routing_path::RoutingPath,
        time_dependent_dijkstra::{SimulatedClock, TimeDependentDijkstra},
    },
};

/// Travel time charged for a hop that has no arc observed at the exact departure time.
pub const MISSING_ARC_PENALTY: SignedDuration = SignedDuration::from_hours(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ArcKey {
    origin: NodeIdx,
    destination: NodeIdx,
    departure: DateTime,
}

/// Arcs indexed by (origin, destination, departure day and time), exact match only.
///
/// Built once with [`TimeDependentGraphBuilder`] and read-only afterwards.
pub struct TimeDependentGraph {
    nodes: Vec<Node>,
    node_index: FxHashMap<Node, NodeIdx>,
    arcs: FxHashMap<ArcKey, SignedDuration>,
    neighbours: Vec<Vec<NodeIdx>>,
    first_day: Option<Date>,
}

impl TimeDependentGraph {
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a ArcRecord>,
    ) -> Result<Self, NetworkError> {
        let mut builder = TimeDependentGraphBuilder::default();
        for record in records {
            builder.add_arc(TravelArc::from_record(record)?);
        }
        Ok(builder.build())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, node_idx: NodeIdx) -> &Node {
        &self.nodes[node_idx]
    }

    pub fn node_idx(&self, node: &Node) -> Option<NodeIdx> {
        self.node_index.get(node).copied()
    }

    /// Distinct destinations of the node's out-arcs, in the order they were first loaded.
    pub fn neighbours(&self, node_idx: NodeIdx) -> &[NodeIdx] {
        &self.neighbours[node_idx.get()]
    }

    /// Earliest day any arc is valid on.
    pub fn first_day(&self) -> Option<Date> {
        self.first_day
    }

    pub fn find_arc(
        &self,
        origin: NodeIdx,
        destination: NodeIdx,
        departure: DateTime,
    ) -> Option<SignedDuration> {
        self.arcs
            .get(&ArcKey {
                origin,
                destination,
                departure,
            })
            .copied()
    }

    pub fn lookup_idx(
        &self,
        origin: NodeIdx,
        destination: NodeIdx,
        departure: DateTime,
    ) -> SignedDuration {
        self.find_arc(origin, destination, departure)
            .unwrap_or(MISSING_ARC_PENALTY)
    }

    /// Travel duration leaving `origin` for `destination` at `departure`.
    ///
    /// Falls back to [`MISSING_ARC_PENALTY`] when no arc matches exactly, including when
    /// either node is unknown to the graph.
    pub fn lookup(&self, origin: &Node, destination: &Node, departure: DateTime) -> SignedDuration {
        match (self.node_idx(origin), self.node_idx(destination)) {
            (Some(origin), Some(destination)) => self.lookup_idx(origin, destination, departure),
            _ => MISSING_ARC_PENALTY,
        }
    }

    pub fn shortest_path(
        &self,
        origin: &Node,
        destination: &Node,
        departure: DateTime,
    ) -> Result<RoutingPath, RoutingError> {
        if origin == destination {
            return Ok(RoutingPath::trivial(origin.clone()));
        }

        let path_not_found = || RoutingError::PathNotFound {
            origin: origin.clone(),
            destination: destination.clone(),
        };

        let origin_idx = self.node_idx(origin).ok_or_else(path_not_found)?;
        let destination_idx = self.node_idx(destination).ok_or_else(path_not_found)?;

        let mut clock = SimulatedClock::new(departure);
        TimeDependentDijkstra::new(self).calc_path(origin_idx, destination_idx, &mut clock)
    }
}

#[derive(Default)]
pub struct TimeDependentGraphBuilder {
    nodes: Vec<Node>,
    node_index: FxHashMap<Node, NodeIdx>,
    arcs: FxHashMap<ArcKey, SignedDuration>,
    neighbours: Vec<Vec<NodeIdx>>,
    edges: FxHashSet<(NodeIdx, NodeIdx)>,
    first_day: Option<Date>,
    ignored_duplicates: usize,
}

impl TimeDependentGraphBuilder {
    pub fn add_node(&mut self, node: Node) -> NodeIdx {
        if let Some(&node_idx) = self.node_index.get(&node) {
            return node_idx;
        }

        let node_idx = NodeIdx::new(self.nodes.len());
        self.nodes.push(node.clone());
        self.node_index.insert(node, node_idx);
        self.neighbours.push(Vec::new());
        node_idx
    }

    /// Adds an arc. When an arc with the same origin, destination and departure was already
    /// added, the first one is kept.
    pub fn add_arc(&mut self, arc: TravelArc) -> &mut TimeDependentGraphBuilder {
        let origin = self.add_node(arc.origin().clone());
        let destination = self.add_node(arc.destination().clone());

        if self.edges.insert((origin, destination)) {
            self.neighbours[origin.get()].push(destination);
        }

        let key = ArcKey {
            origin,
            destination,
            departure: arc.departure(),
        };

        if self.arcs.contains_key(&key) {
            debug!(
                "Ignoring duplicate arc {} -> {} at {}",
                arc.origin(),
                arc.destination(),
                arc.departure()
            );
            self.ignored_duplicates += 1;
            return self;
        }

        self.arcs.insert(key, arc.duration());
        self.first_day = Some(match self.first_day {
            Some(day) => day.min(arc.day()),
            None => arc.day(),
        });

        self
    }

    pub fn build(self) -> TimeDependentGraph {
        if self.ignored_duplicates > 0 {
            warn!(
                "Ignored {} duplicate arcs, the first arc loaded for each departure was kept",
                self.ignored_duplicates
            );
        }

        debug!(
            "Built time-dependent graph with {} nodes and {} arcs",
            self.nodes.len(),
            self.arcs.len()
        );

        TimeDependentGraph {
            nodes: self.nodes,
            node_index: self.node_index,
            arcs: self.arcs,
            neighbours: self.neighbours,
            first_day: self.first_day,
        }
    }
}
