use std::collections::BinaryHeap;

use fxhash::FxHashMap;
use jiff::SignedDuration;

use crate::{
    arc::ArcRecord,
    error::NetworkError,
    node::{Node, NodeIdx},
    routing::heap_item::HeapItem,
};

/// Undirected network with one fixed duration per arc record, ignoring departure times.
///
/// Used to estimate nominal travel times when generating instances.
pub struct StaticNetwork {
    nodes: Vec<Node>,
    node_index: FxHashMap<Node, NodeIdx>,
    adjacency: Vec<Vec<(NodeIdx, SignedDuration)>>,
}

impl StaticNetwork {
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a ArcRecord>,
    ) -> Result<Self, NetworkError> {
        let mut network = StaticNetwork {
            nodes: Vec::new(),
            node_index: FxHashMap::default(),
            adjacency: Vec::new(),
        };

        for record in records {
            let duration = record.parse_duration()?;
            let from = network.add_node(Node::from(record.from.as_str()));
            let to = network.add_node(Node::from(record.to.as_str()));

            network.adjacency[from.get()].push((to, duration));
            network.adjacency[to.get()].push((from, duration));
        }

        Ok(network)
    }

    fn add_node(&mut self, node: Node) -> NodeIdx {
        if let Some(&node_idx) = self.node_index.get(&node) {
            return node_idx;
        }

        let node_idx = NodeIdx::new(self.nodes.len());
        self.nodes.push(node.clone());
        self.node_index.insert(node, node_idx);
        self.adjacency.push(Vec::new());
        node_idx
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// True when the node has no edge to another node.
    pub fn is_isolated(&self, node: &Node) -> bool {
        self.node_index.get(node).is_none_or(|&node_idx| {
            self.adjacency[node_idx.get()]
                .iter()
                .all(|&(next, _)| next == node_idx)
        })
    }

    /// Shortest travel time between two nodes, `None` when `end` cannot be reached.
    pub fn travel_time(&self, start: &Node, end: &Node) -> Option<SignedDuration> {
        let start = *self.node_index.get(start)?;
        let end = *self.node_index.get(end)?;

        let mut distances = vec![SignedDuration::MAX; self.nodes.len()];
        let mut heap = BinaryHeap::with_capacity(self.nodes.len());

        distances[start.get()] = SignedDuration::ZERO;
        heap.push(HeapItem {
            distance: SignedDuration::ZERO,
            name: self.nodes[start].name(),
            node: start,
        });

        while let Some(HeapItem { distance, node, .. }) = heap.pop() {
            if node == end {
                break;
            }

            // Node is already settled, skip
            if distance > distances[node.get()] {
                continue;
            }

            for &(next, weight) in &self.adjacency[node.get()] {
                let candidate = distance.saturating_add(weight);
                if candidate < distances[next.get()] {
                    distances[next.get()] = candidate;
                    heap.push(HeapItem {
                        distance: candidate,
                        name: self.nodes[next].name(),
                        node: next,
                    });
                }
            }
        }

        let distance = distances[end.get()];
        (distance != SignedDuration::MAX).then_some(distance)
    }
}
