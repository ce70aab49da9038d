use jiff::SignedDuration;

use crate::node::Node;

/// A path found by a shortest-path search, from origin to destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingPath {
    nodes: Vec<Node>,
    duration: SignedDuration,
}

impl RoutingPath {
    pub fn new(nodes: Vec<Node>, duration: SignedDuration) -> RoutingPath {
        RoutingPath { nodes, duration }
    }

    pub fn trivial(node: Node) -> RoutingPath {
        RoutingPath {
            nodes: vec![node],
            duration: SignedDuration::ZERO,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    pub fn duration(&self) -> SignedDuration {
        self.duration
    }

    pub fn origin(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn destination(&self) -> Option<&Node> {
        self.nodes.last()
    }
}
