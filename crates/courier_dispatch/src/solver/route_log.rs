use courier_network::node::Node;
use serde::Serialize;

/// Append-only history of the nodes a vehicle was routed through.
///
/// Diagnostic only, nothing in the dispatch reads it back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteLog {
    nodes: Vec<Node>,
}

impl RouteLog {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: &Node) -> bool {
        self.nodes.contains(node)
    }

    pub fn extend(&mut self, nodes: impl IntoIterator<Item = Node>) {
        self.nodes.extend(nodes);
    }

    /// Appends `node` unless it was already visited.
    pub fn push_unique(&mut self, node: &Node) {
        if !self.contains(node) {
            self.nodes.push(node.clone());
        }
    }
}
