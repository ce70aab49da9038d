use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::define_index_newtype;

define_index_newtype!(NodeIdx, Node);

/// An opaque location identifier. Cloning is cheap, the name is shared.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Node(Arc<str>);

impl Node {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Node(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", &self.0)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::new(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::new(value)
    }
}
