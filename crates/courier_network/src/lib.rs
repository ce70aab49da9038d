pub mod arc;
pub mod duration_parser;
pub mod error;
pub mod graph;
pub mod loader;
pub mod node;
pub mod routing;
mod utils;

#[cfg(test)]
pub(crate) mod test_graph_utils;
