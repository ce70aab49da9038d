mod heap_item;
pub mod routing_path;
pub mod static_network;
pub mod time_dependent_dijkstra;
