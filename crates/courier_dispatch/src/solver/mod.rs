pub mod assignment;
pub mod dispatch_params;
pub mod dispatcher;
pub mod evaluation;
pub mod route_log;
pub mod score;
pub mod vehicle_state;
