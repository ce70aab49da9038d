pub mod dispatch_problem;
pub mod request;
pub mod time_window;
pub mod vehicle;
