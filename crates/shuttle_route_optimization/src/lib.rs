pub mod credentials;
pub mod error;
pub mod google_duration;
pub mod model;
pub mod response;
pub mod retry_policy;
pub mod route_optimization_client;
pub mod route_solver;
mod token;
