pub mod cumulative_distance;
pub mod matcher;
pub mod solved_route;
