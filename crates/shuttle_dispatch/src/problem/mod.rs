pub mod booking;
pub mod coordinates;
pub mod dispatch_request;
pub mod fleet_vehicle;
pub mod meters;
