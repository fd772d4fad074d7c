use shuttle_route_optimization::error::SolverError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("booking required: the request contains no bookings")]
    NoBookings,

    #[error("vehicle required: the request contains no vehicles")]
    NoVehicles,

    #[error("job_id `{0}` does not carry a numeric booking id")]
    InvalidJobId(String),

    #[error("duplicate booking job_id {0}")]
    DuplicateBooking(String),

    #[error("duplicate vehicle_number {0}")]
    DuplicateVehicle(String),

    #[error("booking {job_id} has an invalid pax_count {pax_count}")]
    InvalidPassengerCount { job_id: String, pax_count: i64 },

    #[error("vehicle {vehicle_number} has an invalid vehicle_capacity {capacity}")]
    InvalidCapacity { vehicle_number: String, capacity: i64 },

    #[error("{field} of {owner} has invalid coordinates ({latitude}, {longitude})")]
    InvalidCoordinates {
        owner: String,
        field: &'static str,
        latitude: f64,
        longitude: f64,
    },

    #[error("{0} must be greater than zero")]
    InvalidParameter(&'static str),

    #[error("time window end must be after its start")]
    InvalidTimeWindow,
}

#[derive(Debug, Error, PartialEq)]
pub enum MatchError {
    #[error("no booking matches shipment label `{label}`")]
    MissingBooking { label: String },

    #[error("{count} bookings match shipment label `{label}`")]
    AmbiguousBooking { label: String, count: usize },

    #[error("shipment label `{label}` does not carry a numeric booking id")]
    InvalidBookingLabel { label: String },
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("data integrity error: {0}")]
    Match(#[from] MatchError),

    #[error("solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("invalid solver response: {0}")]
    InvalidSolverResponse(String),
}

impl DispatchError {
    /// Errors caused by the caller's input rather than by this service or
    /// the solver.
    pub fn is_client_error(&self) -> bool {
        matches!(self, DispatchError::Validation(_))
    }
}
