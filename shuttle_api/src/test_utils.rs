use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};
use shuttle_route_optimization::{
    error::SolverError, model::OptimizeToursRequest, response::OptimizeToursResponse,
    route_solver::RouteSolver,
};

pub fn one_booking_response() -> Value {
    json!({
        "routes": [{
            "vehicleLabel": "1",
            "visits": [
                {
                    "isPickup": true,
                    "startTime": "2025-06-10T08:05:00Z",
                    "loadDemands": { "passengers": { "amount": "2" } },
                    "shipmentLabel": "42"
                },
                {
                    "startTime": "2025-06-10T08:36:10Z",
                    "loadDemands": { "passengers": { "amount": "-2" } },
                    "shipmentLabel": "42"
                }
            ],
            "transitions": [
                {
                    "travelDuration": "300s",
                    "totalDuration": "300s",
                    "startTime": "2025-06-10T08:00:00Z"
                },
                {
                    "travelDuration": "1870s",
                    "travelDistanceMeters": 29840,
                    "totalDuration": "1870s",
                    "startTime": "2025-06-10T08:05:00Z"
                }
            ],
            "metrics": {
                "performedShipmentCount": 1,
                "travelDuration": "2170s",
                "visitDuration": "180s",
                "totalDuration": "2350s",
                "travelDistanceMeters": 29840
            }
        }],
        "metrics": { "usedVehicleCount": 1, "totalCost": 340.2 }
    })
}

/// Solver double that never leaves the process.
pub struct StaticSolver {
    response: Option<OptimizeToursResponse>,
    failure: fn() -> SolverError,
    calls: AtomicUsize,
}

impl StaticSolver {
    pub fn responding(value: Value) -> Self {
        Self {
            response: Some(serde_json::from_value(value).unwrap()),
            failure: || SolverError::Token(String::from("unused")),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(failure: fn() -> SolverError) -> Self {
        Self {
            response: None,
            failure,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RouteSolver for StaticSolver {
    async fn solve(
        &self,
        _request: &OptimizeToursRequest,
    ) -> Result<OptimizeToursResponse, SolverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.response {
            Some(response) => Ok(response.clone()),
            None => Err((self.failure)()),
        }
    }
}
