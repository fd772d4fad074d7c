use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use jiff::{SignedDuration, Timestamp};
use shuttle_route_optimization::{
    error::SolverError, model::OptimizeToursRequest, response::OptimizeToursResponse,
    route_solver::RouteSolver,
};

use crate::{
    problem::{
        booking::Booking, coordinates::Coordinates, dispatch_request::DispatchRequest,
        fleet_vehicle::FleetVehicle, meters::Meters,
    },
    solution::solved_route::{RouteMetrics, Solution, SolvedRoute, SolvedTransition, SolvedVisit},
};

pub fn epoch() -> Timestamp {
    "2025-06-10T08:00:00Z".parse().unwrap()
}

pub fn booking(label: &str, pax_count: u32) -> Booking {
    Booking::new(
        label,
        pax_count,
        Coordinates::new(50.8466, 4.3528),
        Coordinates::new(50.8798, 4.7005),
    )
}

pub fn vehicle(label: &str, capacity: u32) -> FleetVehicle {
    FleetVehicle::new(label, Coordinates::new(50.8466, 4.3528), capacity)
}

pub fn dispatch_request(bookings: Vec<Booking>, vehicles: Vec<FleetVehicle>) -> DispatchRequest {
    DispatchRequest::new(
        bookings,
        vehicles,
        3,
        90,
        epoch(),
        epoch().checked_add(SignedDuration::from_hours(24)).unwrap(),
    )
}

pub fn visit(label: &str, is_pickup: bool, start_time: i64, passengers: i64) -> SolvedVisit {
    SolvedVisit {
        shipment_index: 0,
        shipment_label: label.to_owned(),
        is_pickup,
        start_time,
        passengers,
    }
}

pub fn transition(start_time: i64, total_duration: i64, distance: f64) -> SolvedTransition {
    SolvedTransition {
        start_time,
        travel_duration: total_duration,
        wait_duration: 0,
        total_duration,
        travel_distance: Meters::new(distance),
    }
}

pub fn metrics(travel_duration: i64, visit_duration: i64) -> RouteMetrics {
    RouteMetrics {
        performed_shipment_count: 1,
        travel_duration,
        wait_duration: 0,
        visit_duration,
        total_duration: travel_duration + visit_duration,
        travel_distance: Meters::new(travel_duration as f64 * 10.0),
    }
}

pub fn route(
    vehicle_label: &str,
    visits: Vec<SolvedVisit>,
    transitions: Vec<SolvedTransition>,
) -> SolvedRoute {
    SolvedRoute {
        vehicle_index: 0,
        vehicle_label: vehicle_label.to_owned(),
        visits,
        transitions,
        metrics: None,
        polyline: None,
    }
}

pub fn route_with_metrics(
    vehicle_label: &str,
    visits: Vec<SolvedVisit>,
    metrics: RouteMetrics,
) -> SolvedRoute {
    SolvedRoute {
        metrics: Some(metrics),
        ..route(vehicle_label, visits, vec![])
    }
}

pub fn solution(routes: Vec<SolvedRoute>) -> Solution {
    Solution {
        routes,
        ..Solution::default()
    }
}

/// Solver double answering every call with the same canned outcome.
pub struct FixtureSolver {
    response: Option<OptimizeToursResponse>,
    failure: Mutex<Option<SolverError>>,
    calls: AtomicUsize,
    last_request: Mutex<Option<OptimizeToursRequest>>,
}

impl FixtureSolver {
    pub fn from_json(value: serde_json::Value) -> Self {
        Self {
            response: Some(serde_json::from_value(value).unwrap()),
            failure: Mutex::new(None),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing(error: SolverError) -> Self {
        Self {
            response: None,
            failure: Mutex::new(Some(error)),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<OptimizeToursRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl RouteSolver for FixtureSolver {
    async fn solve(
        &self,
        request: &OptimizeToursRequest,
    ) -> Result<OptimizeToursResponse, SolverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        match &self.response {
            Some(response) => Ok(response.clone()),
            None => Err(self
                .failure
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| SolverError::Token(String::from("fixture exhausted")))),
        }
    }
}
