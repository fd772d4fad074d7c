use jiff::{SignedDuration, Timestamp};
use schemars::JsonSchema;
use serde::Serialize;
use shuttle_route_optimization::response::{
    AggregatedMetrics, OptimizeToursMetrics, OptimizeToursResponse, ShipmentRoute, Transition,
    Visit,
};
use tracing::{instrument, warn};

use crate::{error::DispatchError, problem::meters::Meters};

fn seconds(duration: Option<SignedDuration>) -> i64 {
    duration.map(|duration| duration.as_secs()).unwrap_or(0)
}

fn offset(
    timestamp: Option<Timestamp>,
    epoch: Timestamp,
    what: &str,
) -> Result<i64, DispatchError> {
    timestamp
        .map(|timestamp| timestamp.as_second() - epoch.as_second())
        .ok_or_else(|| DispatchError::InvalidSolverResponse(format!("{what} without start time")))
}

/// A stop on a solved route. `start_time` is in seconds since the global
/// start time of the request.
#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct SolvedVisit {
    pub shipment_index: usize,
    pub shipment_label: String,
    pub is_pickup: bool,
    pub start_time: i64,
    /// Positive on pickups, negative on drop-offs.
    pub passengers: i64,
}

impl SolvedVisit {
    fn from_visit(visit: Visit, epoch: Timestamp) -> Result<Self, DispatchError> {
        let passengers = visit.passengers();
        let start_time = offset(
            visit.start_time,
            epoch,
            &format!("visit of shipment `{}`", visit.shipment_label),
        )?;

        Ok(Self {
            shipment_index: visit.shipment_index,
            shipment_label: visit.shipment_label,
            is_pickup: visit.is_pickup,
            start_time,
            passengers,
        })
    }
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct SolvedTransition {
    pub start_time: i64,
    pub travel_duration: i64,
    pub wait_duration: i64,
    pub total_duration: i64,
    pub travel_distance: Meters,
}

impl SolvedTransition {
    fn from_transition(transition: Transition, epoch: Timestamp) -> Result<Self, DispatchError> {
        Ok(Self {
            start_time: offset(transition.start_time, epoch, "transition")?,
            travel_duration: seconds(transition.travel_duration),
            wait_duration: seconds(transition.wait_duration),
            total_duration: seconds(transition.total_duration),
            travel_distance: Meters::new(transition.travel_distance_meters),
        })
    }

    /// Arrival time at the visit this transition leads to.
    pub fn end_time(&self) -> i64 {
        self.start_time + self.total_duration
    }
}

/// Durations in seconds.
#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct RouteMetrics {
    pub performed_shipment_count: u32,
    pub travel_duration: i64,
    pub wait_duration: i64,
    pub visit_duration: i64,
    pub total_duration: i64,
    pub travel_distance: Meters,
}

impl From<AggregatedMetrics> for RouteMetrics {
    fn from(metrics: AggregatedMetrics) -> Self {
        Self {
            performed_shipment_count: metrics.performed_shipment_count,
            travel_duration: seconds(metrics.travel_duration),
            wait_duration: seconds(metrics.wait_duration),
            visit_duration: seconds(metrics.visit_duration),
            total_duration: seconds(metrics.total_duration),
            travel_distance: Meters::new(metrics.travel_distance_meters),
        }
    }
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct SolvedRoute {
    pub vehicle_index: usize,
    pub vehicle_label: String,
    pub visits: Vec<SolvedVisit>,
    pub transitions: Vec<SolvedTransition>,
    pub metrics: Option<RouteMetrics>,
    pub polyline: Option<String>,
}

impl SolvedRoute {
    fn from_shipment_route(route: ShipmentRoute, epoch: Timestamp) -> Result<Self, DispatchError> {
        Ok(Self {
            vehicle_index: route.vehicle_index,
            vehicle_label: route.vehicle_label,
            visits: route
                .visits
                .into_iter()
                .map(|visit| SolvedVisit::from_visit(visit, epoch))
                .collect::<Result<_, _>>()?,
            transitions: route
                .transitions
                .into_iter()
                .map(|transition| SolvedTransition::from_transition(transition, epoch))
                .collect::<Result<_, _>>()?,
            metrics: route.metrics.map(RouteMetrics::from),
            polyline: route
                .route_polyline
                .map(|polyline| polyline.points)
                .filter(|points| !points.is_empty()),
        })
    }

    pub fn pickups(&self) -> impl Iterator<Item = &SolvedVisit> {
        self.visits.iter().filter(|visit| visit.is_pickup)
    }

    pub fn dropoffs(&self) -> impl Iterator<Item = &SolvedVisit> {
        self.visits.iter().filter(|visit| !visit.is_pickup)
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq, Default)]
pub struct SolveMetrics {
    pub used_vehicle_count: u32,
    pub skipped_shipment_count: u32,
    pub total_cost: f64,
    /// Seconds, summed over all routes.
    pub total_duration: i64,
    pub travel_distance: Meters,
}

impl From<OptimizeToursMetrics> for SolveMetrics {
    fn from(metrics: OptimizeToursMetrics) -> Self {
        let aggregated = metrics.aggregated_route_metrics.unwrap_or_default();

        Self {
            used_vehicle_count: metrics.used_vehicle_count,
            skipped_shipment_count: metrics.skipped_mandatory_shipment_count,
            total_cost: metrics.total_cost,
            total_duration: seconds(aggregated.total_duration),
            travel_distance: Meters::new(aggregated.travel_distance_meters),
        }
    }
}

/// Solver output with timestamps made relative to the request epoch.
#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq, Default)]
pub struct Solution {
    pub routes: Vec<SolvedRoute>,
    pub skipped_shipments: Vec<String>,
    pub metrics: SolveMetrics,
}

impl Solution {
    #[instrument(skip_all, level = "debug")]
    pub fn from_response(
        response: OptimizeToursResponse,
        epoch: Timestamp,
    ) -> Result<Self, DispatchError> {
        let skipped_shipments: Vec<String> = response
            .skipped_shipments
            .into_iter()
            .map(|skipped| skipped.label)
            .collect();

        if !skipped_shipments.is_empty() {
            warn!(
                skipped = ?skipped_shipments,
                "Solver skipped {} shipment(s)",
                skipped_shipments.len()
            );
        }

        Ok(Self {
            routes: response
                .routes
                .into_iter()
                .map(|route| SolvedRoute::from_shipment_route(route, epoch))
                .collect::<Result<_, _>>()?,
            skipped_shipments,
            metrics: response.metrics.map(SolveMetrics::from).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_utils;

    #[test]
    fn test_from_response() {
        let response: OptimizeToursResponse = serde_json::from_value(json!({
            "routes": [
                {
                    "vehicleLabel": "1",
                    "visits": [
                        {
                            "isPickup": true,
                            "startTime": "2025-06-10T08:05:00Z",
                            "loadDemands": { "passengers": { "amount": "2" } },
                            "shipmentLabel": "42"
                        },
                        {
                            "startTime": "2025-06-10T08:20:00Z",
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
                            "travelDuration": "900s",
                            "travelDistanceMeters": 4200,
                            "totalDuration": "900s",
                            "startTime": "2025-06-10T08:05:00Z"
                        },
                        {
                            "startTime": "2025-06-10T08:23:00Z"
                        }
                    ],
                    "routePolyline": { "points": "_p~iF~ps|U" },
                    "metrics": {
                        "performedShipmentCount": 1,
                        "travelDuration": "1200s",
                        "visitDuration": "180s",
                        "totalDuration": "1380s",
                        "travelDistanceMeters": 4200
                    }
                },
                { "vehicleIndex": 1, "vehicleLabel": "2" }
            ],
            "skippedShipments": [{ "index": 3, "label": "44" }],
            "metrics": {
                "usedVehicleCount": 1,
                "totalCost": 72.5,
                "aggregatedRouteMetrics": {
                    "totalDuration": "1380s",
                    "travelDistanceMeters": 4200
                }
            }
        }))
        .unwrap();

        let solution = Solution::from_response(response, test_utils::epoch()).unwrap();

        assert_eq!(solution.routes.len(), 2);
        assert_eq!(solution.skipped_shipments, vec![String::from("44")]);
        assert_eq!(solution.metrics.used_vehicle_count, 1);
        assert_eq!(solution.metrics.total_duration, 1380);

        let route = &solution.routes[0];
        assert_eq!(route.visits[0].start_time, 300);
        assert_eq!(route.visits[0].passengers, 2);
        assert_eq!(route.visits[1].start_time, 1200);
        assert_eq!(route.visits[1].passengers, -2);
        assert_eq!(route.transitions[1].end_time(), 1200);
        assert_eq!(route.transitions[1].travel_distance, Meters::new(4200.0));
        assert_eq!(route.transitions[2].total_duration, 0);
        assert_eq!(route.polyline.as_deref(), Some("_p~iF~ps|U"));
        assert_eq!(route.metrics.as_ref().unwrap().visit_duration, 180);
        assert_eq!(route.pickups().count(), 1);
        assert_eq!(route.dropoffs().count(), 1);

        let unused = &solution.routes[1];
        assert!(unused.is_empty());
        assert!(unused.metrics.is_none());
        assert!(unused.polyline.is_none());
    }

    #[test]
    fn test_visit_without_start_time() {
        let response: OptimizeToursResponse = serde_json::from_value(json!({
            "routes": [{ "visits": [{ "shipmentLabel": "42" }] }]
        }))
        .unwrap();

        let error = Solution::from_response(response, test_utils::epoch()).unwrap_err();

        assert!(matches!(error, DispatchError::InvalidSolverResponse(_)));
        assert!(error.to_string().contains("`42`"));
    }
}
