use schemars::JsonSchema;
use serde::Serialize;
use tracing::{instrument, warn};

use crate::solution::solved_route::{RouteMetrics, Solution, SolvedRoute};

fn minutes(seconds: i64) -> f64 {
    (seconds as f64 / 60.0 * 100.0).round() / 100.0
}

/// Lowest and highest passenger load reached along a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadProfile {
    pub lowest: i64,
    pub peak: i64,
}

impl LoadProfile {
    pub fn of(route: &SolvedRoute) -> Self {
        let mut load = 0;
        let mut profile = LoadProfile::default();

        for visit in &route.visits {
            load += visit.passengers;
            profile.lowest = profile.lowest.min(load);
            profile.peak = profile.peak.max(load);
        }

        profile
    }

    pub fn fits(&self, capacity: u32) -> bool {
        self.lowest >= 0 && self.peak <= capacity as i64
    }
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct RouteSummary {
    pub vehicle_label: String,
    /// Number of drop-offs, like `total_dropoffs`.
    pub total_stops: usize,
    pub total_pickups: usize,
    pub total_dropoffs: usize,
    pub total_passengers: i64,
    pub vehicle_capacity: u32,
    pub peak_passengers: i64,
    pub travel_time_minutes: f64,
    pub visit_time_minutes: f64,
    pub total_time_minutes: f64,
    pub total_distance_meters: f64,
}

impl RouteSummary {
    fn new(route: &SolvedRoute, metrics: &RouteMetrics, vehicle_capacity: u32) -> Self {
        let total_dropoffs = route.dropoffs().count();
        let profile = LoadProfile::of(route);

        if !profile.fits(vehicle_capacity) {
            warn!(
                vehicle = %route.vehicle_label,
                lowest = profile.lowest,
                peak = profile.peak,
                capacity = vehicle_capacity,
                "Route load leaves the vehicle capacity range"
            );
        }

        Self {
            vehicle_label: route.vehicle_label.clone(),
            total_stops: total_dropoffs,
            total_pickups: route.pickups().count(),
            total_dropoffs,
            total_passengers: route
                .visits
                .iter()
                .map(|visit| visit.passengers)
                .filter(|&passengers| passengers > 0)
                .sum(),
            vehicle_capacity,
            peak_passengers: profile.peak,
            travel_time_minutes: minutes(metrics.travel_duration),
            visit_time_minutes: minutes(metrics.visit_duration),
            total_time_minutes: minutes(metrics.total_duration),
            total_distance_meters: metrics.travel_distance.value(),
        }
    }
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Summary {
    /// Every route returned by the solver, with or without metrics.
    pub total_routes: usize,
    pub routes: Vec<RouteSummary>,
}

#[instrument(skip_all, level = "debug")]
pub fn build_summary(solution: &Solution, vehicle_capacity: u32) -> Summary {
    Summary {
        total_routes: solution.routes.len(),
        routes: solution
            .routes
            .iter()
            .filter_map(|route| {
                route
                    .metrics
                    .as_ref()
                    .map(|metrics| RouteSummary::new(route, metrics, vehicle_capacity))
            })
            .collect(),
    }
}
