use schemars::JsonSchema;
use serde::Serialize;
use tracing::instrument;

use crate::{
    error::MatchError,
    geodesy::haversine_distance,
    problem::{booking::Booking, coordinates::Coordinates, meters::Meters},
    solution::{
        cumulative_distance::cumulative_distances,
        matcher::{match_booking, parse_booking_id},
        solved_route::{Solution, SolvedVisit},
    },
    views::visit_kind::VisitKind,
};

/// Whole minutes from the request epoch to the start of a visit.
pub fn travel_time_minutes(visit: &SolvedVisit) -> i64 {
    (visit.start_time as f64 / 60.0).round() as i64
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct DetailedVisit {
    pub route_number: usize,
    /// 1-based position among the selected visits of the route.
    pub position: usize,
    pub booking_id: i64,
    pub origin: Coordinates,
    pub destination: Coordinates,
    pub cumulative_distance: Meters,
    pub travel_time_minutes: i64,
    pub passengers: i64,
    /// As-the-crow-flies distance between origin and destination.
    pub direct_distance: Meters,
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct DetailedRoute {
    pub route_number: usize,
    pub vehicle_label: String,
    pub visits: Vec<DetailedVisit>,
    pub polyline: Option<String>,
}

#[instrument(skip_all, level = "debug")]
pub fn build_detailed_visits(
    solution: &Solution,
    bookings: &[Booking],
    kind: VisitKind,
) -> Result<Vec<DetailedRoute>, MatchError> {
    solution
        .routes
        .iter()
        .enumerate()
        .map(|(index, route)| {
            let route_number = index + 1;
            let selected: Vec<&SolvedVisit> =
                route.visits.iter().filter(|visit| kind.matches(visit)).collect();
            let distances = cumulative_distances(selected.iter().copied(), &route.transitions)?;

            let visits = selected
                .iter()
                .enumerate()
                .map(|(position, visit)| {
                    let booking = match_booking(visit, bookings)?;
                    let booking_id = parse_booking_id(&visit.shipment_label)?;

                    Ok(DetailedVisit {
                        route_number,
                        position: position + 1,
                        booking_id,
                        origin: *booking.origin(),
                        destination: *booking.destination(),
                        cumulative_distance: distances.get_or_zero(booking_id),
                        travel_time_minutes: travel_time_minutes(visit),
                        passengers: visit.passengers,
                        direct_distance: haversine_distance(booking.origin(), booking.destination()),
                    })
                })
                .collect::<Result<Vec<_>, MatchError>>()?;

            Ok(DetailedRoute {
                route_number,
                vehicle_label: route.vehicle_label.clone(),
                visits,
                polyline: route.polyline.clone(),
            })
        })
        .collect()
}
