use schemars::JsonSchema;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    error::MatchError,
    problem::{booking::Booking, coordinates::Coordinates, meters::Meters},
    solution::{
        cumulative_distance::cumulative_distances,
        matcher::{MISSING_BOOKING_ID, booking_id_of, match_booking},
        solved_route::{Solution, SolvedRoute, SolvedVisit},
    },
    views::detailed_visits::travel_time_minutes,
};

pub const LEGACY_STATUS_OK: &str = "Ok";

/// Position of the synthetic record opening each route.
pub const START_POSITION: i64 = -1;

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct LegacyRecord {
    pub position: i64,
    pub booking_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub cumulative_distance: Meters,
    pub travel_time_minutes: i64,
}

impl LegacyRecord {
    fn start(coordinates: Coordinates) -> Self {
        Self {
            position: START_POSITION,
            booking_id: MISSING_BOOKING_ID,
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            cumulative_distance: Meters::ZERO,
            travel_time_minutes: 0,
        }
    }
}

/// Flat per-stop response kept for older consumers. `responde` holds the
/// records of the last route only; every route is available through
/// [`LegacyResponse::records_by_route`].
#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct LegacyResponse {
    pub status: String,
    pub responde: Vec<LegacyRecord>,
    #[serde(skip)]
    by_route: Vec<Vec<LegacyRecord>>,
}

impl LegacyResponse {
    pub fn records_by_route(&self) -> &[Vec<LegacyRecord>] {
        &self.by_route
    }
}

fn route_records(
    route: &SolvedRoute,
    bookings: &[Booking],
) -> Result<Vec<LegacyRecord>, MatchError> {
    let dropoffs: Vec<&SolvedVisit> = route.dropoffs().collect();
    let distances = cumulative_distances(dropoffs.iter().copied(), &route.transitions)?;

    let start = match dropoffs.first() {
        Some(first) => *match_booking(first, bookings)?.origin(),
        None => Coordinates::default(),
    };

    let mut records = Vec::with_capacity(dropoffs.len() + 1);
    records.push(LegacyRecord::start(start));

    for (position, visit) in dropoffs.iter().enumerate() {
        let booking = match_booking(visit, bookings)?;
        let booking_id = booking_id_of(Some(*visit))?;
        let destination = booking.destination();

        records.push(LegacyRecord {
            position: position as i64,
            booking_id,
            latitude: destination.latitude,
            longitude: destination.longitude,
            cumulative_distance: distances.get_or_zero(booking_id),
            travel_time_minutes: travel_time_minutes(visit),
        });
    }

    Ok(records)
}

#[instrument(skip_all, level = "debug")]
pub fn build_legacy_response(
    solution: &Solution,
    bookings: &[Booking],
) -> Result<LegacyResponse, MatchError> {
    let by_route = solution
        .routes
        .iter()
        .map(|route| route_records(route, bookings))
        .collect::<Result<Vec<_>, _>>()?;

    if by_route.len() > 1 {
        debug!(
            routes = by_route.len(),
            "Legacy response only carries the records of the last route"
        );
    }

    Ok(LegacyResponse {
        status: LEGACY_STATUS_OK.to_owned(),
        responde: by_route.last().cloned().unwrap_or_default(),
        by_route,
    })
}
