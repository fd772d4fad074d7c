use std::fmt::Display;

use fxhash::FxHashSet;
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    config::DispatchConfig,
    error::ValidationError,
    problem::{
        booking::Booking,
        coordinates::Coordinates,
        dispatch_request::{DispatchRequest, whole_seconds},
        fleet_vehicle::FleetVehicle,
    },
    solution::matcher::parse_booking_id,
};

/// Job ids and vehicle numbers arrive either as numbers or as strings.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum JsonIdentifier {
    Number(i64),
    Text(String),
}

impl Display for JsonIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonIdentifier::Number(value) => write!(f, "{}", value),
            JsonIdentifier::Text(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename = "Booking")]
pub struct JsonBooking {
    pub job_id: JsonIdentifier,
    pub pax_count: i64,
    pub origin: Coordinates,
    pub destination: Coordinates,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename = "Vehicle")]
pub struct JsonVehicle {
    pub vehicle_number: JsonIdentifier,
    pub start_location: Coordinates,
    pub vehicle_capacity: Option<i64>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default)]
#[serde(rename = "Parameters")]
pub struct JsonParameters {
    #[serde(rename = "STOP_TIME_IN_MINUTES")]
    pub stop_time_in_minutes: Option<u32>,
    #[serde(rename = "MAX_ROUTE_TIME_IN_MINUTES")]
    pub max_route_time_in_minutes: Option<u32>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
#[serde(deny_unknown_fields, rename = "TimeWindow")]
pub struct JsonTimeWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default)]
#[serde(rename = "OptimizeRequest")]
pub struct JsonOptimizeRequest {
    #[serde(default)]
    pub bookings: Vec<JsonBooking>,
    #[serde(default)]
    pub vehicles: Vec<JsonVehicle>,
    #[serde(default)]
    pub parameters: Option<JsonParameters>,
    #[serde(default)]
    pub time_window: Option<JsonTimeWindow>,
}

fn check_coordinates(
    owner: &str,
    field: &'static str,
    coordinates: &Coordinates,
) -> Result<(), ValidationError> {
    if coordinates.is_valid() {
        Ok(())
    } else {
        Err(ValidationError::InvalidCoordinates {
            owner: owner.to_owned(),
            field,
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
        })
    }
}

fn positive_minutes(value: Option<u32>, default: u32, name: &'static str) -> Result<u32, ValidationError> {
    match value.unwrap_or(default) {
        0 => Err(ValidationError::InvalidParameter(name)),
        minutes => Ok(minutes),
    }
}

impl JsonOptimizeRequest {
    /// Validates the inbound description and turns it into the domain
    /// request. Nothing here talks to the solver.
    #[instrument(skip_all, level = "debug")]
    pub fn build_request(
        self,
        config: &DispatchConfig,
        now: Timestamp,
    ) -> Result<DispatchRequest, ValidationError> {
        if self.bookings.is_empty() {
            return Err(ValidationError::NoBookings);
        }

        if self.vehicles.is_empty() {
            return Err(ValidationError::NoVehicles);
        }

        // Solved visits are resolved back to bookings through their numeric id.
        let mut booking_ids = FxHashSet::default();
        let bookings = self
            .bookings
            .into_iter()
            .map(|booking| {
                let label = booking.job_id.to_string();

                let booking_id = parse_booking_id(&label)
                    .map_err(|_| ValidationError::InvalidJobId(label.clone()))?;

                if !booking_ids.insert(booking_id) {
                    return Err(ValidationError::DuplicateBooking(label));
                }

                let pax_count = u32::try_from(booking.pax_count)
                    .ok()
                    .filter(|&pax_count| pax_count > 0)
                    .ok_or_else(|| ValidationError::InvalidPassengerCount {
                        job_id: label.clone(),
                        pax_count: booking.pax_count,
                    })?;

                check_coordinates(&label, "origin", &booking.origin)?;
                check_coordinates(&label, "destination", &booking.destination)?;

                Ok(Booking::new(
                    label,
                    pax_count,
                    booking.origin,
                    booking.destination,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut vehicle_labels = FxHashSet::default();
        let vehicles = self
            .vehicles
            .into_iter()
            .map(|vehicle| {
                let label = vehicle.vehicle_number.to_string();

                if !vehicle_labels.insert(label.clone()) {
                    return Err(ValidationError::DuplicateVehicle(label));
                }

                let requested = vehicle
                    .vehicle_capacity
                    .unwrap_or(config.vehicle_capacity as i64);
                let capacity = u32::try_from(requested)
                    .ok()
                    .filter(|&capacity| capacity > 0)
                    .ok_or_else(|| ValidationError::InvalidCapacity {
                        vehicle_number: label.clone(),
                        capacity: requested,
                    })?;

                check_coordinates(&label, "start_location", &vehicle.start_location)?;

                Ok(FleetVehicle::new(label, vehicle.start_location, capacity))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let parameters = self.parameters.unwrap_or_default();
        let stop_minutes = positive_minutes(
            parameters.stop_time_in_minutes,
            config.stop_minutes,
            "STOP_TIME_IN_MINUTES",
        )?;
        let max_route_minutes = positive_minutes(
            parameters.max_route_time_in_minutes,
            config.max_route_minutes,
            "MAX_ROUTE_TIME_IN_MINUTES",
        )?;

        let (start, end) = match self.time_window {
            Some(window) => (whole_seconds(window.start), whole_seconds(window.end)),
            None => {
                let start = whole_seconds(now);
                let end = start
                    .checked_add(config.planning_horizon)
                    .map_err(|_| ValidationError::InvalidTimeWindow)?;
                (start, end)
            }
        };

        if end <= start {
            return Err(ValidationError::InvalidTimeWindow);
        }

        Ok(DispatchRequest::new(
            bookings,
            vehicles,
            stop_minutes,
            max_route_minutes,
            start,
            end,
        ))
    }
}
